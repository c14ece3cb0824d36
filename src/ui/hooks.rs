//! Query and mutation hooks over the shared [`QueryCache`].
//!
//! Queries observe only their own key's generation, so an invalidation
//! refetches exactly the keys a mutation names. Previous data stays visible
//! while a refetch is in flight.

use std::future::Future;

use dioxus::prelude::*;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, info, warn};

use crate::domain::{
    GoodType, Mutation, Notification, QueryCache, QueryKey, QueryState, Ship, Structure,
    StructureType, User,
};
use crate::infra::{error_message, fetch_with_retry, ApiError, RetryPolicy, SpaceTradersClient};
use crate::ui::components::toast::{push_toast, ToastMessage};

/// Handle to one cached remote value.
pub struct Query<T: 'static> {
    resource: Resource<QueryState<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Query<T> {}

impl<T: Clone + 'static> Query<T> {
    pub fn state(&self) -> QueryState<T> {
        self.resource.read().clone().unwrap_or(QueryState::Loading)
    }

    pub fn data(&self) -> Option<T> {
        match self.state() {
            QueryState::Ready(data) => Some(data),
            _ => None,
        }
    }
}

pub fn use_query<T, K, F, Fut>(key: K, fetch: F) -> Query<T>
where
    T: Clone + 'static,
    K: Fn() -> QueryKey + 'static,
    F: Fn(SpaceTradersClient, QueryKey) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_context::<SpaceTradersClient>();
    let policy = use_context::<RetryPolicy>();
    let cache = use_context::<Signal<QueryCache>>();

    let key = use_memo(move || key());
    let generation = use_memo(move || cache.read().generation(&key.read()));

    let resource = use_resource(move || {
        let key = key();
        let generation = generation();
        let client = client.clone();
        let fetch = fetch.clone();
        async move {
            debug!(%key, generation, "fetching");
            let outcome = fetch_with_retry(&key, policy, || fetch(client.clone(), key.clone())).await;
            into_state(outcome)
        }
    });

    Query { resource }
}

/// A set of same-shaped queries (one per location or system) fetched
/// concurrently. Each entry updates as its request resolves.
pub struct QuerySet<T: 'static> {
    results: Signal<Vec<(QueryKey, QueryState<T>)>>,
}

impl<T> Clone for QuerySet<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for QuerySet<T> {}

impl<T: Clone + 'static> QuerySet<T> {
    /// Resolved entries as `(param, data)`.
    pub fn ready(&self) -> Vec<(String, T)> {
        self.results
            .read()
            .iter()
            .filter_map(|(key, state)| {
                let data = state.data()?;
                Some((key.param().unwrap_or_default().to_string(), data.clone()))
            })
            .collect()
    }

    pub fn loading(&self) -> usize {
        self.results
            .read()
            .iter()
            .filter(|(_, state)| state.is_loading())
            .count()
    }

    /// Failed entries as `(param, message)`.
    pub fn errors(&self) -> Vec<(String, String)> {
        self.results
            .read()
            .iter()
            .filter_map(|(key, state)| {
                let message = state.error()?;
                Some((key.param().unwrap_or_default().to_string(), message.to_string()))
            })
            .collect()
    }
}

pub fn use_queries<T, K, F, Fut>(keys: K, fetch: F) -> QuerySet<T>
where
    T: Clone + 'static,
    K: Fn() -> Vec<QueryKey> + 'static,
    F: Fn(SpaceTradersClient, QueryKey) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let client = use_context::<SpaceTradersClient>();
    let policy = use_context::<RetryPolicy>();
    let cache = use_context::<Signal<QueryCache>>();
    let results = use_signal(Vec::<(QueryKey, QueryState<T>)>::new);

    let keys = use_memo(move || keys());
    let generations = use_memo(move || {
        let cache = cache.read();
        keys.read()
            .iter()
            .map(|key| cache.generation(key))
            .collect::<Vec<_>>()
    });

    let _driver = use_resource(move || {
        let keys = keys();
        let _generations = generations();
        let client = client.clone();
        let fetch = fetch.clone();
        let mut results = results;
        async move {
            let carried = carry_over(&results.peek(), &keys);
            results.set(carried);

            let mut pending: FuturesUnordered<_> = keys
                .into_iter()
                .map(|key| {
                    let client = client.clone();
                    let fetch = fetch.clone();
                    async move {
                        let outcome =
                            fetch_with_retry(&key, policy, || fetch(client.clone(), key.clone()))
                                .await;
                        (key, into_state(outcome))
                    }
                })
                .collect();

            while let Some((key, state)) = pending.next().await {
                results.with_mut(|entries| {
                    if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
                        entry.1 = state;
                    }
                });
            }
        }
    });

    QuerySet { results }
}

/// Entries for `keys`, keeping resolved data from the previous run.
fn carry_over<T: Clone>(
    previous: &[(QueryKey, QueryState<T>)],
    keys: &[QueryKey],
) -> Vec<(QueryKey, QueryState<T>)> {
    keys.iter()
        .map(|key| {
            let state = previous
                .iter()
                .find(|(k, state)| k == key && state.data().is_some())
                .map(|(_, state)| state.clone())
                .unwrap_or(QueryState::Loading);
            (key.clone(), state)
        })
        .collect()
}

fn into_state<T>(outcome: Result<T, ApiError>) -> QueryState<T> {
    match outcome {
        Ok(data) => QueryState::Ready(data),
        Err(err) => QueryState::Failed(error_message(&err)),
    }
}

pub fn use_user() -> Query<User> {
    use_query(|| QueryKey::User, |client, _| async move { client.get_user().await })
}

pub fn use_ships() -> Query<Vec<Ship>> {
    use_query(|| QueryKey::Ships, |client, _| async move { client.list_ships().await })
}

pub fn use_good_types() -> Query<Vec<GoodType>> {
    use_query(
        || QueryKey::GoodTypes,
        |client, _| async move { client.list_good_types().await },
    )
}

pub fn use_structure_types() -> Query<Vec<StructureType>> {
    use_query(
        || QueryKey::StructureTypes,
        |client, _| async move { client.list_structure_types().await },
    )
}

pub fn use_my_structures() -> Query<Vec<Structure>> {
    use_query(
        || QueryKey::MyStructures,
        |client, _| async move { client.list_my_structures().await },
    )
}

/// Runs user actions: at most one request in flight, never retried.
#[derive(Clone, Copy, PartialEq)]
pub struct Mutator {
    cache: Signal<QueryCache>,
    toasts: Signal<Vec<ToastMessage>>,
    in_flight: Signal<bool>,
}

impl Mutator {
    pub fn in_flight(&self) -> bool {
        (self.in_flight)()
    }

    /// Sends `request`. On success the mutation's keys are invalidated and
    /// `describe` builds the notification; `done` receives the outcome.
    pub fn submit<T, Fut, S, D>(self, mutation: Mutation, request: Fut, describe: S, done: D)
    where
        T: 'static,
        Fut: Future<Output = Result<T, ApiError>> + 'static,
        S: FnOnce(&T) -> Notification + 'static,
        D: FnOnce(bool) + 'static,
    {
        let Self {
            mut cache,
            toasts,
            mut in_flight,
        } = self;
        if *in_flight.peek() {
            warn!(?mutation, "mutation already in flight");
            push_toast(
                toasts,
                Notification::warning(mutation.title(), "Another request is still running."),
            );
            done(false);
            return;
        }
        in_flight.set(true);
        spawn(async move {
            let succeeded = match request.await {
                Ok(value) => {
                    info!(?mutation, "mutation succeeded");
                    cache.with_mut(|cache| mutation.apply_success(cache));
                    push_toast(toasts, describe(&value));
                    true
                }
                Err(err) => {
                    warn!(?mutation, "mutation failed: {err}");
                    push_toast(toasts, mutation.failure(error_message(&err)));
                    false
                }
            };
            in_flight.set(false);
            done(succeeded);
        });
    }
}

pub fn use_mutator() -> Mutator {
    let cache = use_context::<Signal<QueryCache>>();
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let in_flight = use_signal(|| false);
    Mutator {
        cache,
        toasts,
        in_flight,
    }
}
