//! Typed asynchronous client for the SpaceTraders v1 API.
//!
//! - One method per read or write the pages perform.
//! - Error bodies (`{"error": {"message", "code"}}`) become [`ApiError::Api`].

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{
    GoodType, Location, MarketplaceGood, OrderReceipt, Ship, ShipListing, ShipPurchase,
    Structure, StructureTransfer, StructureType, User,
};
use crate::util::{persistence::Settings, version::USER_AGENT};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("base URL cannot take a path: {0}")]
    BaseUrl(String),
    #[error("invalid path segment {0:?}")]
    PathSegment(String),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error {status}: {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Message shown to the user for a failed request.
pub fn error_message(error: &ApiError) -> String {
    match error {
        ApiError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

#[derive(Clone)]
pub struct SpaceTradersClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

/// Clients built from the same settings are interchangeable.
impl PartialEq for SpaceTradersClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl SpaceTradersClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let base_url = Url::parse(&settings.base_url)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url,
            token: settings.token.clone().filter(|token| !token.trim().is_empty()),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub async fn get_user(&self) -> Result<User, ApiError> {
        let envelope: UserEnvelope = self.get(&["my", "account"]).await?;
        Ok(envelope.user)
    }

    pub async fn list_ships(&self) -> Result<Vec<Ship>, ApiError> {
        let envelope: ShipsEnvelope = self.get(&["my", "ships"]).await?;
        Ok(envelope.ships)
    }

    pub async fn get_location_marketplace(
        &self,
        location: &str,
    ) -> Result<Vec<MarketplaceGood>, ApiError> {
        let raw: serde_json::Value = self
            .get(&["locations", location, "marketplace"])
            .await?;
        decode_marketplace(raw)
    }

    pub async fn get_ship_listings(&self, system: &str) -> Result<Vec<ShipListing>, ApiError> {
        let envelope: ShipListingsEnvelope = self
            .get(&["systems", system, "ship-listings"])
            .await?;
        Ok(envelope.ship_listings)
    }

    pub async fn list_good_types(&self) -> Result<Vec<GoodType>, ApiError> {
        let envelope: GoodsEnvelope = self.get(&["types", "goods"]).await?;
        Ok(envelope.goods)
    }

    pub async fn list_structure_types(&self) -> Result<Vec<StructureType>, ApiError> {
        let envelope: StructuresEnvelope<StructureType> = self.get(&["types", "structures"]).await?;
        Ok(envelope.structures)
    }

    pub async fn list_my_structures(&self) -> Result<Vec<Structure>, ApiError> {
        let envelope: StructuresEnvelope<Structure> = self.get(&["my", "structures"]).await?;
        Ok(envelope.structures)
    }

    pub async fn get_structure_info(&self, id: &str) -> Result<Structure, ApiError> {
        let envelope: StructureEnvelope = self.get(&["structures", id]).await?;
        Ok(envelope.structure)
    }

    pub async fn get_system_locations(&self, system: &str) -> Result<Vec<Location>, ApiError> {
        let envelope: LocationsEnvelope = self.get(&["systems", system, "locations"]).await?;
        Ok(envelope.locations)
    }

    pub async fn buy_ship(&self, location: &str, kind: &str) -> Result<ShipPurchase, ApiError> {
        self.post(&["my", "ships"], &PlacementRequest { location, kind })
            .await
    }

    pub async fn purchase(
        &self,
        ship_id: &str,
        good: &str,
        quantity: u32,
    ) -> Result<OrderReceipt, ApiError> {
        self.post(
            &["my", "purchase-orders"],
            &CargoRequest {
                ship_id,
                good,
                quantity,
            },
        )
        .await
    }

    pub async fn sell(
        &self,
        ship_id: &str,
        good: &str,
        quantity: u32,
    ) -> Result<OrderReceipt, ApiError> {
        self.post(
            &["my", "sell-orders"],
            &CargoRequest {
                ship_id,
                good,
                quantity,
            },
        )
        .await
    }

    pub async fn create_structure(&self, location: &str, kind: &str) -> Result<Structure, ApiError> {
        let envelope: StructureEnvelope = self
            .post(&["my", "structures"], &PlacementRequest { location, kind })
            .await?;
        Ok(envelope.structure)
    }

    pub async fn deposit(
        &self,
        structure_id: &str,
        ship_id: &str,
        good: &str,
        quantity: u32,
    ) -> Result<StructureTransfer, ApiError> {
        self.post(
            &["my", "structures", structure_id, "deposit"],
            &CargoRequest {
                ship_id,
                good,
                quantity,
            },
        )
        .await
    }

    pub async fn withdraw(
        &self,
        structure_id: &str,
        ship_id: &str,
        good: &str,
        quantity: u32,
    ) -> Result<StructureTransfer, ApiError> {
        self.post(
            &["my", "structures", structure_id, "transfer"],
            &CargoRequest {
                ship_id,
                good,
                quantity,
            },
        )
        .await
    }

    pub async fn deposit_to_other_structure(
        &self,
        structure_id: &str,
        ship_id: &str,
        good: &str,
        quantity: u32,
    ) -> Result<StructureTransfer, ApiError> {
        self.post(
            &["structures", structure_id, "deposit"],
            &CargoRequest {
                ship_id,
                good,
                quantity,
            },
        )
        .await
    }

    async fn get<T>(&self, path: &[&str]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "GET");
        self.send(self.http.get(url)).await
    }

    async fn post<B, T>(&self, path: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "POST");
        self.send(self.http.post(url).json(body)).await
    }

    async fn send<T>(&self, builder: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let builder = match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };
        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            let error = parse_error_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), "request failed: {error}");
            return Err(error);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Appends `path` to the base URL one segment at a time, so ids are
    /// percent-encoded and cannot add segments, a query or a fragment.
    fn url(&self, path: &[&str]) -> Result<Url, ApiError> {
        if let Some(segment) = path
            .iter()
            .find(|segment| matches!(**segment, "" | "." | ".."))
        {
            return Err(ApiError::PathSegment(segment.to_string()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(path);
        Ok(url)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CargoRequest<'a> {
    ship_id: &'a str,
    good: &'a str,
    quantity: u32,
}

#[derive(Serialize)]
struct PlacementRequest<'a> {
    location: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: User,
}

#[derive(Debug, Deserialize)]
struct ShipsEnvelope {
    ships: Vec<Ship>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShipListingsEnvelope {
    ship_listings: Vec<ShipListing>,
}

#[derive(Debug, Deserialize)]
struct GoodsEnvelope {
    goods: Vec<GoodType>,
}

#[derive(Debug, Deserialize)]
struct StructuresEnvelope<T> {
    structures: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct StructureEnvelope {
    structure: Structure,
}

#[derive(Debug, Deserialize)]
struct LocationsEnvelope {
    locations: Vec<Location>,
}

#[derive(Debug, Deserialize)]
struct MarketplaceEnvelope {
    marketplace: Vec<MarketplaceGood>,
}

#[derive(Debug, Deserialize)]
struct LocationMarketplaceEnvelope {
    location: MarketplaceEnvelope,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

/// The marketplace comes either bare or nested under the location.
fn decode_marketplace(value: serde_json::Value) -> Result<Vec<MarketplaceGood>, ApiError> {
    if let Ok(envelope) = serde_json::from_value::<MarketplaceEnvelope>(value.clone()) {
        return Ok(envelope.marketplace);
    }
    let envelope: LocationMarketplaceEnvelope = serde_json::from_value(value)?;
    Ok(envelope.location.marketplace)
}

fn parse_error_body(status: u16, body: &[u8]) -> ApiError {
    match serde_json::from_slice::<ErrorEnvelope>(body) {
        Ok(envelope) => ApiError::Api {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            ApiError::Api {
                status,
                code: None,
                message: if text.is_empty() {
                    format!("request failed with status {status}")
                } else {
                    text
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_stay_inside_their_path_segment() {
        let client = SpaceTradersClient::new(&Settings::default()).unwrap();

        for id in ["abc/../../my/ships", "abc?x=1", "a#b"] {
            let url = client.url(&["structures", id]).unwrap();

            assert_eq!(url.host_str(), Some("api.spacetraders.io"));
            assert!(url.path().starts_with("/structures/"), "{url}");
            assert_eq!(url.path_segments().map(|segments| segments.count()), Some(2), "{url}");
            assert_eq!(url.query(), None);
            assert_eq!(url.fragment(), None);
        }
        assert!(matches!(
            client.url(&["structures", ".."]),
            Err(ApiError::PathSegment(_))
        ));
    }

    #[test]
    fn base_path_prefixes_every_request() {
        let settings = Settings {
            base_url: "https://example.test/v1/".to_string(),
            ..Settings::default()
        };
        let client = SpaceTradersClient::new(&settings).unwrap();

        let url = client.url(&["my", "structures", "st-1", "deposit"]).unwrap();

        assert_eq!(url.as_str(), "https://example.test/v1/my/structures/st-1/deposit");
    }

    #[test]
    fn error_body_becomes_api_error() {
        let body = br#"{"error":{"message":"Ship has insufficient cargo space.","code":3001}}"#;

        let error = parse_error_body(422, body);

        match &error {
            ApiError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(*status, 422);
                assert_eq!(*code, Some(3001));
                assert_eq!(message, "Ship has insufficient cargo space.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(error_message(&error), "Ship has insufficient cargo space.");
    }

    #[test]
    fn non_json_error_keeps_status() {
        let error = parse_error_body(500, b"");

        assert_eq!(error_message(&error), "request failed with status 500");
    }

    #[test]
    fn marketplace_decodes_bare_and_nested() {
        let good = json!({
            "symbol": "FUEL",
            "volumePerUnit": 1,
            "pricePerUnit": 4,
            "spread": 1,
            "purchasePricePerUnit": 5,
            "sellPricePerUnit": 3,
            "quantityAvailable": 5000
        });

        let bare = decode_marketplace(json!({ "marketplace": [good.clone()] })).unwrap();
        let nested = decode_marketplace(json!({
            "location": { "symbol": "OE-PM-TR", "marketplace": [good] }
        }))
        .unwrap();

        assert_eq!(bare, nested);
        assert_eq!(bare[0].purchase_price_per_unit, 5);
        assert_eq!(bare[0].quantity_available, 5000);
    }

    #[test]
    fn ships_decode_with_cargo_and_transit() {
        let envelope: ShipsEnvelope = serde_json::from_value(json!({
            "ships": [
                {
                    "id": "ckon84fo20196vkzi3ud5h0bh",
                    "type": "JW-MK-I",
                    "class": "MK-I",
                    "manufacturer": "Jackshaw",
                    "location": "OE-PM-TR",
                    "cargo": [{ "good": "FUEL", "quantity": 20, "totalVolume": 20 }],
                    "spaceAvailable": 30,
                    "maxCargo": 50,
                    "speed": 1,
                    "plating": 5,
                    "weapons": 5,
                    "loadingSpeed": 25
                },
                { "id": "ckon8", "type": "GR-MK-I", "spaceAvailable": 100 }
            ]
        }))
        .unwrap();

        assert_eq!(envelope.ships[0].cargo_quantity("FUEL"), 20);
        assert!(envelope.ships[0].is_docked_at("OE-PM-TR"));
        assert_eq!(envelope.ships[1].location, None);
    }

    #[test]
    fn structure_decodes_owner_and_inventory() {
        let envelope: StructureEnvelope = serde_json::from_value(json!({
            "structure": {
                "id": "ckp5ln6ov0018ulvzqwcbazp6",
                "type": "MINE",
                "location": "OE-UC-AD",
                "ownedBy": { "username": "someone" },
                "active": true,
                "status": "Producing",
                "inventory": [{ "good": "METALS", "quantity": 140 }],
                "consumes": ["MACHINERY", "FUEL"],
                "produces": ["METALS"]
            }
        }))
        .unwrap();

        let structure = envelope.structure;
        assert_eq!(structure.inventory_quantity("METALS"), 140);
        assert_eq!(structure.owned_by.map(|o| o.username), Some("someone".to_string()));
    }

    #[test]
    fn transfer_accepts_deposit_and_transfer_fields() {
        let ship = json!({ "id": "s1", "type": "JW-MK-I", "location": "OE-PM" });

        let deposit: StructureTransfer = serde_json::from_value(json!({
            "deposit": { "good": "FUEL", "quantity": 10 },
            "ship": ship.clone()
        }))
        .unwrap();
        let transfer: StructureTransfer = serde_json::from_value(json!({
            "transfer": { "good": "METALS", "quantity": 5 },
            "ship": ship
        }))
        .unwrap();

        assert_eq!(deposit.moved.quantity, 10);
        assert_eq!(transfer.moved.good, "METALS");
    }

    #[test]
    fn user_decodes_join_timestamp() {
        let envelope: UserEnvelope = serde_json::from_value(json!({
            "user": {
                "username": "trader",
                "credits": 12500,
                "shipCount": 2,
                "structureCount": 1,
                "joinedAt": "2021-06-01T12:00:00.000Z"
            }
        }))
        .unwrap();

        assert_eq!(envelope.user.credits, 12_500);
        assert!(envelope.user.joined_at.is_some());
    }

    #[test]
    fn cargo_request_uses_camel_case() {
        let body = serde_json::to_value(CargoRequest {
            ship_id: "s1",
            good: "FUEL",
            quantity: 3,
        })
        .unwrap();

        assert_eq!(body, json!({ "shipId": "s1", "good": "FUEL", "quantity": 3 }));
    }
}
