//! User actions against the API: what each one invalidates and how its
//! outcome is reported.

use super::{
    app_state::{QueryCache, QueryKey},
    entities::{OrderReceipt, Ship, ShipPurchase, Structure, StructureTransfer},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mutation {
    PurchaseGood,
    SellGood,
    BuyShip,
    CreateStructure,
    Deposit,
    Withdraw,
    DepositToOther { structure_id: String },
}

impl Mutation {
    pub fn invalidates(&self) -> Vec<QueryKey> {
        match self {
            Mutation::PurchaseGood | Mutation::SellGood | Mutation::BuyShip => {
                vec![QueryKey::User, QueryKey::Ships]
            }
            Mutation::CreateStructure => vec![QueryKey::User, QueryKey::MyStructures],
            Mutation::Deposit | Mutation::Withdraw => {
                vec![QueryKey::Ships, QueryKey::MyStructures]
            }
            Mutation::DepositToOther { structure_id } => {
                vec![QueryKey::Ships, QueryKey::Structure(structure_id.clone())]
            }
        }
    }

    /// Title used for both the success and the failure notification.
    pub fn title(&self) -> &'static str {
        match self {
            Mutation::PurchaseGood => "Purchase",
            Mutation::SellGood => "Sale",
            Mutation::BuyShip => "Ship purchase",
            Mutation::CreateStructure => "New structure",
            Mutation::Deposit | Mutation::DepositToOther { .. } => "Deposit",
            Mutation::Withdraw => "Withdrawal",
        }
    }

    /// Records a successful mutation in the cache.
    pub fn apply_success(&self, cache: &mut QueryCache) {
        cache.invalidate_all(&self.invalidates());
    }

    pub fn failure(&self, message: impl Into<String>) -> Notification {
        Notification::error(format!("{} failed", self.title()), message)
    }
}

pub fn purchase_success(receipt: &OrderReceipt, good_name: &str, ship: &Ship) -> Notification {
    Notification::success(
        Mutation::PurchaseGood.title(),
        format!(
            "Bought {} {} for {} credits and loaded them onto {}.",
            receipt.order.quantity,
            good_name,
            receipt.order.total,
            ship.display_name()
        ),
    )
}

/// Reports the order total as returned by the API.
pub fn sell_success(receipt: &OrderReceipt, good_name: &str, ship: &Ship) -> Notification {
    Notification::success(
        Mutation::SellGood.title(),
        format!(
            "Sold {} {} from {} for {} credits.",
            receipt.order.quantity,
            good_name,
            ship.display_name(),
            receipt.order.total
        ),
    )
}

pub fn ship_purchase_success(purchase: &ShipPurchase, location: &str) -> Notification {
    Notification::success(
        Mutation::BuyShip.title(),
        format!(
            "{} is ready at {location}. Credits left: {}.",
            purchase.ship.display_name(),
            purchase.credits
        ),
    )
}

pub fn structure_created(structure: &Structure, type_name: &str) -> Notification {
    Notification::success(
        Mutation::CreateStructure.title(),
        format!(
            "{type_name} {} is under construction at {}.",
            structure.id, structure.location
        ),
    )
}

pub fn transfer_success(
    mutation: &Mutation,
    transfer: &StructureTransfer,
    good_name: &str,
    structure_id: &str,
) -> Notification {
    let message = match mutation {
        Mutation::Withdraw => format!(
            "Moved {} {} from structure {structure_id} onto {}.",
            transfer.moved.quantity,
            good_name,
            transfer.ship.display_name()
        ),
        _ => format!(
            "Moved {} {} from {} into structure {structure_id}.",
            transfer.moved.quantity,
            good_name,
            transfer.ship.display_name()
        ),
    };
    Notification::success(mutation.title(), message)
}
