//! Transaction modal state shared by the marketplace and structures pages.
//!
//! A modal moves `Closed -> Open(Empty) -> Open(Partial) -> Open(Ready) ->
//! Submitting -> Closed | Open`. The phase is derived from the form and the
//! locally known limits; submit is only possible from `Ready`.

use super::{
    entities::{GoodSymbol, LocationSymbol, MarketplaceGood, Ship},
    mutations::Mutation,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TradeForm {
    pub ship_id: Option<String>,
    pub good: Option<GoodSymbol>,
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Partial,
    Ready,
}

impl TradeForm {
    pub fn with_good(good: impl Into<GoodSymbol>) -> Self {
        Self {
            good: Some(good.into()),
            ..Self::default()
        }
    }

    /// Resolves the selected ship against the current ship list. A stale id
    /// resolves to `None`.
    pub fn selected_ship<'a>(&self, ships: &'a [Ship]) -> Option<&'a Ship> {
        let id = self.ship_id.as_deref()?;
        ships.iter().find(|ship| ship.id == id)
    }

    /// `limit` is the locally known maximum for the current ship/good.
    pub fn phase(&self, ships: &[Ship], limit: u32) -> FormPhase {
        let ship = self.selected_ship(ships);
        let has_good = self.good.is_some();
        match (ship, self.quantity) {
            (None, 0) if self.ship_id.is_none() => FormPhase::Empty,
            (Some(_), quantity) if has_good && quantity > 0 && quantity <= limit => {
                FormPhase::Ready
            }
            _ => FormPhase::Partial,
        }
    }
}

/// Submit is allowed only from `Ready` and while nothing is in flight.
pub fn can_submit(phase: FormPhase, in_flight: bool) -> bool {
    phase == FormPhase::Ready && !in_flight
}

#[derive(Clone, Debug, PartialEq)]
pub enum Modal<T, F = TradeForm> {
    Closed,
    Open { target: T, form: F, submitting: bool },
}

impl<T, F> Default for Modal<T, F> {
    fn default() -> Self {
        Modal::Closed
    }
}

impl<T: Clone, F: Clone> Modal<T, F> {
    pub fn open(target: T, form: F) -> Self {
        Modal::Open {
            target,
            form,
            submitting: false,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Modal::Open { .. })
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Modal::Open { submitting: true, .. })
    }

    pub fn target(&self) -> Option<&T> {
        match self {
            Modal::Open { target, .. } => Some(target),
            Modal::Closed => None,
        }
    }

    pub fn form(&self) -> Option<&F> {
        match self {
            Modal::Open { form, .. } => Some(form),
            Modal::Closed => None,
        }
    }

    /// Applies a form edit; ignored while submitting.
    pub fn edit(&mut self, apply: impl FnOnce(&mut F)) {
        if let Modal::Open {
            form,
            submitting: false,
            ..
        } = self
        {
            apply(form);
        }
    }

    /// Enters `Submitting` and hands back the target and form to submit.
    pub fn begin_submit(&mut self) -> Option<(T, F)> {
        match self {
            Modal::Open {
                target,
                form,
                submitting,
            } if !*submitting => {
                *submitting = true;
                Some((target.clone(), form.clone()))
            }
            _ => None,
        }
    }

    /// Success closes the modal; failure reopens it for another attempt.
    pub fn finish(&mut self, succeeded: bool) {
        if succeeded {
            *self = Modal::Closed;
        } else if let Modal::Open { submitting, .. } = self {
            *submitting = false;
        }
    }

    pub fn close(&mut self) {
        *self = Modal::Closed;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
        }
    }
}

/// A buy or sell of one marketplace good at one location.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketTrade {
    pub side: TradeSide,
    pub location: LocationSymbol,
    pub good: MarketplaceGood,
}

impl MarketTrade {
    pub fn limit(&self, ship: Option<&Ship>) -> u32 {
        match self.side {
            TradeSide::Buy => buy_limit(ship, &self.good),
            TradeSide::Sell => sell_limit(ship, &self.good.symbol),
        }
    }

    pub fn unit_price(&self) -> u32 {
        match self.side {
            TradeSide::Buy => self.good.purchase_price_per_unit,
            TradeSide::Sell => self.good.sell_price_per_unit,
        }
    }

    pub fn mutation(&self) -> Mutation {
        match self.side {
            TradeSide::Buy => Mutation::PurchaseGood,
            TradeSide::Sell => Mutation::SellGood,
        }
    }
}

/// Ships whose current location is `location`.
pub fn docked_ships<'a>(ships: &'a [Ship], location: &str) -> Vec<&'a Ship> {
    ships.iter().filter(|ship| ship.is_docked_at(location)).collect()
}

/// Buy limit: available stock and free cargo space.
pub fn buy_limit(ship: Option<&Ship>, good: &MarketplaceGood) -> u32 {
    let Some(ship) = ship else {
        return 0;
    };
    let by_space = ship
        .space_available
        .checked_div(good.volume_per_unit)
        .unwrap_or(u32::MAX);
    good.quantity_available.min(by_space)
}

/// Sell limit: what the ship carries of that good.
pub fn sell_limit(ship: Option<&Ship>, good: &str) -> u32 {
    ship.map_or(0, |ship| ship.cargo_quantity(good))
}

/// Parses a quantity input and clamps it to `limit`. Non-numeric input is 0.
pub fn clamp_quantity(input: &str, limit: u32) -> u32 {
    input.trim().parse::<u32>().unwrap_or(0).min(limit)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::entities::CargoItem;
    use crate::domain::marketplace::tests::good;

    pub(crate) fn ship(id: &str, location: Option<&str>, space: u32) -> Ship {
        Ship {
            id: id.to_string(),
            kind: "JW-MK-I".to_string(),
            class: Some("MK-I".to_string()),
            manufacturer: Some("Jackshaw".to_string()),
            location: location.map(str::to_string),
            cargo: Vec::new(),
            space_available: space,
            max_cargo: 50,
            speed: Some(1),
            plating: Some(5),
            weapons: Some(5),
            loading_speed: Some(25),
        }
    }

    fn fuel_form(ship_id: Option<&str>, quantity: u32) -> TradeForm {
        TradeForm {
            ship_id: ship_id.map(str::to_string),
            good: Some("FUEL".to_string()),
            quantity,
        }
    }

    #[test]
    fn phase_progresses_from_empty_to_ready() {
        let ships = vec![ship("s1", Some("A"), 50)];

        assert_eq!(fuel_form(None, 0).phase(&ships, 10), FormPhase::Empty);
        assert_eq!(fuel_form(Some("s1"), 0).phase(&ships, 10), FormPhase::Partial);
        assert_eq!(fuel_form(None, 5).phase(&ships, 10), FormPhase::Partial);
        assert_eq!(fuel_form(Some("s1"), 5).phase(&ships, 10), FormPhase::Ready);
    }

    #[test]
    fn quantity_above_limit_is_not_ready() {
        let ships = vec![ship("s1", Some("A"), 50)];

        assert_eq!(fuel_form(Some("s1"), 11).phase(&ships, 10), FormPhase::Partial);
    }

    #[test]
    fn unknown_ship_id_is_not_ready() {
        let ships = vec![ship("s1", Some("A"), 50)];

        let phase = fuel_form(Some("gone"), 5).phase(&ships, 10);

        assert_eq!(phase, FormPhase::Partial);
        assert!(!can_submit(phase, false));
    }

    #[test]
    fn submit_disabled_while_in_flight() {
        assert!(can_submit(FormPhase::Ready, false));
        assert!(!can_submit(FormPhase::Ready, true));
        assert!(!can_submit(FormPhase::Partial, false));
        assert!(!can_submit(FormPhase::Empty, false));
    }

    #[test]
    fn modal_closes_on_success_and_stays_open_on_failure() {
        let mut modal = Modal::open("A".to_string(), fuel_form(Some("s1"), 5));

        assert!(modal.begin_submit().is_some());
        assert!(modal.is_submitting());
        assert!(modal.begin_submit().is_none());

        modal.finish(false);
        assert!(modal.is_open());
        assert!(!modal.is_submitting());

        modal.begin_submit();
        modal.finish(true);
        assert_eq!(modal, Modal::Closed);
    }

    #[test]
    fn edits_are_ignored_while_submitting() {
        let mut modal = Modal::open((), fuel_form(Some("s1"), 5));
        modal.begin_submit();

        modal.edit(|form| form.quantity = 9);

        assert_eq!(modal.form().map(|f| f.quantity), Some(5));
    }

    #[test]
    fn docked_ships_filters_by_location() {
        let ships = vec![
            ship("s1", Some("A"), 50),
            ship("s2", Some("B"), 50),
            ship("s3", None, 50),
            ship("s4", Some("A"), 50),
        ];

        let ids: Vec<_> = docked_ships(&ships, "A").iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec!["s1", "s4"]);
    }

    #[test]
    fn buy_limit_respects_space_and_stock() {
        let mut fuel = good("FUEL", 3, 5);
        fuel.volume_per_unit = 2;
        fuel.quantity_available = 100;
        let hauler = ship("s1", Some("A"), 50);

        assert_eq!(buy_limit(Some(&hauler), &fuel), 25);

        fuel.quantity_available = 10;
        assert_eq!(buy_limit(Some(&hauler), &fuel), 10);
        assert_eq!(buy_limit(None, &fuel), 0);
    }

    #[test]
    fn zero_volume_good_is_limited_by_stock() {
        let mut research = good("RESEARCH", 3, 5);
        research.volume_per_unit = 0;
        research.quantity_available = 7;

        assert_eq!(buy_limit(Some(&ship("s1", Some("A"), 0)), &research), 7);
    }

    #[test]
    fn sell_limit_uses_cargo_quantity() {
        let mut hauler = ship("s1", Some("A"), 50);
        hauler.cargo = vec![CargoItem {
            good: "FUEL".to_string(),
            quantity: 12,
            total_volume: 12,
        }];

        assert_eq!(sell_limit(Some(&hauler), "FUEL"), 12);
        assert_eq!(sell_limit(Some(&hauler), "METALS"), 0);
    }

    #[test]
    fn market_trade_limit_depends_on_side() {
        let mut hauler = ship("s1", Some("A"), 8);
        hauler.cargo = vec![CargoItem {
            good: "FUEL".to_string(),
            quantity: 3,
            total_volume: 3,
        }];
        let mut trade = MarketTrade {
            side: TradeSide::Buy,
            location: "A".to_string(),
            good: good("FUEL", 4, 2),
        };

        assert_eq!(trade.limit(Some(&hauler)), 8);
        assert_eq!(trade.unit_price(), 4);
        assert_eq!(trade.mutation(), Mutation::PurchaseGood);

        trade.side = TradeSide::Sell;
        assert_eq!(trade.limit(Some(&hauler)), 3);
        assert_eq!(trade.unit_price(), 2);
        assert_eq!(trade.mutation(), Mutation::SellGood);
    }

    #[test]
    fn clamp_quantity_handles_bad_input() {
        assert_eq!(clamp_quantity("7", 10), 7);
        assert_eq!(clamp_quantity("70", 10), 10);
        assert_eq!(clamp_quantity("x", 10), 0);
        assert_eq!(clamp_quantity("-3", 10), 0);
    }
}
