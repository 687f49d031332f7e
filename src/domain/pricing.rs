//! Order pricing for a cart snapshot.
//!
//! `compute_pricing` is a pure function of the cart lines, the customer's
//! membership tier and a [`PricingConfig`]. The membership discount is
//! rounded half-up to whole won *before* the free-delivery threshold is
//! checked, so the threshold applies to the net subtotal.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, One, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whole Korean won. There is no minor unit.
pub type Won = i64;

pub const DEFAULT_FREE_DELIVERY_THRESHOLD: Won = 30_000;
pub const DEFAULT_FLAT_DELIVERY_FEE: Won = 3_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Invalid cart line '{item_id}': {reason}")]
    InvalidLine { item_id: String, reason: String },
    #[error("Duplicate cart line '{0}'")]
    DuplicateItem(String),
    #[error("Unknown membership tier '{0}'")]
    UnknownTier(String),
    #[error("Invalid pricing config: {0}")]
    InvalidConfig(String),
    #[error("Amount overflow while pricing cart")]
    AmountOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MembershipTier {
    Basic,
    Silver,
    Gold,
    Platinum,
}

impl MembershipTier {
    pub const ALL: [MembershipTier; 4] = [Self::Basic, Self::Silver, Self::Gold, Self::Platinum];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }

    /// Lenient parse used for stored labels: anything unrecognised is BASIC.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or(Self::Basic)
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MembershipTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PricingError::UnknownTier(s.to_string()))
    }
}

/// One product/quantity pairing awaiting checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub unit_price: Won,
    pub quantity: i32,
}

impl CartLine {
    pub fn new(item_id: impl Into<String>, unit_price: Won, quantity: i32) -> Self {
        Self {
            item_id: item_id.into(),
            unit_price,
            quantity,
        }
    }

    fn validate(&self) -> Result<(), PricingError> {
        let reason = if self.item_id.trim().is_empty() {
            "item id must not be empty".to_string()
        } else if self.unit_price < 0 {
            format!("unit price {} is negative", self.unit_price)
        } else if self.quantity < 1 {
            format!("quantity {} is below 1", self.quantity)
        } else {
            return Ok(());
        };
        Err(PricingError::InvalidLine {
            item_id: self.item_id.clone(),
            reason,
        })
    }

    fn extended_price(&self) -> Option<Won> {
        self.unit_price.checked_mul(Won::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub free_delivery_threshold: Won,
    pub flat_delivery_fee: Won,
    /// Discount rate per tier, in `[0, 1]`. Missing tiers get no discount.
    pub discount_rates: BTreeMap<MembershipTier, BigDecimal>,
    pub tiers_with_free_delivery: BTreeSet<MembershipTier>,
}

fn percent(p: u32) -> BigDecimal {
    BigDecimal::from(p) / BigDecimal::from(100u32)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            free_delivery_threshold: DEFAULT_FREE_DELIVERY_THRESHOLD,
            flat_delivery_fee: DEFAULT_FLAT_DELIVERY_FEE,
            discount_rates: BTreeMap::from([
                (MembershipTier::Basic, BigDecimal::zero()),
                (MembershipTier::Silver, percent(5)),
                (MembershipTier::Gold, percent(10)),
                (MembershipTier::Platinum, percent(15)),
            ]),
            tiers_with_free_delivery: BTreeSet::from([
                MembershipTier::Gold,
                MembershipTier::Platinum,
            ]),
        }
    }
}

impl PricingConfig {
    pub fn with_delivery(mut self, free_delivery_threshold: Won, flat_delivery_fee: Won) -> Self {
        self.free_delivery_threshold = free_delivery_threshold;
        self.flat_delivery_fee = flat_delivery_fee;
        self
    }

    pub fn rate_for(&self, tier: MembershipTier) -> BigDecimal {
        self.discount_rates
            .get(&tier)
            .cloned()
            .unwrap_or_else(BigDecimal::zero)
    }

    pub fn waives_delivery(&self, tier: MembershipTier) -> bool {
        self.tiers_with_free_delivery.contains(&tier)
    }

    pub fn validate(&self) -> Result<(), PricingError> {
        if self.free_delivery_threshold < 0 {
            return Err(PricingError::InvalidConfig(format!(
                "free delivery threshold {} is negative",
                self.free_delivery_threshold
            )));
        }
        if self.flat_delivery_fee < 0 {
            return Err(PricingError::InvalidConfig(format!(
                "flat delivery fee {} is negative",
                self.flat_delivery_fee
            )));
        }
        for (tier, rate) in &self.discount_rates {
            if *rate < BigDecimal::zero() || *rate > BigDecimal::one() {
                return Err(PricingError::InvalidConfig(format!(
                    "discount rate {rate} for {tier} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub subtotal: Won,
    pub discount: Won,
    pub delivery_fee: Won,
    pub total: Won,
}

impl PricingResult {
    pub fn net_subtotal(&self) -> Won {
        self.subtotal - self.discount
    }
}

/// Round `subtotal * rate` half-up to whole won. Both factors are non-negative.
fn discount_for(subtotal: Won, rate: &BigDecimal) -> Result<Won, PricingError> {
    let half = BigDecimal::one() / BigDecimal::from(2u32);
    (BigDecimal::from(subtotal) * rate + half)
        .with_scale(0)
        .to_i64()
        .ok_or(PricingError::AmountOverflow)
}

pub fn compute_pricing(
    lines: &[CartLine],
    tier: MembershipTier,
    config: &PricingConfig,
) -> Result<PricingResult, PricingError> {
    config.validate()?;

    let mut seen = HashSet::with_capacity(lines.len());
    let mut subtotal: Won = 0;
    for line in lines {
        line.validate()?;
        if !seen.insert(line.item_id.as_str()) {
            return Err(PricingError::DuplicateItem(line.item_id.clone()));
        }
        subtotal = line
            .extended_price()
            .and_then(|extended| subtotal.checked_add(extended))
            .ok_or(PricingError::AmountOverflow)?;
    }

    let discount = discount_for(subtotal, &config.rate_for(tier))?;
    let net_subtotal = subtotal - discount;
    let delivery_fee =
        if net_subtotal >= config.free_delivery_threshold || config.waives_delivery(tier) {
            0
        } else {
            config.flat_delivery_fee
        };
    let total = net_subtotal
        .checked_add(delivery_fee)
        .ok_or(PricingError::AmountOverflow)?;

    Ok(PricingResult {
        subtotal,
        discount,
        delivery_fee,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(lines: &[CartLine], tier: MembershipTier) -> PricingResult {
        compute_pricing(lines, tier, &PricingConfig::default()).expect("valid cart")
    }

    fn assert_invariants(r: &PricingResult) {
        assert_eq!(r.total, r.subtotal - r.discount + r.delivery_fee);
    }

    // ── Scenarios ────────────────────────────────────────────────────────────

    #[test]
    fn basic_single_bento_pays_delivery() {
        let r = price(&[CartLine::new("1", 8500, 1)], MembershipTier::Basic);
        assert_eq!(
            r,
            PricingResult {
                subtotal: 8500,
                discount: 0,
                delivery_fee: 3000,
                total: 11500
            }
        );
    }

    #[test]
    fn basic_over_threshold_ships_free() {
        let r = price(&[CartLine::new("1", 8500, 4)], MembershipTier::Basic);
        assert_eq!(r.subtotal, 34000);
        assert_eq!(r.discount, 0);
        assert_eq!(r.delivery_fee, 0);
        assert_eq!(r.total, 34000);
    }

    #[test]
    fn gold_gets_discount_and_free_delivery() {
        let r = price(&[CartLine::new("x", 10000, 2)], MembershipTier::Gold);
        assert_eq!(r.subtotal, 20000);
        assert_eq!(r.discount, 2000);
        assert_eq!(r.net_subtotal(), 18000);
        assert_eq!(r.delivery_fee, 0);
        assert_eq!(r.total, 18000);
    }

    #[test]
    fn silver_discount_below_threshold() {
        let r = price(&[CartLine::new("2", 7500, 1)], MembershipTier::Silver);
        assert_eq!(r.discount, 375);
        assert_eq!(r.net_subtotal(), 7125);
        assert_eq!(r.delivery_fee, 3000);
        assert_eq!(r.total, 10125);
    }

    // ── Properties ───────────────────────────────────────────────────────────

    #[test]
    fn empty_cart_charges_only_delivery() {
        for tier in MembershipTier::ALL {
            let r = price(&[], tier);
            assert_eq!(r.subtotal, 0);
            assert_eq!(r.discount, 0);
            let expected_fee = if PricingConfig::default().waives_delivery(tier) {
                0
            } else {
                3000
            };
            assert_eq!(r.delivery_fee, expected_fee);
            assert_eq!(r.total, expected_fee);
        }
    }

    #[test]
    fn zero_price_lines_behave_like_empty_cart() {
        let lines = [CartLine::new("free-sample", 0, 3)];
        let r = price(&lines, MembershipTier::Silver);
        assert_eq!(r, price(&[], MembershipTier::Silver));
    }

    #[test]
    fn basic_rate_is_zero() {
        assert!(PricingConfig::default()
            .rate_for(MembershipTier::Basic)
            .is_zero());
        let r = price(&[CartLine::new("a", 12345, 3)], MembershipTier::Basic);
        assert_eq!(r.discount, 0);
    }

    #[test]
    fn discount_rounds_half_up() {
        // 10 * 0.05 = 0.5 -> 1, 30 * 0.05 = 1.5 -> 2, 29 * 0.05 = 1.45 -> 1
        assert_eq!(price(&[CartLine::new("a", 10, 1)], MembershipTier::Silver).discount, 1);
        assert_eq!(price(&[CartLine::new("a", 30, 1)], MembershipTier::Silver).discount, 2);
        assert_eq!(price(&[CartLine::new("a", 29, 1)], MembershipTier::Silver).discount, 1);
        // 7 * 0.15 = 1.05 -> 1
        assert_eq!(price(&[CartLine::new("a", 7, 1)], MembershipTier::Platinum).discount, 1);
    }

    #[test]
    fn threshold_is_checked_after_discount() {
        // 31000 * 0.05 = 1550 -> net 29450, below the threshold.
        let r = price(&[CartLine::new("a", 31000, 1)], MembershipTier::Silver);
        assert_eq!(r.net_subtotal(), 29450);
        assert_eq!(r.delivery_fee, 3000);
        assert_invariants(&r);
    }

    #[test]
    fn net_subtotal_exactly_at_threshold_ships_free() {
        let r = price(&[CartLine::new("a", 30000, 1)], MembershipTier::Basic);
        assert_eq!(r.delivery_fee, 0);

        // 31580 * 0.05 = 1579 -> net 30001
        let config = PricingConfig::default();
        let r = compute_pricing(&[CartLine::new("a", 31580, 1)], MembershipTier::Silver, &config)
            .expect("valid cart");
        assert_eq!(r.net_subtotal(), 30001);
        assert_eq!(r.delivery_fee, 0);

        let threshold = config.clone().with_delivery(30001, 3000);
        let r = compute_pricing(&[CartLine::new("a", 31580, 1)], MembershipTier::Silver, &threshold)
            .expect("valid cart");
        assert_eq!(r.delivery_fee, 0);
    }

    #[test]
    fn pricing_is_idempotent() {
        let lines = vec![CartLine::new("1", 8500, 2), CartLine::new("5", 12000, 1)];
        let first = price(&lines, MembershipTier::Platinum);
        let second = price(&lines, MembershipTier::Platinum);
        assert_eq!(first, second);
    }

    #[test]
    fn raising_quantity_never_lowers_subtotal_or_total() {
        // Each step adds more than the flat fee even after discount, so
        // crossing the threshold cannot lower the total.
        for tier in MembershipTier::ALL {
            let mut previous = price(&[CartLine::new("1", 7000, 1)], tier);
            for quantity in 2..=12 {
                let current = price(&[CartLine::new("1", 7000, quantity)], tier);
                assert!(current.subtotal >= previous.subtotal);
                assert!(
                    current.total >= previous.total,
                    "{tier}: total fell from {} to {} at quantity {quantity}",
                    previous.total,
                    current.total
                );
                assert_invariants(&current);
                previous = current;
            }
        }
    }

    #[test]
    fn crossing_threshold_with_a_cheap_line_can_lower_total() {
        let below = price(
            &[CartLine::new("a", 29000, 1), CartLine::new("b", 500, 1)],
            MembershipTier::Basic,
        );
        let above = price(
            &[CartLine::new("a", 29000, 1), CartLine::new("b", 500, 2)],
            MembershipTier::Basic,
        );
        assert!(above.subtotal > below.subtotal);
        assert_eq!(below.total, 32500);
        assert_eq!(above.total, 30000);
    }

    #[test]
    fn custom_config_changes_fee_and_waivers() {
        let mut config = PricingConfig::default().with_delivery(20000, 2500);
        config.tiers_with_free_delivery.clear();
        let r = compute_pricing(&[CartLine::new("a", 10000, 1)], MembershipTier::Gold, &config)
            .expect("valid cart");
        assert_eq!(r.discount, 1000);
        assert_eq!(r.delivery_fee, 2500);
        assert_eq!(r.total, 11500);
    }

    #[test]
    fn missing_rate_means_no_discount() {
        let mut config = PricingConfig::default();
        config.discount_rates.remove(&MembershipTier::Silver);
        let r = compute_pricing(&[CartLine::new("a", 10000, 1)], MembershipTier::Silver, &config)
            .expect("valid cart");
        assert_eq!(r.discount, 0);
    }

    // ── Contract violations ──────────────────────────────────────────────────

    #[test]
    fn rejects_negative_price() {
        let err = compute_pricing(
            &[CartLine::new("a", -1, 1)],
            MembershipTier::Basic,
            &PricingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidLine { ref item_id, .. } if item_id == "a"));
    }

    #[test]
    fn rejects_zero_quantity() {
        let err = compute_pricing(
            &[CartLine::new("a", 100, 0)],
            MembershipTier::Basic,
            &PricingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidLine { .. }));
    }

    #[test]
    fn rejects_blank_item_id() {
        let err = compute_pricing(
            &[CartLine::new("  ", 100, 1)],
            MembershipTier::Basic,
            &PricingConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidLine { .. }));
    }

    #[test]
    fn rejects_duplicate_items() {
        let err = compute_pricing(
            &[CartLine::new("a", 100, 1), CartLine::new("a", 100, 2)],
            MembershipTier::Basic,
            &PricingConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, PricingError::DuplicateItem("a".to_string()));
    }

    #[test]
    fn rejects_overflowing_subtotal() {
        let err = compute_pricing(
            &[CartLine::new("a", Won::MAX, 2)],
            MembershipTier::Basic,
            &PricingConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, PricingError::AmountOverflow);
    }

    #[test]
    fn rejects_rate_above_one() {
        let mut config = PricingConfig::default();
        config
            .discount_rates
            .insert(MembershipTier::Gold, percent(150));
        let err = compute_pricing(&[], MembershipTier::Basic, &config).unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_negative_fee() {
        let config = PricingConfig::default().with_delivery(30000, -1);
        let err = compute_pricing(&[], MembershipTier::Basic, &config).unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfig(_)));
    }

    // ── Tier parsing ─────────────────────────────────────────────────────────

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!("gold".parse::<MembershipTier>(), Ok(MembershipTier::Gold));
        assert_eq!(" PLATINUM ".parse::<MembershipTier>(), Ok(MembershipTier::Platinum));
    }

    #[test]
    fn strict_parse_rejects_unknown_tier() {
        assert_eq!(
            "DIAMOND".parse::<MembershipTier>(),
            Err(PricingError::UnknownTier("DIAMOND".to_string()))
        );
    }

    #[test]
    fn lenient_parse_defaults_to_basic() {
        assert_eq!(MembershipTier::from_label("DIAMOND"), MembershipTier::Basic);
        assert_eq!(MembershipTier::from_label("silver"), MembershipTier::Silver);
    }

    #[test]
    fn tier_serializes_as_upper_case_label() {
        let json = serde_json::to_string(&MembershipTier::Platinum).expect("serialize");
        assert_eq!(json, "\"PLATINUM\"");
    }
}
