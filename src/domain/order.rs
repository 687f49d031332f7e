use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::CartItem;
use super::errors::DomainError;
use super::pricing::{MembershipTier, PricingResult, Won};

pub const STATUS_PENDING: &str = "PENDING";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliverySlot {
    Morning,
    Afternoon,
    Evening,
}

impl DeliverySlot {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
        }
    }

    /// Delivery window shown to the customer.
    pub fn window(self) -> &'static str {
        match self {
            Self::Morning => "09:00-12:00",
            Self::Afternoon => "13:00-18:00",
            Self::Evening => "18:00-21:00",
        }
    }
}

impl FromStr for DeliverySlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(DomainError::InvalidInput(format!(
                "unknown delivery slot '{other}'"
            ))),
        }
    }
}

impl fmt::Display for DeliverySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Transfer,
    Phone,
}

impl PaymentMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Transfer => "transfer",
            Self::Phone => "phone",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "card" => Ok(Self::Card),
            "transfer" => Ok(Self::Transfer),
            "phone" => Ok(Self::Phone),
            other => Err(DomainError::InvalidInput(format!(
                "unknown payment method '{other}'"
            ))),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub recipient: String,
    pub phone: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub date: NaiveDate,
    pub slot: DeliverySlot,
    pub notes: Option<String>,
}

impl DeliveryDetails {
    /// The earliest date an order placed on `today` can be delivered.
    pub fn earliest_date(today: NaiveDate) -> NaiveDate {
        today.checked_add_days(Days::new(1)).unwrap_or(today)
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), DomainError> {
        for (field, value) in [
            ("recipient", &self.recipient),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidInput(format!("{field} is required")));
            }
        }
        let earliest = Self::earliest_date(today);
        if self.date < earliest {
            return Err(DomainError::InvalidInput(format!(
                "delivery date {} is before {earliest}",
                self.date
            )));
        }
        Ok(())
    }
}

/// Human-facing order number: `LB` + placement date + six hex digits of the
/// order id.
pub fn order_number(placed_on: NaiveDate, id: Uuid) -> String {
    let hex = id.simple().to_string().to_uppercase();
    format!("LB{}{}", placed_on.format("%Y%m%d"), &hex[..6])
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub membership: MembershipTier,
    pub lines: Vec<CartItem>,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub pricing: PricingResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub membership: MembershipTier,
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub payment_reference: String,
    pub pricing: PricingResult,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartItem>,
}

#[derive(Debug, Clone)]
pub struct ListResult {
    pub items: Vec<OrderView>,
    pub total: i64,
}

/// Rows to skip for a 1-based `page`. `None` when the offset does not fit
/// in an `i64`; no stored row can sit that far in.
pub fn page_offset(page: i64, limit: i64) -> Option<i64> {
    page.checked_sub(1)?.checked_mul(limit)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerStats {
    pub total_orders: i64,
    pub total_spent: Won,
    pub average_order_value: Won,
    pub last_order_at: Option<DateTime<Utc>>,
}

impl CustomerStats {
    pub fn from_orders(orders: &[OrderView]) -> Self {
        let total_orders = orders.len() as i64;
        let total_spent: Won = orders.iter().map(|o| o.pricing.total).sum();
        let average_order_value = if total_orders == 0 {
            0
        } else {
            (total_spent + total_orders / 2) / total_orders
        };
        Self {
            total_orders,
            total_spent,
            average_order_value,
            last_order_at: orders.iter().map(|o| o.placed_at).max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn details(date: NaiveDate) -> DeliveryDetails {
        DeliveryDetails {
            recipient: "Kim Minsu".into(),
            phone: "010-1234-5678".into(),
            address: "123 Teheran-ro".into(),
            address_detail: None,
            date,
            slot: DeliverySlot::Morning,
            notes: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn delivery_tomorrow_is_valid() {
        let today = date(2026, 10, 19);
        assert!(details(date(2026, 10, 20)).validate(today).is_ok());
    }

    #[test]
    fn delivery_today_is_rejected() {
        let today = date(2026, 10, 19);
        let err = details(today).validate(today).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn blank_required_fields_are_rejected() {
        let today = date(2026, 10, 19);
        let mut d = details(date(2026, 10, 21));
        d.phone = "   ".into();
        let err = d.validate(today).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: phone is required");
    }

    #[test]
    fn order_number_has_date_and_hex_suffix() {
        let id = Uuid::parse_str("a1b2c3d4-0000-4000-8000-000000000000").expect("uuid");
        assert_eq!(order_number(date(2026, 10, 19), id), "LB20261019A1B2C3");
    }

    #[test]
    fn parses_slot_and_payment_labels() {
        assert_eq!("evening".parse::<DeliverySlot>().ok(), Some(DeliverySlot::Evening));
        assert!("night".parse::<DeliverySlot>().is_err());
        assert_eq!("transfer".parse::<PaymentMethod>().ok(), Some(PaymentMethod::Transfer));
        assert!("cash".parse::<PaymentMethod>().is_err());
        assert_eq!(DeliverySlot::Afternoon.window(), "13:00-18:00");
    }

    fn view(total: Won, placed_at: DateTime<Utc>) -> OrderView {
        OrderView {
            id: Uuid::new_v4(),
            order_number: "LB".into(),
            customer_id: Uuid::nil(),
            status: STATUS_PENDING.into(),
            membership: MembershipTier::Basic,
            delivery: details(date(2026, 10, 20)),
            payment_method: PaymentMethod::Card,
            payment_reference: "ref".into(),
            pricing: PricingResult {
                subtotal: total,
                discount: 0,
                delivery_fee: 0,
                total,
            },
            placed_at,
            lines: vec![],
        }
    }

    #[test]
    fn stats_for_no_orders_are_zero() {
        assert_eq!(CustomerStats::from_orders(&[]), CustomerStats::default());
    }

    #[test]
    fn stats_sum_and_average_orders() {
        let early = Utc.with_ymd_and_hms(2026, 10, 1, 9, 0, 0).single().expect("time");
        let late = Utc.with_ymd_and_hms(2026, 10, 5, 9, 0, 0).single().expect("time");
        let stats = CustomerStats::from_orders(&[view(11500, late), view(10000, early)]);

        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_spent, 21500);
        assert_eq!(stats.average_order_value, 10750);
        assert_eq!(stats.last_order_at, Some(late));
    }

    #[test]
    fn page_offset_skips_whole_pages() {
        assert_eq!(page_offset(1, 20), Some(0));
        assert_eq!(page_offset(3, 20), Some(40));
    }

    #[test]
    fn page_offset_past_i64_is_none() {
        assert_eq!(page_offset(i64::MAX, 20), None);
        assert_eq!(page_offset(i64::MAX, 1), Some(i64::MAX - 1));
    }
}
