pub mod cart_repo;
pub mod contact_repo;
pub mod meal_plan_repo;
pub mod membership_repo;
pub mod memory;
pub mod models;
pub mod order_repo;
pub mod payment;
pub mod review_repo;
pub mod subscription_repo;

use crate::domain::errors::DomainError;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// A stored value that no longer parses into its domain type.
fn corrupt(column: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::Internal(format!("unreadable {column} value '{value}'"))
}

fn to_i32(column: &str, value: impl TryInto<i32> + Copy + std::fmt::Display) -> Result<i32, DomainError> {
    value.try_into().map_err(|_| corrupt(column, value))
}
