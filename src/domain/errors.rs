use thiserror::Error;

use super::pricing::PricingError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Meal plan has no meals for this week")]
    EmptyPlan,
    #[error("Bento build has no ingredients")]
    EmptyBuild,
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),
    #[error(transparent)]
    Pricing(#[from] PricingError),
    #[error("Internal error: {0}")]
    Internal(String),
}
