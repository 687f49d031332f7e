use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{PaymentGateway, PaymentReceipt, PaymentRequest};

/// Gateway stand-in that approves every non-negative charge.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApprovingGateway;

impl PaymentGateway for ApprovingGateway {
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, DomainError> {
        if request.amount < 0 {
            return Err(DomainError::PaymentDeclined(format!(
                "amount {} is negative",
                request.amount
            )));
        }
        let reference = format!("PAY-{}", Uuid::new_v4().simple());
        log::info!(
            "Approved {} won by {} for order {} ({})",
            request.amount,
            request.method,
            request.order_id,
            reference
        );
        Ok(PaymentReceipt { reference })
    }
}
