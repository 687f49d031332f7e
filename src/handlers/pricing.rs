use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::pricing::{CartLine, MembershipTier, PricingResult, Won};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteLineRequest {
    pub item_id: String,
    /// Whole won.
    pub unit_price: Won,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteRequest {
    /// BASIC | SILVER | GOLD | PLATINUM. Defaults to BASIC.
    #[serde(default)]
    pub tier: Option<String>,
    pub lines: Vec<QuoteLineRequest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PricingResponse {
    pub subtotal: Won,
    pub discount: Won,
    pub delivery_fee: Won,
    pub total: Won,
}

impl From<PricingResult> for PricingResponse {
    fn from(p: PricingResult) -> Self {
        Self {
            subtotal: p.subtotal,
            discount: p.discount,
            delivery_fee: p.delivery_fee,
            total: p.total,
        }
    }
}

/// POST /pricing/quote
///
/// Prices arbitrary lines for a tier without touching any cart.
#[utoipa::path(
    post,
    path = "/pricing/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Price breakdown", body = PricingResponse),
        (status = 400, description = "Invalid line, duplicate item or unknown tier"),
    ),
    tag = "pricing"
)]
pub async fn quote(
    state: web::Data<AppState>,
    body: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let tier = match body.tier.as_deref() {
        Some(label) => label.parse::<MembershipTier>().map_err(DomainError::from)?,
        None => MembershipTier::Basic,
    };
    let lines: Vec<CartLine> = body
        .lines
        .into_iter()
        .map(|l| CartLine::new(l.item_id, l.unit_price, l.quantity))
        .collect();

    let result = state.carts.quote(&lines, tier)?;
    Ok(HttpResponse::Ok().json(PricingResponse::from(result)))
}
