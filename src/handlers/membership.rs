use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::pricing::MembershipTier;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipResponse {
    pub customer_id: Uuid,
    /// BASIC | SILVER | GOLD | PLATINUM
    pub tier: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SetMembershipRequest {
    pub tier: String,
}

/// GET /customers/{customer_id}/membership
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/membership",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Current tier; BASIC when never set", body = MembershipResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "membership"
)]
pub async fn get_membership(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let state = state.into_inner();
    let tier = blocking(move || state.carts.membership(customer_id)).await?;
    Ok(HttpResponse::Ok().json(MembershipResponse {
        customer_id,
        tier: tier.to_string(),
    }))
}

/// PUT /customers/{customer_id}/membership
#[utoipa::path(
    put,
    path = "/customers/{customer_id}/membership",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    request_body = SetMembershipRequest,
    responses(
        (status = 200, description = "Tier stored", body = MembershipResponse),
        (status = 400, description = "Unknown tier"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "membership"
)]
pub async fn set_membership(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<SetMembershipRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let tier = body
        .tier
        .parse::<MembershipTier>()
        .map_err(DomainError::from)?;
    let state = state.into_inner();
    let tier = blocking(move || state.carts.set_membership(customer_id, tier)).await?;
    Ok(HttpResponse::Ok().json(MembershipResponse {
        customer_id,
        tier: tier.to_string(),
    }))
}
