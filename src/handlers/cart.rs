use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::cart_service::CartSummary;
use crate::domain::pricing::Won;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;
use super::builder::{BuildQuoteResponse, BuildRequest};
use super::pricing::PricingResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub menu_item_id: u32,
    /// Defaults to 1.
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateQuantityRequest {
    /// Zero or less removes the line.
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub item_id: String,
    pub name: String,
    pub unit_price: Won,
    pub quantity: i32,
    pub line_total: Won,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub customer_id: Uuid,
    pub membership: String,
    pub items: Vec<CartItemResponse>,
    pub item_count: i64,
    pub pricing: PricingResponse,
}

impl From<CartSummary> for CartResponse {
    fn from(s: CartSummary) -> Self {
        Self {
            customer_id: s.cart.customer_id,
            membership: s.membership.to_string(),
            items: s
                .cart
                .items()
                .iter()
                .map(|i| CartItemResponse {
                    item_id: i.item_id.clone(),
                    name: i.name.clone(),
                    unit_price: i.unit_price,
                    quantity: i.quantity,
                    line_total: i.line_total(),
                })
                .collect(),
            item_count: s.item_count,
            pricing: s.pricing.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomBentoResponse {
    pub item_id: String,
    pub build: BuildQuoteResponse,
    pub cart: CartResponse,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /customers/{customer_id}/cart
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/cart",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Cart with pricing", body = CartResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let state = state.into_inner();
    let summary = blocking(move || state.carts.summary(customer_id)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(summary)))
}

/// POST /customers/{customer_id}/cart/items
///
/// Adds a menu bento; adding one already in the cart raises its quantity.
#[utoipa::path(
    post,
    path = "/customers/{customer_id}/cart/items",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Invalid quantity"),
        (status = 404, description = "Unknown menu item"),
    ),
    tag = "cart"
)]
pub async fn add_item(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<AddItemRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let body = body.into_inner();
    let state = state.into_inner();
    let summary = blocking(move || {
        state
            .carts
            .add_menu_item(customer_id, body.menu_item_id, body.quantity)
    })
    .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(summary)))
}

/// POST /customers/{customer_id}/cart/custom
#[utoipa::path(
    post,
    path = "/customers/{customer_id}/cart/custom",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    request_body = BuildRequest,
    responses(
        (status = 201, description = "Custom bento added", body = CustomBentoResponse),
        (status = 400, description = "Empty build"),
        (status = 404, description = "Unknown ingredient"),
    ),
    tag = "cart"
)]
pub async fn add_custom(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<BuildRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let build = body.into_inner().into_build();
    let state = state.into_inner();
    let response = blocking(move || {
        let (bento, summary) = state.carts.add_custom_bento(customer_id, &build)?;
        Ok(CustomBentoResponse {
            item_id: bento.item_id,
            build: BuildQuoteResponse::new(&build, bento.summary),
            cart: summary.into(),
        })
    })
    .await?;
    Ok(HttpResponse::Created().json(response))
}

/// PUT /customers/{customer_id}/cart/items/{item_id}
#[utoipa::path(
    put,
    path = "/customers/{customer_id}/cart/items/{item_id}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("item_id" = String, Path, description = "Cart line id"),
    ),
    request_body = UpdateQuantityRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "cart"
)]
pub async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
    body: web::Json<UpdateQuantityRequest>,
) -> Result<HttpResponse, AppError> {
    let (customer_id, item_id) = path.into_inner();
    let quantity = body.quantity;
    let state = state.into_inner();
    let summary =
        blocking(move || state.carts.set_quantity(customer_id, &item_id, quantity)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(summary)))
}

/// DELETE /customers/{customer_id}/cart/items/{item_id}
#[utoipa::path(
    delete,
    path = "/customers/{customer_id}/cart/items/{item_id}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("item_id" = String, Path, description = "Cart line id"),
    ),
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 404, description = "Item not in cart"),
    ),
    tag = "cart"
)]
pub async fn remove_item(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> Result<HttpResponse, AppError> {
    let (customer_id, item_id) = path.into_inner();
    let state = state.into_inner();
    let summary = blocking(move || state.carts.remove_item(customer_id, &item_id)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(summary)))
}

/// DELETE /customers/{customer_id}/cart
#[utoipa::path(
    delete,
    path = "/customers/{customer_id}/cart",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    responses((status = 200, description = "Emptied cart", body = CartResponse)),
    tag = "cart"
)]
pub async fn clear_cart(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let state = state.into_inner();
    let summary = blocking(move || state.carts.clear(customer_id)).await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(summary)))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    use super::*;
    use crate::handlers::test_app;

    #[actix_web::test]
    async fn add_update_and_remove_lines() {
        let app = test::init_service(test_app()).await;
        let base = format!("/customers/{}/cart", Uuid::new_v4());

        let req = test::TestRequest::post()
            .uri(&format!("{base}/items"))
            .set_json(json!({ "menu_item_id": 1, "quantity": 2 }))
            .to_request();
        let cart: CartResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.items[0].line_total, 17000);
        assert_eq!(cart.pricing.total, 20000);

        let req = test::TestRequest::put()
            .uri(&format!("{base}/items/1"))
            .set_json(json!({ "quantity": 4 }))
            .to_request();
        let cart: CartResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cart.pricing.subtotal, 34000);
        assert_eq!(cart.pricing.delivery_fee, 0);

        let req = test::TestRequest::delete()
            .uri(&format!("{base}/items/1"))
            .to_request();
        let cart: CartResponse = test::call_and_read_body_json(&app, req).await;
        assert!(cart.items.is_empty());

        let req = test::TestRequest::delete()
            .uri(&format!("{base}/items/1"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn custom_bento_is_added_once_per_request() {
        let app = test::init_service(test_app()).await;
        let base = format!("/customers/{}/cart", Uuid::new_v4());

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri(&format!("{base}/custom"))
                .set_json(json!({ "selections": [{ "ingredient_id": "tofu", "grams": 200 }] }))
                .to_request();
            let resp: CustomBentoResponse = test::call_and_read_body_json(&app, req).await;
            assert!(resp.item_id.starts_with("custom-"));
            assert_eq!(resp.build.price, 2000);
        }

        let req = test::TestRequest::get().uri(&base).to_request();
        let cart: CartResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.pricing.subtotal, 4000);

        let req = test::TestRequest::delete().uri(&base).to_request();
        let cart: CartResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(cart.item_count, 0);
    }

    #[actix_web::test]
    async fn invalid_quantity_is_400() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::post()
            .uri(&format!("/customers/{}/cart/items", Uuid::new_v4()))
            .set_json(json!({ "menu_item_id": 1, "quantity": 0 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
