use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::application::order_service::MAX_PAGE_SIZE;
use crate::domain::order::{CustomerStats, DeliveryDetails, DeliverySlot, OrderView, PaymentMethod};
use crate::domain::pricing::Won;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;
use super::pricing::PricingResponse;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub recipient: String,
    pub phone: String,
    pub address: String,
    pub address_detail: Option<String>,
    /// Must be tomorrow or later.
    pub delivery_date: NaiveDate,
    /// morning | afternoon | evening
    #[schema(value_type = String, example = "morning")]
    pub delivery_slot: DeliverySlot,
    /// card | transfer | phone
    #[schema(value_type = String, example = "card")]
    pub payment_method: PaymentMethod,
    pub notes: Option<String>,
}

impl PlaceOrderRequest {
    fn split(self) -> (DeliveryDetails, PaymentMethod) {
        (
            DeliveryDetails {
                recipient: self.recipient,
                phone: self.phone,
                address: self.address,
                address_detail: self.address_detail,
                date: self.delivery_date,
                slot: self.delivery_slot,
                notes: self.notes,
            },
            self.payment_method,
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderLineResponse {
    pub item_id: String,
    pub name: String,
    pub unit_price: Won,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub membership: String,
    pub recipient: String,
    pub phone: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub delivery_date: NaiveDate,
    pub delivery_slot: String,
    /// e.g. "09:00-12:00"
    pub delivery_window: String,
    pub notes: Option<String>,
    pub payment_method: String,
    pub payment_reference: String,
    pub pricing: PricingResponse,
    pub placed_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        let delivery = o.delivery;
        Self {
            id: o.id,
            order_number: o.order_number,
            customer_id: o.customer_id,
            status: o.status,
            membership: o.membership.to_string(),
            recipient: delivery.recipient,
            phone: delivery.phone,
            address: delivery.address,
            address_detail: delivery.address_detail,
            delivery_date: delivery.date,
            delivery_slot: delivery.slot.to_string(),
            delivery_window: delivery.slot.window().to_string(),
            notes: delivery.notes,
            payment_method: o.payment_method.to_string(),
            payment_reference: o.payment_reference,
            pricing: o.pricing.into(),
            placed_at: o.placed_at.to_rfc3339(),
            lines: o
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    item_id: l.item_id,
                    name: l.name,
                    unit_price: l.unit_price,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    pub total_orders: i64,
    pub total_spent: Won,
    pub average_order_value: Won,
    pub last_order_at: Option<String>,
}

impl From<CustomerStats> for StatsResponse {
    fn from(s: CustomerStats) -> Self {
        Self {
            total_orders: s.total_orders,
            total_spent: s.total_spent,
            average_order_value: s.average_order_value,
            last_order_at: s.last_order_at.map(|t| t.to_rfc3339()),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /customers/{customer_id}/orders
///
/// Checks out the customer's cart. The cart is emptied only once payment has
/// gone through and the order is stored.
#[utoipa::path(
    post,
    path = "/customers/{customer_id}/orders",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    request_body = PlaceOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Empty cart or invalid delivery details"),
        (status = 402, description = "Payment declined"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn place_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let (delivery, method) = body.into_inner().split();
    let today = Utc::now().date_naive();
    let state = state.into_inner();

    let order = blocking(move || {
        state
            .orders
            .place_order(customer_id, delivery, method, today)
    })
    .await?;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns the order together with its order lines.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let state = state.into_inner();

    match blocking(move || state.orders.get_order(order_id)).await? {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound(format!("Order {order_id} not found"))),
    }
}

/// GET /customers/{customer_id}/orders
///
/// Returns the customer's orders, newest first.
/// Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/orders",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ListOrdersParams,
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let params = query.into_inner();
    let page = params.page.max(1);
    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);
    let state = state.into_inner();

    let result = blocking(move || state.orders.list_orders(customer_id, page, limit)).await?;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result.items.into_iter().map(OrderResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /customers/{customer_id}/orders/stats
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/orders/stats",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Order history statistics", body = StatsResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn customer_stats(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let state = state.into_inner();
    let stats = blocking(move || state.orders.customer_stats(customer_id)).await?;
    Ok(HttpResponse::Ok().json(StatsResponse::from(stats)))
}
