use actix_web::{web, HttpResponse};
use chrono::{Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::order::DeliverySlot;
use crate::domain::pricing::Won;
use crate::domain::subscription::{
    parse_weekday, DeliveryCycle, PlanWeek, PlannedMeal, Subscription, SubscriptionAnalytics,
    WeeklyPlan, WEEK,
};
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

fn day_label(day: Weekday) -> String {
    day.to_string().to_lowercase()
}

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssignMealRequest {
    pub menu_item_id: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlannedMealResponse {
    pub menu_item_id: u32,
    pub name: String,
    pub price: Won,
    pub calories: i32,
    pub protein: i32,
}

impl From<&PlannedMeal> for PlannedMealResponse {
    fn from(m: &PlannedMeal) -> Self {
        Self {
            menu_item_id: m.menu_item_id,
            name: m.name.clone(),
            price: m.price,
            calories: m.calories,
            protein: m.protein,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanDayResponse {
    /// mon .. sun
    pub day: String,
    pub date: NaiveDate,
    pub meal: Option<PlannedMealResponse>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub customer_id: Uuid,
    pub year: i32,
    pub week: u32,
    /// Always seven entries, Monday first.
    pub days: Vec<PlanDayResponse>,
    pub meal_count: usize,
    pub weekly_cost: Won,
}

impl From<WeeklyPlan> for PlanResponse {
    fn from(plan: WeeklyPlan) -> Self {
        let start = plan.week.start_date();
        let summary = plan.summary();
        let days = WEEK
            .into_iter()
            .zip(0u64..)
            .map(|(day, offset)| PlanDayResponse {
                day: day_label(day),
                date: start.checked_add_days(Days::new(offset)).unwrap_or(start),
                meal: plan.meal_on(day).map(PlannedMealResponse::from),
            })
            .collect();
        Self {
            customer_id: plan.customer_id,
            year: plan.week.year(),
            week: plan.week.week(),
            days,
            meal_count: summary.meal_count,
            weekly_cost: summary.weekly_cost,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartSubscriptionRequest {
    pub year: i32,
    pub week: u32,
    /// weekly | biweekly | monthly
    #[schema(value_type = String, example = "weekly")]
    pub cycle: DeliveryCycle,
    /// morning | afternoon | evening
    #[schema(value_type = String, example = "morning")]
    pub slot: DeliverySlot,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduledMealResponse {
    pub day: String,
    pub meal: PlannedMealResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cycle: String,
    pub slot: String,
    pub start_date: NaiveDate,
    pub meals: Vec<ScheduledMealResponse>,
    pub weekly_cost: Won,
    pub status: String,
    pub created_at: String,
}

impl From<Subscription> for SubscriptionResponse {
    fn from(s: Subscription) -> Self {
        Self {
            id: s.id,
            customer_id: s.customer_id,
            cycle: s.cycle.as_str().to_string(),
            slot: s.slot.to_string(),
            start_date: s.start_date,
            meals: s
                .meals
                .iter()
                .map(|m| ScheduledMealResponse {
                    day: day_label(m.day),
                    meal: PlannedMealResponse::from(&m.meal),
                })
                .collect(),
            weekly_cost: s.weekly_cost,
            status: s.status,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// Week to total up. Both fields default to the current ISO week.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub year: Option<i32>,
    pub week: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    pub year: i32,
    pub week: u32,
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub weekly_meals: usize,
    pub weekly_calories: i64,
    pub weekly_cost: Won,
    pub average_meal_price: Won,
}

impl AnalyticsResponse {
    fn new(week: PlanWeek, a: SubscriptionAnalytics) -> Self {
        Self {
            year: week.year(),
            week: week.week(),
            total_subscriptions: a.total_subscriptions,
            active_subscriptions: a.active_subscriptions,
            weekly_meals: a.weekly_meals,
            weekly_calories: a.weekly_calories,
            weekly_cost: a.weekly_cost,
            average_meal_price: a.average_meal_price,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /customers/{customer_id}/plans/{year}/{week}
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/plans/{year}/{week}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("year" = i32, Path, description = "ISO week-numbering year"),
        ("week" = u32, Path, description = "ISO week, 1..=53"),
    ),
    responses(
        (status = 200, description = "The week's plan", body = PlanResponse),
        (status = 400, description = "No such ISO week"),
    ),
    tag = "plans"
)]
pub async fn get_plan(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, i32, u32)>,
) -> Result<HttpResponse, AppError> {
    let (customer_id, year, week) = path.into_inner();
    let week = PlanWeek::new(year, week)?;
    let state = state.into_inner();
    let plan = blocking(move || state.subscriptions.plan(customer_id, week)).await?;
    Ok(HttpResponse::Ok().json(PlanResponse::from(plan)))
}

/// PUT /customers/{customer_id}/plans/{year}/{week}/days/{day}
///
/// Replaces whatever was planned on that day.
#[utoipa::path(
    put,
    path = "/customers/{customer_id}/plans/{year}/{week}/days/{day}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("year" = i32, Path, description = "ISO week-numbering year"),
        ("week" = u32, Path, description = "ISO week, 1..=53"),
        ("day" = String, Path, description = "Weekday, e.g. mon"),
    ),
    request_body = AssignMealRequest,
    responses(
        (status = 200, description = "Updated plan", body = PlanResponse),
        (status = 400, description = "Bad week or weekday"),
        (status = 404, description = "Unknown menu item"),
    ),
    tag = "plans"
)]
pub async fn assign_day(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, i32, u32, String)>,
    body: web::Json<AssignMealRequest>,
) -> Result<HttpResponse, AppError> {
    let (customer_id, year, week, day) = path.into_inner();
    let week = PlanWeek::new(year, week)?;
    let day = parse_weekday(&day)?;
    let menu_item_id = body.menu_item_id;
    let state = state.into_inner();
    let plan = blocking(move || {
        state
            .subscriptions
            .assign_meal(customer_id, week, day, menu_item_id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(PlanResponse::from(plan)))
}

/// DELETE /customers/{customer_id}/plans/{year}/{week}/days/{day}
#[utoipa::path(
    delete,
    path = "/customers/{customer_id}/plans/{year}/{week}/days/{day}",
    params(
        ("customer_id" = Uuid, Path, description = "Customer UUID"),
        ("year" = i32, Path, description = "ISO week-numbering year"),
        ("week" = u32, Path, description = "ISO week, 1..=53"),
        ("day" = String, Path, description = "Weekday, e.g. mon"),
    ),
    responses(
        (status = 200, description = "Updated plan", body = PlanResponse),
        (status = 400, description = "Bad week or weekday"),
    ),
    tag = "plans"
)]
pub async fn clear_day(
    state: web::Data<AppState>,
    path: web::Path<(Uuid, i32, u32, String)>,
) -> Result<HttpResponse, AppError> {
    let (customer_id, year, week, day) = path.into_inner();
    let week = PlanWeek::new(year, week)?;
    let day = parse_weekday(&day)?;
    let state = state.into_inner();
    let plan = blocking(move || state.subscriptions.clear_day(customer_id, week, day)).await?;
    Ok(HttpResponse::Ok().json(PlanResponse::from(plan)))
}

/// POST /customers/{customer_id}/subscriptions
///
/// Turns a week's plan into a recurring delivery.
#[utoipa::path(
    post,
    path = "/customers/{customer_id}/subscriptions",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    request_body = StartSubscriptionRequest,
    responses(
        (status = 201, description = "Subscription started", body = SubscriptionResponse),
        (status = 400, description = "Empty plan or bad week"),
    ),
    tag = "subscriptions"
)]
pub async fn start_subscription(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<StartSubscriptionRequest>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let body = body.into_inner();
    let week = PlanWeek::new(body.year, body.week)?;
    let state = state.into_inner();
    let subscription = blocking(move || {
        state
            .subscriptions
            .start(customer_id, week, body.cycle, body.slot, Utc::now())
    })
    .await?;
    Ok(HttpResponse::Created().json(SubscriptionResponse::from(subscription)))
}

/// GET /customers/{customer_id}/subscriptions
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/subscriptions",
    params(("customer_id" = Uuid, Path, description = "Customer UUID")),
    responses(
        (status = 200, description = "Customer's subscriptions", body = Vec<SubscriptionResponse>),
    ),
    tag = "subscriptions"
)]
pub async fn list_subscriptions(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let state = state.into_inner();
    let subscriptions = blocking(move || state.subscriptions.list(customer_id)).await?;
    let body: Vec<SubscriptionResponse> = subscriptions
        .into_iter()
        .map(SubscriptionResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /customers/{customer_id}/subscriptions/analytics
#[utoipa::path(
    get,
    path = "/customers/{customer_id}/subscriptions/analytics",
    params(("customer_id" = Uuid, Path, description = "Customer UUID"), AnalyticsQuery),
    responses(
        (status = 200, description = "Subscription counts and week totals", body = AnalyticsResponse),
        (status = 400, description = "No such ISO week"),
    ),
    tag = "subscriptions"
)]
pub async fn subscription_analytics(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let current = PlanWeek::containing(Utc::now().date_naive());
    let week = PlanWeek::new(
        query.year.unwrap_or(current.year()),
        query.week.unwrap_or(current.week()),
    )?;
    let state = state.into_inner();
    let analytics = blocking(move || state.subscriptions.analytics(customer_id, week)).await?;
    Ok(HttpResponse::Ok().json(AnalyticsResponse::new(week, analytics)))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    use super::*;
    use crate::handlers::test_app;

    #[actix_web::test]
    async fn plan_week_then_subscribe() {
        let app = test::init_service(test_app()).await;
        let customer = Uuid::new_v4();
        let plan_uri = format!("/customers/{customer}/plans/2026/44");

        let req = test::TestRequest::get().uri(&plan_uri).to_request();
        let plan: PlanResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[0].day, "mon");
        assert_eq!(plan.days[0].date, NaiveDate::from_ymd_opt(2026, 10, 26).expect("date"));
        assert_eq!(plan.meal_count, 0);

        for (day, item) in [("mon", 1), ("wed", 2), ("fri", 6)] {
            let req = test::TestRequest::put()
                .uri(&format!("{plan_uri}/days/{day}"))
                .set_json(json!({ "menu_item_id": item }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::delete()
            .uri(&format!("{plan_uri}/days/fri"))
            .to_request();
        let plan: PlanResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(plan.meal_count, 2);
        assert_eq!(plan.weekly_cost, 16000);
        assert!(plan.days[4].meal.is_none());

        let req = test::TestRequest::post()
            .uri(&format!("/customers/{customer}/subscriptions"))
            .set_json(json!({ "year": 2026, "week": 44, "cycle": "biweekly", "slot": "morning" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let sub: SubscriptionResponse = test::read_body_json(resp).await;
        assert_eq!(sub.status, "ACTIVE");
        assert_eq!(sub.meals.len(), 2);
        assert_eq!(sub.meals[1].day, "wed");

        let req = test::TestRequest::get()
            .uri(&format!("/customers/{customer}/subscriptions"))
            .to_request();
        let subs: Vec<SubscriptionResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].id, sub.id);
    }

    #[actix_web::test]
    async fn rejects_bad_week_day_and_empty_plan() {
        let app = test::init_service(test_app()).await;
        let customer = Uuid::new_v4();

        let req = test::TestRequest::get()
            .uri(&format!("/customers/{customer}/plans/2026/54"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::put()
            .uri(&format!("/customers/{customer}/plans/2026/44/days/someday"))
            .set_json(json!({ "menu_item_id": 1 }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri(&format!("/customers/{customer}/subscriptions"))
            .set_json(json!({ "year": 2026, "week": 44, "cycle": "weekly", "slot": "evening" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn analytics_total_the_requested_week() {
        let app = test::init_service(test_app()).await;
        let customer = Uuid::new_v4();

        for (day, item) in [("tue", 1), ("thu", 5)] {
            let req = test::TestRequest::put()
                .uri(&format!("/customers/{customer}/plans/2026/44/days/{day}"))
                .set_json(json!({ "menu_item_id": item }))
                .to_request();
            assert!(test::call_service(&app, req).await.status().is_success());
        }

        let req = test::TestRequest::get()
            .uri(&format!(
                "/customers/{customer}/subscriptions/analytics?year=2026&week=44"
            ))
            .to_request();
        let body: AnalyticsResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.week, 44);
        assert_eq!(body.total_subscriptions, 0);
        assert_eq!(body.weekly_meals, 2);
        assert_eq!(body.weekly_calories, 930);
        assert_eq!(body.average_meal_price, 10250);

        let req = test::TestRequest::get()
            .uri(&format!("/customers/{customer}/subscriptions/analytics?year=2026&week=60"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    }
}
