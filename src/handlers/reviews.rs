use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::review::{NewReview, Review, ReviewFilter, ReviewSort};
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewQuery {
    /// Exact star rating, 1..=5.
    pub rating: Option<u8>,
    pub min_rating: Option<u8>,
    pub menu_item_id: Option<u32>,
    pub verified_only: Option<bool>,
    /// newest | oldest | highest_rating | most_helpful
    pub sort: Option<String>,
}

impl ReviewQuery {
    pub fn into_filter(self) -> Result<ReviewFilter, DomainError> {
        Ok(ReviewFilter {
            rating: self.rating,
            min_rating: self.min_rating,
            menu_item_id: self.menu_item_id,
            verified_only: self.verified_only.unwrap_or(false),
            sort: self
                .sort
                .as_deref()
                .map(str::parse::<ReviewSort>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitReviewRequest {
    pub name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub text: String,
    pub menu_item_id: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub text: String,
    pub menu_item_id: Option<u32>,
    pub verified: bool,
    pub helpful: i32,
    pub date: NaiveDate,
}

impl From<Review> for ReviewResponse {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            name: r.name,
            rating: r.rating,
            title: r.title,
            text: r.text,
            menu_item_id: r.menu_item_id,
            verified: r.verified,
            helpful: r.helpful,
            date: r.date,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /reviews
#[utoipa::path(
    get,
    path = "/reviews",
    params(ReviewQuery),
    responses(
        (status = 200, description = "Matching reviews", body = [ReviewResponse]),
        (status = 400, description = "Unknown sort"),
    ),
    tag = "reviews"
)]
pub async fn list_reviews(
    state: web::Data<AppState>,
    query: web::Query<ReviewQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let state = state.into_inner();
    let reviews = blocking(move || state.reviews.list(&filter)).await?;
    let body: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /reviews
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = SubmitReviewRequest,
    responses(
        (status = 201, description = "Review stored, unverified", body = ReviewResponse),
        (status = 400, description = "Missing rating, name or text"),
        (status = 404, description = "Unknown menu item"),
    ),
    tag = "reviews"
)]
pub async fn submit_review(
    state: web::Data<AppState>,
    body: web::Json<SubmitReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let submission = NewReview {
        name: body.name,
        rating: body.rating,
        title: body.title,
        text: body.text,
        menu_item_id: body.menu_item_id,
    };
    let state = state.into_inner();
    let review =
        blocking(move || state.reviews.submit(submission, Utc::now().date_naive())).await?;
    Ok(HttpResponse::Created().json(ReviewResponse::from(review)))
}
