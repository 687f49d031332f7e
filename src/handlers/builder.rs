use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::builder::{BentoBuild, BuildSummary, Selection, DEFAULT_GRAMS};
use crate::domain::pricing::Won;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SelectionRequest {
    pub ingredient_id: String,
    /// Clamped to 10..=500. Defaults to 100.
    pub grams: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuildRequest {
    pub selections: Vec<SelectionRequest>,
}

impl BuildRequest {
    pub fn into_build(self) -> BentoBuild {
        BentoBuild::from_selections(self.selections.into_iter().map(|s| Selection {
            ingredient_id: s.ingredient_id,
            grams: s.grams.unwrap_or(DEFAULT_GRAMS),
        }))
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SelectionResponse {
    pub ingredient_id: String,
    pub grams: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BuildQuoteResponse {
    /// Selections after clamping and de-duplication.
    pub selections: Vec<SelectionResponse>,
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub price: Won,
}

impl BuildQuoteResponse {
    pub fn new(build: &BentoBuild, summary: BuildSummary) -> Self {
        Self {
            selections: build
                .selections()
                .iter()
                .map(|s| SelectionResponse {
                    ingredient_id: s.ingredient_id.clone(),
                    grams: s.grams,
                })
                .collect(),
            calories: summary.calories,
            protein: summary.protein,
            carbs: summary.carbs,
            fat: summary.fat,
            price: summary.price,
        }
    }
}

/// POST /builder/quote
#[utoipa::path(
    post,
    path = "/builder/quote",
    request_body = BuildRequest,
    responses(
        (status = 200, description = "Nutrition and price of the build", body = BuildQuoteResponse),
        (status = 400, description = "Empty build"),
        (status = 404, description = "Unknown ingredient"),
    ),
    tag = "builder"
)]
pub async fn quote(
    state: web::Data<AppState>,
    body: web::Json<BuildRequest>,
) -> Result<HttpResponse, AppError> {
    let build = body.into_inner().into_build();
    let summary = build.quote(&state.catalog)?;
    Ok(HttpResponse::Ok().json(BuildQuoteResponse::new(&build, summary)))
}
