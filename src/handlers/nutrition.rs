use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::nutrition::{self, ActivityLevel, BodyProfile, Goal, NutritionPlan, Sex};
use crate::errors::AppError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NutritionRequest {
    #[schema(value_type = String, example = "female")]
    pub sex: Sex,
    pub age: u32,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub target_weight_kg: u32,
    /// sedentary | light | moderate | active | very_active
    #[schema(value_type = String, example = "moderate")]
    pub activity: ActivityLevel,
    /// weight_loss | maintenance | muscle_gain. Defaults to weight_loss.
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "maintenance")]
    pub goal: Option<Goal>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NutritionResponse {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
    pub water_ml: i64,
    #[schema(value_type = String)]
    pub goal: Goal,
}

impl From<NutritionPlan> for NutritionResponse {
    fn from(p: NutritionPlan) -> Self {
        Self {
            bmr: p.bmr,
            tdee: p.tdee,
            target_calories: p.target_calories,
            protein_g: p.macros.protein_g,
            carbs_g: p.macros.carbs_g,
            fat_g: p.macros.fat_g,
            water_ml: p.water_ml,
            goal: p.goal,
        }
    }
}

/// POST /nutrition/plan
#[utoipa::path(
    post,
    path = "/nutrition/plan",
    request_body = NutritionRequest,
    responses(
        (status = 200, description = "Daily targets", body = NutritionResponse),
        (status = 400, description = "Body measurements out of range"),
    ),
    tag = "nutrition"
)]
pub async fn plan(body: web::Json<NutritionRequest>) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let profile = BodyProfile {
        sex: body.sex,
        age: body.age,
        height_cm: body.height_cm,
        weight_kg: body.weight_kg,
        target_weight_kg: body.target_weight_kg,
        activity: body.activity,
    };
    let plan = nutrition::plan(&profile, body.goal.unwrap_or_default())?;
    Ok(HttpResponse::Ok().json(NutritionResponse::from(plan)))
}
