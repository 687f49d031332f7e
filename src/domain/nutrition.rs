//! Daily energy and macronutrient targets.
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE scales it by an activity
//! factor and the goal scales TDEE to the daily calorie target.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn factor(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    #[default]
    WeightLoss,
    Maintenance,
    MuscleGain,
}

impl Goal {
    pub fn factor(self) -> f64 {
        match self {
            Self::WeightLoss => 0.8,
            Self::Maintenance => 1.0,
            Self::MuscleGain => 1.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyProfile {
    pub sex: Sex,
    pub age: u32,
    pub height_cm: u32,
    pub weight_kg: u32,
    pub target_weight_kg: u32,
    pub activity: ActivityLevel,
}

const AGE_RANGE: (u32, u32) = (10, 100);
const HEIGHT_RANGE: (u32, u32) = (100, 250);
const WEIGHT_RANGE: (u32, u32) = (30, 300);

fn check(field: &str, value: u32, (min, max): (u32, u32)) -> Result<(), DomainError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::InvalidInput(format!(
            "{field} {value} is outside {min}..={max}"
        )))
    }
}

impl BodyProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        check("age", self.age, AGE_RANGE)?;
        check("height_cm", self.height_cm, HEIGHT_RANGE)?;
        check("weight_kg", self.weight_kg, WEIGHT_RANGE)?;
        check("target_weight_kg", self.target_weight_kg, WEIGHT_RANGE)
    }

    pub fn bmr(&self) -> i64 {
        let base = 10.0 * f64::from(self.weight_kg) + 6.25 * f64::from(self.height_cm)
            - 5.0 * f64::from(self.age);
        let offset = match self.sex {
            Sex::Male => 5.0,
            Sex::Female => -161.0,
        };
        (base + offset).round() as i64
    }

    /// Daily water intake in ml: 35 ml/kg plus extra for active lifestyles.
    pub fn water_ml(&self) -> i64 {
        let factor = self.activity.factor();
        let mut water = i64::from(self.weight_kg) * 35;
        if factor >= 1.55 {
            water += 500;
        }
        if factor >= 1.725 {
            water += 500;
        }
        water
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: i64,
    pub carbs_g: i64,
    pub fat_g: i64,
}

impl Macros {
    /// Protein at 1.6 g per kg of target weight, fat at 25% of calories,
    /// carbs fill the rest.
    pub fn for_calories(calories: i64, target_weight_kg: u32) -> Self {
        let protein_g = (f64::from(target_weight_kg) * 1.6).round() as i64;
        let fat_kcal = (calories as f64 * 0.25).round() as i64;
        let fat_g = (fat_kcal as f64 / 9.0).round() as i64;
        let remaining = calories - protein_g * 4 - fat_kcal;
        let carbs_g = ((remaining as f64 / 4.0).round() as i64).max(0);
        Self {
            protein_g,
            carbs_g,
            fat_g,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub bmr: i64,
    pub tdee: i64,
    pub target_calories: i64,
    pub macros: Macros,
    pub water_ml: i64,
    pub goal: Goal,
}

pub fn plan(profile: &BodyProfile, goal: Goal) -> Result<NutritionPlan, DomainError> {
    profile.validate()?;

    let bmr = profile.bmr();
    let tdee = bmr as f64 * profile.activity.factor();
    let target_calories = (tdee * goal.factor()).round() as i64;

    Ok(NutritionPlan {
        bmr,
        tdee: tdee.round() as i64,
        target_calories,
        macros: Macros::for_calories(target_calories, profile.target_weight_kg),
        water_ml: profile.water_ml(),
        goal,
    })
}
