use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::Catalog;
use super::errors::DomainError;
use super::pricing::Won;

pub const MIN_GRAMS: i32 = 10;
pub const MAX_GRAMS: i32 = 500;
pub const DEFAULT_GRAMS: i32 = 100;
pub const CUSTOM_BENTO_NAME: &str = "Custom Bento";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub ingredient_id: String,
    pub grams: i32,
}

/// A custom bento under construction: one selection per ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BentoBuild {
    selections: Vec<Selection>,
}

impl BentoBuild {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw selections, clamping grams and keeping the last
    /// amount given for a repeated ingredient.
    pub fn from_selections(selections: impl IntoIterator<Item = Selection>) -> Self {
        let mut build = Self::new();
        for s in selections {
            build.add(&s.ingredient_id);
            build.set_grams(&s.ingredient_id, s.grams);
        }
        build
    }

    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Add an ingredient at the default weight. Adding it twice is a no-op.
    pub fn add(&mut self, ingredient_id: &str) {
        if self.find(ingredient_id).is_none() {
            self.selections.push(Selection {
                ingredient_id: ingredient_id.to_string(),
                grams: DEFAULT_GRAMS,
            });
        }
    }

    pub fn set_grams(&mut self, ingredient_id: &str, grams: i32) -> bool {
        match self
            .selections
            .iter_mut()
            .find(|s| s.ingredient_id == ingredient_id)
        {
            Some(s) => {
                s.grams = grams.clamp(MIN_GRAMS, MAX_GRAMS);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, ingredient_id: &str) -> bool {
        let before = self.selections.len();
        self.selections.retain(|s| s.ingredient_id != ingredient_id);
        before != self.selections.len()
    }

    fn find(&self, ingredient_id: &str) -> Option<&Selection> {
        self.selections
            .iter()
            .find(|s| s.ingredient_id == ingredient_id)
    }

    pub fn quote(&self, catalog: &Catalog) -> Result<BuildSummary, DomainError> {
        if self.is_empty() {
            return Err(DomainError::EmptyBuild);
        }

        let (mut calories, mut protein, mut carbs, mut fat) = (0.0, 0.0, 0.0, 0.0);
        // Sum of price_per_100g * grams, i.e. hundredths of a won.
        let mut price_centi: i64 = 0;
        for s in &self.selections {
            let ingredient = catalog
                .ingredient(&s.ingredient_id)
                .ok_or_else(|| DomainError::NotFound(format!("Ingredient '{}'", s.ingredient_id)))?;
            let ratio = f64::from(s.grams) / 100.0;
            calories += ingredient.nutrition.calories * ratio;
            protein += ingredient.nutrition.protein * ratio;
            carbs += ingredient.nutrition.carbs * ratio;
            fat += ingredient.nutrition.fat * ratio;
            price_centi += ingredient.price_per_100g * i64::from(s.grams);
        }

        Ok(BuildSummary {
            calories: calories.round() as i64,
            protein: one_decimal(protein),
            carbs: one_decimal(carbs),
            fat: one_decimal(fat),
            price: (price_centi + 50) / 100,
        })
    }

    /// Quote the build and describe it as a single cart item.
    pub fn to_cart_item(&self, catalog: &Catalog) -> Result<CustomBento, DomainError> {
        let summary = self.quote(catalog)?;
        let simple = Uuid::new_v4().simple().to_string();
        Ok(CustomBento {
            item_id: format!("custom-{}", &simple[..8]),
            name: CUSTOM_BENTO_NAME.to_string(),
            summary,
        })
    }
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub price: Won,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomBento {
    pub item_id: String,
    pub name: String,
    pub summary: BuildSummary,
}
