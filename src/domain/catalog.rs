//! Menu bentos and builder ingredients.
//!
//! The catalog is static reference data: it is seeded in code and never
//! written to by the service.

use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;
use super::pricing::Won;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MenuCategory {
    Protein,
    Vegetarian,
    LowCarb,
    Balanced,
}

impl MenuCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Vegetarian => "vegetarian",
            Self::LowCarb => "low-carb",
            Self::Balanced => "balanced",
        }
    }
}

impl FromStr for MenuCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "protein" => Ok(Self::Protein),
            "vegetarian" => Ok(Self::Vegetarian),
            "low-carb" => Ok(Self::LowCarb),
            "balanced" => Ok(Self::Balanced),
            other => Err(DomainError::InvalidInput(format!(
                "unknown menu category '{other}'"
            ))),
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNutrition {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
    pub sodium: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: MenuCategory,
    pub nutrition: MenuNutrition,
    pub price: Won,
    pub tags: Vec<String>,
    pub popularity: u32,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Base,
    Protein,
    Vegetable,
    Carb,
    Sauce,
}

impl IngredientCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Protein => "protein",
            Self::Vegetable => "vegetable",
            Self::Carb => "carb",
            Self::Sauce => "sauce",
        }
    }
}

/// Nutrition per 100 g of an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IngredientNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub category: IngredientCategory,
    pub nutrition: IngredientNutrition,
    pub price_per_100g: Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuSort {
    Popularity,
    PriceLow,
    PriceHigh,
    CaloriesLow,
    CaloriesHigh,
    ProteinHigh,
}

impl FromStr for MenuSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(Self::Popularity),
            "price_low" => Ok(Self::PriceLow),
            "price_high" => Ok(Self::PriceHigh),
            "calories_low" => Ok(Self::CaloriesLow),
            "calories_high" => Ok(Self::CaloriesHigh),
            "protein_high" => Ok(Self::ProteinHigh),
            other => Err(DomainError::InvalidInput(format!("unknown sort '{other}'"))),
        }
    }
}

/// Inclusive range bound used by the menu filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd + Copy> Range<T> {
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuFilter {
    pub category: Option<MenuCategory>,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
    pub calories: Option<Range<i32>>,
    pub protein: Option<Range<i32>>,
    pub price: Option<Range<Won>>,
    pub max_carbs: Option<i32>,
    pub max_fat: Option<i32>,
    pub search: Option<String>,
    pub sort: Option<MenuSort>,
}

impl MenuFilter {
    fn matches(&self, item: &MenuItem, term: Option<&str>) -> bool {
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if (self.vegetarian && !item.vegetarian)
            || (self.vegan && !item.vegan)
            || (self.gluten_free && !item.gluten_free)
        {
            return false;
        }
        let n = &item.nutrition;
        if self.calories.is_some_and(|r| !r.contains(n.calories))
            || self.protein.is_some_and(|r| !r.contains(n.protein))
            || self.price.is_some_and(|r| !r.contains(item.price))
            || self.max_carbs.is_some_and(|max| n.carbs > max)
            || self.max_fat.is_some_and(|max| n.fat > max)
        {
            return false;
        }
        match term {
            Some(term) => {
                item.name.to_lowercase().contains(term)
                    || item.description.to_lowercase().contains(term)
                    || item.tags.iter().any(|t| t.to_lowercase().contains(term))
            }
            None => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    menu: Vec<MenuItem>,
    ingredients: Vec<Ingredient>,
}

impl Catalog {
    pub fn new(menu: Vec<MenuItem>, ingredients: Vec<Ingredient>) -> Self {
        Self { menu, ingredients }
    }

    /// The storefront's standard menu and builder ingredients.
    pub fn standard() -> Self {
        Self::new(standard_menu(), standard_ingredients())
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.menu
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn menu_item(&self, id: u32) -> Option<&MenuItem> {
        self.menu.iter().find(|m| m.id == id)
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn search(&self, filter: &MenuFilter) -> Vec<&MenuItem> {
        let term = filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut items: Vec<&MenuItem> = self
            .menu
            .iter()
            .filter(|item| filter.matches(item, term.as_deref()))
            .collect();

        match filter.sort {
            Some(MenuSort::Popularity) => items.sort_by_key(|i| Reverse(i.popularity)),
            Some(MenuSort::PriceLow) => items.sort_by_key(|i| i.price),
            Some(MenuSort::PriceHigh) => items.sort_by_key(|i| Reverse(i.price)),
            Some(MenuSort::CaloriesLow) => items.sort_by_key(|i| i.nutrition.calories),
            Some(MenuSort::CaloriesHigh) => items.sort_by_key(|i| Reverse(i.nutrition.calories)),
            Some(MenuSort::ProteinHigh) => items.sort_by_key(|i| Reverse(i.nutrition.protein)),
            None => {}
        }
        items
    }

    /// Menu names containing `term`, ignoring case, in menu order.
    pub fn suggest(&self, term: &str) -> Vec<&str> {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return Vec::new();
        }
        self.menu
            .iter()
            .map(|m| m.name.as_str())
            .filter(|name| name.to_lowercase().contains(&term))
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}

pub const MAX_SUGGESTIONS: usize = 8;

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[allow(clippy::too_many_arguments)]
fn bento(
    id: u32,
    name: &str,
    description: &str,
    category: MenuCategory,
    nutrition: [i32; 6],
    price: Won,
    tags: &[&str],
    popularity: u32,
    diet: (bool, bool, bool),
) -> MenuItem {
    let [calories, protein, carbs, fat, fiber, sodium] = nutrition;
    MenuItem {
        id,
        name: name.to_string(),
        description: description.to_string(),
        category,
        nutrition: MenuNutrition {
            calories,
            protein,
            carbs,
            fat,
            fiber,
            sodium,
        },
        price,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        popularity,
        vegetarian: diet.0,
        vegan: diet.1,
        gluten_free: diet.2,
    }
}

fn standard_menu() -> Vec<MenuItem> {
    use MenuCategory::*;
    vec![
        bento(
            1,
            "Protein Power Bento",
            "Chicken breast, broccoli and brown rice",
            Protein,
            [450, 35, 40, 12, 8, 680],
            8500,
            &["high-protein", "low-fat", "diet"],
            95,
            (false, false, false),
        ),
        bento(
            2,
            "Vegetarian Bento",
            "Fresh vegetables and quinoa",
            Vegetarian,
            [320, 15, 45, 8, 12, 420],
            7500,
            &["vegetarian", "vegan", "gluten-free"],
            78,
            (true, true, true),
        ),
        bento(
            3,
            "Low-Carb Bento",
            "Fewer carbs, more protein and greens",
            LowCarb,
            [380, 40, 15, 18, 6, 750],
            9000,
            &["low-carb", "keto", "high-protein"],
            82,
            (false, false, true),
        ),
        bento(
            4,
            "Balanced Bento",
            "Every macronutrient in balance",
            Balanced,
            [420, 25, 35, 15, 9, 620],
            8000,
            &["balanced", "standard"],
            88,
            (false, false, true),
        ),
        bento(
            5,
            "Salmon Avocado Bowl",
            "Omega-3 rich salmon with avocado",
            Protein,
            [480, 28, 25, 28, 10, 590],
            12000,
            &["premium", "omega-3", "healthy"],
            91,
            (false, false, true),
        ),
        bento(
            6,
            "Vegan Protein Bowl",
            "Tofu and vegetables",
            Vegetarian,
            [290, 18, 35, 10, 14, 480],
            7000,
            &["vegan", "low-calorie", "high-fiber"],
            73,
            (true, true, true),
        ),
    ]
}

fn ingredient(
    id: &str,
    name: &str,
    category: IngredientCategory,
    nutrition: [f64; 4],
    price_per_100g: Won,
) -> Ingredient {
    let [calories, protein, carbs, fat] = nutrition;
    Ingredient {
        id: id.to_string(),
        name: name.to_string(),
        category,
        nutrition: IngredientNutrition {
            calories,
            protein,
            carbs,
            fat,
        },
        price_per_100g,
    }
}

fn standard_ingredients() -> Vec<Ingredient> {
    use IngredientCategory::*;
    vec![
        ingredient("brown-rice", "Brown rice", Base, [112.0, 2.6, 23.0, 0.9], 800),
        ingredient("white-rice", "White rice", Base, [130.0, 2.7, 28.0, 0.3], 700),
        ingredient("quinoa", "Quinoa", Base, [120.0, 4.4, 22.0, 1.9], 2000),
        ingredient("sweet-potato", "Sweet potato", Base, [86.0, 1.6, 20.0, 0.1], 1200),
        ingredient("chicken-breast", "Chicken breast", Protein, [165.0, 31.0, 0.0, 3.6], 2500),
        ingredient("salmon", "Salmon", Protein, [208.0, 20.0, 0.0, 13.0], 4000),
        ingredient("tofu", "Tofu", Protein, [76.0, 8.0, 1.9, 4.8], 1000),
        ingredient("eggs", "Eggs", Protein, [155.0, 13.0, 1.1, 11.0], 1500),
        ingredient("beef", "Beef", Protein, [250.0, 26.0, 0.0, 15.0], 5000),
        ingredient("broccoli", "Broccoli", Vegetable, [34.0, 2.8, 7.0, 0.4], 800),
        ingredient("spinach", "Spinach", Vegetable, [23.0, 2.9, 3.6, 0.4], 600),
        ingredient("carrot", "Carrot", Vegetable, [41.0, 0.9, 10.0, 0.2], 500),
        ingredient("bell-pepper", "Bell pepper", Vegetable, [31.0, 1.0, 7.0, 0.3], 1200),
        ingredient("cucumber", "Cucumber", Vegetable, [16.0, 0.7, 4.0, 0.1], 400),
        ingredient("tomato", "Tomato", Vegetable, [18.0, 0.9, 3.9, 0.2], 700),
        ingredient("pasta", "Whole wheat pasta", Carb, [124.0, 5.0, 25.0, 1.1], 1000),
        ingredient("bread", "Whole grain bread", Carb, [247.0, 13.0, 41.0, 4.2], 1500),
        ingredient("potato", "Potato", Carb, [77.0, 2.0, 17.0, 0.1], 600),
        ingredient("olive-oil", "Olive oil", Sauce, [884.0, 0.0, 0.0, 100.0], 3000),
        ingredient("balsamic", "Balsamic vinegar", Sauce, [88.0, 0.5, 17.0, 0.0], 2500),
        ingredient("sesame-oil", "Sesame oil", Sauce, [884.0, 0.0, 0.0, 100.0], 4000),
        ingredient("soy-sauce", "Soy sauce", Sauce, [8.0, 1.3, 0.8, 0.0], 800),
    ]
}
