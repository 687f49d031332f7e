use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::catalog::{Ingredient, MenuCategory, MenuFilter, MenuItem, MenuSort, Range};
use crate::domain::errors::DomainError;
use crate::domain::pricing::Won;
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Menu filters. Every filter is optional; range filters accept either end.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    /// protein | vegetarian | low-carb | balanced
    pub category: Option<String>,
    pub vegetarian: Option<bool>,
    pub vegan: Option<bool>,
    pub gluten_free: Option<bool>,
    pub min_calories: Option<i32>,
    pub max_calories: Option<i32>,
    pub min_protein: Option<i32>,
    pub max_protein: Option<i32>,
    pub min_price: Option<Won>,
    pub max_price: Option<Won>,
    pub max_carbs: Option<i32>,
    pub max_fat: Option<i32>,
    /// Case-insensitive match on name, description and tags.
    pub search: Option<String>,
    /// popularity | price_low | price_high | calories_low | calories_high | protein_high
    pub sort: Option<String>,
}

fn range<T: Copy>(min: Option<T>, max: Option<T>, lowest: T, highest: T) -> Option<Range<T>> {
    if min.is_none() && max.is_none() {
        return None;
    }
    Some(Range {
        min: min.unwrap_or(lowest),
        max: max.unwrap_or(highest),
    })
}

impl MenuQuery {
    pub fn into_filter(self) -> Result<MenuFilter, DomainError> {
        Ok(MenuFilter {
            category: self.category.as_deref().map(str::parse::<MenuCategory>).transpose()?,
            vegetarian: self.vegetarian.unwrap_or(false),
            vegan: self.vegan.unwrap_or(false),
            gluten_free: self.gluten_free.unwrap_or(false),
            calories: range(self.min_calories, self.max_calories, i32::MIN, i32::MAX),
            protein: range(self.min_protein, self.max_protein, i32::MIN, i32::MAX),
            price: range(self.min_price, self.max_price, Won::MIN, Won::MAX),
            max_carbs: self.max_carbs,
            max_fat: self.max_fat,
            search: self.search,
            sort: self.sort.as_deref().map(str::parse::<MenuSort>).transpose()?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuNutritionResponse {
    pub calories: i32,
    pub protein: i32,
    pub carbs: i32,
    pub fat: i32,
    pub fiber: i32,
    /// mg
    pub sodium: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MenuItemResponse {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub category: String,
    pub nutrition: MenuNutritionResponse,
    pub price: Won,
    pub tags: Vec<String>,
    pub popularity: u32,
    pub vegetarian: bool,
    pub vegan: bool,
    pub gluten_free: bool,
}

impl From<&MenuItem> for MenuItemResponse {
    fn from(item: &MenuItem) -> Self {
        let n = item.nutrition;
        Self {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category.to_string(),
            nutrition: MenuNutritionResponse {
                calories: n.calories,
                protein: n.protein,
                carbs: n.carbs,
                fat: n.fat,
                fiber: n.fiber,
                sodium: n.sodium,
            },
            price: item.price,
            tags: item.tags.clone(),
            popularity: item.popularity,
            vegetarian: item.vegetarian,
            vegan: item.vegan,
            gluten_free: item.gluten_free,
        }
    }
}

/// Builder ingredient; nutrition is per 100 g.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    pub id: String,
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub price_per_100g: Won,
}

impl From<&Ingredient> for IngredientResponse {
    fn from(i: &Ingredient) -> Self {
        Self {
            id: i.id.clone(),
            name: i.name.clone(),
            category: i.category.as_str().to_string(),
            calories: i.nutrition.calories,
            protein: i.nutrition.protein,
            carbs: i.nutrition.carbs,
            fat: i.nutrition.fat,
            price_per_100g: i.price_per_100g,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /menu
#[utoipa::path(
    get,
    path = "/menu",
    params(MenuQuery),
    responses(
        (status = 200, description = "Matching menu bentos", body = [MenuItemResponse]),
        (status = 400, description = "Unknown category or sort"),
    ),
    tag = "menu"
)]
pub async fn list_menu(
    state: web::Data<AppState>,
    query: web::Query<MenuQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let items: Vec<MenuItemResponse> = state
        .catalog
        .search(&filter)
        .into_iter()
        .map(MenuItemResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(items))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SuggestQuery {
    /// Partial bento name.
    #[serde(default)]
    pub q: String,
}

/// GET /menu/suggestions
#[utoipa::path(
    get,
    path = "/menu/suggestions",
    params(SuggestQuery),
    responses((status = 200, description = "Up to eight matching bento names", body = [String])),
    tag = "menu"
)]
pub async fn suggest_menu(
    state: web::Data<AppState>,
    query: web::Query<SuggestQuery>,
) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.suggest(&query.q))
}

/// GET /menu/{id}
#[utoipa::path(
    get,
    path = "/menu/{id}",
    params(("id" = u32, Path, description = "Menu item id")),
    responses(
        (status = 200, description = "Menu bento", body = MenuItemResponse),
        (status = 404, description = "Unknown menu item"),
    ),
    tag = "menu"
)]
pub async fn get_menu_item(
    state: web::Data<AppState>,
    path: web::Path<u32>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let item = state
        .catalog
        .menu_item(id)
        .ok_or_else(|| DomainError::NotFound(format!("Menu item {id}")))?;
    Ok(HttpResponse::Ok().json(MenuItemResponse::from(item)))
}

/// GET /ingredients
#[utoipa::path(
    get,
    path = "/ingredients",
    responses((status = 200, description = "Builder ingredients", body = [IngredientResponse])),
    tag = "menu"
)]
pub async fn list_ingredients(state: web::Data<AppState>) -> HttpResponse {
    let items: Vec<IngredientResponse> = state
        .catalog
        .ingredients()
        .iter()
        .map(IngredientResponse::from)
        .collect();
    HttpResponse::Ok().json(items)
}


#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test};

    use super::*;
    use crate::handlers::test_app;

    #[actix_web::test]
    async fn filters_and_sorts_menu() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::get()
            .uri("/menu?vegetarian=true&sort=price_low")
            .to_request();
        let items: Vec<MenuItemResponse> = test::call_and_read_body_json(&app, req).await;

        let ids: Vec<u32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![6, 2]);
        assert_eq!(items[0].category, "vegetarian");
    }

    #[actix_web::test]
    async fn bad_category_is_400() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::get().uri("/menu?category=dessert").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn menu_item_lookup() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get().uri("/menu/5").to_request();
        let item: MenuItemResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(item.price, 12000);

        let req = test::TestRequest::get().uri("/menu/77").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn suggests_names_before_id_lookup() {
        let app = test::init_service(test_app()).await;

        let req = test::TestRequest::get()
            .uri("/menu/suggestions?q=bento")
            .to_request();
        let names: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(names.len(), 4);
        assert_eq!(names[0], "Protein Power Bento");

        let req = test::TestRequest::get().uri("/menu/suggestions").to_request();
        let names: Vec<String> = test::call_and_read_body_json(&app, req).await;
        assert!(names.is_empty());
    }

    #[actix_web::test]
    async fn lists_ingredients_with_categories() {
        let app = test::init_service(test_app()).await;
        let req = test::TestRequest::get().uri("/ingredients").to_request();
        let items: Vec<IngredientResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(items.len(), 22);
        assert_eq!(items[0].id, "brown-rice");
        assert_eq!(items[0].category, "base");
    }
}
