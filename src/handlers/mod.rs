pub mod builder;
pub mod cart;
pub mod contact;
pub mod membership;
pub mod menu;
pub mod nutrition;
pub mod orders;
pub mod plans;
pub mod pricing;
pub mod reviews;

use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::domain::errors::DomainError;
use crate::errors::AppError;

/// Run repository-backed work on actix's blocking thread pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Bento service", description = "Menu, cart, checkout, meal-plan and review API"),
    paths(
        menu::list_menu,
        menu::suggest_menu,
        menu::get_menu_item,
        menu::list_ingredients,
        builder::quote,
        pricing::quote,
        nutrition::plan,
        membership::get_membership,
        membership::set_membership,
        cart::get_cart,
        cart::add_item,
        cart::add_custom,
        cart::update_item,
        cart::remove_item,
        cart::clear_cart,
        orders::place_order,
        orders::list_orders,
        orders::customer_stats,
        orders::get_order,
        plans::get_plan,
        plans::assign_day,
        plans::clear_day,
        plans::start_subscription,
        plans::list_subscriptions,
        plans::subscription_analytics,
        reviews::list_reviews,
        reviews::submit_review,
        contact::submit_contact,
    ),
    tags(
        (name = "menu", description = "Fixed menu and ingredient catalog"),
        (name = "builder", description = "Custom bento builder"),
        (name = "pricing", description = "Price quotes"),
        (name = "nutrition", description = "Daily nutrition targets"),
        (name = "membership", description = "Membership tiers"),
        (name = "cart", description = "Shopping cart"),
        (name = "orders", description = "Checkout and order history"),
        (name = "plans", description = "Weekly meal plans"),
        (name = "subscriptions", description = "Recurring deliveries"),
        (name = "reviews", description = "Customer reviews"),
        (name = "contact", description = "Contact form"),
    )
)]
pub struct ApiDoc;

/// GET /api-docs/openapi.json
pub async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Register every route. Shared by the server and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/menu", web::get().to(menu::list_menu))
        .route("/menu/suggestions", web::get().to(menu::suggest_menu))
        .route("/menu/{id}", web::get().to(menu::get_menu_item))
        .route("/ingredients", web::get().to(menu::list_ingredients))
        .route("/builder/quote", web::post().to(builder::quote))
        .route("/pricing/quote", web::post().to(pricing::quote))
        .route("/nutrition/plan", web::post().to(nutrition::plan))
        .route("/orders/{id}", web::get().to(orders::get_order))
        .service(
            web::resource("/reviews")
                .route(web::get().to(reviews::list_reviews))
                .route(web::post().to(reviews::submit_review)),
        )
        .route("/contact", web::post().to(contact::submit_contact))
        .route("/api-docs/openapi.json", web::get().to(openapi_json))
        .service(
            web::scope("/customers/{customer_id}")
                .service(
                    web::resource("/membership")
                        .route(web::get().to(membership::get_membership))
                        .route(web::put().to(membership::set_membership)),
                )
                .service(
                    web::resource("/cart")
                        .route(web::get().to(cart::get_cart))
                        .route(web::delete().to(cart::clear_cart)),
                )
                .route("/cart/items", web::post().to(cart::add_item))
                .route("/cart/custom", web::post().to(cart::add_custom))
                .service(
                    web::resource("/cart/items/{item_id}")
                        .route(web::put().to(cart::update_item))
                        .route(web::delete().to(cart::remove_item)),
                )
                .service(
                    web::resource("/orders")
                        .route(web::post().to(orders::place_order))
                        .route(web::get().to(orders::list_orders)),
                )
                .route("/orders/stats", web::get().to(orders::customer_stats))
                .route("/plans/{year}/{week}", web::get().to(plans::get_plan))
                .service(
                    web::resource("/plans/{year}/{week}/days/{day}")
                        .route(web::put().to(plans::assign_day))
                        .route(web::delete().to(plans::clear_day)),
                )
                .service(
                    web::resource("/subscriptions")
                        .route(web::post().to(plans::start_subscription))
                        .route(web::get().to(plans::list_subscriptions)),
                )
                .route(
                    "/subscriptions/analytics",
                    web::get().to(plans::subscription_analytics),
                ),
        );
}

#[cfg(test)]
pub(crate) fn test_app() -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    use crate::domain::pricing::PricingConfig;
    use crate::state::{AppState, Repositories};

    actix_web::App::new()
        .app_data(web::Data::new(AppState::new(
            Repositories::in_memory(),
            PricingConfig::default(),
        )))
        .configure(configure)
}
