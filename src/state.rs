use std::sync::Arc;

use crate::application::cart_service::CartService;
use crate::application::contact_service::ContactService;
use crate::application::order_service::OrderService;
use crate::application::review_service::ReviewService;
use crate::application::subscription_service::SubscriptionService;
use crate::db::DbPool;
use crate::domain::catalog::Catalog;
use crate::domain::ports::{
    CartRepository, ContactRepository, MealPlanRepository, MembershipRepository, OrderRepository,
    PaymentGateway, ReviewRepository, SubscriptionRepository,
};
use crate::domain::pricing::PricingConfig;
use crate::infrastructure::cart_repo::DieselCartRepository;
use crate::infrastructure::contact_repo::DieselContactRepository;
use crate::infrastructure::meal_plan_repo::DieselMealPlanRepository;
use crate::infrastructure::membership_repo::DieselMembershipRepository;
use crate::infrastructure::memory::{
    InMemoryCartRepository, InMemoryContactRepository, InMemoryMealPlanRepository,
    InMemoryMembershipRepository, InMemoryOrderRepository, InMemoryReviewRepository,
    InMemorySubscriptionRepository,
};
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::payment::ApprovingGateway;
use crate::infrastructure::review_repo::DieselReviewRepository;
use crate::infrastructure::subscription_repo::DieselSubscriptionRepository;

/// One adapter per port.
#[derive(Clone)]
pub struct Repositories {
    pub memberships: Arc<dyn MembershipRepository>,
    pub carts: Arc<dyn CartRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub plans: Arc<dyn MealPlanRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub contact: Arc<dyn ContactRepository>,
    pub payments: Arc<dyn PaymentGateway>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            memberships: Arc::new(InMemoryMembershipRepository::default()),
            carts: Arc::new(InMemoryCartRepository::default()),
            orders: Arc::new(InMemoryOrderRepository::default()),
            plans: Arc::new(InMemoryMealPlanRepository::default()),
            subscriptions: Arc::new(InMemorySubscriptionRepository::default()),
            reviews: Arc::new(InMemoryReviewRepository::seeded()),
            contact: Arc::new(InMemoryContactRepository::default()),
            payments: Arc::new(ApprovingGateway),
        }
    }

    pub fn postgres(pool: DbPool) -> Self {
        Self {
            memberships: Arc::new(DieselMembershipRepository::new(pool.clone())),
            carts: Arc::new(DieselCartRepository::new(pool.clone())),
            orders: Arc::new(DieselOrderRepository::new(pool.clone())),
            plans: Arc::new(DieselMealPlanRepository::new(pool.clone())),
            subscriptions: Arc::new(DieselSubscriptionRepository::new(pool.clone())),
            reviews: Arc::new(DieselReviewRepository::new(pool.clone())),
            contact: Arc::new(DieselContactRepository::new(pool)),
            payments: Arc::new(ApprovingGateway),
        }
    }
}

/// Shared across actix workers behind `web::Data`.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub carts: CartService,
    pub orders: OrderService,
    pub subscriptions: SubscriptionService,
    pub reviews: ReviewService,
    pub contact: ContactService,
}

impl AppState {
    pub fn new(repos: Repositories, pricing: PricingConfig) -> Self {
        let catalog = Arc::new(Catalog::standard());
        Self {
            carts: CartService::new(
                repos.carts.clone(),
                repos.memberships.clone(),
                catalog.clone(),
                pricing.clone(),
            ),
            orders: OrderService::new(
                repos.orders,
                repos.carts,
                repos.memberships,
                repos.payments,
                pricing,
            ),
            subscriptions: SubscriptionService::new(repos.plans, repos.subscriptions, catalog.clone()),
            reviews: ReviewService::new(repos.reviews, catalog.clone()),
            contact: ContactService::new(repos.contact),
            catalog,
        }
    }
}
