use uuid::Uuid;

use super::cart::Cart;
use super::contact::ContactMessage;
use super::errors::DomainError;
use super::order::{ListResult, NewOrder, OrderView, PaymentMethod};
use super::pricing::{MembershipTier, Won};
use super::review::{Review, ReviewFilter};
use super::subscription::{PlanWeek, Subscription, WeeklyPlan};

pub trait MembershipRepository: Send + Sync + 'static {
    /// Customers without a stored tier are BASIC.
    fn tier_for(&self, customer_id: Uuid) -> Result<MembershipTier, DomainError>;
    fn set_tier(&self, customer_id: Uuid, tier: MembershipTier) -> Result<(), DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    /// Load a customer's cart; a customer without lines has an empty cart.
    fn load(&self, customer_id: Uuid) -> Result<Cart, DomainError>;
    /// Replace the stored cart with `cart`.
    fn save(&self, cart: &Cart) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Record a placed order. Adapters that keep carts in the same store
    /// also drop the customer's cart lines in that write.
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    /// Newest first, without lines.
    fn list_for_customer(
        &self,
        customer_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError>;
    fn all_for_customer(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError>;
}

pub trait MealPlanRepository: Send + Sync + 'static {
    fn load(&self, customer_id: Uuid, week: PlanWeek) -> Result<WeeklyPlan, DomainError>;
    fn save(&self, plan: &WeeklyPlan) -> Result<(), DomainError>;
}

pub trait SubscriptionRepository: Send + Sync + 'static {
    fn create(&self, subscription: &Subscription) -> Result<(), DomainError>;
    /// Newest first.
    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Subscription>, DomainError>;
}

pub trait ReviewRepository: Send + Sync + 'static {
    fn create(&self, review: &Review) -> Result<(), DomainError>;
    /// Reviews matching `filter`, in the filter's sort order.
    fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError>;
}

pub trait ContactRepository: Send + Sync + 'static {
    fn create(&self, message: &ContactMessage) -> Result<(), DomainError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub order_id: Uuid,
    pub customer_id: Uuid,
    pub amount: Won,
    pub method: PaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub reference: String,
}

pub trait PaymentGateway: Send + Sync + 'static {
    /// Charge the customer. A refusal is `DomainError::PaymentDeclined`.
    fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt, DomainError>;
}
