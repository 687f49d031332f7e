//! Process-local adapters for every repository port. Used when no database
//! is configured and by tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::{Cart, CartItem};
use crate::domain::contact::ContactMessage;
use crate::domain::errors::DomainError;
use crate::domain::order::{page_offset, ListResult, NewOrder, OrderView, STATUS_PENDING};
use crate::domain::ports::{
    CartRepository, ContactRepository, MealPlanRepository, MembershipRepository, OrderRepository,
    ReviewRepository, SubscriptionRepository,
};
use crate::domain::pricing::MembershipTier;
use crate::domain::review::{featured_reviews, Review, ReviewFilter};
use crate::domain::subscription::{PlanWeek, Subscription, WeeklyPlan};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, DomainError> {
    mutex
        .lock()
        .map_err(|e| DomainError::Internal(format!("store lock poisoned: {e}")))
}

#[derive(Debug, Default)]
pub struct InMemoryMembershipRepository {
    tiers: Mutex<HashMap<Uuid, MembershipTier>>,
}

impl MembershipRepository for InMemoryMembershipRepository {
    fn tier_for(&self, customer_id: Uuid) -> Result<MembershipTier, DomainError> {
        Ok(lock(&self.tiers)?
            .get(&customer_id)
            .copied()
            .unwrap_or(MembershipTier::Basic))
    }

    fn set_tier(&self, customer_id: Uuid, tier: MembershipTier) -> Result<(), DomainError> {
        lock(&self.tiers)?.insert(customer_id, tier);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCartRepository {
    carts: Mutex<HashMap<Uuid, Vec<CartItem>>>,
}

impl CartRepository for InMemoryCartRepository {
    fn load(&self, customer_id: Uuid) -> Result<Cart, DomainError> {
        let items = lock(&self.carts)?
            .get(&customer_id)
            .cloned()
            .unwrap_or_default();
        Cart::from_items(customer_id, items)
    }

    fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut carts = lock(&self.carts)?;
        if cart.is_empty() {
            carts.remove(&cart.customer_id);
        } else {
            carts.insert(cart.customer_id, cart.items().to_vec());
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<OrderView>>,
}

impl OrderRepository for InMemoryOrderRepository {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let view = OrderView {
            id: order.id,
            order_number: order.order_number,
            customer_id: order.customer_id,
            status: STATUS_PENDING.to_string(),
            membership: order.membership,
            delivery: order.delivery,
            payment_method: order.payment_method,
            payment_reference: order.payment_reference,
            pricing: order.pricing,
            placed_at: Utc::now(),
            lines: order.lines,
        };
        lock(&self.orders)?.push(view.clone());
        Ok(view)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(lock(&self.orders)?.iter().find(|o| o.id == id).cloned())
    }

    fn list_for_customer(
        &self,
        customer_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        let mut mine = self.all_for_customer(customer_id)?;
        let total = mine.len() as i64;
        let Some(offset) = page_offset(page, limit) else {
            return Ok(ListResult {
                items: Vec::new(),
                total,
            });
        };
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let items = mine
            .drain(..)
            .skip(offset)
            .take(limit.max(0) as usize)
            .map(|mut o| {
                o.lines.clear();
                o
            })
            .collect();
        Ok(ListResult { items, total })
    }

    fn all_for_customer(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        // Insertion order is placement order, so reversing gives newest first.
        Ok(lock(&self.orders)?
            .iter()
            .rev()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryMealPlanRepository {
    plans: Mutex<HashMap<(Uuid, PlanWeek), WeeklyPlan>>,
}

impl MealPlanRepository for InMemoryMealPlanRepository {
    fn load(&self, customer_id: Uuid, week: PlanWeek) -> Result<WeeklyPlan, DomainError> {
        Ok(lock(&self.plans)?
            .get(&(customer_id, week))
            .cloned()
            .unwrap_or_else(|| WeeklyPlan::new(customer_id, week)))
    }

    fn save(&self, plan: &WeeklyPlan) -> Result<(), DomainError> {
        lock(&self.plans)?.insert((plan.customer_id, plan.week), plan.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Mutex<Vec<Subscription>>,
}

impl SubscriptionRepository for InMemorySubscriptionRepository {
    fn create(&self, subscription: &Subscription) -> Result<(), DomainError> {
        lock(&self.subscriptions)?.push(subscription.clone());
        Ok(())
    }

    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Subscription>, DomainError> {
        Ok(lock(&self.subscriptions)?
            .iter()
            .rev()
            .filter(|s| s.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

/// Newest submissions are kept first.
#[derive(Debug, Default)]
pub struct InMemoryReviewRepository {
    reviews: Mutex<Vec<Review>>,
}

impl InMemoryReviewRepository {
    /// Start with the storefront's featured reviews.
    pub fn seeded() -> Self {
        Self {
            reviews: Mutex::new(featured_reviews()),
        }
    }
}

impl ReviewRepository for InMemoryReviewRepository {
    fn create(&self, review: &Review) -> Result<(), DomainError> {
        lock(&self.reviews)?.insert(0, review.clone());
        Ok(())
    }

    fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError> {
        let reviews = lock(&self.reviews)?.clone();
        Ok(filter.apply(reviews))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryContactRepository {
    messages: Mutex<Vec<ContactMessage>>,
}

impl InMemoryContactRepository {
    pub fn messages(&self) -> Result<Vec<ContactMessage>, DomainError> {
        Ok(lock(&self.messages)?.clone())
    }
}

impl ContactRepository for InMemoryContactRepository {
    fn create(&self, message: &ContactMessage) -> Result<(), DomainError> {
        lock(&self.messages)?.push(message.clone());
        Ok(())
    }
}
