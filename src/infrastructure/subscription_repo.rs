use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::DeliverySlot;
use crate::domain::ports::SubscriptionRepository;
use crate::domain::subscription::{DeliveryCycle, ScheduledMeal, Subscription};
use crate::schema::subscriptions;

use super::corrupt;
use super::models::SubscriptionRow;

pub struct DieselSubscriptionRepository {
    pool: DbPool,
}

impl DieselSubscriptionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let cycle = row
            .cycle
            .parse::<DeliveryCycle>()
            .map_err(|_| corrupt("cycle", &row.cycle))?;
        let slot = row
            .slot
            .parse::<DeliverySlot>()
            .map_err(|_| corrupt("slot", &row.slot))?;
        let meals: Vec<ScheduledMeal> = serde_json::from_value(row.meals)
            .map_err(|e| DomainError::Internal(format!("unreadable meals: {e}")))?;
        Ok(Subscription {
            id: row.id,
            customer_id: row.customer_id,
            cycle,
            slot,
            start_date: row.start_date,
            meals,
            weekly_cost: row.weekly_cost,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

impl SubscriptionRepository for DieselSubscriptionRepository {
    fn create(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let meals = serde_json::to_value(&subscription.meals)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        diesel::insert_into(subscriptions::table)
            .values(&SubscriptionRow {
                id: subscription.id,
                customer_id: subscription.customer_id,
                cycle: subscription.cycle.as_str().to_string(),
                slot: subscription.slot.as_str().to_string(),
                start_date: subscription.start_date,
                meals,
                weekly_cost: subscription.weekly_cost,
                status: subscription.status.clone(),
                created_at: subscription.created_at,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Subscription>, DomainError> {
        let mut conn = self.pool.get()?;

        subscriptions::table
            .filter(subscriptions::customer_id.eq(customer_id))
            .order((subscriptions::created_at.desc(), subscriptions::id.desc()))
            .select(SubscriptionRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(Subscription::try_from)
            .collect()
    }
}
