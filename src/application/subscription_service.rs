use std::sync::Arc;

use chrono::{DateTime, Utc, Weekday};
use uuid::Uuid;

use crate::domain::catalog::Catalog;
use crate::domain::errors::DomainError;
use crate::domain::order::DeliverySlot;
use crate::domain::ports::{MealPlanRepository, SubscriptionRepository};
use crate::domain::subscription::{
    DeliveryCycle, PlanWeek, PlannedMeal, Subscription, SubscriptionAnalytics, WeeklyPlan,
};

pub struct SubscriptionService {
    plans: Arc<dyn MealPlanRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    catalog: Arc<Catalog>,
}

impl SubscriptionService {
    pub fn new(
        plans: Arc<dyn MealPlanRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            plans,
            subscriptions,
            catalog,
        }
    }

    pub fn plan(&self, customer_id: Uuid, week: PlanWeek) -> Result<WeeklyPlan, DomainError> {
        self.plans.load(customer_id, week)
    }

    pub fn assign_meal(
        &self,
        customer_id: Uuid,
        week: PlanWeek,
        day: Weekday,
        menu_item_id: u32,
    ) -> Result<WeeklyPlan, DomainError> {
        let item = self
            .catalog
            .menu_item(menu_item_id)
            .ok_or_else(|| DomainError::NotFound(format!("Menu item {menu_item_id}")))?;
        let mut plan = self.plans.load(customer_id, week)?;
        plan.assign(day, PlannedMeal::from(item));
        self.plans.save(&plan)?;
        Ok(plan)
    }

    pub fn clear_day(
        &self,
        customer_id: Uuid,
        week: PlanWeek,
        day: Weekday,
    ) -> Result<WeeklyPlan, DomainError> {
        let mut plan = self.plans.load(customer_id, week)?;
        if plan.clear_day(day).is_some() {
            self.plans.save(&plan)?;
        }
        Ok(plan)
    }

    pub fn start(
        &self,
        customer_id: Uuid,
        week: PlanWeek,
        cycle: DeliveryCycle,
        slot: DeliverySlot,
        now: DateTime<Utc>,
    ) -> Result<Subscription, DomainError> {
        let plan = self.plans.load(customer_id, week)?;
        let subscription = Subscription::start(&plan, cycle, slot, now)?;
        self.subscriptions.create(&subscription)?;
        log::info!(
            "Customer {customer_id} subscribed {} from {week}: {} meals, {} won per week",
            cycle.as_str(),
            subscription.meals.len(),
            subscription.weekly_cost
        );
        Ok(subscription)
    }

    pub fn list(&self, customer_id: Uuid) -> Result<Vec<Subscription>, DomainError> {
        self.subscriptions.list_for_customer(customer_id)
    }

    /// Subscription counts with the totals of the given week's plan.
    pub fn analytics(
        &self,
        customer_id: Uuid,
        week: PlanWeek,
    ) -> Result<SubscriptionAnalytics, DomainError> {
        let subscriptions = self.subscriptions.list_for_customer(customer_id)?;
        let plan = self.plans.load(customer_id, week)?;
        Ok(SubscriptionAnalytics::new(&subscriptions, &plan))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::STATUS_ACTIVE;
    use crate::infrastructure::memory::{
        InMemoryMealPlanRepository, InMemorySubscriptionRepository,
    };

    fn service() -> SubscriptionService {
        SubscriptionService::new(
            Arc::new(InMemoryMealPlanRepository::default()),
            Arc::new(InMemorySubscriptionRepository::default()),
            Arc::new(Catalog::standard()),
        )
    }

    fn week() -> PlanWeek {
        PlanWeek::new(2026, 44).expect("week")
    }

    #[test]
    fn assigning_meals_updates_stored_plan() {
        let svc = service();
        let customer = Uuid::new_v4();
        svc.assign_meal(customer, week(), Weekday::Mon, 1).expect("assign");
        svc.assign_meal(customer, week(), Weekday::Thu, 2).expect("assign");

        let plan = svc.plan(customer, week()).expect("plan");
        assert_eq!(plan.summary().meal_count, 2);
        assert_eq!(plan.summary().weekly_cost, 16000);
        assert_eq!(plan.meal_on(Weekday::Thu).map(|m| m.menu_item_id), Some(2));
    }

    #[test]
    fn unknown_menu_item_is_not_found() {
        let err = service()
            .assign_meal(Uuid::new_v4(), week(), Weekday::Mon, 99)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn plans_are_scoped_to_week() {
        let svc = service();
        let customer = Uuid::new_v4();
        svc.assign_meal(customer, week(), Weekday::Mon, 1).expect("assign");
        let next = PlanWeek::new(2026, 45).expect("week");
        assert_eq!(svc.plan(customer, next).expect("plan").summary().meal_count, 0);
    }

    #[test]
    fn clear_day_removes_meal() {
        let svc = service();
        let customer = Uuid::new_v4();
        svc.assign_meal(customer, week(), Weekday::Sat, 6).expect("assign");
        let plan = svc.clear_day(customer, week(), Weekday::Sat).expect("clear");
        assert!(plan.meal_on(Weekday::Sat).is_none());
        assert_eq!(svc.plan(customer, week()).expect("plan").summary().meal_count, 0);
    }

    #[test]
    fn start_requires_planned_meals() {
        let err = service()
            .start(
                Uuid::new_v4(),
                week(),
                DeliveryCycle::Weekly,
                DeliverySlot::Morning,
                Utc::now(),
            )
            .unwrap_err();
        assert!(matches!(err, DomainError::EmptyPlan));
    }

    #[test]
    fn started_subscriptions_are_listed_newest_first() {
        let svc = service();
        let customer = Uuid::new_v4();
        svc.assign_meal(customer, week(), Weekday::Wed, 3).expect("assign");
        let first = svc
            .start(customer, week(), DeliveryCycle::Weekly, DeliverySlot::Afternoon, Utc::now())
            .expect("start");
        let second = svc
            .start(customer, week(), DeliveryCycle::Monthly, DeliverySlot::Evening, Utc::now())
            .expect("start");

        let listed = svc.list(customer).expect("list");
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(first.weekly_cost, 9000);
        assert_eq!(first.status, STATUS_ACTIVE);
    }

    #[test]
    fn analytics_combine_subscriptions_with_week_plan() {
        let svc = service();
        let customer = Uuid::new_v4();
        svc.assign_meal(customer, week(), Weekday::Mon, 1).expect("assign");
        svc.start(customer, week(), DeliveryCycle::Weekly, DeliverySlot::Morning, Utc::now())
            .expect("start");
        svc.assign_meal(customer, week(), Weekday::Tue, 2).expect("assign");

        let analytics = svc.analytics(customer, week()).expect("analytics");
        assert_eq!(analytics.total_subscriptions, 1);
        assert_eq!(analytics.active_subscriptions, 1);
        assert_eq!(analytics.weekly_meals, 2);
        assert_eq!(analytics.weekly_calories, 770);
        assert_eq!(analytics.weekly_cost, 16000);
        assert_eq!(analytics.average_meal_price, 8000);

        let other = PlanWeek::new(2026, 45).expect("week");
        let empty = svc.analytics(customer, other).expect("analytics");
        assert_eq!(empty.weekly_meals, 0);
        assert_eq!(empty.average_meal_price, 0);
    }
}
