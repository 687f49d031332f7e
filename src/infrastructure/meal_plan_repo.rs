use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::MealPlanRepository;
use crate::domain::subscription::{PlanWeek, PlannedMeal, WeeklyPlan, WEEK};
use crate::schema::meal_plan_days;

use super::models::MealPlanDayRow;
use super::{corrupt, to_i32};

pub struct DieselMealPlanRepository {
    pool: DbPool,
}

impl DieselMealPlanRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MealPlanRepository for DieselMealPlanRepository {
    fn load(&self, customer_id: Uuid, week: PlanWeek) -> Result<WeeklyPlan, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = meal_plan_days::table
            .filter(meal_plan_days::customer_id.eq(customer_id))
            .filter(meal_plan_days::iso_year.eq(week.year()))
            .filter(meal_plan_days::iso_week.eq(to_i32("iso_week", week.week())?))
            .select(MealPlanDayRow::as_select())
            .load(&mut conn)?;

        let mut plan = WeeklyPlan::new(customer_id, week);
        for row in rows {
            let day = usize::try_from(row.day)
                .ok()
                .and_then(|i| WEEK.get(i).copied())
                .ok_or_else(|| corrupt("day", row.day))?;
            let menu_item_id =
                u32::try_from(row.menu_item_id).map_err(|_| corrupt("menu_item_id", row.menu_item_id))?;
            plan.assign(
                day,
                PlannedMeal {
                    menu_item_id,
                    name: row.name,
                    price: row.price,
                    calories: row.calories,
                    protein: row.protein,
                },
            );
        }
        Ok(plan)
    }

    fn save(&self, plan: &WeeklyPlan) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let iso_year = plan.week.year();
        let iso_week = to_i32("iso_week", plan.week.week())?;
        let rows = plan
            .meals()
            .map(|(day, meal)| {
                Ok(MealPlanDayRow {
                    customer_id: plan.customer_id,
                    iso_year,
                    iso_week,
                    day: to_i32("day", day.num_days_from_monday())?,
                    menu_item_id: to_i32("menu_item_id", meal.menu_item_id)?,
                    name: meal.name.clone(),
                    price: meal.price,
                    calories: meal.calories,
                    protein: meal.protein,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(
                meal_plan_days::table
                    .filter(meal_plan_days::customer_id.eq(plan.customer_id))
                    .filter(meal_plan_days::iso_year.eq(iso_year))
                    .filter(meal_plan_days::iso_week.eq(iso_week)),
            )
            .execute(conn)?;
            if !rows.is_empty() {
                diesel::insert_into(meal_plan_days::table)
                    .values(&rows)
                    .execute(conn)?;
            }
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use uuid::Uuid;

    use super::DieselMealPlanRepository;
    use crate::domain::catalog::Catalog;
    use crate::domain::ports::MealPlanRepository;
    use crate::domain::subscription::{PlanWeek, PlannedMeal};
    use crate::infrastructure::test_db;

    #[tokio::test]
    #[ignore = "starts a Postgres container"]
    async fn plan_roundtrips_per_week() {
        let (_container, pool) = test_db::setup().await;
        let repo = DieselMealPlanRepository::new(pool);
        let catalog = Catalog::standard();
        let customer = Uuid::new_v4();
        let week = PlanWeek::new(2026, 44).expect("week");

        let mut plan = repo.load(customer, week).expect("load");
        assert_eq!(plan.summary().meal_count, 0);

        plan.assign(Weekday::Tue, PlannedMeal::from(catalog.menu_item(1).expect("item")));
        plan.assign(Weekday::Sun, PlannedMeal::from(catalog.menu_item(6).expect("item")));
        repo.save(&plan).expect("save");
        assert_eq!(repo.load(customer, week).expect("load"), plan);

        let other = PlanWeek::new(2026, 45).expect("week");
        assert_eq!(repo.load(customer, other).expect("load").summary().meal_count, 0);

        plan.clear_day(Weekday::Tue);
        repo.save(&plan).expect("save");
        assert_eq!(repo.load(customer, week).expect("load").summary().meal_count, 1);
    }
}
