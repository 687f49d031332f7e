use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::MenuItem;
use super::errors::DomainError;
use super::order::DeliverySlot;
use super::pricing::Won;

pub const STATUS_ACTIVE: &str = "ACTIVE";

/// ISO weekday order, Monday first.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// An ISO-8601 week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlanWeek {
    year: i32,
    week: u32,
}

impl PlanWeek {
    pub fn new(year: i32, week: u32) -> Result<Self, DomainError> {
        NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
            .map(|_| Self { year, week })
            .ok_or_else(|| DomainError::InvalidInput(format!("{year} has no ISO week {week}")))
    }

    pub fn containing(date: NaiveDate) -> Self {
        let iso = date.iso_week();
        Self {
            year: iso.year(),
            week: iso.week(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    /// Monday of the week.
    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_isoywd_opt(self.year, self.week, Weekday::Mon)
            .unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for PlanWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

/// Parse a weekday name such as `mon` or `Monday`.
pub fn parse_weekday(s: &str) -> Result<Weekday, DomainError> {
    s.parse::<Weekday>()
        .map_err(|_| DomainError::InvalidInput(format!("unknown weekday '{s}'")))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedMeal {
    pub menu_item_id: u32,
    pub name: String,
    pub price: Won,
    pub calories: i32,
    pub protein: i32,
}

impl From<&MenuItem> for PlannedMeal {
    fn from(item: &MenuItem) -> Self {
        Self {
            menu_item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            calories: item.nutrition.calories,
            protein: item.nutrition.protein,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub meal_count: usize,
    pub weekly_cost: Won,
}

/// One customer's meals for one week, at most one per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPlan {
    pub customer_id: Uuid,
    pub week: PlanWeek,
    days: [Option<PlannedMeal>; 7],
}

impl WeeklyPlan {
    pub fn new(customer_id: Uuid, week: PlanWeek) -> Self {
        Self {
            customer_id,
            week,
            days: Default::default(),
        }
    }

    pub fn meal_on(&self, day: Weekday) -> Option<&PlannedMeal> {
        self.days[day.num_days_from_monday() as usize].as_ref()
    }

    /// Put a meal on a day, returning the one it replaced.
    pub fn assign(&mut self, day: Weekday, meal: PlannedMeal) -> Option<PlannedMeal> {
        self.days[day.num_days_from_monday() as usize].replace(meal)
    }

    pub fn clear_day(&mut self, day: Weekday) -> Option<PlannedMeal> {
        self.days[day.num_days_from_monday() as usize].take()
    }

    /// Planned meals from Monday to Sunday.
    pub fn meals(&self) -> impl Iterator<Item = (Weekday, &PlannedMeal)> {
        WEEK.into_iter()
            .zip(self.days.iter())
            .filter_map(|(day, slot)| slot.as_ref().map(|meal| (day, meal)))
    }

    pub fn summary(&self) -> PlanSummary {
        self.meals().fold(PlanSummary::default(), |acc, (_, m)| PlanSummary {
            meal_count: acc.meal_count + 1,
            weekly_cost: acc.weekly_cost + m.price,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryCycle {
    Weekly,
    Biweekly,
    Monthly,
}

impl DeliveryCycle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }
}

impl FromStr for DeliveryCycle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(DomainError::InvalidInput(format!(
                "unknown delivery cycle '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMeal {
    pub day: Weekday,
    #[serde(flatten)]
    pub meal: PlannedMeal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cycle: DeliveryCycle,
    pub slot: DeliverySlot,
    pub start_date: NaiveDate,
    pub meals: Vec<ScheduledMeal>,
    pub weekly_cost: Won,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    /// Start a subscription from a week's plan. The plan must not be empty.
    pub fn start(
        plan: &WeeklyPlan,
        cycle: DeliveryCycle,
        slot: DeliverySlot,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let summary = plan.summary();
        if summary.meal_count == 0 {
            return Err(DomainError::EmptyPlan);
        }
        Ok(Self {
            id: Uuid::new_v4(),
            customer_id: plan.customer_id,
            cycle,
            slot,
            start_date: plan.week.start_date(),
            meals: plan
                .meals()
                .map(|(day, meal)| ScheduledMeal {
                    day,
                    meal: meal.clone(),
                })
                .collect(),
            weekly_cost: summary.weekly_cost,
            status: STATUS_ACTIVE.to_string(),
            created_at: now,
        })
    }
}

/// Subscription counts plus totals for one planned week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionAnalytics {
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub weekly_meals: usize,
    pub weekly_calories: i64,
    pub weekly_cost: Won,
    /// Rounded to the nearest won; zero for an empty week.
    pub average_meal_price: Won,
}

impl SubscriptionAnalytics {
    pub fn new(subscriptions: &[Subscription], plan: &WeeklyPlan) -> Self {
        let summary = plan.summary();
        let meals = summary.meal_count as Won;
        let average_meal_price = if meals == 0 {
            0
        } else {
            (summary.weekly_cost + meals / 2) / meals
        };
        Self {
            total_subscriptions: subscriptions.len(),
            active_subscriptions: subscriptions
                .iter()
                .filter(|s| s.status == STATUS_ACTIVE)
                .count(),
            weekly_meals: summary.meal_count,
            weekly_calories: plan.meals().map(|(_, m)| i64::from(m.calories)).sum(),
            weekly_cost: summary.weekly_cost,
            average_meal_price,
        }
    }
}
