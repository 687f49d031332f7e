use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{
    cart_lines, contact_messages, meal_plan_days, memberships, order_lines, orders, reviews,
    subscriptions,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = memberships)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MembershipRow {
    pub customer_id: Uuid,
    pub tier: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = memberships)]
pub struct NewMembershipRow<'a> {
    pub customer_id: Uuid,
    pub tier: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = cart_lines)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartLineRow {
    pub customer_id: Uuid,
    pub item_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub membership: String,
    pub recipient: String,
    pub phone: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub delivery_date: NaiveDate,
    pub delivery_slot: String,
    pub notes: Option<String>,
    pub payment_method: String,
    pub payment_reference: String,
    pub subtotal: i64,
    pub discount: i64,
    pub delivery_fee: i64,
    pub total: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: String,
    pub membership: String,
    pub recipient: String,
    pub phone: String,
    pub address: String,
    pub address_detail: Option<String>,
    pub delivery_date: NaiveDate,
    pub delivery_slot: String,
    pub notes: Option<String>,
    pub payment_method: String,
    pub payment_reference: String,
    pub subtotal: i64,
    pub discount: i64,
    pub delivery_fee: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_lines)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_lines)]
pub struct NewOrderLineRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub item_id: String,
    pub name: String,
    pub unit_price: i64,
    pub quantity: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = meal_plan_days)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MealPlanDayRow {
    pub customer_id: Uuid,
    pub iso_year: i32,
    pub iso_week: i32,
    pub day: i32,
    pub menu_item_id: i32,
    pub name: String,
    pub price: i64,
    pub calories: i32,
    pub protein: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = subscriptions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SubscriptionRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub cycle: String,
    pub slot: String,
    pub start_date: NaiveDate,
    pub meals: Value,
    pub weekly_cost: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ReviewRow {
    pub id: Uuid,
    pub name: String,
    pub rating: i16,
    pub title: Option<String>,
    pub body: String,
    pub menu_item_id: Option<i32>,
    pub verified: bool,
    pub helpful: i32,
    pub review_date: NaiveDate,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub rating: i16,
    pub title: Option<&'a str>,
    pub body: &'a str,
    pub menu_item_id: Option<i32>,
    pub verified: bool,
    pub helpful: i32,
    pub review_date: NaiveDate,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = contact_messages)]
pub struct NewContactMessageRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub category: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub message: &'a str,
    pub received_at: DateTime<Utc>,
}
