use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::CartItem;
use crate::domain::errors::DomainError;
use crate::domain::order::{
    page_offset, DeliveryDetails, DeliverySlot, ListResult, NewOrder, OrderView, PaymentMethod,
    STATUS_PENDING,
};
use crate::domain::ports::OrderRepository;
use crate::domain::pricing::{MembershipTier, PricingResult};
use crate::schema::{cart_lines, order_lines, orders};

use super::models::{NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};
use super::{corrupt, to_i32};

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_view(row: OrderRow, lines: Vec<OrderLineRow>) -> Result<OrderView, DomainError> {
    let slot = row
        .delivery_slot
        .parse::<DeliverySlot>()
        .map_err(|_| corrupt("delivery_slot", &row.delivery_slot))?;
    let payment_method = row
        .payment_method
        .parse::<PaymentMethod>()
        .map_err(|_| corrupt("payment_method", &row.payment_method))?;

    let mut lines = lines;
    lines.sort_by_key(|l| l.position);

    Ok(OrderView {
        id: row.id,
        order_number: row.order_number,
        customer_id: row.customer_id,
        status: row.status,
        membership: MembershipTier::from_label(&row.membership),
        delivery: DeliveryDetails {
            recipient: row.recipient,
            phone: row.phone,
            address: row.address,
            address_detail: row.address_detail,
            date: row.delivery_date,
            slot,
            notes: row.notes,
        },
        payment_method,
        payment_reference: row.payment_reference,
        pricing: PricingResult {
            subtotal: row.subtotal,
            discount: row.discount,
            delivery_fee: row.delivery_fee,
            total: row.total,
        },
        placed_at: row.created_at,
        lines: lines
            .into_iter()
            .map(|l| CartItem {
                item_id: l.item_id,
                name: l.name,
                unit_price: l.unit_price,
                quantity: l.quantity,
            })
            .collect(),
    })
}

impl OrderRepository for DieselOrderRepository {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError> {
        let mut conn = self.pool.get()?;

        let new_lines = order
            .lines
            .iter()
            .enumerate()
            .map(|(position, l)| {
                Ok(NewOrderLineRow {
                    id: Uuid::new_v4(),
                    order_id: order.id,
                    item_id: l.item_id.clone(),
                    name: l.name.clone(),
                    unit_price: l.unit_price,
                    quantity: l.quantity,
                    position: to_i32("position", position)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let customer_id = order.customer_id;
        let delivery = order.delivery;
        let new_order = NewOrderRow {
            id: order.id,
            order_number: order.order_number,
            customer_id,
            status: STATUS_PENDING.to_string(),
            membership: order.membership.as_str().to_string(),
            recipient: delivery.recipient,
            phone: delivery.phone,
            address: delivery.address,
            address_detail: delivery.address_detail,
            delivery_date: delivery.date,
            delivery_slot: delivery.slot.as_str().to_string(),
            notes: delivery.notes,
            payment_method: order.payment_method.as_str().to_string(),
            payment_reference: order.payment_reference,
            subtotal: order.pricing.subtotal,
            discount: order.pricing.discount,
            delivery_fee: order.pricing.delivery_fee,
            total: order.pricing.total,
        };

        // Order, lines and the emptied cart land together or not at all.
        conn.transaction::<_, DomainError, _>(|conn| {
            let row = diesel::insert_into(orders::table)
                .values(&new_order)
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            let lines = diesel::insert_into(order_lines::table)
                .values(&new_lines)
                .returning(OrderLineRow::as_returning())
                .get_results(conn)?;

            diesel::delete(cart_lines::table)
                .filter(cart_lines::customer_id.eq(customer_id))
                .execute(conn)?;

            to_view(row, lines)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = OrderLineRow::belonging_to(&order)
            .select(OrderLineRow::as_select())
            .load(&mut conn)?;

        to_view(order, lines).map(Some)
    }

    fn list_for_customer(
        &self,
        customer_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit);
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table
                .filter(orders::customer_id.eq(customer_id))
                .count()
                .get_result(conn)?;
            let Some(offset) = offset else {
                return Ok(ListResult {
                    items: Vec::new(),
                    total,
                });
            };

            let rows = orders::table
                .filter(orders::customer_id.eq(customer_id))
                .select(OrderRow::as_select())
                .order((orders::created_at.desc(), orders::id.desc()))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(|row| to_view(row, Vec::new()))
                    .collect::<Result<_, _>>()?,
                total,
            })
        })
    }

    fn all_for_customer(&self, customer_id: Uuid) -> Result<Vec<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = orders::table
            .filter(orders::customer_id.eq(customer_id))
            .select(OrderRow::as_select())
            .order((orders::created_at.desc(), orders::id.desc()))
            .load(&mut conn)?;

        let lines = OrderLineRow::belonging_to(&rows)
            .select(OrderLineRow::as_select())
            .load(&mut conn)?
            .grouped_by(&rows);

        rows.into_iter()
            .zip(lines)
            .map(|(row, lines)| to_view(row, lines))
            .collect()
    }
}
