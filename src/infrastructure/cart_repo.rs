use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::cart::{Cart, CartItem};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::cart_lines;

use super::models::CartLineRow;
use super::to_i32;

pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn load(&self, customer_id: Uuid) -> Result<Cart, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = cart_lines::table
            .filter(cart_lines::customer_id.eq(customer_id))
            .order(cart_lines::position.asc())
            .select(CartLineRow::as_select())
            .load(&mut conn)?;

        let items = rows
            .into_iter()
            .map(|r| CartItem {
                item_id: r.item_id,
                name: r.name,
                unit_price: r.unit_price,
                quantity: r.quantity,
            })
            .collect();
        Cart::from_items(customer_id, items)
    }

    fn save(&self, cart: &Cart) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let rows = cart
            .items()
            .iter()
            .enumerate()
            .map(|(position, item)| {
                Ok(CartLineRow {
                    customer_id: cart.customer_id,
                    item_id: item.item_id.clone(),
                    name: item.name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                    position: to_i32("position", position)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            diesel::delete(cart_lines::table.filter(cart_lines::customer_id.eq(cart.customer_id)))
                .execute(conn)?;
            if !rows.is_empty() {
                diesel::insert_into(cart_lines::table)
                    .values(&rows)
                    .execute(conn)?;
            }
            Ok(())
        })
    }
}
