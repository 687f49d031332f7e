use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{
    order_number, CustomerStats, DeliveryDetails, ListResult, NewOrder, OrderView, PaymentMethod,
};
use crate::domain::ports::{
    CartRepository, MembershipRepository, OrderRepository, PaymentGateway, PaymentRequest,
};
use crate::domain::pricing::{compute_pricing, PricingConfig};

pub const MAX_PAGE_SIZE: i64 = 100;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    carts: Arc<dyn CartRepository>,
    memberships: Arc<dyn MembershipRepository>,
    payments: Arc<dyn PaymentGateway>,
    pricing: PricingConfig,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        carts: Arc<dyn CartRepository>,
        memberships: Arc<dyn MembershipRepository>,
        payments: Arc<dyn PaymentGateway>,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            orders,
            carts,
            memberships,
            payments,
            pricing,
        }
    }

    /// Check out the customer's cart: price it, charge it, record the order
    /// and empty the cart. A declined payment leaves the cart untouched.
    /// Once the order is recorded a failure to empty the cart is only logged.
    pub fn place_order(
        &self,
        customer_id: Uuid,
        delivery: DeliveryDetails,
        payment_method: PaymentMethod,
        today: NaiveDate,
    ) -> Result<OrderView, DomainError> {
        let mut cart = self.carts.load(customer_id)?;
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        delivery.validate(today)?;

        let membership = self.memberships.tier_for(customer_id)?;
        let pricing = compute_pricing(&cart.pricing_lines(), membership, &self.pricing)?;

        let id = Uuid::new_v4();
        let receipt = self
            .payments
            .charge(&PaymentRequest {
                order_id: id,
                customer_id,
                amount: pricing.total,
                method: payment_method,
            })
            .inspect_err(|e| log::warn!("Payment for customer {customer_id} failed: {e}"))?;

        let order = self.orders.create(NewOrder {
            id,
            order_number: order_number(today, id),
            customer_id,
            membership,
            lines: cart.items().to_vec(),
            delivery,
            payment_method,
            payment_reference: receipt.reference,
            pricing,
        })?;

        // Order is committed; a leftover cart is not a failed checkout.
        cart.clear();
        if let Err(e) = self.carts.save(&cart) {
            log::warn!(
                "Order {} placed but cart for customer {customer_id} was not cleared: {e}",
                order.order_number
            );
        }

        log::info!(
            "Order {} placed for customer {customer_id}: total {} won",
            order.order_number,
            order.pricing.total
        );
        Ok(order)
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.orders.find_by_id(id)
    }

    /// Page is 1-based; limit is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn list_orders(
        &self,
        customer_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult, DomainError> {
        self.orders
            .list_for_customer(customer_id, page.max(1), limit.clamp(1, MAX_PAGE_SIZE))
    }

    pub fn customer_stats(&self, customer_id: Uuid) -> Result<CustomerStats, DomainError> {
        let orders = self.orders.all_for_customer(customer_id)?;
        Ok(CustomerStats::from_orders(&orders))
    }
}
