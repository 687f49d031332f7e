use std::sync::Arc;

use uuid::Uuid;

use crate::domain::builder::{BentoBuild, CustomBento};
use crate::domain::cart::Cart;
use crate::domain::catalog::Catalog;
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, MembershipRepository};
use crate::domain::pricing::{compute_pricing, CartLine, MembershipTier, PricingConfig, PricingResult};

#[derive(Debug, Clone)]
pub struct CartSummary {
    pub cart: Cart,
    pub membership: MembershipTier,
    pub item_count: i64,
    pub pricing: PricingResult,
}

pub struct CartService {
    carts: Arc<dyn CartRepository>,
    memberships: Arc<dyn MembershipRepository>,
    catalog: Arc<Catalog>,
    pricing: PricingConfig,
}

impl CartService {
    pub fn new(
        carts: Arc<dyn CartRepository>,
        memberships: Arc<dyn MembershipRepository>,
        catalog: Arc<Catalog>,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            carts,
            memberships,
            catalog,
            pricing,
        }
    }

    /// Price arbitrary lines without touching any cart.
    pub fn quote(
        &self,
        lines: &[CartLine],
        tier: MembershipTier,
    ) -> Result<PricingResult, DomainError> {
        Ok(compute_pricing(lines, tier, &self.pricing)?)
    }

    pub fn membership(&self, customer_id: Uuid) -> Result<MembershipTier, DomainError> {
        self.memberships.tier_for(customer_id)
    }

    pub fn set_membership(
        &self,
        customer_id: Uuid,
        tier: MembershipTier,
    ) -> Result<MembershipTier, DomainError> {
        self.memberships.set_tier(customer_id, tier)?;
        log::info!("Customer {customer_id} membership set to {tier}");
        Ok(tier)
    }

    pub fn summary(&self, customer_id: Uuid) -> Result<CartSummary, DomainError> {
        let cart = self.carts.load(customer_id)?;
        self.summarize(cart)
    }

    pub fn add_menu_item(
        &self,
        customer_id: Uuid,
        menu_item_id: u32,
        quantity: i32,
    ) -> Result<CartSummary, DomainError> {
        let item = self
            .catalog
            .menu_item(menu_item_id)
            .ok_or_else(|| DomainError::NotFound(format!("Menu item {menu_item_id}")))?;
        self.update(customer_id, |cart| {
            cart.add(&item.id.to_string(), &item.name, item.price, quantity)
        })
    }

    pub fn add_custom_bento(
        &self,
        customer_id: Uuid,
        build: &BentoBuild,
    ) -> Result<(CustomBento, CartSummary), DomainError> {
        let bento = build.to_cart_item(&self.catalog)?;
        let summary = self.update(customer_id, |cart| {
            cart.add(&bento.item_id, &bento.name, bento.summary.price, 1)
        })?;
        Ok((bento, summary))
    }

    pub fn set_quantity(
        &self,
        customer_id: Uuid,
        item_id: &str,
        quantity: i32,
    ) -> Result<CartSummary, DomainError> {
        self.update(customer_id, |cart| cart.set_quantity(item_id, quantity))
    }

    pub fn remove_item(&self, customer_id: Uuid, item_id: &str) -> Result<CartSummary, DomainError> {
        self.update(customer_id, |cart| {
            if cart.remove(item_id) {
                Ok(())
            } else {
                Err(DomainError::NotFound(format!("Cart item '{item_id}'")))
            }
        })
    }

    pub fn clear(&self, customer_id: Uuid) -> Result<CartSummary, DomainError> {
        self.update(customer_id, |cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Load, mutate and store the cart, then price the result.
    fn update<F>(&self, customer_id: Uuid, mutate: F) -> Result<CartSummary, DomainError>
    where
        F: FnOnce(&mut Cart) -> Result<(), DomainError>,
    {
        let mut cart = self.carts.load(customer_id)?;
        mutate(&mut cart)?;
        self.carts.save(&cart)?;
        self.summarize(cart)
    }

    fn summarize(&self, cart: Cart) -> Result<CartSummary, DomainError> {
        let membership = self.memberships.tier_for(cart.customer_id)?;
        let pricing = compute_pricing(&cart.pricing_lines(), membership, &self.pricing)?;
        Ok(CartSummary {
            item_count: cart.item_count(),
            cart,
            membership,
            pricing,
        })
    }
}
