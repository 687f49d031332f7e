use diesel::prelude::*;
use diesel::upsert::excluded;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::MembershipRepository;
use crate::domain::pricing::MembershipTier;
use crate::schema::memberships;

use super::models::{MembershipRow, NewMembershipRow};

pub struct DieselMembershipRepository {
    pool: DbPool,
}

impl DieselMembershipRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl MembershipRepository for DieselMembershipRepository {
    fn tier_for(&self, customer_id: Uuid) -> Result<MembershipTier, DomainError> {
        let mut conn = self.pool.get()?;

        let row = memberships::table
            .find(customer_id)
            .select(MembershipRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row
            .map(|r| MembershipTier::from_label(&r.tier))
            .unwrap_or(MembershipTier::Basic))
    }

    fn set_tier(&self, customer_id: Uuid, tier: MembershipTier) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(memberships::table)
            .values(&NewMembershipRow {
                customer_id,
                tier: tier.as_str(),
            })
            .on_conflict(memberships::customer_id)
            .do_update()
            .set((
                memberships::tier.eq(excluded(memberships::tier)),
                memberships::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;
        Ok(())
    }
}
