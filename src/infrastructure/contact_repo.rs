use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::contact::ContactMessage;
use crate::domain::errors::DomainError;
use crate::domain::ports::ContactRepository;
use crate::schema::contact_messages;

use super::models::NewContactMessageRow;

pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ContactRepository for DieselContactRepository {
    fn create(&self, message: &ContactMessage) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        diesel::insert_into(contact_messages::table)
            .values(&NewContactMessageRow {
                id: message.id,
                name: &message.name,
                email: &message.email,
                phone: message.phone.as_deref(),
                category: message.category.as_deref(),
                subject: message.subject.as_deref(),
                message: &message.message,
                received_at: message.received_at,
            })
            .execute(&mut conn)?;
        Ok(())
    }
}
