use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ReviewRepository;
use crate::domain::review::{Review, ReviewFilter, ReviewSort};
use crate::schema::reviews;

use super::models::{NewReviewRow, ReviewRow};
use super::{corrupt, to_i32};

pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl TryFrom<ReviewRow> for Review {
    type Error = DomainError;

    fn try_from(row: ReviewRow) -> Result<Self, Self::Error> {
        let rating = u8::try_from(row.rating).map_err(|_| corrupt("rating", row.rating))?;
        let menu_item_id = row
            .menu_item_id
            .map(|id| u32::try_from(id).map_err(|_| corrupt("menu_item_id", id)))
            .transpose()?;
        Ok(Review {
            id: row.id,
            name: row.name,
            rating,
            title: row.title,
            text: row.body,
            menu_item_id,
            verified: row.verified,
            helpful: row.helpful,
            date: row.review_date,
        })
    }
}

impl ReviewRepository for DieselReviewRepository {
    fn create(&self, review: &Review) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        let menu_item_id = review
            .menu_item_id
            .map(|id| to_i32("menu_item_id", id))
            .transpose()?;
        diesel::insert_into(reviews::table)
            .values(&NewReviewRow {
                id: review.id,
                name: &review.name,
                rating: i16::from(review.rating),
                title: review.title.as_deref(),
                body: &review.text,
                menu_item_id,
                verified: review.verified,
                helpful: review.helpful,
                review_date: review.date,
            })
            .execute(&mut conn)?;
        Ok(())
    }

    fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = reviews::table.select(ReviewRow::as_select()).into_boxed();
        if let Some(rating) = filter.rating {
            query = query.filter(reviews::rating.eq(i16::from(rating)));
        }
        if let Some(min) = filter.min_rating {
            query = query.filter(reviews::rating.ge(i16::from(min)));
        }
        if let Some(id) = filter.menu_item_id {
            query = query.filter(reviews::menu_item_id.eq(to_i32("menu_item_id", id)?));
        }
        if filter.verified_only {
            query = query.filter(reviews::verified.eq(true));
        }
        // Ties fall back to insertion order, newest submission first.
        query = match filter.sort {
            ReviewSort::Newest => {
                query.order((reviews::review_date.desc(), reviews::created_at.desc()))
            }
            ReviewSort::Oldest => {
                query.order((reviews::review_date.asc(), reviews::created_at.desc()))
            }
            ReviewSort::HighestRating => {
                query.order((reviews::rating.desc(), reviews::created_at.desc()))
            }
            ReviewSort::MostHelpful => {
                query.order((reviews::helpful.desc(), reviews::created_at.desc()))
            }
        };

        query
            .load(&mut conn)?
            .into_iter()
            .map(Review::try_from)
            .collect()
    }
}
