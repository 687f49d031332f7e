use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::catalog::Catalog;
use crate::domain::errors::DomainError;
use crate::domain::ports::ReviewRepository;
use crate::domain::review::{NewReview, Review, ReviewFilter};

pub struct ReviewService {
    reviews: Arc<dyn ReviewRepository>,
    catalog: Arc<Catalog>,
}

impl ReviewService {
    pub fn new(reviews: Arc<dyn ReviewRepository>, catalog: Arc<Catalog>) -> Self {
        Self { reviews, catalog }
    }

    pub fn list(&self, filter: &ReviewFilter) -> Result<Vec<Review>, DomainError> {
        self.reviews.list(filter)
    }

    /// Store a new review dated `today`. A named bento must be on the menu.
    pub fn submit(&self, submission: NewReview, today: NaiveDate) -> Result<Review, DomainError> {
        submission.validate()?;
        if let Some(id) = submission.menu_item_id {
            if self.catalog.menu_item(id).is_none() {
                return Err(DomainError::NotFound(format!("Menu item {id}")));
            }
        }
        let review = submission.into_review(today);
        self.reviews.create(&review)?;
        log::info!("Review {} submitted with rating {}", review.id, review.rating);
        Ok(review)
    }
}
