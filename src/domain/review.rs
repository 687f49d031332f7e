//! Customer reviews of the menu.

use std::cmp::Reverse;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::DomainError;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub text: String,
    /// Reviewed bento, when the reviewer picked one.
    pub menu_item_id: Option<u32>,
    pub verified: bool,
    pub helpful: i32,
    pub date: NaiveDate,
}

/// A review as submitted from the storefront.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub name: String,
    pub rating: u8,
    pub title: Option<String>,
    pub text: String,
    pub menu_item_id: Option<u32>,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(DomainError::InvalidInput(format!(
                "rating {} is outside {MIN_RATING}..={MAX_RATING}",
                self.rating
            )));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("reviewer name is required".into()));
        }
        if self.text.trim().is_empty() {
            return Err(DomainError::InvalidInput("review text is required".into()));
        }
        Ok(())
    }

    /// Fresh submissions start unverified with no helpful votes.
    pub fn into_review(self, date: NaiveDate) -> Review {
        Review {
            id: Uuid::new_v4(),
            name: self.name.trim().to_string(),
            rating: self.rating,
            title: self
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            text: self.text.trim().to_string(),
            menu_item_id: self.menu_item_id,
            verified: false,
            helpful: 0,
            date,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    HighestRating,
    MostHelpful,
}

impl FromStr for ReviewSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "highest_rating" => Ok(Self::HighestRating),
            "most_helpful" => Ok(Self::MostHelpful),
            other => Err(DomainError::InvalidInput(format!(
                "unknown review sort '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    /// Exact star rating.
    pub rating: Option<u8>,
    pub min_rating: Option<u8>,
    pub menu_item_id: Option<u32>,
    pub verified_only: bool,
    pub sort: ReviewSort,
}

impl ReviewFilter {
    pub fn matches(&self, review: &Review) -> bool {
        self.rating.is_none_or(|r| review.rating == r)
            && self.min_rating.is_none_or(|r| review.rating >= r)
            && self
                .menu_item_id
                .is_none_or(|id| review.menu_item_id == Some(id))
            && (!self.verified_only || review.verified)
    }

    /// Filter and order in memory. Sorting is stable, so ties keep the
    /// order they were stored in.
    pub fn apply(&self, reviews: impl IntoIterator<Item = Review>) -> Vec<Review> {
        let mut out: Vec<Review> = reviews.into_iter().filter(|r| self.matches(r)).collect();
        match self.sort {
            ReviewSort::Newest => out.sort_by_key(|r| Reverse(r.date)),
            ReviewSort::Oldest => out.sort_by_key(|r| r.date),
            ReviewSort::HighestRating => out.sort_by_key(|r| Reverse(r.rating)),
            ReviewSort::MostHelpful => out.sort_by_key(|r| Reverse(r.helpful)),
        }
        out
    }
}

fn featured(
    name: &str,
    rating: u8,
    text: &str,
    menu_item_id: u32,
    helpful: i32,
    (y, m, d): (i32, u32, u32),
) -> Option<Review> {
    Some(Review {
        id: Uuid::new_v4(),
        name: name.to_string(),
        rating,
        title: None,
        text: text.to_string(),
        menu_item_id: Some(menu_item_id),
        verified: true,
        helpful,
        date: NaiveDate::from_ymd_opt(y, m, d)?,
    })
}

/// Verified reviews the storefront opens with.
pub fn featured_reviews() -> Vec<Review> {
    [
        featured(
            "Kim Minsu",
            5,
            "Tasty and the nutrition numbers are spot on. Fast delivery and tidy packaging.",
            1,
            23,
            (2024, 1, 15),
        ),
        featured(
            "Park Jiyoung",
            5,
            "Love picking my own ingredients in the builder. Great for my allergies.",
            2,
            18,
            (2024, 1, 10),
        ),
        featured(
            "Lee Junho",
            4,
            "Quick delivery and the subscription makes meal planning easy. Good value.",
            4,
            15,
            (2024, 1, 8),
        ),
        featured(
            "Choi Suyeon",
            5,
            "Ordered to match my calorie target. Three months in and down 5 kg!",
            3,
            31,
            (2024, 1, 5),
        ),
        featured(
            "Jung Woojin",
            4,
            "The salmon bowl is delicious. A bit pricey but the membership discount helps.",
            5,
            12,
            (2024, 1, 3),
        ),
        featured(
            "Kang Minjung",
            5,
            "Finally a vegan bento with enough protein that still tastes good.",
            6,
            9,
            (2024, 1, 1),
        ),
    ]
    .into_iter()
    .flatten()
    .collect()
}
