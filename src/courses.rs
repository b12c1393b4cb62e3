//! Courses

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

/// Highest rating a course can carry.
pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Errors raised while validating a course record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseError {
    /// The course title was blank.
    #[error("course title must not be empty")]
    EmptyTitle,

    /// The price was below zero (minor units).
    #[error("course price must not be negative, got {0}")]
    NegativePrice(i64),

    /// The original (pre-sale) price was below zero (minor units).
    #[error("original price must not be negative, got {0}")]
    NegativeOriginalPrice(i64),

    /// Price and original price were in different currencies.
    #[error("original price currency {1} does not match price currency {0}")]
    CurrencyMismatch(&'static str, &'static str),

    /// The rating fell outside `0.0..=5.0`.
    #[error("rating {0} is outside 0.0..=5.0")]
    RatingOutOfRange(Decimal),
}

/// Course identifier.
///
/// Identifiers are unique within a catalog; a higher id means a more recently published course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Difficulty level of a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// No prior knowledge expected.
    Beginner,

    /// Builds on working experience.
    Intermediate,

    /// Specialist material.
    Advanced,
}

impl Level {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated course fields, checked by [`Course::new`].
#[derive(Debug, Clone)]
pub struct CourseDraft {
    /// Identifier
    pub id: CourseId,

    /// Title
    pub title: String,

    /// Short description
    pub description: String,

    /// Price; zero means free
    pub price: Money<'static, Currency>,

    /// Price before a sale, if any
    pub original_price: Option<Money<'static, Currency>>,

    /// Duration label (e.g. "2 Days")
    pub duration: String,

    /// Category name
    pub category: String,

    /// Level
    pub level: Level,

    /// Average rating out of five
    pub rating: Decimal,

    /// Number of enrolled students
    pub students: u32,

    /// Featured on the landing page
    pub featured: bool,

    /// Bullet-point highlights
    pub highlights: Vec<String>,

    /// Image URL
    pub image: String,
}

/// Course
///
/// Immutable reference data. Cart entries hold their own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    price: Money<'static, Currency>,
    original_price: Option<Money<'static, Currency>>,
    duration: String,
    category: String,
    level: Level,
    rating: Decimal,
    students: u32,
    featured: bool,
    highlights: Vec<String>,
    image: String,
}

impl Course {
    /// Validate a draft into a course.
    ///
    /// # Errors
    ///
    /// Returns a [`CourseError`] if the title is blank, a price is negative, the original price
    /// uses another currency, or the rating is outside `0.0..=5.0`.
    pub fn new(draft: CourseDraft) -> Result<Self, CourseError> {
        if draft.title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }

        let price_minor = draft.price.to_minor_units();

        if price_minor < 0 {
            return Err(CourseError::NegativePrice(price_minor));
        }

        if let Some(original) = &draft.original_price {
            if original.currency() != draft.price.currency() {
                return Err(CourseError::CurrencyMismatch(
                    draft.price.currency().iso_alpha_code,
                    original.currency().iso_alpha_code,
                ));
            }

            let original_minor = original.to_minor_units();

            if original_minor < 0 {
                return Err(CourseError::NegativeOriginalPrice(original_minor));
            }
        }

        if draft.rating.is_sign_negative() || draft.rating > MAX_RATING {
            return Err(CourseError::RatingOutOfRange(draft.rating));
        }

        Ok(Self {
            id: draft.id,
            title: draft.title,
            description: draft.description,
            price: draft.price,
            original_price: draft.original_price,
            duration: draft.duration,
            category: draft.category,
            level: draft.level,
            rating: draft.rating,
            students: draft.students,
            featured: draft.featured,
            highlights: draft.highlights,
            image: draft.image,
        })
    }

    /// Identifier
    pub fn id(&self) -> CourseId {
        self.id
    }

    /// Title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price
    pub fn price(&self) -> &Money<'static, Currency> {
        &self.price
    }

    /// Price before a sale, if any
    pub fn original_price(&self) -> Option<&Money<'static, Currency>> {
        self.original_price.as_ref()
    }

    /// Duration label
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Level
    pub fn level(&self) -> Level {
        self.level
    }

    /// Rating out of five
    pub fn rating(&self) -> Decimal {
        self.rating
    }

    /// Enrolled students
    pub fn students(&self) -> u32 {
        self.students
    }

    /// Whether the course is featured
    pub fn is_featured(&self) -> bool {
        self.featured
    }

    /// Highlights
    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }

    /// Image URL
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Currency of the course price.
    pub fn currency(&self) -> &'static Currency {
        self.price.currency()
    }

    /// Whether the course costs nothing.
    pub fn is_free(&self) -> bool {
        self.price.to_minor_units() == 0
    }

    /// Amount saved against the original price, when the course is on sale.
    pub fn savings(&self) -> Option<Money<'static, Currency>> {
        let original = self.original_price.as_ref()?;
        let saved = original.to_minor_units() - self.price.to_minor_units();

        (saved > 0).then(|| Money::from_minor(saved, self.currency()))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use rusty_money::{Money, iso::USD};

    use super::*;

    /// A valid draft priced in whole US dollars.
    pub(crate) fn draft(id: u32, title: &str, dollars: i64) -> CourseDraft {
        CourseDraft {
            id: CourseId(id),
            title: title.to_string(),
            description: format!("{title} description"),
            price: Money::from_minor(dollars * 100, USD),
            original_price: None,
            duration: "1 Day".to_string(),
            category: "Project Management".to_string(),
            level: Level::Beginner,
            rating: Decimal::new(45, 1),
            students: 100,
            featured: false,
            highlights: Vec::new(),
            image: String::new(),
        }
    }

    /// A valid course priced in whole US dollars.
    pub(crate) fn course(id: u32, title: &str, dollars: i64) -> Course {
        match Course::new(draft(id, title, dollars)) {
            Ok(course) => course,
            Err(error) => unreachable!("test draft is valid: {error}"),
        }
    }
}
