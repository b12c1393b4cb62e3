//! Course Fixtures

use rusty_money::Money;
use serde::Deserialize;

use crate::{
    courses::{Course, CourseDraft, CourseId, Level},
    fixtures::{FixtureError, parse_price, parse_rating},
};

/// Wrapper for courses in YAML
#[derive(Debug, Deserialize)]
pub struct CoursesFixture {
    /// Courses in display order
    pub courses: Vec<CourseFixture>,
}

/// Course Fixture
#[derive(Debug, Deserialize)]
pub struct CourseFixture {
    /// Course identifier
    pub id: u32,

    /// Course title
    pub title: String,

    /// Course description
    pub description: String,

    /// Course price (e.g., "750 USD")
    pub price: String,

    /// Price before a sale (e.g., "950 USD")
    #[serde(default)]
    pub original_price: Option<String>,

    /// Duration label
    pub duration: String,

    /// Enrolled students
    #[serde(default)]
    pub students: u32,

    /// Rating (e.g., "4.8")
    pub rating: String,

    /// Category name
    pub category: String,

    /// Level
    pub level: Level,

    /// Featured flag
    #[serde(default)]
    pub featured: bool,

    /// Highlights
    #[serde(default)]
    pub highlights: Vec<String>,

    /// Image URL
    #[serde(default)]
    pub image: String,
}

impl TryFrom<CourseFixture> for Course {
    type Error = FixtureError;

    fn try_from(fixture: CourseFixture) -> Result<Self, Self::Error> {
        let (price_minor, currency) = parse_price(&fixture.price)?;

        let original_price = fixture
            .original_price
            .as_deref()
            .map(parse_price)
            .transpose()?
            .map(|(minor, original_currency)| Money::from_minor(minor, original_currency));

        let draft = CourseDraft {
            id: CourseId(fixture.id),
            title: fixture.title,
            description: fixture.description,
            price: Money::from_minor(price_minor, currency),
            original_price,
            duration: fixture.duration,
            category: fixture.category,
            level: fixture.level,
            rating: parse_rating(&fixture.rating)?,
            students: fixture.students,
            featured: fixture.featured,
            highlights: fixture.highlights,
            image: fixture.image,
        };

        Course::new(draft).map_err(|source| FixtureError::Course {
            id: fixture.id,
            source,
        })
    }
}

/// Parse a courses document into validated courses, keeping document order.
///
/// # Errors
///
/// Returns an error if the YAML is malformed or any course fails validation.
pub fn parse_courses(yaml: &str) -> Result<Vec<Course>, FixtureError> {
    let fixture: CoursesFixture = serde_norway::from_str(yaml)?;

    fixture.courses.into_iter().map(Course::try_from).collect()
}
