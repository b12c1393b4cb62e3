//! Catalog

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    courses::{Course, CourseId},
    fixtures::{CATALOG_YAML, FixtureError, courses::parse_courses},
};

/// Errors raised while assembling a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two records shared an identifier.
    #[error("course {0} appears more than once in the catalog")]
    DuplicateCourse(CourseId),

    /// A record was priced in another currency (course, course currency, catalog currency).
    #[error("course {0} has currency {1}, but the catalog uses {2}")]
    CurrencyMismatch(CourseId, &'static str, &'static str),

    /// The catalog held no records, so its currency is unknown.
    #[error("catalog has no courses")]
    Empty,
}

/// An ordered, read-only list of courses with unique identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    courses: Vec<Course>,
    currency: &'static Currency,
}

impl Catalog {
    /// Build a catalog, keeping the given order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the list is empty, an id repeats, or currencies differ.
    pub fn new(courses: impl Into<Vec<Course>>) -> Result<Self, CatalogError> {
        let courses = courses.into();
        let currency = courses.first().ok_or(CatalogError::Empty)?.currency();

        for (index, course) in courses.iter().enumerate() {
            if courses
                .iter()
                .take(index)
                .any(|earlier| earlier.id() == course.id())
            {
                return Err(CatalogError::DuplicateCourse(course.id()));
            }

            if course.currency() != currency {
                return Err(CatalogError::CurrencyMismatch(
                    course.id(),
                    course.currency().iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }
        }

        Ok(Self { courses, currency })
    }

    /// Parse a catalog from a courses YAML document.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if parsing, course validation or catalog validation fails.
    pub fn from_yaml(yaml: &str) -> Result<Self, FixtureError> {
        Ok(Self::new(parse_courses(yaml)?)?)
    }

    /// The built-in reference catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the bundled fixture is invalid.
    pub fn reference() -> Result<Self, FixtureError> {
        Self::from_yaml(CATALOG_YAML)
    }

    /// Look up a course by id.
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id() == id)
    }

    /// Iterate courses in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// All courses as a slice.
    pub fn as_slice(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty. Always `false` for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Featured courses, in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|course| course.is_featured())
    }

    /// Distinct category names in order of first appearance.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();

        for course in &self.courses {
            if !categories.contains(&course.category()) {
                categories.push(course.category());
            }
        }

        categories
    }

    /// Currency shared by every course.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
