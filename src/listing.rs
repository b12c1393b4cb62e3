//! Course listing: search, filter and sort over the catalog.

use std::{cmp::Ordering, fmt, str::FromStr};

use thiserror::Error;

use crate::{catalog::Catalog, courses::Course};

/// Prices strictly below this (minor units) fall into [`PriceBucket::Under500`].
pub const PRICE_BUCKET_SPLIT_MINOR: i64 = 50_000;

/// Sentinel selecting every category or price.
pub const ALL: &str = "all";

/// An unrecognised selector value.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOption {
    /// Which selector rejected the value
    pub kind: &'static str,

    /// The rejected value
    pub value: String,
}

/// Category selector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every category
    #[default]
    All,

    /// A single category, matched exactly
    Only(String),
}

impl CategoryFilter {
    /// Whether a course passes the filter.
    pub fn matches(&self, course: &Course) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => course.category() == category,
        }
    }

    /// Selector value ("all" or the category name).
    pub fn value(&self) -> &str {
        match self {
            CategoryFilter::All => ALL,
            CategoryFilter::Only(category) => category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

/// Price bucket selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceBucket {
    /// Any price
    #[default]
    All,

    /// Price is zero
    Free,

    /// Paid, below 500
    Under500,

    /// 500 or more
    Over500,
}

impl PriceBucket {
    /// Every bucket, in selector order.
    pub const ALL: [PriceBucket; 4] = [
        PriceBucket::All,
        PriceBucket::Free,
        PriceBucket::Under500,
        PriceBucket::Over500,
    ];

    /// Whether a course's price falls in the bucket.
    pub fn matches(self, course: &Course) -> bool {
        let price = course.price().to_minor_units();

        match self {
            PriceBucket::All => true,
            PriceBucket::Free => price == 0,
            PriceBucket::Under500 => price > 0 && price < PRICE_BUCKET_SPLIT_MINOR,
            PriceBucket::Over500 => price >= PRICE_BUCKET_SPLIT_MINOR,
        }
    }

    /// Selector slug.
    pub fn slug(self) -> &'static str {
        match self {
            PriceBucket::All => ALL,
            PriceBucket::Free => "free",
            PriceBucket::Under500 => "under500",
            PriceBucket::Over500 => "over500",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            PriceBucket::All => "All Prices",
            PriceBucket::Free => "Free",
            PriceBucket::Under500 => "Under $500",
            PriceBucket::Over500 => "$500 & Above",
        }
    }
}

impl FromStr for PriceBucket {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriceBucket::ALL
            .into_iter()
            .find(|bucket| bucket.slug() == s)
            .ok_or_else(|| UnknownOption {
                kind: "price range",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for PriceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Sort order for listing results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Highest id first. Ids stand in for publication order; there are no real dates.
    #[default]
    Newest,

    /// Most students first
    Popular,

    /// Highest rating first
    Rating,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,
}

impl SortMode {
    /// Every mode, in selector order.
    pub const ALL: [SortMode; 5] = [
        SortMode::Newest,
        SortMode::Popular,
        SortMode::Rating,
        SortMode::PriceLow,
        SortMode::PriceHigh,
    ];

    /// Selector slug.
    pub fn slug(self) -> &'static str {
        match self {
            SortMode::Newest => "newest",
            SortMode::Popular => "popular",
            SortMode::Rating => "rating",
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            SortMode::Newest => "Newest",
            SortMode::Popular => "Most Popular",
            SortMode::Rating => "Highest Rated",
            SortMode::PriceLow => "Price: Low to High",
            SortMode::PriceHigh => "Price: High to Low",
        }
    }

    /// Compare two courses under this mode. Equal keys compare equal so a stable sort keeps
    /// catalog order.
    pub fn compare(self, left: &Course, right: &Course) -> Ordering {
        match self {
            SortMode::Newest => right.id().cmp(&left.id()),
            SortMode::Popular => right.students().cmp(&left.students()),
            SortMode::Rating => right.rating().cmp(&left.rating()),
            SortMode::PriceLow => left
                .price()
                .to_minor_units()
                .cmp(&right.price().to_minor_units()),
            SortMode::PriceHigh => right
                .price()
                .to_minor_units()
                .cmp(&left.price().to_minor_units()),
        }
    }
}

impl FromStr for SortMode {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortMode::ALL
            .into_iter()
            .find(|mode| mode.slug() == s)
            .ok_or_else(|| UnknownOption {
                kind: "sort mode",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Search text plus selectors for the course listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Free-text search over title and description
    pub search: String,

    /// Category selector
    pub category: CategoryFilter,

    /// Price bucket selector
    pub price: PriceBucket,

    /// Sort order
    pub sort: SortMode,
}

impl ListingQuery {
    /// Whether a course passes search, category and price filters.
    pub fn matches(&self, course: &Course) -> bool {
        matches_search(course, &self.search)
            && self.category.matches(course)
            && self.price.matches(course)
    }

    /// Whether any filter narrows the results. Sorting alone does not count.
    pub fn is_filtered(&self) -> bool {
        !self.search.is_empty() || self.category != CategoryFilter::All || self.price != PriceBucket::All
    }

    /// Reset search and filters. The sort order is kept.
    pub fn clear(&mut self) {
        *self = Self {
            sort: self.sort,
            ..Self::default()
        };
    }
}

fn matches_search(course: &Course, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }

    let needle = search.to_lowercase();

    course.title().to_lowercase().contains(&needle)
        || course.description().to_lowercase().contains(&needle)
}

/// Filtered and sorted courses. An empty listing is a normal result.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing<'a> {
    courses: Vec<&'a Course>,
}

impl<'a> Listing<'a> {
    /// Apply a query to a catalog.
    pub fn build(catalog: &'a Catalog, query: &ListingQuery) -> Self {
        Self::from_courses(catalog.as_slice(), query)
    }

    /// Apply a query to any list of courses.
    pub fn from_courses(courses: &'a [Course], query: &ListingQuery) -> Self {
        let mut matched: Vec<&'a Course> = courses
            .iter()
            .filter(|course| query.matches(course))
            .collect();

        matched.sort_by(|left, right| query.sort.compare(left, right));

        Self { courses: matched }
    }

    /// Matching courses in sorted order.
    pub fn courses(&self) -> &[&'a Course] {
        &self.courses
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::courses::CourseId;

    use super::*;

    fn ids(listing: &Listing<'_>) -> Vec<u32> {
        listing.courses().iter().map(|course| course.id().0).collect()
    }

    #[test]
    fn default_query_lists_everything_newest_first() -> TestResult {
        let catalog = Catalog::reference()?;

        let listing = Listing::build(&catalog, &ListingQuery::default());

        assert_eq!(ids(&listing), vec![6, 5, 4, 3, 2, 1]);

        Ok(())
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() -> TestResult {
        let catalog = Catalog::reference()?;
        let query = ListingQuery {
            search: "SCRUM".to_string(),
            ..ListingQuery::default()
        };

        let listing = Listing::build(&catalog, &query);

        assert_eq!(ids(&listing), vec![2]);

        let description_only = ListingQuery {
            search: "waste reduction".to_string(),
            ..ListingQuery::default()
        };

        assert_eq!(ids(&Listing::build(&catalog, &description_only)), vec![6]);

        Ok(())
    }

    #[test]
    fn category_filter_matches_exactly() -> TestResult {
        let catalog = Catalog::reference()?;
        let query = ListingQuery {
            category: CategoryFilter::from("Continuous Improvement"),
            ..ListingQuery::default()
        };

        assert_eq!(ids(&Listing::build(&catalog, &query)), vec![6, 3]);

        Ok(())
    }

    #[test]
    fn price_buckets() -> TestResult {
        let catalog = Catalog::reference()?;

        let bucket = |price: PriceBucket| {
            let query = ListingQuery {
                price,
                sort: SortMode::PriceLow,
                ..ListingQuery::default()
            };

            ids(&Listing::build(&catalog, &query))
        };

        assert_eq!(bucket(PriceBucket::Free), vec![2, 4]);
        assert_eq!(bucket(PriceBucket::Under500), vec![6]);
        assert_eq!(bucket(PriceBucket::Over500), vec![1, 3, 5]);

        Ok(())
    }

    #[test]
    fn price_sorts_are_monotonic_and_stable() -> TestResult {
        let catalog = Catalog::reference()?;

        let low = ListingQuery {
            sort: SortMode::PriceLow,
            ..ListingQuery::default()
        };
        let high = ListingQuery {
            sort: SortMode::PriceHigh,
            ..ListingQuery::default()
        };

        let low_listing = Listing::build(&catalog, &low);
        let high_listing = Listing::build(&catalog, &high);

        let low_prices: Vec<i64> = low_listing
            .courses()
            .iter()
            .map(|course| course.price().to_minor_units())
            .collect();

        let high_prices: Vec<i64> = high_listing
            .courses()
            .iter()
            .map(|course| course.price().to_minor_units())
            .collect();

        assert!(low_prices.windows(2).all(|pair| pair.first() <= pair.get(1)));
        assert!(high_prices.windows(2).all(|pair| pair.first() >= pair.get(1)));

        // Equal prices keep catalog order.
        assert_eq!(ids(&low_listing), vec![2, 4, 6, 1, 3, 5]);
        assert_eq!(ids(&high_listing), vec![5, 1, 3, 6, 2, 4]);

        Ok(())
    }

    #[test]
    fn rating_and_popular_sorts() -> TestResult {
        let catalog = Catalog::reference()?;

        let by = |sort: SortMode| {
            ids(&Listing::build(
                &catalog,
                &ListingQuery {
                    sort,
                    ..ListingQuery::default()
                },
            ))
        };

        assert_eq!(by(SortMode::Rating), vec![3, 1, 5, 4, 6, 2]);
        assert_eq!(by(SortMode::Popular), vec![2, 1, 4, 5, 6, 3]);

        Ok(())
    }

    #[test]
    fn empty_result_is_not_an_error_and_clear_resets() -> TestResult {
        let catalog = Catalog::reference()?;
        let mut query = ListingQuery {
            search: "underwater basket weaving".to_string(),
            category: CategoryFilter::from("Agile"),
            price: PriceBucket::Over500,
            sort: SortMode::Rating,
        };

        let listing = Listing::build(&catalog, &query);

        assert!(listing.is_empty());
        assert!(query.is_filtered());

        query.clear();

        assert!(!query.is_filtered());
        assert_eq!(query.sort, SortMode::Rating);
        assert_eq!(Listing::build(&catalog, &query).len(), catalog.len());

        Ok(())
    }

    #[test]
    fn selectors_parse_from_slugs() {
        assert_eq!("under500".parse::<PriceBucket>(), Ok(PriceBucket::Under500));
        assert_eq!("price-high".parse::<SortMode>(), Ok(SortMode::PriceHigh));
        assert_eq!(CategoryFilter::from(ALL), CategoryFilter::All);
        assert_eq!(
            "cheapest".parse::<SortMode>(),
            Err(UnknownOption {
                kind: "sort mode",
                value: "cheapest".to_string(),
            })
        );
    }

    #[test]
    fn newest_is_descending_id() -> TestResult {
        let catalog = Catalog::reference()?;

        let first = Listing::build(&catalog, &ListingQuery::default())
            .courses()
            .first()
            .map(|course| course.id());

        assert_eq!(first, Some(CourseId(6)));

        Ok(())
    }
}
