//! Integration tests for course listing search, filters and sort orders against the bundled
//! catalog.

use testresult::TestResult;

use ilearning::prelude::{
    Catalog, CategoryFilter, Listing, ListingQuery, Page, PriceBucket, SortMode, Storefront,
};

fn prices(listing: &Listing<'_>) -> Vec<i64> {
    listing
        .courses()
        .iter()
        .map(|course| course.price().to_minor_units())
        .collect()
}

#[test]
fn test_scrum_search_finds_only_scrum_courses() -> TestResult {
    let catalog = Catalog::reference()?;

    for search in ["scrum", "Scrum", "SCRUM"] {
        let query = ListingQuery {
            search: search.to_string(),
            ..ListingQuery::default()
        };

        let listing = Listing::build(&catalog, &query);

        assert!(!listing.is_empty());
        assert!(listing.courses().iter().all(|course| {
            course.title().to_lowercase().contains("scrum")
                || course.description().to_lowercase().contains("scrum")
        }));
    }

    Ok(())
}

#[test]
fn test_every_sort_mode_is_monotonic_on_its_key() -> TestResult {
    let catalog = Catalog::reference()?;

    for sort in SortMode::ALL {
        let query = ListingQuery {
            sort,
            ..ListingQuery::default()
        };

        let listing = Listing::build(&catalog, &query);

        assert_eq!(listing.len(), catalog.len());

        let ordered = listing.courses().windows(2).all(|pair| match pair {
            [left, right] => sort.compare(left, right).is_le(),
            _ => true,
        });

        assert!(ordered, "{sort} is not ordered");
    }

    let low = Listing::build(
        &catalog,
        &ListingQuery {
            sort: SortMode::PriceLow,
            ..ListingQuery::default()
        },
    );

    assert_eq!(prices(&low), vec![0, 0, 38_000, 75_000, 75_000, 150_000]);

    Ok(())
}

#[test]
fn test_filters_combine() -> TestResult {
    let catalog = Catalog::reference()?;

    let query = ListingQuery {
        search: "management".to_string(),
        category: CategoryFilter::from("Project Management"),
        price: PriceBucket::Over500,
        sort: SortMode::PriceHigh,
    };

    let titles: Vec<&str> = Listing::build(&catalog, &query)
        .courses()
        .iter()
        .map(|course| course.title())
        .collect();

    assert_eq!(
        titles,
        vec![
            "Advanced Project Management",
            "Foundations of Project Management"
        ]
    );

    Ok(())
}

#[test]
fn test_free_bucket_and_slug_parsing() -> TestResult {
    let catalog = Catalog::reference()?;

    let query = ListingQuery {
        price: "free".parse()?,
        sort: "popular".parse()?,
        ..ListingQuery::default()
    };

    let listing = Listing::build(&catalog, &query);

    assert!(listing.courses().iter().all(|course| course.is_free()));
    assert_eq!(listing.len(), 2);

    Ok(())
}

#[test]
fn test_storefront_clear_filters_after_empty_result() -> TestResult {
    let mut store = Storefront::reference()?;
    store.navigate(Page::Courses);

    store.set_listing_query(ListingQuery {
        search: "astrophysics".to_string(),
        sort: SortMode::Rating,
        ..ListingQuery::default()
    });

    let view = store.listing_view();

    assert!(view.is_empty());
    assert!(view.clear_filters);

    store.clear_filters();

    let view = store.listing_view();

    assert_eq!(view.courses.len(), 6);
    assert!(!view.clear_filters);
    assert_eq!(store.listing_query().sort, SortMode::Rating);

    Ok(())
}
