//! Integration tests for the storefront state container.
//!
//! Walks a visitor through browsing, filling a cart and adjusting quantities using the bundled
//! catalog and configuration.

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use ilearning::{
    notices,
    prelude::{CartView, CourseId, Page, PageAction, Screen, Severity, Storefront},
};

#[test]
fn test_two_course_cart_gets_bulk_discount() -> TestResult {
    let mut store = Storefront::reference()?;

    // $750 + 2 × $380
    store.add_to_cart(CourseId(1));
    store.add_to_cart(CourseId(6));
    store.update_quantity(CourseId(6), 2);

    let pricing = store.cart().pricing(&store.config().pricing)?;

    assert_eq!(pricing.subtotal, Money::from_minor(151_000, USD));
    assert_eq!(pricing.discount, Money::from_minor(15_100, USD));
    assert_eq!(pricing.total, Money::from_minor(135_900, USD));

    Ok(())
}

#[test]
fn test_cart_view_formats_discounted_totals() -> TestResult {
    let mut store = Storefront::reference()?;

    store.add_to_cart(CourseId(3));
    store.add_to_cart(CourseId(1));

    let CartView::Items { lines, pricing, .. } = store.cart_view()? else {
        return Err("expected a cart with items".into());
    };

    let titles: Vec<&str> = lines.iter().map(|line| line.title.as_str()).collect();

    assert_eq!(
        titles,
        vec!["Six Sigma Black Belt", "Foundations of Project Management"]
    );
    assert_eq!(pricing.subtotal, "$1,500");
    assert_eq!(
        pricing.discount.as_ref().map(|discount| discount.amount.as_str()),
        Some("-$150")
    );
    assert_eq!(pricing.total, "$1,350");

    Ok(())
}

#[test]
fn test_duplicate_add_leaves_cart_unchanged() -> TestResult {
    let mut store = Storefront::reference()?;

    store.add_to_cart(CourseId(5));
    store.update_quantity(CourseId(5), 2);
    let before = store.cart().clone();
    store.take_notices();

    let added = store.add_to_cart(CourseId(5));

    assert!(!added);
    assert_eq!(store.cart(), &before);

    let raised = store.take_notices();

    assert_eq!(raised.len(), 1);
    assert_eq!(
        raised.first().map(|notice| (notice.severity, notice.message.as_str())),
        Some((Severity::Error, notices::ALREADY_IN_CART))
    );

    Ok(())
}

#[test]
fn test_zero_quantity_removes_exactly_one_entry() -> TestResult {
    let mut store = Storefront::reference()?;

    for id in [1, 2, 3] {
        store.add_to_cart(CourseId(id));
    }

    store.update_quantity(CourseId(2), 0);

    let remaining: Vec<CourseId> = store
        .cart()
        .iter()
        .map(|entry| entry.course().id())
        .collect();

    assert_eq!(remaining, vec![CourseId(1), CourseId(3)]);

    store.update_quantity(CourseId(2), -4);

    assert_eq!(store.cart_count(), 2);

    Ok(())
}

#[test]
fn test_empty_cart_view_has_actions_and_no_pricing() -> TestResult {
    let mut store = Storefront::reference()?;

    store.add_to_cart(CourseId(4));
    store.remove_from_cart(CourseId(4));
    store.navigate(Page::Cart);

    assert_eq!(store.screen(), Screen::Cart);

    let view = store.cart_view()?;

    assert_eq!(
        view,
        CartView::Empty {
            actions: [
                PageAction {
                    label: "Browse Courses",
                    target: Page::Courses,
                },
                PageAction {
                    label: "Go Home",
                    target: Page::Home,
                },
            ],
        }
    );

    Ok(())
}

#[test]
fn test_course_detail_without_selection_offers_recovery() -> TestResult {
    let mut store = Storefront::reference()?;

    store.navigate(Page::CourseDetail);

    assert_eq!(store.screen(), Screen::CourseNotFound);
    assert_eq!(Screen::NOT_FOUND_RECOVERY, Page::Courses);

    store.open_course(CourseId(2));

    let Screen::CourseDetail(course) = store.screen() else {
        return Err("expected course detail".into());
    };

    assert_eq!(course.title(), "Scrum Fundamentals Certified");

    Ok(())
}

#[test]
fn test_unknown_slug_renders_home() -> TestResult {
    let mut store = Storefront::reference()?;

    store.navigate(Page::Terms);
    store.navigate(Page::from_slug_or_home("careers"));

    assert_eq!(store.screen(), Screen::Home);

    Ok(())
}
