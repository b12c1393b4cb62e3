//! View models
//!
//! Display-ready snapshots of cart, listing and receipt state. Amounts are pre-formatted so the
//! UI never does money arithmetic.

use rusty_money::Money;

use crate::{
    cart::{Cart, CartEntry},
    catalog::Catalog,
    checkout::OrderReceipt,
    courses::{Course, CourseId},
    listing::{Listing, ListingQuery},
    navigation::Page,
    pricing::{
        PricingError, PricingPolicy, PricingSummary, format_amount, format_price, line_total,
    },
};


/// A button that jumps to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAction {
    /// Button text
    pub label: &'static str,

    /// Destination
    pub target: Page,
}

/// Actions offered by an empty cart.
pub const EMPTY_CART_ACTIONS: [PageAction; 2] = [
    PageAction {
        label: "Browse Courses",
        target: Page::Courses,
    },
    PageAction {
        label: "Go Home",
        target: Page::Home,
    },
];

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    /// Course id, for quantity and remove actions
    pub course_id: CourseId,

    /// Course title
    pub title: String,

    /// Duration label
    pub duration: String,

    /// Unit price ("Free", "$750")
    pub unit_price: String,

    /// Seats
    pub quantity: u32,

    /// Price × quantity
    pub line_total: String,
}

impl CartLineView {
    /// Format one cart entry.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if price × quantity does not fit.
    pub fn new(entry: &CartEntry) -> Result<Self, PricingError> {
        let course = entry.course();
        let line = Money::from_minor(line_total(entry)?, course.currency());

        Ok(Self {
            course_id: course.id(),
            title: course.title().to_string(),
            duration: course.duration().to_string(),
            unit_price: format_price(course.price()),
            quantity: entry.quantity(),
            line_total: format_price(&line),
        })
    }
}

/// Discount line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountView {
    /// e.g. "Bulk Discount (10%)"
    pub label: String,

    /// e.g. "-$140"
    pub amount: String,
}

/// Pricing block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingView {
    /// Subtotal
    pub subtotal: String,

    /// Discount line, when one applies
    pub discount: Option<DiscountView>,

    /// Total
    pub total: String,
}

impl PricingView {
    /// Format a pricing summary.
    pub fn new(summary: &PricingSummary, policy: &PricingPolicy) -> Self {
        let discount = summary.has_discount().then(|| DiscountView {
            label: policy.label(),
            amount: format_amount(&Money::from_minor(
                -summary.discount.to_minor_units(),
                summary.discount.currency(),
            )),
        });

        Self {
            subtotal: format_amount(&summary.subtotal),
            discount,
            total: format_amount(&summary.total),
        }
    }
}

/// Cart page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartView {
    /// Nothing in the cart. There is no pricing block.
    Empty {
        /// Ways out
        actions: [PageAction; 2],
    },

    /// Lines plus pricing
    Items {
        /// Lines in insertion order
        lines: Vec<CartLineView>,

        /// Pricing block
        pricing: PricingView,

        /// Σ quantity
        item_count: u64,
    },
}

impl CartView {
    /// Build the cart page.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if totals cannot be derived.
    pub fn build(cart: &Cart, policy: &PricingPolicy) -> Result<Self, PricingError> {
        if cart.is_empty() {
            return Ok(CartView::Empty {
                actions: EMPTY_CART_ACTIONS,
            });
        }

        let summary = cart.pricing(policy)?;

        Ok(CartView::Items {
            lines: cart
                .iter()
                .map(CartLineView::new)
                .collect::<Result<_, _>>()?,
            pricing: PricingView::new(&summary, policy),
            item_count: cart.item_count(),
        })
    }
}

/// Course listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingView<'a> {
    /// Matching courses in display order
    pub courses: Vec<&'a Course>,

    /// "Showing N of M courses"
    pub summary: String,

    /// Whether "Clear Filters" should be offered
    pub clear_filters: bool,
}

impl<'a> ListingView<'a> {
    /// Build the listing page.
    pub fn build(catalog: &'a Catalog, query: &ListingQuery) -> Self {
        let listing = Listing::build(catalog, query);

        let summary = format!("Showing {} of {} courses", listing.len(), catalog.len());

        Self {
            clear_filters: listing.is_empty() && query.is_filtered(),
            courses: listing.courses().to_vec(),
            summary,
        }
    }

    /// Whether nothing matched.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// One receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineView {
    /// Course title
    pub title: String,

    /// Duration label
    pub duration: String,

    /// Seats
    pub quantity: u32,

    /// Unit price
    pub price: String,
}

/// Order confirmation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptView {
    /// Payment reference
    pub reference: String,

    /// Where course details are sent
    pub email: String,

    /// Purchased courses
    pub lines: Vec<ReceiptLineView>,

    /// Pricing block
    pub pricing: PricingView,

    /// "Total Paid"
    pub total_paid: String,
}

impl ReceiptView {
    /// Build the confirmation page.
    pub fn new(receipt: &OrderReceipt, policy: &PricingPolicy) -> Self {
        let lines = receipt
            .lines
            .iter()
            .map(|entry| ReceiptLineView {
                title: entry.course().title().to_string(),
                duration: entry.course().duration().to_string(),
                quantity: entry.quantity(),
                price: format_price(entry.course().price()),
            })
            .collect();

        Self {
            reference: receipt.reference.clone(),
            email: receipt.email.clone(),
            lines,
            pricing: PricingView::new(&receipt.pricing, policy),
            total_paid: format_amount(&receipt.pricing.total),
        }
    }
}
