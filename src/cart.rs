//! Cart

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    courses::{Course, CourseId},
    pricing::{PricingError, PricingPolicy, PricingSummary, derive_pricing},
};

/// Errors related to cart mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The course already has an entry; quantities change only through explicit updates.
    #[error("course {0} is already in the cart")]
    AlreadyInCart(CourseId),

    /// A course's currency differs from the cart currency (course, course currency, cart currency).
    #[error("course {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(CourseId, &'static str, &'static str),

    /// The requested quantity does not fit in a cart entry.
    #[error("quantity {0} is out of range")]
    QuantityOutOfRange(i64),
}

/// A course plus purchase quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CartEntry {
    course: Course,
    quantity: u32,
}

impl CartEntry {
    /// A new entry with quantity 1.
    pub fn new(course: Course) -> Self {
        Self {
            course,
            quantity: 1,
        }
    }

    /// The course
    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Result of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The entry now has this quantity.
    Updated(u32),

    /// The quantity fell below 1 and the entry was removed.
    Removed,

    /// No entry matched the course id.
    NotInCart,
}

/// Cart
///
/// Holds at most one entry per course id, in the order courses were added.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    entries: Vec<CartEntry>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            entries: Vec::new(),
            currency,
        }
    }

    /// Add a course with quantity 1.
    ///
    /// # Errors
    ///
    /// - [`CartError::AlreadyInCart`]: the course already has an entry; the cart is unchanged.
    /// - [`CartError::CurrencyMismatch`]: the course is priced in another currency.
    pub fn add(&mut self, course: Course) -> Result<(), CartError> {
        if self.contains(course.id()) {
            return Err(CartError::AlreadyInCart(course.id()));
        }

        if course.currency() != self.currency {
            return Err(CartError::CurrencyMismatch(
                course.id(),
                course.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.entries.push(CartEntry::new(course));

        Ok(())
    }

    /// Remove the entry for a course, returning it. No-op if absent.
    pub fn remove(&mut self, id: CourseId) -> Option<CartEntry> {
        let position = self.position(id)?;

        Some(self.entries.remove(position))
    }

    /// Set an entry's quantity; anything below 1 removes the entry.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOutOfRange`] if `quantity` exceeds what an entry can hold.
    pub fn set_quantity(&mut self, id: CourseId, quantity: i64) -> Result<QuantityChange, CartError> {
        if quantity < 1 {
            return Ok(match self.remove(id) {
                Some(_) => QuantityChange::Removed,
                None => QuantityChange::NotInCart,
            });
        }

        let quantity =
            u32::try_from(quantity).map_err(|_err| CartError::QuantityOutOfRange(quantity))?;

        let Some(entry) = self.entries.iter_mut().find(|entry| entry.course.id() == id) else {
            return Ok(QuantityChange::NotInCart);
        };

        entry.quantity = quantity;

        Ok(QuantityChange::Updated(quantity))
    }

    /// Increase an entry's quantity by one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOutOfRange`] if the entry is already at the maximum.
    pub fn increment(&mut self, id: CourseId) -> Result<QuantityChange, CartError> {
        let Some(quantity) = self.get(id).map(CartEntry::quantity) else {
            return Ok(QuantityChange::NotInCart);
        };

        self.set_quantity(id, i64::from(quantity) + 1)
    }

    /// Decrease an entry's quantity by one, removing it when it reaches zero.
    ///
    /// # Errors
    ///
    /// Never fails in practice; shares the signature of [`Cart::set_quantity`].
    pub fn decrement(&mut self, id: CourseId) -> Result<QuantityChange, CartError> {
        let Some(quantity) = self.get(id).map(CartEntry::quantity) else {
            return Ok(QuantityChange::NotInCart);
        };

        self.set_quantity(id, i64::from(quantity) - 1)
    }

    /// Whether a course has an entry.
    pub fn contains(&self, id: CourseId) -> bool {
        self.position(id).is_some()
    }

    /// The entry for a course.
    pub fn get(&self, id: CourseId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| entry.course.id() == id)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct courses.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total seats across all entries.
    pub fn item_count(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    /// Currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Derive subtotal, discount and total.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the totals overflow.
    pub fn pricing(&self, policy: &PricingPolicy) -> Result<PricingSummary, PricingError> {
        derive_pricing(&self.entries, self.currency, policy)
    }

    fn position(&self, id: CourseId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.course.id() == id)
    }
}
