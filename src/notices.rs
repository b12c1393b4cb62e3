//! Notices
//!
//! Short-lived messages raised by storefront actions and drained by the UI as toasts.

use std::collections::VecDeque;

/// "Course added to cart!"
pub const ADDED_TO_CART: &str = "Course added to cart!";

/// "Course is already in your cart"
pub const ALREADY_IN_CART: &str = "Course is already in your cart";

/// "Course removed from cart"
pub const REMOVED_FROM_CART: &str = "Course removed from cart";

/// "Course not found"
pub const COURSE_NOT_FOUND: &str = "Course not found";

/// "Payment successful! Welcome to your courses!"
pub const PAYMENT_SUCCESSFUL: &str = "Payment successful! Welcome to your courses!";

/// "Please fill in all fields"
pub const FILL_IN_ALL_FIELDS: &str = "Please fill in all fields";

/// "Please log in to complete your purchase"
pub const LOG_IN_TO_CHECKOUT: &str = "Please log in to complete your purchase";

/// "Your cart is empty"
pub const CART_EMPTY: &str = "Your cart is empty";

/// "Welcome back!"
pub const LOGGED_IN: &str = "Welcome back!";

/// "You have been logged out"
pub const LOGGED_OUT: &str = "You have been logged out";

/// "Message sent successfully! We'll get back to you within 24 hours."
pub const MESSAGE_SENT: &str = "Message sent successfully! We'll get back to you within 24 hours.";

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Something worked
    Success,

    /// Something was rejected
    Error,

    /// Neutral information
    Info,
}

impl Severity {
    /// CSS-friendly name.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Info => "info",
        }
    }
}

/// Notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Queue-assigned id, increasing
    pub id: u64,

    /// Severity
    pub severity: Severity,

    /// Message text
    pub message: String,
}

/// Pending notices in raise order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
    next_id: u64,
}

impl NoticeQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise a notice, returning its id.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u64 {
        self.next_id += 1;

        let id = self.next_id;

        self.pending.push_back(Notice {
            id,
            severity,
            message: message.into(),
        });

        id
    }

    /// Raise a success notice.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(Severity::Success, message)
    }

    /// Raise an error notice.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(Severity::Error, message)
    }

    /// Raise an info notice.
    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(Severity::Info, message)
    }

    /// Pending notices, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.pending.iter()
    }

    /// Most recent notice.
    pub fn last(&self) -> Option<&Notice> {
        self.pending.back()
    }

    /// Number of pending notices.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every pending notice. Ids keep increasing afterwards.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.pending.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_across_drains() {
        let mut queue = NoticeQueue::new();

        let first = queue.success(ADDED_TO_CART);
        let second = queue.error(ALREADY_IN_CART);
        let drained = queue.drain();

        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert!(second > first);

        let third = queue.info(REMOVED_FROM_CART);

        assert!(third > second);
    }

    #[test]
    fn drain_keeps_raise_order() {
        let mut queue = NoticeQueue::new();

        queue.success(ADDED_TO_CART);
        queue.error(FILL_IN_ALL_FIELDS);

        let messages: Vec<(Severity, String)> = queue
            .drain()
            .into_iter()
            .map(|notice| (notice.severity, notice.message))
            .collect();

        assert_eq!(
            messages,
            vec![
                (Severity::Success, ADDED_TO_CART.to_string()),
                (Severity::Error, FILL_IN_ALL_FIELDS.to_string()),
            ]
        );
    }

    #[test]
    fn last_is_most_recent() {
        let mut queue = NoticeQueue::new();

        queue.success(ADDED_TO_CART);
        queue.info(REMOVED_FROM_CART);

        assert_eq!(
            queue.last().map(|notice| notice.message.as_str()),
            Some(REMOVED_FROM_CART)
        );
        assert_eq!(Severity::Info.as_str(), "info");
    }
}
