//! Storefront
//!
//! The single application state. Every user interaction is a method here; failures become
//! error notices and leave the state as it was.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    auth::{AuthError, Credentials, Session},
    cart::{Cart, CartError, QuantityChange},
    catalog::Catalog,
    checkout::{Checkout, CheckoutError, CheckoutField, OrderReceipt, Submission},
    config::{ConfigError, StorefrontConfig},
    contact::{ContactError, ContactField, ContactForm},
    courses::{Course, CourseId},
    fixtures::FixtureError,
    listing::ListingQuery,
    navigation::{Navigator, Page, Screen},
    notices::{self, Notice, NoticeQueue},
    payment::{
        OrderId, PaymentConfirmation, PaymentError, PaymentGateway, PaymentRequest,
        SimulatedGateway, Timer,
    },
    pricing::PricingError,
    views::{CartView, ListingView, ReceiptView},
};

/// Errors raised while assembling a storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration was invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The catalog fixture was invalid.
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Catalog and configuration disagree on currency (catalog, config).
    #[error("catalog is priced in {0}, but the store uses {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// Storefront
#[derive(Debug, Clone)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Cart,
    navigator: Navigator,
    session: Session,
    checkout: Checkout,
    listing: ListingQuery,
    contact: ContactForm,
    notices: NoticeQueue,
}

impl Storefront {
    /// A storefront over a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::CurrencyMismatch`] if the catalog is priced in another currency.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StorefrontError> {
        if catalog.currency() != config.currency {
            return Err(StorefrontError::CurrencyMismatch(
                catalog.currency().iso_alpha_code,
                config.currency.iso_alpha_code,
            ));
        }

        let session = Session::default();

        Ok(Self {
            cart: Cart::new(config.currency),
            checkout: Checkout::new(session.is_logged_in()),
            config,
            catalog,
            navigator: Navigator::new(),
            session,
            listing: ListingQuery::default(),
            contact: ContactForm::default(),
            notices: NoticeQueue::new(),
        })
    }

    /// The bundled configuration and reference catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`StorefrontError`] if a bundled fixture is invalid.
    pub fn reference() -> Result<Self, StorefrontError> {
        Self::new(StorefrontConfig::bundled()?, Catalog::reference()?)
    }

    /// Configuration.
    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Navigator.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Current page.
    pub fn current_page(&self) -> Page {
        self.navigator.current()
    }

    /// Session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Current checkout.
    pub fn checkout(&self) -> &Checkout {
        &self.checkout
    }

    /// Listing query.
    pub fn listing_query(&self) -> &ListingQuery {
        &self.listing
    }

    /// Contact form.
    pub fn contact_form(&self) -> &ContactForm {
        &self.contact
    }

    /// Pending notices.
    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    /// Distinct courses in the cart, for the header badge.
    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }

    /// What to render.
    pub fn screen(&self) -> Screen<'_> {
        self.navigator.screen(self.checkout.auth_prompt())
    }

    /// Cart page.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if totals overflow.
    pub fn cart_view(&self) -> Result<CartView, PricingError> {
        CartView::build(&self.cart, &self.config.pricing)
    }

    /// Course listing page.
    pub fn listing_view(&self) -> ListingView<'_> {
        ListingView::build(&self.catalog, &self.listing)
    }

    /// Order confirmation, once the checkout is complete.
    pub fn receipt_view(&self) -> Option<ReceiptView> {
        self.checkout
            .receipt()
            .map(|receipt| ReceiptView::new(receipt, &self.config.pricing))
    }

    /// A simulated gateway using the configured delay.
    pub fn simulated_gateway<T: Timer>(&self, timer: T) -> SimulatedGateway<T> {
        SimulatedGateway::with_delay(timer, self.config.checkout.processing_delay)
    }

    /// Add a course to the cart.
    pub fn add_to_cart(&mut self, id: CourseId) -> bool {
        let Some(course) = self.find_course(id) else {
            return false;
        };

        match self.cart.add(course) {
            Ok(()) => {
                debug!(course = %id, "added to cart");

                self.notices.success(notices::ADDED_TO_CART);

                true
            }
            Err(error) => self.reject(&error),
        }
    }

    /// Put a course in the cart if it is not there yet, then go to checkout.
    pub fn enroll_now(&mut self, id: CourseId) {
        let Some(course) = self.find_course(id) else {
            return;
        };

        if !self.cart.contains(id) {
            if let Err(error) = self.cart.add(course) {
                self.reject(&error);

                return;
            }

            debug!(course = %id, "added to cart for enrolment");
        }

        self.navigate(Page::Checkout);
    }

    /// Remove a course from the cart. Missing courses are ignored.
    pub fn remove_from_cart(&mut self, id: CourseId) {
        if self.cart.remove(id).is_some() {
            debug!(course = %id, "removed from cart");

            self.notices.success(notices::REMOVED_FROM_CART);
        }
    }

    /// Set a cart quantity; below one removes the course.
    pub fn update_quantity(&mut self, id: CourseId, quantity: i64) {
        match self.cart.set_quantity(id, quantity) {
            Ok(QuantityChange::Removed) => {
                debug!(course = %id, "removed from cart by quantity");

                self.notices.success(notices::REMOVED_FROM_CART);
            }
            Ok(QuantityChange::Updated(quantity)) => {
                debug!(course = %id, quantity, "quantity updated");
            }
            Ok(QuantityChange::NotInCart) => {}
            Err(error) => {
                self.reject(&error);
            }
        }
    }

    /// Go to a page. Entering checkout starts a fresh checkout; entering the listing or contact
    /// page resets that page's form.
    pub fn navigate(&mut self, page: Page) {
        if page != self.navigator.current() {
            self.enter(page);
        }

        self.navigator.navigate(page);
    }

    /// Show a course's detail page.
    pub fn open_course(&mut self, id: CourseId) {
        let Some(course) = self.find_course(id) else {
            return;
        };

        self.navigator.open_course(&course);
    }

    /// Log in. From the auth page this returns home; from the checkout prompt it stays put.
    pub fn log_in(&mut self, credentials: &Credentials) -> bool {
        if let Err(error) = self.session.log_in(credentials) {
            return self.reject(&error);
        }

        self.checkout.authenticated();
        self.notices.success(notices::LOGGED_IN);

        if self.navigator.current() == Page::Auth {
            self.navigate(Page::Home);
        }

        true
    }

    /// Log out. The profile page is left for home.
    pub fn log_out(&mut self) {
        self.session.log_out();
        self.notices.info(notices::LOGGED_OUT);

        if self.navigator.current() == Page::Profile {
            self.navigate(Page::Home);
        }
    }

    /// Replace the listing query.
    pub fn set_listing_query(&mut self, query: ListingQuery) {
        self.listing = query;
    }

    /// Clear listing search and filters.
    pub fn clear_filters(&mut self) {
        self.listing.clear();
    }

    /// Update a checkout field.
    pub fn set_checkout_field(&mut self, field: CheckoutField, value: impl Into<String>) {
        if let Err(error) = self.checkout.set_field(field, value) {
            self.reject(&error);
        }
    }

    /// Close the checkout login prompt.
    pub fn dismiss_auth_prompt(&mut self) {
        self.checkout.dismiss_auth_prompt();
    }

    /// Submit the checkout. Returns the payment to charge when processing starts.
    pub fn submit_checkout(&mut self) -> Option<PaymentRequest> {
        let submission =
            self.checkout
                .submit(self.session.is_logged_in(), &self.cart, &self.config.pricing);

        match submission {
            Ok(Submission::Processing(request)) => Some(request),
            Ok(Submission::AuthenticationRequired) => {
                self.notices.info(notices::LOG_IN_TO_CHECKOUT);

                None
            }
            Err(error) => {
                self.reject(&error);

                None
            }
        }
    }

    /// Apply the gateway's answer for `order`. Results for a checkout that is no longer
    /// processing that order are dropped.
    pub fn finish_checkout(
        &mut self,
        order: OrderId,
        result: Result<PaymentConfirmation, PaymentError>,
    ) -> Option<OrderReceipt> {
        match self.checkout.finish(order, result) {
            Ok(receipt) => {
                self.notices.success(notices::PAYMENT_SUCCESSFUL);

                Some(receipt)
            }
            Err(CheckoutError::NotProcessing | CheckoutError::StaleResult(_)) => {
                debug!(%order, "dropping payment result for an order that is not being processed");

                None
            }
            Err(error) => {
                self.reject(&error);

                None
            }
        }
    }

    /// Submit, charge and finish in one go.
    pub async fn complete_checkout<G: PaymentGateway + ?Sized>(
        &mut self,
        gateway: &G,
    ) -> Option<OrderReceipt> {
        let request = self.submit_checkout()?;

        let result = gateway.charge(&request).await;

        self.finish_checkout(request.order, result)
    }

    /// Update a contact field.
    pub fn set_contact_field(&mut self, field: ContactField, value: impl Into<String>) {
        self.contact.set(field, value);
    }

    /// Send the contact form.
    pub fn submit_contact(&mut self) -> bool {
        match self.contact.submit() {
            Ok(sent) => {
                debug!(subject = %sent.subject, "contact message sent");

                self.notices.success(notices::MESSAGE_SENT);

                true
            }
            Err(error) => self.reject(&error),
        }
    }

    /// Drain pending notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    fn enter(&mut self, page: Page) {
        match page {
            Page::Checkout => self.checkout = self.checkout.fresh(self.session.is_logged_in()),
            Page::Courses => self.listing = ListingQuery::default(),
            Page::Contact => self.contact = ContactForm::default(),
            _ => {}
        }
    }

    fn find_course(&mut self, id: CourseId) -> Option<Course> {
        let course = self.catalog.get(id).cloned();

        if course.is_none() {
            warn!(course = %id, "unknown course");

            self.notices.error(notices::COURSE_NOT_FOUND);
        }

        course
    }

    fn reject(&mut self, error: &dyn Rejection) -> bool {
        warn!(%error, "action rejected");

        self.notices.error(error.notice());

        false
    }
}

/// An error that can be shown to the user as a notice.
trait Rejection: std::fmt::Display {
    fn notice(&self) -> String {
        self.to_string()
    }
}

impl Rejection for CartError {
    fn notice(&self) -> String {
        match self {
            CartError::AlreadyInCart(_) => notices::ALREADY_IN_CART.to_string(),
            CartError::CurrencyMismatch(..) | CartError::QuantityOutOfRange(_) => self.to_string(),
        }
    }
}

impl Rejection for CheckoutError {
    fn notice(&self) -> String {
        match self {
            CheckoutError::MissingFields(_) => notices::FILL_IN_ALL_FIELDS.to_string(),
            CheckoutError::EmptyCart => notices::CART_EMPTY.to_string(),
            _ => self.to_string(),
        }
    }
}

impl Rejection for AuthError {
    fn notice(&self) -> String {
        notices::FILL_IN_ALL_FIELDS.to_string()
    }
}

impl Rejection for ContactError {
    fn notice(&self) -> String {
        notices::FILL_IN_ALL_FIELDS.to_string()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::notices::Severity;

    use super::*;

    fn messages(store: &mut Storefront) -> Vec<(Severity, String)> {
        store
            .take_notices()
            .into_iter()
            .map(|notice| (notice.severity, notice.message))
            .collect()
    }

    #[test]
    fn reference_store_starts_home_with_empty_cart() -> TestResult {
        let store = Storefront::reference()?;

        assert_eq!(store.current_page(), Page::Home);
        assert_eq!(store.cart_count(), 0);
        assert!(!store.session().is_logged_in());
        assert_eq!(store.screen(), Screen::Home);

        Ok(())
    }

    #[test]
    fn duplicate_add_raises_error_notice() -> TestResult {
        let mut store = Storefront::reference()?;

        assert!(store.add_to_cart(CourseId(1)));
        assert!(!store.add_to_cart(CourseId(1)));

        assert_eq!(store.cart_count(), 1);
        assert_eq!(
            messages(&mut store),
            vec![
                (Severity::Success, notices::ADDED_TO_CART.to_string()),
                (Severity::Error, notices::ALREADY_IN_CART.to_string()),
            ]
        );

        Ok(())
    }

    #[test]
    fn unknown_course_is_reported() -> TestResult {
        let mut store = Storefront::reference()?;

        assert!(!store.add_to_cart(CourseId(404)));
        store.open_course(CourseId(404));

        assert_eq!(store.current_page(), Page::Home);
        assert_eq!(store.notices().len(), 2);

        Ok(())
    }

    #[test]
    fn enroll_now_adds_once_and_goes_to_checkout() -> TestResult {
        let mut store = Storefront::reference()?;
        store.add_to_cart(CourseId(3));
        store.take_notices();

        store.enroll_now(CourseId(3));

        assert_eq!(store.cart_count(), 1);
        assert_eq!(store.current_page(), Page::Checkout);
        assert!(store.notices().is_empty());

        Ok(())
    }

    #[test]
    fn quantity_below_one_removes_with_notice() -> TestResult {
        let mut store = Storefront::reference()?;
        store.add_to_cart(CourseId(1));
        store.add_to_cart(CourseId(5));
        store.take_notices();

        store.update_quantity(CourseId(1), 3);
        store.update_quantity(CourseId(5), 0);

        assert_eq!(store.cart_count(), 1);
        assert_eq!(store.cart().item_count(), 3);
        assert_eq!(
            messages(&mut store),
            vec![(Severity::Success, notices::REMOVED_FROM_CART.to_string())]
        );

        Ok(())
    }

    #[test]
    fn entering_courses_resets_listing_query() -> TestResult {
        let mut store = Storefront::reference()?;
        store.navigate(Page::Courses);
        store.set_listing_query(ListingQuery {
            search: "sigma".to_string(),
            ..ListingQuery::default()
        });

        assert_eq!(store.listing_view().courses.len(), 2);

        store.navigate(Page::Courses);
        assert_eq!(store.listing_query().search, "sigma");

        store.navigate(Page::Home);
        store.navigate(Page::Courses);

        assert_eq!(store.listing_query(), &ListingQuery::default());

        Ok(())
    }

    #[test]
    fn entering_contact_resets_form() -> TestResult {
        let mut store = Storefront::reference()?;
        store.navigate(Page::Contact);
        store.set_contact_field(ContactField::Name, "Ada");

        store.navigate(Page::About);
        store.navigate(Page::Contact);

        assert_eq!(store.contact_form(), &ContactForm::default());

        Ok(())
    }

    #[test]
    fn contact_submission_notices() -> TestResult {
        let mut store = Storefront::reference()?;

        assert!(!store.submit_contact());

        for field in ContactField::ALL {
            store.set_contact_field(field, "filled");
        }

        assert!(store.submit_contact());
        assert_eq!(
            messages(&mut store),
            vec![
                (Severity::Error, notices::FILL_IN_ALL_FIELDS.to_string()),
                (Severity::Success, notices::MESSAGE_SENT.to_string()),
            ]
        );
        assert_eq!(store.contact_form(), &ContactForm::default());

        Ok(())
    }

    #[test]
    fn log_in_from_auth_page_returns_home() -> TestResult {
        let mut store = Storefront::reference()?;
        store.navigate(Page::Auth);

        assert!(!store.log_in(&Credentials::new("", "")));
        assert_eq!(store.current_page(), Page::Auth);

        assert!(store.log_in(&Credentials::new("ada@example.com", "hunter2")));
        assert_eq!(store.current_page(), Page::Home);
        assert!(store.session().is_logged_in());

        store.navigate(Page::Profile);
        store.log_out();

        assert_eq!(store.current_page(), Page::Home);
        assert!(!store.session().is_logged_in());

        Ok(())
    }

    #[test]
    fn log_in_from_checkout_prompt_stays_on_checkout() -> TestResult {
        let mut store = Storefront::reference()?;
        store.add_to_cart(CourseId(1));
        store.navigate(Page::Checkout);

        assert_eq!(store.screen(), Screen::Checkout { auth_prompt: true });

        store.log_in(&Credentials::new("ada@example.com", "hunter2"));

        assert_eq!(store.screen(), Screen::Checkout { auth_prompt: false });

        Ok(())
    }

    #[test]
    fn stale_payment_result_is_ignored() -> TestResult {
        let mut store = Storefront::reference()?;
        store.take_notices();

        let receipt = store.finish_checkout(OrderId(1), Err(PaymentError::Unavailable));

        assert!(receipt.is_none());
        assert!(store.notices().is_empty());

        Ok(())
    }

    #[test]
    fn catalog_currency_must_match_config() -> TestResult {
        let config = StorefrontConfig {
            currency: rusty_money::iso::GBP,
            ..StorefrontConfig::default()
        };

        let result = Storefront::new(config, Catalog::reference()?);

        assert!(matches!(
            result,
            Err(StorefrontError::CurrencyMismatch("USD", "GBP"))
        ));

        Ok(())
    }
}
