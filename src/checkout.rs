//! Checkout
//!
//! One [`Checkout`] lives for one visit to the checkout page. It moves from editing, through
//! processing while a payment is in flight, to a terminal complete state holding the receipt.
//! The cart is never modified here.

use std::{fmt, str::FromStr};

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartEntry},
    payment::{OrderId, PaymentConfirmation, PaymentError, PaymentGateway, PaymentRequest},
    pricing::{PricingError, PricingPolicy, PricingSummary},
};

/// Errors raised by checkout transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// A payment is already in flight or the order is complete.
    #[error("checkout has already been submitted")]
    AlreadySubmitted,

    /// Nothing to pay for.
    #[error("cart is empty")]
    EmptyCart,

    /// Required fields were blank.
    #[error("missing required fields: {}", field_list(.0))]
    MissingFields(Vec<CheckoutField>),

    /// A payment result arrived while no payment was in flight.
    #[error("no payment is being processed")]
    NotProcessing,

    /// A payment result belongs to an earlier submission.
    #[error("payment result for {0} does not match the order being processed")]
    StaleResult(OrderId),

    /// The gateway charged a different amount than the order total (minor units).
    #[error("charged {charged} but the order total is {expected}")]
    ChargeMismatch {
        /// Order total
        expected: i64,
        /// Amount the gateway reported
        charged: i64,
    },

    /// The gateway refused the charge.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// The cart total could not be derived.
    #[error(transparent)]
    Pricing(#[from] PricingError),
}

fn field_list(fields: &[CheckoutField]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A name that is not a checkout field.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown checkout field: {0}")]
pub struct UnknownField(pub String);

/// Checkout form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutField {
    /// Email address
    Email,

    /// First name
    FirstName,

    /// Last name
    LastName,

    /// Card number
    CardNumber,

    /// Card expiry date
    ExpiryDate,

    /// Card verification value
    Cvv,

    /// Billing street address
    BillingAddress,

    /// City
    City,

    /// Country
    Country,

    /// Postal code
    PostalCode,
}

impl CheckoutField {
    /// Every field, in form order.
    pub const ALL: [CheckoutField; 10] = [
        CheckoutField::Email,
        CheckoutField::FirstName,
        CheckoutField::LastName,
        CheckoutField::CardNumber,
        CheckoutField::ExpiryDate,
        CheckoutField::Cvv,
        CheckoutField::BillingAddress,
        CheckoutField::City,
        CheckoutField::Country,
        CheckoutField::PostalCode,
    ];

    /// Input name.
    pub fn key(self) -> &'static str {
        match self {
            CheckoutField::Email => "email",
            CheckoutField::FirstName => "first-name",
            CheckoutField::LastName => "last-name",
            CheckoutField::CardNumber => "card-number",
            CheckoutField::ExpiryDate => "expiry-date",
            CheckoutField::Cvv => "cvv",
            CheckoutField::BillingAddress => "billing-address",
            CheckoutField::City => "city",
            CheckoutField::Country => "country",
            CheckoutField::PostalCode => "postal-code",
        }
    }

    /// Input label.
    pub fn label(self) -> &'static str {
        match self {
            CheckoutField::Email => "Email Address",
            CheckoutField::FirstName => "First Name",
            CheckoutField::LastName => "Last Name",
            CheckoutField::CardNumber => "Card Number",
            CheckoutField::ExpiryDate => "Expiry Date",
            CheckoutField::Cvv => "CVV",
            CheckoutField::BillingAddress => "Address",
            CheckoutField::City => "City",
            CheckoutField::Country => "Country",
            CheckoutField::PostalCode => "Postal Code",
        }
    }

    /// Example input.
    pub fn placeholder(self) -> &'static str {
        match self {
            CheckoutField::Email => "your@email.com",
            CheckoutField::FirstName => "John",
            CheckoutField::LastName => "Doe",
            CheckoutField::CardNumber => "1234 5678 9012 3456",
            CheckoutField::ExpiryDate => "MM/YY",
            CheckoutField::Cvv => "123",
            CheckoutField::BillingAddress => "123 Main Street",
            CheckoutField::City => "Sydney",
            CheckoutField::Country => "Australia",
            CheckoutField::PostalCode => "2000",
        }
    }
}

impl FromStr for CheckoutField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CheckoutField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checkout form values. Only presence is checked; card details are never validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    email: String,
    first_name: String,
    last_name: String,
    card_number: String,
    expiry_date: String,
    cvv: String,
    billing_address: String,
    city: String,
    country: String,
    postal_code: String,
}

impl CheckoutForm {
    /// Current value of a field.
    pub fn get(&self, field: CheckoutField) -> &str {
        match field {
            CheckoutField::Email => &self.email,
            CheckoutField::FirstName => &self.first_name,
            CheckoutField::LastName => &self.last_name,
            CheckoutField::CardNumber => &self.card_number,
            CheckoutField::ExpiryDate => &self.expiry_date,
            CheckoutField::Cvv => &self.cvv,
            CheckoutField::BillingAddress => &self.billing_address,
            CheckoutField::City => &self.city,
            CheckoutField::Country => &self.country,
            CheckoutField::PostalCode => &self.postal_code,
        }
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: CheckoutField, value: impl Into<String>) {
        let slot = match field {
            CheckoutField::Email => &mut self.email,
            CheckoutField::FirstName => &mut self.first_name,
            CheckoutField::LastName => &mut self.last_name,
            CheckoutField::CardNumber => &mut self.card_number,
            CheckoutField::ExpiryDate => &mut self.expiry_date,
            CheckoutField::Cvv => &mut self.cvv,
            CheckoutField::BillingAddress => &mut self.billing_address,
            CheckoutField::City => &mut self.city,
            CheckoutField::Country => &mut self.country,
            CheckoutField::PostalCode => &mut self.postal_code,
        };

        *slot = value.into();
    }

    /// Fields that are blank after trimming, in form order.
    pub fn missing_fields(&self) -> Vec<CheckoutField> {
        CheckoutField::ALL
            .into_iter()
            .filter(|field| self.get(*field).trim().is_empty())
            .collect()
    }

    /// "First Last", trimmed.
    pub fn cardholder(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

/// A completed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderReceipt {
    /// Cart entries at the time of payment
    pub lines: Vec<CartEntry>,

    /// Totals at the time of payment
    pub pricing: PricingSummary,

    /// Gateway reference
    pub reference: String,

    /// Receipt email
    pub email: String,
}

/// Checkout phase.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutPhase {
    /// Form is editable
    Editing,

    /// Payment in flight
    Processing,

    /// Order finished; terminal
    Complete(OrderReceipt),
}

/// Result of a submit attempt that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// The user must log in first; the inline prompt is now shown.
    AuthenticationRequired,

    /// Processing started; charge this request and pass the result to [`Checkout::finish`].
    Processing(PaymentRequest),
}

#[derive(Debug, Clone, PartialEq)]
struct PendingOrder {
    order: OrderId,
    lines: Vec<CartEntry>,
    pricing: PricingSummary,
    email: String,
}

/// Checkout
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    form: CheckoutForm,
    phase: CheckoutPhase,
    auth_prompt: bool,
    pending: Option<PendingOrder>,
    last_order: OrderId,
}

impl Checkout {
    /// Start a checkout. The login prompt is shown straight away for anonymous visitors.
    pub fn new(authenticated: bool) -> Self {
        Self {
            form: CheckoutForm::default(),
            phase: CheckoutPhase::Editing,
            auth_prompt: !authenticated,
            pending: None,
            last_order: OrderId::default(),
        }
    }

    /// A new checkout that keeps numbering orders after this one, so results addressed to
    /// this instance are never mistaken for the new one's.
    #[must_use]
    pub fn fresh(&self, authenticated: bool) -> Self {
        Self {
            last_order: self.last_order,
            ..Self::new(authenticated)
        }
    }

    /// Form values.
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Current phase.
    pub fn phase(&self) -> &CheckoutPhase {
        &self.phase
    }

    /// Whether a payment is in flight.
    pub fn is_processing(&self) -> bool {
        matches!(self.phase, CheckoutPhase::Processing)
    }

    /// Receipt, once complete.
    pub fn receipt(&self) -> Option<&OrderReceipt> {
        match &self.phase {
            CheckoutPhase::Complete(receipt) => Some(receipt),
            CheckoutPhase::Editing | CheckoutPhase::Processing => None,
        }
    }

    /// Whether the inline login prompt is shown.
    pub fn auth_prompt(&self) -> bool {
        self.auth_prompt
    }

    /// The user logged in from the prompt; hide it and stay on the page.
    pub fn authenticated(&mut self) {
        self.auth_prompt = false;
    }

    /// Close the prompt without logging in.
    pub fn dismiss_auth_prompt(&mut self) {
        self.auth_prompt = false;
    }

    /// Update a form field.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadySubmitted`] once the form has been submitted.
    pub fn set_field(
        &mut self,
        field: CheckoutField,
        value: impl Into<String>,
    ) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::Editing {
            return Err(CheckoutError::AlreadySubmitted);
        }

        self.form.set(field, value);

        Ok(())
    }

    /// Submit the form.
    ///
    /// Anonymous submissions show the login prompt and return
    /// [`Submission::AuthenticationRequired`] without touching the phase.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::AlreadySubmitted`]: not in the editing phase.
    /// - [`CheckoutError::EmptyCart`]: nothing to pay for.
    /// - [`CheckoutError::MissingFields`]: some fields are blank.
    /// - [`CheckoutError::Pricing`]: the total could not be derived.
    pub fn submit(
        &mut self,
        authenticated: bool,
        cart: &Cart,
        policy: &PricingPolicy,
    ) -> Result<Submission, CheckoutError> {
        if self.phase != CheckoutPhase::Editing {
            warn!("checkout submitted twice");

            return Err(CheckoutError::AlreadySubmitted);
        }

        if !authenticated {
            debug!("checkout needs authentication");

            self.auth_prompt = true;

            return Ok(Submission::AuthenticationRequired);
        }

        if cart.is_empty() {
            warn!("checkout submitted with an empty cart");

            return Err(CheckoutError::EmptyCart);
        }

        let missing = self.form.missing_fields();

        if !missing.is_empty() {
            warn!(missing = missing.len(), "checkout form incomplete");

            return Err(CheckoutError::MissingFields(missing));
        }

        let pricing = cart.pricing(policy)?;
        let email = self.form.get(CheckoutField::Email).trim().to_string();

        let order = self.last_order.next();

        let request = PaymentRequest {
            order,
            amount: pricing.total,
            email: email.clone(),
            cardholder: self.form.cardholder(),
            item_count: cart.item_count(),
        };

        self.last_order = order;
        self.pending = Some(PendingOrder {
            order,
            lines: cart.entries().to_vec(),
            pricing,
            email,
        });
        self.phase = CheckoutPhase::Processing;

        debug!(%order, total = pricing.total.to_minor_units(), "checkout processing");

        Ok(Submission::Processing(request))
    }

    /// Apply the gateway's answer for `order`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::NotProcessing`]: no payment was in flight.
    /// - [`CheckoutError::StaleResult`]: the result is for another submission; nothing changes.
    /// - [`CheckoutError::Payment`]: the charge failed; the form is editable again.
    /// - [`CheckoutError::ChargeMismatch`]: the charged amount differs from the order total; the
    ///   form is editable again.
    pub fn finish(
        &mut self,
        order: OrderId,
        result: Result<PaymentConfirmation, PaymentError>,
    ) -> Result<OrderReceipt, CheckoutError> {
        if !self.is_processing() {
            return Err(CheckoutError::NotProcessing);
        }

        let pending_order = self
            .pending
            .as_ref()
            .map(|pending| pending.order)
            .ok_or(CheckoutError::NotProcessing)?;

        if pending_order != order {
            return Err(CheckoutError::StaleResult(order));
        }

        if let Ok(confirmation) = &result {
            if confirmation.order != order {
                return Err(CheckoutError::StaleResult(confirmation.order));
            }
        }

        let pending = self.pending.take().ok_or(CheckoutError::NotProcessing)?;

        match result {
            Ok(confirmation) if confirmation.amount != pending.pricing.total => {
                warn!(
                    %order,
                    expected = pending.pricing.total.to_minor_units(),
                    charged = confirmation.amount.to_minor_units(),
                    "charged amount does not match order"
                );

                self.phase = CheckoutPhase::Editing;

                Err(CheckoutError::ChargeMismatch {
                    expected: pending.pricing.total.to_minor_units(),
                    charged: confirmation.amount.to_minor_units(),
                })
            }
            Ok(confirmation) => {
                let receipt = OrderReceipt {
                    lines: pending.lines,
                    pricing: pending.pricing,
                    reference: confirmation.reference,
                    email: pending.email,
                };

                debug!(%order, reference = %receipt.reference, "checkout complete");

                self.phase = CheckoutPhase::Complete(receipt.clone());

                Ok(receipt)
            }
            Err(error) => {
                warn!(%order, %error, "payment failed");

                self.phase = CheckoutPhase::Editing;

                Err(CheckoutError::Payment(error))
            }
        }
    }

    /// Submit, charge and finish in one go.
    ///
    /// Returns `Ok(None)` when the user must log in first.
    ///
    /// # Errors
    ///
    /// Any error from [`Checkout::submit`] or [`Checkout::finish`].
    pub async fn process<G: PaymentGateway + ?Sized>(
        &mut self,
        gateway: &G,
        authenticated: bool,
        cart: &Cart,
        policy: &PricingPolicy,
    ) -> Result<Option<OrderReceipt>, CheckoutError> {
        let request = match self.submit(authenticated, cart, policy)? {
            Submission::AuthenticationRequired => return Ok(None),
            Submission::Processing(request) => request,
        };

        let result = gateway.charge(&request).await;

        self.finish(request.order, result).map(Some)
    }
}
