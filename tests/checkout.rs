//! Integration tests for the checkout flow: authentication gate, form validation, simulated
//! payment and the order receipt.

use std::time::Duration;

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use ilearning::{
    notices,
    payment::MockPaymentGateway,
    prelude::{
        CheckoutField, CheckoutPhase, CourseId, Credentials, ImmediateTimer, Page,
        PaymentConfirmation, PaymentError, Screen, Severity, SimulatedGateway, Storefront,
    },
};

fn fill_form(store: &mut Storefront) {
    for field in CheckoutField::ALL {
        store.set_checkout_field(field, field.placeholder());
    }
}

fn store_at_checkout(logged_in: bool) -> TestResult<Storefront> {
    let mut store = Storefront::reference()?;

    if logged_in {
        store.log_in(&Credentials::new("ada@example.com", "hunter2"));
    }

    store.add_to_cart(CourseId(1));
    store.add_to_cart(CourseId(5));
    store.navigate(Page::Checkout);
    fill_form(&mut store);
    store.take_notices();

    Ok(store)
}

#[tokio::test]
async fn test_unauthenticated_submit_never_reaches_processing() -> TestResult {
    let mut gateway = MockPaymentGateway::new();
    gateway.expect_charge().never();

    let mut store = store_at_checkout(false)?;
    store.dismiss_auth_prompt();

    let receipt = store.complete_checkout(&gateway).await;

    assert!(receipt.is_none());
    assert_eq!(store.checkout().phase(), &CheckoutPhase::Editing);
    assert_eq!(store.screen(), Screen::Checkout { auth_prompt: true });

    let raised = store.take_notices();

    assert_eq!(
        raised
            .iter()
            .map(|notice| (notice.severity, notice.message.as_str()))
            .collect::<Vec<_>>(),
        vec![(Severity::Info, notices::LOG_IN_TO_CHECKOUT)]
    );

    Ok(())
}

#[tokio::test]
async fn test_logged_in_checkout_completes_with_receipt() -> TestResult {
    let mut store = store_at_checkout(true)?;
    let gateway = store.simulated_gateway(ImmediateTimer);

    assert_eq!(gateway.delay(), Duration::from_millis(2_000));

    let receipt = store
        .complete_checkout(&gateway)
        .await
        .ok_or("expected a receipt")?;

    // $750 + $1500 = $2250, less 10%
    assert_eq!(receipt.pricing.subtotal, Money::from_minor(225_000, USD));
    assert_eq!(receipt.pricing.total, Money::from_minor(202_500, USD));
    assert_eq!(receipt.reference, "SIM-000001");

    let view = store.receipt_view().ok_or("expected a receipt view")?;

    assert_eq!(view.total_paid, "$2,025");
    assert_eq!(view.email, "your@email.com");
    assert_eq!(view.lines.len(), 2);

    // The cart is left alone after payment.
    assert_eq!(store.cart_count(), 2);

    let raised = store.take_notices();

    assert_eq!(
        raised.last().map(|notice| notice.message.as_str()),
        Some(notices::PAYMENT_SUCCESSFUL)
    );

    Ok(())
}

#[tokio::test]
async fn test_missing_fields_block_submission() -> TestResult {
    let mut store = store_at_checkout(true)?;
    store.set_checkout_field(CheckoutField::CardNumber, " ");

    let gateway = SimulatedGateway::with_delay(ImmediateTimer, Duration::ZERO);

    assert!(store.complete_checkout(&gateway).await.is_none());
    assert!(!store.checkout().is_processing());

    let raised = store.take_notices();

    assert_eq!(
        raised.first().map(|notice| (notice.severity, notice.message.as_str())),
        Some((Severity::Error, notices::FILL_IN_ALL_FIELDS))
    );

    Ok(())
}

#[tokio::test]
async fn test_empty_cart_is_rejected_at_checkout() -> TestResult {
    let mut store = Storefront::reference()?;
    store.log_in(&Credentials::new("ada@example.com", "hunter2"));
    store.navigate(Page::Checkout);
    fill_form(&mut store);
    store.take_notices();

    let gateway = SimulatedGateway::with_delay(ImmediateTimer, Duration::ZERO);

    assert!(store.complete_checkout(&gateway).await.is_none());

    let raised = store.take_notices();

    assert_eq!(
        raised.first().map(|notice| notice.message.as_str()),
        Some(notices::CART_EMPTY)
    );

    Ok(())
}

#[tokio::test]
async fn test_declined_payment_returns_to_editing() -> TestResult {
    let mut gateway = MockPaymentGateway::new();

    gateway
        .expect_charge()
        .once()
        .withf(|request| request.amount == Money::from_minor(202_500, USD))
        .returning(|_| Err(PaymentError::Declined("card expired".to_string())));

    let mut store = store_at_checkout(true)?;

    assert!(store.complete_checkout(&gateway).await.is_none());
    assert_eq!(store.checkout().phase(), &CheckoutPhase::Editing);
    assert_eq!(
        store.checkout().form().get(CheckoutField::Email),
        "your@email.com"
    );

    let raised = store.take_notices();

    assert_eq!(
        raised.first().map(|notice| notice.severity),
        Some(Severity::Error)
    );

    Ok(())
}

#[test]
fn test_second_submit_while_processing_is_rejected() -> TestResult {
    let mut store = store_at_checkout(true)?;

    let request = store.submit_checkout().ok_or("expected a payment request")?;

    assert_eq!(request.item_count, 2);
    assert!(store.submit_checkout().is_none());
    assert!(store.checkout().is_processing());

    Ok(())
}

#[test]
fn test_earlier_payment_cannot_complete_a_later_checkout() -> TestResult {
    let mut store = Storefront::reference()?;
    store.log_in(&Credentials::new("ada@example.com", "hunter2"));
    store.add_to_cart(CourseId(1));
    store.navigate(Page::Checkout);
    fill_form(&mut store);

    let first = store.submit_checkout().ok_or("expected a first payment request")?;

    assert_eq!(first.amount, Money::from_minor(75_000, USD));

    store.navigate(Page::Cart);
    store.add_to_cart(CourseId(3));
    store.navigate(Page::Checkout);
    fill_form(&mut store);

    let second = store.submit_checkout().ok_or("expected a second payment request")?;

    assert_ne!(first.order, second.order);
    store.take_notices();

    let late = PaymentConfirmation {
        order: first.order,
        reference: "SIM-000001".to_string(),
        amount: first.amount,
    };

    assert!(store.finish_checkout(first.order, Ok(late)).is_none());
    assert!(store.checkout().is_processing());
    assert!(store.take_notices().is_empty());

    let confirmation = PaymentConfirmation {
        order: second.order,
        reference: "SIM-000002".to_string(),
        amount: second.amount,
    };

    let receipt = store
        .finish_checkout(second.order, Ok(confirmation))
        .ok_or("expected a receipt for the second order")?;

    // $750 + $750 = $1500, less 10%
    assert_eq!(receipt.pricing.total, Money::from_minor(135_000, USD));
    assert_eq!(receipt.pricing.total, second.amount);
    assert_eq!(receipt.reference, "SIM-000002");

    Ok(())
}

#[test]
fn test_returning_to_checkout_starts_fresh() -> TestResult {
    let mut store = store_at_checkout(true)?;

    store.navigate(Page::Cart);
    store.navigate(Page::Checkout);

    assert_eq!(store.checkout().form().get(CheckoutField::City), "");
    assert_eq!(store.screen(), Screen::Checkout { auth_prompt: false });

    Ok(())
}
