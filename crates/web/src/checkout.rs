//! Checkout page: form, login prompt, payment and receipt.

use ilearning::prelude::{CartView, CheckoutField, Page, ReceiptView, Storefront};
use leptos::{ev::SubmitEvent, prelude::*};

use crate::{cart::PricingBlock, forms::AuthForm, shop::Shop};

/// Form sections in display order.
pub const SECTIONS: [(&str, &[CheckoutField]); 3] = [
    (
        "Contact Information",
        &[
            CheckoutField::Email,
            CheckoutField::FirstName,
            CheckoutField::LastName,
        ],
    ),
    (
        "Payment Details",
        &[
            CheckoutField::CardNumber,
            CheckoutField::ExpiryDate,
            CheckoutField::Cvv,
        ],
    ),
    (
        "Billing Address",
        &[
            CheckoutField::BillingAddress,
            CheckoutField::City,
            CheckoutField::Country,
            CheckoutField::PostalCode,
        ],
    ),
];

#[component]
fn CheckoutInput(shop: Shop, field: CheckoutField) -> impl IntoView {
    let processing = move || shop.store.with(|store| store.checkout().is_processing());

    view! {
        <label>
            {field.label()}
            <input
                name=field.key()
                placeholder=field.placeholder()
                disabled=processing
                prop:value=move || {
                    shop.store.with(|store| store.checkout().form().get(field).to_string())
                }
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    shop.act(|store| store.set_checkout_field(field, value));
                }
            />
        </label>
    }
}

#[component]
fn AuthPrompt(shop: Shop) -> impl IntoView {
    view! {
        <div class="modal" role="dialog" aria-modal="true" aria-label="Log in to continue">
            <div class="modal-body">
                <p>"Please log in to complete your purchase"</p>
                <AuthForm shop=shop />
                <button
                    type="button"
                    class="link"
                    on:click=move |_| shop.act(Storefront::dismiss_auth_prompt)
                >
                    "Cancel"
                </button>
            </div>
        </div>
    }
}

#[component]
fn OrderSummary(shop: Shop) -> impl IntoView {
    view! {
        <aside class="order-summary">
            <h2>"Order Summary"</h2>
            {move || match shop.store.with(|store| store.cart_view()) {
                Ok(CartView::Items { lines, pricing, .. }) => {
                    view! {
                        <ul>
                            {lines
                                .into_iter()
                                .map(|line| {
                                    view! {
                                        <li>
                                            <span>{line.title} " × " {line.quantity}</span>
                                            <span>{line.line_total}</span>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                        <PricingBlock pricing=pricing />
                    }
                        .into_any()
                }
                Ok(CartView::Empty { .. }) => view! { <p>"Your cart is empty"</p> }.into_any(),
                Err(error) => view! { <p class="error">{error.to_string()}</p> }.into_any(),
            }}
        </aside>
    }
}

#[component]
fn CheckoutDetails(shop: Shop) -> impl IntoView {
    let processing = move || shop.store.with(|store| store.checkout().is_processing());
    let auth_prompt = move || shop.store.with(|store| store.checkout().auth_prompt());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        shop.pay();
    };

    view! {
        <div class="checkout-layout">
            <form class="checkout-form" on:submit=on_submit>
                {SECTIONS
                    .into_iter()
                    .map(|(heading, fields)| {
                        view! {
                            <fieldset>
                                <legend>{heading}</legend>
                                {fields
                                    .iter()
                                    .map(|field| view! { <CheckoutInput shop=shop field=*field /> })
                                    .collect_view()}
                            </fieldset>
                        }
                    })
                    .collect_view()}
                <button type="submit" class="button-primary" disabled=processing>
                    {move || if processing() { "Processing..." } else { "Complete Purchase" }}
                </button>
            </form>
            <OrderSummary shop=shop />
            {move || auth_prompt().then(|| view! { <AuthPrompt shop=shop /> })}
        </div>
    }
}

/// Confirmation after a successful payment.
#[component]
pub fn Receipt(shop: Shop, receipt: ReceiptView) -> impl IntoView {
    view! {
        <div class="receipt">
            <h2>"Payment Successful!"</h2>
            <p>{format!("Order reference {}", receipt.reference)}</p>
            <p>{format!("A confirmation has been sent to {}", receipt.email)}</p>
            <ul>
                {receipt
                    .lines
                    .into_iter()
                    .map(|line| {
                        view! {
                            <li>
                                <span>{line.title}</span>
                                <span>{line.duration}</span>
                                <span>{format!("× {}", line.quantity)}</span>
                                <span>{line.price}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <PricingBlock pricing=receipt.pricing />
            <p class="total-paid">{format!("Total paid: {}", receipt.total_paid)}</p>
            <button type="button" class="button-primary" on:click=move |_| shop.navigate(Page::Courses)>
                "Browse More Courses"
            </button>
        </div>
    }
}

/// Checkout page.
#[component]
pub fn CheckoutPage(shop: Shop) -> impl IntoView {
    let complete = Memo::new(move |_| shop.store.with(|store| store.checkout().receipt().is_some()));

    view! {
        <section class="page checkout-page">
            <h1>"Checkout"</h1>
            {move || {
                if complete.get() {
                    shop.store
                        .with_untracked(Storefront::receipt_view)
                        .map(|receipt| view! { <Receipt shop=shop receipt=receipt /> })
                        .into_any()
                } else {
                    view! { <CheckoutDetails shop=shop /> }.into_any()
                }
            }}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_cover_every_field_once() {
        let fields: Vec<CheckoutField> = SECTIONS
            .iter()
            .flat_map(|(_, fields)| fields.iter().copied())
            .collect();

        assert_eq!(fields.len(), CheckoutField::ALL.len());

        for field in CheckoutField::ALL {
            assert!(fields.contains(&field), "{field} is not rendered");
        }
    }
}
