//! Cart page.

use ilearning::prelude::{CartLineView, CartView, Page, PricingView};
use leptos::prelude::*;

use crate::shop::Shop;

#[component]
fn CartLine(shop: Shop, line: CartLineView) -> impl IntoView {
    let id = line.course_id;
    let quantity = i64::from(line.quantity);

    view! {
        <li class="cart-line">
            <div>
                <h3>{line.title}</h3>
                <p class="course-meta">{line.duration}</p>
                <p>{line.unit_price} " each"</p>
            </div>
            <div class="quantity">
                <button
                    type="button"
                    aria-label="Decrease quantity"
                    on:click=move |_| shop.act(|store| store.update_quantity(id, quantity - 1))
                >
                    "−"
                </button>
                <span>{line.quantity}</span>
                <button
                    type="button"
                    aria-label="Increase quantity"
                    on:click=move |_| shop.act(|store| store.update_quantity(id, quantity + 1))
                >
                    "+"
                </button>
            </div>
            <p class="line-total">{line.line_total}</p>
            <button
                type="button"
                class="remove"
                on:click=move |_| shop.act(|store| store.remove_from_cart(id))
            >
                "Remove"
            </button>
        </li>
    }
}

/// Subtotal, discount and total block shared by cart, checkout and receipt.
#[component]
pub fn PricingBlock(pricing: PricingView) -> impl IntoView {
    view! {
        <dl class="pricing">
            <dt>"Subtotal"</dt>
            <dd>{pricing.subtotal}</dd>
            {pricing
                .discount
                .map(|discount| {
                    view! {
                        <dt class="discount">{discount.label}</dt>
                        <dd class="discount">{discount.amount}</dd>
                    }
                })}
            <dt class="total">"Total"</dt>
            <dd class="total">{pricing.total}</dd>
        </dl>
    }
}

/// Cart contents with quantity controls.
#[component]
pub fn CartPage(shop: Shop) -> impl IntoView {
    view! {
        <section class="page cart-page">
            <h1>"Shopping Cart"</h1>
            {move || match shop.store.with(|store| store.cart_view()) {
                Ok(CartView::Empty { actions }) => {
                    view! {
                        <div class="cart-empty">
                            <p>"Your cart is empty"</p>
                            {actions
                                .into_iter()
                                .map(|action| {
                                    view! {
                                        <button
                                            type="button"
                                            on:click=move |_| shop.navigate(action.target)
                                        >
                                            {action.label}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                        .into_any()
                }
                Ok(CartView::Items { lines, pricing, item_count }) => {
                    view! {
                        <p class="cart-count">{format!("{item_count} item(s)")}</p>
                        <ul class="cart-lines">
                            {lines
                                .into_iter()
                                .map(|line| view! { <CartLine shop=shop line=line /> })
                                .collect_view()}
                        </ul>
                        <aside class="order-summary">
                            <h2>"Order Summary"</h2>
                            <PricingBlock pricing=pricing />
                            <button
                                type="button"
                                class="button-primary"
                                on:click=move |_| shop.navigate(Page::Checkout)
                            >
                                "Proceed to Checkout"
                            </button>
                        </aside>
                    }
                        .into_any()
                }
                Err(error) => {
                    view! {
                        <div class="error-panel">
                            <p>{error.to_string()}</p>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
