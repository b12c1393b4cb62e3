//! Header, footer and toasts.

use ilearning::prelude::{Page, Storefront};
use leptos::prelude::*;

use crate::shop::{Shop, dismiss_toasts};

/// Nav link classes; the current page is highlighted.
fn nav_class(current: Page, page: Page) -> &'static str {
    if current == page {
        "nav-link nav-link-active"
    } else {
        "nav-link"
    }
}

/// Badge text for the cart button, hidden when empty.
pub fn cart_badge(count: usize) -> Option<String> {
    (count > 0).then(|| count.to_string())
}

#[component]
fn NavLink(shop: Shop, page: Page) -> impl IntoView {
    let current = move || shop.store.with(Storefront::current_page);

    view! {
        <li>
            <button
                type="button"
                class=move || nav_class(current(), page)
                aria-current=move || (current() == page).then_some("page")
                on:click=move |_| shop.navigate(page)
            >
                {page.title()}
            </button>
        </li>
    }
}

/// Top bar with the menu, cart and account buttons.
#[component]
pub fn Header(shop: Shop) -> impl IntoView {
    let logged_in = move || shop.store.with(|store| store.session().is_logged_in());
    let badge = move || shop.store.with(|store| cart_badge(store.cart_count()));

    view! {
        <header class="site-header">
            <button type="button" class="brand" on:click=move |_| shop.navigate(Page::Home)>
                "iLearning"
            </button>
            <nav aria-label="Main">
                <ul class="nav-links">
                    {Page::MENU
                        .into_iter()
                        .map(|page| view! { <NavLink shop=shop page=page /> })
                        .collect_view()}
                </ul>
            </nav>
            <div class="header-actions">
                <button
                    type="button"
                    class="cart-button"
                    aria-label="Cart"
                    on:click=move |_| shop.navigate(Page::Cart)
                >
                    "Cart"
                    {move || badge().map(|count| view! { <span class="cart-badge">{count}</span> })}
                </button>
                {move || {
                    if logged_in() {
                        view! {
                            <button type="button" on:click=move |_| shop.navigate(Page::Profile)>
                                "Profile"
                            </button>
                            <button type="button" on:click=move |_| shop.act(Storefront::log_out)>
                                "Log out"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button type="button" on:click=move |_| shop.navigate(Page::Auth)>
                                "Log in"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>
        </header>
    }
}

/// Footer links.
#[component]
pub fn Footer(shop: Shop) -> impl IntoView {
    view! {
        <footer class="site-footer">
            <ul class="footer-links">
                {Page::FOOTER
                    .into_iter()
                    .map(|page| {
                        view! {
                            <li>
                                <button type="button" on:click=move |_| shop.navigate(page)>
                                    {page.title()}
                                </button>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <p class="footer-note">"© iLearning. Professional training for project leaders."</p>
        </footer>
    }
}

/// Stack of transient notices.
#[component]
pub fn Toasts(shop: Shop) -> impl IntoView {
    view! {
        <div class="toasts">
            {move || {
                shop.toasts
                    .get()
                    .into_iter()
                    .map(|toast| {
                        let id = toast.id;

                        view! {
                            <div class=format!("toast toast-{}", toast.severity.as_str())>
                                <span>{toast.message}</span>
                                <button
                                    type="button"
                                    aria-label="Dismiss"
                                    on:click=move |_| dismiss_toasts(shop.toasts, &[id])
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_badge_hidden_when_empty() {
        assert_eq!(cart_badge(0), None);
        assert_eq!(cart_badge(3), Some("3".to_string()));
    }

    #[test]
    fn test_nav_class_marks_current_page() {
        assert_eq!(nav_class(Page::Courses, Page::Courses), "nav-link nav-link-active");
        assert_eq!(nav_class(Page::Home, Page::Courses), "nav-link");
    }
}
