//! iLearning web storefront
//!
//! Client-side rendered Leptos shell around [`ilearning::prelude::Storefront`].

use ilearning::prelude::{Screen, Storefront};
use leptos::prelude::*;

mod cart;
mod checkout;
mod content;
mod courses;
mod forms;
mod layout;
mod routes;
mod shop;
mod timer;

use routes::Route;
use shop::Shop;

#[component]
fn Routed(shop: Shop) -> impl IntoView {
    let route = Memo::new(move |_| shop.store.with(|store| Route::from(store.screen())));

    move || match route.get() {
        Route::Home => view! { <courses::HomePage shop=shop /> }.into_any(),
        Route::Courses => view! { <courses::CoursesPage shop=shop /> }.into_any(),
        Route::CourseDetail(course) => {
            view! { <courses::CourseDetailPage shop=shop course=course /> }.into_any()
        }
        Route::CourseNotFound => {
            view! { <courses::CourseNotFoundPage shop=shop recovery=Screen::NOT_FOUND_RECOVERY /> }
                .into_any()
        }
        Route::Auth => view! { <forms::AuthPage shop=shop /> }.into_any(),
        Route::Cart => view! { <cart::CartPage shop=shop /> }.into_any(),
        Route::Checkout => view! { <checkout::CheckoutPage shop=shop /> }.into_any(),
        Route::Contact => view! { <forms::ContactPage shop=shop /> }.into_any(),
        Route::Profile => view! { <forms::ProfilePage shop=shop /> }.into_any(),
        Route::Content(page) => match content::content_for(page) {
            Some(content) => view! { <content::ContentPage shop=shop content=content /> }.into_any(),
            None => view! { <courses::HomePage shop=shop /> }.into_any(),
        },
    }
}

/// Storefront app shell.
#[component]
fn App() -> impl IntoView {
    match Storefront::reference() {
        Ok(store) => {
            let shop = Shop::new(store);

            view! {
                <p class="sr-only" role="status" aria-live="polite" aria-atomic="true">
                    {move || shop.live_message.get().1}
                </p>
                <layout::Header shop=shop />
                <main class="site-main">
                    <Routed shop=shop />
                </main>
                <layout::Footer shop=shop />
                <layout::Toasts shop=shop />
            }
            .into_any()
        }
        Err(error) => {
            log::error!("failed to load storefront: {error}");

            view! {
                <main class="site-main">
                    <h1>"iLearning"</h1>
                    <div class="error-panel">
                        <p>{error.to_string()}</p>
                    </div>
                </main>
            }
            .into_any()
        }
    }
}

fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    leptos::mount::mount_to_body(App);
}

fn announce(live_message: RwSignal<(u64, String)>, message: String) {
    live_message.update(|(id, text)| {
        *id = id.saturating_add(1);
        *text = message;
    });
}
