//! Shared storefront handle for components.

use std::time::Duration;

use ilearning::prelude::{Notice, Page, PaymentGateway, SimulatedGateway, Storefront};
use leptos::{prelude::*, task};

use crate::{
    announce,
    timer::{BrowserTimer, delay_ms, wait_for_timeout},
};

/// How long a toast stays on screen.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3_000);

/// Signals every page reads from and writes to.
#[derive(Debug, Clone, Copy)]
pub struct Shop {
    /// Whole application state.
    pub store: RwSignal<Storefront>,

    /// Toasts currently on screen.
    pub toasts: RwSignal<Vec<Notice>>,

    /// Screen-reader announcement.
    pub live_message: RwSignal<(u64, String)>,

    /// Payment gateway; one instance so references keep counting up.
    pub gateway: StoredValue<SimulatedGateway<BrowserTimer>>,
}

impl Shop {
    /// Wrap a storefront.
    pub fn new(store: Storefront) -> Self {
        let gateway = StoredValue::new(store.simulated_gateway(BrowserTimer));

        Self {
            gateway,
            store: RwSignal::new(store),
            toasts: RwSignal::new(Vec::new()),
            live_message: RwSignal::new((0, String::new())),
        }
    }

    /// Run an action against the storefront and surface whatever notices it raised.
    pub fn act<R>(self, action: impl FnOnce(&mut Storefront) -> R) -> R {
        let (result, raised) = {
            let mut store = self.store.write();
            let result = action(&mut *store);

            (result, store.take_notices())
        };

        self.show(raised);

        result
    }

    /// Go to a page and scroll back to the top.
    pub fn navigate(self, page: Page) {
        self.act(|store| store.navigate(page));

        scroll_to_top();
    }

    /// Submit the checkout and charge the gateway in the background.
    pub fn pay(self) {
        let Some(request) = self.act(Storefront::submit_checkout) else {
            return;
        };

        let gateway = self.gateway.get_value();

        task::spawn_local(async move {
            let result = gateway.charge(&request).await;

            if self.act(|store| store.finish_checkout(request.order, result)).is_some() {
                scroll_to_top();
            }
        });
    }

    fn show(self, raised: Vec<Notice>) {
        let Some(last) = raised.last() else {
            return;
        };

        announce(self.live_message, last.message.clone());

        let ids: Vec<u64> = raised.iter().map(|notice| notice.id).collect();

        self.toasts.update(|toasts| toasts.extend(raised));

        let toasts = self.toasts;

        task::spawn_local(async move {
            wait_for_timeout(delay_ms(TOAST_LIFETIME)).await;

            dismiss_toasts(toasts, &ids);
        });
    }
}

/// Remove toasts by id.
pub fn dismiss_toasts(toasts: RwSignal<Vec<Notice>>, ids: &[u64]) {
    toasts.update(|toasts| toasts.retain(|toast| !ids.contains(&toast.id)));
}

#[cfg(target_arch = "wasm32")]
fn scroll_to_top() {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn scroll_to_top() {}
