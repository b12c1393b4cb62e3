//! Browser timer for the simulated payment delay and toast expiry.

use std::time::Duration;

use async_trait::async_trait;
use ilearning::prelude::Timer;
#[cfg(not(target_arch = "wasm32"))]
use leptos::task;

/// Timer backed by `window.setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl Timer for BrowserTimer {
    async fn sleep(&self, duration: Duration) {
        wait_for_timeout(delay_ms(duration)).await;
    }
}

/// Milliseconds for `setTimeout`, saturating at `i32::MAX`.
pub fn delay_ms(duration: Duration) -> i32 {
    i32::try_from(duration.as_millis()).unwrap_or(i32::MAX)
}

/// Resolve after `delay_ms` milliseconds.
#[cfg(target_arch = "wasm32")]
pub async fn wait_for_timeout(delay_ms: i32) {
    use js_sys::{Function, Promise};
    use wasm_bindgen::{JsCast, JsValue, closure::Closure};
    use wasm_bindgen_futures::JsFuture;

    let mut executor = move |resolve: Function, _reject: Function| {
        let Some(window) = web_sys::window() else {
            _ = resolve.call0(&JsValue::NULL);
            return;
        };

        let callback = Closure::once_into_js(move || {
            _ = resolve.call0(&JsValue::NULL);
        });

        _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            delay_ms,
        );
    };

    let promise = Promise::new(&mut executor);
    _ = JsFuture::from(promise).await;
}

/// Resolve on the next tick outside the browser.
#[cfg(not(target_arch = "wasm32"))]
pub async fn wait_for_timeout(_delay_ms: i32) {
    task::tick().await;
}
