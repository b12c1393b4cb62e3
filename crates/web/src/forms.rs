//! Login and contact forms.

use ilearning::prelude::{ContactField, Credentials, Storefront};
use leptos::{ev::SubmitEvent, prelude::*};

use crate::shop::Shop;

/// Whether the auth form logs in or signs up. Both start a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Existing account.
    #[default]
    LogIn,

    /// New account.
    SignUp,
}

impl AuthMode {
    /// Form heading.
    pub fn heading(self) -> &'static str {
        match self {
            AuthMode::LogIn => "Welcome back",
            AuthMode::SignUp => "Create your account",
        }
    }

    /// Submit button label.
    pub fn action(self) -> &'static str {
        match self {
            AuthMode::LogIn => "Log In",
            AuthMode::SignUp => "Sign Up",
        }
    }

    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::LogIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::LogIn,
        }
    }
}

/// Email and password form.
#[component]
pub fn AuthForm(shop: Shop) -> impl IntoView {
    let mode = RwSignal::new(AuthMode::default());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        let credentials = Credentials::new(email.get_untracked(), password.get_untracked());

        if shop.act(|store| store.log_in(&credentials)) {
            password.set(String::new());
        }
    };

    view! {
        <form class="auth-form" on:submit=on_submit>
            <h2>{move || mode.get().heading()}</h2>
            <label>
                "Email"
                <input
                    type="email"
                    placeholder="your@email.com"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
            </label>
            <label>
                "Password"
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
            </label>
            <button type="submit" class="button-primary">
                {move || mode.get().action()}
            </button>
            <button
                type="button"
                class="link"
                on:click=move |_| mode.update(|current| *current = current.toggled())
            >
                {move || mode.get().toggled().action()}
                " instead"
            </button>
        </form>
    }
}

/// Standalone login page.
#[component]
pub fn AuthPage(shop: Shop) -> impl IntoView {
    view! {
        <section class="page auth-page">
            <AuthForm shop=shop />
        </section>
    }
}

/// Account page for a logged-in visitor.
#[component]
pub fn ProfilePage(shop: Shop) -> impl IntoView {
    let logged_in = move || shop.store.with(|store| store.session().is_logged_in());

    view! {
        <section class="page profile-page">
            <h1>"My Profile"</h1>
            {move || {
                if logged_in() {
                    view! {
                        <p>"You are logged in."</p>
                        <button type="button" on:click=move |_| shop.act(Storefront::log_out)>
                            "Log out"
                        </button>
                    }
                        .into_any()
                } else {
                    view! { <AuthForm shop=shop /> }.into_any()
                }
            }}
        </section>
    }
}

#[component]
fn ContactInput(shop: Shop, field: ContactField) -> impl IntoView {
    let value = move || shop.store.with(|store| store.contact_form().get(field).to_string());
    let set = move |value: String| shop.act(|store| store.set_contact_field(field, value));

    view! {
        <label>
            {field.label()}
            {if field == ContactField::Message {
                view! {
                    <textarea
                        rows="5"
                        prop:value=value
                        on:input=move |ev| set(event_target_value(&ev))
                    ></textarea>
                }
                    .into_any()
            } else {
                let kind = if field == ContactField::Email { "email" } else { "text" };

                view! {
                    <input
                        type=kind
                        prop:value=value
                        on:input=move |ev| set(event_target_value(&ev))
                    />
                }
                    .into_any()
            }}
        </label>
    }
}

/// Contact form and office details.
#[component]
pub fn ContactPage(shop: Shop) -> impl IntoView {
    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        shop.act(Storefront::submit_contact);
    };

    view! {
        <section class="page contact-page">
            <h1>"Contact Us"</h1>
            <p>"Questions about a course or corporate training? Send us a message."</p>
            <form class="contact-form" on:submit=on_submit>
                {ContactField::ALL
                    .into_iter()
                    .map(|field| view! { <ContactInput shop=shop field=field /> })
                    .collect_view()}
                <button type="submit" class="button-primary">
                    "Send Message"
                </button>
            </form>
        </section>
    }
}
