//! iLearning prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    auth::{AuthError, Credentials, Session},
    cart::{Cart, CartEntry, CartError, QuantityChange},
    catalog::{Catalog, CatalogError},
    checkout::{
        Checkout, CheckoutError, CheckoutField, CheckoutForm, CheckoutPhase, OrderReceipt,
        Submission,
    },
    config::{CheckoutConfig, ConfigError, StorefrontConfig},
    contact::{ContactError, ContactField, ContactForm},
    courses::{Course, CourseDraft, CourseError, CourseId, Level},
    listing::{CategoryFilter, Listing, ListingQuery, PriceBucket, SortMode},
    navigation::{Navigator, Page, Screen},
    notices::{Notice, NoticeQueue, Severity},
    payment::{
        ImmediateTimer, OrderId, PaymentConfirmation, PaymentError, PaymentGateway, PaymentRequest,
        SimulatedGateway, Timer,
    },
    pricing::{PricingError, PricingPolicy, PricingSummary, derive_pricing, format_price},
    store::{Storefront, StorefrontError},
    views::{
        CartLineView, CartView, DiscountView, ListingView, PageAction, PricingView,
        ReceiptLineView, ReceiptView,
    },
};
