//! iLearning
//!
//! Storefront logic for a professional-training provider: course catalog, cart with bulk
//! discount pricing, listing search and sort, page navigation and a simulated checkout.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod contact;
pub mod courses;
pub mod fixtures;
pub mod listing;
pub mod navigation;
pub mod notices;
pub mod payment;
pub mod prelude;
pub mod pricing;
pub mod store;
pub mod views;
