//! Kiosk storefront application.
//!
//! Client-side rendered Leptos app. The reactive components here are a
//! thin layer: all session state lives in the `kiosk-flow` state
//! machines, and each page copies that state into signals after every
//! remote call settles.

mod app;
pub mod platform;

pub use app::App;
