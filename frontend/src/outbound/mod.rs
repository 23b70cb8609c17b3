//! Outbound adapters implementing domain ports.
//!
//! - **rest**: `reqwest`-backed users and positions APIs.
//! - **image_probe**: `image`-backed dimension probe for photo validation.
//!
//! Adapters translate between transport representations and domain types.
//! They contain no validation rules of their own.

pub mod image_probe;
pub mod rest;

pub use image_probe::ImageCrateProbe;
pub use rest::{ApiClient, RestPositionsApi, RestUsersApi};
