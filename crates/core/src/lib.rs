//! `storefront-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod price;
pub mod value_object;

pub use error::DomainError;
pub use id::ProductId;
pub use price::Price;
pub use value_object::ValueObject;
