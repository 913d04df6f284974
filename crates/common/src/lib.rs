//! Identifier types shared by the storefront crates.

pub mod types;

pub use types::{OrderId, ProductId, UserId};
