//! # LoadQuote Domain
//!
//! Business domain types and models for the freight quotation core.
//!
//! This crate contains:
//! - Domain data types (Route, Cargo, Offer, CostBreakdown, etc.)
//! - Domain error types and Result definitions
//! - The rate catalog: rate types with validation bounds as data
//! - Domain constants (default rates, consumption profiles)
//!
//! ## Architecture
//! - No dependencies on other LoadQuote crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod constants;
pub mod errors;
pub mod numeric;
pub mod types;

// Re-export commonly used items
pub use errors::*;
pub use numeric::decimal_from_f64;
pub use types::*;
