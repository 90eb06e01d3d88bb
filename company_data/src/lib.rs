//! # Company Data
//!
//! The record crate - company registry data as imported from external
//! sources, plus the query surface the quiz engine consumes. This crate
//! knows nothing about questions or sessions; it owns the `Company` record,
//! its completeness rules, and the `CompanyStore` trait.

pub mod company;
pub mod store;

pub use company::*;
pub use store::*;
