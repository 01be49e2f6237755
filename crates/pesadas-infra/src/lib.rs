//! Infrastructure layer
//!
//! Concrete implementations of the domain storage trait.

pub mod persistence;
