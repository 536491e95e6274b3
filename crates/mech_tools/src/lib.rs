//! # Mech Development Tools
//!
//! Command-line tools for development:
//! - Equipment data validators
//! - Engine, heat scale and armor lookups

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod lookup;
pub mod validate;
