//! # lazyseq
//!
//! Lazy, push-based generators for Rust.
//!
//! ## Overview
//!
//! A [`Generator`](generator::Generator) wraps a producing routine that pushes
//! values into a consumer only when a terminal operation drives it. Generators
//! compose like iterators, stay re-drivable, and can describe infinite
//! sequences:
//!
//! - **Construction**: from collections, mappings, routines and JSON values
//! - **Combinators**: filter, map, take, skip, zip, concatenation, grouping,
//!   sorting
//! - **Terminal operations**: collection, search, counting, folding
//! - **Selectors**: field accessors and truthiness for predicates and keys
//!
//! ## Feature Flags
//!
//! - `generator`: The generator type, combinators and factories
//! - `selector`: Field selectors and the `Truthy` trait
//! - `json`: `serde_json` integration
//! - `serde`: `Serialize` for generators and groups
//! - `fxhash`: Faster hashing for `group_by_hashed`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazyseq::prelude::*;
//!
//! let words = Generator::from_vec(vec!["lazy", "push", "based", "generator"]);
//! let summary = words
//!     .sort_by(|word| word.len())
//!     .zip_with_array(vec![1, 2, 3])
//!     .map(|(word, rank)| format!("{rank}. {word}"))
//!     .to_vec()
//!     .unwrap();
//!
//! assert_eq!(summary, vec!["1. lazy", "2. push", "3. based"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and traits.
///
/// # Usage
///
/// ```rust
/// use lazyseq::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "generator")]
    pub use crate::generator::*;

    #[cfg(feature = "selector")]
    pub use crate::selector::*;
}

#[cfg(feature = "generator")]
pub mod generator;

#[cfg(feature = "selector")]
pub mod selector;
