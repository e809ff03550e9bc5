//! Core value model for Mimeo.
//!
//! This crate defines a small dynamically-typed value universe, the
//! [`Value`] enum, together with the collections and records it can hold,
//! and a total deep-copy primitive, [`deep_clone`], that terminates on
//! cyclic inputs and preserves shared references, so the copy has the
//! same shape as the original.
//!
//! Values are cheap to clone (`Value::clone` bumps a refcount) and safe
//! to share across threads.

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod collections;
pub mod deep_clone;
pub mod error;
pub mod pattern;
pub mod record;
pub mod timestamp;
pub mod value;

pub use collections::{ValueList, ValueMap, ValueSet};
pub use deep_clone::{DeepCloner, deep_clone};
pub use error::{ValueError, ValueResult};
pub use pattern::{Pattern, PatternFlags, PatternMatch};
pub use record::{PropertyKey, Record};
pub use timestamp::Timestamp;
pub use value::{ForeignValue, Symbol, Value, ValueKind};
