//! Error types for Chorus
//!
//! Every fallible operation in the core returns [`ChorusResult`]. Soft failures
//! inside the conversation loop (a failing speaker selection or a failing reply)
//! never surface here; they are folded into the conversation's termination reason.

mod codes;
mod constructors;
mod conversions;
mod types;

pub use types::{ChorusError, ChorusResult};
