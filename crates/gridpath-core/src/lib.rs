#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! Core types and utilities for `gridpath`.
//!
//! This crate provides the node model shared by every search algorithm, the two frontier
//! disciplines, path reconstruction, and the instrumentation contract (visited count, timing,
//! outcome, cooperative cancellation) that the algorithms report through.

mod error;
mod node;
mod path;
mod pqueue;
mod search;
pub mod traits;

pub use crate::error::*;
pub use crate::node::*;
pub use crate::path::*;
pub use crate::pqueue::*;
pub use crate::search::*;
