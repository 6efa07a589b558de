//! Request queries: what the caller asked for and how to encode it.

pub mod entities;
pub mod parser;

pub use entities::{Callback, LengthBounds, OutputMode, Query};
pub use parser::{RawParams, parse_query};
