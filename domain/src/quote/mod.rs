//! Quote records and the corpus they are drawn from.

pub mod corpus;
pub mod entities;

pub use corpus::{Corpus, DEFAULT_CATEGORY};
pub use entities::{NumberOrString, QuoteRecord};
