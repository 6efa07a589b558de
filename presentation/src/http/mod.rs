//! HTTP surface: routes, rendering and the response envelope.

pub mod envelope;
pub mod render;
pub mod router;

pub use envelope::{ErrorEnvelope, SOURCE_ATTRIBUTION, standard_headers};
pub use render::{RenderedQuote, render};
pub use router::{AppState, router};
