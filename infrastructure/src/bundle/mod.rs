//! Local quote bundle stored on disk.

mod loader;

pub use loader::{BundleError, BundleLoader};
