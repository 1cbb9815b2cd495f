//! Input loading and raw table handling.

mod loader;
mod source;

pub use loader::{DelimitedLoader, Format, JsonLoader, Loader, load};
pub use source::{RawTable, SourceMetadata};
