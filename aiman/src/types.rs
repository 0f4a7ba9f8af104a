//! Primitive AI Manager API data types and NewType-patterns.
mod host_url;
mod ids;
mod strings;

pub use host_url::*;
pub use ids::*;
pub use strings::*;
