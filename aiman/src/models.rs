//! Definitions of structs describing request and response data of the AI Manager API.
mod ai_model;
mod attachment;
mod datasource;
mod envelope;
mod prompt;

pub use ai_model::*;
pub use attachment::*;
pub use datasource::*;
pub(crate) use envelope::*;
pub use prompt::*;
