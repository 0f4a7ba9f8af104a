//! Client library for the AI Manager API: prompting models, optionally with
//! attached documents, and managing datasources.
//!
//! ```no_run
//! # async fn example() -> Result<(), aiman::errors::AimanError> {
//! use aiman::{AimanClient, types::{HostUrl, Username}};
//!
//! let host = HostUrl::try_from("https://aiman.example.com").unwrap();
//! let client = AimanClient::build(host)
//!     .connect_with_password(Username::from("someone"), "secret")
//!     .await?;
//! let response = client.prompt("llama3:8b", "hello").send().await?;
//! println!("{:?}", response.response_text);
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate shrinkwraprs;

pub mod attachment;
mod client;
pub mod config;
pub mod credential;
pub mod errors;
pub mod loader;
pub mod models;
pub mod routes;
pub mod types;

pub use client::{AimanClient, AimanClientBuilder, Dispatcher, PromptBuilder};
pub use reqwest;
