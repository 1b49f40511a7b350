pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{http::HttpAddressLookup, memory::InMemoryAddressBook};
pub use app::session::Session;
pub use config::Settings;
pub use core::controller::FormController;
pub use utils::error::{AppError, Result, ValidationError};
