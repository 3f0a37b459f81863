//! Domain layer - package types, bookkeeping and settings.
//!
//! This layer contains pure domain models and error types
//! without any file or terminal I/O.

pub mod error;
pub mod models;
pub mod package;
pub mod settings;

pub use error::{AppError, Result};
pub use models::{LinkageConfig, LinkageOptions, ModflowVersion};
pub use package::{ExtUnitTable, ModelHost, NameFileEntry, PackageHandle};
pub use settings::{AppConfig, ModelSettings};
