//! Application layer - use cases and orchestration.
//!
//! This layer loads, writes and formats LMT packages.

pub mod formatter;
pub mod loader;
pub mod writer;

pub use formatter::{format_package, format_written, OutputFormat};
pub use loader::{load_file, load_from_reader};
pub use writer::{render_package, write_package_file};
