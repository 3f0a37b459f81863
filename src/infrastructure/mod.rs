//! Infrastructure layer - external adapters (model host, name files, config).
//!
//! This layer handles file-backed collaborators of the LMT package.

pub mod config;
pub mod modflow;
pub mod name_file;

pub use config::{ensure_config_exists, load_config};
pub use modflow::Modflow;
pub use name_file::read_name_file;
