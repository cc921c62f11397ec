//! Configuration file loading for the clinical council
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Environment: `COUNCIL_<SECTION>__<KEY>`
//! 3. Project root: `./council.toml` or `./.council.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/clinical-council/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDiagnosisConfig, FileDiscussionConfig, FileLoggingConfig, FileOutputConfig,
    FileProviderConfig, PROVIDER_KINDS,
};
pub use loader::ConfigLoader;
