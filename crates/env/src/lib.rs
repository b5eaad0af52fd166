//! Environment resolution for env-run
//!
//! This crate parses `.env` style files, decides when the remote secret store
//! must be consulted, and folds every variable source into the final
//! environment handed to the executed command.

pub mod files;
pub mod overrides;
pub mod resolver;
pub mod source_parser;

pub use files::EnvFiles;
pub use overrides::parse_cli_overrides;
pub use resolver::{
    EnvironmentResolver, EnvironmentSourceData, FilePaths, ResolutionResult, Source,
};
pub use source_parser::parse_env_content;
