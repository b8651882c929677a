//! Prepare a staging directory for a LaTeX renderer.
//!
//! An input (a `.tex` file, a directory, or a gzip-compressed tarball) is
//! copied or unpacked into a caller-owned directory, then the entry document
//! is picked from its top level.
pub mod archive;
pub mod config;
pub mod error;
pub mod input;
pub mod prepare;
pub mod resolve;
pub mod staging;

pub use config::{load_config, PrepareConfig};
pub use error::{PrepareError, PrepareResult};
pub use input::InputKind;
pub use prepare::{prepare_rendering_dir, prepare_with, PreparedInput};
pub use resolve::{pick_entry_file, pick_entry_file_with, Resolution, ResolveGate, ResolveRules};
pub use staging::{stage_input, StagedInput};
