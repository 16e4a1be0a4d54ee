//! umbpack library - expose modules for testing
//!
//! The binary in `main.rs` is a thin clap front end over these modules.

pub mod commands;
pub mod common;
pub mod elicitor;
pub mod errors;
pub mod messages;

pub use common::GlobalOpts;
pub use umbpack_logger as logger;
