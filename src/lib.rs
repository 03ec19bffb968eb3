//! Job matcher library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod matching;
pub mod output;
pub mod profile;

pub use config::Config;
pub use error::{JobMatcherError, Result};
