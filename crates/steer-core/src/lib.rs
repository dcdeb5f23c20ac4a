pub mod agents;
pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod io;
pub mod paths;
pub mod policy;
pub mod prompt;
pub mod resolver;
pub mod rules;
pub mod types;

pub use catalog::Catalog;
pub use error::{Result, SteerError};
