pub mod config;
pub mod model;

pub use config::Config;
pub use model::*;
