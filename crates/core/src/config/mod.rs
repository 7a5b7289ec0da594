pub mod generator_config;

pub use generator_config::*;
