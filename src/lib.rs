pub mod catalog;
pub mod config;
pub mod errors;
pub mod knowledge;
pub mod mcp;
pub mod report;
pub mod resolution;
pub mod service;
pub mod side_effects;
pub mod types;
