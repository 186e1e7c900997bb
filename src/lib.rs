pub mod cli;
pub mod data;
pub mod engine;
pub mod example;
pub mod filter;
pub mod list_presets;
pub mod model;
pub mod report;
pub mod scan;
pub mod validate;
