//! Configuration and path management for eLoan

pub mod paths;
pub mod settings;

pub use paths::EloanPaths;
pub use settings::Settings;
