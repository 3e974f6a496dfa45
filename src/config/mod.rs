/// Database configuration and connection management
pub mod database;

/// Command access policy loading from policy.toml
pub mod policy;

/// Owner and role identifiers from environment variables
pub mod roles;

/// Channel, commerce and webhook settings from environment variables
pub mod settings;
