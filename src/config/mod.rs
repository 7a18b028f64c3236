/// Database configuration and connection management
pub mod database;

/// Pool seed and ledger settings from config.toml
pub mod seed;
