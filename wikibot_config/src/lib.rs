mod schema;

pub use schema::{Config, LogConfig, MatchingConfig, SessionConfig};
