//! Constants used throughout the patientor core crate.

/// Default listen address of the REST server.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3001";

/// Environment variable naming the REST listen address.
pub const REST_ADDR_ENV: &str = "PATIENTOR_REST_ADDR";

/// Environment variable naming the optional JSON seed file.
pub const SEED_FILE_ENV: &str = "PATIENTOR_SEED_FILE";
