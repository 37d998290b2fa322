//! Core business logic, independent of the Discord framework.

/// Dice expression parsing and rolling
pub mod dice;

/// Remote server status, player list, and geolocation probe
pub mod probe;

/// Production [`probe::ServerQuery`] backend over the `mc-query` crate
pub mod upstream;
