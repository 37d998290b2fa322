//! Discord command implementations organized by category.

/// Owner-only administration commands
pub mod admin;

/// General utility commands
pub mod general;

/// Server probe commands
pub mod server;

/// Team role self-assignment
pub mod team;

// Export commands
pub use admin::*;
pub use general::*;
pub use server::*;
pub use team::*;
