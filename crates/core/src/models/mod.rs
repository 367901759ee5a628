//! Domain models shared across Lockwatch crates.

pub mod classification;
pub mod device;
pub mod recovery_key;
pub mod report;
