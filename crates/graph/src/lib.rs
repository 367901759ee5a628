//! Lockwatch Graph: Microsoft Graph (Intune) inventory source.
//!
//! Fetches managed devices and BitLocker recovery-key metadata with
//! app-only client-credentials authentication and `@odata.nextLink`
//! pagination.

pub mod auth;
pub mod client;
pub mod mapper;
pub mod models;
pub mod source;

pub use client::GraphClient;
pub use source::GraphInventorySource;
