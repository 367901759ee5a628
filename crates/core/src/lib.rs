//! Lockwatch Core: recovery key join, device classification, and report rendering.

pub mod config;
pub mod connectors;
pub mod error;
pub mod export;
pub mod models;
pub mod report;
