//! Storage layer for persistent credential data.
//!
//! This module provides the vault abstraction the application state talks to,
//! plus a JSON file implementation that tracks where and how often each
//! credential is used.
//!
//! # Modules
//!
//! - `backend`: [`VaultService`] trait abstraction for backend implementations
//! - `json`: JSON file-based vault implementation
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod json;
pub mod models;

pub use backend::VaultService;
pub use json::JsonVault;
pub use models::{CredentialRecord, UsageRecord};
