//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MongoDB-backed quiz and user repositories
//! - **classifier**: Burn-backed scan classifier
//! - **webhook**: svix-style webhook signature verification
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod classifier;
pub mod persistence;
pub mod webhook;
