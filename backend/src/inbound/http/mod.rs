//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod predict;
pub mod quizzes;
pub mod router;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod webhooks;

pub use error::ApiResult;
