//! Core types and trait definitions for the classdesk persistence engine.
//!
//! This crate is deliberately free of database and transport dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod answer;
pub mod battle;
pub mod error;
pub mod question;
pub mod score;
pub mod store;
pub mod time;
pub mod user;

pub use error::{Error, Result};
