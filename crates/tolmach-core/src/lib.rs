//! # tolmach-core
//!
//! Core types, traits, configuration, and error handling for the tolmach bot.

pub mod config;
pub mod error;
pub mod language;
pub mod message;
pub mod state;
pub mod traits;
