//! # tolmach-providers
//!
//! Translation backend implementations for tolmach.

pub mod openai;
