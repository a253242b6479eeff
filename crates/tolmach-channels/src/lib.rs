//! # tolmach-channels
//!
//! Messaging platform integrations for tolmach.

pub mod telegram;
pub mod utils;
