//! Orchestrator hub integration
//!
//! Registration with the hub and knowledge exchange through it.

mod client;

pub use client::*;
