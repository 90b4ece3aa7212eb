//! HTTP API for the metadata service
//!
//! Health probes, agent/hub routes and dataset routes (Actix-Web).

mod rest;
mod health;
mod responses;

pub use rest::*;
pub use health::*;
pub use responses::*;
