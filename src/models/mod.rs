//! Data models for the metadata service

mod identity;
mod knowledge;
mod error;

pub use identity::*;
pub use knowledge::*;
pub use error::*;
