//! Service layer backing the HTTP handlers

mod metadata_service;

pub use metadata_service::*;
