//! Core types and the companies view-model for Re:Meet.
//!
//! This crate is deliberately free of HTTP dependencies. The backend client
//! (`remeet-supabase`) and the terminal front end (`remeet-cli`) both depend
//! on it; it depends on nothing backend-specific.

pub mod aggregate;
pub mod company;
pub mod contact;
pub mod error;
pub mod source;
pub mod view_model;

pub use error::{Error, Result};
