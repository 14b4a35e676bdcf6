//! Supabase backend for Re:Meet.
//!
//! Resolves the backend settings at startup ([`SupabaseConfig`]) and talks to
//! the hosted PostgREST and Storage endpoints ([`SupabaseClient`]). The client
//! implements [`remeet_core::source::ContactSource`], so it can be handed
//! straight to the companies view-model.

pub mod client;
pub mod config;
pub mod error;

pub use client::SupabaseClient;
pub use config::SupabaseConfig;
pub use error::{Error, Result};
