//! Team Registry Library
//!
//! Registers and lists football teams kept in a hosted document store.
//! Provides the team model, the remote accessor and repository, the
//! observable state holders that drive a client UI, and an HTTP surface.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
