//! Core library components.
//!
//! This module contains the `.env` section parser, the secret store
//! abstraction and the bootstrap and sync engines built on it. Nothing here
//! prints; operator output lives in [`crate::cli`].

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod domain;
pub mod env;
pub mod parser;
pub mod store;
pub mod sync;
