//! Shared data objects and runtime settings for the paywiz payment wizard.
//!
//! Everything here is plain data: the engine in `paywiz-core` mutates it and
//! front ends render it.

pub mod config;
pub mod objects;
