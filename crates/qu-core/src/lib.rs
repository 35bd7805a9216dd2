//! Qu Core Library
//!
//! Core domain logic for qu: a single-user idea store where every idea is
//! one file and the filename carries the idea's whole metadata record.

pub mod allocator;
pub mod codec;
pub mod config;
pub mod error;
pub mod idea;
pub mod lifecycle;
pub mod logging;
pub mod query;
pub mod recency;
pub mod selector;
pub mod store;
pub mod working;
