//! Shared test helpers for `loadquote-core` integration tests.
//!
//! In-memory port implementations and entity fixtures so the behaviour
//! tests can focus on semantics instead of setup boilerplate.

// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod fixtures;
pub mod repositories;
