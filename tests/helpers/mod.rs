//! Shared test helpers

pub mod editor;
pub mod source_fixtures;
