//! Export core modules shared across output writers.

pub mod document_core;
