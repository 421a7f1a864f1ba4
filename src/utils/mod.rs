//! Utility modules for DOM and browser API access.

pub mod dom;
