//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route, currently trace
//! identifiers and access logging.

pub mod trace;

pub use trace::RequestTrace;
