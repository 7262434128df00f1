//! Discussion-board backend library.
//!
//! The [`domain`] module holds posts, comments, votes and the validation
//! registry; [`inbound`] exposes them over HTTP and [`outbound`] stores them.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::RequestTrace;
