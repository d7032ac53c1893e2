//! Core traits.
//!
//! - `backends`: outbound collaborators (content generation API, publishing webhook)
//! - `dispatcher`: the tool dispatch surface shared by every transport

pub mod backends;
pub mod dispatcher;

pub use backends::*;
pub use dispatcher::*;
