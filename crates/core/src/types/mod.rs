//! Core type definitions.
//!
//! Profiles are static registry rows; descriptors, payloads and envelopes are
//! built per request and dropped once serialized.

pub mod envelope;
pub mod payload;
pub mod profile;
pub mod tool;

pub use envelope::*;
pub use payload::*;
pub use profile::*;
pub use tool::*;
