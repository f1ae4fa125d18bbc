//! User storage: the remote endpoint the detail form saves through.

pub mod entity;
pub mod error;

pub use error::*;
