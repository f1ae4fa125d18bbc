//! System orchestration, startup, and shutdown logic.

pub mod error;
pub mod form_system;
pub mod tracing;

pub use error::*;
pub use form_system::*;
pub use self::tracing::*;
