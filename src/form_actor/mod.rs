//! The user detail form: local record state, schema validation on submit and
//! the hand-off to the user store.

pub mod error;
pub mod error_map;
pub mod schema;
pub mod service;
pub mod view;

pub use error::*;
pub use error_map::*;
pub use schema::*;
pub use service::*;
pub use view::*;
