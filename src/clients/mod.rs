#[macro_use]
mod macros;

pub mod form_client;
pub mod user_client;

pub use form_client::FormClient;
pub use user_client::UserClient;
