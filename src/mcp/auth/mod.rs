//! Authentication strategies for NAS sessions.
//!
//! Only password authentication is configured today; the [`AuthStrategy`]
//! trait keeps the connect path independent of how credentials are proven.

mod password;
mod traits;

pub use password::PasswordAuth;
pub use traits::AuthStrategy;
