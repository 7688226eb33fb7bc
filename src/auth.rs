//! Auth-domain values: submitted credentials, the remote identity, and its session cookies.

pub mod credentials;
pub mod identity;
pub mod password;

pub use credentials::*;
pub use identity::*;
pub use password::*;
