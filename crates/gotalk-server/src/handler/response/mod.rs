//! Response types for HTTP handlers.

mod accounts;
mod authentications;
mod errors;
mod monitors;

pub use accounts::*;
pub use authentications::*;
pub use errors::*;
pub use monitors::*;
