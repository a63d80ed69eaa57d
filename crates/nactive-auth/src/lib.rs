//! Access policy and session state for the Nactive EHR client.
//!
//! Two concerns live here, deliberately separated from the HTTP layer:
//!
//! - [`policy`]: the static role → action grant table, the single source of
//!   truth for "may this role do this action".
//! - [`session`]: the authoritative in-memory identity with durable file
//!   backing, so a restart does not force re-login.

pub mod policy;
pub mod session;

pub use policy::{Action, PolicyError, check, is_allowed};
pub use session::SessionStore;
