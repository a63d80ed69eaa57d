//! HTTP layer of the Nactive EHR client.
//!
//! [`gateway::AuthGateway`] is the sole path by which a session is created or
//! explicitly ended; [`client::ApiClient`] carries every other exchange,
//! attaching the session credential on the way out and tearing the session
//! down on any server-reported authorization failure.

pub mod client;
pub mod gateway;

pub use client::ApiClient;
pub use gateway::AuthGateway;
