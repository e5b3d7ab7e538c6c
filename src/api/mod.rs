pub mod client;
pub mod endpoints;

pub use client::{Payload, WebhookClient};
pub use endpoints::{Endpoint, EndpointPaths};
