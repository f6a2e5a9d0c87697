//! Transport seams
//!
//! - `Gateway` - one instance per backend, returns decoded JSON as an `ApiResult`
//! - `HttpGateway` - reqwest implementation with backend-specific error decoding
//! - `EndpointResolver` - where the identity backend lives

pub mod endpoint;
pub mod gateway;
pub mod http;

pub use endpoint::{ConfiguredEndpointResolver, EndpointResolver};
pub use gateway::{Gateway, GatewayRequest};
pub use http::{ErrorFlavor, HttpGateway};
