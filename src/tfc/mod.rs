//! HCP Terraform / Terraform Cloud API layer
//!
//! Request client, address resolvers, payload and pagination builders, and
//! one sub-module per resource.

pub mod auth;
mod client;
mod credentials;
pub mod pagination;
pub mod payload;
pub mod transport;
pub mod variables;
pub mod workspaces;

pub use auth::{Authenticator, BearerToken};
pub use client::{validate_base_url, ClientConfig, TfcClient};
pub use credentials::{host_from_url, TokenResolver};
pub use pagination::{build_list_query, ListQuery, NameSearch, PageQuery, QueryParam};
pub use payload::{resolve_payload, PayloadInput};
pub use transport::{ApiRequest, RawResponse, ReqwestTransport, Transport, TransportFailure};
pub use variables::VariableRef;
pub use workspaces::WorkspaceRef;
