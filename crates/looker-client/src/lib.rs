//! Session client for the Looker REST API.
//!
//! [`LookerClient`] authenticates against the token-issuing `login`
//! endpoint, attaches the bearer token to a [`Session`], and dispatches one
//! request through it per [`LookerClient::call`]. Connection triples come
//! from an injected [`ConnectionSource`]; failures surface as the typed
//! [`Error`] taxonomy.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use looker_client::{ConnectionConfig, LookerClient, MemorySource, Method};
//!
//! # async fn run() -> Result<(), looker_client::Error> {
//! let source = MemorySource::new().with_connection(
//!     "looker_default",
//!     ConnectionConfig::new("https://looker.example.com:19999/api/3.0/", "client-id", "client-secret"),
//! );
//! let client = LookerClient::new(Arc::new(source))?;
//! let response = client.call(Method::GET, "looks", None, None).await?;
//! println!("{}", response.body);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod datagroups;
pub mod looks;
pub mod request;

pub use crate::client::{ApiResponse, ClientOptions, LookerClient, SentRequest, Session};
pub use crate::datagroups::StalenessUpdate;
pub use crate::looks::fetch_look_sql;
pub use crate::request::Encoding;
pub use looker_core::{
    ConnectionConfig, ConnectionSource, Credentials, EnvSource, Error, MemorySource,
    DEFAULT_CONNECTION_ID,
};
pub use reqwest::header::HeaderMap;
pub use reqwest::Method;
