#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

pub mod api;
pub mod connection;
pub mod constants;
pub mod errors;

pub use crate::api::*;
pub use crate::connection::*;
pub use crate::constants::*;
pub use crate::errors::*;
