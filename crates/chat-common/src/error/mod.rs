//! Error types shared by the transport and the client

mod client_error;
mod http_error;

pub use client_error::{ClientError, ClientResult};
pub use http_error::HttpError;
