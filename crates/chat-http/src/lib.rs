//! # chat-http
//!
//! REST layer of the client. [`RestTransport`] is the seam every request goes
//! through; [`HttpTransport`] implements it with `reqwest`, and [`RestClient`]
//! wraps any transport with typed endpoint methods.

pub mod requests;
pub mod rest_client;
pub mod routing;
pub mod transport;

// Re-export commonly used types at crate root
pub use requests::{CreateEmoji, EditEmoji};
pub use rest_client::RestClient;
pub use routing::{ApiRequest, Route};
pub use transport::{HttpTransport, RestTransport};

pub use reqwest::Method;
