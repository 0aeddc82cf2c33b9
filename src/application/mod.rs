// Application layer - use cases over the repository, shared by every client.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
