pub mod docs;
pub mod error;
pub mod handlers;
pub mod payload_extractor;
pub mod routes;

pub use error::*;
pub use handlers::*;
pub use payload_extractor::*;
pub use routes::*;
