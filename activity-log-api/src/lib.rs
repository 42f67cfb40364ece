pub mod envelope;
pub mod error;
pub mod error_response;

pub use envelope::*;
pub use error::*;
pub use error_response::*;
