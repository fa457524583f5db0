//! Present/absent value container

pub mod error;
pub mod value;

// Re-export commonly used items
pub use error::{OptionalError, OptionalResult};
pub use value::Optional;
