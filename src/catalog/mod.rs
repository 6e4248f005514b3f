pub mod error;
pub mod handlers;
pub mod query;
pub mod types;

pub use error::*;
pub use handlers::*;
pub use query::*;
pub use types::*;
