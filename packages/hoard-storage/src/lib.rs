pub mod catalog;
pub mod models;

mod error;

pub use catalog::Catalog;
pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
