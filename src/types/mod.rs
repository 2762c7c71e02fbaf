pub mod error;
pub mod form;
pub mod id;
pub mod sensitive;

pub use error::{Error, Resource};
pub use sensitive::Sensitive;
