/// Shared kernel: error types, result alias and filesystem security guards
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
