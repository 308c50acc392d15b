//! Token-domain parameter types shared by requests and responses.

pub mod scope;
pub mod token;

pub use scope::*;
pub use token::*;
