pub mod builder;
pub mod parser;
pub mod types;

pub use builder::*;
pub use parser::*;
pub use types::*;
