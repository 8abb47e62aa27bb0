pub mod ast;
pub mod parser;

pub use ast::{BooleanOperator, ParsedQuery};
pub use parser::parse_query;
