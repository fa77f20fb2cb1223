pub mod ast;
pub mod exec;

pub use ast::{Statement, VariableValue};
pub use exec::execute_program;
