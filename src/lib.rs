#![allow(clippy::collapsible_if)]

pub mod diagnostics;
pub mod language;
pub mod runtime;

pub use language::{execute_program, Statement, VariableValue};
pub use runtime::{Class, Closure, Context, Instance, Method, RuntimeError, RuntimeResult, Value};

#[cfg(test)]
mod tests;
