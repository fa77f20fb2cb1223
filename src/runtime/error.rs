use miette::Diagnostic;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error, Diagnostic)]
pub enum RuntimeError {
    #[error("Unknown symbol `{name}`")]
    #[diagnostic(
        code(mython::unknown_symbol),
        help("assign a value to the name before reading it")
    )]
    UnknownSymbol { name: String },
    #[error("Object of class `{class}` has no field `{field}`")]
    #[diagnostic(code(mython::unknown_field))]
    UnknownField { class: String, field: String },
    #[error("Class `{class}` has no method `{method}` taking {arity} arguments")]
    #[diagnostic(code(mython::unknown_method))]
    UnknownMethod {
        class: String,
        method: String,
        arity: usize,
    },
    #[error("Cannot assign field `{field}` on a value of type {found}")]
    #[diagnostic(
        code(mython::invalid_assignment_target),
        help("only class instances carry fields")
    )]
    InvalidAssignmentTarget { field: String, found: &'static str },
    #[error("Type mismatch: {message}")]
    #[diagnostic(code(mython::type_mismatch))]
    TypeMismatch { message: String },
    #[error("Division by zero")]
    #[diagnostic(code(mython::division_by_zero))]
    DivisionByZero,
    #[error("Integer overflow in {operation}")]
    #[diagnostic(code(mython::overflow))]
    Overflow { operation: &'static str },
    #[error("Internal control flow error: {message}")]
    #[diagnostic(code(mython::control_flow))]
    ControlFlow { message: String },
    #[error("Maximum call depth of {limit} exceeded")]
    #[diagnostic(
        code(mython::recursion_limit),
        help("raise `max_call_depth` or MYTHON_MAX_CALL_DEPTH if the recursion is intended")
    )]
    RecursionLimit { limit: usize },
    #[error("Failed to write program output: {0}")]
    #[diagnostic(code(mython::io))]
    Io(#[from] std::io::Error),
}

impl RuntimeError {
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch {
            message: message.into(),
        }
    }

    pub fn control_flow(message: impl Into<String>) -> Self {
        RuntimeError::ControlFlow {
            message: message.into(),
        }
    }
}
