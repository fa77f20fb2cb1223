use crate::runtime::{context::Context, environment::Closure, error::RuntimeResult, value::Value};

/// Non-local exit raised by `return` and absorbed at the nearest method body.
#[derive(Clone, Debug)]
pub enum FlowSignal {
    Return(Value),
}

/// Outcome of executing a node: either an ordinary value or an unwinding
/// signal that every enclosing node forwards untouched.
#[derive(Clone, Debug)]
pub enum Eval {
    Value(Value),
    Flow(FlowSignal),
}

impl Eval {
    pub fn none() -> Self {
        Eval::Value(Value::None)
    }

    pub fn is_flow(&self) -> bool {
        matches!(self, Eval::Flow(_))
    }
}

impl From<Value> for Eval {
    fn from(value: Value) -> Self {
        Eval::Value(value)
    }
}

pub trait Executable {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval>;
}
