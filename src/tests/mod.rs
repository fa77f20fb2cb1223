
use crate::language::{ast::Statement, exec::execute_program};
use crate::runtime::{
    class::{Class, Method},
    config::RuntimeConfig,
    context::{CaptureOutput, Context},
    environment::Closure,
    error::RuntimeResult,
    value::Value,
};
use std::rc::Rc;

pub(crate) struct Harness {
    pub closure: Closure,
    pub context: Context,
    pub output: CaptureOutput,
}

impl Harness {
    pub fn new() -> Self {
        let (context, output) = Context::capture();
        Self {
            closure: Closure::new(),
            context,
            output,
        }
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        let output = CaptureOutput::default();
        Self {
            closure: Closure::new(),
            context: Context::with_config(output.clone(), config),
            output,
        }
    }

    pub fn run(&mut self, statements: Vec<Statement>) -> RuntimeResult<Value> {
        let root = Statement::compound(statements);
        execute_program(&root, &mut self.closure, &mut self.context)
    }

    pub fn output(&self) -> String {
        self.output.contents()
    }

    pub fn global(&self, name: &str) -> Value {
        self.closure
            .get(name)
            .unwrap_or_else(|| panic!("`{name}` is not bound"))
    }
}

pub(crate) fn method(name: &str, params: &[&str], body: Vec<Statement>) -> Method {
    Method::new(
        name,
        params.iter().map(|p| p.to_string()).collect(),
        Statement::method_body(Statement::compound(body)),
    )
}

pub(crate) fn class(name: &str, methods: Vec<Method>) -> Rc<Class> {
    Rc::new(Class::new(name, methods, None))
}
