use crate::runtime::{
    context::Context,
    environment::Closure,
    error::{RuntimeError, RuntimeResult},
    executable::{Eval, Executable, FlowSignal},
    stack::ensure_sufficient_stack,
    value::Value,
};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

pub const SELF_BINDING: &str = "self";

#[derive(Clone)]
pub struct Method {
    pub name: String,
    pub formal_params: Vec<String>,
    pub body: Rc<dyn Executable>,
}

impl Method {
    pub fn new<S: Into<String>>(
        name: S,
        formal_params: Vec<String>,
        body: impl Executable + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            formal_params,
            body: Rc::new(body),
        }
    }

    pub fn arity(&self) -> usize {
        self.formal_params.len()
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.formal_params.join(", "))
    }
}

/// Named, immutable type object. Method lookup walks the parent chain, so a
/// subclass method shadows one of the same name further up.
#[derive(Debug)]
pub struct Class {
    name: String,
    methods: Vec<Method>,
    parent: Option<Rc<Class>>,
}

impl Class {
    pub fn new<S: Into<String>>(name: S, methods: Vec<Method>, parent: Option<Rc<Class>>) -> Self {
        Self {
            name: name.into(),
            methods,
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<Class>> {
        self.parent.as_ref()
    }

    /// Finds a method by name only: a subclass method shadows every parent
    /// method of that name, whatever its arity.
    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods
            .iter()
            .find(|method| method.name == name)
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.get_method(name)))
    }

    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.get_method(name)
            .is_some_and(|method| method.arity() == argument_count)
    }
}

struct InstanceData {
    class: Rc<Class>,
    fields: RefCell<Closure>,
}

/// Handle to a class instance. Clones alias the same field storage.
#[derive(Clone)]
pub struct Instance(Rc<InstanceData>);

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Instance(Rc::new(InstanceData {
            class,
            fields: RefCell::new(Closure::new()),
        }))
    }

    pub fn class(&self) -> &Rc<Class> {
        &self.0.class
    }

    pub fn fields(&self) -> Ref<'_, Closure> {
        self.0.fields.borrow()
    }

    pub fn fields_mut(&self) -> RefMut<'_, Closure> {
        self.0.fields.borrow_mut()
    }

    pub fn field(&self, name: &str) -> RuntimeResult<Value> {
        self.fields()
            .get(name)
            .ok_or_else(|| RuntimeError::UnknownField {
                class: self.class().name().to_string(),
                field: name.to_string(),
            })
    }

    pub fn has_method(&self, name: &str, argument_count: usize) -> bool {
        self.class().has_method(name, argument_count)
    }

    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Runs `method` in a fresh frame holding `self` and the parameters.
    #[tracing::instrument(level = "debug", skip(self, args, context), fields(class = %self.class().name()))]
    pub fn call(&self, method: &str, args: Vec<Value>, context: &mut Context) -> RuntimeResult<Value> {
        let resolved = self
            .class()
            .get_method(method)
            .filter(|candidate| candidate.arity() == args.len())
            .ok_or_else(|| RuntimeError::UnknownMethod {
                class: self.class().name().to_string(),
                method: method.to_string(),
                arity: args.len(),
            })?;

        let mut frame = Closure::new();
        frame.insert(SELF_BINDING, Value::Instance(self.clone()));
        for (param, value) in resolved.formal_params.iter().zip(args) {
            frame.insert(param.clone(), value);
        }

        context.enter_call()?;
        let result = ensure_sufficient_stack(|| resolved.body.execute(&mut frame, context));
        context.exit_call();

        match result? {
            Eval::Value(value) => Ok(value),
            Eval::Flow(FlowSignal::Return(_)) => {
                tracing::warn!(method, "return signal escaped a method without a body boundary");
                Err(RuntimeError::control_flow(format!(
                    "return escaped method `{}.{}`",
                    self.class().name(),
                    method
                )))
            }
        }
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} object at {:p}>", self.class().name(), Rc::as_ptr(&self.0))
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::ast::Statement;

    fn noop(name: &str, params: &[&str]) -> Method {
        Method::new(
            name,
            params.iter().map(|p| p.to_string()).collect(),
            Statement::method_body(Statement::None),
        )
    }

    #[test]
    fn lookup_walks_parent_chain() {
        let base = Rc::new(Class::new("Base", vec![noop("greet", &[]), noop("area", &[])], None));
        let derived = Class::new("Derived", vec![noop("area", &["scale"])], Some(base));

        assert!(derived.has_method("greet", 0));
        assert!(derived.has_method("area", 1));
        assert!(!derived.has_method("area", 0));
        assert!(!derived.has_method("missing", 0));
    }

    #[test]
    fn instance_clones_share_fields() {
        let class = Rc::new(Class::new("Box", Vec::new(), None));
        let first = Instance::new(class);
        let second = first.clone();

        first.fields_mut().insert("value", Value::Number(7));

        assert!(first.ptr_eq(&second));
        assert_eq!(second.field("value").unwrap().as_number(), Some(7));
    }

    #[test]
    fn reading_unset_field_fails() {
        let class = Rc::new(Class::new("Box", Vec::new(), None));
        let instance = Instance::new(class);

        let err = instance.field("value").unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownField { .. }));
    }

    #[test]
    fn calling_unknown_method_reports_arity() {
        let class = Rc::new(Class::new("Box", vec![noop("open", &[])], None));
        let instance = Instance::new(class);
        let (mut context, _output) = Context::capture();

        let err = instance
            .call("open", vec![Value::Number(1)], &mut context)
            .unwrap_err();
        assert!(matches!(
            err,
            RuntimeError::UnknownMethod { ref method, arity: 1, .. } if method == "open"
        ));
    }
}
