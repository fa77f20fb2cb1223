use crate::runtime::{
    class::{Class, Instance},
    context::Context,
    error::RuntimeResult,
};
use std::fmt;
use std::rc::Rc;

pub const STR_METHOD: &str = "__str__";

/// Shared handle to a runtime value. Cloning a handle never copies an
/// instance; both handles observe the same field storage.
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Number(i64),
    String(Rc<str>),
    Bool(bool),
    Class(Rc<Class>),
    Instance(Instance),
}

impl Value {
    pub fn string(value: impl Into<Rc<str>>) -> Self {
        Value::String(value.into())
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_true(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::None | Value::Class(_) | Value::Instance(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_class(&self) -> Option<&Rc<Class>> {
        match self {
            Value::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "None",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }

    /// Formats the value the way `print` shows it. Instances with a
    /// zero-argument `__str__` method are rendered through that method.
    pub fn render(&self, context: &mut Context) -> RuntimeResult<String> {
        match self {
            Value::Instance(instance) if instance.has_method(STR_METHOD, 0) => {
                instance.call(STR_METHOD, Vec::new(), context)?.render(context)
            }
            other => Ok(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Number(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "{v}"),
            Value::Bool(true) => write!(f, "True"),
            Value::Bool(false) => write!(f, "False"),
            Value::Class(class) => write!(f, "Class {}", class.name()),
            Value::Instance(instance) => write!(f, "{instance}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::string(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::string(value)
    }
}

impl From<Instance> for Value {
    fn from(value: Instance) -> Self {
        Value::Instance(value)
    }
}

impl From<Rc<Class>> for Value {
    fn from(value: Rc<Class>) -> Self {
        Value::Class(value)
    }
}
