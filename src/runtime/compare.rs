use crate::runtime::{
    context::Context,
    error::{RuntimeError, RuntimeResult},
    value::Value,
};

pub const EQ_METHOD: &str = "__eq__";
pub const LT_METHOD: &str = "__lt__";

pub type Comparator = fn(&Value, &Value, &mut Context) -> RuntimeResult<bool>;

pub fn equal(lhs: &Value, rhs: &Value, context: &mut Context) -> RuntimeResult<bool> {
    match (lhs, rhs) {
        (Value::None, Value::None) => Ok(true),
        (Value::Number(a), Value::Number(b)) => Ok(a == b),
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Instance(instance), _) if instance.has_method(EQ_METHOD, 1) => Ok(instance
            .call(EQ_METHOD, vec![rhs.clone()], context)?
            .is_true()),
        _ => Err(RuntimeError::type_mismatch(format!(
            "cannot compare {} and {} for equality",
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

pub fn less(lhs: &Value, rhs: &Value, context: &mut Context) -> RuntimeResult<bool> {
    match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => Ok(a < b),
        (Value::String(a), Value::String(b)) => Ok(a < b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a < b),
        (Value::Instance(instance), _) if instance.has_method(LT_METHOD, 1) => Ok(instance
            .call(LT_METHOD, vec![rhs.clone()], context)?
            .is_true()),
        _ => Err(RuntimeError::type_mismatch(format!(
            "cannot order {} and {}",
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}

pub fn not_equal(lhs: &Value, rhs: &Value, context: &mut Context) -> RuntimeResult<bool> {
    Ok(!equal(lhs, rhs, context)?)
}

pub fn greater(lhs: &Value, rhs: &Value, context: &mut Context) -> RuntimeResult<bool> {
    Ok(!(less(lhs, rhs, context)? || equal(lhs, rhs, context)?))
}

pub fn less_or_equal(lhs: &Value, rhs: &Value, context: &mut Context) -> RuntimeResult<bool> {
    Ok(less(lhs, rhs, context)? || equal(lhs, rhs, context)?)
}

pub fn greater_or_equal(lhs: &Value, rhs: &Value, context: &mut Context) -> RuntimeResult<bool> {
    Ok(!less(lhs, rhs, context)?)
}
