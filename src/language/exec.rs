use crate::language::ast::{
    AssignStmt, BinaryExpr, BinaryOp, ComparisonExpr, Compound, FieldAssignStmt, IfElseStmt,
    MethodCallExpr, NewInstanceExpr, PrintStmt, Statement, VariableValue,
};
use crate::runtime::{
    class::Instance,
    context::Context,
    environment::Closure,
    error::{RuntimeError, RuntimeResult},
    executable::{Eval, Executable, FlowSignal},
    value::Value,
};

pub const ADD_METHOD: &str = "__add__";
pub const INIT_METHOD: &str = "__init__";

/// Evaluates a child node, forwarding a return signal out of the caller.
macro_rules! eval {
    ($node:expr, $closure:expr, $context:expr) => {
        match $node.execute($closure, $context)? {
            Eval::Value(value) => value,
            flow @ Eval::Flow(_) => return Ok(flow),
        }
    };
}

/// Evaluates each node left to right, stopping at the first return signal.
macro_rules! eval_all {
    ($nodes:expr, $closure:expr, $context:expr) => {{
        let mut values = Vec::with_capacity($nodes.len());
        for node in $nodes.iter() {
            values.push(eval!(node, $closure, $context));
        }
        values
    }};
}

/// Runs `root` as a whole program. A `return` outside any method body has
/// nowhere to land and is reported as an internal error.
pub fn execute_program(
    root: &Statement,
    closure: &mut Closure,
    context: &mut Context,
) -> RuntimeResult<Value> {
    match root.execute(closure, context)? {
        Eval::Value(value) => Ok(value),
        Eval::Flow(FlowSignal::Return(_)) => {
            tracing::warn!("return signal escaped the program root");
            Err(RuntimeError::control_flow("`return` outside of a method body"))
        }
    }
}

impl Executable for Statement {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        match self {
            Statement::NumericConst(value) => Ok(Value::Number(*value).into()),
            Statement::StringConst(value) => Ok(Value::String(value.clone()).into()),
            Statement::BoolConst(value) => Ok(Value::Bool(*value).into()),
            Statement::None => Ok(Eval::none()),
            Statement::Variable(variable) => variable.lookup(closure).map(Eval::Value),
            Statement::Assign(stmt) => stmt.execute(closure, context),
            Statement::FieldAssign(stmt) => stmt.execute(closure, context),
            Statement::Print(stmt) => stmt.execute(closure, context),
            Statement::MethodCall(expr) => expr.execute(closure, context),
            Statement::NewInstance(expr) => expr.execute(closure, context),
            Statement::Stringify(argument) => {
                let value = eval!(argument, closure, context);
                let text = value.render(context)?;
                Ok(Value::string(text).into())
            }
            Statement::Binary(expr) => expr.execute(closure, context),
            Statement::Not(argument) => {
                let value = eval!(argument, closure, context);
                Ok(Value::Bool(!value.is_true()).into())
            }
            Statement::Comparison(expr) => expr.execute(closure, context),
            Statement::Compound(compound) => compound.execute(closure, context),
            Statement::MethodBody(body) => match body.execute(closure, context)? {
                Eval::Value(_) => Ok(Eval::none()),
                Eval::Flow(FlowSignal::Return(value)) => Ok(Eval::Value(value)),
            },
            Statement::Return(value) => {
                let value = eval!(value, closure, context);
                tracing::trace!(value = %value, "raising return signal");
                Ok(Eval::Flow(FlowSignal::Return(value)))
            }
            Statement::ClassDefinition(class) => {
                tracing::debug!(class = class.name(), "defining class");
                closure.insert(class.name(), Value::Class(class.clone()));
                Ok(Eval::none())
            }
            Statement::IfElse(stmt) => stmt.execute(closure, context),
        }
    }
}

impl VariableValue {
    pub fn lookup(&self, closure: &Closure) -> RuntimeResult<Value> {
        let mut current = closure
            .get(&self.name)
            .ok_or_else(|| RuntimeError::UnknownSymbol {
                name: self.name.clone(),
            })?;
        for field in &self.dotted_ids {
            let next = match &current {
                Value::Instance(instance) => instance.field(field)?,
                other => {
                    return Err(RuntimeError::type_mismatch(format!(
                        "cannot read field `{}` of {} in `{}`",
                        field,
                        other.type_name(),
                        self.path()
                    )));
                }
            };
            current = next;
        }
        Ok(current)
    }
}

impl AssignStmt {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        let value = eval!(self.value, closure, context);
        closure.insert(self.name.clone(), value.clone());
        Ok(Eval::Value(value))
    }
}

impl FieldAssignStmt {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        let instance = match self.object.lookup(closure)? {
            Value::Instance(instance) => instance,
            other => {
                return Err(RuntimeError::InvalidAssignmentTarget {
                    field: self.field.clone(),
                    found: other.type_name(),
                });
            }
        };
        let value = eval!(self.value, closure, context);
        instance.fields_mut().insert(self.field.clone(), value.clone());
        Ok(Eval::Value(value))
    }
}

impl PrintStmt {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        for (index, arg) in self.args.iter().enumerate() {
            if index > 0 {
                context.output().write_all(b" ")?;
            }
            let value = eval!(arg, closure, context);
            let text = value.render(context)?;
            context.output().write_all(text.as_bytes())?;
        }
        context.output().write_all(b"\n")?;
        Ok(Eval::none())
    }
}

impl MethodCallExpr {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        let instance = match eval!(self.object, closure, context) {
            Value::Instance(instance) => instance,
            other => {
                tracing::trace!(method = %self.method, receiver = other.type_name(), "method call on non-instance ignored");
                return Ok(Eval::none());
            }
        };
        let args = eval_all!(self.args, closure, context);
        instance.call(&self.method, args, context).map(Eval::Value)
    }
}

impl NewInstanceExpr {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        let instance = Instance::new(self.class.clone());
        tracing::debug!(class = self.class.name(), args = self.args.len(), "instantiating");
        if instance.has_method(INIT_METHOD, self.args.len()) {
            let args = eval_all!(self.args, closure, context);
            instance.call(INIT_METHOD, args, context)?;
        }
        Ok(Value::Instance(instance).into())
    }
}

impl BinaryExpr {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        match self.op {
            BinaryOp::Or => {
                if eval!(self.left, closure, context).is_true() {
                    return Ok(Value::Bool(true).into());
                }
                let right = eval!(self.right, closure, context);
                Ok(Value::Bool(right.is_true()).into())
            }
            BinaryOp::And => {
                if !eval!(self.left, closure, context).is_true() {
                    return Ok(Value::Bool(false).into());
                }
                let right = eval!(self.right, closure, context);
                Ok(Value::Bool(right.is_true()).into())
            }
            BinaryOp::Add => {
                let left = eval!(self.left, closure, context);
                let right = eval!(self.right, closure, context);
                eval_add(left, right, context).map(Eval::Value)
            }
            op @ (BinaryOp::Sub | BinaryOp::Mult | BinaryOp::Div) => {
                let left = eval!(self.left, closure, context);
                let right = eval!(self.right, closure, context);
                eval_numeric(op, left, right).map(Eval::Value)
            }
        }
    }
}

fn eval_add(left: Value, right: Value, context: &mut Context) -> RuntimeResult<Value> {
    if let Value::Instance(instance) = &left {
        if instance.has_method(ADD_METHOD, 1) {
            return instance.call(ADD_METHOD, vec![right], context);
        }
    }
    match (&left, &right) {
        (Value::String(a), Value::String(b)) => Ok(Value::string(format!("{a}{b}"))),
        (Value::Number(a), Value::Number(b)) => a
            .checked_add(*b)
            .map(Value::Number)
            .ok_or(RuntimeError::Overflow { operation: "addition" }),
        _ => Err(RuntimeError::type_mismatch(format!(
            "cannot add {} and {}",
            left.type_name(),
            right.type_name()
        ))),
    }
}

fn eval_numeric(op: BinaryOp, left: Value, right: Value) -> RuntimeResult<Value> {
    let (Value::Number(a), Value::Number(b)) = (&left, &right) else {
        return Err(RuntimeError::type_mismatch(format!(
            "{} expects numbers, found {} and {}",
            op_name(op),
            left.type_name(),
            right.type_name()
        )));
    };
    let (a, b) = (*a, *b);
    let result = match op {
        BinaryOp::Sub => a.checked_sub(b),
        BinaryOp::Mult => a.checked_mul(b),
        BinaryOp::Div => {
            if b == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            a.checked_div(b)
        }
        _ => unreachable!("non-arithmetic operator {op:?}"),
    };
    result.map(Value::Number).ok_or(RuntimeError::Overflow {
        operation: op_name(op),
    })
}

fn op_name(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "addition",
        BinaryOp::Sub => "subtraction",
        BinaryOp::Mult => "multiplication",
        BinaryOp::Div => "division",
        BinaryOp::Or => "or",
        BinaryOp::And => "and",
    }
}

impl ComparisonExpr {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        let left = eval!(self.left, closure, context);
        let right = eval!(self.right, closure, context);
        let result = (self.comparator)(&left, &right, context)?;
        Ok(Value::Bool(result).into())
    }
}

impl Compound {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        for statement in &self.statements {
            eval!(statement, closure, context);
        }
        Ok(Eval::none())
    }
}

impl IfElseStmt {
    fn execute(&self, closure: &mut Closure, context: &mut Context) -> RuntimeResult<Eval> {
        let condition = eval!(self.condition, closure, context);
        if condition.is_true() {
            self.then_branch.execute(closure, context)
        } else if let Some(else_branch) = &self.else_branch {
            else_branch.execute(closure, context)
        } else {
            Ok(Eval::none())
        }
    }
}
