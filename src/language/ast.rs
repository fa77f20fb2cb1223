use crate::runtime::{class::Class, compare::Comparator};
use std::rc::Rc;

/// Executable node tree. Every node owns its children; evaluation never
/// mutates the tree, only the closure and instance field storage.
#[derive(Clone, Debug)]
pub enum Statement {
    NumericConst(i64),
    StringConst(Rc<str>),
    BoolConst(bool),
    None,
    Variable(VariableValue),
    Assign(AssignStmt),
    FieldAssign(FieldAssignStmt),
    Print(PrintStmt),
    MethodCall(MethodCallExpr),
    NewInstance(NewInstanceExpr),
    Stringify(Box<Statement>),
    Binary(BinaryExpr),
    Not(Box<Statement>),
    Comparison(ComparisonExpr),
    Compound(Compound),
    MethodBody(Box<Statement>),
    Return(Box<Statement>),
    ClassDefinition(Rc<Class>),
    IfElse(IfElseStmt),
}

/// `name` or `name.field.field...`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableValue {
    pub name: String,
    pub dotted_ids: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct AssignStmt {
    pub name: String,
    pub value: Box<Statement>,
}

#[derive(Clone, Debug)]
pub struct FieldAssignStmt {
    pub object: VariableValue,
    pub field: String,
    pub value: Box<Statement>,
}

#[derive(Clone, Debug, Default)]
pub struct PrintStmt {
    pub args: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub struct MethodCallExpr {
    pub object: Box<Statement>,
    pub method: String,
    pub args: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub struct NewInstanceExpr {
    pub class: Rc<Class>,
    pub args: Vec<Statement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mult,
    Div,
    Or,
    And,
}

#[derive(Clone, Debug)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Statement>,
    pub right: Box<Statement>,
}

#[derive(Clone, Debug)]
pub struct ComparisonExpr {
    pub comparator: Comparator,
    pub left: Box<Statement>,
    pub right: Box<Statement>,
}

#[derive(Clone, Debug, Default)]
pub struct Compound {
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug)]
pub struct IfElseStmt {
    pub condition: Box<Statement>,
    pub then_branch: Box<Statement>,
    pub else_branch: Option<Box<Statement>>,
}

impl VariableValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dotted_ids: Vec::new(),
        }
    }

    /// Splits `["p", "pos", "x"]` into the head `p` and the field chain.
    pub fn dotted<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ids = ids.into_iter().map(Into::into);
        Self {
            name: ids.next().unwrap_or_default(),
            dotted_ids: ids.collect(),
        }
    }

    pub fn path(&self) -> String {
        std::iter::once(self.name.as_str())
            .chain(self.dotted_ids.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl PrintStmt {
    pub fn new(args: Vec<Statement>) -> Self {
        Self { args }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::new(vec![Statement::Variable(VariableValue::new(name))])
    }
}

impl Compound {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

fn binary(op: BinaryOp, left: Statement, right: Statement) -> Statement {
    Statement::Binary(BinaryExpr {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

impl Statement {
    pub fn number(value: i64) -> Self {
        Statement::NumericConst(value)
    }

    pub fn string(value: impl Into<Rc<str>>) -> Self {
        Statement::StringConst(value.into())
    }

    pub fn boolean(value: bool) -> Self {
        Statement::BoolConst(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Statement::Variable(VariableValue::new(name))
    }

    pub fn dotted<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Statement::Variable(VariableValue::dotted(ids))
    }

    pub fn assign(name: impl Into<String>, value: Statement) -> Self {
        Statement::Assign(AssignStmt {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn field_assign(object: VariableValue, field: impl Into<String>, value: Statement) -> Self {
        Statement::FieldAssign(FieldAssignStmt {
            object,
            field: field.into(),
            value: Box::new(value),
        })
    }

    pub fn print(args: Vec<Statement>) -> Self {
        Statement::Print(PrintStmt::new(args))
    }

    pub fn method_call(object: Statement, method: impl Into<String>, args: Vec<Statement>) -> Self {
        Statement::MethodCall(MethodCallExpr {
            object: Box::new(object),
            method: method.into(),
            args,
        })
    }

    pub fn new_instance(class: Rc<Class>, args: Vec<Statement>) -> Self {
        Statement::NewInstance(NewInstanceExpr { class, args })
    }

    pub fn stringify(argument: Statement) -> Self {
        Statement::Stringify(Box::new(argument))
    }

    pub fn add(left: Statement, right: Statement) -> Self {
        binary(BinaryOp::Add, left, right)
    }

    pub fn sub(left: Statement, right: Statement) -> Self {
        binary(BinaryOp::Sub, left, right)
    }

    pub fn mult(left: Statement, right: Statement) -> Self {
        binary(BinaryOp::Mult, left, right)
    }

    pub fn div(left: Statement, right: Statement) -> Self {
        binary(BinaryOp::Div, left, right)
    }

    pub fn or(left: Statement, right: Statement) -> Self {
        binary(BinaryOp::Or, left, right)
    }

    pub fn and(left: Statement, right: Statement) -> Self {
        binary(BinaryOp::And, left, right)
    }

    pub fn not(argument: Statement) -> Self {
        Statement::Not(Box::new(argument))
    }

    pub fn comparison(comparator: Comparator, left: Statement, right: Statement) -> Self {
        Statement::Comparison(ComparisonExpr {
            comparator,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn compound(statements: Vec<Statement>) -> Self {
        Statement::Compound(Compound::new(statements))
    }

    pub fn method_body(body: Statement) -> Self {
        Statement::MethodBody(Box::new(body))
    }

    pub fn return_value(value: Statement) -> Self {
        Statement::Return(Box::new(value))
    }

    pub fn class_definition(class: Rc<Class>) -> Self {
        Statement::ClassDefinition(class)
    }

    pub fn if_else(condition: Statement, then_branch: Statement, else_branch: Option<Statement>) -> Self {
        Statement::IfElse(IfElseStmt {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        })
    }
}

impl From<PrintStmt> for Statement {
    fn from(stmt: PrintStmt) -> Self {
        Statement::Print(stmt)
    }
}

impl From<Compound> for Statement {
    fn from(compound: Compound) -> Self {
        Statement::Compound(compound)
    }
}

impl From<VariableValue> for Statement {
    fn from(variable: VariableValue) -> Self {
        Statement::Variable(variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_path_splits_head_from_fields() {
        let variable = VariableValue::dotted(["p", "pos", "x"]);
        assert_eq!(variable.name, "p");
        assert_eq!(variable.dotted_ids, vec!["pos".to_string(), "x".to_string()]);
        assert_eq!(variable.path(), "p.pos.x");
    }

    #[test]
    fn compound_collects_pushed_statements() {
        let mut compound = Compound::default();
        assert!(compound.is_empty());
        compound.push(Statement::number(1));
        compound.push(PrintStmt::variable("x").into());
        assert_eq!(compound.len(), 2);
    }
}
