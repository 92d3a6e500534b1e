use super::Column;

#[derive(Debug, PartialEq)]
pub enum Expression {
    Number(Column, f64),
    Negation(Column, Box<Expression>),
    Multiply(Column, Box<Expression>, Box<Expression>),
    Divide(Column, Box<Expression>, Box<Expression>),
    Add(Column, Box<Expression>, Box<Expression>),
    Subtract(Column, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn column(&self) -> Column {
        use Expression::*;
        match self {
            Number(col, ..)
            | Negation(col, ..)
            | Multiply(col, ..)
            | Divide(col, ..)
            | Add(col, ..)
            | Subtract(col, ..) => col.clone(),
        }
    }
}

pub trait Visitor {
    fn visit_expression(&mut self, _: &Expression) {}
}

pub trait AcceptVisitor {
    fn accept<V: Visitor>(&self, visitor: &mut V);
}

impl AcceptVisitor for Expression {
    fn accept<V: Visitor>(&self, visitor: &mut V) {
        use Expression::*;
        match self {
            Number(..) => {}
            Negation(_, expr) => expr.accept(visitor),
            Multiply(_, lhs, rhs)
            | Divide(_, lhs, rhs)
            | Add(_, lhs, rhs)
            | Subtract(_, lhs, rhs) => {
                lhs.accept(visitor);
                rhs.accept(visitor);
            }
        }
        visitor.visit_expression(self)
    }
}
