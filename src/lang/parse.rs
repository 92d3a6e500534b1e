use super::{ast::*, token::*, Column, Error};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

const UNARY_PRECEDENCE: usize = 30;
const MAX_NESTING: usize = 128;

pub fn parse(tokens: &[Token]) -> Result<Expression> {
    Parser::parse(tokens)
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Expression> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
            depth: 0,
        };
        if parse.peek().is_none() {
            return Err(error!(InvalidExpression; "EMPTY EXPRESSION"));
        }
        let expr = match parse.expression() {
            Ok(expr) => expr,
            Err(e) => return Err(e.in_column(&parse.col)),
        };
        match parse.next() {
            None => Ok(expr),
            Some(Token::RParen) => {
                Err(error!(InvalidExpression, ..&parse.col; "UNBALANCED PARENTHESIS"))
            }
            Some(_) => Err(error!(InvalidExpression, ..&parse.col; "UNEXPECTED TOKEN")),
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        let t = self.token_stream.next()?;
        self.col.start = self.col.end;
        self.col.end += t.to_string().chars().count();
        Some(t)
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn expression(&mut self) -> Result<Expression> {
        fn parse(this: &mut Parser, precedence: usize) -> Result<Expression> {
            if this.depth > MAX_NESTING {
                return Err(error!(InvalidExpression; "EXPRESSION TOO COMPLEX"));
            }
            this.depth += 1;
            let lhs = primary(this);
            this.depth -= 1;
            let mut lhs = lhs?;
            let mut rhs;
            loop {
                match this.peek() {
                    Some(Token::Operator(op)) => {
                        let op = *op;
                        let op_precedence = Expression::op_precedence(&op);
                        if op_precedence < precedence {
                            break;
                        }
                        this.next();
                        let column = this.column();
                        rhs = parse(this, op_precedence + 1)?;
                        lhs = Expression::for_binary_op(column, &op, lhs, rhs);
                    }
                    _ => break,
                }
            }
            Ok(lhs)
        }
        fn primary(this: &mut Parser) -> Result<Expression> {
            let lhs = match this.next() {
                Some(Token::LParen) => {
                    let expr = this.expression()?;
                    this.expect(Token::RParen)?;
                    expr
                }
                Some(Token::Operator(Operator::Minus)) => {
                    let column = this.column();
                    let expr = parse(this, UNARY_PRECEDENCE)?;
                    Expression::Negation(column, Box::new(expr))
                }
                Some(Token::Operator(Operator::Plus)) => parse(this, UNARY_PRECEDENCE)?,
                Some(Token::Literal(s)) => Expression::for_literal(this.column(), s)?,
                _ => return Err(error!(InvalidExpression; "EXPECTED EXPRESSION")),
            };
            Ok(lhs)
        }
        parse(self, 0)
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(InvalidExpression;
            match token {
                Unknown(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED NUMBER",
                Operator(_) => "EXPECTED OPERATOR",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "UNBALANCED PARENTHESIS",
            }
        ))
    }
}

impl Expression {
    fn for_binary_op(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        match op {
            Plus => Expression::Add(col, Box::new(lhs), Box::new(rhs)),
            Minus => Expression::Subtract(col, Box::new(lhs), Box::new(rhs)),
            Multiply => Expression::Multiply(col, Box::new(lhs), Box::new(rhs)),
            Divide => Expression::Divide(col, Box::new(lhs), Box::new(rhs)),
        }
    }

    fn op_precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Plus | Minus => 10,
            Multiply | Divide => 20,
        }
    }

    fn for_literal(col: Column, s: &str) -> Result<Expression> {
        match s.parse::<f64>() {
            Ok(n) => Ok(Expression::Number(col, n)),
            Err(_) => Err(error!(InvalidExpression; "MALFORMED NUMBER")),
        }
    }
}
