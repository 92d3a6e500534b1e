use super::{Operation, Stack};
use crate::lang::ast::{self, AcceptVisitor};
use crate::lang::{lex, parse, sanitize, Error};
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// Evaluate an arithmetic expression after stripping everything except
/// digits, `.`, `+ - * /` and parentheses.
pub fn evaluate(expression: &str) -> Result<f64> {
    let sanitized = sanitize(expression);
    trace!(%expression, %sanitized, "evaluate");
    let tokens = lex(&sanitized);
    let ast = parse(&tokens)?;
    Visitor::evaluate(&ast)
}

const EXPONENT_ABOVE: f64 = 1e21;
const EXPONENT_BELOW: f64 = 1e-6;

/// Render a result the way it is shown on the display. Very large and very
/// small magnitudes use exponent form, `1e+21` and `1.5e-7`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude.is_finite() && (magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW) {
        let s = format!("{:e}", value);
        return match s.find('e') {
            Some(i) if !s[i + 1..].starts_with('-') => format!("{}e+{}", &s[..i], &s[i + 1..]),
            _ => s,
        };
    }
    value.to_string()
}

/// Lenient float parse of the leading numeral; NaN when nothing parses.
pub fn parse_float(s: &str) -> f64 {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_point = false;
    for (index, ch) in s.char_indices() {
        match ch {
            '+' | '-' if index == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_point => seen_point = true,
            _ => break,
        }
        end = index + ch.len_utf8();
    }
    if !seen_digit {
        return f64::NAN;
    }
    if let Some(exponent) = s[end..].strip_prefix(|c| c == 'e' || c == 'E') {
        let sign = if exponent.starts_with(|c| c == '+' || c == '-') {
            1
        } else {
            0
        };
        let digits = exponent[sign..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .count();
        if digits > 0 {
            end += 1 + sign + digits;
        }
    }
    s[..end].parse().unwrap_or(f64::NAN)
}

struct Visitor {
    stack: Stack<f64>,
    error: Option<Error>,
}

impl Visitor {
    fn evaluate(expression: &ast::Expression) -> Result<f64> {
        let mut this = Visitor {
            stack: Stack::new("EXPRESSION TOO COMPLEX"),
            error: None,
        };
        expression.accept(&mut this);
        if let Some(error) = this.error {
            return Err(error);
        }
        let value = this.stack.pop()?;
        debug_assert!(this.stack.is_empty());
        Operation::finite(value)
    }

    fn expression(&mut self, expression: &ast::Expression) -> Result<()> {
        use ast::Expression;
        let value = match expression {
            Expression::Number(_, n) => *n,
            Expression::Negation(_, _) => Operation::negate(self.stack.pop()?)?,
            Expression::Multiply(..) => {
                let (lhs, rhs) = self.stack.pop_2()?;
                Operation::multiply(lhs, rhs)?
            }
            Expression::Divide(..) => {
                let (lhs, rhs) = self.stack.pop_2()?;
                Operation::divide(lhs, rhs)?
            }
            Expression::Add(..) => {
                let (lhs, rhs) = self.stack.pop_2()?;
                Operation::sum(lhs, rhs)?
            }
            Expression::Subtract(..) => {
                let (lhs, rhs) = self.stack.pop_2()?;
                Operation::subtract(lhs, rhs)?
            }
        };
        self.stack.push(value)
    }
}

impl ast::Visitor for Visitor {
    fn visit_expression(&mut self, expression: &ast::Expression) {
        if self.error.is_some() {
            return;
        }
        if let Err(error) = self.expression(expression) {
            self.error = Some(error.in_column(&expression.column()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_format_exponent() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("12.5"), 12.5);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float("0."), 0.0);
        assert_eq!(parse_float("4(2"), 4.0);
        assert!(parse_float("(5").is_nan());
        assert!(parse_float("Error").is_nan());
        assert!(parse_float("-").is_nan());
        assert_eq!(parse_float("7.5e+21"), 7.5e21);
        assert_eq!(parse_float("1.5e-7"), 1.5e-7);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("2e+x"), 2.0);
    }

    #[test]
    fn test_error_column() {
        let error = evaluate("1+2/0").unwrap_err();
        assert_eq!(error.to_string(), "INVALID EXPRESSION AT 3..4; DIVISION BY ZERO");
    }
}
