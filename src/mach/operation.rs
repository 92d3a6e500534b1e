use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    pub fn negate(val: f64) -> Result<f64> {
        Ok(-val)
    }

    pub fn multiply(lhs: f64, rhs: f64) -> Result<f64> {
        Operation::finite(lhs * rhs)
    }

    pub fn divide(lhs: f64, rhs: f64) -> Result<f64> {
        if rhs == 0.0 {
            return Err(error!(InvalidExpression; "DIVISION BY ZERO"));
        }
        Operation::finite(lhs / rhs)
    }

    pub fn sum(lhs: f64, rhs: f64) -> Result<f64> {
        Operation::finite(lhs + rhs)
    }

    pub fn subtract(lhs: f64, rhs: f64) -> Result<f64> {
        Operation::finite(lhs - rhs)
    }

    pub fn finite(val: f64) -> Result<f64> {
        if val.is_nan() {
            Err(error!(InvalidExpression; "NOT A NUMBER"))
        } else if val.is_infinite() {
            Err(error!(InvalidExpression; "OVERFLOW"))
        } else {
            Ok(val)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            Operation::divide(10.0, 0.0).unwrap_err().to_string(),
            "INVALID EXPRESSION; DIVISION BY ZERO"
        );
        assert!(Operation::divide(0.0, 0.0).is_err());
        assert_eq!(Operation::divide(10.0, 4.0).unwrap(), 2.5);
    }

    #[test]
    fn test_overflow() {
        assert_eq!(
            Operation::multiply(1e308, 10.0).unwrap_err().to_string(),
            "INVALID EXPRESSION; OVERFLOW"
        );
        assert_eq!(Operation::subtract(1.5, 0.25).unwrap(), 1.25);
    }
}
