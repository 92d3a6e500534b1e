use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Bitwise transforms over the 32-bit signed reading of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bitwise {
    And,
    Or,
    Xor,
    Not,
    LeftShift,
    RightShift,
}

impl Bitwise {
    /// AND, OR and XOR take a second operand.
    pub fn is_binary(self) -> bool {
        matches!(self, Bitwise::And | Bitwise::Or | Bitwise::Xor)
    }

    pub fn unary(self, value: i64) -> Result<i64> {
        let value = to_int32(value);
        let result = match self {
            Bitwise::Not => !value,
            Bitwise::LeftShift => value.wrapping_shl(1),
            Bitwise::RightShift => value >> 1,
            Bitwise::And | Bitwise::Or | Bitwise::Xor => {
                return Err(error!(InvalidExpression; "MISSING OPERAND"))
            }
        };
        Ok(i64::from(result))
    }

    pub fn binary(self, lhs: i64, rhs: i64) -> Result<i64> {
        let (lhs, rhs) = (to_int32(lhs), to_int32(rhs));
        let result = match self {
            Bitwise::And => lhs & rhs,
            Bitwise::Or => lhs | rhs,
            Bitwise::Xor => lhs ^ rhs,
            Bitwise::Not | Bitwise::LeftShift | Bitwise::RightShift => {
                return Err(error!(InvalidExpression; "UNEXPECTED OPERAND"))
            }
        };
        Ok(i64::from(result))
    }
}

/// Wrapping truncation to 32 bits.
fn to_int32(value: i64) -> i32 {
    value as i32
}

impl std::fmt::Display for Bitwise {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Bitwise::*;
        match self {
            And => write!(f, "AND"),
            Or => write!(f, "OR"),
            Xor => write!(f, "XOR"),
            Not => write!(f, "NOT"),
            LeftShift => write!(f, "LSHIFT"),
            RightShift => write!(f, "RSHIFT"),
        }
    }
}
