use crate::error;
use crate::lang::Error;
use std::str::FromStr;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberBase {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl Default for NumberBase {
    fn default() -> Self {
        NumberBase::Dec
    }
}

impl NumberBase {
    pub const ALL: [NumberBase; 4] = [
        NumberBase::Bin,
        NumberBase::Oct,
        NumberBase::Dec,
        NumberBase::Hex,
    ];

    pub fn radix(self) -> u32 {
        use NumberBase::*;
        match self {
            Bin => 2,
            Oct => 8,
            Dec => 10,
            Hex => 16,
        }
    }

    /// Case-insensitive digit check.
    pub fn is_digit(self, ch: char) -> bool {
        ch.to_digit(self.radix()).is_some()
    }

    /// Parses the leading integer literal of `s`, ignoring whatever follows
    /// the last valid digit.
    pub fn parse(self, s: &str) -> Result<i64> {
        let s = s.trim_start();
        let (negative, digits) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (false, rest)
        } else {
            (false, s)
        };
        let end = digits
            .find(|c: char| !self.is_digit(c))
            .unwrap_or_else(|| digits.len());
        if end == 0 {
            return Err(error!(ParseFailure; "NOT A NUMBER"));
        }
        let magnitude = match i64::from_str_radix(&digits[..end], self.radix()) {
            Ok(n) => n,
            Err(_) => return Err(error!(ParseFailure; "OVERFLOW")),
        };
        Ok(if negative { -magnitude } else { magnitude })
    }

    pub fn render(self, value: i64) -> String {
        let magnitude = value.unsigned_abs();
        let digits = match self {
            NumberBase::Bin => format!("{:b}", magnitude),
            NumberBase::Oct => format!("{:o}", magnitude),
            NumberBase::Dec => format!("{}", magnitude),
            NumberBase::Hex => format!("{:X}", magnitude),
        };
        if value < 0 {
            format!("-{}", digits)
        } else {
            digits
        }
    }
}

/// Re-render an integer literal from one base into another. Anything that
/// does not parse becomes `"0"`.
pub fn convert(value: &str, from: NumberBase, to: NumberBase) -> String {
    if value.is_empty() || value == "0" {
        return "0".to_string();
    }
    match from.parse(value) {
        Ok(n) => to.render(n),
        Err(_) => "0".to_string(),
    }
}

impl std::fmt::Display for NumberBase {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use NumberBase::*;
        match self {
            Bin => write!(f, "BIN"),
            Oct => write!(f, "OCT"),
            Dec => write!(f, "DEC"),
            Hex => write!(f, "HEX"),
        }
    }
}

impl FromStr for NumberBase {
    type Err = Error;
    fn from_str(s: &str) -> Result<NumberBase> {
        match s.to_ascii_uppercase().as_str() {
            "BIN" => Ok(NumberBase::Bin),
            "OCT" => Ok(NumberBase::Oct),
            "DEC" => Ok(NumberBase::Dec),
            "HEX" => Ok(NumberBase::Hex),
            _ => Err(error!(SyntaxError; "UNKNOWN BASE")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use NumberBase::*;

    #[test]
    fn test_is_digit() {
        assert!(Bin.is_digit('1'));
        assert!(!Bin.is_digit('8'));
        assert!(Oct.is_digit('7'));
        assert!(!Oct.is_digit('8'));
        assert!(!Dec.is_digit('A'));
        assert!(Hex.is_digit('f'));
        assert!(Hex.is_digit('F'));
        assert!(!Hex.is_digit('G'));
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert("255", Dec, Hex), "FF");
        assert_eq!(convert("ff", Hex, Bin), "11111111");
        assert_eq!(convert("17", Oct, Dec), "15");
        assert_eq!(convert("1010", Bin, Oct), "12");
    }

    #[test]
    fn test_convert_zero_and_empty() {
        for from in NumberBase::ALL.iter() {
            for to in NumberBase::ALL.iter() {
                assert_eq!(convert("0", *from, *to), "0");
                assert_eq!(convert("", *from, *to), "0");
            }
        }
    }

    #[test]
    fn test_convert_lenient_prefix() {
        assert_eq!(convert("12G", Hex, Dec), "18");
        assert_eq!(convert("3.75", Dec, Bin), "11");
        assert_eq!(convert("Error", Dec, Hex), "0");
        assert_eq!(convert("2", Bin, Dec), "0");
    }

    #[test]
    fn test_convert_negative() {
        assert_eq!(convert("-6", Dec, Bin), "-110");
        assert_eq!(convert("-110", Bin, Hex), "-6");
    }

    #[test]
    fn test_overflow_is_parse_failure() {
        let error = Dec.parse("99999999999999999999").unwrap_err();
        assert_eq!(error.to_string(), "PARSE FAILURE; OVERFLOW");
        assert_eq!(convert("99999999999999999999", Dec, Hex), "0");
    }
}
