use crate::error;
use crate::lang::Error;
use std::f64::consts::PI;

type Result<T> = std::result::Result<T, Error>;

const MAX_FACTORIAL: f64 = 170.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    Deg,
    Rad,
}

impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Deg
    }
}

impl AngleMode {
    pub fn toggle(self) -> AngleMode {
        match self {
            AngleMode::Deg => AngleMode::Rad,
            AngleMode::Rad => AngleMode::Deg,
        }
    }

    fn radians(self, val: f64) -> f64 {
        match self {
            AngleMode::Deg => val * PI / 180.0,
            AngleMode::Rad => val,
        }
    }
}

impl std::fmt::Display for AngleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            AngleMode::Deg => write!(f, "DEG"),
            AngleMode::Rad => write!(f, "RAD"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Square,
    Exp,
    Fact,
}

impl Function {
    pub fn from_name(func_name: &str) -> Option<Function> {
        use Function::*;
        match func_name {
            "sin" => Some(Sin),
            "cos" => Some(Cos),
            "tan" => Some(Tan),
            "log" => Some(Log),
            "ln" => Some(Ln),
            "sqrt" => Some(Sqrt),
            "sq" | "x²" => Some(Square),
            "exp" => Some(Exp),
            "fact" => Some(Fact),
            _ => None,
        }
    }

    /// Non-finite results are returned as they are; callers decide whether
    /// they are failures.
    pub fn call(self, val: f64, angle: AngleMode) -> Result<f64> {
        use Function::*;
        match self {
            Sin => Ok(angle.radians(val).sin()),
            Cos => Ok(angle.radians(val).cos()),
            Tan => Ok(angle.radians(val).tan()),
            Log => Ok(val.log10()),
            Ln => Ok(val.ln()),
            Sqrt => Ok(val.sqrt()),
            Square => Ok(val * val),
            Exp => Ok(val.exp()),
            Fact => Function::factorial(val),
        }
    }

    pub fn factorial(val: f64) -> Result<f64> {
        let n = val.floor();
        if n.is_nan() || n < 0.0 || n > MAX_FACTORIAL {
            return Err(error!(OutOfRange; "FACTORIAL"));
        }
        let mut product = 1.0;
        let mut i = 2.0;
        while i <= n {
            product *= i;
            i += 1.0;
        }
        Ok(product)
    }
}

impl std::fmt::Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Function::*;
        match self {
            Sin => write!(f, "sin"),
            Cos => write!(f, "cos"),
            Tan => write!(f, "tan"),
            Log => write!(f, "log"),
            Ln => write!(f, "ln"),
            Sqrt => write!(f, "sqrt"),
            Square => write!(f, "x²"),
            Exp => write!(f, "exp"),
            Fact => write!(f, "fact"),
        }
    }
}
