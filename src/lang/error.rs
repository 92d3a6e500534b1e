use super::Column;

pub struct Error {
    code: ErrorCode,
    column: Column,
    message: String,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
    };
    ($err:ident, ..$col:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).in_column($col)
    };
    ($err:ident; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err).message($msg)
    };
    ($err:ident, ..$col:expr; $msg:expr) => {
        $crate::lang::Error::new($crate::lang::ErrorCode::$err)
            .in_column($col)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            column: 0..0,
            message: String::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn column(&self) -> Column {
        self.column.clone()
    }

    pub fn in_column(&self, column: &Column) -> Error {
        debug_assert_eq!(self.column, 0..0);
        Error {
            code: self.code,
            column: column.clone(),
            message: self.message.clone(),
        }
    }

    pub fn message(&self, message: &str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error {
            code: self.code,
            column: self.column.clone(),
            message: message.to_string(),
        }
    }

    /// Failures the runtime turns into the timed `Error` display.
    pub fn is_evaluation(&self) -> bool {
        match self.code {
            ErrorCode::InvalidExpression | ErrorCode::OutOfRange | ErrorCode::ParseFailure => true,
            ErrorCode::SyntaxError | ErrorCode::StorageError => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidExpression = 1,
    OutOfRange = 2,
    ParseFailure = 3,
    SyntaxError = 4,
    StorageError = 5,
}

impl Clone for Error {
    fn clone(&self) -> Self {
        Error {
            code: self.code,
            column: self.column.clone(),
            message: self.message.clone(),
        }
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Error) -> bool {
        self.code == other.code && self.column == other.column && self.message == other.message
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            InvalidExpression => "INVALID EXPRESSION",
            OutOfRange => "OUT OF RANGE",
            ParseFailure => "PARSE FAILURE",
            SyntaxError => "SYNTAX ERROR",
            StorageError => "STORAGE ERROR",
        };
        let mut suffix = String::new();
        if (0..0) != self.column {
            suffix.push_str(&format!(" AT {}..{}", self.column.start, self.column.end));
        }
        if !self.message.is_empty() {
            suffix.push_str(&format!("; {}", self.message));
        }
        write!(f, "{}{}", code_str, suffix)
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::new(ErrorCode::StorageError).message(&error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::new(ErrorCode::StorageError).message(&error.to_string())
    }
}
