#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Literal(String),
    Operator(Operator),
    LParen,
    RParen,
}

impl Token {
    pub fn from_char(c: char) -> Option<Token> {
        match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => Operator::from_char(c).map(Token::Operator),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Literal(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    Plus,
    Minus,
    Multiply,
    Divide,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Operator> {
        use Operator::*;
        match c {
            '+' => Some(Plus),
            '-' => Some(Minus),
            '*' => Some(Multiply),
            '/' => Some(Divide),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Token::from_char('*'), Some(Token::Operator(Operator::Multiply)));
        assert_eq!(Token::from_char(')'), Some(Token::RParen));
        assert_eq!(Token::from_char('%'), None);
    }
}
