use super::token::*;

/// Drop every character that is not a digit, `.`, `+ - * /` or a parenthesis.
pub fn sanitize(s: &str) -> String {
    s.chars().filter(|c| is_expression_char(*c)).collect()
}

pub fn lex(s: &str) -> Vec<Token> {
    CalcLexer::lex(s)
}

fn is_expression_char(c: char) -> bool {
    is_calc_digit(c) || c == '.' || Token::from_char(c).is_some()
}

fn is_calc_digit(c: char) -> bool {
    c.is_ascii_digit()
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        loop {
            let ch = match self.chars().next() {
                Some(c) => c,
                None => {
                    debug_assert!(false, "Failed to tokenize number.");
                    return None;
                }
            };
            s.push(ch);
            if let Some(pk) = self.chars().peek() {
                if is_calc_digit(*pk) || *pk == '.' {
                    continue;
                }
            }
            break;
        }
        Some(Token::Literal(s))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        match Token::from_char(ch) {
            Some(t) => Some(t),
            None => {
                let mut s = String::new();
                s.push(ch);
                while let Some(pk) = self.chars().peek() {
                    if is_expression_char(*pk) {
                        break;
                    }
                    s.push(*pk);
                    self.chars().next();
                }
                Some(Token::Unknown(s))
            }
        }
    }
}

struct CalcLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Tokenizers<'a> for CalcLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for CalcLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let pk = self.chars.peek()?;
        if is_calc_digit(*pk) || *pk == '.' {
            return self.number();
        }
        self.minutia()
    }
}

impl<'a> CalcLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        CalcLexer {
            chars: s.chars().peekable(),
        }
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("2 + 3 * x"), "2+3*");
        assert_eq!(sanitize("50%2"), "502");
        assert_eq!(sanitize("alert(1)"), "(1)");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_lex_number_and_operators() {
        use Operator::*;
        assert_eq!(
            lex("12.5*(3-.5)"),
            vec![
                Token::Literal("12.5".to_string()),
                Token::Operator(Multiply),
                Token::LParen,
                Token::Literal("3".to_string()),
                Token::Operator(Minus),
                Token::Literal(".5".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_lex_unknown() {
        assert_eq!(
            lex("1 abc+2"),
            vec![
                Token::Literal("1".to_string()),
                Token::Unknown(" abc".to_string()),
                Token::Operator(Operator::Plus),
                Token::Literal("2".to_string()),
            ]
        );
    }

    #[test]
    fn test_lex_keeps_malformed_numbers_together() {
        assert_eq!(lex("1.2.3"), vec![Token::Literal("1.2.3".to_string())]);
    }
}
