use crate::error;
use crate::lang::{Error, Operator};
use crate::mach::{Bitwise, Function, Input, Mode, NumberBase};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Input(Input),
    Help,
    Quit,
}

/// Command names offered by tab completion.
pub const COMMANDS: &[&str] = &[
    ":clear", ":back", ":std", ":sci", ":prog", ":date", ":bin", ":oct", ":dec", ":hex",
    ":angle", ":sin", ":cos", ":tan", ":log", ":ln", ":sqrt", ":sq", ":exp", ":fact", ":not",
    ":shl", ":shr", ":and", ":or", ":xor", ":start=", ":end=", ":birth=", ":diff", ":age",
    ":theme", ":history", ":help", ":quit",
];

/// Splits a terminal line into key presses. Words starting with `:` are
/// commands, every other character is a single key.
pub fn parse(line: &str) -> Result<Vec<Key>> {
    let mut keys = Vec::new();
    for word in line.split_whitespace() {
        if let Some(command) = word.strip_prefix(':') {
            keys.push(parse_command(command)?);
            continue;
        }
        for ch in word.chars() {
            keys.push(Key::Input(parse_char(ch)?));
        }
    }
    Ok(keys)
}

fn parse_char(ch: char) -> Result<Input> {
    if let Some(op) = Operator::from_char(ch) {
        return Ok(Input::Operator(op));
    }
    match ch {
        '0'..='9' | 'a'..='f' | 'A'..='F' => Ok(Input::Digit(ch)),
        '.' => Ok(Input::Point),
        '(' => Ok(Input::LParen),
        ')' => Ok(Input::RParen),
        '=' => Ok(Input::Equals),
        _ => Err(error!(SyntaxError; &format!("UNKNOWN KEY {}", ch))),
    }
}

fn parse_command(command: &str) -> Result<Key> {
    let lower = command.to_ascii_lowercase();
    if let Some((name, value)) = lower.split_once('=') {
        let value = command[name.len() + 1..].to_string();
        let input = match name {
            "start" => Input::SetStart(value),
            "end" => Input::SetEnd(value),
            "birth" => Input::SetBirth(value),
            _ => return Err(unknown(command)),
        };
        return Ok(Key::Input(input));
    }
    if let Some(function) = Function::from_name(&lower) {
        return Ok(Key::Input(Input::Function(function)));
    }
    let input = match lower.as_str() {
        "help" => return Ok(Key::Help),
        "quit" => return Ok(Key::Quit),
        "clear" => Input::Clear,
        "back" => Input::Backspace,
        "angle" => Input::ToggleAngle,
        "and" => Input::Bitwise(Bitwise::And),
        "or" => Input::Bitwise(Bitwise::Or),
        "xor" => Input::Bitwise(Bitwise::Xor),
        "not" => Input::Bitwise(Bitwise::Not),
        "shl" => Input::Bitwise(Bitwise::LeftShift),
        "shr" => Input::Bitwise(Bitwise::RightShift),
        "diff" => Input::CalculateDifference,
        "age" => Input::CalculateAge,
        "theme" => Input::ToggleTheme,
        "history" => Input::ToggleHistory,
        _ => {
            if let Ok(mode) = lower.parse::<Mode>() {
                Input::SetMode(mode)
            } else if let Ok(base) = lower.parse::<NumberBase>() {
                Input::SetBase(base)
            } else {
                return Err(unknown(command));
            }
        }
    };
    Ok(Key::Input(input))
}

fn unknown(command: &str) -> Error {
    error!(SyntaxError; &format!("UNKNOWN COMMAND :{}", command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_characters() {
        assert_eq!(
            parse("12+ 3=").unwrap(),
            vec![
                Key::Input(Input::Digit('1')),
                Key::Input(Input::Digit('2')),
                Key::Input(Input::Operator(Operator::Plus)),
                Key::Input(Input::Digit('3')),
                Key::Input(Input::Equals),
            ]
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(
            parse(":prog :HEX ff :not").unwrap(),
            vec![
                Key::Input(Input::SetMode(Mode::Programmer)),
                Key::Input(Input::SetBase(NumberBase::Hex)),
                Key::Input(Input::Digit('f')),
                Key::Input(Input::Digit('f')),
                Key::Input(Input::Bitwise(Bitwise::Not)),
            ]
        );
        assert_eq!(parse(":sq").unwrap(), vec![Key::Input(Input::Function(Function::Square))]);
        assert_eq!(parse(":quit").unwrap(), vec![Key::Quit]);
        assert_eq!(parse("  ").unwrap(), vec![]);
    }

    #[test]
    fn test_date_fields_keep_value() {
        assert_eq!(
            parse(":Birth=2000-06-15").unwrap(),
            vec![Key::Input(Input::SetBirth("2000-06-15".to_string()))]
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parse("2 % 3").unwrap_err().code(), ErrorCode::SyntaxError);
        assert_eq!(
            parse(":frobnicate").unwrap_err().to_string(),
            "SYNTAX ERROR; UNKNOWN COMMAND :frobnicate"
        );
    }
}
