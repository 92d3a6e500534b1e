mod common;
use common::*;
use multicalc::lang::ErrorCode;
use multicalc::mach::evaluate;

#[test]
fn test_precedence() {
    assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
    assert_eq!(evaluate("(2+3)*4").unwrap(), 20.0);
    assert_eq!(display_after("2+3*4="), "14");
}

#[test]
fn test_left_assoc() {
    assert_eq!(evaluate("1.5/2*3").unwrap(), 2.25);
    assert_eq!(evaluate("8-4-2").unwrap(), 2.0);
    assert_eq!(evaluate("1.5/(2.0*3)").unwrap(), 0.25);
}

#[test]
fn test_unary() {
    assert_eq!(evaluate("-2*3").unwrap(), -6.0);
    assert_eq!(evaluate("+4").unwrap(), 4.0);
    assert_eq!(evaluate("2*-3").unwrap(), -6.0);
    assert_eq!(evaluate("5--3").unwrap(), 8.0);
    assert_eq!(evaluate("5+-3").unwrap(), 2.0);
    assert_eq!(evaluate("(05)").unwrap(), 5.0);
}

#[test]
fn test_sanitized_away() {
    assert_eq!(evaluate("2 + 3").unwrap(), 5.0);
    assert_eq!(evaluate("alert(1)+2").unwrap(), 3.0);
}

#[test]
fn test_failures() {
    for input in &["10/0", "", "2+", "(2+3", "2+3)", "1.2.3+1", "abc"] {
        assert_eq!(
            evaluate(input).unwrap_err().code(),
            ErrorCode::InvalidExpression,
            "{}",
            input
        );
    }
}

#[test]
fn test_decimals() {
    assert_eq!(display_after("1.5+1.5="), "3");
    assert_eq!(display_after("7/2="), "3.5");
    assert_eq!(display_after("0-0="), "0");
}
