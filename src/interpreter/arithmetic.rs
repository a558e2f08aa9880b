//! Checked cell arithmetic for `+ - * / %`.
//!
//! The tape holds `i32` cells. Every operation is checked: overflow and zero
//! divisors become [`RuntimeError`]s instead of wrapping or trapping.

use crate::interpreter::errors::RuntimeError;
use crate::lexer::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl ArithOp {
    fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
            ArithOp::Mod => "%",
        }
    }
}

/// `left op right`, or the error that operation raises.
#[inline]
pub fn checked_apply(
    op: ArithOp,
    left: i32,
    right: i32,
    location: SourceLocation,
) -> Result<i32, RuntimeError> {
    let result = match op {
        ArithOp::Add => left.checked_add(right),
        ArithOp::Sub => left.checked_sub(right),
        ArithOp::Mul => left.checked_mul(right),
        ArithOp::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { location });
            }
            left.checked_div(right)
        }
        ArithOp::Mod => {
            if right == 0 {
                return Err(RuntimeError::ModuloByZero { location });
            }
            left.checked_rem(right)
        }
    };

    result.ok_or_else(|| RuntimeError::IntegerOverflow {
        operation: format!("{} {} {}", left, op.symbol(), right),
        location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOC: SourceLocation = SourceLocation { line: 1, column: 1 };

    #[test]
    fn test_basic_operations() {
        assert_eq!(checked_apply(ArithOp::Add, 2, 3, LOC), Ok(5));
        assert_eq!(checked_apply(ArithOp::Sub, 2, 3, LOC), Ok(-1));
        assert_eq!(checked_apply(ArithOp::Mul, -4, 3, LOC), Ok(-12));
        assert_eq!(checked_apply(ArithOp::Div, 7, 2, LOC), Ok(3));
        assert_eq!(checked_apply(ArithOp::Mod, -7, 3, LOC), Ok(-1));
    }

    #[test]
    fn test_zero_divisors() {
        assert_eq!(
            checked_apply(ArithOp::Div, 1, 0, LOC),
            Err(RuntimeError::DivisionByZero { location: LOC })
        );
        assert_eq!(
            checked_apply(ArithOp::Mod, 1, 0, LOC),
            Err(RuntimeError::ModuloByZero { location: LOC })
        );
    }

    #[test]
    fn test_overflow() {
        assert!(matches!(
            checked_apply(ArithOp::Add, i32::MAX, 1, LOC),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
        assert!(matches!(
            checked_apply(ArithOp::Div, i32::MIN, -1, LOC),
            Err(RuntimeError::IntegerOverflow { .. })
        ));
    }
}
