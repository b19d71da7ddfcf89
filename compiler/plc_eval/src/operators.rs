//! Binary operator evaluation.
//!
//! The interpreter handles `&&` and `||` itself so it can short-circuit;
//! here they only apply to two booleans.

use std::cmp::Ordering;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};
use plc_ir::BinaryOp;

use crate::errors::binary_type_mismatch;
use crate::{EvalError, EvalResult, Value};

/// Evaluate a binary operation on two evaluated operands.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => return Ok(Value::Boolean(left == right)),
        BinaryOp::NotEq => return Ok(Value::Boolean(left != right)),
        BinaryOp::Add if left.is_string() || right.is_string() => {
            return Ok(Value::String(format!("{left}{right}")));
        }
        _ => {}
    }

    let result = match (&left, &right) {
        (Value::Integer(a), Value::Integer(b)) => eval_int_binary(a, b, op),
        (Value::Decimal(a), Value::Integer(b)) if op == BinaryOp::Pow => decimal_pow(a, b).map(Some),
        (Value::Decimal(a), Value::Decimal(b)) => eval_decimal_binary(a, b, op),
        (Value::Boolean(a), Value::Boolean(b)) => Ok(eval_bool_binary(*a, *b, op)),
        (Value::Character(a), Value::Character(b)) => Ok(eval_ordering(a.cmp(b), op)),
        (Value::String(a), Value::String(b)) => Ok(eval_ordering(a.cmp(b), op)),
        _ => Ok(None),
    }?;
    result.ok_or_else(|| binary_type_mismatch(&left, &right, op))
}

/// `Ok(None)` means the operator does not apply to two integers.
fn eval_int_binary(a: &BigInt, b: &BigInt, op: BinaryOp) -> Result<Option<Value>, EvalError> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            // Truncates toward zero.
            a / b
        }
        BinaryOp::Pow => a.pow(exponent(b)?),
        _ => return Ok(eval_ordering(a.cmp(b), op)),
    };
    Ok(Some(Value::Integer(value)))
}

fn eval_decimal_binary(
    a: &BigDecimal,
    b: &BigDecimal,
    op: BinaryOp,
) -> Result<Option<Value>, EvalError> {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => decimal_div(a, b)?,
        BinaryOp::Pow => return Ok(None),
        _ => return Ok(eval_ordering(a.cmp(b), op)),
    };
    Ok(Some(Value::Decimal(value)))
}

fn eval_bool_binary(a: bool, b: bool, op: BinaryOp) -> Option<Value> {
    match op {
        BinaryOp::And => Some(Value::Boolean(a && b)),
        BinaryOp::Or => Some(Value::Boolean(a || b)),
        _ => None,
    }
}

/// `<` and `>` from an already computed ordering.
fn eval_ordering(ordering: Ordering, op: BinaryOp) -> Option<Value> {
    match op {
        BinaryOp::Lt => Some(Value::Boolean(ordering == Ordering::Less)),
        BinaryOp::Gt => Some(Value::Boolean(ordering == Ordering::Greater)),
        _ => None,
    }
}

/// Exponents must be non-negative and fit in a `u32`.
fn exponent(b: &BigInt) -> Result<u32, EvalError> {
    if b.sign() == Sign::Minus {
        return Err(EvalError::NegativeExponent { exponent: b.clone() });
    }
    b.to_u32()
        .ok_or_else(|| EvalError::ExponentOutOfRange { exponent: b.clone() })
}

/// `a ^ n` keeping every digit: the unscaled value is raised to `n` and the
/// scale multiplied by `n`.
fn decimal_pow(a: &BigDecimal, b: &BigInt) -> Result<Value, EvalError> {
    let n = exponent(b)?;
    let (unscaled, scale) = a.as_bigint_and_exponent();
    let scale = scale
        .checked_mul(i64::from(n))
        .ok_or_else(|| EvalError::ExponentOutOfRange { exponent: b.clone() })?;
    Ok(Value::Decimal(BigDecimal::new(unscaled.pow(n), scale)))
}

/// Divide keeping the dividend's scale, rounding half to even.
fn decimal_div(a: &BigDecimal, b: &BigDecimal) -> Result<BigDecimal, EvalError> {
    if b.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    let (a_unscaled, a_scale) = a.as_bigint_and_exponent();
    let (b_unscaled, b_scale) = b.as_bigint_and_exponent();

    // a / b at scale s_a has unscaled value a_u * 10^s_b / b_u.
    let shift = |value: BigInt, by: i64| -> Result<BigInt, EvalError> {
        let by = u32::try_from(by).map_err(|_| EvalError::ExponentOutOfRange {
            exponent: BigInt::from(by),
        })?;
        Ok(value * BigInt::from(10).pow(by))
    };
    let (numerator, denominator) = if b_scale >= 0 {
        (shift(a_unscaled, b_scale)?, b_unscaled)
    } else {
        (a_unscaled, shift(b_unscaled, -b_scale)?)
    };

    Ok(BigDecimal::new(
        div_round_half_even(&numerator, &denominator),
        a_scale,
    ))
}

/// Integer division rounding to the nearest quotient, ties to even.
fn div_round_half_even(numerator: &BigInt, denominator: &BigInt) -> BigInt {
    let negative = (numerator.sign() == Sign::Minus) != (denominator.sign() == Sign::Minus);
    let n = numerator.magnitude();
    let d = denominator.magnitude();

    let mut quotient = n / d;
    let twice_remainder = (n % d) * 2u32;
    let round_up = match twice_remainder.cmp(d) {
        Ordering::Greater => true,
        Ordering::Equal => !(&quotient % 2u32).is_zero(),
        Ordering::Less => false,
    };
    if round_up {
        quotient += 1u32;
    }

    let quotient = BigInt::from(quotient);
    if negative {
        -quotient
    } else {
        quotient
    }
}
