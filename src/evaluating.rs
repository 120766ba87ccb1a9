use crate::error_handling::*;
use crate::parsing::*;
use crate::scanning::Operator;
use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

/// Largest result, in bits, that `^` is allowed to build.
const MAX_POWER_BITS: u64 = 1 << 20;

fn power(base: &BigInt, exponent: &BigInt) -> Result<BigInt> {
    let odd = (exponent % 2u32) != BigInt::zero();

    // 0, 1 and -1 stay small whatever the exponent
    if base.is_one() {
        return Ok(BigInt::one());
    }
    if *base == -BigInt::one() {
        return Ok(if odd { base.clone() } else { BigInt::one() });
    }
    if base.is_zero() {
        return if exponent.is_negative() {
            Err(CalcError::division_by_zero)
        } else if exponent.is_zero() {
            Ok(BigInt::one())
        } else {
            Ok(BigInt::zero())
        };
    }
    // 1 / base^n, truncated toward zero like division
    if exponent.is_negative() {
        return Ok(BigInt::zero());
    }
    let exponent = exponent
        .to_u64()
        .filter(|&n| n.saturating_mul(base.bits()) <= MAX_POWER_BITS)
        .ok_or(CalcError::exponent_too_large)?;
    Ok(Pow::pow(base, exponent))
}

pub fn apply(operator: Operator, left: &BigInt, right: &BigInt) -> Result<BigInt> {
    use Operator::*;

    match operator {
        addition => Ok(left + right),
        subtraction => Ok(left - right),
        multiplication => Ok(left * right),
        division => {
            if right.is_zero() {
                Err(CalcError::division_by_zero)
            } else {
                Ok(left / right)
            }
        },
        exponentiation => power(left, right),
    }
}

/// Runs a postfix program produced by [`parse`].
///
/// # Panics
///
/// If `expression` is not well-formed postfix. `parse` never returns such a
/// program.
pub fn evaluate(expression: &[ExprNode]) -> Result<BigInt> {
    let mut slots = Vec::<BigInt>::new();
    for node in expression {
        match node {
            ExprNode::number(value) => slots.push(value.clone()),

            ExprNode::negation => {
                let value = slots.pop().expect("negation without an operand");
                slots.push(-value);
            },

            ExprNode::operator(operator) => {
                let right = slots.pop().expect("operator without a right operand");
                let left = slots.pop().expect("operator without a left operand");
                slots.push(apply(*operator, &left, &right)?);
            },
        }
    }
    assert_eq!(slots.len(), 1, "postfix program left {} values", slots.len());
    Ok(slots.remove(0))
}
