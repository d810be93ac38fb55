use crate::utils::error::Result;
use crate::utils::validation::validate_digit_sequence;

/// Adds two non-negative numbers held as big-endian decimal digit sequences.
///
/// Returns `Ok(None)` when either operand is absent; absence is a no-result
/// outcome, not an error, and short-circuits before the other operand is
/// validated. Both operands are validated in full before any arithmetic, so
/// an out-of-range element anywhere in either sequence fails the whole call.
///
/// Operand lengths may differ arbitrarily; the shorter operand contributes 0
/// at the positions it lacks. An empty sequence is the additive identity, and
/// two empty sequences sum to zero, encoded as the single digit `[0]`. The
/// result never carries redundant leading zeros.
pub fn add(left: Option<&[i32]>, right: Option<&[i32]>) -> Result<Option<Vec<i32>>> {
    let (left, right) = match (left, right) {
        (Some(left), Some(right)) => (left, right),
        _ => return Ok(None),
    };

    validate_digit_sequence("left", left)?;
    validate_digit_sequence("right", right)?;

    let positions = left.len().max(right.len());
    let mut digits = Vec::with_capacity(positions + 1);
    let mut carry = 0;

    // least-significant-first walk; the sequences are stored the other way
    for offset in 0..positions {
        let sum = digit_from_end(left, offset) + digit_from_end(right, offset) + carry;
        digits.push(sum % 10);
        carry = sum / 10;
    }
    if carry > 0 {
        digits.push(carry);
    }
    digits.reverse();

    Ok(Some(normalize(digits)))
}

fn digit_from_end(digits: &[i32], offset: usize) -> i32 {
    if offset < digits.len() {
        digits[digits.len() - 1 - offset]
    } else {
        0
    }
}

/// Strips redundant leading zeros; zero itself is always the single digit `0`.
fn normalize(mut digits: Vec<i32>) -> Vec<i32> {
    let leading = digits.iter().take_while(|&&d| d == 0).count();
    if leading == digits.len() {
        return vec![0];
    }
    digits.drain(..leading);
    digits
}
