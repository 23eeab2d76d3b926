use arrayvec::{ArrayString, CapacityError};

/// Decimal digits of u128::MAX
const MAX_DIGITS: usize = 39;

/// Renders a 16 byte little-endian amount of indivisible units with the
/// decimal point placed `nomination` digits from the right.
///
/// Trailing zeros of the fraction are dropped, along with the point itself
/// when nothing is left after it, so 10^24 yoctoNEAR shows as "1".
pub fn format_long_decimal_amount<const N: usize>(
    amount: &[u8; 16],
    nomination: usize,
) -> Result<ArrayString<N>, CapacityError> {
    let mut value = u128::from_le_bytes(*amount);
    let mut digits = [0u8; MAX_DIGITS];
    let mut n = 0;
    loop {
        digits[n] = b'0' + (value % 10) as u8;
        value /= 10;
        n += 1;
        if value == 0 {
            break;
        }
    }
    digits[..n].reverse();
    let digits = &digits[..n];

    let (int_part, frac_part) = if n > nomination {
        digits.split_at(n - nomination)
    } else {
        (&b"0"[..], digits)
    };
    let leading_zeros = nomination.saturating_sub(n);
    let frac_len = frac_part
        .iter()
        .rposition(|d| *d != b'0')
        .map_or(0, |i| i + 1);

    let mut out = ArrayString::<N>::new();
    let mut push = |c: u8| out.try_push(char::from(c)).map_err(|e| e.simplify());
    for d in int_part {
        push(*d)?;
    }
    if frac_len > 0 {
        push(b'.')?;
        for _ in 0..leading_zeros {
            push(b'0')?;
        }
        for d in &frac_part[..frac_len] {
            push(*d)?;
        }
    }
    Ok(out)
}
