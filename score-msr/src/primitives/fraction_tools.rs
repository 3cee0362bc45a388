//! Tools for reading fractions as musical lengths.

/// True for 1, 2, 4, 8…
pub fn is_power_of_two(num: u64) -> bool {
    num != 0 && num & (num - 1) == 0
}

/// Largest power of two not greater than `num`.
pub fn power_of_two_floor(num: u64) -> Option<u64> {
    match num {
        0 => None,
        _ => Some(1 << (63 - num.leading_zeros())),
    }
}

/// Split numerator of a lowest-terms fraction into the numerator of its
/// base note value and the amount of dots.
///
/// A dotted value has numerator `2^(k+1) - 1` for `k` dots: 3/8 is a
/// dotted quarter (2/8), 7/16 a double-dotted quarter (4/16).
///
/// # Returns
/// None, if the numerator can not be notated by a single dotted value.
///
/// # Example
/// ```
/// # use score_msr::primitives::fraction_tools::dotted_decomposition;
/// assert_eq!(dotted_decomposition(1), Some((1, 0)));
/// assert_eq!(dotted_decomposition(3), Some((2, 1)));
/// assert_eq!(dotted_decomposition(15), Some((8, 3)));
/// assert_eq!(dotted_decomposition(5), None);
/// ```
pub fn dotted_decomposition(numerator: u64) -> Option<(u64, u8)> {
    if numerator == 1 {
        return Some((1, 0));
    }
    let next = numerator.checked_add(1)?;
    if !is_power_of_two(next) {
        return None;
    }
    let base = power_of_two_floor(numerator)?;
    let dots = next.trailing_zeros() - 1;
    Some((base, dots as u8))
}

#[cfg(test)]
mod tests {
    use super::{dotted_decomposition, is_power_of_two, power_of_two_floor};

    #[test]
    fn powers() {
        assert!(is_power_of_two(1));
        assert!(is_power_of_two(64));
        assert!(!is_power_of_two(0));
        assert!(!is_power_of_two(12));
        assert_eq!(power_of_two_floor(13), Some(8));
        assert_eq!(power_of_two_floor(16), Some(16));
        assert_eq!(power_of_two_floor(0), None);
    }

    #[test]
    fn dots() {
        assert_eq!(dotted_decomposition(7), Some((4, 2)));
        assert_eq!(dotted_decomposition(2), None);
        assert_eq!(dotted_decomposition(9), None);
    }
}
