//! Wolfram-code rule construction.
//!
//! A width-`k` rule has `2^k` neighbourhood patterns. Bit `i` of the code,
//! counted from the least significant end, is the next state of a cell
//! whose pattern (first neighbour most significant) reads `i` in binary.
//! Rule 30 at width 3 therefore maps `100`, `011`, `010` and `001` to a
//! living cell.

use crate::error::RuleError;
use crate::table::{ExactPatternTable, RuleTable};
use cellum_space::Neighbourhood1D;

/// Widest supported Wolfram neighbourhood.
///
/// Width 7 has 128 patterns, the most a `u128` code can describe.
pub const MAX_WIDTH: u32 = 7;

/// Largest valid code for a neighbourhood of `width` cells.
pub fn max_code(width: u32) -> u128 {
    let patterns = 1u32 << width;
    if patterns >= 128 {
        u128::MAX
    } else {
        (1u128 << patterns) - 1
    }
}

/// Build the neighbourhood and exact table of a Wolfram rule.
///
/// `width` must be odd and at most [`MAX_WIDTH`]; `code` must not exceed
/// [`max_code`]. The neighbourhood is the contiguous window
/// `[-(width / 2), width / 2]`. Every pattern is stored, so the table is
/// never empty, even for rule 0.
///
/// ```
/// use cellum_rule::{wolfram, Rule};
///
/// let (n, rule) = wolfram(30, 3).unwrap();
/// assert_eq!(n.offsets(), &[-1, 0, 1]);
/// assert!(rule.evaluate(&[true, false, false], false));
/// assert!(!rule.evaluate(&[true, true, true], false));
/// ```
pub fn wolfram(code: u128, width: u32) -> Result<(Neighbourhood1D, RuleTable), RuleError> {
    if width % 2 == 0 {
        return Err(RuleError::EvenWidth { width });
    }
    if width > MAX_WIDTH {
        return Err(RuleError::WidthOutOfRange {
            width,
            max: MAX_WIDTH,
        });
    }
    let max = max_code(width);
    if code > max {
        return Err(RuleError::CodeOutOfRange { code, max });
    }

    let mut table = ExactPatternTable::new(width as usize)?;
    for pattern in 0..(1u64 << width) {
        table.insert_packed(pattern, (code >> pattern) & 1 == 1)?;
    }
    let neighbourhood = Neighbourhood1D::elementary(width)?;
    Ok((neighbourhood, table.into()))
}

/// One of the 256 elementary (width 3) rules.
pub fn elementary(code: u8) -> Result<(Neighbourhood1D, RuleTable), RuleError> {
    wolfram(u128::from(code), 3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Rule;
    use proptest::prelude::*;

    fn states(pattern: u64, width: u32) -> Vec<bool> {
        (0..width).rev().map(|b| (pattern >> b) & 1 == 1).collect()
    }

    #[test]
    fn rule_30_truth_table() {
        let (_, rule) = elementary(30).unwrap();
        // 111 110 101 100 011 010 001 000 -> 0 0 0 1 1 1 1 0
        let expected = [false, true, true, true, true, false, false, false];
        for (pattern, &alive) in expected.iter().enumerate() {
            assert_eq!(
                rule.evaluate(&states(pattern as u64, 3), false),
                alive,
                "pattern {pattern:03b}"
            );
        }
    }

    #[test]
    fn rule_90_is_xor_of_outer_cells() {
        let (_, rule) = elementary(90).unwrap();
        for pattern in 0..8u64 {
            let s = states(pattern, 3);
            assert_eq!(rule.evaluate(&s, false), s[0] ^ s[2]);
        }
    }

    #[test]
    fn rule_zero_stores_every_pattern() {
        let (_, rule) = elementary(0).unwrap();
        assert!(!rule.is_empty());
        match rule {
            RuleTable::Exact(t) => {
                assert_eq!(t.len(), 8);
                assert_eq!(t.live_patterns().count(), 0);
            }
            RuleTable::Aggregate(_) => panic!("wolfram rules are exact"),
        }
    }

    #[test]
    fn even_width_is_rejected() {
        assert_eq!(wolfram(1, 4), Err(RuleError::EvenWidth { width: 4 }));
        assert_eq!(wolfram(0, 0), Err(RuleError::EvenWidth { width: 0 }));
    }

    #[test]
    fn width_above_max_is_rejected() {
        assert!(matches!(
            wolfram(1, 9),
            Err(RuleError::WidthOutOfRange { width: 9, .. })
        ));
    }

    #[test]
    fn code_bounds() {
        assert_eq!(max_code(1), 3);
        assert_eq!(max_code(3), 255);
        assert_eq!(max_code(5), u32::MAX as u128);
        assert_eq!(max_code(7), u128::MAX);
        assert!(wolfram(3, 1).is_ok());
        assert_eq!(
            wolfram(4, 1),
            Err(RuleError::CodeOutOfRange { code: 4, max: 3 })
        );
        assert!(wolfram(256, 3).is_err());
        assert!(wolfram(u128::MAX, 7).is_ok());
    }

    #[test]
    fn width_five_neighbourhood() {
        let (n, rule) = wolfram(0xFFFF_0000, 5).unwrap();
        assert_eq!(n.offsets(), &[-2, -1, 0, 1, 2]);
        // Patterns 16..32 have the first neighbour alive.
        assert!(rule.evaluate(&[true, false, false, false, false], false));
        assert!(!rule.evaluate(&[false, true, true, true, true], false));
    }

    proptest! {
        #[test]
        fn bit_i_is_pattern_i(code in any::<u8>(), pattern in 0u64..8) {
            let (_, rule) = elementary(code).unwrap();
            let expected = (code >> pattern) & 1 == 1;
            prop_assert_eq!(rule.evaluate(&states(pattern, 3), false), expected);
            prop_assert_eq!(rule.evaluate(&states(pattern, 3), true), expected);
        }
    }
}
