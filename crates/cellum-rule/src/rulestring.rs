//! Compact 1D aggregate ruleset strings.
//!
//! Grammar: `R<int>,C<int>,M<0|1>` followed by any number of `S<int>` and
//! `B<int>` tokens, comma separated.
//!
//! - `R`: radius; the neighbourhood spans `[-R, R]`
//! - `C`: reserved, parsed and kept but otherwise ignored
//! - `M`: whether the cell itself is part of its neighbourhood
//! - `S<n>`: with `n` living neighbours the cell keeps its state
//! - `B<n>`: with `n` living neighbours the cell is alive
//!
//! Every other count kills the cell. A later token for the same count
//! replaces an earlier one.

use crate::error::RuleError;
use crate::table::{AggregateCountTable, RuleTable};
use cellum_core::Outcome;
use cellum_space::Neighbourhood1D;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A parsed ruleset string.
///
/// ```
/// use cellum_core::Outcome;
/// use cellum_rule::RuleString;
///
/// let rs: RuleString = "R2,C0,M1,S1,B3".parse().unwrap();
/// assert_eq!(rs.outcome(1), Outcome::Unchanged);
/// assert_eq!(rs.outcome(3), Outcome::Live);
/// assert_eq!(rs.neighbourhood().unwrap().offsets(), &[-2, -1, 0, 1, 2]);
/// assert_eq!(rs.to_string(), "R2,C0,M1,S1,B3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleString {
    radius: u32,
    reserved: u32,
    include_middle: bool,
    outcomes: BTreeMap<usize, Outcome>,
}

impl RuleString {
    /// Largest accepted radius.
    pub const MAX_RADIUS: u32 = 255;

    /// Neighbourhood radius.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// The reserved `C` value.
    pub fn reserved(&self) -> u32 {
        self.reserved
    }

    /// Whether the cell itself is sampled.
    pub fn include_middle(&self) -> bool {
        self.include_middle
    }

    /// Number of sampled cells, `2R + M`.
    pub fn neighbourhood_size(&self) -> usize {
        2 * self.radius as usize + usize::from(self.include_middle)
    }

    /// Outcome for `count` living neighbours.
    pub fn outcome(&self, count: usize) -> Outcome {
        self.outcomes.get(&count).copied().unwrap_or_default()
    }

    /// The sampled offsets.
    pub fn neighbourhood(&self) -> Result<Neighbourhood1D, RuleError> {
        Ok(Neighbourhood1D::radius(self.radius, self.include_middle)?)
    }

    /// The aggregate table the ruleset describes.
    pub fn table(&self) -> AggregateCountTable {
        self.outcomes
            .iter()
            .fold(AggregateCountTable::new(), |t, (&count, &outcome)| {
                t.with(count, outcome)
            })
    }

    /// Neighbourhood and rule table together.
    pub fn build(&self) -> Result<(Neighbourhood1D, RuleTable), RuleError> {
        Ok((self.neighbourhood()?, self.table().into()))
    }
}

/// Parse the `<prefix><int>` token at a mandatory position.
fn header_field<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    expected: char,
) -> Result<u32, RuleError> {
    let token = tokens.next().unwrap_or("");
    match token.strip_prefix(expected) {
        Some(value) => parse_value(token, value),
        None => Err(RuleError::MissingField {
            expected,
            found: token.to_string(),
        }),
    }
}

fn parse_value(token: &str, value: &str) -> Result<u32, RuleError> {
    // `u32::from_str` accepts a leading '+'.
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RuleError::InvalidValue {
            token: token.to_string(),
        });
    }
    value.parse().map_err(|_| RuleError::InvalidValue {
        token: token.to_string(),
    })
}

impl FromStr for RuleString {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.chars().any(char::is_whitespace) {
            return Err(RuleError::EmbeddedWhitespace);
        }
        let mut tokens = s.split(',');

        let radius = header_field(&mut tokens, 'R')?;
        let reserved = header_field(&mut tokens, 'C')?;
        let include_middle = match header_field(&mut tokens, 'M')? {
            0 => false,
            1 => true,
            value => return Err(RuleError::InvalidMiddleFlag { value }),
        };
        if radius > Self::MAX_RADIUS {
            return Err(RuleError::RadiusOutOfRange {
                radius,
                max: Self::MAX_RADIUS,
            });
        }

        let mut rs = Self {
            radius,
            reserved,
            include_middle,
            outcomes: BTreeMap::new(),
        };
        let size = rs.neighbourhood_size();
        if size == 0 {
            return Err(RuleError::EmptyNeighbourhood);
        }

        for token in tokens {
            let (outcome, value) = if let Some(v) = token.strip_prefix('S') {
                (Outcome::Unchanged, v)
            } else if let Some(v) = token.strip_prefix('B') {
                (Outcome::Live, v)
            } else {
                return Err(RuleError::UnknownToken {
                    token: token.to_string(),
                });
            };
            let count = parse_value(token, value)? as usize;
            if count > size {
                return Err(RuleError::CountOutOfRange { count, max: size });
            }
            rs.outcomes.insert(count, outcome);
        }
        Ok(rs)
    }
}

/// Canonical form: header, then `S` counts ascending, then `B` counts
/// ascending.
impl fmt::Display for RuleString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{},C{},M{}",
            self.radius,
            self.reserved,
            u8::from(self.include_middle)
        )?;
        for (prefix, wanted) in [('S', Outcome::Unchanged), ('B', Outcome::Live)] {
            for (count, _) in self.outcomes.iter().filter(|&(_, &o)| o == wanted) {
                write!(f, ",{prefix}{count}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn abacus() {
        let rs: RuleString = "R2,C0,M1,S1,B3".parse().unwrap();
        assert_eq!(rs.radius(), 2);
        assert!(rs.include_middle());
        assert_eq!(rs.neighbourhood_size(), 5);
        assert_eq!(rs.outcome(0), Outcome::Die);
        assert_eq!(rs.outcome(1), Outcome::Unchanged);
        assert_eq!(rs.outcome(2), Outcome::Die);
        assert_eq!(rs.outcome(3), Outcome::Live);
        let (n, table) = rs.build().unwrap();
        assert_eq!(n.offsets(), &[-2, -1, 0, 1, 2]);
        assert!(table.check_arity(n.len()).is_ok());
    }

    #[test]
    fn without_middle() {
        let rs: RuleString = "R3,C0,M0,S0,S3,B0,B4".parse().unwrap();
        assert_eq!(rs.neighbourhood().unwrap().offsets(), &[-3, -2, -1, 1, 2, 3]);
        // B0 overrides S0.
        assert_eq!(rs.outcome(0), Outcome::Live);
        assert_eq!(rs.outcome(3), Outcome::Unchanged);
        assert_eq!(rs.outcome(4), Outcome::Live);
    }

    #[test]
    fn later_token_overwrites() {
        let rs: RuleString = "R1,C0,M1,B2,S2".parse().unwrap();
        assert_eq!(rs.outcome(2), Outcome::Unchanged);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let rs: RuleString = "  R1,C0,M1,B1\n".parse().unwrap();
        assert_eq!(rs.outcome(1), Outcome::Live);
    }

    #[test]
    fn embedded_whitespace_is_rejected() {
        assert_eq!(
            "R1, C0,M1".parse::<RuleString>(),
            Err(RuleError::EmbeddedWhitespace)
        );
    }

    #[test]
    fn header_must_come_first_in_order() {
        assert_eq!(
            "C0,R1,M1".parse::<RuleString>(),
            Err(RuleError::MissingField {
                expected: 'R',
                found: "C0".to_string()
            })
        );
        assert_eq!(
            "R1,C0".parse::<RuleString>(),
            Err(RuleError::MissingField {
                expected: 'M',
                found: String::new()
            })
        );
    }

    #[test]
    fn bad_values() {
        assert!(matches!(
            "Rx,C0,M1".parse::<RuleString>(),
            Err(RuleError::InvalidValue { .. })
        ));
        assert!(matches!(
            "R1,C0,M1,B+1".parse::<RuleString>(),
            Err(RuleError::InvalidValue { .. })
        ));
        assert!(matches!(
            "R1,C0,M1,S".parse::<RuleString>(),
            Err(RuleError::InvalidValue { .. })
        ));
        assert_eq!(
            "R1,C0,M2".parse::<RuleString>(),
            Err(RuleError::InvalidMiddleFlag { value: 2 })
        );
    }

    #[test]
    fn unknown_token() {
        assert_eq!(
            "R1,C0,M1,X3".parse::<RuleString>(),
            Err(RuleError::UnknownToken {
                token: "X3".to_string()
            })
        );
        // Trailing comma leaves an empty token.
        assert!(matches!(
            "R1,C0,M1,".parse::<RuleString>(),
            Err(RuleError::UnknownToken { .. })
        ));
    }

    #[test]
    fn ranges() {
        assert_eq!(
            "R256,C0,M1".parse::<RuleString>(),
            Err(RuleError::RadiusOutOfRange {
                radius: 256,
                max: 255
            })
        );
        assert_eq!(
            "R1,C0,M0,B3".parse::<RuleString>(),
            Err(RuleError::CountOutOfRange { count: 3, max: 2 })
        );
        assert_eq!(
            "R0,C0,M0".parse::<RuleString>(),
            Err(RuleError::EmptyNeighbourhood)
        );
        assert!("R0,C0,M1,B1".parse::<RuleString>().is_ok());
    }

    #[test]
    fn reserved_field_round_trips() {
        let rs: RuleString = "R1,C7,M1,S2".parse().unwrap();
        assert_eq!(rs.reserved(), 7);
        assert_eq!(rs.to_string(), "R1,C7,M1,S2");
    }

    #[test]
    fn display_is_canonical() {
        let rs: RuleString = "R2,C0,M1,B3,S4,B1,S0".parse().unwrap();
        assert_eq!(rs.to_string(), "R2,C0,M1,S0,S4,B1,B3");
    }

    fn arb_rulestring() -> impl Strategy<Value = String> {
        (0u32..6, 0u32..3, any::<bool>()).prop_flat_map(|(r, c, m)| {
            let size = 2 * r as usize + usize::from(m);
            let size = size.max(1);
            let r = if r == 0 && !m { 1 } else { r };
            prop::collection::vec((any::<bool>(), 0..=size), 0..8).prop_map(move |tokens| {
                let mut s = format!("R{r},C{c},M{}", u8::from(m));
                for (survive, n) in tokens {
                    s.push_str(&format!(",{}{n}", if survive { 'S' } else { 'B' }));
                }
                s
            })
        })
    }

    proptest! {
        #[test]
        fn display_then_parse_is_identity(s in arb_rulestring()) {
            let rs: RuleString = s.parse().unwrap();
            let again: RuleString = rs.to_string().parse().unwrap();
            prop_assert_eq!(rs, again);
        }

        #[test]
        fn table_matches_outcome(s in arb_rulestring(), count in 0usize..12) {
            let rs: RuleString = s.parse().unwrap();
            prop_assert_eq!(rs.table().get(count), rs.outcome(count));
        }
    }
}
