//! Named rules.
//!
//! The 1D presets are aggregate ruleset strings; see [`RuleString`] for
//! the grammar. [`named`] looks them up by the names the CLI accepts.

use crate::error::RuleError;
use crate::rulestring::RuleString;
use crate::table::{AggregateCountTable, ExactPatternTable, RuleTable};
use cellum_core::Outcome;
use cellum_space::{Neighbourhood1D, Neighbourhood2D};

/// Radius 10, flowering patterns from a random start.
pub const TULIPS: &str =
    "R10,C0,M1,S0,S3,S6,S10,S11,S14,S15,S16,S17,S18,S19,S20,S21,B1,B11,B12,B17,B18,B19,B20,B21";
/// Radius 3 without the middle cell.
pub const THE_CITY: &str = "R3,C0,M0,S0,S3,B0,B4";
/// Radius 4, branching growth.
pub const ROOTS: &str = "R4,C0,M1,S1,S2,S5,S6,S9,B3,B4,B6";
/// Radius 2, sliding beads.
pub const ABACUS: &str = "R2,C0,M1,S1,B3";
/// Radius 2, a class 4 (complex) rule.
pub const CLASS_4A: &str = "R2,C0,M1,S1,B2,B3,B4";
/// Radius 5.
pub const DATE_PALM: &str = "R5,C0,M1,S7,S8,S9,S10,S11,B0";

/// Every named 1D preset as `(name, ruleset)`.
pub const RULESETS: [(&str, &str); 6] = [
    ("tulips", TULIPS),
    ("the-city", THE_CITY),
    ("roots", ROOTS),
    ("abacus", ABACUS),
    ("class-4a", CLASS_4A),
    ("date-palm", DATE_PALM),
];

/// Look a 1D preset up by name. Underscores and dashes are interchangeable.
pub fn named(name: &str) -> Option<RuleString> {
    let name = name.trim().to_ascii_lowercase().replace('_', "-");
    RULESETS
        .iter()
        .find(|(n, _)| *n == name)
        .and_then(|(_, ruleset)| ruleset.parse().ok())
}

/// The rule every built-in species uses: exactly one living neighbour out
/// of two brings the cell to life, anything else kills it.
pub fn species_default() -> RuleTable {
    AggregateCountTable::new()
        .with(0, Outcome::Die)
        .with(1, Outcome::Live)
        .with(2, Outcome::Die)
        .into()
}

/// Conway's Game of Life as an aggregate rule over the Moore
/// neighbourhood: survive on 2, born on 3.
pub fn game_of_life() -> (Neighbourhood2D, RuleTable) {
    let table = AggregateCountTable::new()
        .with(2, Outcome::Unchanged)
        .with(3, Outcome::Live);
    (Neighbourhood2D::moore(), table.into())
}

/// Conway's Game of Life as a 512-pattern exact table over the 3x3 block
/// including the centre (position 4 of
/// [`Neighbourhood2D::moore_with_centre`]). Only living patterns are
/// stored.
pub fn game_of_life_exact() -> Result<(Neighbourhood2D, RuleTable), RuleError> {
    let neighbourhood = Neighbourhood2D::moore_with_centre();
    let mut table = ExactPatternTable::new(neighbourhood.len())?;
    for pattern in 0u64..512 {
        let centre = (pattern >> 4) & 1 == 1;
        let others = pattern.count_ones() - u32::from(centre);
        let alive = if centre {
            others == 2 || others == 3
        } else {
            others == 3
        };
        if alive {
            table.insert_packed(pattern, true)?;
        }
    }
    Ok((neighbourhood, table.into()))
}

/// The 1D neighbourhood paired with [`species_default`] for a species
/// that looks `d` cells to either side.
pub fn species_neighbourhood(d: u32) -> Result<Neighbourhood1D, RuleError> {
    Ok(Neighbourhood1D::pair(d)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Rule;

    #[test]
    fn every_preset_parses() {
        for (name, ruleset) in RULESETS {
            let rs: RuleString = ruleset
                .parse()
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            let (n, table) = rs.build().unwrap();
            table.check_arity(n.len()).unwrap();
            let again: RuleString = rs.to_string().parse().unwrap();
            assert_eq!(again, rs, "{name} does not round-trip");
        }
    }

    #[test]
    fn named_lookup() {
        assert_eq!(named("abacus").unwrap().to_string(), ABACUS);
        assert_eq!(named("Class_4A").unwrap().to_string(), CLASS_4A);
        // B0 replaces the earlier S0.
        let city = named("the_city").unwrap();
        assert_eq!(city.radius(), 3);
        assert_eq!(city.outcome(0), Outcome::Live);
        assert!(named("nope").is_none());
    }

    #[test]
    fn species_default_rule() {
        let rule = species_default();
        assert_eq!(rule.outcome(&[false, false]), Outcome::Die);
        assert_eq!(rule.outcome(&[true, false]), Outcome::Live);
        assert_eq!(rule.outcome(&[false, true]), Outcome::Live);
        assert_eq!(rule.outcome(&[true, true]), Outcome::Die);
        assert_eq!(species_neighbourhood(3).unwrap().offsets(), &[-3, 3]);
    }

    #[test]
    fn life_exact_has_the_right_patterns() {
        let (n, rule) = game_of_life_exact().unwrap();
        assert_eq!(n.len(), 9);
        assert_eq!(n.offsets()[4], (0, 0));
        match &rule {
            // Born: C(8,3) = 56. Survive: C(8,2) + C(8,3) = 84.
            RuleTable::Exact(t) => assert_eq!(t.len(), 140),
            RuleTable::Aggregate(_) => panic!("expected exact table"),
        }
    }

    #[test]
    fn life_exact_matches_aggregate_on_every_pattern() {
        let (_, exact) = game_of_life_exact().unwrap();
        let (_, aggregate) = game_of_life();
        for pattern in 0u32..512 {
            let block: Vec<bool> = (0..9).rev().map(|b| (pattern >> b) & 1 == 1).collect();
            let centre = block[4];
            let others: Vec<bool> = block
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != 4)
                .map(|(_, &s)| s)
                .collect();
            assert_eq!(
                exact.evaluate(&block, centre),
                aggregate.evaluate(&others, centre),
                "pattern {pattern:09b}"
            );
        }
    }
}
