use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// Largest neighbor count a cell can have.
pub const MAX_NEIGHBORS: u8 = 8;

/// At most one digit per possible neighbor count.
const MAX_DIGITS: usize = MAX_NEIGHBORS as usize + 1;

/// # Representation
/// Life rules are represented as
/// ```notrust
/// |------birth------|
/// 0000_0000_0000_0000_0000_0000_0000_0000
///                     |----survival-----|
/// ```
///
/// # Examples
/// ```notrust
/// b3s23:                0000_0000_0000_1000_0000_0000_0000_1100
///
/// b0s0:                 0000_0000_0000_0001_0000_0000_0000_0001
/// b012345678s012345678: 0000_0001_1111_1111_0000_0001_1111_1111
/// ```
///
/// # Format
///
/// `B[0-8]{1,9}/S[0-8]{1,9}`, letters in either case.
///
/// See: https://conwaylife.com/wiki/Rulestring
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Create a new `RuleSet` for the given births and survivals. For both `b` and
    /// `s`, numbers are set on a bit basis. For instance if bit `i` in `b` is on, it
    /// means `i` is included in the set of births. Any bit past the 8th is ignored.
    pub const fn new(b: u16, s: u16) -> Self {
        let b = b & 0x1FF;
        let s = s & 0x1FF;

        Self {
            rule: (b as u32) << 16 | s as u32,
        }
    }

    pub fn births(&self) -> u16 {
        ((self.rule & 0x1FF0000) >> 0x10) as u16
    }

    pub fn survivals(&self) -> u16 {
        (self.rule & 0x1FF) as u16
    }

    /// Whether a dead cell with `n` neighbors comes alive.
    pub fn is_birth(&self, n: u8) -> bool {
        n <= MAX_NEIGHBORS && self.births() & (1 << n) != 0
    }

    /// Whether a live cell with `n` neighbors stays alive.
    pub fn is_survive(&self, n: u8) -> bool {
        n <= MAX_NEIGHBORS && self.survivals() & (1 << n) != 0
    }

    /// State of a cell in the next generation.
    pub fn next_state(&self, alive: bool, n: u8) -> bool {
        if alive {
            self.is_survive(n)
        } else {
            self.is_birth(n)
        }
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |set: u16| -> String {
            (0..=MAX_NEIGHBORS)
                .filter(|n| set & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleSetError {
    #[error("Rule \"{rule}\" must start with 'B'")]
    MissingBirth { rule: String },

    #[error("Rule \"{rule}\" must continue with \"/S\" after the births")]
    MissingSurvival { rule: String },

    #[error("Rule \"{rule}\" has an empty birth or survival list")]
    EmptyCounts { rule: String },

    #[error("Rule \"{rule}\" lists more than 9 neighbor counts in one list")]
    TooManyCounts { rule: String },

    #[error("Rule \"{rule}\" contains '{got}', expected a neighbor count between 0 and 8")]
    InvalidCount { rule: String, got: char },
}

impl FromStr for RuleSet {
    type Err = RuleSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = || s.to_string();

        let Some(rest) = s.strip_prefix(['b', 'B']) else {
            return Err(RuleSetError::MissingBirth { rule: rule() });
        };

        let Some((births, rest)) = rest.split_once('/') else {
            return Err(RuleSetError::MissingSurvival { rule: rule() });
        };

        let Some(survivals) = rest.strip_prefix(['s', 'S']) else {
            return Err(RuleSetError::MissingSurvival { rule: rule() });
        };

        let b = counts_to_num(births).map_err(|e| e.with_rule(rule()))?;
        let s = counts_to_num(survivals).map_err(|e| e.with_rule(rule()))?;

        Ok(RuleSet::new(b, s))
    }
}

/// Why a list of counts was rejected, before the full rule text is attached.
enum CountsError {
    Empty,
    TooMany,
    Invalid(char),
}

impl CountsError {
    fn with_rule(self, rule: String) -> RuleSetError {
        match self {
            CountsError::Empty => RuleSetError::EmptyCounts { rule },
            CountsError::TooMany => RuleSetError::TooManyCounts { rule },
            CountsError::Invalid(got) => RuleSetError::InvalidCount { rule, got },
        }
    }
}

/// Convert the human readable birth/survival digits to a packed bit representation
fn counts_to_num(counts: &str) -> Result<u16, CountsError> {
    if counts.is_empty() {
        return Err(CountsError::Empty);
    }

    let mut n = 0;

    for (i, c) in counts.chars().enumerate() {
        if i == MAX_DIGITS {
            return Err(CountsError::TooMany);
        }

        match c {
            '0'..='8' => n |= 1 << (c as u8 - b'0'),
            got => return Err(CountsError::Invalid(got)),
        }
    }

    Ok(n)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_life() {
        let rules = RuleSet::default();

        assert_eq!(rules, B3S23);
        assert_eq!(rules.births(), 0b1000);
        assert_eq!(rules.survivals(), 0b1100);
        assert_eq!(rules.to_string(), "B3/S23");
    }

    #[test]
    fn parse_life() {
        let rules: RuleSet = "B3/S23".parse().unwrap();

        for n in 0..=MAX_NEIGHBORS {
            assert_eq!(rules.is_birth(n), n == 3, "birth on {n}");
            assert_eq!(rules.is_survive(n), n == 2 || n == 3, "survival on {n}");
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        let rules: RuleSet = "b36/s23".parse().unwrap();

        assert_eq!(rules.births(), 0b100_1000);
        assert_eq!(rules.survivals(), 0b1100);
        assert_eq!(rules.to_string(), "B36/S23");
    }

    #[test]
    fn parse_ignores_order_and_duplicates() {
        let a: RuleSet = "B63/S32".parse().unwrap();
        let b: RuleSet = "B3366/S2233".parse().unwrap();

        assert_eq!(a, "B36/S23".parse::<RuleSet>().unwrap());
        assert_eq!(b, a);
    }

    #[test]
    fn parse_extremes() {
        let all: RuleSet = "B012345678/S012345678".parse().unwrap();
        assert_eq!(all.births(), 0x1FF);
        assert_eq!(all.survivals(), 0x1FF);

        let zero: RuleSet = "b0/s0".parse().unwrap();
        assert!(zero.is_birth(0));
        assert!(!zero.is_birth(1));
    }

    #[test]
    fn parse_errors() {
        let err = |s: &str| s.parse::<RuleSet>().unwrap_err();
        let rule = |s: &str| s.to_string();

        assert_eq!(err("X3/S23"), RuleSetError::MissingBirth { rule: rule("X3/S23") });
        assert_eq!(err(""), RuleSetError::MissingBirth { rule: rule("") });
        assert_eq!(err("S23/B3"), RuleSetError::MissingBirth { rule: rule("S23/B3") });
        assert_eq!(err("B3S23"), RuleSetError::MissingSurvival { rule: rule("B3S23") });
        assert_eq!(err("B3/23"), RuleSetError::MissingSurvival { rule: rule("B3/23") });
        assert_eq!(err("B/S23"), RuleSetError::EmptyCounts { rule: rule("B/S23") });
        assert_eq!(err("B3/S"), RuleSetError::EmptyCounts { rule: rule("B3/S") });
        assert_eq!(
            err("B39/S23"),
            RuleSetError::InvalidCount { rule: rule("B39/S23"), got: '9' }
        );
        assert_eq!(
            err("B3/S23 "),
            RuleSetError::InvalidCount { rule: rule("B3/S23 "), got: ' ' }
        );
        assert_eq!(
            err("B0123456780/S2"),
            RuleSetError::TooManyCounts { rule: rule("B0123456780/S2") }
        );
    }

    #[test]
    fn error_carries_rule_text() {
        let msg = "X3/S23".parse::<RuleSet>().unwrap_err().to_string();
        assert!(msg.contains("X3/S23"), "{msg}");
    }

    #[test]
    fn next_state_follows_rules() {
        let rules = B3S23;

        assert!(rules.next_state(false, 3));
        assert!(!rules.next_state(false, 2));
        assert!(rules.next_state(true, 2));
        assert!(!rules.next_state(true, 4));
        assert!(!rules.next_state(true, 9));
    }
}
