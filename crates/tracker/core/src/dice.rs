//! Dice formula parsing and rolling.
//!
//! Accepts `NdS`, `NdS+M`, `NdS-M` or a plain integer. Stat blocks often
//! write hit points as `"45 (6d10+12)"`; when a parenthesised part is present
//! only that part is evaluated. Cyrillic `д`/`к` are read as `d`, and
//! `{name}` placeholders are substituted before parsing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rand::Rng;

/// Errors produced while parsing a dice formula.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DiceError {
    #[error("dice formula is empty")]
    Empty,

    #[error("malformed dice formula: {0:?}")]
    Malformed(String),

    #[error("dice must have at least one side: {0:?}")]
    ZeroSides(String),

    #[error("too many dice or sides, at most 1000 of each: {0:?}")]
    TooLarge(String),
}

/// Upper bound for both the dice count and the number of sides.
pub const MAX_DICE: u32 = 1000;

/// A parsed formula ready to be rolled any number of times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiceFormula {
    Constant(i64),
    Roll { count: u32, sides: u32, modifier: i64 },
}

impl DiceFormula {
    /// Parses a formula, substituting `{name}` placeholders from `vars`.
    ///
    /// Unknown placeholders evaluate to zero.
    pub fn parse_with(formula: &str, vars: &HashMap<String, i64>) -> Result<Self, DiceError> {
        let substituted = substitute_placeholders(formula, vars);
        let normalized = normalize(&substituted);
        if normalized.is_empty() {
            return Err(DiceError::Empty);
        }
        parse_expression(&normalized)
    }

    /// Rolls the formula with the supplied random source.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        match *self {
            Self::Constant(value) => value,
            Self::Roll {
                count,
                sides,
                modifier,
            } => {
                let total: i64 = (0..count)
                    .map(|_| i64::from(rng.gen_range(1..=sides)))
                    .sum();
                total.saturating_add(modifier)
            }
        }
    }

    /// Smallest value the formula can produce.
    pub fn min(&self) -> i64 {
        match *self {
            Self::Constant(value) => value,
            Self::Roll {
                count, modifier, ..
            } => i64::from(count).saturating_add(modifier),
        }
    }

    /// Largest value the formula can produce.
    pub fn max(&self) -> i64 {
        match *self {
            Self::Constant(value) => value,
            Self::Roll {
                count,
                sides,
                modifier,
            } => i64::from(count)
                .saturating_mul(i64::from(sides))
                .saturating_add(modifier),
        }
    }
}

impl FromStr for DiceFormula {
    type Err = DiceError;

    fn from_str(formula: &str) -> Result<Self, Self::Err> {
        Self::parse_with(formula, &HashMap::new())
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Constant(value) => write!(f, "{value}"),
            Self::Roll {
                count,
                sides,
                modifier: 0,
            } => write!(f, "{count}d{sides}"),
            Self::Roll {
                count,
                sides,
                modifier,
            } => write!(f, "{count}d{sides}{modifier:+}"),
        }
    }
}

fn substitute_placeholders(formula: &str, vars: &HashMap<String, i64>) -> String {
    let mut output = String::with_capacity(formula.len());
    let mut rest = formula;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('}') else {
            output.push_str(&rest[open..]);
            return output;
        };

        let name = &after_open[..close];
        if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            output.push_str(&vars.get(name).copied().unwrap_or(0).to_string());
        } else {
            output.push_str(&rest[open..=open + close + 1]);
        }
        rest = &after_open[close + 1..];
    }

    output.push_str(rest);
    output
}

fn normalize(formula: &str) -> String {
    let compact: String = formula
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if matches!(c, 'д' | 'к') { 'd' } else { c })
        .collect();

    match (compact.find('('), compact.find(')')) {
        (Some(open), Some(close)) if close > open + 1 => compact[open + 1..close].to_string(),
        _ => compact,
    }
}

fn parse_expression(text: &str) -> Result<DiceFormula, DiceError> {
    let malformed = || DiceError::Malformed(text.to_string());

    let Some((count, rest)) = text.split_once('d') else {
        return text.parse().map(DiceFormula::Constant).map_err(|_| malformed());
    };

    let (sides, modifier) = match rest.find(['+', '-']) {
        Some(index) => (&rest[..index], Some(&rest[index..])),
        None => (rest, None),
    };

    let count = parse_digits(count).ok_or_else(malformed)?;
    let sides = parse_digits(sides).ok_or_else(malformed)?;
    let modifier = match modifier {
        Some(raw) => parse_signed(raw).ok_or_else(malformed)?,
        None => 0,
    };

    if sides == 0 {
        return Err(DiceError::ZeroSides(text.to_string()));
    }
    if count > MAX_DICE || sides > MAX_DICE {
        return Err(DiceError::TooLarge(text.to_string()));
    }

    Ok(DiceFormula::Roll {
        count,
        sides,
        modifier,
    })
}

fn parse_digits(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn parse_signed(raw: &str) -> Option<i64> {
    let (sign, digits) = raw.split_at(1);
    let magnitude = i64::from(parse_digits(digits)?);
    match sign {
        "+" => Some(magnitude),
        "-" => Some(-magnitude),
        _ => None,
    }
}
