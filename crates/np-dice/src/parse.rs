//! Roll expression parsing.
//!
//! Accepted forms:
//!
//! - `5`: a direct pool size (signed)
//! - `wits` or `wits-2`: one named term, optionally with an attached penalty
//! - `strength + brawl` or `strength + brawl-2`: attribute and skill
//! - `strength + brawl + 3`: attribute, skill, and an explicit modifier
//!
//! Names are trimmed and case-folded. Hyphenated names such as `animal-ken`
//! survive because only a trailing `-digits` run counts as a modifier.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;

static TRAILING_PENALTY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-\s*(\d+)\s*$").expect("trailing penalty pattern is valid")
});

static NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+$").expect("numeric pattern is valid"));

/// The four shapes a roll expression can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RollShape {
    /// A bare integer pool size.
    Direct,
    /// One named term.
    SingleTerm,
    /// Attribute and skill.
    TwoTerm,
    /// Attribute, skill, and an explicit integer modifier.
    ThreeTerm,
}

impl std::fmt::Display for RollShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::SingleTerm => write!(f, "single term"),
            Self::TwoTerm => write!(f, "two terms"),
            Self::ThreeTerm => write!(f, "three terms"),
        }
    }
}

/// A parsed roll expression whose named terms are not yet resolved.
///
/// Either a pool size or a list of names is present, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollRequest {
    /// A bare integer pool size.
    Direct {
        /// The pool size, which may be zero or negative.
        pool_size: i32,
    },
    /// One named term.
    SingleTerm {
        /// The case-folded term name.
        name: String,
        /// A modifier attached to the name, as in `wits-2`.
        attached_modifier: Option<i32>,
    },
    /// Attribute and skill.
    TwoTerm {
        /// The case-folded attribute and skill names.
        names: [String; 2],
        /// A modifier attached to the skill, as in `brawl-2`.
        attached_modifier: Option<i32>,
    },
    /// Attribute, skill, and explicit modifier.
    ThreeTerm {
        /// The case-folded attribute and skill names.
        names: [String; 2],
        /// The explicit third-segment modifier.
        explicit_modifier: i32,
    },
}

impl RollRequest {
    /// The shape of this request.
    pub fn shape(&self) -> RollShape {
        match self {
            Self::Direct { .. } => RollShape::Direct,
            Self::SingleTerm { .. } => RollShape::SingleTerm,
            Self::TwoTerm { .. } => RollShape::TwoTerm,
            Self::ThreeTerm { .. } => RollShape::ThreeTerm,
        }
    }

    /// The direct pool size, if this is a direct request.
    pub fn pool_size(&self) -> Option<i32> {
        match self {
            Self::Direct { pool_size } => Some(*pool_size),
            _ => None,
        }
    }

    /// The named terms to resolve, empty for a direct request.
    pub fn terms(&self) -> Vec<&str> {
        match self {
            Self::Direct { .. } => Vec::new(),
            Self::SingleTerm { name, .. } => vec![name.as_str()],
            Self::TwoTerm { names, .. } | Self::ThreeTerm { names, .. } => {
                names.iter().map(String::as_str).collect()
            }
        }
    }

    /// The modifier added to the summed terms, or 0.
    pub fn modifier(&self) -> i32 {
        match self {
            Self::Direct { .. } => 0,
            Self::SingleTerm {
                attached_modifier, ..
            }
            | Self::TwoTerm {
                attached_modifier, ..
            } => attached_modifier.unwrap_or(0),
            Self::ThreeTerm {
                explicit_modifier, ..
            } => *explicit_modifier,
        }
    }
}

impl std::fmt::Display for RollRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Self::Direct { pool_size } = self {
            return write!(f, "{pool_size}");
        }
        write!(f, "{}", self.terms().join(" + "))?;
        match self.modifier() {
            0 => Ok(()),
            m if m > 0 => write!(f, " + {m}"),
            m => write!(f, " - {}", m.unsigned_abs()),
        }
    }
}

/// Parse a roll expression.
pub fn parse(raw: &str) -> Result<RollRequest, ParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ParseError::EmptyTerm(raw.to_string()));
    }

    if let Ok(pool_size) = text.parse::<i32>() {
        debug!(pool_size, "parsed direct pool");
        return Ok(RollRequest::Direct { pool_size });
    }
    // digits that overflow i32 are still a number, never a stat name
    if NUMERIC.is_match(text) {
        return Err(ParseError::InvalidFormat(text.to_string()));
    }

    let segments: Vec<&str> = text.split('+').map(str::trim).collect();
    let request = match segments.as_slice() {
        [single] => {
            let (name, attached_modifier) = extract_modifier(single);
            RollRequest::SingleTerm {
                name: term_name(name, text)?,
                attached_modifier,
            }
        }
        [first, second] => {
            let (name, attached_modifier) = extract_modifier(second);
            RollRequest::TwoTerm {
                names: [term_name(first, text)?, term_name(name, text)?],
                attached_modifier,
            }
        }
        [first, second, third] => {
            let names = [term_name(first, text)?, term_name(second, text)?];
            let explicit_modifier = third
                .parse::<i32>()
                .map_err(|_| ParseError::InvalidModifier((*third).to_string()))?;
            RollRequest::ThreeTerm {
                names,
                explicit_modifier,
            }
        }
        _ => return Err(ParseError::InvalidFormat(text.to_string())),
    };

    debug!(shape = %request.shape(), request = %request, "parsed roll expression");
    Ok(request)
}

/// Split an attached modifier off the end of a term.
///
/// `brawl+2` yields `("brawl", Some(2))` and `brawl - 2` yields
/// `("brawl", Some(-2))`. A `+` whose right side is not an unsigned integer,
/// or a segment without a trailing `-digits`, is returned unchanged.
pub fn extract_modifier(segment: &str) -> (&str, Option<i32>) {
    if let Some((name, bonus)) = segment.split_once('+') {
        let bonus = bonus
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(|b| i32::try_from(b).ok());
        return match bonus {
            Some(bonus) => (name.trim(), Some(bonus)),
            None => (segment.trim(), None),
        };
    }

    if let Some(caps) = TRAILING_PENALTY.captures(segment) {
        let penalty = caps.get(1).and_then(|m| m.as_str().parse::<i32>().ok());
        if let (Some(penalty), Some(whole)) = (penalty, caps.get(0)) {
            return (segment[..whole.start()].trim(), Some(-penalty));
        }
    }

    (segment.trim(), None)
}

fn term_name(name: &str, text: &str) -> Result<String, ParseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyTerm(text.to_string()));
    }
    Ok(name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two(a: &str, b: &str, m: Option<i32>) -> RollRequest {
        RollRequest::TwoTerm {
            names: [a.to_string(), b.to_string()],
            attached_modifier: m,
        }
    }

    #[test]
    fn direct_pool() {
        assert_eq!(parse("5").unwrap(), RollRequest::Direct { pool_size: 5 });
        assert_eq!(parse("  -1 ").unwrap(), RollRequest::Direct { pool_size: -1 });
        assert_eq!(parse("0").unwrap().pool_size(), Some(0));
    }

    #[test]
    fn out_of_range_number_is_not_a_name() {
        assert_eq!(
            parse("99999999999"),
            Err(ParseError::InvalidFormat("99999999999".to_string()))
        );
        assert!(matches!(
            parse(" -3000000000 "),
            Err(ParseError::InvalidFormat(_))
        ));
        assert_eq!(parse("+4").unwrap(), RollRequest::Direct { pool_size: 4 });
    }

    #[test]
    fn attribute_and_skill() {
        assert_eq!(
            parse("Strength + Weaponry").unwrap(),
            two("strength", "weaponry", None)
        );
        assert_eq!(
            parse("Strength+Weaponry").unwrap(),
            two("strength", "weaponry", None)
        );
    }

    #[test]
    fn attached_penalty_on_skill() {
        assert_eq!(
            parse("Strength + Weaponry-2").unwrap(),
            two("strength", "weaponry", Some(-2))
        );
        assert_eq!(
            parse("Strength + Weaponry - 2").unwrap(),
            two("strength", "weaponry", Some(-2))
        );
    }

    #[test]
    fn explicit_modifier() {
        let request = parse("Strength + Weaponry + 3").unwrap();
        assert_eq!(
            request,
            RollRequest::ThreeTerm {
                names: ["strength".to_string(), "weaponry".to_string()],
                explicit_modifier: 3,
            }
        );
        assert_eq!(request.shape(), RollShape::ThreeTerm);
        assert_eq!(request.modifier(), 3);

        let request = parse("dexterity+stealth+-2").unwrap();
        assert_eq!(request.modifier(), -2);
    }

    #[test]
    fn invalid_explicit_modifier() {
        assert_eq!(
            parse("Strength + Weaponry + lots"),
            Err(ParseError::InvalidModifier("lots".to_string()))
        );
    }

    #[test]
    fn too_many_segments() {
        assert!(matches!(
            parse("a + b + c + d"),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn single_term() {
        assert_eq!(
            parse("Wits").unwrap(),
            RollRequest::SingleTerm {
                name: "wits".to_string(),
                attached_modifier: None,
            }
        );
        assert_eq!(
            parse("Empathy-5").unwrap(),
            RollRequest::SingleTerm {
                name: "empathy".to_string(),
                attached_modifier: Some(-5),
            }
        );
    }

    #[test]
    fn hyphenated_names_survive() {
        assert_eq!(
            parse("Wits + Animal-Ken").unwrap(),
            two("wits", "animal-ken", None)
        );
        assert_eq!(
            parse("Wits + Animal-Ken-1").unwrap(),
            two("wits", "animal-ken", Some(-1))
        );
    }

    #[test]
    fn empty_terms_are_rejected() {
        assert!(matches!(parse(""), Err(ParseError::EmptyTerm(_))));
        assert!(matches!(parse("   "), Err(ParseError::EmptyTerm(_))));
        assert!(matches!(parse("+ brawl"), Err(ParseError::EmptyTerm(_))));
        assert!(matches!(parse("strength +"), Err(ParseError::EmptyTerm(_))));
    }

    #[test]
    fn extract_plus() {
        assert_eq!(extract_modifier("brawl+2"), ("brawl", Some(2)));
        assert_eq!(extract_modifier("brawl + 2"), ("brawl", Some(2)));
        assert_eq!(extract_modifier("brawl+x"), ("brawl+x", None));
        assert_eq!(extract_modifier("brawl+-2"), ("brawl+-2", None));
    }

    #[test]
    fn extract_minus() {
        assert_eq!(extract_modifier("brawl-3"), ("brawl", Some(-3)));
        assert_eq!(extract_modifier("brawl -  12"), ("brawl", Some(-12)));
        assert_eq!(extract_modifier("animal-ken"), ("animal-ken", None));
        assert_eq!(extract_modifier("brawl"), ("brawl", None));
    }

    #[test]
    fn terms_and_display() {
        let request = parse("Strength + Brawl - 1").unwrap();
        assert_eq!(request.terms(), vec!["strength", "brawl"]);
        assert_eq!(request.to_string(), "strength + brawl - 1");
        assert_eq!(parse("7").unwrap().terms(), Vec::<&str>::new());
    }
}
