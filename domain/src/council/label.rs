//! Anonymous response labels

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::error::DomainError;

/// Anonymous label for one surviving response (Value Object)
///
/// Labels come from the fixed sequence `A`, `B`, `C`, ... and display as
/// `Response A` — the form the ranking prompt and ranking replies use.
/// Ordering is alphabetic, which is also the deterministic tie-break order
/// during aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(u8);

impl Label {
    /// Size of the label alphabet (single ASCII uppercase letter on the wire)
    pub const ALPHABET: usize = 26;

    /// The label at `index` in the sequence (0 -> `A`), if it exists
    pub fn nth(index: usize) -> Option<Self> {
        if index < Self::ALPHABET {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// The first `count` labels of the sequence
    pub fn sequence(count: usize) -> Result<Vec<Self>, DomainError> {
        if count > Self::ALPHABET {
            return Err(DomainError::LabelAlphabetExhausted {
                count,
                max: Self::ALPHABET,
            });
        }
        Ok((0..count as u8).map(Self).collect())
    }

    /// Position in the sequence (`A` -> 0)
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// The bare letter (`A`, `B`, ...)
    pub fn letter(&self) -> char {
        (b'A' + self.0) as char
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Response {}", self.letter())
    }
}

impl std::str::FromStr for Label {
    type Err = DomainError;

    /// Accepts the full display form (`Response A`) or the bare letter (`A`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let letter = s.strip_prefix("Response ").unwrap_or(s);
        let mut chars = letter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => Ok(Self(c as u8 - b'A')),
            _ => Err(DomainError::InvalidLabel(s.to_string())),
        }
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_and_display() {
        let labels = Label::sequence(3).unwrap();
        let shown: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        assert_eq!(shown, vec!["Response A", "Response B", "Response C"]);
    }

    #[test]
    fn test_sequence_exhaustion() {
        assert!(Label::sequence(26).is_ok());
        assert_eq!(
            Label::sequence(27).unwrap_err(),
            DomainError::LabelAlphabetExhausted { count: 27, max: 26 }
        );
    }

    #[test]
    fn test_parse_both_forms() {
        let full: Label = "Response B".parse().unwrap();
        let bare: Label = "B".parse().unwrap();
        assert_eq!(full, bare);
        assert_eq!(full.letter(), 'B');
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("Response 7".parse::<Label>().is_err());
        assert!("Response AB".parse::<Label>().is_err());
        assert!("response a".parse::<Label>().is_err());
        assert!("".parse::<Label>().is_err());
    }

    #[test]
    fn test_ordering_is_alphabetic() {
        let a: Label = "A".parse().unwrap();
        let c: Label = "C".parse().unwrap();
        assert!(a < c);
    }

    #[test]
    fn test_serde_uses_display_form() {
        let label: Label = "Response D".parse().unwrap();
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(json, "\"Response D\"");
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, label);
    }
}
