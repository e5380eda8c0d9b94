//! crates/astrologer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Zodiac Vocabulary
//=========================================================================================

/// The twelve sun signs, in table order (Aries first, Pisces last).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignName {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl SignName {
    pub const ALL: [SignName; 12] = [
        SignName::Aries,
        SignName::Taurus,
        SignName::Gemini,
        SignName::Cancer,
        SignName::Leo,
        SignName::Virgo,
        SignName::Libra,
        SignName::Scorpio,
        SignName::Sagittarius,
        SignName::Capricorn,
        SignName::Aquarius,
        SignName::Pisces,
    ];

    /// Position of the sign in every per-sign table.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignName::Aries => "Aries",
            SignName::Taurus => "Taurus",
            SignName::Gemini => "Gemini",
            SignName::Cancer => "Cancer",
            SignName::Leo => "Leo",
            SignName::Virgo => "Virgo",
            SignName::Libra => "Libra",
            SignName::Scorpio => "Scorpio",
            SignName::Sagittarius => "Sagittarius",
            SignName::Capricorn => "Capricorn",
            SignName::Aquarius => "Aquarius",
            SignName::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for SignName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the twelve signs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown zodiac sign: {0}")]
pub struct UnknownSign(pub String);

impl FromStr for SignName {
    type Err = UnknownSign;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SignName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSign(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Element {
    pub const ALL: [Element; 4] = [Element::Fire, Element::Earth, Element::Air, Element::Water];

    pub fn as_str(self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Earth => "Earth",
            Element::Air => "Air",
            Element::Water => "Water",
        }
    }

    /// Fire and Air feed each other, as do Earth and Water.
    pub fn is_compatible_with(self, other: Element) -> bool {
        matches!(
            (self, other),
            (Element::Fire | Element::Air, Element::Fire | Element::Air)
                | (Element::Earth | Element::Water, Element::Earth | Element::Water)
        )
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Cardinal,
    Fixed,
    Mutable,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Cardinal => "Cardinal",
            Quality::Fixed => "Fixed",
            Quality::Mutable => "Mutable",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the static sign table.
#[derive(Debug, PartialEq, Eq)]
pub struct Sign {
    pub name: SignName,
    pub element: Element,
    pub quality: Quality,
    pub ruling_planet: &'static str,
    /// Display only; resolution uses the boundaries in `resolver`.
    pub date_range: &'static str,
    pub symbol: &'static str,
    pub traits: &'static [&'static str],
    pub compatibility: [SignName; 4],
}

//=========================================================================================
// Birth Details
//=========================================================================================

/// The details a user submits to request a reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthDetails {
    pub name: String,
    pub date_of_birth: NaiveDate,
    /// Collected for display; sun-sign resolution ignores it.
    pub time_of_birth: NaiveTime,
    pub place_of_birth: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Date of birth cannot be in the future")]
    FutureDateOfBirth,
    #[error("Place of birth is required")]
    EmptyPlaceOfBirth,
}

impl BirthDetails {
    /// Checks the submission against `today`. A birth date equal to today is accepted.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.date_of_birth > today {
            return Err(ValidationError::FutureDateOfBirth);
        }
        if self.place_of_birth.trim().is_empty() {
            return Err(ValidationError::EmptyPlaceOfBirth);
        }
        Ok(())
    }
}

//=========================================================================================
// Derived Values
//=========================================================================================

/// The structured output of the reading generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reading {
    pub sun_sign: &'static Sign,
    pub personality_traits: Vec<String>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
    pub life_advice: String,
    pub career_guidance: String,
    pub relationship_insights: String,
}

/// Represents a single question-and-answer exchange within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResponse {
    pub question: String,
    pub answer: String,
    pub timestamp: DateTime<Utc>,
}

/// The slice of a user's birth data that an answer provider gets to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstrologyContext {
    pub name: String,
    pub sun_sign: String,
    pub element: String,
    pub traits: Vec<String>,
    pub age: i32,
    pub date_of_birth: NaiveDate,
    pub place_of_birth: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(name: &str, dob: NaiveDate, place: &str) -> BirthDetails {
        BirthDetails {
            name: name.to_string(),
            date_of_birth: dob,
            time_of_birth: NaiveTime::from_hms_opt(6, 30, 0).unwrap(),
            place_of_birth: place.to_string(),
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn validate_accepts_birth_today() {
        let today = ymd(2024, 3, 1);
        assert_eq!(details("Ada", today, "London").validate(today), Ok(()));
    }

    #[test]
    fn validate_rejects_future_birth_date() {
        let today = ymd(2024, 3, 1);
        let result = details("Ada", ymd(2024, 3, 2), "London").validate(today);
        assert_eq!(result, Err(ValidationError::FutureDateOfBirth));
    }

    #[test]
    fn validate_rejects_blank_fields() {
        let today = ymd(2024, 3, 1);
        let dob = ymd(1990, 1, 1);
        assert_eq!(
            details("   ", dob, "London").validate(today),
            Err(ValidationError::EmptyName)
        );
        assert_eq!(
            details("Ada", dob, "").validate(today),
            Err(ValidationError::EmptyPlaceOfBirth)
        );
    }

    #[test]
    fn element_compatibility_is_symmetric() {
        for a in Element::ALL {
            assert!(a.is_compatible_with(a));
            for b in Element::ALL {
                assert_eq!(a.is_compatible_with(b), b.is_compatible_with(a));
            }
        }
        assert!(Element::Fire.is_compatible_with(Element::Air));
        assert!(!Element::Fire.is_compatible_with(Element::Water));
        assert!(Element::Earth.is_compatible_with(Element::Water));
        assert!(!Element::Air.is_compatible_with(Element::Earth));
    }

    #[test]
    fn sign_names_parse_case_insensitively() {
        assert_eq!("sagittarius".parse::<SignName>(), Ok(SignName::Sagittarius));
        assert_eq!(" Leo ".parse::<SignName>(), Ok(SignName::Leo));
        assert!("Ophiuchus".parse::<SignName>().is_err());
    }
}
