//! crates/astrologer_core/src/signs.rs
//!
//! The static sign table. Row order matches `SignName::ALL`.

use crate::domain::{Element, Quality, Sign, SignName};

static SIGNS: [Sign; 12] = [
    Sign {
        name: SignName::Aries,
        element: Element::Fire,
        quality: Quality::Cardinal,
        ruling_planet: "Mars",
        date_range: "March 21 - April 19",
        symbol: "♈",
        traits: &[
            "Courageous",
            "Determined",
            "Confident",
            "Enthusiastic",
            "Optimistic",
            "Honest",
            "Passionate",
        ],
        compatibility: [SignName::Leo, SignName::Sagittarius, SignName::Gemini, SignName::Aquarius],
    },
    Sign {
        name: SignName::Taurus,
        element: Element::Earth,
        quality: Quality::Fixed,
        ruling_planet: "Venus",
        date_range: "April 20 - May 20",
        symbol: "♉",
        traits: &["Reliable", "Patient", "Practical", "Devoted", "Responsible", "Stable"],
        compatibility: [SignName::Virgo, SignName::Capricorn, SignName::Cancer, SignName::Pisces],
    },
    Sign {
        name: SignName::Gemini,
        element: Element::Air,
        quality: Quality::Mutable,
        ruling_planet: "Mercury",
        date_range: "May 21 - June 20",
        symbol: "♊",
        traits: &["Gentle", "Affectionate", "Curious", "Adaptable", "Quick-witted", "Sociable"],
        compatibility: [SignName::Libra, SignName::Aquarius, SignName::Aries, SignName::Leo],
    },
    Sign {
        name: SignName::Cancer,
        element: Element::Water,
        quality: Quality::Cardinal,
        ruling_planet: "Moon",
        date_range: "June 21 - July 22",
        symbol: "♋",
        traits: &["Tenacious", "Intuitive", "Caring", "Emotional", "Protective", "Sympathetic"],
        compatibility: [SignName::Scorpio, SignName::Pisces, SignName::Taurus, SignName::Virgo],
    },
    Sign {
        name: SignName::Leo,
        element: Element::Fire,
        quality: Quality::Fixed,
        ruling_planet: "Sun",
        date_range: "July 23 - August 22",
        symbol: "♌",
        traits: &["Creative", "Passionate", "Generous", "Warm-hearted", "Cheerful", "Humorous"],
        compatibility: [SignName::Aries, SignName::Sagittarius, SignName::Gemini, SignName::Libra],
    },
    Sign {
        name: SignName::Virgo,
        element: Element::Earth,
        quality: Quality::Mutable,
        ruling_planet: "Mercury",
        date_range: "August 23 - September 22",
        symbol: "♍",
        traits: &["Loyal", "Analytical", "Kind", "Hardworking", "Practical", "Modest"],
        compatibility: [SignName::Taurus, SignName::Capricorn, SignName::Cancer, SignName::Scorpio],
    },
    Sign {
        name: SignName::Libra,
        element: Element::Air,
        quality: Quality::Cardinal,
        ruling_planet: "Venus",
        date_range: "September 23 - October 22",
        symbol: "♎",
        traits: &["Cooperative", "Diplomatic", "Gracious", "Fair-minded", "Social", "Peaceful"],
        compatibility: [SignName::Gemini, SignName::Aquarius, SignName::Leo, SignName::Sagittarius],
    },
    Sign {
        name: SignName::Scorpio,
        element: Element::Water,
        quality: Quality::Fixed,
        ruling_planet: "Pluto",
        date_range: "October 23 - November 21",
        symbol: "♏",
        traits: &["Resourceful", "Brave", "Passionate", "Stubborn", "Mysterious", "Intense"],
        compatibility: [SignName::Cancer, SignName::Pisces, SignName::Virgo, SignName::Capricorn],
    },
    Sign {
        name: SignName::Sagittarius,
        element: Element::Fire,
        quality: Quality::Mutable,
        ruling_planet: "Jupiter",
        date_range: "November 22 - December 21",
        symbol: "♐",
        traits: &[
            "Generous",
            "Idealistic",
            "Great sense of humor",
            "Adventurous",
            "Philosophical",
        ],
        compatibility: [SignName::Aries, SignName::Leo, SignName::Libra, SignName::Aquarius],
    },
    Sign {
        name: SignName::Capricorn,
        element: Element::Earth,
        quality: Quality::Cardinal,
        ruling_planet: "Saturn",
        date_range: "December 22 - January 19",
        symbol: "♑",
        traits: &["Responsible", "Disciplined", "Self-control", "Good managers", "Traditional"],
        compatibility: [SignName::Taurus, SignName::Virgo, SignName::Scorpio, SignName::Pisces],
    },
    Sign {
        name: SignName::Aquarius,
        element: Element::Air,
        quality: Quality::Fixed,
        ruling_planet: "Uranus",
        date_range: "January 20 - February 18",
        symbol: "♒",
        traits: &["Progressive", "Original", "Independent", "Humanitarian", "Innovative"],
        compatibility: [SignName::Gemini, SignName::Libra, SignName::Aries, SignName::Sagittarius],
    },
    Sign {
        name: SignName::Pisces,
        element: Element::Water,
        quality: Quality::Mutable,
        ruling_planet: "Neptune",
        date_range: "February 19 - March 20",
        symbol: "♓",
        traits: &["Compassionate", "Artistic", "Intuitive", "Gentle", "Wise", "Musical"],
        compatibility: [SignName::Cancer, SignName::Scorpio, SignName::Taurus, SignName::Capricorn],
    },
];

/// Looks up the table entry for a sign.
pub fn sign(name: SignName) -> &'static Sign {
    &SIGNS[name.index()]
}

/// All twelve signs, Aries first.
pub fn all_signs() -> &'static [Sign] {
    &SIGNS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_line_up_with_sign_names() {
        for name in SignName::ALL {
            assert_eq!(sign(name).name, name);
        }
        assert_eq!(all_signs().len(), 12);
    }

    #[test]
    fn compatibility_lists_never_name_the_sign_itself() {
        for entry in all_signs() {
            assert!(!entry.compatibility.contains(&entry.name), "{}", entry.name);
        }
    }

    #[test]
    fn leo_row_matches_the_table() {
        let leo = sign(SignName::Leo);
        assert_eq!(leo.element, Element::Fire);
        assert_eq!(leo.quality, Quality::Fixed);
        assert_eq!(leo.ruling_planet, "Sun");
        assert_eq!(leo.symbol, "♌");
        assert_eq!(leo.traits.len(), 6);
    }
}
