//! crates/astrologer_core/src/resolver.rs
//!
//! Maps calendar dates onto the sign table and computes whole-year ages.

use chrono::{Datelike, NaiveDate};

use crate::domain::{Sign, SignName};
use crate::signs::sign;

/// Inclusive `(month, day)` bounds for every sign except Pisces, in check order.
/// A range whose start is later in the year than its end wraps over New Year.
const BOUNDARIES: [(SignName, (u32, u32), (u32, u32)); 11] = [
    (SignName::Aries, (3, 21), (4, 19)),
    (SignName::Taurus, (4, 20), (5, 20)),
    (SignName::Gemini, (5, 21), (6, 20)),
    (SignName::Cancer, (6, 21), (7, 22)),
    (SignName::Leo, (7, 23), (8, 22)),
    (SignName::Virgo, (8, 23), (9, 22)),
    (SignName::Libra, (9, 23), (10, 22)),
    (SignName::Scorpio, (10, 23), (11, 21)),
    (SignName::Sagittarius, (11, 22), (12, 21)),
    (SignName::Capricorn, (12, 22), (1, 19)),
    (SignName::Aquarius, (1, 20), (2, 18)),
];

fn contains(start: (u32, u32), end: (u32, u32), at: (u32, u32)) -> bool {
    if start <= end {
        start <= at && at <= end
    } else {
        at >= start || at <= end
    }
}

/// Returns the sign whose range contains `date`. Pisces catches everything the
/// other eleven ranges leave over, Feb 29 included.
pub fn resolve_sign(date: NaiveDate) -> &'static Sign {
    let at = (date.month(), date.day());
    let name = BOUNDARIES
        .iter()
        .find(|(_, start, end)| contains(*start, *end, at))
        .map(|(name, _, _)| *name)
        .unwrap_or(SignName::Pisces);
    sign(name)
}

/// Whole years between `date_of_birth` and `reference`.
pub fn compute_age(date_of_birth: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - date_of_birth.year();
    if (reference.month(), reference.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}
