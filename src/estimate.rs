use std::fmt;

/// Assumed attacker rate for the brute-force estimate.
pub const GUESSES_PER_SECOND: f64 = 1e14;

const LETTERS: u32 = 52;
const LETTERS_AND_DIGITS: u32 = 62;
const FULL_PRINTABLE: u32 = 94;

const SECONDS_PER_MINUTE: f64 = 60.0;
const SECONDS_PER_HOUR: f64 = 3_600.0;
const SECONDS_PER_DAY: f64 = 86_400.0;
const SECONDS_PER_YEAR: f64 = 365.0 * SECONDS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Unit {
    Seconds,
    Minutes,
    Hours,
    Days,
    Years,
}

impl Unit {
    fn label(self, singular: bool) -> &'static str {
        match (self, singular) {
            (Unit::Seconds, true) => "second",
            (Unit::Seconds, false) => "seconds",
            (Unit::Minutes, true) => "minute",
            (Unit::Minutes, false) => "minutes",
            (Unit::Hours, true) => "hour",
            (Unit::Hours, false) => "hours",
            (Unit::Days, true) => "day",
            (Unit::Days, false) => "days",
            (Unit::Years, true) => "year",
            (Unit::Years, false) => "years",
        }
    }
}

/// A crack-time report: the single largest whole unit, truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrackTime {
    pub value: f64,
    pub unit: Unit,
}

impl fmt::Display for CrackTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} {}", self.value, self.unit.label(self.value == 1.0))
    }
}

/// Infer the charset size from the characters actually present.
///
/// Letters always count as the 52-character baseline and digits add 10,
/// but any other character promotes the whole charset to the full
/// 94-character printable set rather than adding a symbol class. The
/// asymmetry is deliberate and kept for compatibility with earlier
/// reports.
pub fn charset_size(password: &str) -> u32 {
    let mut has_digit = false;
    for c in password.chars() {
        if c.is_ascii_digit() {
            has_digit = true;
        } else if !c.is_ascii_alphabetic() {
            return FULL_PRINTABLE;
        }
    }
    if has_digit { LETTERS_AND_DIGITS } else { LETTERS }
}

/// Seconds to exhaust the inferred solution space at the assumed rate.
pub fn crack_seconds(password: &str) -> f64 {
    let space = f64::from(charset_size(password)).powi(password.len() as i32);
    space / GUESSES_PER_SECOND
}

/// Estimate how long a brute-force search of the password's inferred
/// solution space would take. Advisory only; calendar-naive (365-day
/// years), truncated to the largest unit that is at least 1.
pub fn estimate(password: &str) -> CrackTime {
    let seconds = crack_seconds(password);

    let scales = [
        (SECONDS_PER_YEAR, Unit::Years),
        (SECONDS_PER_DAY, Unit::Days),
        (SECONDS_PER_HOUR, Unit::Hours),
        (SECONDS_PER_MINUTE, Unit::Minutes),
    ];

    for (scale, unit) in scales {
        if seconds >= scale {
            return CrackTime {
                value: (seconds / scale).trunc(),
                unit,
            };
        }
    }

    CrackTime {
        value: seconds.trunc(),
        unit: Unit::Seconds,
    }
}
