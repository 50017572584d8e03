//! Recognition of fixed (already resolved) coordinates.
//!
//! Only the WGS84 degrees + decimal minutes notation is understood, e.g.
//! `N 47° 03.204 E 008° 18.557`. Matching is purely syntactic: minutes need
//! exactly three fractional digits and nothing is rounded or range-checked.
//!
//! The filter serves two purposes:
//!
//! - stripping resolved coordinates from a description before formula
//!   extraction, so literal digits are never mistaken for a formula
//! - recognising stages whose position is already known

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

const LATITUDE: &str = r"[NS]\s*(?:\d{1,2})?°?\s+\d{1,2}\.\d{3}";
const LONGITUDE: &str = r"[EWO]\s*(?:\d{1,3})?°?\s+\d{1,2}\.\d{3}";

fn partial_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("{LATITUDE}|{LONGITUDE}"))
            .expect("partial coordinate regex must compile")
    })
}

fn pair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"{LATITUDE}\s+{LONGITUDE}"))
            .expect("coordinate pair regex must compile")
    })
}

/// Stateless recogniser for fixed coordinates.
pub struct CoordinateFilter;

impl CoordinateFilter {
    /// Remove every latitude or longitude half found in `text`.
    ///
    /// Surrounding text is left untouched. Borrows when nothing matched.
    pub fn filter(text: &str) -> Cow<'_, str> {
        partial_re().replace_all(text, "")
    }

    /// True if at least one coordinate half occurs in `text`.
    pub fn matches_partial(text: &str) -> bool {
        partial_re().is_match(text)
    }

    /// The first complete latitude + longitude pair in `text`, if any.
    pub fn find(text: &str) -> Option<&str> {
        pair_re().find(text).map(|m| m.as_str())
    }
}
