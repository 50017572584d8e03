//! Conversion of coordinate arithmetic into spreadsheet formulas.
//!
//! Puzzle descriptions state the final position as arithmetic over the
//! variables, e.g. `N 47° [ B - C ].[ B x F - E x F - 3 x C ]`. The converter
//! finds each such dimension and splits it into literal text and formulas in
//! which every known variable points at its value cell:
//!
//! - **Filtering**: resolved coordinates are removed first
//! - **Masking**: orientation letters that start a dimension are wrapped in
//!   guards (`|N|`), so a variable that shares the letter is never taken for
//!   the start of a dimension and vice versa
//! - **Matching**: guard, orientation, degrees, degree mark, minutes formula,
//!   decimal point, fraction formula
//! - **Normalization**: `:` becomes `/`, `x` becomes `*`, brackets and braces
//!   become parentheses
//! - **Resolution**: letter runs become positional numbers (`AB` is
//!   `(10*A+1*B)`), then letters become cell references (`A` is `C7`)
//!
//! Letters without an address stay as they are. A dimension whose last
//! formula runs into such a letter (`0A.1BC` with only `A` known) is
//! dropped instead of being emitted cut short; [`unresolved_letters`]
//! reports the letters.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::cell_ref::CellRef;
use super::coordinate::CoordinateFilter;
use super::dimension::{Dimension, Fragment};
use super::error::{EngineError, Result};
use super::merge::Addresses;

const GUARD: char = '|';
const DEGREE_MARK: char = '°';
const ORIENTATIONS: &str = "NSEOW";

/// Characters of a formula, besides the known variable letters.
const FORMULA_CHARS: &str = r"0-9(){}\[\]+\-*/:x";

fn guarded_orientation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\|(?<orientation>[NSEOW])\|")
            .expect("guarded orientation regex must compile")
    })
}

fn guard_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\|[NSEOW]\|").expect("guard regex must compile"))
}

fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z]+").expect("word regex must compile"))
}

/// Degrees of a dimension whose letters may not be known yet.
fn any_degree_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^[ \t]*[0-9A-Z]{{1,3}}[ \t]*{DEGREE_MARK}"))
            .expect("degree regex must compile")
    })
}

/// Upper-case letters near dynamic coordinates in `description` that have no address.
///
/// Looks at the text following each dimension start, up to the next
/// dimension or line break. Words with lower-case letters are prose and
/// are skipped. Works with an empty address map, so stages laid out before
/// any variable is defined are covered too.
pub fn unresolved_letters(description: &str, addresses: &Addresses) -> BTreeSet<char> {
    let masked = guard_orientations(&CoordinateFilter::filter(description), any_degree_re());
    let mut letters = BTreeSet::new();
    for guard in guard_re().find_iter(&masked) {
        let rest = &masked[guard.end()..];
        let window = rest
            .find(['\n', GUARD])
            .map_or(rest, |end| &rest[..end]);
        for word in word_re().find_iter(window) {
            let word = word.as_str();
            if !word.chars().all(|c| c.is_ascii_uppercase()) {
                continue;
            }
            letters.extend(word.chars().filter(|&c| !addresses.contains(c)));
        }
    }
    letters
}

/// Guard every orientation letter directly followed by a match of `degree_re`.
fn guard_orientations(text: &str, degree_re: &Regex) -> String {
    let mut masked = String::with_capacity(text.len() + 8);
    for (idx, ch) in text.char_indices() {
        let rest = &text[idx + ch.len_utf8()..];
        if ORIENTATIONS.contains(ch) && degree_re.is_match(rest) {
            masked.push(GUARD);
            masked.push(ch);
            masked.push(GUARD);
        } else {
            masked.push(ch);
        }
    }
    masked
}

/// Turns dynamic coordinate text into spreadsheet formulas.
///
/// Holds an immutable snapshot of the variable addresses; every call is
/// independent of the others.
pub struct FormulaConverter {
    addresses: Addresses,
    column: usize,
    degree_re: Regex,
    dimension_re: Regex,
    formula_re: Regex,
    run_re: Regex,
}

impl FormulaConverter {
    /// Create a converter referencing values in `column` (zero-based).
    ///
    /// Fails with [`EngineError::EmptyAddresses`] when no variable is known yet.
    pub fn new(addresses: &Addresses, column: usize) -> Result<Self> {
        if addresses.is_empty() {
            return Err(EngineError::EmptyAddresses);
        }

        let variables: String = addresses
            .letters()
            .map(|letter| regex::escape(&letter.to_string()))
            .collect();
        let chars = format!("{FORMULA_CHARS}{variables}");
        let formula = format!(r"[{chars}](?:[{chars} \t]*[{chars}])?");

        let degree_re = Regex::new(&format!(r"^[ \t]*[0-9{variables}]{{1,3}}[ \t]*{DEGREE_MARK}"))?;
        let dimension_re = Regex::new(&format!(
            r"\|[{ORIENTATIONS}]\|[ \t]*{formula}[ \t]*{DEGREE_MARK}[ \t]*{formula}(?:[ \t]*{formula})?[ \t]*\.[ \t]*{formula}"
        ))?;
        let formula_re = Regex::new(&formula)?;
        let run_re = Regex::new(&format!("[0-9{variables}]+"))?;

        Ok(FormulaConverter {
            addresses: addresses.clone(),
            column,
            degree_re,
            dimension_re,
            formula_re,
            run_re,
        })
    }

    /// Every dynamic dimension in `description`, normalized, guards included.
    ///
    /// A match directly followed by an upper-case letter stopped at a variable
    /// without an address and is skipped.
    pub fn extract_formulae(&self, description: &str) -> Vec<String> {
        let masked = self.mask(&CoordinateFilter::filter(description));
        self.dimension_re
            .find_iter(&masked)
            .filter(|m| {
                let cut_short = masked[m.end()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_uppercase());
                if cut_short {
                    tracing::debug!(dimension = m.as_str(), "skipping dimension with undefined variables");
                }
                !cut_short
            })
            .map(|m| normalize(m.as_str()))
            .collect()
    }

    /// Orientation letter of a match returned by [`Self::extract_formulae`].
    pub fn get_orientation(&self, dimension: &str) -> Option<char> {
        guarded_orientation_re()
            .captures(dimension)
            .and_then(|caps| caps["orientation"].chars().next())
    }

    /// Split a match into literal text and resolved formulas, orientation excluded.
    pub fn split(&self, dimension: &str) -> Vec<Fragment> {
        let body = guarded_orientation_re()
            .find(dimension)
            .map_or(dimension, |guard| &dimension[guard.end()..]);

        let mut fragments = Vec::new();
        let mut last = 0;
        for formula in self.formula_re.find_iter(body) {
            if formula.start() > last {
                fragments.push(Fragment::Literal(body[last..formula.start()].to_string()));
            }
            fragments.push(Fragment::Formula(self.resolve_formula(formula.as_str())));
            last = formula.end();
        }
        if last < body.len() {
            fragments.push(Fragment::Literal(body[last..].to_string()));
        }
        fragments
    }

    /// Extract, identify and split every dimension of `description`.
    pub fn dimensions(&self, description: &str) -> Vec<Dimension> {
        self.extract_formulae(description)
            .iter()
            .filter_map(|raw| {
                Some(Dimension {
                    letter: self.get_orientation(raw)?,
                    fragments: self.split(raw),
                })
            })
            .collect()
    }

    /// Replace known variables in `text` by cell references.
    ///
    /// A run of digits and known letters holding at least one letter is read
    /// as a positional number, most significant first: `AB` becomes
    /// `(10*C1+1*C2)`. A single letter becomes its reference. Everything else,
    /// unknown letters included, is kept.
    pub fn resolve_formula(&self, text: &str) -> String {
        self.run_re
            .replace_all(text, |caps: &Captures| {
                let run = &caps[0];
                if !run.chars().any(|c| self.addresses.contains(c)) {
                    return run.to_string();
                }
                let mut digits = run.chars();
                match (digits.next(), digits.next()) {
                    (Some(letter), None) => self.operand(letter),
                    _ => self.positional(run),
                }
            })
            .into_owned()
    }

    /// Upper-case letters near dynamic coordinates in `description` that have no address.
    pub fn unresolved(&self, description: &str) -> BTreeSet<char> {
        unresolved_letters(description, &self.addresses)
    }

    /// Guard every orientation letter directly followed by degrees.
    fn mask(&self, text: &str) -> String {
        guard_orientations(text, &self.degree_re)
    }

    fn operand(&self, digit: char) -> String {
        match self.addresses.get(digit) {
            Some(row) => CellRef::reference(self.column, row),
            None => digit.to_string(),
        }
    }

    fn positional(&self, run: &str) -> String {
        let len = run.chars().count();
        let terms: Vec<String> = run
            .chars()
            .enumerate()
            .map(|(idx, digit)| {
                let weight = format!("1{}", "0".repeat(len - 1 - idx));
                format!("{}*{}", weight, self.operand(digit))
            })
            .collect();
        format!("({})", terms.join("+"))
    }
}

/// Replace casual operators and brackets by their formula equivalents.
fn normalize(dimension: &str) -> String {
    dimension
        .chars()
        .map(|c| match c {
            ':' => '/',
            'x' => '*',
            '[' | '{' => '(',
            ']' | '}' => ')',
            other => other,
        })
        .collect()
}
