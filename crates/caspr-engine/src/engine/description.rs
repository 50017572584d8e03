//! Splitting a stage description into variable-definition tasks.
//!
//! A description is cut at every definition marker (`A =`, `BCD=`) and at
//! every line break. The text following a marker, up to the next cut, is the
//! task description for the marker's letters:
//!
//! ```text
//! A = number of benches          -> Task { variables: "A", description: "number of benches" }
//! BC = year on the plaque        -> Task { variables: "BC", description: "year on the plaque" }
//! ```
//!
//! Prose before the first marker, or a marker directly followed by another
//! marker, yields nothing. Repeated definitions of the same letters produce
//! separate tasks; merging happens during layout.

use regex::{CaptureMatches, Regex};
use std::sync::OnceLock;

use super::stage::Task;

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(?<letters>[A-Z]+)[ \t]*=|\n")
            .expect("task separator regex must compile")
    })
}

/// Parse `description` into its tasks, lazily.
///
/// Every call starts a fresh, independent pass over the text.
pub fn parse(description: &str) -> Tasks<'_> {
    Tasks {
        text: description,
        separators: separator_re().captures_iter(description),
        cursor: 0,
        pending: None,
        finished: false,
    }
}

/// Iterator over the tasks of one description. See [`parse`].
pub struct Tasks<'a> {
    text: &'a str,
    separators: CaptureMatches<'static, 'a>,
    cursor: usize,
    pending: Option<&'a str>,
    finished: bool,
}

impl<'a> Tasks<'a> {
    fn take_segment(&mut self, segment: &'a str) -> Option<Task> {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            return None;
        }
        let letters = self.pending.take()?;
        Some(Task::new(trimmed, letters))
    }
}

impl Iterator for Tasks<'_> {
    type Item = Task;

    fn next(&mut self) -> Option<Task> {
        while !self.finished {
            let (segment, marker) = match self.separators.next() {
                Some(caps) => {
                    let whole = caps.get(0)?;
                    let segment = &self.text[self.cursor..whole.start()];
                    self.cursor = whole.end();
                    (segment, caps.name("letters").map(|m| m.as_str()))
                }
                None => {
                    self.finished = true;
                    (&self.text[self.cursor..], None)
                }
            };

            let task = self.take_segment(segment);
            if let Some(letters) = marker {
                self.pending = Some(letters);
            }
            if task.is_some() {
                return task;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::engine::Task;

    fn tasks(description: &str) -> Vec<Task> {
        parse(description).collect()
    }

    #[test]
    fn test_marker_on_previous_line_applies_to_next_text() {
        assert_eq!(tasks("A =\n  count the lampposts"), vec![Task::new("count the lampposts", "A")]);
    }

    #[test]
    fn test_text_after_task_line_is_ignored() {
        assert_eq!(tasks("A = one\ntwo"), vec![Task::new("one", "A")]);
    }

    #[test]
    fn test_marker_followed_by_marker_yields_only_second() {
        assert_eq!(tasks("A = B = bridge"), vec![Task::new("bridge", "B")]);
    }

    #[test]
    fn test_multiple_markers_on_one_line() {
        assert_eq!(
            tasks("Go to the church. A = bells B = windows"),
            vec![Task::new("bells", "A"), Task::new("windows", "B")]
        );
    }

    #[test]
    fn test_lowercase_prefix_is_not_a_marker() {
        assert!(tasks("xA = 3").is_empty());
    }

    #[test]
    fn test_parse_is_restartable() {
        let text = "A = foo\nB = bar";
        assert_eq!(tasks(text), tasks(text));
    }
}
