//! Compiled text-matching patterns.
//!
//! A [`Pattern`] pairs an immutable source/flags pair with a compiled
//! matcher and a mutable match cursor. With the `g` flag set, repeated
//! [`Pattern::exec`] calls walk the input the way a host-style sticky
//! search does: each hit advances the cursor past the match, a miss
//! resets it to zero.

use std::fmt;

use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};

use crate::error::{ValueError, ValueResult};

/// Behavior flags for a [`Pattern`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PatternFlags {
    /// `g`: stateful matching that resumes at the cursor.
    pub global: bool,
    /// `i`: case-insensitive matching.
    pub ignore_case: bool,
    /// `m`: `^` and `$` match at line boundaries.
    pub multiline: bool,
    /// `s`: `.` also matches newlines.
    pub dot_all: bool,
}

impl PatternFlags {
    /// Parse a flag string. Each of `g i m s` may appear at most once;
    /// anything else is rejected.
    pub fn parse(flags: &str) -> ValueResult<Self> {
        let mut parsed = Self::default();
        for flag in flags.chars() {
            let slot = match flag {
                'g' => &mut parsed.global,
                'i' => &mut parsed.ignore_case,
                'm' => &mut parsed.multiline,
                's' => &mut parsed.dot_all,
                _ => return Err(ValueError::UnknownPatternFlag { flag }),
            };
            if *slot {
                return Err(ValueError::DuplicatePatternFlag { flag });
            }
            *slot = true;
        }
        Ok(parsed)
    }
}

impl fmt::Display for PatternFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.global {
            write!(f, "g")?;
        }
        if self.ignore_case {
            write!(f, "i")?;
        }
        if self.multiline {
            write!(f, "m")?;
        }
        if self.dot_all {
            write!(f, "s")?;
        }
        Ok(())
    }
}

/// A single successful match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    /// The matched text.
    pub text: String,
    /// Byte offset where the match starts.
    pub start: usize,
    /// Byte offset one past the end of the match.
    pub end: usize,
}

/// A compiled pattern with a mutable match cursor.
pub struct Pattern {
    source: String,
    flags: PatternFlags,
    regex: Regex,
    last_index: RwLock<usize>,
}

impl Pattern {
    /// Compile a pattern with no flags.
    pub fn new(source: &str) -> ValueResult<Self> {
        Self::with_flags(source, "")
    }

    /// Compile a pattern with the given flag string.
    pub fn with_flags(source: &str, flags: &str) -> ValueResult<Self> {
        let flags = PatternFlags::parse(flags)?;
        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.ignore_case)
            .multi_line(flags.multiline)
            .dot_matches_new_line(flags.dot_all)
            .build()
            .map_err(|err| ValueError::PatternSyntax {
                pattern: source.to_string(),
                message: err.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            flags,
            regex,
            last_index: RwLock::new(0),
        })
    }

    /// The pattern source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The parsed flags.
    pub fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Current match cursor (byte offset). Always zero without the `g` flag.
    pub fn last_index(&self) -> usize {
        *self.last_index.read()
    }

    /// Move the match cursor.
    pub fn set_last_index(&self, index: usize) {
        *self.last_index.write() = index;
    }

    /// Find the next match in `input`.
    ///
    /// Without `g` this always searches from the start and leaves the
    /// cursor alone. With `g` the search resumes at the cursor; a hit
    /// advances it past the match and a miss (or an out-of-range cursor)
    /// resets it to zero and yields `None`.
    pub fn exec(&self, input: &str) -> Option<PatternMatch> {
        if !self.flags.global {
            return self.regex.find(input).map(|m| PatternMatch {
                text: m.as_str().to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
        let start = self.last_index();
        if start > input.len() {
            self.set_last_index(0);
            return None;
        }
        match self.regex.find_at(input, start) {
            Some(m) => {
                self.set_last_index(m.end());
                Some(PatternMatch {
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                })
            }
            None => {
                self.set_last_index(0);
                None
            }
        }
    }

    /// Check whether the pattern matches `input`. Advances the cursor
    /// exactly like [`Pattern::exec`] when `g` is set.
    pub fn test(&self, input: &str) -> bool {
        self.exec(input).is_some()
    }

    /// A new pattern with the same source and flags and the cursor at zero.
    ///
    /// The compiled matcher is shared, so this never re-runs compilation.
    pub fn fresh(&self) -> Self {
        Self {
            source: self.source.clone(),
            flags: self.flags,
            regex: self.regex.clone(),
            last_index: RwLock::new(0),
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let flags = PatternFlags::parse("gis").unwrap();
        assert!(flags.global);
        assert!(flags.ignore_case);
        assert!(!flags.multiline);
        assert!(flags.dot_all);
        assert_eq!(flags.to_string(), "gis");
    }

    #[test]
    fn test_reject_unknown_flag() {
        assert!(matches!(
            PatternFlags::parse("gy"),
            Err(ValueError::UnknownPatternFlag { flag: 'y' })
        ));
    }

    #[test]
    fn test_reject_duplicate_flag() {
        assert!(matches!(
            PatternFlags::parse("gg"),
            Err(ValueError::DuplicatePatternFlag { flag: 'g' })
        ));
    }

    #[test]
    fn test_reject_bad_source() {
        assert!(matches!(
            Pattern::new("(unclosed"),
            Err(ValueError::PatternSyntax { .. })
        ));
    }

    #[test]
    fn test_exec_without_global() {
        let p = Pattern::new("a+").unwrap();
        let m = p.exec("baaad").unwrap();
        assert_eq!(m.text, "aaa");
        assert_eq!((m.start, m.end), (1, 4));
        assert_eq!(p.last_index(), 0);
        let again = p.exec("baaad").unwrap();
        assert_eq!(again.start, 1);
    }

    #[test]
    fn test_exec_global_walks_input() {
        let p = Pattern::with_flags("a+", "g").unwrap();
        assert_eq!(p.exec("aa b aaa").unwrap().text, "aa");
        assert_eq!(p.last_index(), 2);
        assert_eq!(p.exec("aa b aaa").unwrap().text, "aaa");
        assert_eq!(p.last_index(), 8);
        assert!(p.exec("aa b aaa").is_none());
        assert_eq!(p.last_index(), 0);
    }

    #[test]
    fn test_exec_global_cursor_past_end() {
        let p = Pattern::with_flags("x", "g").unwrap();
        p.set_last_index(100);
        assert!(p.exec("x").is_none());
        assert_eq!(p.last_index(), 0);
    }

    #[test]
    fn test_case_insensitive() {
        let p = Pattern::with_flags("abc", "i").unwrap();
        assert!(p.test("xABCy"));
    }

    #[test]
    fn test_fresh_resets_cursor() {
        let p = Pattern::with_flags("\\d+", "g").unwrap();
        assert!(p.exec("12 34").is_some());
        assert_eq!(p.last_index(), 2);
        let fresh = p.fresh();
        assert_eq!(fresh.last_index(), 0);
        assert_eq!(fresh.source(), p.source());
        assert_eq!(fresh.flags(), p.flags());
        assert_eq!(p.last_index(), 2);
    }
}
