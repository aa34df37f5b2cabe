//! Version literals as they appear in `pragma solidity` expressions.
//!
//! Grammar: `[v]MAJOR[.MINOR[.PATCH]]`, where any component may be a
//! wildcard (`x`, `X`, `*`). Components after a wildcard must be wildcards
//! too. Pre-release and build suffixes are rejected.

use semver::Version;
use winnow::{
    Parser, Result as WResult,
    ascii::digit1,
    combinator::{alt, opt, preceded},
    token::one_of,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Number(u64),
    Wildcard,
}

/// A possibly partial version literal.
///
/// `minor` is only present when `major` is, `patch` only when `minor` is.
/// Absent components are wildcards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionLiteral {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
}

impl VersionLiteral {
    /// Parse a literal, returning `None` when it is malformed.
    pub fn parse(text: &str) -> Option<Self> {
        let (major, minor, patch) = literal.parse(text).ok()?;
        let parts = [Some(major), minor, patch];

        let mut numbers = [None; 3];
        let mut wildcard_seen = false;
        for (slot, component) in numbers.iter_mut().zip(parts) {
            match component {
                Some(Part::Number(n)) if !wildcard_seen => *slot = Some(n),
                Some(Part::Number(_)) => return None,
                Some(Part::Wildcard) | None => wildcard_seen = true,
            }
        }

        Some(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers[2],
        })
    }

    /// `*`, `x`: matches everything.
    pub fn is_any(&self) -> bool {
        self.major.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.patch.is_some()
    }

    /// The literal with absent components filled with zero.
    pub fn floor(&self) -> Version {
        Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        )
    }

    /// First version past everything this literal matches, or `None` for
    /// a complete literal (which matches exactly one version), for `*` and
    /// when the bound does not fit in a `u64` component.
    pub fn partial_ceiling(&self) -> Option<Version> {
        match (self.major, self.minor, self.patch) {
            (Some(_), Some(_), Some(_)) | (None, _, _) => None,
            (Some(major), Some(minor), None) => Some(Version::new(major, bump(minor)?, 0)),
            (Some(major), None, _) => Some(Version::new(bump(major)?, 0, 0)),
        }
    }

    /// Exclusive upper bound of `^literal`.
    ///
    /// Changes to the leftmost non-zero component are breaking. A literal
    /// that stops at a zero component locks that component only.
    pub fn caret_ceiling(&self) -> Option<Version> {
        match (self.major?, self.minor, self.patch) {
            (major, _, _) if major > 0 => Some(Version::new(bump(major)?, 0, 0)),
            (0, None, _) => Some(Version::new(1, 0, 0)),
            (0, Some(minor), _) if minor > 0 => Some(Version::new(0, bump(minor)?, 0)),
            (0, Some(_), None) => Some(Version::new(0, 1, 0)),
            (0, Some(_), Some(patch)) => Some(Version::new(0, 0, bump(patch)?)),
            _ => None,
        }
    }

    /// Exclusive upper bound of `~literal`: patch-level changes only, or
    /// minor-level changes when no minor was given.
    pub fn tilde_ceiling(&self) -> Option<Version> {
        match (self.major?, self.minor) {
            (major, Some(minor)) => Some(Version::new(major, bump(minor)?, 0)),
            (major, None) => Some(Version::new(bump(major)?, 0, 0)),
        }
    }
}

/// Next component value; `None` past `u64::MAX`.
fn bump(component: u64) -> Option<u64> {
    component.checked_add(1)
}

fn literal(input: &mut &str) -> WResult<(Part, Option<Part>, Option<Part>)> {
    let _ = opt(one_of(['v', 'V'])).parse_next(input)?;
    let major = part.parse_next(input)?;
    let minor = opt(preceded('.', part)).parse_next(input)?;
    let patch = match minor {
        Some(_) => opt(preceded('.', part)).parse_next(input)?,
        None => None,
    };
    Ok((major, minor, patch))
}

fn part(input: &mut &str) -> WResult<Part> {
    alt((
        digit1.parse_to::<u64>().map(Part::Number),
        one_of(['x', 'X', '*']).value(Part::Wildcard),
    ))
    .parse_next(input)
}
