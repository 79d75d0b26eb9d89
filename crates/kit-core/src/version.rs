//! Calendar versions of bundle tracks
//!
//! Bundles are versioned `YYYY.M.D.N`: release date plus a same-day counter.
//! Ordering is numeric field by field, so `2025.11.10.1 > 2025.11.9.3`.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A parsed `YYYY.M.D.N` version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalVer {
    pub year: u32,
    pub month: u32,
    pub day: u32,
    pub increment: u32,
}

impl CalVer {
    pub fn parse(version: &str) -> Result<Self> {
        let parts: Vec<&str> = version.trim().split('.').collect();
        let [year, month, day, increment] = parts.as_slice() else {
            return Err(Error::InvalidVersion(version.to_string()));
        };
        let field = |s: &str| {
            s.parse::<u32>()
                .map_err(|_| Error::InvalidVersion(version.to_string()))
        };
        Ok(Self {
            year: field(year)?,
            month: field(month)?,
            day: field(day)?,
            increment: field(increment)?,
        })
    }

    pub fn is_valid(version: &str) -> bool {
        Self::parse(version).is_ok()
    }

    /// How far `target` moves forward from `self`.
    ///
    /// A newer year or month is a major change, a newer day is minor and a
    /// newer counter is a patch. Equal or older targets are no change.
    pub fn change_to(&self, target: &CalVer) -> ChangeType {
        if target <= self {
            ChangeType::None
        } else if (target.year, target.month) != (self.year, self.month) {
            ChangeType::Major
        } else if target.day != self.day {
            ChangeType::Minor
        } else {
            ChangeType::Patch
        }
    }
}

impl fmt::Display for CalVer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}.{}", self.year, self.month, self.day, self.increment)
    }
}

impl FromStr for CalVer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Size of a version step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    Major,
    Minor,
    Patch,
    None,
}

/// Where an installed version stands relative to the latest available one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStatus {
    UpToDate,
    Behind(ChangeType),
    /// The installed version is newer than anything the source offers.
    Ahead,
}

/// Compare installed against latest.
pub fn version_status(installed: &CalVer, latest: &CalVer) -> VersionStatus {
    match installed.cmp(latest) {
        Ordering::Equal => VersionStatus::UpToDate,
        Ordering::Greater => VersionStatus::Ahead,
        Ordering::Less => VersionStatus::Behind(installed.change_to(latest)),
    }
}

/// The candidate naming the greatest CalVer, as written. Invalid entries are
/// skipped.
pub fn latest_of<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter_map(|c| CalVer::parse(c).ok().map(|v| (v, c)))
        .max_by_key(|(v, _)| *v)
        .map(|(_, c)| c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn v(s: &str) -> CalVer {
        CalVer::parse(s).unwrap()
    }

    #[rstest]
    #[case("2025.11.9.1", "2026.1.1.1", ChangeType::Major)]
    #[case("2025.11.9.1", "2025.12.1.1", ChangeType::Major)]
    #[case("2025.11.9.1", "2025.11.10.1", ChangeType::Minor)]
    #[case("2025.11.9.1", "2025.11.9.2", ChangeType::Patch)]
    #[case("2025.11.9.1", "2025.11.9.1", ChangeType::None)]
    #[case("2025.11.10.1", "2025.11.9.5", ChangeType::None)]
    fn classifies_steps(#[case] from: &str, #[case] to: &str, #[case] expected: ChangeType) {
        assert_eq!(v(from).change_to(&v(to)), expected);
    }

    #[test]
    fn ordering_is_numeric_not_lexical() {
        assert!(v("2025.11.10.1") > v("2025.11.9.3"));
        assert!(v("2025.2.1.1") < v("2025.10.1.1"));
    }

    #[rstest]
    #[case("")]
    #[case("2025.11.9")]
    #[case("2025.11.9.1.0")]
    #[case("2025.11.x.1")]
    #[case("1.0.0")]
    fn rejects_malformed(#[case] raw: &str) {
        assert!(CalVer::parse(raw).is_err());
    }

    #[test]
    fn display_round_trips() {
        assert_eq!(v("2025.11.09.1").to_string(), "2025.11.9.1");
    }

    #[test]
    fn status_detects_local_ahead() {
        assert_eq!(version_status(&v("2025.11.10.1"), &v("2025.11.9.1")), VersionStatus::Ahead);
        assert_eq!(version_status(&v("2025.11.9.1"), &v("2025.11.9.1")), VersionStatus::UpToDate);
        assert_eq!(
            version_status(&v("2025.11.9.1"), &v("2025.11.10.1")),
            VersionStatus::Behind(ChangeType::Minor)
        );
    }

    #[test]
    fn latest_skips_invalid_names() {
        let latest = latest_of(["2025.1.1.1", "notes", "2025.10.2.1", "2025.9.30.4"]);
        assert_eq!(latest, Some("2025.10.2.1"));
        assert_eq!(latest_of(Vec::<&str>::new()), None);
    }
}
