use std::sync::Arc;

use once_cell::sync::Lazy;
use semver::Version;

use super::VersionSet;
use super::catalog::{FIRST_04_PATCH, SOLC_RELEASES};

static SOLC: Lazy<Arc<VersionDomain>> = Lazy::new(|| {
    let versions = SOLC_RELEASES.iter().flat_map(|&(major, minor, last)| {
        let first = if (major, minor) == (0, 4) { FIRST_04_PATCH } else { 0 };
        (first..=last).map(move |patch| Version::new(major, minor, patch))
    });
    Arc::new(VersionDomain::new(versions))
});

/// Ordered catalogue of the compiler versions the resolver can reason about.
///
/// Index `i` is the canonical bit position of the `i`th version in every
/// [`VersionSet`] built against this domain. A domain is immutable once
/// built and shared through `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDomain {
    versions: Vec<Version>,
}

impl VersionDomain {
    /// Build a domain from any versions; they are sorted ascending and
    /// deduplicated.
    pub fn new(versions: impl IntoIterator<Item = Version>) -> Self {
        let mut versions: Vec<Version> = versions.into_iter().collect();
        versions.sort();
        versions.dedup();
        Self { versions }
    }

    /// Build a domain from version strings such as `"0.8.19"`.
    pub fn parse<S: AsRef<str>>(
        versions: impl IntoIterator<Item = S>,
    ) -> Result<Self, semver::Error> {
        let versions = versions
            .into_iter()
            .map(|v| Version::parse(v.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(versions))
    }

    /// Process-wide catalogue of released solc versions.
    pub fn solc() -> Arc<Self> {
        Arc::clone(&SOLC)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn versions(&self) -> &[Version] {
        &self.versions
    }

    pub fn get(&self, index: usize) -> Option<&Version> {
        self.versions.get(index)
    }

    pub fn index_of(&self, version: &Version) -> Option<usize> {
        self.versions.binary_search(version).ok()
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.index_of(version).is_some()
    }

    pub fn full_set(&self) -> VersionSet {
        VersionSet::full(self.len())
    }

    pub fn empty_set(&self) -> VersionSet {
        VersionSet::empty(self.len())
    }

    /// Set of the given versions; versions outside the domain are ignored.
    pub fn set_of<'a>(&self, versions: impl IntoIterator<Item = &'a Version>) -> VersionSet {
        let mut set = self.empty_set();
        for version in versions {
            if let Some(index) = self.index_of(version) {
                set.set(index);
            }
        }
        set
    }

    /// Set of every version satisfying `predicate`.
    pub fn filter(&self, mut predicate: impl FnMut(&Version) -> bool) -> VersionSet {
        VersionSet::from_fn(self.len(), |i| predicate(&self.versions[i]))
    }

    /// Versions whose bit is set in `set`, ascending.
    pub fn members<'a>(&'a self, set: &'a VersionSet) -> impl Iterator<Item = &'a Version> + 'a {
        set.iter_set().filter_map(|i| self.versions.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solc_catalogue_bounds() {
        let solc = VersionDomain::solc();
        assert_eq!(solc.get(0), Some(&Version::new(0, 4, 11)));
        assert_eq!(solc.versions().last(), Some(&Version::new(0, 8, 30)));
        assert!(solc.contains(&Version::new(0, 7, 6)));
        assert!(!solc.contains(&Version::new(0, 7, 7)));
        assert_eq!(solc.len(), 16 + 18 + 13 + 7 + 31);
    }

    #[test]
    fn solc_catalogue_is_shared() {
        assert!(Arc::ptr_eq(&VersionDomain::solc(), &VersionDomain::solc()));
    }

    #[test]
    fn new_sorts_and_dedups() {
        let domain = VersionDomain::parse(["0.8.19", "0.7.6", "0.8.19", "0.8.0"]).unwrap();
        let names: Vec<String> = domain.versions().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["0.7.6", "0.8.0", "0.8.19"]);
    }

    #[test]
    fn set_of_ignores_unknown_versions() {
        let domain = VersionDomain::parse(["0.7.6", "0.8.0"]).unwrap();
        let set = domain.set_of(&[Version::new(0, 8, 0), Version::new(0, 9, 0)]);
        assert_eq!(domain.members(&set).collect::<Vec<_>>(), vec![&Version::new(0, 8, 0)]);
    }
}
