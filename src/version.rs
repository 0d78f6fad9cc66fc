// src/version.rs
use std::fmt;

/// Opaque firmware release identifier pulled out of a feed entry title.
///
/// Ordering is plain string ordering, so `"10" < "9"`. Release tokens are
/// never parsed as numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when nothing has been recorded yet, or when this version sorts
    /// after the stored one.
    pub fn is_newer_than(&self, stored: Option<&Version>) -> bool {
        stored.map_or(true, |stored| self > stored)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the version token from a release title such as
/// `RT-AX88U_firmware_388_24240.zip`.
///
/// The title is split on `_` and tokens 2 and 3 are joined back with `_`.
/// Returns `None` when the title has fewer than four tokens.
pub fn extract_version(title: &str) -> Option<Version> {
    let mut tokens = title.split('_').skip(2);
    let major = tokens.next()?;
    let minor = tokens.next()?;
    Some(Version(format!("{major}_{minor}")))
}
