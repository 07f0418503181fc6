use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

use crate::common::{Error, Result};

/// A parsed dotted element number such as `1.1` or `1.1.A`.
///
/// Leading components are non-negative integers; only the last component may
/// be a non-numeric indicator suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNumber {
    components: SmallVec<[u32; 4]>,
    /// Written digit count of each component, leading zeros included.
    digits: SmallVec<[u32; 4]>,
    suffix: Option<String>,
}

impl ElementNumber {
    /// Parse a raw `Number` cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use plantilla::hierarchy::ElementNumber;
    ///
    /// let number = ElementNumber::parse("1.1.A")?;
    /// assert_eq!(number.components(), &[1, 1]);
    /// assert_eq!(number.suffix(), Some("A"));
    ///
    /// assert!(ElementNumber::parse("1..2").is_err());
    /// assert!(ElementNumber::parse("1.x.2").is_err());
    /// # Ok::<(), plantilla::Error>(())
    /// ```
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::malformed(raw, "number is empty"));
        }

        let parts: Vec<&str> = trimmed.split('.').map(str::trim).collect();
        let last = parts.len() - 1;
        let mut components = SmallVec::new();
        let mut digits = SmallVec::new();
        let mut suffix = None;

        for (index, part) in parts.iter().enumerate() {
            if part.is_empty() {
                return Err(Error::malformed(raw, "empty component between dots"));
            }
            if part.bytes().all(|b| b.is_ascii_digit()) {
                let value = part.parse::<u32>().map_err(|_| {
                    Error::malformed(raw, format!("component '{}' is out of range", part))
                })?;
                components.push(value);
                digits.push(part.len() as u32);
            } else if index == last {
                suffix = Some((*part).to_string());
            } else {
                return Err(Error::malformed(
                    raw,
                    format!("component '{}' is not a non-negative integer", part),
                ));
            }
        }

        if components.is_empty() {
            return Err(Error::malformed(raw, "no numeric component"));
        }

        Ok(Self {
            components,
            digits,
            suffix,
        })
    }

    /// Numeric components, in order.
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// Trailing non-numeric suffix, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Key of the objective this number belongs to (its first two
    /// components).
    ///
    /// `1.A` has only one numeric component before the suffix and is rejected.
    pub fn objective_key(&self, raw: &str) -> Result<ObjectiveKey> {
        match (self.components.as_slice(), self.digits.as_slice()) {
            ([major, minor, ..], [major_digits, minor_digits, ..]) => Ok(ObjectiveKey {
                major: *major,
                minor: *minor,
                major_digits: *major_digits,
                minor_digits: *minor_digits,
            }),
            _ => Err(Error::malformed(
                raw,
                "expected at least two numeric components before any indicator suffix",
            )),
        }
    }
}

/// Identity of an objective node: the first two components of its number,
/// as written.
///
/// `1.01` and `1.1` are different objectives. Ordering compares the
/// components as integers, major first; keys with equal values order by
/// their written text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectiveKey {
    major: u32,
    minor: u32,
    major_digits: u32,
    minor_digits: u32,
}

impl ObjectiveKey {
    /// Key written without leading zeros.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            major_digits: digit_count(major),
            minor_digits: digit_count(minor),
        }
    }

    /// Parse the objective key out of any element number.
    pub fn from_number(raw: &str) -> Result<Self> {
        ElementNumber::parse(raw)?.objective_key(raw)
    }

    /// Integer tuple used for ordering.
    pub const fn sort_key(&self) -> (u32, u32) {
        (self.major, self.minor)
    }

    /// Display name used when no specific-objective row names this key.
    pub fn placeholder_name(&self) -> String {
        format!("[Objetivo {}]", self)
    }
}

const fn digit_count(value: u32) -> u32 {
    match value.checked_ilog10() {
        Some(log) => log + 1,
        None => 1,
    }
}

impl Ord for ObjectiveKey {
    fn cmp(&self, other: &Self) -> Ordering {
        // More leading zeros sort first, as the written text would
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| other.major_digits.cmp(&self.major_digits))
            .then_with(|| other.minor_digits.cmp(&self.minor_digits))
    }
}

impl PartialOrd for ObjectiveKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ObjectiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:0mw$}.{:0nw$}",
            self.major,
            self.minor,
            mw = self.major_digits as usize,
            nw = self.minor_digits as usize
        )
    }
}
