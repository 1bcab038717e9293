//! Typed compartment addressing.
//!
//! Compartments are addressed as `<ColumnLetter><Index>` (e.g. `A1`, `AB12`)
//! and sub-compartments as `<Compartment>.<Section>.<Space>` (e.g. `B2.1.0`).
//! Strings only exist at the serde boundary; everything else works with the
//! typed ids below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Formats a 0-based column index as spreadsheet-style letters.
///
/// # Examples
///
/// ```
/// use wardrobe_cutlist::models::compartment::column_letter;
///
/// assert_eq!(column_letter(0), "A");
/// assert_eq!(column_letter(25), "Z");
/// assert_eq!(column_letter(26), "AA");
/// assert_eq!(column_letter(27), "AB");
/// ```
#[must_use]
pub fn column_letter(index: u32) -> String {
    let mut letters = Vec::new();
    let mut n = u64::from(index) + 1;
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push(char::from(b'A' + rem));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Parses spreadsheet-style column letters back into a 0-based index.
///
/// # Errors
///
/// Returns an error for empty input, non `A-Z` characters, or overflow.
pub fn parse_column_letter(letters: &str) -> Result<u32> {
    if letters.is_empty() {
        anyhow::bail!("Column letter is empty");
    }

    let mut n: u64 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            anyhow::bail!("Invalid column letter '{letters}'. Expected A-Z");
        }
        n = n * 26 + u64::from(c as u8 - b'A') + 1;
        if n > u64::from(u32::MAX) {
            anyhow::bail!("Column letter '{letters}' is out of range");
        }
    }

    u32::try_from(n - 1).context(format!("Column letter '{letters}' is out of range"))
}

/// A wardrobe column, identified by its 0-based position from the left.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnId(pub u32);

impl ColumnId {
    /// Column letter (`A`, `B`, ..., `AA`).
    #[must_use]
    pub fn letter(self) -> String {
        column_letter(self.0)
    }

    /// 0-based index as `usize`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for ColumnId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_column_letter(s.trim()).map(Self)
    }
}

impl TryFrom<String> for ColumnId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColumnId> for String {
    fn from(id: ColumnId) -> Self {
        id.to_string()
    }
}

/// A compartment: column plus 1-based index counted bottom to top across modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompartmentId {
    /// Owning column
    pub column: ColumnId,
    /// 1-based index within the column
    pub index: u32,
}

impl CompartmentId {
    /// Creates a compartment id from a 0-based column and 1-based index.
    #[must_use]
    pub const fn new(column: u32, index: u32) -> Self {
        Self {
            column: ColumnId(column),
            index,
        }
    }
}

impl fmt::Display for CompartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.index)
    }
}

impl FromStr for CompartmentId {
    type Err = anyhow::Error;

    /// Parses keys like `A1` or `AB12`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .context(format!("Compartment key '{s}' has no index"))?;
        let (letters, digits) = s.split_at(split);

        let column: ColumnId = letters
            .parse()
            .context(format!("Invalid column in compartment key '{s}'"))?;
        let index: u32 = digits
            .parse()
            .context(format!("Invalid index in compartment key '{s}'"))?;

        if index == 0 {
            anyhow::bail!("Compartment index in '{s}' must be 1 or greater");
        }

        Ok(Self { column, index })
    }
}

impl TryFrom<String> for CompartmentId {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CompartmentId> for String {
    fn from(id: CompartmentId) -> Self {
        id.to_string()
    }
}

/// An inner space of a subdivided compartment.
///
/// `section` is the 0-based inner vertical section (between inner dividers),
/// `space` the 0-based inner horizontal space (between inner shelves),
/// counted bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubCompartmentId {
    /// Compartment the space belongs to
    pub base: CompartmentId,
    /// Inner section index
    pub section: u32,
    /// Inner space index
    pub space: u32,
}

impl fmt::Display for SubCompartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.base, self.section, self.space)
    }
}

/// Reference to either a whole compartment or one of its inner spaces.
///
/// This is what door groups and legacy door selections point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CompartmentKey {
    /// Whole compartment (`A1`)
    Compartment(CompartmentId),
    /// Inner space (`A1.0.1`)
    Sub(SubCompartmentId),
}

impl CompartmentKey {
    /// The compartment this key lives in (trailing `.section.space` stripped).
    #[must_use]
    pub const fn base(&self) -> CompartmentId {
        match self {
            Self::Compartment(id) => *id,
            Self::Sub(sub) => sub.base,
        }
    }

    /// Inner section index, if this key addresses a sub-compartment.
    #[must_use]
    pub const fn section(&self) -> Option<u32> {
        match self {
            Self::Compartment(_) => None,
            Self::Sub(sub) => Some(sub.section),
        }
    }
}

impl From<CompartmentId> for CompartmentKey {
    fn from(id: CompartmentId) -> Self {
        Self::Compartment(id)
    }
}

impl From<SubCompartmentId> for CompartmentKey {
    fn from(id: SubCompartmentId) -> Self {
        Self::Sub(id)
    }
}

impl fmt::Display for CompartmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compartment(id) => write!(f, "{id}"),
            Self::Sub(sub) => write!(f, "{sub}"),
        }
    }
}

impl FromStr for CompartmentKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('.').collect();

        match parts.as_slice() {
            [base] => Ok(Self::Compartment(base.parse()?)),
            [base, section, space] => {
                let base: CompartmentId = base.parse()?;
                let section = section
                    .parse()
                    .context(format!("Invalid section in key '{s}'"))?;
                let space = space
                    .parse()
                    .context(format!("Invalid space in key '{s}'"))?;
                Ok(Self::Sub(SubCompartmentId {
                    base,
                    section,
                    space,
                }))
            }
            _ => anyhow::bail!(
                "Invalid compartment key '{s}'. Expected 'A1' or 'A1.<section>.<space>'"
            ),
        }
    }
}

impl TryFrom<String> for CompartmentKey {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CompartmentKey> for String {
    fn from(key: CompartmentKey) -> Self {
        key.to_string()
    }
}
