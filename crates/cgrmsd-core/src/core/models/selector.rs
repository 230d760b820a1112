use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ALL_ATOMS_TOKEN: &str = "all";

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SelectorError {
    #[error("Atom selector '{0}' names no atoms. Use 'all' or a comma-separated list (e.g. \"C5',P\").")]
    Empty(String),
}

/// Decides which atom records contribute points during extraction.
///
/// Parsed from either the literal token `all` (case-insensitive) or a comma-separated list of
/// atom names such as `C5',P`. Names are compared against the trimmed atom-name field of each
/// record, so surrounding whitespace in the selector string is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AtomSelector {
    #[default]
    All,
    Names(BTreeSet<String>),
}

impl AtomSelector {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn matches(&self, atom_name: &str) -> bool {
        match self {
            AtomSelector::All => true,
            AtomSelector::Names(names) => names.contains(atom_name),
        }
    }
}

impl FromStr for AtomSelector {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_ATOMS_TOKEN) {
            return Ok(AtomSelector::All);
        }
        let names: BTreeSet<String> = trimmed
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            return Err(SelectorError::Empty(s.to_string()));
        }
        Ok(AtomSelector::Names(names))
    }
}

impl TryFrom<String> for AtomSelector {
    type Error = SelectorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AtomSelector> for String {
    fn from(selector: AtomSelector) -> Self {
        selector.to_string()
    }
}

impl fmt::Display for AtomSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AtomSelector::All => f.write_str(ALL_ATOMS_TOKEN),
            AtomSelector::Names(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                f.write_str(&joined.join(","))
            }
        }
    }
}
