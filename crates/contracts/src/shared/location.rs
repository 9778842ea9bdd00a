use std::fmt;
use thiserror::Error;

/// Separator between city and state in the listing label ("City, State")
pub const LABEL_SEPARATOR: &str = ", ";

/// Ошибка разбора метки "Город, Штат"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid location format: '{label}'. Expected: 'City, State'")]
pub struct LocationParseError {
    pub label: String,
}

/// Composite location key: a city is only unique together with its state.
///
/// Ordering is by city first, then state, so a `BTreeMap<Location, _>`
/// iterates groups in the same order as a `(city, state)` group-by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub city: String,
    pub state: String,
}

impl Location {
    pub fn new(city: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            state: state.into(),
        }
    }

    /// Parse a listing label of the form "City, State".
    ///
    /// The label must split on ", " into exactly two parts, each non-empty
    /// after trimming. Matching is case-sensitive, so no normalization is done.
    pub fn parse(label: &str) -> Result<Self, LocationParseError> {
        let parts: Vec<&str> = label.split(LABEL_SEPARATOR).collect();
        let err = || LocationParseError {
            label: label.to_string(),
        };

        match parts.as_slice() {
            [city, state] => {
                let city = city.trim();
                let state = state.trim();
                if city.is_empty() || state.is_empty() {
                    return Err(err());
                }
                Ok(Self::new(city, state))
            }
            _ => Err(err()),
        }
    }

    /// Label used in listings and metadata: "City, State"
    pub fn listing_label(&self) -> String {
        self.to_string()
    }

    /// Label used for chart series: "City (State)"
    pub fn chart_label(&self) -> String {
        format!("{} ({})", self.city, self.state)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.city, LABEL_SEPARATOR, self.state)
    }
}
