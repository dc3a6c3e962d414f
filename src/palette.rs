//! Color Palette - Symbolic Names
//!
//! The compiler never resolves colors. Renderers call `Color::resolved`.

use serde::{Deserialize, Serialize};
use std::fmt;

static PALETTE: &[(&str, &str)] = &[
    ("red", "rgb(193,40,11)"),
    ("orange", "rgb(255,144,36)"),
    ("yellow", "rgb(243,224,14)"),
    ("green", "rgb(22,220,129)"),
    ("lightblue", "rgb(27, 177, 233)"),
    ("blue", "rgb(35,67,232)"),
    ("violet", "rgb(220,84,183)"),
    ("black", "rgb(0,0,0)"),
];

/// Look up the concrete value of a symbolic color name
pub fn lookup(name: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, value)| *value)
}

/// All symbolic names, in palette order
pub fn names() -> impl Iterator<Item = &'static str> {
    PALETTE.iter().map(|(name, _)| *name)
}

/// A color as written by the author: a palette name or any string the
/// renderer understands (`#ff0000`, `rgb(1,2,3)`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl Color {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_symbolic(&self) -> bool {
        lookup(&self.0).is_some()
    }

    /// Palette value for symbolic names, the raw string otherwise
    pub fn resolved(&self) -> &str {
        lookup(&self.0).unwrap_or(&self.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
