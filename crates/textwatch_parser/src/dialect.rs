//! Source dialects.

use std::fmt;
use std::path::Path;

/// Which flavour of JSX-bearing source a buffer is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// JavaScript with JSX.
    Jsx,
    /// TypeScript with JSX.
    Tsx,
}

impl Dialect {
    /// Maps an editor language identifier onto a dialect.
    ///
    /// Only the two React language ids are checked; anything else (plain
    /// `typescript`, `json`, ...) is not ours.
    pub fn from_language_id(language_id: &str) -> Option<Self> {
        match language_id {
            "javascriptreact" => Some(Self::Jsx),
            "typescriptreact" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Maps a file extension (without the dot) onto a dialect.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "jsx" | "js" => Some(Self::Jsx),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Maps a file path onto a dialect using its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns the editor language identifier of this dialect.
    pub const fn language_id(&self) -> &'static str {
        match self {
            Self::Jsx => "javascriptreact",
            Self::Tsx => "typescriptreact",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jsx => f.write_str("jsx"),
            Self::Tsx => f.write_str("tsx"),
        }
    }
}
