//! Loading formatting preferences from a TOML file.
//!
//! ```toml
//! wrap = "off"
//!
//! [spacing]
//! before-class-brace = "newline"
//! after-comma = "space"
//!
//! [indent.member]
//! width = 2
//!
//! [indent.label]
//! width = 0
//! absolute = true
//! ```
//!
//! Unknown keys are rejected with a span-labeled diagnostic; absent keys
//! take the documented defaults, so an empty file is a valid configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::Deserialize;
use thiserror::Error;

use crate::prefs::{FormatPrefs, IndentKind, RuleSite, Spacing, WrapMode};

/// Result type for preference loading (boxed to keep the Ok path small).
pub type Result<T> = std::result::Result<T, Box<ConfigError>>;

/// Indent widths beyond this are almost certainly a typo.
const MAX_INDENT_WIDTH: usize = 64;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("check that the preferences file exists and is readable"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse formatting preferences")]
    #[diagnostic(code(joule::prefs_parse))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("indent width {width} for '{kind}' exceeds the supported maximum of {max}")]
    #[diagnostic(
        code(joule::indent_width),
        help("choose a width of at most {max} columns")
    )]
    IndentWidth {
        kind: String,
        width: usize,
        max: usize,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PrefsFile {
    #[serde(default)]
    spacing: HashMap<RuleSite, Spacing>,
    #[serde(default)]
    indent: HashMap<IndentKind, IndentEntry>,
    #[serde(default)]
    wrap: WrapMode,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct IndentEntry {
    width: Option<usize>,
    absolute: Option<bool>,
}

/// Parse preferences from TOML text. `filename` labels diagnostics.
pub fn from_toml_str(src: &str, filename: &str) -> Result<FormatPrefs> {
    let file: PrefsFile = toml::from_str(src).map_err(|source| {
        let span = source.span().map(SourceSpan::from);
        Box::new(ConfigError::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    })?;

    let mut builder = FormatPrefs::builder();
    for (site, spacing) in file.spacing {
        builder = builder.space(site, spacing);
    }
    for (kind, entry) in file.indent {
        let default = kind.default_unit();
        let width = entry.width.unwrap_or(default.width);
        if width > MAX_INDENT_WIDTH {
            return Err(Box::new(ConfigError::IndentWidth {
                kind: kind.as_str().to_string(),
                width,
                max: MAX_INDENT_WIDTH,
            }));
        }
        let absolute = entry.absolute.unwrap_or(default.absolute);
        builder = builder.indent(kind, width, absolute);
    }
    builder = builder.wrap(file.wrap);
    Ok(builder.build())
}

/// Read and parse a preferences file.
pub fn from_path(path: impl AsRef<Path>) -> Result<FormatPrefs> {
    let path = path.as_ref();
    let src = fs::read_to_string(path).map_err(|source| {
        Box::new(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    })?;
    from_toml_str(&src, &path.display().to_string())
}
