//! # Templates Module
//!
//! This module fills in license header templates and formats the result as a
//! comment block for a given file type.
//!
//! Header templates use double curly braces to mark the inputs they need:
//!
//! ```text
//! Copyright {{ year }} {{ author }}
//! ```
//!
//! The module includes:
//! - [`format_header`] for substituting placeholders from a [`ParameterSource`]
//! - [`placeholder_names`] for listing which parameters a template needs
//! - [`CommentStyle`] and [`format_with_comment_style`] for turning a rendered
//!   header into a comment for a specific file type
//!
//! ## Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use std::path::Path;
//!
//! use software_dmv::templates::{comment_style_for_file, format_header, format_with_comment_style};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut params = HashMap::new();
//! params.insert("year".to_string(), "2024".to_string());
//! params.insert("author".to_string(), "Alice".to_string());
//!
//! let path = Path::new("src/main.rs");
//! let header = format_header("Copyright {{ year }} {{ author }}", path, &params)?;
//! assert_eq!(header, "Copyright 2024 Alice");
//!
//! let commented = format_with_comment_style(&header, &comment_style_for_file(path));
//! assert!(commented.starts_with("// Copyright 2024 Alice"));
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

/// Matches a `{{ name }}` placeholder. The name may not contain whitespace or
/// braces, so `{{a}}{{b}}` yields two placeholders.
#[allow(clippy::unwrap_used)]
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{\s*([^\s{}]+)\s*\}\}").unwrap());

/// Error type for template rendering.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TemplateError {
  /// A placeholder names a parameter the configuration does not provide.
  #[error("Missing license parameter '{name}' (set it with `choose <LICENSE> -p {name}:<value>`)")]
  MissingParameter { name: String },
}

/// Anything that can supply values for header placeholders.
///
/// The project [`Config`](crate::config::Config) implements this through its
/// `LicenseParameters` table; plain string maps implement it directly.
pub trait ParameterSource {
  /// Returns the string form of the parameter called `name`, if present.
  fn parameter(&self, name: &str) -> Option<String>;
}

impl ParameterSource for HashMap<String, String> {
  fn parameter(&self, name: &str) -> Option<String> {
    self.get(name).cloned()
  }
}

impl ParameterSource for BTreeMap<String, String> {
  fn parameter(&self, name: &str) -> Option<String> {
    self.get(name).cloned()
  }
}

impl<T: ParameterSource + ?Sized> ParameterSource for &T {
  fn parameter(&self, name: &str) -> Option<String> {
    (**self).parameter(name)
  }
}

/// Fills every `{{ name }}` placeholder in `header` from `params`.
///
/// Placeholders are resolved left to right. Text outside placeholders,
/// including anything after the last one, is copied verbatim; a template
/// without placeholders comes back unchanged. Malformed delimiters such as
/// `{{ year` or `{{}}` are not placeholders and are kept as literal text.
///
/// `path` is the file the header is destined for. Substitution does not
/// depend on it.
///
/// # Errors
///
/// Returns [`TemplateError::MissingParameter`] for the first placeholder whose
/// name `params` does not provide. Nothing is ever substituted with an empty
/// string.
pub fn format_header<P>(header: &str, path: &Path, params: &P) -> Result<String, TemplateError>
where
  P: ParameterSource + ?Sized,
{
  debug!(path = %path.display(), "Formatting license header");

  let mut formatted = String::with_capacity(header.len());
  let mut last_end = 0;

  for captures in PLACEHOLDER_RE.captures_iter(header) {
    let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
      continue;
    };

    let value = params
      .parameter(name.as_str())
      .ok_or_else(|| TemplateError::MissingParameter {
        name: name.as_str().to_string(),
      })?;
    trace!(name = name.as_str(), value = %value, "Resolved placeholder");

    formatted.push_str(&header[last_end..whole.start()]);
    formatted.push_str(&value);
    last_end = whole.end();
  }

  formatted.push_str(&header[last_end..]);

  Ok(formatted)
}

/// Lists the distinct placeholder names in `template`, in order of first
/// appearance.
pub fn placeholder_names(template: &str) -> Vec<String> {
  let mut names: Vec<String> = Vec::new();
  for captures in PLACEHOLDER_RE.captures_iter(template) {
    if let Some(name) = captures.get(1)
      && !names.iter().any(|n| n == name.as_str())
    {
      names.push(name.as_str().to_string());
    }
  }
  names
}

/// How a header is turned into a comment for one kind of file.
///
/// Line styles prefix every line; block styles additionally open and close
/// the comment on lines of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
  /// Line opening a block comment
  pub open: Option<&'static str>,
  /// Prefix of every text line
  pub prefix: &'static str,
  /// Line closing a block comment
  pub close: Option<&'static str>,
}

impl CommentStyle {
  /// A style that only prefixes lines, such as `# `.
  pub const fn line(prefix: &'static str) -> Self {
    Self {
      open: None,
      prefix,
      close: None,
    }
  }

  /// A style with its own opening and closing lines.
  pub const fn block(open: &'static str, prefix: &'static str, close: &'static str) -> Self {
    Self {
      open: Some(open),
      prefix,
      close: Some(close),
    }
  }
}

const SLASHES: CommentStyle = CommentStyle::line("// ");
const HASH: CommentStyle = CommentStyle::line("# ");
const C_BLOCK: CommentStyle = CommentStyle::block("/*", " * ", " */");

/// Styles keyed by lowercase extension.
const STYLES_BY_EXTENSION: &[(&[&str], CommentStyle)] = &[
  (&["c", "h", "java", "scala", "kt", "kts", "css", "scss"], C_BLOCK),
  (&["js", "mjs", "cjs", "jsx", "ts", "tsx"], CommentStyle::block("/**", " * ", " */")),
  (
    &["rs", "go", "cc", "cpp", "hh", "hpp", "cs", "swift", "dart", "proto", "php"],
    SLASHES,
  ),
  (
    &["py", "sh", "bash", "rb", "pl", "yaml", "yml", "toml", "tf", "cmake", "r"],
    HASH,
  ),
  (&["el", "lisp", "clj"], CommentStyle::line(";; ")),
  (&["erl", "tex"], CommentStyle::line("% ")),
  (&["hs", "sql", "lua"], CommentStyle::line("-- ")),
  (&["html", "xml", "vue", "md"], CommentStyle::block("<!--", " ", "-->")),
  (&["ml", "mli"], CommentStyle::block("(*", " ", "*)")),
];

/// Extensionless build files, keyed by lowercase file name.
const STYLES_BY_FILE_NAME: &[(&str, CommentStyle)] = &[
  ("makefile", HASH),
  ("dockerfile", HASH),
  ("cmakelists.txt", HASH),
  ("gemfile", HASH),
];

/// Picks the comment style for a file from its name or extension.
///
/// Unknown file types get `// ` line comments.
pub fn comment_style_for_file(path: &Path) -> CommentStyle {
  let lowercase = |s: Option<&std::ffi::OsStr>| s.and_then(|s| s.to_str()).map(str::to_lowercase);

  if let Some(name) = lowercase(path.file_name())
    && let Some((_, style)) = STYLES_BY_FILE_NAME.iter().find(|(n, _)| *n == name)
  {
    return *style;
  }

  lowercase(path.extension())
    .and_then(|ext| {
      STYLES_BY_EXTENSION
        .iter()
        .find(|(exts, _)| exts.contains(&ext.as_str()))
        .map(|(_, style)| *style)
    })
    .unwrap_or(SLASHES)
}

/// Wraps `text` in a comment of the given style, one output line per input
/// line. Blank lines keep the prefix without its trailing space.
pub fn format_with_comment_style(text: &str, style: &CommentStyle) -> String {
  if text.is_empty() {
    return String::new();
  }

  let bare_prefix = style.prefix.trim_end();
  let mut lines: Vec<String> = Vec::new();

  lines.extend(style.open.map(str::to_string));
  lines.extend(text.lines().map(|line| {
    if line.trim().is_empty() {
      bare_prefix.to_string()
    } else {
      format!("{}{line}", style.prefix)
    }
  }));
  lines.extend(style.close.map(str::to_string));

  let mut block = lines.join("\n");
  block.push('\n');
  block
}
