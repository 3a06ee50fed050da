//! Configuration constants, default settings and the webquizrc file.
//!
//! The quiz XML refers to the quiz author's site-wide settings through a
//! sentinel value: any attribute or element whose text is [`DEFAULT_MARKER`]
//! is replaced by the value registered in [`Defaults`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{QuizError, Result};

/// Sentinel written by the LaTeX class when a setting was not given.
pub const DEFAULT_MARKER: &str = "DeFaUlT";

/// Settings that are stored as text but exposed as booleans.
pub const BOOLEAN_SETTINGS: [&str; 6] = [
    "debugging",
    "hide_side_menu",
    "one_page",
    "pst2pdf",
    "random_order",
    "save_state",
];

/// Settings whose element text (at close) is resolved against the defaults.
pub const SETTING_TAGS: [&str; 6] = [
    "department",
    "department_url",
    "institution",
    "institution_url",
    "language",
    "theme",
];

/// Tags whose attribute values (at open) are resolved as the setting named
/// by the tag.
pub const ATTRIBUTE_SETTING_TAGS: [&str; 3] = ["department", "institution", "uni"];

/// Default MathJax location.
pub const MATHJAX_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/mathjax/2.7.1/MathJax.js";

/// Stock settings: `(key, default, help)`.
const BUILTIN_SETTINGS: [(&str, &str, &str); 17] = [
    ("breadcrumbs", "", "Breadcrumbs at the top of quiz page"),
    ("debugging", "false", "Print debugging information"),
    ("department", "", "Name of department"),
    ("department_url", "/", "URL for department"),
    ("engine", "latex", "Default TeX engine used to compile web pages"),
    ("hide_side_menu", "false", "Do not display the side menu at start of quiz"),
    ("institution", "", "Institution or university"),
    ("institution_url", "/", "URL for institution or university"),
    ("language", "english", "Default language used on web pages"),
    ("mathjax", MATHJAX_URL, "URL for mathjax"),
    ("one_page", "false", "Display questions on one page"),
    ("pst2pdf", "false", "Convert pspicture environments to svg images"),
    ("random_order", "false", "Randomly order the quiz questions"),
    ("save_state", "false", "Save the state of answered questions permanently"),
    ("theme", "default", "Default colour theme used on web pages"),
    ("unit_url", "/", "URL for the unit home page"),
    ("webquiz_url", "", "Relative URL for the webquiz web directory"),
];

/// Help text for a builtin setting.
#[must_use]
pub fn setting_help(key: &str) -> Option<&'static str> {
    BUILTIN_SETTINGS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, _, help)| *help)
}

/// Check whether a key names one of the builtin settings.
#[must_use]
pub fn is_builtin_setting(key: &str) -> bool {
    BUILTIN_SETTINGS.iter().any(|(k, _, _)| *k == key)
}

/// Normalize an rc-file key: trimmed, lower case, `-` becomes `_`.
///
/// # Examples
/// ```
/// use webquiz::config::normalize_key;
///
/// assert_eq!(normalize_key(" Department-URL "), "department_url");
/// ```
#[must_use]
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

/// The caller-supplied mapping of setting name to default value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Defaults {
    values: BTreeMap<String, String>,
}

impl Defaults {
    /// Create an empty defaults mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the stock defaults shipped with webquiz.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_SETTINGS
            .iter()
            .map(|(key, value, _)| (*key, *value))
            .collect()
    }

    /// Register (or replace) the default for a setting.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up the default for a setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Iterate over all defaults in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check that every key in `keys` has a default.
    ///
    /// # Errors
    /// Returns `UnknownSetting` for the first key without a default.
    pub fn require(&self, keys: &[&str]) -> Result<()> {
        match keys.iter().find(|key| self.get(key).is_none()) {
            Some(key) => Err(QuizError::UnknownSetting {
                key: (*key).to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Resolve a raw value, substituting the default when it is the sentinel.
    ///
    /// Non-sentinel values are returned verbatim, without trimming.
    ///
    /// # Errors
    /// Returns `UnknownSetting` if the value is the sentinel and no default
    /// is registered for `key`.
    ///
    /// # Examples
    /// ```
    /// use webquiz::config::Defaults;
    ///
    /// let defaults = Defaults::builtin();
    /// assert_eq!(defaults.resolve("theme", " DeFaUlT ").unwrap(), "default");
    /// assert_eq!(defaults.resolve("theme", "Ocean  Blue").unwrap(), "Ocean  Blue");
    /// ```
    pub fn resolve(&self, key: &str, raw: &str) -> Result<String> {
        if raw.trim() != DEFAULT_MARKER {
            return Ok(raw.to_string());
        }
        self.get(key)
            .map(str::to_string)
            .ok_or_else(|| QuizError::UnknownSetting {
                key: key.to_string(),
            })
    }

    /// Read settings from an rc file, overriding the current values.
    ///
    /// Returns `Ok(false)` without changes if the file does not exist and
    /// `must_exist` is false.
    ///
    /// # Errors
    /// Returns `InvalidRcLine` or `UnknownRcSetting` for malformed content,
    /// and `Io` if the file cannot be read (or is required but missing).
    pub fn read_rc(&mut self, path: &Path, must_exist: bool) -> Result<bool> {
        if !path.is_file() {
            if must_exist {
                return Err(QuizError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("rc-file does not exist: {}", path.display()),
                )));
            }
            return Ok(false);
        }

        let content = fs::read_to_string(path)?;
        self.apply_rc(&content, path)?;
        tracing::debug!(path = %path.display(), "Read settings file");
        Ok(true)
    }

    /// Apply the contents of an rc file.
    ///
    /// # Errors
    /// See [`Defaults::read_rc`].
    pub fn apply_rc(&mut self, content: &str, path: &Path) -> Result<()> {
        for (index, raw_line) in content.lines().enumerate() {
            let line = raw_line.split('#').next().unwrap_or_default();
            if line.trim().is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(QuizError::InvalidRcLine {
                    path: path.to_path_buf(),
                    line: index + 1,
                    content: raw_line.trim().to_string(),
                });
            };

            let key = normalize_key(key);
            if key.is_empty() {
                continue;
            }
            if !is_builtin_setting(&key) {
                return Err(QuizError::UnknownRcSetting {
                    path: path.to_path_buf(),
                    key,
                });
            }
            self.set(key, value.trim());
        }
        Ok(())
    }

    /// Render the settings that differ from the builtin values as rc text.
    #[must_use]
    pub fn to_rc_string(&self) -> String {
        let builtin = Self::builtin();
        let mut out = String::from("# webquiz settings\n");
        for (key, value) in self.iter() {
            if builtin.get(key) == Some(value) {
                continue;
            }
            if let Some(help) = setting_help(key) {
                out.push_str(&format!("# {help}\n"));
            }
            out.push_str(&format!("{key} = {value}\n"));
        }
        out
    }

    /// Write the settings that differ from the builtin values to `path`.
    ///
    /// # Errors
    /// Returns `Io` if the file cannot be written.
    pub fn write_rc(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_rc_string())?;
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Defaults {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
