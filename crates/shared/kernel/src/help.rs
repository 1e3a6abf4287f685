//! Help lookup for models and their parameters.

use crate::error::{DataError, DataErrorExt};
use crate::types::TypeInfo;
use databind_domain::config::HelpConfig;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::trace;

/// External source of HTML help, keyed by the described type.
pub trait HelpSource: Send + Sync + fmt::Debug {
    /// # Errors
    /// `Io` when help exists but cannot be read.
    fn model_help(&self, ty: &TypeInfo) -> Result<Option<String>, DataError>;

    /// # Errors
    /// `Io` when help exists but cannot be read.
    fn parameter_help(&self, _ty: &TypeInfo, _name: &str) -> Result<Option<String>, DataError> {
        Ok(None)
    }
}

/// Help pages on disk: `<root>/<SimpleName>/help_<locale>.html`, falling back to `help.html`.
/// Parameters use `help-<name>_<locale>.html` and `help-<name>.html`.
#[derive(Debug, Clone)]
pub struct HelpDirectory {
    root: PathBuf,
    locale: String,
}

impl HelpDirectory {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), locale: "en".to_owned() }
    }

    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// `None` when no help directory is configured.
    #[must_use]
    pub fn from_config(config: &HelpConfig) -> Option<Self> {
        config.dir.as_ref().map(|dir| Self::new(dir).with_locale(&config.locale))
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn first_existing(&self, ty: &TypeInfo, stems: &[String]) -> Result<Option<String>, DataError> {
        let dir = self.root.join(ty.simple_name());
        for stem in stems {
            let path = dir.join(stem);
            match std::fs::read_to_string(&path) {
                Ok(html) => {
                    trace!(path = %path.display(), "loaded help");
                    return Ok(Some(html));
                },
                Err(err) if err.kind() == ErrorKind::NotFound => {},
                Err(err) => return Err(err).context(format!("reading {}", path.display())),
            }
        }
        Ok(None)
    }
}

impl HelpSource for HelpDirectory {
    fn model_help(&self, ty: &TypeInfo) -> Result<Option<String>, DataError> {
        self.first_existing(ty, &[format!("help_{}.html", self.locale), "help.html".to_owned()])
    }

    fn parameter_help(&self, ty: &TypeInfo, name: &str) -> Result<Option<String>, DataError> {
        self.first_existing(ty, &[format!("help-{name}_{}.html", self.locale), format!("help-{name}.html")])
    }
}

/// Renders plain doc text as HTML: blank lines separate `<p>` paragraphs.
#[must_use]
pub fn doc_to_html(text: &str) -> String {
    let mut html = String::from("<div>");
    for paragraph in text.split("\n\n").map(str::trim).filter(|p| !p.is_empty()) {
        html.push_str("<p>");
        let mut first = true;
        for line in paragraph.lines().map(str::trim) {
            if !first {
                html.push(' ');
            }
            first = false;
            escape_into(&mut html, line);
        }
        html.push_str("</p>");
    }
    html.push_str("</div>");
    html
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
