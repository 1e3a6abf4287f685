use databind_domain::config::{BindingConfig, UnknownParameters};
use std::fmt::{self, Write as _};
use tracing::warn;

/// One step of the path from the document root to the value being bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Parameter(String),
    Index(usize),
    Key(String),
}

/// Per-operation state threaded through a read or write.
#[derive(Debug, Clone)]
pub struct DataContext {
    unknown_parameters: UnknownParameters,
    single_parameter_shorthand: bool,
    path: Vec<PathSegment>,
    warnings: Vec<String>,
}

impl Default for DataContext {
    fn default() -> Self {
        Self {
            unknown_parameters: UnknownParameters::Reject,
            single_parameter_shorthand: true,
            path: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl DataContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &BindingConfig) -> Self {
        Self {
            unknown_parameters: config.unknown_parameters,
            single_parameter_shorthand: config.single_parameter_shorthand,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn with_unknown_parameters(mut self, policy: UnknownParameters) -> Self {
        self.unknown_parameters = policy;
        self
    }

    #[must_use]
    pub const fn with_single_parameter_shorthand(mut self, enabled: bool) -> Self {
        self.single_parameter_shorthand = enabled;
        self
    }

    #[must_use]
    pub const fn unknown_parameters(&self) -> UnknownParameters {
        self.unknown_parameters
    }

    #[must_use]
    pub const fn single_parameter_shorthand(&self) -> bool {
        self.single_parameter_shorthand
    }

    /// Dotted path of the value being bound, e.g. `stages[0].steps[2].script`. Empty at the root.
    #[must_use]
    pub fn path(&self) -> String {
        let mut out = String::new();
        for segment in &self.path {
            match segment {
                PathSegment::Parameter(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                },
                PathSegment::Index(index) => {
                    let _ = write!(out, "[{index}]");
                },
                PathSegment::Key(key) => {
                    let _ = write!(out, "[{key:?}]");
                },
            }
        }
        out
    }

    /// The current path quoted for messages.
    #[must_use]
    pub fn location(&self) -> Location<'_> {
        Location(self)
    }

    /// Runs `f` with `segment` appended to the path.
    pub fn scoped<R>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    /// Records a non-fatal problem found while binding.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(path = %self.path(), "{message}");
        self.warnings.push(message);
    }

    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

/// Display adapter for [`DataContext::location`].
#[derive(Debug)]
pub struct Location<'a>(&'a DataContext);

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.path.is_empty() { f.write_str("the document root") } else { write!(f, "'{}'", self.0.path()) }
    }
}
