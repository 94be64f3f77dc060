//! Non-fatal diagnostics attached to parts and headers.
//!
//! Every node of a parsed header owns a [`Diagnostics`] collector. Nodes
//! implement [`ErrorBag`] so a query on a header can walk all of its parts.
//! Some nodes also check their content lazily; that check runs at most once
//! per node no matter how often diagnostics are queried.

use std::cell::OnceCell;
use std::error::Error as StdError;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Severity of a diagnostic, from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Notice => "notice",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Critical => "critical",
        };
        f.write_str(name)
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "notice" => Ok(Severity::Notice),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" => Ok(Severity::Critical),
            _ => Err(Error::UnknownSeverity(s.into())),
        }
    }
}

/// One recorded problem.
#[derive(Debug)]
pub struct Diagnostic {
    context: &'static str,
    message: String,
    severity: Severity,
    cause: Option<Box<dyn StdError + Send + Sync>>,
}

impl Diagnostic {
    pub fn new(context: &'static str, message: impl Into<String>, severity: Severity) -> Self {
        Diagnostic {
            context,
            message: message.into(),
            severity,
            cause: None,
        }
    }

    /// Attach the underlying error.
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Name of the kind of node that recorded this diagnostic.
    pub fn context(&self) -> &'static str {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn cause(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    fn log(&self) {
        let cause = self.cause.as_ref().map(|c| c.to_string()).unwrap_or_default();
        match self.severity {
            Severity::Debug => {
                tracing::debug!(context = self.context, %cause, "{}", self.message)
            }
            Severity::Info | Severity::Notice => {
                tracing::info!(context = self.context, %cause, "{}", self.message)
            }
            Severity::Warning => {
                tracing::warn!(context = self.context, %cause, "{}", self.message)
            }
            Severity::Error | Severity::Critical => {
                tracing::error!(context = self.context, %cause, "{}", self.message)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({})", cause)?;
        }
        Ok(())
    }
}

/// Collector owned by a single node.
#[derive(Debug)]
pub struct Diagnostics {
    context: &'static str,
    recorded: Vec<Diagnostic>,
    validated: OnceCell<Vec<Diagnostic>>,
}

impl Diagnostics {
    pub fn new(context: &'static str) -> Self {
        Diagnostics {
            context,
            recorded: Vec::new(),
            validated: OnceCell::new(),
        }
    }

    pub fn context(&self) -> &'static str {
        self.context
    }

    /// Append a diagnostic and log it.
    pub fn record(&mut self, message: impl Into<String>, severity: Severity) -> &mut Diagnostic {
        self.push(Diagnostic::new(self.context, message, severity))
    }

    /// Append an already built diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) -> &mut Diagnostic {
        diagnostic.log();
        self.recorded.push(diagnostic);
        let last = self.recorded.len() - 1;
        &mut self.recorded[last]
    }

    /// Whether the lazy check of the owning node already ran.
    pub fn is_validated(&self) -> bool {
        self.validated.get().is_some()
    }

    fn validated_with<F>(&self, check: F) -> &[Diagnostic]
    where
        F: FnOnce() -> Vec<Diagnostic>,
    {
        self.validated.get_or_init(|| {
            let found = check();
            found.iter().for_each(Diagnostic::log);
            found
        })
    }

    fn validated(&self) -> &[Diagnostic] {
        self.validated.get().map_or(&[], Vec::as_slice)
    }
}

/// A node that carries diagnostics and may have child nodes.
pub trait ErrorBag {
    /// The node's own collector.
    fn diagnostics(&self) -> &Diagnostics;

    /// Lazy content check. Called at most once per node, on the first
    /// query that asks for validation.
    fn validate(&self) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Nodes whose diagnostics are aggregated into this one.
    fn children(&self) -> Vec<&dyn ErrorBag> {
        Vec::new()
    }

    /// This node's diagnostics at or above `min`.
    fn errors(&self, validate: bool, min: Severity) -> Vec<&Diagnostic> {
        let bag = self.diagnostics();
        let checked = if validate {
            bag.validated_with(|| self.validate())
        } else {
            bag.validated()
        };
        bag.recorded
            .iter()
            .chain(checked)
            .filter(|d| d.severity >= min)
            .collect()
    }

    fn has_errors(&self, validate: bool, min: Severity) -> bool {
        !self.errors(validate, min).is_empty()
    }

    /// Diagnostics of this node followed by those of all descendants,
    /// depth first.
    fn all_errors(&self, validate: bool, min: Severity) -> Vec<&Diagnostic> {
        let mut out = self.errors(validate, min);
        for child in self.children() {
            out.extend(child.all_errors(validate, min));
        }
        out
    }

    fn has_any_errors(&self, validate: bool, min: Severity) -> bool {
        self.has_errors(validate, min)
            || self.children().iter().any(|c| c.has_any_errors(validate, min))
    }
}
