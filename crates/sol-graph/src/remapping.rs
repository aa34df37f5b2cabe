//! Import remappings (`[context:]prefix=target`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sol_config::{RemappingSyntax, split_remapping};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemappingError {
    #[error("remapping `{0}` has no `=`")]
    MissingEquals(String),

    #[error("remapping `{0}` has an empty prefix")]
    EmptyPrefix(String),
}

/// One remapping rule.
///
/// An import whose text starts with `prefix`, written in a file whose
/// source name starts with `context` (when given), has that prefix
/// replaced by `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Remapping {
    pub context: Option<String>,
    pub prefix: String,
    pub target: String,
}

impl Remapping {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            context: None,
            prefix: prefix.into(),
            target: target.into(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into()).filter(|c: &String| !c.is_empty());
        self
    }

    fn applies(&self, context: &str, import: &str) -> bool {
        import.starts_with(&self.prefix)
            && self.context.as_deref().is_none_or(|c| context.starts_with(c))
    }

    fn context_len(&self) -> usize {
        self.context.as_deref().map_or(0, str::len)
    }
}

impl FromStr for Remapping {
    type Err = RemappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = split_remapping(s).map_err(|e| match e {
            RemappingSyntax::MissingEquals => RemappingError::MissingEquals(s.to_string()),
            RemappingSyntax::EmptyPrefix => RemappingError::EmptyPrefix(s.to_string()),
        })?;

        let mut remapping = Self::new(parts.prefix, parts.target);
        if let Some(context) = parts.context {
            remapping = remapping.with_context(context);
        }
        Ok(remapping)
    }
}

impl fmt::Display for Remapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{context}:")?;
        }
        write!(f, "{}={}", self.prefix, self.target)
    }
}

/// Apply the best matching remapping to `import`, written in `context`.
///
/// The rule with the longest matching context wins, then the longest
/// prefix; among equals the later rule wins. Returns the import unchanged
/// when nothing matches.
pub fn apply_remappings(context: &str, import: &str, remappings: &[Remapping]) -> String {
    let best = remappings
        .iter()
        .filter(|r| r.applies(context, import))
        .max_by_key(|r| (r.context_len(), r.prefix.len()));

    match best {
        Some(r) => format!("{}{}", r.target, &import[r.prefix.len()..]),
        None => import.to_string(),
    }
}
