//! Evaluation of version expressions into [`VersionSet`]s.

use semver::Version;
use tracing::debug;

use super::{VersionDomain, VersionLiteral, VersionSet};

/// One version constraint captured from a pragma, as raw text.
///
/// Evaluation happens against a domain, so the captured text is kept as
/// written and validated lazily.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VersionExpr {
    /// `from - to`, both bounds inclusive.
    Range { from: String, to: String },
    /// Operator (possibly empty) followed by a literal, e.g. `^0.8.0`.
    Term { op: String, version: String },
}

impl VersionExpr {
    pub fn range(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Range { from: from.into(), to: to.into() }
    }

    pub fn term(op: impl Into<String>, version: impl Into<String>) -> Self {
        Self::Term { op: op.into(), version: version.into() }
    }

    /// Versions of `domain` this expression admits, or `None` when the
    /// expression cannot be understood.
    pub fn evaluate(&self, domain: &VersionDomain) -> Option<VersionSet> {
        match self {
            Self::Range { from, to } => evaluate_range(domain, from, to),
            Self::Term { op, version } => evaluate_term(domain, op, version),
        }
    }
}

impl std::fmt::Display for VersionExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Range { from, to } => write!(f, "{from} - {to}"),
            Self::Term { op, version } => write!(f, "{op}{version}"),
        }
    }
}

fn evaluate_range(domain: &VersionDomain, from: &str, to: &str) -> Option<VersionSet> {
    let bound = |text: &str| {
        let literal = VersionLiteral::parse(text)?;
        if !literal.is_complete() {
            return None;
        }
        domain.index_of(&literal.floor())
    };
    let (a, b) = (bound(from)?, bound(to)?);
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    Some(VersionSet::from_fn(domain.len(), |i| (low..=high).contains(&i)))
}

fn evaluate_term(domain: &VersionDomain, op: &str, text: &str) -> Option<VersionSet> {
    let literal = VersionLiteral::parse(text)?;

    if literal.is_any() {
        return match op {
            "" | "=" | ">=" | "<=" | "^" | "~" => Some(domain.full_set()),
            "<" | ">" => Some(domain.empty_set()),
            _ => None,
        };
    }

    let floor = literal.floor();
    // a partial literal whose ceiling overflows is unparsable
    let ceiling = if literal.is_complete() {
        None
    } else {
        Some(literal.partial_ceiling()?)
    };

    let set = match op {
        "" | "=" => match ceiling {
            Some(ceiling) => between(domain, &floor, &ceiling),
            None => domain.filter(|v| *v == floor),
        },
        ">" => match ceiling {
            Some(ceiling) => domain.filter(|v| *v >= ceiling),
            None => domain.filter(|v| *v > floor),
        },
        ">=" => domain.filter(|v| *v >= floor),
        "<" => domain.filter(|v| *v < floor),
        "<=" => match ceiling {
            Some(ceiling) => domain.filter(|v| *v < ceiling),
            None => domain.filter(|v| *v <= floor),
        },
        "^" => between(domain, &floor, &literal.caret_ceiling()?),
        "~" => between(domain, &floor, &literal.tilde_ceiling()?),
        _ => return None,
    };
    Some(set)
}

/// `[low, high)`
fn between(domain: &VersionDomain, low: &Version, high: &Version) -> VersionSet {
    domain.filter(|v| v >= low && v < high)
}

/// A single `pragma solidity` declaration.
///
/// The pragma is a disjunction (`||`) of expression sets, each set a
/// conjunction of expressions (`>=0.7.0 <0.9.0`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionPragma {
    pub expression_sets: Vec<Vec<VersionExpr>>,
}

impl VersionPragma {
    pub fn new(expression_sets: Vec<Vec<VersionExpr>>) -> Self {
        Self { expression_sets }
    }

    /// Versions of `domain` admitted by this pragma.
    ///
    /// Unparsable expressions are dropped. An expression set left with no
    /// parsable expression places no constraint, which makes the whole
    /// disjunction unconstrained.
    pub fn evaluate(&self, domain: &VersionDomain) -> VersionSet {
        if self.expression_sets.is_empty() {
            return domain.full_set();
        }

        let mut admitted = domain.empty_set();
        for expressions in &self.expression_sets {
            let mut conjunction = domain.full_set();
            for expr in expressions {
                match expr.evaluate(domain) {
                    Some(set) => conjunction &= &set,
                    None => debug!(expression = %expr, "dropping unparsable version expression"),
                }
            }
            admitted |= &conjunction;
        }
        admitted
    }
}

/// Own compatible set of one file: the AND of all its pragmas.
pub fn compatible_set<'a>(
    domain: &VersionDomain,
    pragmas: impl IntoIterator<Item = &'a VersionPragma>,
) -> VersionSet {
    let mut set = domain.full_set();
    for pragma in pragmas {
        set &= &pragma.evaluate(domain);
    }
    set
}
