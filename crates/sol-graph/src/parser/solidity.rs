//! Directive-level Solidity parser.
//!
//! Only import and pragma directives matter for version resolution, so this
//! parser scans the file for them while skipping comments and string
//! literals everywhere else. It does not validate the rest of the grammar.

use winnow::{
    Parser, Result as WResult,
    ascii::multispace0,
    combinator::{alt, preceded, repeat},
    error::ContextError,
    token::{any, none_of, one_of, take_till, take_until, take_while},
};

use super::{
    ImportMatch, ParseError, PragmaMatch, SourceParser, SourceSpan, SyntaxQuery,
    parse_version_constraint,
};
use crate::source_id::SourceId;

/// Built-in [`SourceParser`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidityParser;

impl SolidityParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse text into a [`SolidityTree`] without going through the trait
    /// object.
    pub fn parse_tree(&self, text: &str) -> Result<SolidityTree, ParseError> {
        Scanner::new(text).run()
    }
}

impl SourceParser for SolidityParser {
    fn parse(&self, id: &SourceId, text: &str) -> Result<Box<dyn SyntaxQuery>, ParseError> {
        let tree = self.parse_tree(text)?;
        tracing::trace!(
            source = %id,
            imports = tree.imports.len(),
            pragmas = tree.pragmas.len(),
            "parsed source directives"
        );
        Ok(Box::new(tree))
    }
}

/// Directives found in one file, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolidityTree {
    pub imports: Vec<ImportMatch>,
    pub pragmas: Vec<PragmaMatch>,
}

impl SyntaxQuery for SolidityTree {
    fn import_matches(&self) -> Vec<ImportMatch> {
        self.imports.clone()
    }

    fn pragma_matches(&self) -> Vec<PragmaMatch> {
        self.pragmas.clone()
    }
}

struct Scanner<'a> {
    source: &'a str,
    rest: &'a str,
    tree: SolidityTree,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            tree: SolidityTree::default(),
        }
    }

    fn offset(&self) -> usize {
        self.source.len() - self.rest.len()
    }

    fn run(mut self) -> Result<SolidityTree, ParseError> {
        loop {
            self.skip_trivia()?;
            if self.rest.is_empty() {
                return Ok(self.tree);
            }

            let start = self.offset();
            if self.rest.starts_with(['"', '\'']) {
                self.string()?;
            } else if let Ok(word) = identifier.parse_next(&mut self.rest) {
                match word {
                    "import" => self.import_directive(start)?,
                    "pragma" => self.pragma_directive(start)?,
                    _ => {}
                }
            } else {
                let _ = any::<_, ContextError>.parse_next(&mut self.rest);
            }
        }
    }

    /// Whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            let _ = multispace0::<_, ContextError>.parse_next(&mut self.rest);
            let start = self.offset();
            if self.rest.starts_with("//") {
                let _ = line_comment.parse_next(&mut self.rest);
            } else if self.rest.starts_with("/*") {
                block_comment
                    .parse_next(&mut self.rest)
                    .map_err(|_| ParseError::new("unterminated block comment", start))?;
            } else {
                return Ok(());
            }
        }
    }

    fn string(&mut self) -> Result<&'a str, ParseError> {
        let start = self.offset();
        string_literal
            .parse_next(&mut self.rest)
            .map_err(|_| ParseError::new("unterminated string literal", start))
    }

    // import "p"; import "p" as X; import * as X from "p"; import {A, B as C} from "p";
    fn import_directive(&mut self, start: usize) -> Result<(), ParseError> {
        let mut path = None;
        loop {
            self.skip_trivia()?;
            if self.rest.is_empty() {
                return Err(ParseError::new("unterminated import directive", start));
            }
            if let Some(after) = self.rest.strip_prefix(';') {
                self.rest = after;
                break;
            }
            if self.rest.starts_with(['"', '\'']) {
                let literal = self.string()?;
                path.get_or_insert(literal);
            } else if identifier.parse_next(&mut self.rest).is_err() {
                let _ = any::<_, ContextError>.parse_next(&mut self.rest);
            }
        }

        let path = path.ok_or_else(|| ParseError::new("import directive without a path", start))?;
        self.tree.imports.push(ImportMatch {
            path: path.to_string(),
            span: SourceSpan::new(start, self.offset()),
        });
        Ok(())
    }

    // pragma <name> <value>;
    fn pragma_directive(&mut self, start: usize) -> Result<(), ParseError> {
        let body = pragma_body
            .parse_next(&mut self.rest)
            .map_err(|_| ParseError::new("unterminated pragma directive", start))?;

        let mut value = body.trim_start();
        let name = identifier.parse_next(&mut value).unwrap_or_default();
        if name == "solidity" {
            self.tree.pragmas.push(PragmaMatch {
                expression_sets: parse_version_constraint(value.trim()),
                span: SourceSpan::new(start, self.offset()),
            });
        }
        Ok(())
    }
}

fn identifier<'a>(input: &mut &'a str) -> WResult<&'a str> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_' || c == '$').parse_next(input)
}

fn line_comment(input: &mut &str) -> WResult<()> {
    ("//", take_till(0.., '\n')).void().parse_next(input)
}

fn block_comment(input: &mut &str) -> WResult<()> {
    ("/*", take_until(0.., "*/"), "*/").void().parse_next(input)
}

// Quoted literal with backslash escapes; returns the raw body.
fn string_literal<'a>(input: &mut &'a str) -> WResult<&'a str> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let body = repeat::<_, _, (), _, _>(
        0..,
        alt((preceded('\\', any).void(), none_of([quote, '\\', '\n']).void())),
    )
    .take()
    .parse_next(input)?;
    one_of(quote).parse_next(input)?;
    Ok(body)
}

fn pragma_body<'a>(input: &mut &'a str) -> WResult<&'a str> {
    (take_till(0.., ';'), ';')
        .map(|(body, _)| body)
        .parse_next(input)
}
