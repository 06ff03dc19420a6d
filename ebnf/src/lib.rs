//! Syntax checking for EBNF grammar definitions.
//!
//! A `Reader` turns a `CharSource` into logical characters with line and
//! column, a `Scanner` turns those into tokens, and a `Parser` walks the
//! tokens against the grammar of grammars, reporting every token that doesn't
//! fit as a `Diagnostic`. No syntax tree is built.
//!
//! ```
//! let diagnostics = ebnf::check_str("S = ( \"x\" ] .", "inline").unwrap();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(
//!     diagnostics[0].to_string(),
//!     "inline(1, 11): expected ')', found ']'"
//! );
//! ```

use tracing::debug;

mod diagnostic;
mod error;
mod parser;
mod position;
mod reader;
mod scanner;
mod source;
mod token;

pub use diagnostic::{Diagnostic, Reporter, WriteReporter};
pub use error::{Error, Result};
pub use parser::{Parser, MAX_NESTING};
pub use position::SourcePosition;
pub use reader::Reader;
pub use scanner::Scanner;
pub use source::{CharSource, StrSource, StreamSource};
pub use token::{Token, TokenKind};

/// Check `source` against the grammar of grammars, handing diagnostics to
/// `reporter` as they are found. Returns how many were reported; zero means
/// the text is syntactically valid.
///
/// Groups nested deeper than `MAX_NESTING` stop the check with
/// `Error::NestingTooDeep`. The source is released before returning, also on
/// failure. Pass `&mut source` to keep it open.
pub fn check<S, R>(source: S, ident: &str, reporter: R) -> Result<usize>
where
    S: CharSource,
    R: Reporter,
{
    debug!(target: "ebnf::parser", source = ident, "checking");
    let scanner = Scanner::new(Reader::new(source, ident));
    let mut parser = Parser::new(scanner, reporter);
    parser.syntax()?;
    parser.close();

    let count = parser.diagnostic_count();
    debug!(target: "ebnf::parser", source = ident, diagnostics = count, "checked");
    Ok(count)
}

/// Check an in-memory grammar, collecting its diagnostics.
pub fn check_str(text: &str, ident: &str) -> Result<Vec<Diagnostic>> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    check(StrSource::new(text), ident, &mut diagnostics)?;
    Ok(diagnostics)
}
