use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use ebnf::{CharSource, Reader, Scanner, StreamSource, WriteReporter};

mod logging;

const STDIN_IDENT: &str = "<stdin>";

/// Check EBNF grammar files for syntax errors.
///
/// Every problem is printed as `source(line, col): message`. No output means
/// every file is valid.
#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
struct Args {
    /// Grammar files to check, `-` reads standard input
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Exit with status 1 if any diagnostic was reported
    #[arg(long)]
    strict: bool,

    /// Print the token stream instead of checking
    #[arg(long)]
    tokens: bool,

    /// Log verbosity (-v=info, -vv=debug, -vvv=trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(&args) {
        Ok(diagnostics) => {
            info!(target: "ebnf_check", files = args.files.len(), diagnostics, "done");
            if args.strict && diagnostics > 0 {
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            process::exit(2);
        }
    }
}

/// Check (or dump) every file in turn, returning the total diagnostic count.
fn run(args: &Args) -> Result<usize> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut total = 0;
    for path in &args.files {
        let (ident, source) = open(path)?;
        if args.tokens {
            dump_tokens(source, &ident, &mut out)?;
        } else {
            total += ebnf::check(source, &ident, WriteReporter::new(&mut out))
                .with_context(|| format!("failed to check {}", ident))?;
        }
    }
    out.flush()?;
    Ok(total)
}

fn open(path: &Path) -> Result<(String, StreamSource<Box<dyn BufRead>>)> {
    if path == Path::new("-") {
        let reader: Box<dyn BufRead> = Box::new(BufReader::new(io::stdin()));
        return Ok((STDIN_IDENT.to_owned(), StreamSource::new(reader)));
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader: Box<dyn BufRead> = Box::new(BufReader::new(file));
    Ok((path.display().to_string(), StreamSource::new(reader)))
}

fn dump_tokens<S, W>(source: S, ident: &str, out: &mut W) -> Result<()>
where
    S: CharSource,
    W: Write,
{
    let scanner = Scanner::new(Reader::new(source, ident));
    for token in scanner {
        let token = token.with_context(|| format!("failed to read {}", ident))?;
        writeln!(out, "{}: {:?} {:?}", token.position, token.kind, token.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use ebnf::StrSource;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parse_flags() {
        let args = Args::try_parse_from(["ebnf-check", "--strict", "-vv", "a.ebnf", "-"]).unwrap();
        assert!(args.strict);
        assert!(!args.tokens);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.files, vec![PathBuf::from("a.ebnf"), PathBuf::from("-")]);
    }

    #[test]
    fn file_required() {
        assert!(Args::try_parse_from(["ebnf-check"]).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        match open(Path::new("/definitely/not/here.ebnf")) {
            Ok(_) => panic!("opened a missing file"),
            Err(e) => assert!(e.to_string().contains("failed to open")),
        }
    }

    #[test]
    fn byte_order_mark_file_checks_clean() {
        let path = std::env::temp_dir().join(format!("ebnf-check-bom-{}.ebnf", process::id()));
        std::fs::write(&path, "\u{FEFF}S = x .\n").unwrap();

        let (ident, source) = open(&path).unwrap();
        let mut diagnostics: Vec<ebnf::Diagnostic> = Vec::new();
        let n = ebnf::check(source, &ident, &mut diagnostics).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(n, 0, "{:?}", diagnostics);
    }

    #[test]
    fn dump_token_lines() {
        let mut out = Vec::new();
        dump_tokens(StrSource::new("S = x ."), "g", &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "g(1, 1): Identifier \"S\"");
        assert_eq!(lines[4], "g(1, 8): EndOfInput \"\"");
    }
}
