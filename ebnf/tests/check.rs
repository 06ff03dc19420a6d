//! End to end checks of whole grammar texts.

use std::io::Cursor;

use ebnf::{check, check_str, Reader, Scanner, StrSource, StreamSource, TokenKind};

const EBNF_OF_EBNF: &str = r#"# The grammar this checker implements, written in itself.
Syntax     = { Production } .
Production = Identifier "=" Expression "." .
Expression = Term { "|" Term } .
Term       = Factor { Factor } .
Factor     = Identifier
           | Literal
           | "(" Expression ")"
           | "[" Expression "]"
           | "{" Expression "}" .
Identifier = letter { letter | digit } .
Literal    = "'" character { character } "'"
           | '"' character { character } '"' .
"#;

#[test]
fn self_description_is_valid() {
    let diagnostics = check_str(EBNF_OF_EBNF, "ebnf.ebnf").unwrap();
    assert!(diagnostics.is_empty(), "{:?}", diagnostics);
}

#[test]
fn line_endings_do_not_matter() {
    for newline in &["\n", "\r", "\r\n", "\u{2028}", "\u{85}"] {
        let text = EBNF_OF_EBNF.replace('\n', newline);
        let diagnostics = check_str(&text, "ebnf.ebnf").unwrap();
        assert!(diagnostics.is_empty(), "newline {:?}: {:?}", newline, diagnostics);
    }
}

#[test]
fn crlf_counts_one_line() {
    let text = "A = a .\r\nB = b .\r\nC = .\r\n";
    let diagnostics = check_str(text, "g").unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].position().line, 3);
    assert_eq!(diagnostics[0].position().column, 5);
}

#[test]
fn comment_is_trivia() {
    let with_comment = check_str("S # comment\n = \"x\" .", "g").unwrap();
    let without_comment = check_str("S\n = \"x\" .", "g").unwrap();
    assert!(with_comment.is_empty());
    assert!(without_comment.is_empty());
}

#[test]
fn missing_expression() {
    let diagnostics = check_str("S = .", "g").unwrap();
    assert_eq!(diagnostics.len(), 1);
    let d = &diagnostics[0];
    assert_eq!((d.position().line, d.position().column), (1, 5));
    assert_eq!(
        d.expected,
        vec![
            TokenKind::Identifier,
            TokenKind::Literal,
            TokenKind::OpenParen,
            TokenKind::OpenBracket,
            TokenKind::OpenCurly,
        ]
    );
    assert_eq!(d.found.kind, TokenKind::Period);
}

#[test]
fn unterminated_literal_carries_its_text() {
    let diagnostics = check_str("S = \"abc", "g").unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].found.kind, TokenKind::UnterminatedLiteral);
    assert_eq!(diagnostics[0].found.text, "\"abc");
}

#[test]
fn mismatched_brackets_rejected() {
    for text in &["S = ( \"x\" ] .", "S = [ x ) .", "S = { x ] .", "S = ( x } ."] {
        let diagnostics = check_str(text, "g").unwrap();
        assert_eq!(diagnostics.len(), 1, "input: {}", text);
    }
    for text in &["S = ( \"x\" ) .", "S = [ x ] .", "S = { x } ."] {
        assert!(check_str(text, "g").unwrap().is_empty(), "input: {}", text);
    }
}

#[test]
fn no_duplicate_lines() {
    let inputs = ["S = \"abc", "S = ( x ] .", "S 'x'", "= = =", "S = x ; T = y ."];
    for input in inputs.iter() {
        let lines: Vec<String> = check_str(input, "g")
            .unwrap()
            .iter()
            .map(|d| d.to_string())
            .collect();
        let mut deduped = lines.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(lines.len(), deduped.len(), "input: {:?}, lines: {:?}", input, lines);
    }
}

#[test]
fn byte_order_mark_is_skipped_in_streams() {
    let mut diagnostics: Vec<ebnf::Diagnostic> = Vec::new();
    let n = check(
        StreamSource::new(Cursor::new("\u{FEFF}S = x .\n")),
        "bom.ebnf",
        &mut diagnostics,
    )
    .unwrap();
    assert_eq!(n, 0, "{:?}", diagnostics);
}

#[test]
fn stream_and_str_agree() {
    let text = "A = a .\nB = ( b .\nC = c ; .\n";
    let from_str: Vec<String> = check_str(text, "g")
        .unwrap()
        .iter()
        .map(|d| d.to_string())
        .collect();

    let mut from_stream: Vec<ebnf::Diagnostic> = Vec::new();
    let n = check(StreamSource::new(Cursor::new(text)), "g", &mut from_stream).unwrap();
    let from_stream: Vec<String> = from_stream.iter().map(|d| d.to_string()).collect();

    assert_eq!(n, from_str.len());
    assert_eq!(from_str, from_stream);
}

#[test]
fn token_stream_positions() {
    let text = "Rule = 'x'\n  | other .";
    let tokens: Vec<(TokenKind, u32, u32)> = Scanner::new(Reader::new(StrSource::new(text), "g"))
        .map(|tok| {
            let tok = tok.unwrap();
            (tok.kind, tok.position.line, tok.position.column)
        })
        .collect();
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Identifier, 1, 1),
            (TokenKind::Assign, 1, 6),
            (TokenKind::Literal, 1, 8),
            (TokenKind::Bar, 2, 3),
            (TokenKind::Identifier, 2, 5),
            (TokenKind::Period, 2, 11),
            (TokenKind::EndOfInput, 2, 12),
        ]
    );
}
