use cladecut::newick::{Lexeme, Scanner};
use cladecut::parser::{ByteParser, ParsingErrorType};

/// Texts of all tokens of a tree, reading labels after `)` the way the
/// extractor does.
fn tokens(input: &str) -> Vec<String> {
    let mut scanner = Scanner::new(ByteParser::for_str(input));
    let mut tokens = Vec::new();
    loop {
        let token = match scanner.next_lexeme().unwrap() {
            Lexeme::Token(token) => token,
            Lexeme::Close(_) => scanner.read_token().unwrap(),
            Lexeme::Terminator => return tokens,
            Lexeme::Open(_) | Lexeme::Separator => continue,
        };
        tokens.push(String::from_utf8_lossy(token.text(scanner.parser())).into_owned());
    }
}

#[test]
fn test_tokens_in_source_order() {
    assert_eq!(
        tokens("((Kea_ott1:1,Kaka_ott2:1)Nestor_ott3:2,Kakapo_ott4:3)Strigopoidea_ott5;"),
        vec![
            "Kea_ott1:1",
            "Kaka_ott2:1",
            "Nestor_ott3:2",
            "Kakapo_ott4:3",
            "Strigopoidea_ott5",
        ]
    );
}

#[test]
fn test_anonymous_internal_vertices() {
    assert_eq!(tokens("((A,B),(C,D));"), vec!["A", "B", "", "C", "D", "", ""]);
}

#[test]
fn test_pretty_printed_tree() {
    let input = "(\n\t(Kea_ott1 : 1 ,\r\n\t Kaka_ott2)\n  Nestor_ott3 ,\n Kakapo_ott4\n) ;\n";
    assert_eq!(
        tokens(input),
        vec!["Kea_ott1 : 1", "Kaka_ott2", "Nestor_ott3", "Kakapo_ott4", ""]
    );
}

#[test]
fn test_scan_stops_at_terminator() {
    let mut scanner = Scanner::new(ByteParser::for_str("(A,B); trailing (garbage"));
    while scanner.next_lexeme().unwrap() != Lexeme::Terminator {}
    assert_eq!(scanner.position(), 6);
}

#[test]
fn test_group_offsets() {
    let mut scanner = Scanner::new(ByteParser::for_str("  ( (x) );"));
    assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Open(2));
    assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Open(4));
    assert!(matches!(scanner.next_lexeme().unwrap(), Lexeme::Token(_)));
    assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Close(6));
    assert!(scanner.read_token().unwrap().is_empty());
    assert_eq!(scanner.next_lexeme().unwrap(), Lexeme::Close(8));
}

#[test]
fn test_missing_terminator() {
    let mut scanner = Scanner::new(ByteParser::for_str("(A,B)"));
    let err = loop {
        match scanner.next_lexeme() {
            Ok(Lexeme::Close(_)) => {
                if let Err(err) = scanner.read_token() {
                    break err;
                }
            }
            Ok(_) => {}
            Err(err) => break err,
        }
    };
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
    assert!(err.to_string().contains("should terminate with ';'"));
}
