use cladecut::parser::byte_parser::ConsumeMode::{Exclusive, Inclusive};
use cladecut::parser::byte_parser::ByteParser;
use std::io::Cursor;

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_whitespace_at_eof() {
    let mut parser = ByteParser::for_str("Huia \n\t");
    parser.set_position(4);
    parser.skip_whitespace();
    assert!(parser.is_eof());
    assert_eq!(parser.peek(), None);
}

#[test]
fn test_consume_until_any_inclusive() {
    let mut parser = ByteParser::for_str("Moa_ott1:0.5,Huia_ott2)");
    let found = parser.consume_until_any(b"(),;", Inclusive);
    assert_eq!(found, Some(b','));
    assert_eq!(parser.position(), 13);
    let found = parser.consume_until_any(b"(),;", Inclusive);
    assert_eq!(found, Some(b')'));
    assert!(parser.is_eof());

    let mut parser = ByteParser::for_str("no delimiter at all");
    assert!(parser.consume_until_any(b"(),;", Inclusive).is_none());
    assert!(parser.is_eof());
}

#[test]
fn test_consume_until_any_exclusive() {
    let mut parser = ByteParser::for_str("Laughing_Owl_ott9;");
    let found = parser.consume_until_any(b"(),;", Exclusive);
    assert_eq!(found, Some(b';'));
    assert_eq!(parser.peek(), found);
    assert_eq!(parser.position(), 17);
}

#[test]
fn test_slice_back_into_buffer() {
    let mut parser = ByteParser::for_str("(Piopio_ott7,Huia_ott2);");
    parser.consume_until_any(b",", Exclusive);
    assert_eq!(parser.slice(1, parser.position()), b"Piopio_ott7");
    assert_eq!(parser.slice_as_str(13, 100), "Huia_ott2);");
}

#[test]
fn test_context() {
    let mut parser = ByteParser::for_str("(Kea,Kaka);");
    parser.set_position(5);
    assert_eq!(parser.lookahead(4), "Kaka");
    assert_eq!(parser.lookahead(100), "Kaka);");
}

#[test]
fn test_from_reader() {
    let parser = ByteParser::from_reader(Cursor::new(b"(Kea,Kaka);".to_vec())).unwrap();
    assert_eq!(parser.len(), 11);
    assert!(!parser.is_empty());
    assert_eq!(parser.peek(), Some(b'('));
}
