use loxide as lox;

use lox::scanner::Scanner;
use lox::token::TokenType;

fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
    let scanner = Scanner::new(source);
    let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

    assert_eq!(tokens.len(), expected.len());

    for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
        assert_eq!(actual.token_type, *expected_type);
        assert_eq!(actual.lexeme, *expected_lexeme);
    }
}

#[test]
fn symbols() {
    assert_token_sequence(
        "({*.,+*})",
        &[
            (TokenType::LEFT_PAREN, "("),
            (TokenType::LEFT_BRACE, "{"),
            (TokenType::STAR, "*"),
            (TokenType::DOT, "."),
            (TokenType::COMMA, ","),
            (TokenType::PLUS, "+"),
            (TokenType::STAR, "*"),
            (TokenType::RIGHT_BRACE, "}"),
            (TokenType::RIGHT_PAREN, ")"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn one_and_two_character_operators() {
    assert_token_sequence(
        "! != = == < <= > >= / -",
        &[
            (TokenType::BANG, "!"),
            (TokenType::BANG_EQUAL, "!="),
            (TokenType::EQUAL, "="),
            (TokenType::EQUAL_EQUAL, "=="),
            (TokenType::LESS, "<"),
            (TokenType::LESS_EQUAL, "<="),
            (TokenType::GREATER, ">"),
            (TokenType::GREATER_EQUAL, ">="),
            (TokenType::SLASH, "/"),
            (TokenType::MINUS, "-"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn keywords_and_identifiers_use_maximal_munch() {
    assert_token_sequence(
        "orchid or _private class classy",
        &[
            (TokenType::IDENTIFIER, "orchid"),
            (TokenType::OR, "or"),
            (TokenType::IDENTIFIER, "_private"),
            (TokenType::CLASS, "class"),
            (TokenType::IDENTIFIER, "classy"),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn comments_are_skipped_and_lines_counted() {
    let tokens: Vec<_> = Scanner::new("// a comment\n+")
        .filter_map(Result::ok)
        .collect();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].token_type, TokenType::PLUS);
    assert_eq!(tokens[0].line, 2);
    assert_eq!(tokens[1].token_type, TokenType::EOF);
}

#[test]
fn number_literals_carry_their_value() {
    let tokens: Vec<_> = Scanner::new("12 12.5").filter_map(Result::ok).collect();

    match &tokens[0].token_type {
        TokenType::NUMBER(n) => assert_eq!(*n, 12.0),
        other => panic!("expected NUMBER, got {:?}", other),
    }

    match &tokens[1].token_type {
        TokenType::NUMBER(n) => assert_eq!(*n, 12.5),
        other => panic!("expected NUMBER, got {:?}", other),
    }

    assert_eq!(tokens[0].lexeme, "12");
    assert_eq!(tokens[1].lexeme, "12.5");
}

#[test]
fn trailing_dot_is_not_part_of_a_number() {
    assert_token_sequence(
        "12.",
        &[
            (TokenType::NUMBER(0.0), "12"),
            (TokenType::DOT, "."),
            (TokenType::EOF, ""),
        ],
    );
}

#[test]
fn string_literals_drop_the_quotes() {
    let tokens: Vec<_> = Scanner::new("\"hello\"").filter_map(Result::ok).collect();

    match &tokens[0].token_type {
        TokenType::STRING(s) => assert_eq!(s, "hello"),
        other => panic!("expected STRING, got {:?}", other),
    }

    assert_eq!(tokens[0].lexeme, "\"hello\"");
}

#[test]
fn strings_may_span_lines() {
    let tokens: Vec<_> = Scanner::new("\"a\nb\" +").filter_map(Result::ok).collect();

    match &tokens[0].token_type {
        TokenType::STRING(s) => assert_eq!(s, "a\nb"),
        other => panic!("expected STRING, got {:?}", other),
    }

    // The newline inside the literal counts toward the line number.
    assert_eq!(tokens[1].token_type, TokenType::PLUS);
    assert_eq!(tokens[1].line, 2);
}

#[test]
fn unterminated_string_is_an_error() {
    let results: Vec<_> = Scanner::new("\"abc").collect();

    let errors: Vec<_> = results.iter().filter_map(|r| r.as_ref().err()).collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "[line 1] Error: Unterminated string.");
}

#[test]
fn unexpected_characters_are_reported_and_scanning_continues() {
    let results: Vec<_> = Scanner::new(",$.").collect();

    // COMMA, error for '$', DOT, EOF.
    assert_eq!(results.len(), 4);

    assert_eq!(results[0].as_ref().unwrap().token_type, TokenType::COMMA);

    let error = results[1].as_ref().unwrap_err();
    assert_eq!(error.to_string(), "[line 1] Error: Unexpected character: $");

    assert_eq!(results[2].as_ref().unwrap().token_type, TokenType::DOT);
    assert_eq!(results[3].as_ref().unwrap().token_type, TokenType::EOF);
}
