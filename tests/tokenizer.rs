use aplite::{
    error::ErrorKind,
    interpreter::{
        lexer::{Lexer, tokenize},
        token::TokenClass,
    },
};

fn classes(line: &str) -> Vec<TokenClass> {
    tokenize(line).unwrap().iter().map(|t| t.class).collect()
}

fn texts(line: &str) -> Vec<String> {
    tokenize(line).unwrap().iter().map(|t| t.text().unwrap()).collect()
}

#[test]
fn names_literals_and_glyphs() {
    assert_eq!(classes("A←⎕IO+'it''s'"),
               vec![TokenClass::SimpleIdentifier,
                    TokenClass::Primitive,
                    TokenClass::DistinguishedIdentifier,
                    TokenClass::Primitive,
                    TokenClass::CharacterLiteral]);
    assert_eq!(texts("A←⎕IO+'it''s'"), vec!["A", "←", "⎕IO", "+", "'it''s'"]);
}

#[test]
fn numeric_literal_spans_blank_separated_numbers() {
    assert_eq!(texts("1 ¯2.5 3E2 1J¯1"), vec!["1 ¯2.5 3E2 1J¯1"]);
    assert_eq!(texts("1 2 +3"), vec!["1 2", "+", "3"]);
    assert_eq!(texts("X 1 2"), vec!["X", "1 2"]);
}

#[test]
fn blanks_and_comments_produce_nothing() {
    assert_eq!(texts("  1   ⍝ a comment"), vec!["1"]);
    assert!(tokenize("⍝ only a comment").unwrap().is_empty());
    assert!(tokenize("   ").unwrap().is_empty());
}

#[test]
fn statement_separators() {
    assert_eq!(classes("1⋄2\n3"),
               vec![TokenClass::NumericLiteral,
                    TokenClass::StatementSeparator,
                    TokenClass::NumericLiteral,
                    TokenClass::StatementSeparator,
                    TokenClass::NumericLiteral]);
}

#[test]
fn names_may_contain_digits_and_underscores() {
    assert_eq!(texts("ab_1 ∆x ⍺⍵"), vec!["ab_1", "∆x", "⍺", "⍵"]);
}

#[test]
fn token_text_matches_source_at_its_offset() {
    for line in ["X←1 2 3+⍳4", "'ab''c' ,⌽ 2J1 ⍝ tail", "⎕FX 'R←F' ⋄ →0", "(+/V)÷⍴V"] {
        let source: Vec<char> = line.chars().collect();
        for token in tokenize(line).unwrap() {
            let text: Vec<char> = token.text().unwrap().chars().collect();
            assert_eq!(&source[token.offset..token.offset + text.len()],
                       text.as_slice(),
                       "token at {} in {line:?}",
                       token.offset);
        }
    }
}

#[test]
fn failed_real_scalar_leaves_lexer_untouched() {
    let input: Vec<char> = "¯x".chars().collect();
    let mut lexer = Lexer::new(&input);
    assert!(!lexer.real_scalar().unwrap());
    assert_eq!(lexer.head(), 0);
    assert!(lexer.content().is_empty());
}

#[test]
fn trailing_blanks_of_numeric_literal_are_handed_back() {
    let input: Vec<char> = "1 2  +".chars().collect();
    let mut lexer = Lexer::new(&input);
    assert!(lexer.numeric_literal().unwrap());
    assert_eq!(lexer.head(), 3);
    assert_eq!(lexer.content(), &['1', ' ', '2']);
}

#[test]
fn backtrack_rewinds_cursor_and_content() {
    let input: Vec<char> = "ABC".chars().collect();
    let mut lexer = Lexer::new(&input);
    assert_eq!(lexer.identifier(), Some(TokenClass::SimpleIdentifier));
    assert_eq!(lexer.head(), 3);
    lexer.backtrack(2);
    assert_eq!(lexer.head(), 1);
    assert_eq!(lexer.content(), &['A']);
}

#[test]
fn unrecognised_character_is_a_syntax_error_at_its_offset() {
    let error = tokenize("1+$").unwrap_err();
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.offset, Some(2));
}

#[test]
fn malformed_literals_are_syntax_errors() {
    let unterminated = tokenize("X←'abc").unwrap_err();
    assert_eq!(unterminated.kind, ErrorKind::Syntax);
    assert_eq!(unterminated.offset, Some(2));

    assert_eq!(tokenize("1E").unwrap_err().kind, ErrorKind::Syntax);
    assert_eq!(tokenize("2J").unwrap_err().kind, ErrorKind::Syntax);
}
