use aplite::{
    error::ErrorKind,
    interpreter::{
        evaluator::form_table::FormTable,
        lexer::tokenize,
        parser::{
            convert::convert_tokens,
            core::{Recognizer, parse},
        },
        session::Session,
        symbol::table::SymbolTable,
        token::{Token, TokenClass as T},
        value::array::{Array, Element},
    },
};

fn converted(line: &str, symbols: &SymbolTable<'_>) -> Vec<Token> {
    convert_tokens(tokenize(line).unwrap(), symbols, FormTable::standard()).unwrap()
}

fn recognized(line: &str) -> Vec<T> {
    let symbols = SymbolTable::workspace();
    let mut tokens = converted(line, &symbols);
    parse(&mut tokens).unwrap();
    tokens.iter().map(|t| t.class).collect()
}

#[test]
fn axis_and_index_brackets_are_told_apart() {
    assert_eq!(recognized("⌽[1]M"),
               vec![T::PrimitiveFunction, T::LeftAxisBracket, T::Constant, T::RightAxisBracket, T::VariableName]);
    assert_eq!(recognized("M[1;]"),
               vec![T::VariableName, T::LeftIndexBracket, T::Constant, T::IndexSeparator, T::RightIndexBracket]);
}

#[test]
fn operators_are_tagged_by_position() {
    assert_eq!(recognized("A∘.×B"),
               vec![T::VariableName, T::SmallCircle, T::DyadicOperator, T::PrimitiveFunction, T::VariableName]);
    assert_eq!(recognized("A+.×B"),
               vec![T::VariableName,
                    T::PrimitiveFunction,
                    T::DyadicOperator,
                    T::PrimitiveFunction,
                    T::VariableName]);
    assert_eq!(recognized("1 2/3 4"),
               vec![T::Constant, T::PrimitiveFunction, T::Constant]);
}

#[test]
fn assignment_and_branch() {
    assert_eq!(recognized("X←(1+2)"),
               vec![T::VariableName,
                    T::AssignmentArrow,
                    T::LeftParenthesis,
                    T::Constant,
                    T::PrimitiveFunction,
                    T::Constant,
                    T::RightParenthesis]);
    assert_eq!(recognized("→"), vec![T::BranchArrow]);
    assert_eq!(recognized("→X"), vec![T::BranchArrow, T::VariableName]);
    assert_eq!(recognized("⎕IO←0"), vec![T::SystemVariableName, T::AssignmentArrow, T::Constant]);
}

#[test]
fn empty_statement_is_valid() {
    assert!(recognized("").is_empty());
}

#[test]
fn failed_attempt_restores_every_retagged_token() {
    let symbols = SymbolTable::workspace();
    let mut tokens = converted("+.", &symbols);
    let before: Vec<T> = tokens.iter().map(|t| t.class).collect();

    let mut recognizer = Recognizer::new(&mut tokens);
    let matched = recognizer.attempt(|r| r.function() && r.dyadic_operator() && r.function());
    assert!(!matched);
    assert_eq!(recognizer.head(), 0);
    assert_eq!(recognizer.undo_len(), 0);
    let after: Vec<T> = recognizer.tokens().iter().map(|t| t.class).collect();
    assert_eq!(after, before);
}

#[test]
fn successful_rule_keeps_its_retags_in_the_undo_log() {
    let symbols = SymbolTable::workspace();
    let mut tokens = converted("+/", &symbols);
    let mut recognizer = Recognizer::new(&mut tokens);
    assert!(recognizer.operation());
    assert!(recognizer.at_end());
    assert_eq!(recognizer.undo_len(), 2);
}

#[test]
fn invalid_statement_reports_furthest_offset() {
    let symbols = SymbolTable::workspace();
    let mut tokens = converted("1 2+)", &symbols);
    let error = parse(&mut tokens).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.offset, Some(4));
}

#[test]
fn unsupported_glyph_fails_recognition() {
    let symbols = SymbolTable::workspace();
    let mut tokens = converted("⊃1 2", &symbols);
    assert_eq!(parse(&mut tokens).unwrap_err().kind, ErrorKind::Syntax);
}

#[test]
fn converter_materializes_literals() {
    let symbols = SymbolTable::workspace();
    let tokens = converted("'' 'A' 'ABC' 5 1 2 ⍬", &symbols);
    assert_eq!(tokens[0].array(), Some(&Array::vector(Vec::new())));
    assert_eq!(tokens[1].array(), Some(&Array::scalar(Element::Char('A'))));
    assert_eq!(tokens[2].array(), Some(&Array::chars("ABC")));
    assert_eq!(tokens[3].array(), Some(&Array::numbers([5.0, 1.0, 2.0])));
    assert_eq!(tokens[4].array(), Some(&Array::zilde()));
    assert!(tokens.iter().all(|t| t.class == T::Constant));
}

#[test]
fn converter_undoubles_quotes() {
    let symbols = SymbolTable::workspace();
    let tokens = converted("'it''s'", &symbols);
    assert_eq!(tokens[0].array(), Some(&Array::chars("it's")));
}

#[test]
fn converter_classifies_names_by_binding() {
    let mut session = Session::new();
    session.define(&["R←A PLUS B", "R←A+B"]).unwrap();
    session.define(&["R←NOW", "R←1"]).unwrap();
    session.define(&["R←(F TWICE) B", "R←F F B"]).unwrap();
    session.define(&["R←(F WITH G) B", "R←F G B"]).unwrap();
    session.execute("V←1").unwrap();

    let tokens = converted("V PLUS NOW TWICE WITH U", session.symbols());
    let classes: Vec<T> = tokens.iter().map(|t| t.class).collect();
    assert_eq!(classes,
               vec![T::VariableName,
                    T::DefinedFunctionName,
                    T::NiladicDefinedFunctionName,
                    T::DefinedMonadicOperatorName,
                    T::DefinedDyadicOperatorName,
                    T::VariableName]);
}

#[test]
fn converter_classifies_system_names_by_their_forms() {
    let symbols = SymbolTable::workspace();
    let tokens = converted("⎕PP ⎕TS ⎕NC", &symbols);
    let classes: Vec<T> = tokens.iter().map(|t| t.class).collect();
    assert_eq!(classes, vec![T::SystemVariableName, T::NiladicSystemFunctionName, T::SystemFunctionName]);
}

#[test]
fn unknown_system_name_is_a_syntax_error() {
    let symbols = SymbolTable::workspace();
    let error = convert_tokens(tokenize("1+⎕NOPE").unwrap(), &symbols, FormTable::standard()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::Syntax);
    assert_eq!(error.message, "Unknown system name '⎕NOPE'.");
    assert_eq!(error.offset, Some(2));
}
