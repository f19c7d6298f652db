use aplite::{error::ErrorKind, interpreter::session::Session};

/// Evaluates `line` in a fresh session and renders its last value.
fn shown(line: &str) -> String {
    let mut session = Session::new();
    let outcome = session.evaluate(line).unwrap_or_else(|e| panic!("{line:?} failed: {e}"));
    session.display(&outcome)
           .unwrap_or_else(|| panic!("{line:?} displayed nothing"))
}

fn check(cases: &[(&str, &str)]) {
    for (line, expected) in cases {
        assert_eq!(shown(line), *expected, "evaluating {line:?}");
    }
}

fn error_kind(line: &str) -> ErrorKind {
    Session::new().evaluate(line)
                  .map_or_else(|e| e.kind, |outcome| panic!("{line:?} succeeded with {outcome:?}"))
}

#[test]
fn monadic_scalar_functions() {
    check(&[("-3", "¯3"),
            ("¯3", "¯3"),
            ("×¯2 0 5", "¯1 0 1"),
            ("÷4", "0.25"),
            ("÷3", "0.3333333333"),
            ("⌊2.7", "2"),
            ("⌈¯2.3", "¯2"),
            ("|¯4", "4"),
            ("!5", "120"),
            ("○1", "3.141592654"),
            ("~1 0", "0 1"),
            ("+1J2", "1J¯2")]);
}

#[test]
fn dyadic_scalar_functions() {
    check(&[("0.1+0.2", "0.3"),
            ("7-10", "¯3"),
            ("2*10", "1024"),
            ("10⍟100", "2"),
            ("3|7", "1"),
            ("2!5", "10"),
            ("2 3 4⌈3", "3 3 4"),
            ("2 3 4⌊3", "2 3 3"),
            ("1 1 0 0∧1 0 1 0", "1 0 0 0"),
            ("1 1 0 0∨1 0 1 0", "1 1 1 0"),
            ("3=3 4", "1 0"),
            ("3≠3 4", "0 1"),
            ("1 2 3<2", "1 0 0"),
            ("1J2+1", "2J2"),
            ("'A'='ABA'", "1 0 1")]);
}

#[test]
fn tolerant_comparison() {
    check(&[("1=1+1E¯15", "1"), ("⌊0.99999999999999", "1")]);
}

#[test]
fn scalar_domain_errors() {
    assert_eq!(error_kind("1÷0"), ErrorKind::Domain);
    assert_eq!(error_kind("⍟0"), ErrorKind::Domain);
    assert_eq!(error_kind("1+'A'"), ErrorKind::Domain);
    assert_eq!(error_kind("~2"), ErrorKind::Domain);
}

#[test]
fn literals_must_be_finite() {
    assert_eq!(error_kind("1E400"), ErrorKind::Domain);
    assert_eq!(error_kind("¯1E400"), ErrorKind::Domain);
    assert_eq!(error_kind("1 2J1E400"), ErrorKind::Domain);
    check(&[("1E308", "1E308")]);
}

#[test]
fn shape_and_reshape() {
    check(&[("⍴2 3⍴⍳6", "2 3"),
            ("2 3⍴⍳6", "1 2 3\n4 5 6"),
            ("2 2⍴'ABCD'", "AB\nCD"),
            ("5⍴1 2", "1 2 1 2 1"),
            ("⍴⍴5", "0"),
            (",2 2⍴⍳4", "1 2 3 4"),
            ("⍴⍪1 2 3", "3 1")]);
}

#[test]
fn index_generator_and_index_of() {
    check(&[("⍳5", "1 2 3 4 5"), ("'ABC'⍳'C'", "3"), ("1 2 3⍳4 2", "4 2")]);
    assert_eq!(error_kind("⍳¯1"), ErrorKind::Domain);
}

#[test]
fn catenation() {
    check(&[("1 2,3 4", "1 2 3 4"),
            ("'AB','C'", "ABC"),
            ("(2 2⍴⍳4),9", "1 2 9\n3 4 9"),
            ("(2 2⍴⍳4)⍪9", "1 2\n3 4\n9 9")]);
}

#[test]
fn reversal_rotation_and_transposition() {
    check(&[("⌽⍳4", "4 3 2 1"),
            ("2⌽⍳5", "3 4 5 1 2"),
            ("¯1⌽⍳5", "5 1 2 3 4"),
            ("⊖2 2⍴⍳4", "3 4\n1 2"),
            ("⍉2 3⍴⍳6", "1 4\n2 5\n3 6")]);
}

#[test]
fn take_and_drop() {
    check(&[("3↑⍳5", "1 2 3"),
            ("¯2↑⍳5", "4 5"),
            ("5↑1 2", "1 2 0 0 0"),
            ("2↓⍳5", "3 4 5"),
            ("¯2↓⍳5", "1 2 3"),
            ("↑3 4 5", "3")]);
}

#[test]
fn membership_and_without() {
    check(&[("2∊1 2 3", "1"), ("1 5∊1 2 3", "1 0"), ("1 2 3~2", "1 3"), ("∊2 2⍴⍳4", "1 2 3 4")]);
}

#[test]
fn depth_match_and_enclose() {
    check(&[("≡5", "0"), ("≡1 2", "1"), ("≡⊂1 2", "2"), ("1 2≡1 2", "1"), ("1 2≡1 3", "0")]);
}

#[test]
fn grading_and_replication() {
    check(&[("⍋3 1 2", "2 3 1"),
            ("⍒3 1 2", "1 3 2"),
            ("1 0 1/⍳3", "1 3"),
            ("1 2 0/'ABC'", "ABB"),
            ("1 0⌿2 2⍴⍳4", "1 2")]);
    assert_eq!(error_kind("1 0/⍳3"), ErrorKind::Length);
}

#[test]
fn roll_and_deal_respect_bounds() {
    let mut session = Session::new();
    let outcome = session.evaluate("3?10").unwrap();
    let numbers = outcome.value().unwrap().to_integers().unwrap();
    assert_eq!(numbers.len(), 3);
    assert!(numbers.iter().all(|n| (1..=10).contains(n)));
    assert!(numbers[0] != numbers[1] && numbers[1] != numbers[2] && numbers[0] != numbers[2]);

    let outcome = session.evaluate("?6 6 6").unwrap();
    let numbers = outcome.value().unwrap().to_integers().unwrap();
    assert!(numbers.iter().all(|n| (1..=6).contains(n)));

    assert_eq!(error_kind("4?3"), ErrorKind::Domain);
}

#[test]
fn each_applies_per_item() {
    check(&[("-¨1 2", "¯1 ¯2"), ("1 2+¨3 4", "4 6")]);
}

#[test]
fn print_precision_controls_display() {
    let mut session = Session::new();
    session.execute("⎕PP←3").unwrap();
    let outcome = session.evaluate("÷3").unwrap();
    assert_eq!(session.display(&outcome).as_deref(), Some("0.333"));
    let outcome = session.evaluate("123456.7").unwrap();
    assert_eq!(session.display(&outcome).as_deref(), Some("1.23E5"));
    let outcome = session.evaluate("¯12.5").unwrap();
    assert_eq!(session.display(&outcome).as_deref(), Some("¯12.5"));
}

#[test]
fn columns_are_right_aligned() {
    check(&[("2 2⍴1 20 300 4", "  1 20\n300  4"), ("2 2⍴¯1 2 3 ¯4", "¯1  2\n 3 ¯4")]);
}
