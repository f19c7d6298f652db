use aplite::{
    error::ErrorKind,
    get_result,
    interpreter::{
        evaluator::core::Outcome,
        session::{Session, SessionConfig},
        value::array::Array,
    },
};

fn value(source: &str) -> Array {
    get_result(source).unwrap_or_else(|e| panic!("{source:?} failed: {e}"))
                      .unwrap_or_else(|| panic!("{source:?} produced no value"))
}

fn error_kind(source: &str) -> ErrorKind {
    match get_result(source) {
        Ok(result) => panic!("{source:?} succeeded with {result:?}"),
        Err(e) => e.kind,
    }
}

#[test]
fn evaluates_right_to_left() {
    assert_eq!(value("2×3+4"), Array::number(14.0));
    assert_eq!(value("(2×3)+4"), Array::number(10.0));
    assert_eq!(value("(1+2)×3"), Array::number(9.0));
}

#[test]
fn scalar_functions_pervade() {
    assert_eq!(value("1 2 3+4 5 6"), Array::numbers([5.0, 7.0, 9.0]));
    assert_eq!(value("10×1 2 3"), Array::numbers([10.0, 20.0, 30.0]));
    assert_eq!(value("-1 2"), Array::numbers([-1.0, -2.0]));
    assert_eq!(error_kind("1 2+3 4 5"), ErrorKind::Length);
}

#[test]
fn character_literal_is_a_vector() {
    let array = value("'AB'");
    assert_eq!(array.shape(), &[2]);
    assert_eq!(array, Array::chars("AB"));
}

#[test]
fn division_by_zero_is_a_domain_error() {
    let error = get_result("1÷0").unwrap_err();
    assert_eq!(error.kind, ErrorKind::Domain);
    assert_eq!(error.message, "Dividing by 0.");
    assert_eq!(error.line.as_deref(), Some("1÷0"));
}

#[test]
fn undefined_name_is_a_value_error() {
    assert_eq!(error_kind("Y+1"), ErrorKind::Value);
}

#[test]
fn assignment_is_committed_not_displayed() {
    let mut session = Session::new();
    let outcome = session.evaluate("X←5").unwrap();
    assert_eq!(outcome, Outcome::Committed(Array::number(5.0)));
    assert_eq!(session.display(&outcome), None);

    let outcome = session.evaluate("X").unwrap();
    assert_eq!(session.display(&outcome).as_deref(), Some("5"));
}

#[test]
fn statements_run_left_to_right() {
    assert_eq!(value("A←2 ⋄ B←A+1 ⋄ A×B"), Array::number(6.0));
    assert_eq!(value("A←2\nA*3"), Array::number(8.0));
}

#[test]
fn index_origin_is_validated_and_observed() {
    assert_eq!(value("⎕IO←0 ⋄ ⍳3"), Array::numbers([0.0, 1.0, 2.0]));
    assert_eq!(value("⎕IO←0 ⋄ ⎕IO"), Array::number(0.0));
    assert_eq!(error_kind("⎕IO←2"), ErrorKind::Limit);
    assert_eq!(error_kind("⎕IO←5"), ErrorKind::Limit);
    assert_eq!(error_kind("⎕IO←'A'"), ErrorKind::Domain);
}

#[test]
fn other_system_parameters_are_bounded() {
    assert_eq!(error_kind("⎕PP←0"), ErrorKind::Limit);
    assert_eq!(error_kind("⎕PP←18"), ErrorKind::Limit);
    assert_eq!(error_kind("⎕CT←1"), ErrorKind::Limit);
    assert_eq!(error_kind("⎕RL←0"), ErrorKind::Limit);
    assert_eq!(value("⎕PP←5 ⋄ ⎕PP"), Array::number(5.0));
}

#[test]
fn session_config_seeds_parameters() {
    let config = SessionConfig { index_origin: Some(0.0),
                                 ..SessionConfig::default() };
    let mut session = Session::with_config(&config).unwrap();
    assert_eq!(session.evaluate("⍳2").unwrap(), Outcome::Value(Array::numbers([0.0, 1.0])));

    let config = SessionConfig { print_precision: Some(40.0),
                                 ..SessionConfig::default() };
    assert_eq!(Session::with_config(&config).unwrap_err().kind, ErrorKind::Limit);
}

#[test]
fn system_commands_are_rejected() {
    let mut session = Session::new();
    let error = session.execute(")CLEAR").unwrap_err();
    assert_eq!(error.kind, ErrorKind::Internal);
}

#[test]
fn oversized_arrays_are_limit_errors() {
    assert_eq!(error_kind("1 1E10⍴0"), ErrorKind::Limit);
    assert_eq!(error_kind("1E10 1E10⍴5"), ErrorKind::Limit);
    assert_eq!(error_kind("⍳1E10"), ErrorKind::Limit);
    assert_eq!(error_kind("1E10↑1"), ErrorKind::Limit);
    assert_eq!(error_kind("1E10/1"), ErrorKind::Limit);
    assert_eq!(error_kind("(⍳5000)∘.+⍳5000"), ErrorKind::Limit);
    assert_eq!(value("⍴1E10 1E10 0⍴5"), Array::numbers([1e10, 1e10, 0.0]));

    let mut session = Session::new();
    assert_eq!(session.execute("1 1E10⍴0").unwrap_err().kind, ErrorKind::Limit);
    assert_eq!(session.evaluate("1+1").unwrap().value(), Some(&Array::number(2.0)));
}

#[test]
fn indexing_reads_with_origin() {
    assert_eq!(value("X←10×⍳5 ⋄ X[2 4]"), Array::numbers([20.0, 40.0]));
    assert_eq!(value("X←10×⍳5 ⋄ X[3]"), Array::number(30.0));
    assert_eq!(value("⎕IO←0 ⋄ X←10×⍳5 ⋄ X[0]"), Array::number(10.0));
    assert_eq!(value("M←2 3⍴⍳6 ⋄ M[2;3]"), Array::number(6.0));
    assert_eq!(value("M←2 3⍴⍳6 ⋄ M[;1]"), Array::numbers([1.0, 4.0]));
    assert_eq!(error_kind("X←⍳5 ⋄ X[9]"), ErrorKind::Index);
    assert_eq!(error_kind("X←⍳5 ⋄ X[1;1]"), ErrorKind::Rank);
}

#[test]
fn indexed_assignment_rebinds_a_copy() {
    assert_eq!(value("X←⍳5 ⋄ X[2]←10 ⋄ X"), Array::numbers([1.0, 10.0, 3.0, 4.0, 5.0]));
    assert_eq!(value("X←⍳5 ⋄ Y←X ⋄ X[1 2]←0 ⋄ Y"), Array::numbers([1.0, 2.0, 3.0, 4.0, 5.0]));
    assert_eq!(value("X←⍳4 ⋄ X[1 2]←0 ⋄ X"), Array::numbers([0.0, 0.0, 3.0, 4.0]));
}

#[test]
fn operators_derive_functions() {
    assert_eq!(value("+/⍳4"), Array::number(10.0));
    assert_eq!(value("+\\1 2 3"), Array::numbers([1.0, 3.0, 6.0]));
    assert_eq!(value("+/2 3⍴⍳6"), Array::numbers([6.0, 15.0]));
    assert_eq!(value("+⌿2 3⍴⍳6"), Array::numbers([5.0, 7.0, 9.0]));
    assert_eq!(value("2-⍨5"), Array::number(3.0));
    assert_eq!(value("1 2 3+.×4 5 6"), Array::number(32.0));
    assert_eq!(value("-∘|¯3"), Array::number(-3.0));
    assert_eq!(value("1 2∘.×1 2 3"), Array::new(vec![2, 3], Array::numbers([1.0, 2.0, 3.0, 2.0, 4.0, 6.0]).into_ravel()).unwrap());
}

#[test]
fn reduction_of_empty_uses_identity() {
    assert_eq!(value("+/⍳0"), Array::number(0.0));
    assert_eq!(value("×/⍳0"), Array::number(1.0));
    assert_eq!(error_kind("⍴/⍳0"), ErrorKind::Domain);
}

#[test]
fn axis_selects_the_dimension() {
    assert_eq!(value("+/[1]2 3⍴⍳6"), Array::numbers([5.0, 7.0, 9.0]));
    assert_eq!(value("⌽[1]2 2⍴⍳4"), Array::new(vec![2, 2], Array::numbers([3.0, 4.0, 1.0, 2.0]).into_ravel()).unwrap());
    assert_eq!(error_kind("⌽[3]2 2⍴⍳4"), ErrorKind::Index);
    assert_eq!(error_kind("⌽[1.5]2 2⍴⍳4"), ErrorKind::Domain);
}

#[test]
fn defined_function_with_branches() {
    let mut session = Session::new();
    session.define(&["R←FACT N", "R←1", "LOOP:→(N≤1)/0", "R←R×N", "N←N-1", "→LOOP"])
           .unwrap();
    let outcome = session.evaluate("FACT 5").unwrap();
    assert_eq!(outcome.value(), Some(&Array::number(120.0)));
    let outcome = session.evaluate("FACT 1").unwrap();
    assert_eq!(outcome.value(), Some(&Array::number(1.0)));
}

#[test]
fn defined_function_valence_is_checked() {
    let mut session = Session::new();
    session.define(&["R←DOUBLE X", "R←X+X"]).unwrap();
    assert_eq!(session.evaluate("DOUBLE 2 3").unwrap().value(), Some(&Array::numbers([4.0, 6.0])));
    let error = session.evaluate("1 DOUBLE 2").unwrap_err();
    assert_eq!(error.kind, ErrorKind::Syntax);
}

#[test]
fn locals_and_assignments_stay_in_the_frame() {
    let mut session = Session::new();
    session.execute("G←1").unwrap();
    session.define(&["R←F X;T", "T←X×2", "G←T", "R←T+1"]).unwrap();
    assert_eq!(session.evaluate("F 3").unwrap().value(), Some(&Array::number(7.0)));
    assert_eq!(session.evaluate("G").unwrap().value(), Some(&Array::number(1.0)));
    assert_eq!(session.evaluate("T").unwrap_err().kind, ErrorKind::Value);
}

#[test]
fn defined_operators_take_function_operands() {
    let mut session = Session::new();
    session.define(&["R←(F SELF) B", "R←B F B"]).unwrap();
    session.define(&["R←(F THEN G) B", "R←G F B"]).unwrap();
    assert_eq!(session.evaluate("+SELF 4").unwrap().value(), Some(&Array::number(8.0)));
    assert_eq!(session.evaluate("-THEN| 5").unwrap().value(), Some(&Array::number(5.0)));
}

#[test]
fn niladic_function_without_result() {
    let mut session = Session::new();
    session.define(&["NOTHING", "X←1"]).unwrap();
    assert_eq!(session.evaluate("NOTHING").unwrap(), Outcome::Empty);
    assert_eq!(session.evaluate("1+NOTHING").unwrap_err().kind, ErrorKind::Value);
}

#[test]
fn runaway_recursion_hits_the_call_limit() {
    let handle = std::thread::Builder::new().stack_size(256 * 1024 * 1024)
                                            .spawn(|| {
                                                let mut session = Session::new();
                                                session.define(&["R←LOOP X", "R←LOOP X"]).unwrap();
                                                session.evaluate("LOOP 1").unwrap_err().kind
                                            })
                                            .unwrap();
    assert_eq!(handle.join().unwrap(), ErrorKind::Limit);
}

#[test]
fn branch_at_top_level_stops_the_line() {
    let mut session = Session::new();
    let outcomes = session.execute("1 ⋄ →2 ⋄ 3").unwrap();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[1], Outcome::Branch(vec![2.0.into()]));
    assert_eq!(session.evaluate("→").unwrap(), Outcome::Escape);
}

#[test]
fn system_functions() {
    let mut session = Session::new();
    session.execute("X←1").unwrap();
    session.define(&["R←SQ X", "R←X×X"]).unwrap();
    assert_eq!(session.evaluate("⎕NC 'X'").unwrap().value(), Some(&Array::number(2.0)));
    assert_eq!(session.evaluate("⎕NC 'SQ'").unwrap().value(), Some(&Array::number(3.0)));
    assert_eq!(session.evaluate("⎕NC 'NONE'").unwrap().value(), Some(&Array::number(0.0)));
    assert_eq!(session.evaluate("⎕EX 'NONE'").unwrap().value(), Some(&Array::number(0.0)));
    assert_eq!(session.evaluate("⎕EX 'SQ'").unwrap().value(), Some(&Array::number(1.0)));
    assert_eq!(session.evaluate("⎕NC 'SQ'").unwrap().value(), Some(&Array::number(0.0)));
    assert_eq!(session.evaluate("⍴⎕TS").unwrap().value(), Some(&Array::numbers([7.0])));
}

#[test]
fn fix_rejects_names_in_use_and_bad_headers() {
    let mut session = Session::new();
    session.execute("V←1").unwrap();
    assert_eq!(session.define(&["R←V X", "R←X"]).unwrap_err().kind, ErrorKind::Definition);
    assert_eq!(session.define(&["R←1BAD X"]).unwrap_err().kind, ErrorKind::Definition);
    assert_eq!(session.define(&[]).unwrap_err().kind, ErrorKind::Definition);
}
