use std::{fs, path::Path};

use aplite::{error::ErrorKind, get_result, interpreter::session::Session, load_source};
use walkdir::WalkDir;

/// Lines of a transcript that are typed at the prompt start with six blanks.
const PROMPT: &str = "      ";

/// One prompt line of a transcript and the lines it should print.
struct Exchange {
    input:    String,
    expected: Vec<String>,
    line:     usize,
}

#[test]
fn transcripts_reproduce() {
    let mut count = 0;

    for entry in WalkDir::new("tests/scripts").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "apl"))
    {
        let path = entry.path();
        let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        let mut session = Session::new();
        for exchange in extract_exchanges(&content) {
            count += 1;
            let printed = run(&mut session, &exchange.input);
            assert_eq!(printed,
                       exchange.expected,
                       "{:?} line {}: {}",
                       path,
                       exchange.line,
                       exchange.input);
        }
    }

    assert!(count > 0, "No transcripts found in tests/scripts");
}

/// Evaluates a line the way the interactive session does and returns what
/// it prints.
fn run(session: &mut Session, input: &str) -> Vec<String> {
    match session.execute(input) {
        Ok(outcomes) => outcomes.iter()
                                .filter_map(|outcome| session.display(outcome))
                                .flat_map(|text| text.lines().map(str::to_string).collect::<Vec<_>>())
                                .collect(),
        Err(e) => vec![e.to_string()],
    }
}

fn extract_exchanges(content: &str) -> Vec<Exchange> {
    let mut exchanges: Vec<Exchange> = Vec::new();

    for (number, line) in content.lines().enumerate() {
        if line.starts_with('⍝') {
            continue;
        }
        if let Some(input) = line.strip_prefix(PROMPT) {
            exchanges.push(Exchange { input:    input.to_string(),
                                      expected: Vec::new(),
                                      line:     number + 1, });
        } else if let Some(exchange) = exchanges.last_mut() {
            exchange.expected.push(line.to_string());
        }
    }

    exchanges
}

fn assert_success(src: &str) {
    if let Err(e) = get_result(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match get_result(src) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.kind, kind, "{src}: {e}"),
    }
}

#[test]
fn statements_separated_by_newlines_share_names() {
    assert_success("A←1\nB←A+1\nC←A,B");
    assert_failure("A←1\nB+A", ErrorKind::Value);
}

#[test]
fn malformed_lines_are_syntax_errors() {
    assert_failure("1+", ErrorKind::Syntax);
    assert_failure("(1+2", ErrorKind::Syntax);
    assert_failure("1 2 3)", ErrorKind::Syntax);
    assert_failure("X←", ErrorKind::Syntax);
    assert_failure("'open", ErrorKind::Syntax);
    assert_failure("⎕XYZ", ErrorKind::Syntax);
}

#[test]
fn error_caret_points_at_the_failure() {
    let error = get_result("1+$").unwrap_err();
    assert_eq!(error.caret().as_deref(), Some("1+$\n  ^"));
}

#[test]
fn source_files_load_without_blank_lines() {
    let dir = std::env::temp_dir().join(format!("aplite-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let script = dir.join("sum.apl");
    fs::write(&script, "V←⍳4\n\n+/V\n").unwrap();
    assert_eq!(load_source(&script).unwrap(), "V←⍳4\n+/V");

    let other = dir.join("sum.txt");
    fs::write(&other, "1").unwrap();
    assert_eq!(load_source(&other).unwrap_err().kind, ErrorKind::Domain);

    assert_eq!(load_source(Path::new("tests/scripts/missing.apl")).unwrap_err().kind,
               ErrorKind::Domain);

    fs::remove_dir_all(&dir).unwrap();
}
