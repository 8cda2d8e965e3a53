// CLI tests: exit status, diagnostics and the verbose toggles
// Requires: assert_cmd, predicates crates in [dev-dependencies]

use assert_cmd::Command;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn cminus() -> Command {
    let mut cmd = Command::cargo_bin("cminus").unwrap();
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    cmd
}

#[test]
fn cli_accepts_valid_program() {
    cminus()
        .arg("tests/fixtures/gcd.c")
        .assert()
        .success()
        .stdout(contains("2 declaration(s)"))
        .stderr(predicates::str::is_empty());
}

#[test]
fn cli_parser_only_prints_nothing() {
    cminus()
        .args(["--parser-only", "tests/fixtures/sort.c"])
        .assert()
        .success()
        .stdout(predicates::str::is_empty());
}

#[test]
fn cli_verbose_lexer_echoes_tokens() {
    cminus()
        .args(["-l", "--lexer-only", "tests/fixtures/gcd.c"])
        .assert()
        .success()
        .stdout(
            contains("INT \"int\" [line: 2]")
                .and(contains("IDENTIFIER \"gcd\" [line: 2]"))
                .and(contains("EQUAL \"==\" [line: 4]")),
        );
}

#[test]
fn cli_upper_case_aliases() {
    cminus()
        .args(["-L", "-P", "tests/fixtures/gcd.c"])
        .assert()
        .success()
        .stdout(contains("VOID \"void\"").and(contains("----FunDeclaration: void main")));
}

#[test]
fn cli_verbose_parser_dumps_tree() {
    cminus()
        .args(["--parser", "tests/fixtures/gcd.c"])
        .assert()
        .success()
        .stdout(
            contains("Program\n")
                .and(contains("----FunDeclaration: int gcd"))
                .and(contains("--------Param: int u"))
                .and(contains("Call: output")),
        );
}

#[test]
fn cli_parser_only_wins_over_lexer_only() {
    // The syntax error is only found if the parser runs
    cminus()
        .args(["--lexer-only", "--parser-only", "tests/fixtures/missing_semicolon.c"])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("syntax error at line 5, column 4"));
}

#[test]
fn cli_lexer_only_ignores_syntax_errors() {
    cminus()
        .args(["--lexer-only", "tests/fixtures/missing_semicolon.c"])
        .assert()
        .success();
}

#[test]
fn cli_reports_syntax_error() {
    cminus()
        .arg("tests/fixtures/missing_semicolon.c")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("expected ';', found 'return'"));
}

#[test]
fn cli_reports_lexical_error() {
    cminus()
        .arg("tests/fixtures/lexical_error.c")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("lexical error at line 3, column 13"));
}

#[test]
fn cli_reports_premature_end_of_input() {
    cminus()
        .arg("tests/fixtures/unterminated.c")
        .assert()
        .failure()
        .stderr(contains("unexpected end of input"));
}

#[test]
fn cli_rejects_non_c_file() {
    cminus()
        .arg("tests/fixtures/not_c_source.txt")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("expected a .c extension"));
}

#[test]
fn cli_reports_missing_file() {
    cminus()
        .arg("tests/fixtures/does_not_exist.c")
        .assert()
        .failure()
        .code(1)
        .stderr(contains("cannot read").or(contains("No such file")));
}

#[test]
fn cli_requires_file_argument() {
    cminus().assert().failure().stderr(contains("Usage"));
}
