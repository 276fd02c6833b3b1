use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn rlox() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rlox"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write `source` to a scratch file unique to the calling test.
fn script(name: &str, source: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rlox-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("Failed to create scratch dir");
    let path = dir.join(format!("{}.lox", name));
    fs::write(&path, source).expect("Failed to write script");
    path
}

fn run_script(name: &str, source: &str) -> Output {
    rlox()
        .arg("--color")
        .arg("never")
        .arg(script(name, source))
        .output()
        .expect("Failed to execute rlox")
}

fn run_prompt(input: &str) -> Output {
    let mut child = rlox()
        .arg("--color")
        .arg("never")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn rlox");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write to stdin");
    child.wait_with_output().expect("Failed to wait for rlox")
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn test_version_flag() {
    let output = rlox().arg("--version").output().expect("Failed to execute rlox");
    assert!(output.status.success(), "Version flag should succeed");
    let stdout = text(&output.stdout);
    assert!(stdout.contains("rlox"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_flag() {
    let output = rlox().arg("--help").output().expect("Failed to execute rlox");
    assert!(output.status.success());
    assert!(text(&output.stdout).contains("SCRIPT"));
}

#[test]
fn test_too_many_scripts_is_usage_error() {
    let output = rlox().arg("a.lox").arg("b.lox").output().expect("Failed to execute rlox");
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let output = rlox().arg("--no-such-flag").output().expect("Failed to execute rlox");
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn test_completions() {
    let output = rlox().arg("complete").arg("bash").output().expect("Failed to execute rlox");
    assert!(output.status.success());
    assert!(text(&output.stdout).contains("rlox"));
}

// ============================================================================
// File mode
// ============================================================================

#[test]
fn test_successful_script_exits_zero() {
    let output = run_script("success", "var greeting = \"hello\";\nprint(greeting + \" world\");\n");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "hello world");
    assert_eq!(text(&output.stderr), "");
}

#[test]
fn test_syntax_error_exits_65() {
    let output = run_script("syntax", "print(\"unreached\");\nvar = 1;\n");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(text(&output.stdout), "");
    assert_eq!(text(&output.stderr), "[line 2] Error at '=': Expect variable name.\n");
}

#[test]
fn test_lexical_error_exits_65() {
    let output = run_script("lexical", "var a = 1; $");
    assert_eq!(output.status.code(), Some(65));
    assert_eq!(text(&output.stderr), "[line 1] Error : Unexpected character: $\n");
}

#[test]
fn test_runtime_error_exits_70() {
    let output = run_script("runtime", "print(1);\nprint(-\"x\");\nprint(2);\n");
    assert_eq!(output.status.code(), Some(70));
    assert_eq!(text(&output.stdout), "1");
    assert_eq!(text(&output.stderr), "Operand must be a number.\n[line 2]\n");
}

#[test]
fn test_deep_recursion_runs_in_binary() {
    let output = run_script(
        "deep",
        "fun depth(n) { if (n == 0) return 0; return 1 + depth(n - 1); }\nprint(depth(4000));\n",
    );
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "4000");
}

#[test]
fn test_stack_overflow_exits_70() {
    let output = run_script("overflow", "fun forever() {\n  return forever();\n}\nforever();\n");
    assert_eq!(output.status.code(), Some(70));
    assert_eq!(text(&output.stderr), "Stack overflow.\n[line 2]\n");
}

#[test]
fn test_missing_script_exits_66() {
    let output = rlox()
        .arg("--color")
        .arg("never")
        .arg("definitely/not/here.lox")
        .output()
        .expect("Failed to execute rlox");
    assert_eq!(output.status.code(), Some(66));
    assert!(text(&output.stderr).contains("definitely/not/here.lox"));
}

#[test]
fn test_dump_tokens() {
    let output = rlox()
        .arg("--dump-tokens")
        .arg(script("tokens", "var x = 1;"))
        .output()
        .expect("Failed to execute rlox");
    assert!(output.status.success());
    let kinds: Vec<String> = text(&output.stdout)
        .lines()
        .map(|line| line.split(' ').next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(kinds, vec!["VAR", "IDENTIFIER", "EQUAL", "NUMBER", "SEMICOLON", "EOF"]);
}

#[test]
fn test_dump_ast() {
    let output = rlox()
        .arg("--dump-ast")
        .arg(script("ast", "-123 * (45.67);"))
        .output()
        .expect("Failed to execute rlox");
    assert!(output.status.success());
    assert_eq!(text(&output.stdout), "(; (* (- 123) (group 45.67)))\n");
}

#[test]
fn test_forced_color_styles_errors() {
    let output = rlox()
        .arg("--color")
        .arg("always")
        .arg(script("colored", "nil();"))
        .output()
        .expect("Failed to execute rlox");
    assert_eq!(output.status.code(), Some(70));
    let stderr = text(&output.stderr);
    assert!(stderr.contains("\u{1b}["), "expected ANSI escapes in {:?}", stderr);
    assert!(stderr.contains("Can only call functions and classes."));
}

// ============================================================================
// Prompt mode
// ============================================================================

#[test]
fn test_prompt_keeps_state_between_lines() {
    let output = run_prompt("var a = 20;\nvar b = a + 22;\nprint(b);\n");
    assert!(output.status.success());
    let stdout = text(&output.stdout);
    assert!(stdout.starts_with("> "));
    assert!(stdout.contains("42"));
}

#[test]
fn test_prompt_continues_after_errors() {
    let output = run_prompt("print(;\nprint(nope);\nprint(\"still here\");\n");
    assert!(output.status.success());
    assert!(text(&output.stdout).contains("still here"));

    let stderr = text(&output.stderr);
    assert!(stderr.contains("[line 1] Error at ';': Expect expression."));
    assert!(stderr.contains("Undefined variable 'nope'.\n[line 1]"));
}

#[test]
fn test_prompt_exits_cleanly_on_eof() {
    let output = run_prompt("");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(text(&output.stdout), "> ");
}
