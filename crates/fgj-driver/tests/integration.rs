//! Integration tests for the `fgj` binary.
//!
//! Each test writes a program to a temp directory, runs the binary on it and
//! checks stdout, stderr and the exit status.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn fgj_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_fgj"))
}

/// Write `source` to a fresh file and run `fgj` on it with `args`
fn run_fgj(source: &str, args: &[&str]) -> Output {
    use std::sync::atomic::{AtomicUsize, Ordering};
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let temp_dir = std::env::temp_dir().join(format!("fgj_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&temp_dir).expect("Failed to create temp dir");

    let input_path = temp_dir.join("program.fgj");
    fs::write(&input_path, source).expect("Failed to write test input");

    let output = Command::new(fgj_binary())
        .args(args)
        .arg(&input_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run fgj");

    let _ = fs::remove_dir_all(&temp_dir);
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

const PAIR: &str = r#"
class A extends Object { A() { super(); } }
class B extends Object { B() { super(); } }
class Pair<X extends Object, Y extends Object> extends Object {
    X fst;
    Y snd;
    Pair(X fst, Y snd) { super(); this.fst = fst; this.snd = snd; }
    <Z extends Object> Pair<Z, Y> setfst(Z newfst) {
        return new Pair<Z, Y>(newfst, this.snd);
    }
}
"#;

#[test]
fn test_prints_value() {
    let output = run_fgj(
        &format!("{}new Pair<A, B>(new A(), new B()).setfst<B>(new B())", PAIR),
        &[],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "new Pair<B,B>(new B(), new B())\n");
    assert!(stderr(&output).is_empty());
}

#[test]
fn test_check_prints_type() {
    let output = run_fgj(
        &format!("{}new Pair<A, B>(new A(), new B()).fst", PAIR),
        &["--check"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "A\n");
}

#[test]
fn test_bad_cast_fails() {
    let source = r#"
class A extends Object { A() { super(); } }
class B extends A { B() { super(); } }
(B) new A()
"#;
    let output = run_fgj(source, &[]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert_eq!(
        stderr(&output),
        "evaluation error: invalid cast of new A() to B\n"
    );
}

#[test]
fn test_parse_error_line() {
    let output = run_fgj("class A extends Object {\n  A() { super() }\n}\nnew A()", &[]);
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
    assert_eq!(
        stderr(&output),
        "parse error on line 2: expected ';' after \"super\" invocation\n"
    );
}

#[test]
fn test_type_error() {
    let output = run_fgj(&format!("{}new Pair<A, B>(new B(), new B())", PAIR), &[]);
    assert!(!output.status.success());
    assert_eq!(
        stderr(&output),
        "type check error: B is not a subtype of A\n"
    );
}

#[test]
fn test_class_table_error() {
    let source = r#"
class A extends Object { A() { super(); } }
class A extends Object { A() { super(); } }
new A()
"#;
    let output = run_fgj(source, &[]);
    assert!(!output.status.success());
    assert_eq!(stderr(&output), "class table: duplicate class name \"A\"\n");
}

#[test]
fn test_stupid_cast_warning() {
    let source = r#"
class A extends Object { A() { super(); } }
class C extends Object { C() { super(); } }
class Box extends Object { Object o; Box(Object o) { super(); this.o = o; } }
new Box((C) new A()).o
"#;
    let output = run_fgj(source, &["--check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Object\n");
    assert_eq!(stderr(&output), "warning: stupid cast from A to C\n");
}

#[test]
fn test_missing_file() {
    let output = Command::new(fgj_binary())
        .arg("no/such/program.fgj")
        .output()
        .expect("Failed to run fgj");
    assert!(!output.status.success());
    assert_eq!(stderr(&output), "can't find file \"no/such/program.fgj\"\n");
}

#[test]
fn test_report_mode_points_at_source() {
    let output = run_fgj("new A(\n", &["--report"]);
    assert!(!output.status.success());
    let err = stderr(&output);
    assert!(err.contains("E0002"), "stderr: {}", err);
    assert!(err.contains("expected a term"), "stderr: {}", err);
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let source = r#"
class A extends Object { A() { super(); } }
new A()
"#;
    let output = run_fgj(source, &["--verbose"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "new A()\n");
    assert!(stderr(&output).contains("class table built"));
}
