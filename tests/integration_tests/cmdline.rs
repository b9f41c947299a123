use assert_cmd::Command;
use assertables::assert_contains;
use std::fs;
use std::io::Write;
use tempfile::NamedTempFile;

fn splinekit() -> Command {
    Command::cargo_bin("splinekit").expect("binary should be built")
}

#[test]
fn test_cmdline_help() {
    let output = splinekit().arg("-h").assert().success().get_output().stdout.clone();
    let output = String::from_utf8(output).expect("non-UTF8");
    assert_contains!(output, "Usage");
    assert_contains!(output, "--max-objects");
}

#[test]
fn test_cmdline_bad_args() {
    splinekit().args(["--format", "png"]).assert().failure().code(2);
}

#[test]
fn test_cmdline_stdin_to_stdout() {
    let output = splinekit()
        .args(["--format", "path"])
        .write_stdin("M 0 0 L 30 0")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert_eq!(
        String::from_utf8(output).expect("non-UTF8"),
        "M 0 0 C 10 0 20 0 30 0\n"
    );
}

#[test]
fn test_cmdline_unrecognized_input() {
    let stderr = splinekit()
        .write_stdin("no shapes here")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&stderr).to_string();
    assert_contains!(stderr, "expected a JSON object list or SVG content");
}

#[test]
fn test_cmdline_file_to_file() {
    let mut input = NamedTempFile::new().expect("could not create tmpfile");
    write!(
        input,
        r#"<svg><path id="one" d="M 0 0 L 10 0"/><path id="two" d="M 0 5 L 10 5"/></svg>"#
    )
    .expect("tmpfile write failed");
    let output = NamedTempFile::new().expect("could not create outfile");

    splinekit()
        .arg(input.path())
        .arg("-o")
        .arg(output.path())
        .args(["--format", "svg", "--max-objects", "1"])
        .assert()
        .success();

    let svg = fs::read_to_string(output.path()).expect("output readable");
    assert_contains!(svg, "<g id=\"one\">");
    assert!(!svg.contains("two"));
}
