use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_matdoc")))
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const FOO: &str = "\
function y = foo(x)
% foo
%   Doubles the input.
%
% Example:
%   XXXXy = foo(2);
%
% See Also:
% bar
% process
% Gen.Generate
% nothere
y = 2*x;
";

const ABSTRACT_STIM: &str = "\
classdef AbstractStim
methods
function out = alpha(self)
% alpha
% Alpha stage.
%
% See Also:
% beta
end
function out = beta(self)
% beta
% Beta stage.
end
end
end
";

/// A small project: two folders, one class, one multi-function file.
fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    write(root, "code/utils/foo.m", FOO);
    write(root, "code/utils/bar.m", "% bar\n% Bar helper.\nfunction bar()\nend\n");
    write(
        root,
        "code/analysis/process.m",
        "function process()\n% process\n% Processes.\nend\n",
    );
    write(root, "code/stim/AbstractStim.m", ABSTRACT_STIM);
    write(root, "code/stim/helper.m", "% helper\n% Helps.\nx = 1;\n");
    write(
        root,
        "code/stim/@Gen/Gen.m",
        "classdef Gen\n% Gen\n% A generator.\n% See Also:\n% helper\nproperties\nend\nend\n",
    );

    write(root, "docs/utils-head.md", "# Utils\n");
    write(root, "docs/analysis-head.md", "# Analysis\n");
    write(root, "docs/stim-head.md", "# Stimuli\n");
    write(root, "docs/classes/Gen-head.md", "# Gen\n");
    dir
}

fn build(root: &Path) -> assert_cmd::assert::Assert {
    cmd().args(["--root", root.to_str().unwrap()]).assert()
}

fn page(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join("docs").join(rel)).unwrap()
}

// -- build mode --

#[test]
fn build_writes_header_then_blocks() {
    let dir = project();
    build(dir.path()).success();

    let utils = page(dir.path(), "utils.md");
    assert!(utils.starts_with("# Utils\n\n\nbar\nBar helper.\n\n\n"), "got: {utils:?}");
    assert!(utils.contains(concat!(
        "\n\n-------\n\n",
        "foo\n",
        "Doubles the input.\n",
        "\n",
        "Example:\n",
        "    y = foo(2);\n",
        "\n",
        "\n\n!!! info \"See Also\"\n",
        "    * [bar](./#bar)\n",
        "    * [process](../analysis/#process)\n",
        "    * [Gen.Generate](../classes/Gen/#generate)\n",
        "\n\n",
    )));
    assert_eq!(utils.matches("-------").count(), 1);
}

#[test]
fn build_warns_about_unresolved_reference() {
    let dir = project();
    build(dir.path())
        .success()
        .stderr(predicate::str::contains("malformed See Also entry \"nothere\""));

    assert!(!page(dir.path(), "utils.md").contains("nothere"));
}

#[test]
fn class_page_links_up_two_levels() {
    let dir = project();
    build(dir.path()).success();

    let class_page = page(dir.path(), "classes/Gen.md");
    assert!(class_page.starts_with("# Gen\n\n\nGen\nA generator.\n"));
    assert!(class_page.contains("    * [helper](../../stim/#helper)\n"));
}

#[test]
fn multi_function_file_renders_every_function() {
    let dir = project();
    build(dir.path()).success();

    let stim = page(dir.path(), "stim.md");
    let alpha = stim.find("Alpha stage.").unwrap();
    let beta = stim.find("Beta stage.").unwrap();
    assert!(alpha < beta);
    // Functions of the same file are not source files, so `beta` stays unlinked
    assert!(!stim.contains("[beta]"));
    // alpha, beta, then helper: dividers before the second and third
    assert_eq!(stim.matches("-------").count(), 2);
}

#[test]
fn missing_header_skips_destination_only() {
    let dir = project();
    fs::remove_file(dir.path().join("docs/analysis-head.md")).unwrap();

    build(dir.path())
        .success()
        .stderr(predicate::str::contains("can't find header"));

    assert!(!dir.path().join("docs/analysis.md").exists());
    assert!(dir.path().join("docs/utils.md").exists());
}

#[test]
fn undocumented_file_is_reported() {
    let dir = project();
    write(dir.path(), "code/utils/quiet.m", "x = 1;\n");

    build(dir.path())
        .success()
        .stderr(predicate::str::contains("no documentation for quiet"));
}

#[test]
fn undocumented_multi_function_file_is_reported() {
    let dir = project();
    write(
        dir.path(),
        "code/stim/AbstractEmpty.m",
        "function a()\n% unrelated\nend\n",
    );

    build(dir.path())
        .success()
        .stderr(predicate::str::contains("no documentation for AbstractEmpty"));
}

#[test]
fn missing_source_tree_fails() {
    let dir = TempDir::new().unwrap();
    build(dir.path())
        .failure()
        .stderr(predicate::str::contains("source tree not found"));
}

#[test]
fn rebuild_is_stable() {
    let dir = project();
    build(dir.path()).success();
    let once = page(dir.path(), "utils.md");
    build(dir.path()).success();
    assert_eq!(once, page(dir.path(), "utils.md"));
}

// -- preview mode --

#[test]
fn preview_renders_to_stdout() {
    let dir = project();
    let file = dir.path().join("code/utils/foo.m");

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap()])
        .arg(&file)
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(output.starts_with("\n\nfoo\nDoubles the input.\n"), "got: {output:?}");
    assert!(!output.contains("-------"));
    assert!(output.contains("    * [bar](./#bar)\n"));
    assert!(!dir.path().join("docs/utils.md").exists());
}

#[test]
fn preview_separates_files() {
    let dir = project();

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap()])
        .arg(dir.path().join("code/utils/bar.m"))
        .arg(dir.path().join("code/analysis/process.m"))
        .assert()
        .success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert_eq!(
        output,
        "\n\nbar\nBar helper.\n\n\n\n\n-------\n\nprocess\nProcesses.\n\n\n"
    );
}

#[test]
fn custom_class_dir() {
    let dir = project();
    fs::create_dir_all(dir.path().join("docs/api")).unwrap();
    fs::rename(
        dir.path().join("docs/classes/Gen-head.md"),
        dir.path().join("docs/api/Gen-head.md"),
    )
    .unwrap();

    cmd()
        .args(["--root", dir.path().to_str().unwrap()])
        .args(["--class-dir", "api"])
        .assert()
        .success();

    assert!(page(dir.path(), "api/Gen.md").starts_with("# Gen\n"));
    assert!(page(dir.path(), "utils.md").contains("(../api/Gen/#generate)"));
}
