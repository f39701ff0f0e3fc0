use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use crate::args::CerberusCli;
use crate::error::CerberusError;
use crate::run::{collect_source_files, run};

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn cli(args: &[&str]) -> CerberusCli {
    CerberusCli::try_parse_from(std::iter::once("cerberus").chain(args.iter().copied())).unwrap()
}

fn run_in(cwd: &Path, args: &[&str]) -> (Result<i32, CerberusError>, String) {
    let mut out: Vec<u8> = vec![];
    let result = run(&cli(args), cwd, &mut out);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn single_file_is_printed_to_stdout() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("App.js"), "import React from 'react'\n");
    let (result, stdout) = run_in(temp.path(), &["App.js"]);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(stdout, "const React = $REACT$;\n");
}

#[test]
fn stdout_mode_rejects_several_files() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("src/a.js"), "");
    write_file(&temp.path().join("src/b.js"), "");
    let (result, _) = run_in(temp.path(), &["src"]);
    assert!(matches!(result, Err(CerberusError::Usage(_))));
}

#[test]
fn check_lists_files_that_would_change_without_touching_them() {
    let temp = TempDir::new().unwrap();
    let changing = "import {View} from 'react-native'\n";
    write_file(&temp.path().join("src/a.js"), changing);
    write_file(&temp.path().join("src/b.js"), "export const b = 1\n");
    let (result, stdout) = run_in(temp.path(), &["--check", "src"]);
    assert_eq!(result.unwrap(), 1);
    assert_eq!(stdout, "src/a.js\n");
    assert_eq!(
        std::fs::read_to_string(temp.path().join("src/a.js")).unwrap(),
        changing
    );
}

#[test]
fn write_rewrites_in_place_and_then_checks_clean() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("src/a.js"), "const i = require('./i.png')\n");
    write_file(&temp.path().join("src/i@2x.png"), "");

    let (result, _) = run_in(temp.path(), &["--write", "src"]);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(
        std::fs::read_to_string(temp.path().join("src/a.js")).unwrap(),
        "const i = $MODULES$.resolveAsset(require(\"./i@2x.png\"))\n"
    );

    let (result, stdout) = run_in(temp.path(), &["--check", "src"]);
    assert_eq!(result.unwrap(), 0);
    assert!(stdout.is_empty());
}

#[test]
fn config_file_and_flags_are_combined() {
    let temp = TempDir::new().unwrap();
    write_file(
        &temp.path().join("cerberus.config.json"),
        r#"{ "modules": ["mobx"] }"#,
    );
    write_file(
        &temp.path().join("App.js"),
        "import {observable} from 'mobx'\nimport axios from 'axios'\n",
    );
    let (result, stdout) = run_in(temp.path(), &["--module", "axios", "App.js"]);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(
        stdout,
        "const observable = $MODULES$[\"mobx\"].observable;\nconst axios = $MODULES$[\"axios\"];\n"
    );
}

#[test]
fn invalid_resource_test_flag_fails_before_any_file() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("App.js"), "");
    let (result, _) = run_in(temp.path(), &["--resource-test", "(", "App.js"]);
    assert!(matches!(result, Err(CerberusError::Rewrite(_))));
}

#[test]
fn parse_failures_fail_the_run_in_check_mode() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("src/broken.js"), "import from\n");
    write_file(&temp.path().join("src/ok.js"), "export {}\n");
    let (result, stdout) = run_in(temp.path(), &["--check", "src"]);
    assert_eq!(result.unwrap(), 1);
    assert!(stdout.is_empty());
}

#[test]
fn directories_contribute_only_script_sources() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("src/a.ts"), "");
    write_file(&temp.path().join("src/nested/b.jsx"), "");
    write_file(&temp.path().join("src/icon.png"), "");
    write_file(&temp.path().join("src/readme.md"), "");
    let files = collect_source_files(&[temp.path().join("src")]);
    let names = files
        .iter()
        .map(|p| p.strip_prefix(temp.path()).unwrap().to_path_buf())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        vec![
            Path::new("src/a.ts").to_path_buf(),
            Path::new("src/nested/b.jsx").to_path_buf(),
        ]
    );
}

#[test]
fn write_conflicts_with_check() {
    assert!(CerberusCli::try_parse_from(["cerberus", "--write", "--check", "a.js"]).is_err());
}

#[test]
fn declaration_files_are_skipped_by_directory_writes() {
    let temp = TempDir::new().unwrap();
    let shim = "import {ImageSourcePropType} from 'react-native'\ndeclare module '*.png' {\n  const value: ImageSourcePropType\n  export default value\n}\n";
    write_file(&temp.path().join("src/assets.d.ts"), shim);
    write_file(&temp.path().join("src/types.d.mts"), shim);
    write_file(&temp.path().join("src/App.ts"), "import {View} from 'react-native'\n");

    let (result, _) = run_in(temp.path(), &["--write", "src"]);
    assert_eq!(result.unwrap(), 0);
    assert_eq!(
        std::fs::read_to_string(temp.path().join("src/assets.d.ts")).unwrap(),
        shim
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("src/types.d.mts")).unwrap(),
        shim
    );
    assert_eq!(
        std::fs::read_to_string(temp.path().join("src/App.ts")).unwrap(),
        "const View = $REACTNATIVE$.View;\n"
    );
}

#[test]
fn gitignore_is_honoured_outside_a_git_checkout() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join(".gitignore"), "node_modules/\n");
    write_file(&temp.path().join("node_modules/lib/index.js"), "");
    write_file(&temp.path().join("src/a.js"), "");
    let files = collect_source_files(&[temp.path().to_path_buf()]);
    assert_eq!(files, vec![temp.path().join("src/a.js")]);
}

struct UnflushableOut;

impl std::io::Write for UnflushableOut {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Err(std::io::Error::other("closed"))
    }
}

#[test]
fn stdout_flush_failure_is_an_error() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("App.js"), "import React from 'react'\n");
    let result = run(&cli(&["App.js"]), temp.path(), &mut UnflushableOut);
    assert!(matches!(result, Err(CerberusError::Io { .. })));
}
