// Shared fixtures for integration tests: grammar-template matchers and a
// fake compiler executable written as a shell script.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

pub const HEADER: &str = "comment \"This is the automatically generated stress test script to test the front-end compilation performance of the compiler\"";

/// The four line templates, one regex each.
pub fn templates() -> Vec<Regex> {
    [
        r"^(add|sub|multiply|divide) r[0-9] with r[0-9] to r[0-9]$",
        r"^move r[0-9] to r[0-9]$",
        r"^load m<([0-9]+)> to r[0-9]$",
        r"^store r[0-9] to m<([0-9]+)>$",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
}

/// Panics unless `line` matches exactly one template with an in-range address.
pub fn assert_interior_line(templates: &[Regex], line: &str) {
    let matching: Vec<&Regex> = templates.iter().filter(|re| re.is_match(line)).collect();
    assert_eq!(
        matching.len(),
        1,
        "line {:?} matched {} templates",
        line,
        matching.len()
    );
    if let Some(caps) = matching[0].captures(line) {
        if let Some(addr) = caps.get(1) {
            if matching[0].as_str().contains("m<") {
                let value: u32 = addr.as_str().parse().unwrap();
                assert!(value <= 1000, "address {} out of range in {:?}", value, line);
            }
        }
    }
}

/// Split a corpus the way a line-oriented reader would.
pub fn corpus_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Write an executable `/bin/sh` script called `name` into `dir`.
#[cfg(unix)]
pub fn fake_compiler(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A compiler stand-in that reports its arguments and the corpus line count.
#[cfg(unix)]
pub fn echo_compiler(dir: &Path) -> PathBuf {
    fake_compiler(
        dir,
        "startasm",
        r#"echo "argc=$# sub=$1 flag=$3"
echo "header=$(head -n 1 "$2")"
echo "timings: lexing 0.001s parsing 0.002s""#,
    )
}

/// Returns `true` if a file can still be created in `dir` (e.g. running as root).
pub fn dir_is_writable(dir: &Path) -> bool {
    let probe = dir.join(".probe");
    match fs::write(&probe, b"x") {
        Ok(()) => {
            let _ = fs::remove_file(&probe);
            true
        }
        Err(_) => false,
    }
}
