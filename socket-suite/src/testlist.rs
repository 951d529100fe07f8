use anyhow::{anyhow, bail, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Load an ordered test list from `path`.
///
/// One id per line; blank lines and lines starting with `#` are ignored.
/// Order is significant: it becomes the run order of the selected tests.
pub fn load_test_list(path: &Path) -> Result<Vec<String>> {
  let raw =
    fs::read_to_string(path).with_context(|| format!("read test list {}", path.display()))?;
  parse_test_list(&raw).map_err(|err| anyhow!("{}: {err}", path.display()))
}

pub fn parse_test_list(raw: &str) -> Result<Vec<String>> {
  let mut ids = Vec::new();
  let mut seen = HashSet::new();

  for (lineno, line) in raw.lines().enumerate() {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
      continue;
    }
    if line.split_whitespace().count() > 1 {
      bail!("line {}: test id `{line}` contains whitespace", lineno + 1);
    }
    if !seen.insert(line.to_string()) {
      bail!("line {}: duplicate test id `{line}`", lineno + 1);
    }
    ids.push(line.to_string());
  }

  if ids.is_empty() {
    bail!("test list contains no ids");
  }

  Ok(ids)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn order_is_preserved_and_comments_are_ignored() {
    let raw = "\
# socket suite, hand-ordered
test_tcp
test_udp_server

test_linger
";
    let ids = parse_test_list(raw).unwrap();
    assert_eq!(ids, vec!["test_tcp", "test_udp_server", "test_linger"]);
  }

  #[test]
  fn duplicate_ids_are_rejected() {
    let err = parse_test_list("test_tcp\ntest_tcp\n").unwrap_err();
    assert!(err.to_string().contains("duplicate test id"));
  }

  #[test]
  fn empty_list_is_rejected() {
    let err = parse_test_list("# only a comment\n").unwrap_err();
    assert!(err.to_string().contains("no ids"));
  }

  #[test]
  fn load_includes_path_in_errors() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("tests.txt");
    fs::write(&path, "").unwrap();

    let err = load_test_list(&path).unwrap_err();
    assert!(err.to_string().contains("tests.txt"));
  }
}
