//! End-to-end selection over on-disk inputs, including the shipped socket
//! suite manifest.

use exclusion_harness::{select, EnvSnapshot, Exclusions, OsFamily};
use socket_suite::report::Report;
use socket_suite::testlist::load_test_list;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn shipped_manifest() -> Exclusions {
  let path = Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("excludes")
    .join("socket.toml");
  Exclusions::from_path(&path).expect("shipped manifest loads")
}

#[test]
fn shipped_manifest_gates_unix_socket_tests_on_windows() {
  let exclusions = shipped_manifest();

  let windows = EnvSnapshot::with_os_family(OsFamily::Windows);
  let unix = EnvSnapshot::with_os_family(OsFamily::Unix);

  // Unconditional entry: skipped on both hosts.
  assert!(exclusions.resolve("test_accept_loop", &windows).is_some());
  assert!(exclusions.resolve("test_accept_loop", &unix).is_some());

  // Windows-gated entries run everywhere else.
  for id in ["test_unix", "test_unix_server_socket", "test_accept_loop_with_unix"] {
    assert_eq!(
      exclusions.resolve(id, &windows),
      Some("needs investigation"),
      "{id} should be skipped on windows"
    );
    assert_eq!(exclusions.resolve(id, &unix), None, "{id} should run on unix");
  }
}

#[test]
fn file_inputs_partition_end_to_end() {
  let temp = tempdir().unwrap();

  let tests_path = temp.path().join("tests.txt");
  fs::write(
    &tests_path,
    "# hand-ordered\ntest_udp_server\ntest_unix\ntest_sockopt\n",
  )
  .unwrap();

  let manifest_path = temp.path().join("excludes.toml");
  fs::write(
    &manifest_path,
    r#"
[[exclusions]]
id = "test_udp_server"
reason = "needs investigation"

[[exclusions]]
id = "test_unix"
reason = "needs investigation"
os_family = "windows"
"#,
  )
  .unwrap();

  let ids = load_test_list(&tests_path).unwrap();
  let exclusions = Exclusions::from_path(&manifest_path).unwrap();

  let windows = select(
    ids.clone(),
    &exclusions,
    &EnvSnapshot::with_os_family(OsFamily::Windows),
  );
  assert_eq!(windows.run, vec!["test_sockopt"]);
  assert_eq!(windows.skipped.len(), 2);

  let unix = select(
    ids,
    &exclusions,
    &EnvSnapshot::with_os_family(OsFamily::Unix),
  );
  assert_eq!(unix.run, vec!["test_unix", "test_sockopt"]);
  assert_eq!(
    unix.skipped.get("test_udp_server").map(String::as_str),
    Some("needs investigation")
  );

  let report = Report::new(OsFamily::Unix, unix.run.clone(), &unix.skipped);
  assert_eq!(report.summary.total, 3);
  assert_eq!(report.summary.selected, 2);
  assert_eq!(report.summary.skipped, 1);
}
