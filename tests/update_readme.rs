//! Integration tests for the update operation

mod common;

use common::{create_test_project, read, shell_config, SAMPLE_README};
use readme_update::config::{parse_config, Markers, SearchPath};
use readme_update::error::{ReadmeError, SpliceError, ToolError};
use readme_update::runner::{Context, Mode};
use readme_update::{update, Outcome};
use std::fs;
use std::path::PathBuf;

#[test]
fn test_splices_help_between_markers() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    update(&shell_config("echo 'USAGE: x'"), &ctx).unwrap();

    assert_eq!(read(&readme), "A\n<pre><code>\nUSAGE: x\n</pre></code>\nB\n");
}

#[test]
fn test_idempotent() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());
    let config = shell_config("printf 'usage: rganalysis [-h]\\n\\noptions:\\n  -h  show help\\n'");

    update(&config, &ctx).unwrap();
    let first = read(&readme);
    update(&config, &ctx).unwrap();

    assert_eq!(read(&readme), first);
}

#[test]
fn test_marker_lines_round_trip() {
    let original = "# Title\n\n    <pre><code>$ tool --help\nold\n</pre></code>  \n\nmore\n";
    let (temp_dir, readme) = create_test_project(original);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    update(&shell_config("echo new"), &ctx).unwrap();

    let updated = read(&readme);
    let open_line = |text: &str| text.lines().find(|l| l.contains("<pre><code>")).map(String::from);
    let close_line = |text: &str| text.lines().find(|l| l.contains("</pre></code>")).map(String::from);
    assert_eq!(open_line(&updated), open_line(original));
    assert_eq!(close_line(&updated), close_line(original));
    assert!(updated.ends_with("</pre></code>  \n\nmore\n"));
}

#[test]
fn test_tool_failure_is_non_destructive() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let modified_before = fs::metadata(&readme).unwrap().modified().unwrap();
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    let result = update(
        &shell_config("echo 'error: bad flag' >&2; exit 1"),
        &ctx,
    );

    assert!(matches!(
        result,
        Err(ReadmeError::Tool(ToolError::ToolUnavailable { code: Some(1), .. }))
    ));
    assert_eq!(read(&readme), SAMPLE_README);
    assert_eq!(
        fs::metadata(&readme).unwrap().modified().unwrap(),
        modified_before
    );
}

#[test]
fn test_document_without_markers_is_not_truncated() {
    let original = "# Nothing to splice\n\nText.\n";
    let (temp_dir, readme) = create_test_project(original);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    let result = update(&shell_config("echo help"), &ctx);

    assert!(matches!(
        result,
        Err(ReadmeError::Splice(SpliceError::NoMarkersFound { .. }))
    ));
    assert_eq!(read(&readme), original);
}

#[test]
fn test_empty_document_reports_no_markers() {
    let (temp_dir, readme) = create_test_project("");
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    let result = update(&shell_config("echo help"), &ctx);

    assert!(matches!(
        result,
        Err(ReadmeError::Splice(SpliceError::NoMarkersFound { .. }))
    ));
    assert_eq!(read(&readme), "");
}

#[test]
fn test_custom_markers() {
    let original = "<!-- usage -->\nold\n<!-- /usage -->\n";
    let (temp_dir, readme) = create_test_project(original);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    let mut config = shell_config("echo new");
    config.markers = Markers {
        open: "<!-- usage -->".to_string(),
        close: "<!-- /usage -->".to_string(),
    };
    update(&config, &ctx).unwrap();

    assert_eq!(read(&readme), "<!-- usage -->\nnew\n<!-- /usage -->\n");
}

#[test]
fn test_search_path_reaches_tool() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    let mut config = shell_config("printf '%s\\n' \"$TOOL_SEARCH_PATH\"");
    config.tool.search_path = Some(SearchPath {
        var: "TOOL_SEARCH_PATH".to_string(),
        entries: vec![PathBuf::from("lib")],
    });
    update(&config, &ctx).unwrap();

    let expected = temp_dir.path().join("lib");
    assert!(read(&readme).contains(&format!("\n{}\n", expected.display())));
}

#[test]
fn test_tool_runs_in_config_directory() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    fs::write(temp_dir.path().join("usage.txt"), "usage from file\n").unwrap();
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    update(&shell_config("cat usage.txt"), &ctx).unwrap();

    assert_eq!(
        read(&readme),
        "A\n<pre><code>\nusage from file\n</pre></code>\nB\n"
    );
}

#[test]
fn test_invalid_config_rejected_before_running() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());
    let config = parse_config("tool:\n  command: []\n").unwrap();

    let result = update(&config, &ctx);

    assert!(matches!(result, Err(ReadmeError::Config(_))));
    assert_eq!(read(&readme), SAMPLE_README);
}

#[test]
fn test_check_and_dry_run_never_write() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let base = Context::new().with_working_dir(temp_dir.path().to_path_buf());
    let config = shell_config("echo new");

    let check = update(&config, &base.with_mode(Mode::Check));
    assert!(matches!(
        check,
        Err(ReadmeError::Splice(SpliceError::OutOfDate { .. }))
    ));

    let ctx = Context::new()
        .with_working_dir(temp_dir.path().to_path_buf())
        .with_mode(Mode::DryRun);
    let dry_run = update(&config, &ctx).unwrap();
    assert_eq!(
        dry_run,
        Outcome::Printed("A\n<pre><code>\nnew\n</pre></code>\nB\n".to_string())
    );

    assert_eq!(read(&readme), SAMPLE_README);
}

#[test]
fn test_help_on_both_streams_keeps_order() {
    let (temp_dir, readme) = create_test_project(SAMPLE_README);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());

    update(
        &shell_config("echo 'usage: x' >&2; sleep 0.1; echo '  -h help'"),
        &ctx,
    )
    .unwrap();

    assert_eq!(
        read(&readme),
        "A\n<pre><code>\nusage: x\n  -h help\n</pre></code>\nB\n"
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_document_stays_a_link() {
    let (temp_dir, real) = create_test_project(SAMPLE_README);
    let ctx = Context::new().with_working_dir(temp_dir.path().to_path_buf());
    let link = temp_dir.path().join("LINKED.mkdn");
    std::os::unix::fs::symlink(&real, &link).unwrap();

    let mut config = shell_config("echo 'USAGE: x'");
    config.document = PathBuf::from("LINKED.mkdn");
    update(&config, &ctx).unwrap();

    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(read(&real), "A\n<pre><code>\nUSAGE: x\n</pre></code>\nB\n");
}
