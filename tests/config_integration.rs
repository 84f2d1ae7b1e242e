use std::path::PathBuf;
use std::time::Duration;

use marginalia::config::{ConfigFlags, load_config_flags, parse_flag_tokens, save_config_flags};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marginaliarc");
    let content = r"
# comment
--history-all-sources

--rate 75

--render-debug-log=render.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.history_all_sources);
    assert_eq!(flags.rate, Some(75));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".marginaliarc");
    let content = "--perf\n--rate 20\n--user Ada Lovelace\n--render-debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "marginalia".to_string(),
        "--rate".to_string(),
        "90".to_string(),
        "--history-delay".to_string(),
        "100".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.perf, "file flags should remain enabled");
    assert_eq!(effective.rate, Some(90), "cli should override rate");
    assert_eq!(
        effective.user.as_deref(),
        Some("Ada Lovelace"),
        "user names keep their spaces"
    );
    assert_eq!(
        effective.render_debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
    assert_eq!(
        effective.history_options().delay,
        Duration::from_millis(100)
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "marginalia".to_string(),
        "--user=Grace".to_string(),
        "--history-max-stack=7".to_string(),
        "--render-debug-log=render.log".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.user.as_deref(), Some("Grace"));
    assert_eq!(flags.history_max_stack, Some(7));
    assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
}

#[test]
fn test_saved_defaults_round_trip_through_nested_dir() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("marginalia").join("config");
    let flags = ConfigFlags {
        rate: Some(40),
        history_all_sources: true,
        ..ConfigFlags::default()
    };
    save_config_flags(&path, &flags).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# marginalia defaults"));
    assert_eq!(load_config_flags(&path).unwrap(), flags);
}
