use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};

use crate::editor::HistoryOptions;

/// Defaults that can be persisted as command-line flag tokens.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub perf: bool,
    pub render_debug_log: Option<PathBuf>,
    pub user: Option<String>,
    pub rate: Option<u8>,
    pub history_delay_ms: Option<u64>,
    pub history_max_stack: Option<usize>,
    pub history_all_sources: bool,
}

impl ConfigFlags {
    /// Merge two flag sets; values in `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            perf: self.perf || other.perf,
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
            user: other.user.clone().or_else(|| self.user.clone()),
            rate: other.rate.or(self.rate),
            history_delay_ms: other.history_delay_ms.or(self.history_delay_ms),
            history_max_stack: other.history_max_stack.or(self.history_max_stack),
            history_all_sources: self.history_all_sources || other.history_all_sources,
        }
    }

    /// Editor history settings, falling back to the defaults.
    pub fn history_options(&self) -> HistoryOptions {
        let defaults = HistoryOptions::default();
        HistoryOptions {
            delay: self
                .history_delay_ms
                .map_or(defaults.delay, Duration::from_millis),
            max_stack: self.history_max_stack.unwrap_or(defaults.max_stack),
            user_only: !self.history_all_sources,
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("marginalia").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("marginalia")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("marginalia").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("marginalia")
                .join("config");
        }
    }

    PathBuf::from(".marginaliarc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".marginaliarc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

/// Split a config line into tokens; a user name keeps its inner spaces.
fn line_tokens(line: &str) -> Vec<String> {
    if let Some(name) = line.strip_prefix("--user ") {
        return vec!["--user".to_string(), name.trim().to_string()];
    }
    line.split_whitespace().map(ToOwned::to_owned).collect()
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# marginalia defaults (saved with --save)".to_string());
    if let Some(user) = &flags.user {
        lines.push(format!("--user {user}"));
    }
    if let Some(rate) = flags.rate {
        lines.push(format!("--rate {rate}"));
    }
    if let Some(delay) = flags.history_delay_ms {
        lines.push(format!("--history-delay {delay}"));
    }
    if let Some(max_stack) = flags.history_max_stack {
        lines.push(format!("--history-max-stack {max_stack}"));
    }
    if flags.history_all_sources {
        lines.push("--history-all-sources".to_string());
    }
    if flags.perf {
        lines.push("--perf".to_string());
    }
    if let Some(path) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", path.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Extract known flags from a token list, ignoring anything else.
///
/// Both `--flag value` and `--flag=value` forms are accepted. Values that
/// fail to parse are dropped.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        let mut value = || {
            inline_value.map(str::to_string).or_else(|| {
                let next = tokens.get(i + 1).cloned();
                if next.is_some() {
                    i += 1;
                }
                next
            })
        };
        match name {
            "--perf" => flags.perf = true,
            "--history-all-sources" => flags.history_all_sources = true,
            "--render-debug-log" => flags.render_debug_log = value().map(PathBuf::from),
            "--user" => flags.user = value().filter(|user| !user.is_empty()),
            "--rate" => flags.rate = value().and_then(|v| v.parse().ok()),
            "--history-delay" => flags.history_delay_ms = value().and_then(|v| v.parse().ok()),
            "--history-max-stack" => {
                flags.history_max_stack = value().and_then(|v| v.parse().ok());
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "marginalia",
            "--user",
            "Grace",
            "--rate=80",
            "--history-delay",
            "250",
            "--history-max-stack=10",
            "--history-all-sources",
            "--render-debug-log=render.log",
            "--perf",
            "--unknown",
        ]);
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.user.as_deref(), Some("Grace"));
        assert_eq!(flags.rate, Some(80));
        assert_eq!(flags.history_delay_ms, Some(250));
        assert_eq!(flags.history_max_stack, Some(10));
        assert!(flags.history_all_sources);
        assert_eq!(flags.render_debug_log, Some(PathBuf::from("render.log")));
        assert!(flags.perf);
    }

    #[test]
    fn test_parse_flag_tokens_drops_bad_numbers() {
        let flags = parse_flag_tokens(&tokens(&["--rate", "lots", "--history-delay=-1"]));
        assert_eq!(flags.rate, None);
        assert_eq!(flags.history_delay_ms, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            perf: true,
            user: Some("Adele".to_string()),
            rate: Some(30),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            history_all_sources: true,
            rate: Some(70),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.perf);
        assert!(merged.history_all_sources);
        assert_eq!(merged.user.as_deref(), Some("Adele"));
        assert_eq!(merged.rate, Some(70));
    }

    #[test]
    fn test_history_options_default_to_editor_configuration() {
        let options = ConfigFlags::default().history_options();
        assert_eq!(options, HistoryOptions::default());

        let options = ConfigFlags {
            history_delay_ms: Some(1000),
            history_max_stack: Some(5),
            history_all_sources: true,
            ..ConfigFlags::default()
        }
        .history_options();
        assert_eq!(options.delay, Duration::from_secs(1));
        assert_eq!(options.max_stack, 5);
        assert!(!options.user_only);
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".marginaliarc");
        let flags = ConfigFlags {
            perf: true,
            render_debug_log: Some(PathBuf::from("render.log")),
            user: Some("Ada Lovelace".to_string()),
            rate: Some(65),
            history_delay_ms: Some(750),
            history_max_stack: Some(42),
            history_all_sources: true,
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let loaded = load_config_flags(&dir.path().join("nope")).unwrap();
        assert_eq!(loaded, ConfigFlags::default());
    }
}
