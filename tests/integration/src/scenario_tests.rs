//! End-to-end scenarios
//!
//! Each module drives the public manager API against a temporary home and
//! checks the files a host application would read.

use hostcfg_core::{FieldChange, HostConfigManager, SyncRequest, SyncSource, WriteOptions};
use hostcfg_hosts::{HostContext, Platform};
use hostcfg_meta::{HostType, McpServerConfig};
use hostcfg_test_utils::{TestHome, fixtures};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::BTreeMap;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn manager(home: &TestHome) -> HostConfigManager {
    HostConfigManager::new(
        HostContext::new(home.home(), home.backups()).with_platform(Platform::Linux),
    )
}

fn python_server() -> McpServerConfig {
    McpServerConfig::stdio("s1", "python", vec!["server.py".into()])
}

/// Home-relative config path per host on Linux.
fn config_rel(host: HostType) -> &'static str {
    match host {
        HostType::ClaudeDesktop => ".config/Claude/claude_desktop_config.json",
        HostType::ClaudeCode => ".claude.json",
        HostType::VsCode => ".config/Code/User/mcp.json",
        HostType::Cursor => ".cursor/mcp.json",
        HostType::LmStudio => ".lmstudio/mcp.json",
        HostType::Gemini => ".gemini/settings.json",
        HostType::Kiro => ".kiro/settings/mcp.json",
        HostType::Codex => ".codex/config.toml",
    }
}

fn root_key(host: HostType) -> &'static str {
    match host {
        HostType::VsCode => "servers",
        HostType::Codex => "mcp_servers",
        _ => "mcpServers",
    }
}

// =============================================================================
// Serialized shape
// =============================================================================

mod serialized_shape {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn stdio_server_has_only_set_fields() {
        let home = TestHome::new();
        let manager = manager(&home);

        manager
            .configure(&python_server(), "claude-desktop", WriteOptions::default())
            .unwrap();

        assert_eq!(
            home.read_json(config_rel(HostType::ClaudeDesktop))["mcpServers"]["s1"],
            json!({"command": "python", "args": ["server.py"]})
        );
    }

    #[test]
    fn codex_entry_uses_native_names() {
        let home = TestHome::new();
        let manager = manager(&home);

        manager
            .configure(&python_server(), "codex", WriteOptions::default())
            .unwrap();

        let doc: toml::Table = toml::from_str(&home.read(config_rel(HostType::Codex))).unwrap();
        let entry = doc["mcp_servers"]["s1"].as_table().unwrap();
        assert_eq!(entry.len(), 2);
        assert_eq!(entry["command"].as_str(), Some("python"));
        assert_eq!(entry["arguments"][0].as_str(), Some("server.py"));
    }

    #[test]
    fn unrelated_settings_are_preserved() {
        let home = TestHome::new();
        home.write(
            config_rel(HostType::ClaudeDesktop),
            fixtures::CLAUDE_DESKTOP_WITH_THEME,
        );
        let manager = manager(&home);

        manager
            .configure(&python_server(), "claude-desktop", WriteOptions::default())
            .unwrap();

        let written = home.read_json(config_rel(HostType::ClaudeDesktop));
        assert_eq!(written["theme"], "dark");
        assert_eq!(
            written["mcpServers"]["existing"],
            json!({"command": "node", "args": ["existing.js"]})
        );
        assert_eq!(written["mcpServers"]["s1"]["command"], "python");
    }
}

// =============================================================================
// Every host
// =============================================================================

mod every_host {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn configure_then_list_round_trips() {
        let home = TestHome::new();
        let manager = manager(&home);
        let server = McpServerConfig {
            env: Some(BTreeMap::from([("TOKEN".to_string(), "t".to_string())])),
            ..python_server()
        };

        for host in HostType::ALL {
            let result = manager
                .configure(&server, host.as_str(), WriteOptions::default())
                .unwrap();
            assert!(result.success, "{host}");

            let listed = manager.list_servers(host.as_str()).unwrap();
            assert_eq!(listed.get("s1"), Some(&server), "{host}");
        }
    }

    #[test]
    fn writes_land_under_each_root_key() {
        let home = TestHome::new();
        let manager = manager(&home);
        let targets: Vec<&str> = HostType::ALL.iter().map(|h| h.as_str()).collect();

        let result = manager
            .sync(&SyncRequest::new(
                SyncSource::environment("dev", vec![python_server()]),
                targets,
            ))
            .unwrap();

        assert!(result.is_success());
        for host in HostType::ALL {
            let content = home.read(config_rel(host));
            assert!(content.contains(root_key(host)), "{host}: {content}");
            home.assert_no_staging_files(config_rel(host));
        }
    }
}

// =============================================================================
// Backups
// =============================================================================

mod backups {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn one_exact_backup_per_write() {
        let home = TestHome::new();
        home.write(config_rel(HostType::Codex), fixtures::CODEX_WITH_FEATURES);
        let manager = manager(&home);

        let result = manager
            .configure(&python_server(), "codex", WriteOptions::default())
            .unwrap();

        let files = home.backup_files("codex");
        assert_eq!(files.len(), 1);
        assert_eq!(result.backup.unwrap().path, files[0]);
        assert_eq!(
            std::fs::read_to_string(&files[0]).unwrap(),
            fixtures::CODEX_WITH_FEATURES
        );
    }

    #[test]
    fn skip_backup_leaves_no_backup() {
        let home = TestHome::new();
        home.write(config_rel(HostType::Gemini), fixtures::GEMINI_SETTINGS);
        let manager = manager(&home);
        let options = WriteOptions {
            skip_backup: true,
            ..WriteOptions::default()
        };

        let result = manager.configure(&python_server(), "gemini", options).unwrap();

        assert!(result.backup.is_none());
        assert!(home.backup_files("gemini").is_empty());
    }

    #[test]
    fn restore_undoes_a_sync() {
        let home = TestHome::new();
        home.write(config_rel(HostType::VsCode), fixtures::VSCODE_WITH_INPUTS);
        let manager = manager(&home);

        let result = manager
            .sync(&SyncRequest::new(
                SyncSource::environment("dev", vec![python_server()]),
                ["vscode"],
            ))
            .unwrap();
        let backup = result.results[0].backup.clone().unwrap();

        assert!(manager.restore_backup("vscode", &backup.id).unwrap());
        assert_eq!(home.read(config_rel(HostType::VsCode)), fixtures::VSCODE_WITH_INPUTS);
    }
}

// =============================================================================
// Multi-host sync
// =============================================================================

mod multi_host {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn a_failing_host_does_not_roll_back_others() {
        let home = TestHome::new();
        home.create_dir(config_rel(HostType::LmStudio));
        let manager = manager(&home);

        let result = manager
            .sync(&SyncRequest::new(
                SyncSource::environment("dev", vec![python_server()]),
                ["cursor", "lmstudio", "kiro"],
            ))
            .unwrap();

        assert!(result.host_succeeded("cursor"));
        assert!(!result.host_succeeded("lmstudio"));
        assert!(result.host_succeeded("kiro"));
        home.assert_file_exists(config_rel(HostType::Cursor));
        home.assert_file_exists(config_rel(HostType::Kiro));
    }

    #[test]
    fn host_to_host_sync_is_idempotent() {
        let home = TestHome::new();
        let manager = manager(&home);
        let server = McpServerConfig {
            exclude_tools: Some(vec!["shell".into()]),
            timeout: Some(20_000),
            ..python_server()
        };
        manager
            .configure(&server, "gemini", WriteOptions::default())
            .unwrap();
        let request = SyncRequest::new(SyncSource::host("gemini"), ["kiro", "codex", "cursor"]);

        let first = manager.sync(&request).unwrap();
        let snapshot: Vec<String> = ["kiro", "codex", "cursor"]
            .iter()
            .map(|h| home.read(config_rel(h.parse().unwrap())))
            .collect();
        let second = manager.sync(&request).unwrap();

        assert!(first.is_success() && second.is_success());
        assert_eq!(second.updated_field_count(), 0);
        let after: Vec<String> = ["kiro", "codex", "cursor"]
            .iter()
            .map(|h| home.read(config_rel(h.parse().unwrap())))
            .collect();
        assert_eq!(after, snapshot);

        assert_eq!(
            home.read_json(config_rel(HostType::Kiro))["mcpServers"]["s1"]["disabledTools"],
            json!(["shell"])
        );
        let cursor = second.for_host("cursor").next().unwrap();
        assert_eq!(cursor.count(FieldChange::Unsupported), 2);
    }
}
