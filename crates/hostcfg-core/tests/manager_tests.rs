//! Backup and single-host operations through the manager.

use hostcfg_core::{Error, FieldChange, HostConfigManager, Settings, WriteOptions};
use hostcfg_fs::PrunePolicy;
use hostcfg_hosts::{HostContext, Platform};
use hostcfg_meta::{HostType, McpServerConfig};
use hostcfg_test_utils::TestHome;
use pretty_assertions::assert_eq;
use serde_json::json;

fn manager(home: &TestHome) -> HostConfigManager {
    HostConfigManager::new(
        HostContext::new(home.home(), home.backups()).with_platform(Platform::Linux),
    )
}

fn configure(manager: &HostConfigManager, name: &str, command: &str) {
    manager
        .configure(
            &McpServerConfig::stdio(name, command, vec![]),
            "cursor",
            WriteOptions::default(),
        )
        .unwrap();
}

#[test]
fn every_rewrite_of_an_existing_file_is_backed_up() {
    let home = TestHome::new();
    let manager = manager(&home);

    configure(&manager, "a", "python");
    assert!(manager.list_backups("cursor").unwrap().is_empty());

    let before = home.read(".cursor/mcp.json");
    configure(&manager, "b", "node");

    let backups = manager.list_backups("cursor").unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(std::fs::read_to_string(&backups[0].path).unwrap(), before);
}

#[test]
fn restore_brings_back_previous_file() {
    let home = TestHome::new();
    let manager = manager(&home);
    configure(&manager, "a", "python");
    let original = home.read(".cursor/mcp.json");
    configure(&manager, "b", "node");
    let id = manager.list_backups("cursor").unwrap()[0].id.clone();

    assert!(manager.restore_backup("cursor", &id).unwrap());

    assert_eq!(home.read(".cursor/mcp.json"), original);
    assert!(!manager.list_servers("cursor").unwrap().contains("b"));
}

#[test]
fn restore_of_missing_backup_returns_false() {
    let home = TestHome::new();
    let manager = manager(&home);

    assert!(!manager.restore_backup("cursor", "mcp.json.cursor.20200101_000000_000000").unwrap());
}

#[test]
fn restore_rejects_path_like_ids() {
    let home = TestHome::new();
    let manager = manager(&home);

    let err = manager.restore_backup("cursor", "../mcp.json").unwrap_err();

    assert!(matches!(
        err,
        Error::Fs(hostcfg_fs::Error::InvalidBackupId { .. })
    ));
}

#[test]
fn prune_keeps_newest() {
    let home = TestHome::new();
    let manager = manager(&home);
    for (i, command) in ["a", "b", "c", "d"].iter().enumerate() {
        configure(&manager, &format!("s{i}"), command);
    }
    let backups = manager.list_backups("cursor").unwrap();
    assert_eq!(backups.len(), 3);

    let removed = manager
        .prune_backups("cursor", PrunePolicy::KeepLatest(1))
        .unwrap();

    assert_eq!(removed.len(), 2);
    assert_eq!(manager.list_backups("cursor").unwrap(), vec![backups[0].clone()]);
    assert!(
        manager
            .prune_backups("cursor", PrunePolicy::OlderThanDays(1))
            .unwrap()
            .is_empty()
    );
}

#[test]
fn remove_server_reports_dropped_fields() {
    let home = TestHome::new();
    let manager = manager(&home);
    manager
        .configure(
            &McpServerConfig::stdio("a", "python", vec!["a.py".into()]),
            "cursor",
            WriteOptions::default(),
        )
        .unwrap();
    configure(&manager, "b", "node");

    let result = manager.remove_server("a", "cursor", false).unwrap();

    assert!(result.success);
    assert!(result.backup.is_some());
    assert_eq!(result.count(FieldChange::Updated), 2);
    assert!(result.operations.iter().all(|op| op.new_value.is_none()));
    assert_eq!(
        home.read_json(".cursor/mcp.json"),
        json!({"mcpServers": {"b": {"command": "node"}}})
    );
}

#[test]
fn configure_replaces_entry_and_reports_diff() {
    let home = TestHome::new();
    let manager = manager(&home);
    configure(&manager, "a", "python");

    let result = manager
        .configure(
            &McpServerConfig::stdio("a", "python", vec!["v2.py".into()]),
            "cursor",
            WriteOptions::default(),
        )
        .unwrap();

    let changes: Vec<(&str, FieldChange)> = result
        .operations
        .iter()
        .map(|op| (op.field.as_str(), op.change))
        .collect();
    assert_eq!(
        changes,
        vec![("command", FieldChange::Unchanged), ("args", FieldChange::Updated)]
    );
}

#[test]
fn detection_follows_marker_directories() {
    let home = TestHome::new();
    let manager = manager(&home);
    assert!(manager.detect_available_hosts().is_empty());

    home.create_dir(".claude");
    home.create_dir(".gemini");

    assert_eq!(
        manager.detect_available_hosts(),
        vec![HostType::ClaudeCode, HostType::Gemini]
    );
    assert!(manager.is_host_available("gemini"));
    assert!(!manager.is_host_available("kiro"));
}

#[test]
fn settings_choose_backup_root() {
    let home = TestHome::new();
    let settings = Settings {
        backup_dir: Some(home.root().join("custom-backups")),
        ..Settings::default()
    };
    let manager = HostConfigManager::from_settings(&home.home(), &settings);

    configure(&manager, "a", "python");
    configure(&manager, "b", "node");

    assert_eq!(
        std::fs::read_dir(home.root().join("custom-backups/cursor"))
            .unwrap()
            .count(),
        1
    );
}
