//! Property tests over randomly generated server records.

use hostcfg_core::{FieldChange, HostConfigManager, SyncRequest, SyncSource};
use hostcfg_hosts::{HostContext, Platform};
use hostcfg_meta::{HostType, McpServerConfig};
use hostcfg_test_utils::TestHome;
use proptest::prelude::*;
use std::collections::BTreeMap;

fn arb_server() -> impl Strategy<Value = McpServerConfig> {
    (
        "[a-z][a-z0-9-]{0,10}",
        prop_oneof![
            "[a-z]{1,8}".prop_map(|c| (Some(c), None)),
            "[a-z]{1,8}".prop_map(|h| (None, Some(format!("https://{h}.example.com/mcp")))),
        ],
        proptest::collection::vec("[a-zA-Z0-9._-]{1,12}", 0..4),
        proptest::collection::btree_map("[A-Z][A-Z_]{0,7}", "[ -~]{0,16}", 0..3),
    )
        .prop_map(|(name, (command, url), args, env)| McpServerConfig {
            name,
            args: (command.is_some() && !args.is_empty()).then_some(args),
            env: (!env.is_empty()).then_some(env),
            command,
            url,
            ..Default::default()
        })
}

fn arb_servers() -> impl Strategy<Value = Vec<McpServerConfig>> {
    proptest::collection::vec(arb_server(), 1..4).prop_map(|servers| {
        // Unique names; later duplicates would overwrite earlier ones.
        let unique: BTreeMap<String, McpServerConfig> =
            servers.into_iter().map(|s| (s.name.clone(), s)).collect();
        unique.into_values().collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn sync_round_trips_and_is_idempotent(servers in arb_servers()) {
        let home = TestHome::new();
        let manager = HostConfigManager::new(
            HostContext::new(home.home(), home.backups()).with_platform(Platform::Linux),
        );
        let targets: Vec<&str> = HostType::ALL.iter().map(|h| h.as_str()).collect();
        let request = SyncRequest::new(SyncSource::environment("prop", servers.clone()), targets);

        let first = manager.sync(&request).unwrap();
        prop_assert!(first.is_success());

        for host in HostType::ALL {
            let listed = manager.list_servers(host.as_str()).unwrap();
            for server in &servers {
                prop_assert_eq!(listed.get(&server.name), Some(server), "{}", host);
            }
        }

        let second = manager.sync(&request).unwrap();
        prop_assert!(second.is_success());
        for result in &second.results {
            prop_assert!(result.operations.iter().all(|op| op.change == FieldChange::Unchanged));
            prop_assert!(result.backup.is_none());
        }
    }
}
