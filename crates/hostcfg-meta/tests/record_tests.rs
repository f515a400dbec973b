use hostcfg_meta::{CapabilityRegistry, HostType, McpServerConfig};
use proptest::prelude::*;
use serde_json::Value;

fn arb_record() -> impl Strategy<Value = McpServerConfig> {
    (
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(proptest::collection::vec("[a-z.]{1,8}", 1..3)),
        proptest::option::of(proptest::collection::vec("[a-z_]{1,8}", 1..3)),
        proptest::option::of(any::<bool>()),
        proptest::option::of(("[a-z]{1,6}", "[a-z]{0,6}")),
    )
        .prop_map(|(command, args, tools, disabled, extra)| {
            let mut record = McpServerConfig {
                name: "prop".into(),
                command,
                args,
                include_tools: tools.clone(),
                disabled_tools: tools,
                disabled,
                ..Default::default()
            };
            if let Some((key, value)) = extra {
                record.extra.insert(format!("x-{key}"), Value::String(value));
            }
            record
        })
}

proptest! {
    #[test]
    fn field_map_keeps_every_set_field(record in arb_record()) {
        let map = record.to_field_map();
        prop_assert!(map.values().all(|v| !v.is_null()));
        prop_assert_eq!(McpServerConfig::from_field_map("prop", map).unwrap(), record);
    }

    #[test]
    fn native_names_reverse_for_every_host(record in arb_record()) {
        let registry = CapabilityRegistry::global();
        for host in HostType::ALL {
            let caps = registry.for_host(host);
            let unified = record.to_field_map();
            prop_assert_eq!(caps.from_native(caps.to_native(unified.clone())), unified);
        }
    }
}

#[test]
fn kiro_to_gemini_renames_disabled_tools() {
    let record = McpServerConfig {
        disabled_tools: Some(vec!["rm".into()]),
        ..McpServerConfig::stdio("s", "npx", vec![])
    };

    let remapped =
        CapabilityRegistry::global().remap_for_target(HostType::Kiro, HostType::Gemini, &record);

    assert_eq!(remapped.exclude_tools, Some(vec!["rm".to_string()]));
    assert_eq!(remapped.disabled_tools, None);
}

#[test]
fn missing_equivalence_leaves_record_untouched() {
    let record = McpServerConfig {
        disabled_tools: Some(vec!["rm".into()]),
        ..McpServerConfig::stdio("s", "npx", vec![])
    };

    let remapped =
        CapabilityRegistry::global().remap_for_target(HostType::Kiro, HostType::Cursor, &record);

    assert_eq!(remapped, record);
}
