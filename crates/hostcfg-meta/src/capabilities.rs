//! Per-host capability descriptors.
//!
//! The registry is a static table: one [`HostCapabilities`] per
//! [`HostType`], built once and never mutated. Cross-host equivalences are
//! declared per ordered host pair and consulted only during sync.

use crate::fields::{self, union};
use crate::record::{FieldMap, McpServerConfig};
use crate::{HostType, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

/// What one host accepts and how it names things.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostCapabilities {
    pub host: HostType,
    pub supported_fields: BTreeSet<&'static str>,
    pub excluded_fields: BTreeSet<&'static str>,
    /// Unified name → host-native name.
    pub field_mappings: BTreeMap<&'static str, &'static str>,
    pub type_discriminator: bool,
    /// Mutually exclusive transport keys.
    pub transport_fields: &'static [&'static str],
}

impl HostCapabilities {
    fn new(host: HostType, supported: BTreeSet<&'static str>) -> Self {
        Self {
            host,
            type_discriminator: supported.contains(fields::TYPE),
            supported_fields: supported,
            excluded_fields: union(&[fields::EXCLUDED_ALWAYS]),
            field_mappings: BTreeMap::new(),
            transport_fields: fields::TRANSPORTS,
        }
    }

    fn with_mappings(mut self, mappings: &[(&'static str, &'static str)]) -> Self {
        self.field_mappings = mappings.iter().copied().collect();
        self
    }

    fn with_transports(mut self, transports: &'static [&'static str]) -> Self {
        self.transport_fields = transports;
        self
    }

    pub fn supports(&self, field: &str) -> bool {
        self.supported_fields.contains(field) && !self.excluded_fields.contains(field)
    }

    /// Host-native name for a unified field name.
    pub fn native_name<'a>(&self, field: &'a str) -> &'a str {
        self.field_mappings.get(field).copied().unwrap_or(field)
    }

    /// Unified name for a host-native field name.
    pub fn unified_name<'a>(&self, native: &'a str) -> &'a str {
        self.field_mappings
            .iter()
            .find(|(_, n)| **n == native)
            .map(|(unified, _)| *unified)
            .unwrap_or(native)
    }

    /// Rename unified keys to host-native keys.
    pub fn to_native(&self, map: FieldMap) -> FieldMap {
        map.into_iter()
            .map(|(k, v)| (self.native_name(&k).to_string(), v))
            .collect()
    }

    /// Rename host-native keys back to unified keys.
    pub fn from_native(&self, map: FieldMap) -> FieldMap {
        map.into_iter()
            .map(|(k, v)| (self.unified_name(&k).to_string(), v))
            .collect()
    }
}

/// Field renames applied when syncing from one host to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEquivalence {
    pub source: HostType,
    pub target: HostType,
    /// Source field → target field.
    pub fields: BTreeMap<&'static str, &'static str>,
}

/// Lookup table of every host's capabilities.
#[derive(Debug)]
pub struct CapabilityRegistry {
    hosts: [HostCapabilities; HostType::ALL.len()],
    equivalences: BTreeMap<(HostType, HostType), FieldEquivalence>,
}

fn describe(host: HostType) -> HostCapabilities {
    use fields::*;

    match host {
        HostType::ClaudeDesktop | HostType::ClaudeCode | HostType::LmStudio => {
            HostCapabilities::new(host, union(&[UNIVERSAL, TYPE_DISCRIMINATOR]))
        }
        HostType::VsCode => {
            HostCapabilities::new(host, union(&[UNIVERSAL, TYPE_DISCRIMINATOR, VSCODE_EXTRA]))
        }
        HostType::Cursor => {
            HostCapabilities::new(host, union(&[UNIVERSAL, TYPE_DISCRIMINATOR, CURSOR_EXTRA]))
        }
        HostType::Gemini => HostCapabilities::new(host, union(&[UNIVERSAL, GEMINI_EXTRA]))
            .with_transports(TRANSPORTS_WITH_HTTP_URL),
        HostType::Kiro => HostCapabilities::new(host, union(&[UNIVERSAL, KIRO_EXTRA])),
        HostType::Codex => HostCapabilities::new(host, union(&[UNIVERSAL, CODEX_EXTRA]))
            .with_mappings(&[
                (ARGS, "arguments"),
                (HEADERS, "http_headers"),
                (INCLUDE_TOOLS, "enabled_tools"),
                (EXCLUDE_TOOLS, "disabled_tools"),
            ]),
    }
}

const EQUIVALENCES: &[(HostType, HostType, &[(&str, &str)])] = &[
    (HostType::Kiro, HostType::Gemini, &[(fields::DISABLED_TOOLS, fields::EXCLUDE_TOOLS)]),
    (HostType::Kiro, HostType::Codex, &[(fields::DISABLED_TOOLS, fields::EXCLUDE_TOOLS)]),
    (HostType::Gemini, HostType::Kiro, &[(fields::EXCLUDE_TOOLS, fields::DISABLED_TOOLS)]),
    (HostType::Codex, HostType::Kiro, &[(fields::EXCLUDE_TOOLS, fields::DISABLED_TOOLS)]),
];

impl CapabilityRegistry {
    /// The built-in table.
    pub fn builtin() -> Self {
        let equivalences = EQUIVALENCES
            .iter()
            .map(|(source, target, pairs)| {
                let equivalence = FieldEquivalence {
                    source: *source,
                    target: *target,
                    fields: pairs.iter().copied().collect(),
                };
                ((*source, *target), equivalence)
            })
            .collect();

        Self {
            hosts: HostType::ALL.map(describe),
            equivalences,
        }
    }

    /// Process-wide instance, built on first use.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<CapabilityRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::builtin)
    }

    pub fn for_host(&self, host: HostType) -> &HostCapabilities {
        &self.hosts[host.index()]
    }

    /// Descriptor by string id.
    pub fn get(&self, host_id: &str) -> Result<&HostCapabilities> {
        Ok(self.for_host(host_id.parse()?))
    }

    pub fn supported_fields(&self, host_id: &str) -> Result<&BTreeSet<&'static str>> {
        Ok(&self.get(host_id)?.supported_fields)
    }

    pub fn excluded_fields(&self, host_id: &str) -> Result<&BTreeSet<&'static str>> {
        Ok(&self.get(host_id)?.excluded_fields)
    }

    pub fn field_mapping(&self, host_id: &str) -> Result<&BTreeMap<&'static str, &'static str>> {
        Ok(&self.get(host_id)?.field_mappings)
    }

    /// Equivalence declared for `source → target`, if any.
    pub fn cross_equivalence(
        &self,
        source_id: &str,
        target_id: &str,
    ) -> Result<Option<&FieldEquivalence>> {
        let source: HostType = source_id.parse()?;
        let target: HostType = target_id.parse()?;
        Ok(self.equivalences.get(&(source, target)))
    }

    /// Rename equivalent fields of a record read from `source` so that
    /// `target` recognizes them. A value already set under the target name
    /// wins over the remapped one.
    pub fn remap_for_target(
        &self,
        source: HostType,
        target: HostType,
        config: &McpServerConfig,
    ) -> McpServerConfig {
        let Some(equivalence) = self.equivalences.get(&(source, target)) else {
            return config.clone();
        };

        let mut map = config.to_field_map();
        for (from, to) in &equivalence.fields {
            if let Some(value) = map.remove(*from)
                && !map.contains_key(*to)
            {
                map.insert((*to).to_string(), value);
            }
        }
        McpServerConfig::from_field_map_lossless(config.name.clone(), map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn registry() -> &'static CapabilityRegistry {
        CapabilityRegistry::global()
    }

    #[test]
    fn every_host_has_a_descriptor() {
        for host in HostType::ALL {
            assert_eq!(registry().for_host(host).host, host);
        }
    }

    #[rstest]
    #[case("claude-desktop", "claude-code")]
    #[case("claude-code", "lmstudio")]
    #[case("claude-desktop", "cursor")]
    #[case("cursor", "vscode")]
    fn field_sets_nest(#[case] smaller: &str, #[case] larger: &str) {
        let small = registry().supported_fields(smaller).unwrap();
        let large = registry().supported_fields(larger).unwrap();
        assert!(small.is_subset(large), "{smaller} ⊄ {larger}");
    }

    #[rstest]
    #[case("claude-desktop", true)]
    #[case("vscode", true)]
    #[case("cursor", true)]
    #[case("lmstudio", true)]
    #[case("gemini", false)]
    #[case("kiro", false)]
    #[case("codex", false)]
    fn type_discriminator_support(#[case] host: &str, #[case] expected: bool) {
        assert_eq!(registry().get(host).unwrap().type_discriminator, expected);
    }

    #[test]
    fn universal_fields_everywhere_name_nowhere() {
        for host in HostType::ALL {
            let caps = registry().for_host(host);
            for field in fields::UNIVERSAL {
                assert!(caps.supports(field), "{host} lacks {field}");
            }
            assert!(!caps.supports(fields::NAME));
        }
    }

    #[test]
    fn only_gemini_has_http_url() {
        for host in HostType::ALL {
            let caps = registry().for_host(host);
            assert_eq!(caps.supports(fields::HTTP_URL), host == HostType::Gemini);
        }
    }

    #[test]
    fn codex_mappings_are_reversible() {
        let caps = registry().get("codex").unwrap();
        assert_eq!(caps.native_name("args"), "arguments");
        assert_eq!(caps.unified_name("arguments"), "args");
        assert_eq!(caps.native_name("command"), "command");
        assert_eq!(caps.unified_name("disabled_tools"), "excludeTools");
    }

    #[test]
    fn unknown_host_lookup_fails() {
        assert!(matches!(
            registry().supported_fields("emacs"),
            Err(crate::Error::UnknownHost { .. })
        ));
        assert!(registry().cross_equivalence("kiro", "emacs").is_err());
    }

    #[test]
    fn equivalence_is_per_ordered_pair() {
        assert!(registry().cross_equivalence("kiro", "gemini").unwrap().is_some());
        assert!(registry().cross_equivalence("kiro", "cursor").unwrap().is_none());
    }

    #[test]
    fn remap_moves_disabled_tools_to_exclude_tools() {
        let config = McpServerConfig {
            name: "fs".into(),
            command: Some("npx".into()),
            disabled_tools: Some(vec!["delete".into()]),
            ..Default::default()
        };

        let remapped = registry().remap_for_target(HostType::Kiro, HostType::Gemini, &config);

        assert_eq!(remapped.name, "fs");
        assert_eq!(remapped.disabled_tools, None);
        assert_eq!(remapped.exclude_tools, Some(vec!["delete".to_string()]));
    }

    #[test]
    fn remap_without_equivalence_is_identity() {
        let config = McpServerConfig {
            disabled_tools: Some(vec!["x".into()]),
            ..McpServerConfig::stdio("s", "node", vec![])
        };
        let remapped = registry().remap_for_target(HostType::Kiro, HostType::Cursor, &config);
        assert_eq!(remapped, config);
    }
}
