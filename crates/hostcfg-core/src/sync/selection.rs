use crate::Result;
use hostcfg_meta::McpServerConfig;
use regex::Regex;
use std::collections::BTreeSet;

/// Where the servers to sync come from.
#[derive(Debug, Clone)]
pub enum SyncSource {
    /// Servers defined outside any host file.
    Environment {
        name: String,
        servers: Vec<McpServerConfig>,
    },
    /// Servers currently configured on a host, by host id.
    Host(String),
}

impl SyncSource {
    pub fn environment(name: impl Into<String>, servers: Vec<McpServerConfig>) -> Self {
        Self::Environment {
            name: name.into(),
            servers,
        }
    }

    pub fn host(host_id: impl Into<String>) -> Self {
        Self::Host(host_id.into())
    }

    /// Environment name or host id.
    pub fn label(&self) -> &str {
        match self {
            SyncSource::Environment { name, .. } => name,
            SyncSource::Host(id) => id,
        }
    }
}

/// Which source servers take part.
#[derive(Debug, Clone, Default)]
pub enum ServerSelection {
    #[default]
    All,
    Names(BTreeSet<String>),
    /// Servers whose name matches anywhere in the pattern.
    Pattern(Regex),
}

impl ServerSelection {
    pub fn names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Names(names.into_iter().map(Into::into).collect())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Self::Pattern(Regex::new(pattern)?))
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            ServerSelection::All => true,
            ServerSelection::Names(names) => names.contains(name),
            ServerSelection::Pattern(re) => re.is_match(name),
        }
    }
}

/// One sync run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub source: SyncSource,
    /// Target host ids, processed in this order.
    pub targets: Vec<String>,
    pub selection: ServerSelection,
    pub dry_run: bool,
    pub skip_backup: bool,
}

impl SyncRequest {
    pub fn new<I, S>(source: SyncSource, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source,
            targets: targets.into_iter().map(Into::into).collect(),
            selection: ServerSelection::All,
            dry_run: false,
            skip_backup: false,
        }
    }

    pub fn with_selection(mut self, selection: ServerSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn skip_backup(mut self, skip_backup: bool) -> Self {
        self.skip_backup = skip_backup;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("github", true)]
    #[case("gitlab", true)]
    #[case("docs", false)]
    fn pattern_selection(#[case] name: &str, #[case] expected: bool) {
        let selection = ServerSelection::pattern("^git").unwrap();
        assert_eq!(selection.matches(name), expected);
    }

    #[test]
    fn names_selection() {
        let selection = ServerSelection::names(["a", "b"]);
        assert!(selection.matches("a"));
        assert!(!selection.matches("c"));
        assert!(ServerSelection::All.matches("anything"));
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        assert!(matches!(
            ServerSelection::pattern("(unclosed"),
            Err(crate::Error::Regex(_))
        ));
    }

    #[test]
    fn request_defaults() {
        let request = SyncRequest::new(SyncSource::host("kiro"), ["cursor", "codex"]);
        assert_eq!(request.source.label(), "kiro");
        assert_eq!(request.targets, vec!["cursor", "codex"]);
        assert!(!request.dry_run);
        assert!(!request.skip_backup);
    }
}
