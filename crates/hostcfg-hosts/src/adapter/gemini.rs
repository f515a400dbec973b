//! Gemini CLI: three transports (`command`, `url`, `httpUrl`), no `type`,
//! and OAuth client settings.

use super::{McpAdapter, require_if_present, require_single_transport};
use hostcfg_meta::{FieldMap, HostType, Result, fields};

/// OAuth settings that only make sense once OAuth is switched on.
const OAUTH_CLIENT_FIELDS: &[&str] = &[
    fields::OAUTH_CLIENT_ID,
    fields::OAUTH_CLIENT_SECRET,
    fields::OAUTH_AUTHORIZATION_URL,
    fields::OAUTH_TOKEN_URL,
    fields::OAUTH_SCOPES,
    fields::OAUTH_REDIRECT_URI,
    fields::OAUTH_TOKEN_PARAM_NAME,
    fields::OAUTH_AUDIENCES,
];

#[derive(Debug, Clone, Copy, Default)]
pub struct GeminiAdapter;

impl McpAdapter for GeminiAdapter {
    fn host(&self) -> HostType {
        HostType::Gemini
    }

    fn validate_filtered(&self, filtered: &FieldMap) -> Result<()> {
        let host = self.host();
        require_single_transport(host, filtered)?;
        require_if_present(
            host,
            filtered,
            fields::OAUTH_CLIENT_SECRET,
            fields::OAUTH_CLIENT_ID,
        )?;
        for field in OAUTH_CLIENT_FIELDS {
            require_if_present(host, filtered, field, fields::OAUTH_ENABLED)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostcfg_meta::{Error, McpServerConfig, TransportType};

    #[test]
    fn http_url_counts_as_transport() {
        let config = McpServerConfig {
            name: "stream".into(),
            http_url: Some("https://example.com/mcp".into()),
            ..Default::default()
        };
        let out = GeminiAdapter.serialize(&config).unwrap();
        assert!(out.contains_key("httpUrl"));
    }

    #[test]
    fn url_and_http_url_conflict() {
        let config = McpServerConfig {
            http_url: Some("https://example.com/mcp".into()),
            ..McpServerConfig::remote("s", "https://example.com/sse")
        };
        assert!(matches!(
            GeminiAdapter.serialize(&config),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn type_is_dropped() {
        let config = McpServerConfig {
            transport_type: Some(TransportType::Stdio),
            ..McpServerConfig::stdio("s", "npx", vec![])
        };
        let out = GeminiAdapter.serialize(&config).unwrap();
        assert!(!out.contains_key("type"));
    }

    #[test]
    fn client_secret_requires_client_id() {
        let config = McpServerConfig {
            oauth_enabled: Some(true),
            oauth_client_secret: Some("s3cret".into()),
            ..McpServerConfig::remote("s", "https://example.com/sse")
        };
        let err = GeminiAdapter.serialize(&config).unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == "oauth_clientSecret"));
    }

    #[test]
    fn oauth_settings_require_oauth_enabled() {
        let config = McpServerConfig {
            oauth_client_id: Some("client".into()),
            ..McpServerConfig::remote("s", "https://example.com/sse")
        };
        assert!(GeminiAdapter.serialize(&config).is_err());
    }
}
