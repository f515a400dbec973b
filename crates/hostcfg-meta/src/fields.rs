//! Field names and per-host field sets.
//!
//! Every host's supported set is one union expression over the groups
//! below, so subset relationships between hosts hold by construction.

use std::collections::BTreeSet;

pub const NAME: &str = "name";

pub const COMMAND: &str = "command";
pub const ARGS: &str = "args";
pub const ENV: &str = "env";
pub const URL: &str = "url";
pub const HEADERS: &str = "headers";
pub const HTTP_URL: &str = "httpUrl";
pub const TYPE: &str = "type";

pub const ENV_FILE: &str = "envFile";
pub const INPUTS: &str = "inputs";

pub const TIMEOUT: &str = "timeout";
pub const TRUST: &str = "trust";
pub const CWD: &str = "cwd";
pub const INCLUDE_TOOLS: &str = "includeTools";
pub const EXCLUDE_TOOLS: &str = "excludeTools";
pub const OAUTH_ENABLED: &str = "oauth_enabled";
pub const OAUTH_CLIENT_ID: &str = "oauth_clientId";
pub const OAUTH_CLIENT_SECRET: &str = "oauth_clientSecret";
pub const OAUTH_AUTHORIZATION_URL: &str = "oauth_authorizationUrl";
pub const OAUTH_TOKEN_URL: &str = "oauth_tokenUrl";
pub const OAUTH_SCOPES: &str = "oauth_scopes";
pub const OAUTH_REDIRECT_URI: &str = "oauth_redirectUri";
pub const OAUTH_TOKEN_PARAM_NAME: &str = "oauth_tokenParamName";
pub const OAUTH_AUDIENCES: &str = "oauth_audiences";
pub const AUTH_PROVIDER_TYPE: &str = "authProviderType";

pub const DISABLED: &str = "disabled";
pub const AUTO_APPROVE: &str = "autoApprove";
pub const DISABLED_TOOLS: &str = "disabledTools";

pub const ENV_VARS: &str = "env_vars";
pub const STARTUP_TIMEOUT_SEC: &str = "startup_timeout_sec";
pub const TOOL_TIMEOUT_SEC: &str = "tool_timeout_sec";
pub const ENABLED: &str = "enabled";
pub const BEARER_TOKEN_ENV_VAR: &str = "bearer_token_env_var";
pub const ENV_HTTP_HEADERS: &str = "env_http_headers";

/// Accepted by every host.
pub const UNIVERSAL: &[&str] = &[COMMAND, ARGS, ENV, URL, HEADERS];

/// Never written to any host file.
pub const EXCLUDED_ALWAYS: &[&str] = &[NAME];

/// Hosts that carry a `type` discriminator.
pub const TYPE_DISCRIMINATOR: &[&str] = &[TYPE];

pub const CURSOR_EXTRA: &[&str] = &[ENV_FILE];

pub const VSCODE_EXTRA: &[&str] = &[ENV_FILE, INPUTS];

pub const GEMINI_EXTRA: &[&str] = &[
    HTTP_URL,
    TIMEOUT,
    TRUST,
    CWD,
    INCLUDE_TOOLS,
    EXCLUDE_TOOLS,
    OAUTH_ENABLED,
    OAUTH_CLIENT_ID,
    OAUTH_CLIENT_SECRET,
    OAUTH_AUTHORIZATION_URL,
    OAUTH_TOKEN_URL,
    OAUTH_SCOPES,
    OAUTH_REDIRECT_URI,
    OAUTH_TOKEN_PARAM_NAME,
    OAUTH_AUDIENCES,
    AUTH_PROVIDER_TYPE,
];

pub const KIRO_EXTRA: &[&str] = &[DISABLED, AUTO_APPROVE, DISABLED_TOOLS];

pub const CODEX_EXTRA: &[&str] = &[
    CWD,
    ENV_VARS,
    STARTUP_TIMEOUT_SEC,
    TOOL_TIMEOUT_SEC,
    ENABLED,
    INCLUDE_TOOLS,
    EXCLUDE_TOOLS,
    BEARER_TOKEN_ENV_VAR,
    ENV_HTTP_HEADERS,
];

/// Transport keys, exactly one of which must be present.
pub const TRANSPORTS: &[&str] = &[COMMAND, URL];

/// Transport keys for hosts with a streaming HTTP transport.
pub const TRANSPORTS_WITH_HTTP_URL: &[&str] = &[COMMAND, URL, HTTP_URL];

/// Union of field groups.
pub fn union(groups: &[&[&'static str]]) -> BTreeSet<&'static str> {
    groups.iter().flat_map(|g| g.iter().copied()).collect()
}
