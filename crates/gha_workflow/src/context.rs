//! The run context: `GITHUB_*` variables set by the runner.

use crate::ContextError;

const DEFAULT_API_URL: &str = "https://api.github.com";
const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Scalar run metadata. The event payload is not decoded here; callers read
/// the file at `event_path` themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContextRecord {
    pub action: String,
    pub action_path: String,
    pub action_repository: String,
    pub actions: bool,
    pub actor: String,
    pub actor_id: String,
    pub api_url: String,
    pub base_ref: String,
    pub env: String,
    pub event_name: String,
    pub event_path: String,
    pub graphql_url: String,
    pub head_ref: String,
    pub job: String,
    pub path: String,
    pub ref_: String,
    pub ref_name: String,
    pub ref_protected: bool,
    pub ref_type: String,
    pub repository: String,
    pub repository_owner: String,
    pub retention_days: i64,
    pub run_attempt: i64,
    pub run_id: i64,
    pub run_number: i64,
    pub server_url: String,
    pub sha: String,
    pub step_summary: String,
    pub triggering_actor: String,
    pub workflow: String,
    pub workspace: String,
}

impl ContextRecord {
    /// Read the context through `getenv`. Unset and empty variables are the
    /// same; booleans and integers default to `false` and `0`.
    pub fn from_env(getenv: &dyn Fn(&str) -> Option<String>) -> Result<Self, ContextError> {
        let var = |name: &str| getenv(name).unwrap_or_default();
        let or_default = |name: &str, default: &str| {
            let value = var(name);
            if value.is_empty() {
                default.to_string()
            } else {
                value
            }
        };
        let boolean = |name: &'static str| parse_bool(name, &var(name));
        let int = |name: &'static str| parse_int(name, &var(name));

        Ok(ContextRecord {
            action: var("GITHUB_ACTION"),
            action_path: var("GITHUB_ACTION_PATH"),
            action_repository: var("GITHUB_ACTION_REPOSITORY"),
            actions: boolean("GITHUB_ACTIONS")?,
            actor: var("GITHUB_ACTOR"),
            actor_id: var("GITHUB_ACTOR_ID"),
            api_url: or_default("GITHUB_API_URL", DEFAULT_API_URL),
            base_ref: var("GITHUB_BASE_REF"),
            env: var("GITHUB_ENV"),
            event_name: var("GITHUB_EVENT_NAME"),
            event_path: var("GITHUB_EVENT_PATH"),
            graphql_url: or_default("GITHUB_GRAPHQL_URL", DEFAULT_GRAPHQL_URL),
            head_ref: var("GITHUB_HEAD_REF"),
            job: var("GITHUB_JOB"),
            path: var("GITHUB_PATH"),
            ref_: var("GITHUB_REF"),
            ref_name: var("GITHUB_REF_NAME"),
            ref_protected: boolean("GITHUB_REF_PROTECTED")?,
            ref_type: var("GITHUB_REF_TYPE"),
            repository: var("GITHUB_REPOSITORY"),
            repository_owner: var("GITHUB_REPOSITORY_OWNER"),
            retention_days: int("GITHUB_RETENTION_DAYS")?,
            run_attempt: int("GITHUB_RUN_ATTEMPT")?,
            run_id: int("GITHUB_RUN_ID")?,
            run_number: int("GITHUB_RUN_NUMBER")?,
            server_url: or_default("GITHUB_SERVER_URL", DEFAULT_SERVER_URL),
            sha: var("GITHUB_SHA"),
            step_summary: var("GITHUB_STEP_SUMMARY"),
            triggering_actor: var("GITHUB_TRIGGERING_ACTOR"),
            workflow: var("GITHUB_WORKFLOW"),
            workspace: var("GITHUB_WORKSPACE"),
        })
    }
}

fn parse_bool(variable: &'static str, value: &str) -> Result<bool, ContextError> {
    match value {
        "" | "0" | "f" | "F" | "false" | "False" | "FALSE" => Ok(false),
        "1" | "t" | "T" | "true" | "True" | "TRUE" => Ok(true),
        _ => Err(ContextError::InvalidBool {
            variable,
            value: value.to_string(),
        }),
    }
}

fn parse_int(variable: &'static str, value: &str) -> Result<i64, ContextError> {
    if value.is_empty() {
        return Ok(0);
    }
    value.parse().map_err(|_| ContextError::InvalidInt {
        variable,
        value: value.to_string(),
    })
}
