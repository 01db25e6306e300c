//! The `context()` snapshot: run metadata plus the decoded event payload.

use std::fs;
use std::io;
use std::path::PathBuf;

use gha_value::Value;
use gha_workflow::{ContextRecord, Host};
use tracing::debug;

use crate::marshal::{decode, json_kind, marshal};
use crate::{ActionError, EventError};

/// Build the frozen `context` struct.
pub(crate) fn context_snapshot(host: &dyn Host) -> Result<Value, ActionError> {
    let record = host.read_context()?;
    let event = read_event(&record.event_path)?;
    let snapshot = build_snapshot(&record, event);
    snapshot.freeze();
    Ok(snapshot)
}

/// Decode the event file ourselves rather than trusting a pre-decoded
/// payload, so integers keep full precision. No path, or a path that does not
/// exist, means no event.
pub(crate) fn read_event(path: &str) -> Result<Value, EventError> {
    if path.is_empty() {
        debug!("no event path");
        return Ok(Value::None);
    }
    let path = PathBuf::from(path);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "event file does not exist");
            return Ok(Value::None);
        }
        Err(source) => return Err(EventError::Read { path, source }),
    };
    let json = match decode(&bytes) {
        Ok(json) => json,
        Err(source) => return Err(EventError::Decode { path, source }),
    };
    if !json.is_object() {
        return Err(EventError::NotAnObject {
            found: json_kind(&json),
            path,
        });
    }
    debug!(path = %path.display(), bytes = bytes.len(), "decoded event");
    Ok(marshal(&json)?)
}

fn build_snapshot(record: &ContextRecord, event: Value) -> Value {
    let s = |value: &str| Value::string(value);
    let fields = [
        ("action", s(&record.action)),
        ("action_path", s(&record.action_path)),
        ("action_repository", s(&record.action_repository)),
        ("actions", Value::Bool(record.actions)),
        ("actor", s(&record.actor)),
        ("actor_id", s(&record.actor_id)),
        ("api_url", s(&record.api_url)),
        ("base_ref", s(&record.base_ref)),
        ("env", s(&record.env)),
        ("event", event),
        ("event_name", s(&record.event_name)),
        ("event_path", s(&record.event_path)),
        ("graphql_url", s(&record.graphql_url)),
        ("head_ref", s(&record.head_ref)),
        ("job", s(&record.job)),
        ("path", s(&record.path)),
        ("ref", s(&record.ref_)),
        ("ref_name", s(&record.ref_name)),
        ("ref_protected", Value::Bool(record.ref_protected)),
        ("ref_type", s(&record.ref_type)),
        ("repository", s(&record.repository)),
        ("repository_owner", s(&record.repository_owner)),
        ("retention_days", Value::int(record.retention_days)),
        ("run_attempt", Value::int(record.run_attempt)),
        ("run_id", Value::int(record.run_id)),
        ("run_number", Value::int(record.run_number)),
        ("server_url", s(&record.server_url)),
        ("sha", s(&record.sha)),
        ("step_summary", s(&record.step_summary)),
        ("triggering_actor", s(&record.triggering_actor)),
        ("workflow", s(&record.workflow)),
        ("workspace", s(&record.workspace)),
    ];
    Value::structure(
        "context",
        fields
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    )
}
