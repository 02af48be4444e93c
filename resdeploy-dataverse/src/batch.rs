//! `$batch` assembly and response parsing for web-resource upserts.
//!
//! Each task travels as an independent part (no changeset): a sibling's
//! failure must not roll back the rest, matching the continue-on-error
//! execution the engine expects.

use resdeploy_core::error::RemoteError;
use resdeploy_core::remote::{BatchOutcome, UpsertTask};
use resdeploy_core::types::ResourceType;

/// Option-set code the platform uses for each web-resource content type.
pub(crate) fn type_code(resource_type: ResourceType) -> u8 {
    match resource_type {
        ResourceType::Html => 1,
        ResourceType::Css => 2,
        ResourceType::Js => 3,
    }
}

/// Assemble the multipart request body for `tasks`.
///
/// `api_root` is the absolute Web API root (`…/api/data/v9.2`); parts carry
/// absolute request URIs so the body can be posted to `<api_root>/$batch`
/// verbatim. Updates PATCH the addressed record, creates POST the entity
/// set.
pub(crate) fn build_body(boundary: &str, api_root: &str, tasks: &[UpsertTask]) -> String {
    let mut body = String::new();
    for task in tasks {
        body.push_str(&format!("--{boundary}\r\n"));
        body.push_str("Content-Type: application/http\r\n");
        body.push_str("Content-Transfer-Encoding: binary\r\n\r\n");
        match &task.target {
            Some(id) => {
                body.push_str(&format!("PATCH {api_root}/webresourceset({id}) HTTP/1.1\r\n"));
            }
            None => {
                body.push_str(&format!("POST {api_root}/webresourceset HTTP/1.1\r\n"));
            }
        }
        body.push_str("Content-Type: application/json; charset=utf-8\r\n\r\n");
        body.push_str(&payload(task).to_string());
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

fn payload(task: &UpsertTask) -> serde_json::Value {
    serde_json::json!({
        "name": task.qualified_name.0,
        "displayname": task.display_name,
        "webresourcetype": type_code(task.resource_type),
        "content": task.content_base64,
    })
}

/// Extract the part boundary from a batch response `Content-Type`.
pub(crate) fn response_boundary(content_type: &str) -> Result<String, RemoteError> {
    content_type
        .split(';')
        .map(str::trim)
        .filter_map(|param| param.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_string())
        .next()
        .ok_or_else(|| {
            RemoteError::Response(format!("no boundary in content type: {content_type}"))
        })
}

/// Parse one [`BatchOutcome`] per part, in part order.
///
/// `expected` guards against the platform answering with a different part
/// count than tasks submitted; outcomes map to tasks positionally.
pub(crate) fn parse_response(
    body: &str,
    boundary: &str,
    expected: usize,
) -> Result<Vec<BatchOutcome>, RemoteError> {
    let delimiter = format!("--{boundary}");
    let mut outcomes = Vec::new();
    for part in body.split(delimiter.as_str()).skip(1) {
        if part.starts_with("--") {
            break;
        }
        outcomes.push(parse_part(part)?);
    }
    if outcomes.len() != expected {
        return Err(RemoteError::Response(format!(
            "batch answered {} parts for {} tasks",
            outcomes.len(),
            expected
        )));
    }
    Ok(outcomes)
}

fn parse_part(part: &str) -> Result<BatchOutcome, RemoteError> {
    let status_line = part
        .lines()
        .find(|line| line.starts_with("HTTP/1.1"))
        .ok_or_else(|| RemoteError::Response("batch part without a status line".to_string()))?;
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .ok_or_else(|| RemoteError::Response(format!("unparsable status line: {status_line}")))?;

    if (200..300).contains(&status) {
        Ok(BatchOutcome::Applied)
    } else {
        Ok(BatchOutcome::Failed {
            message: failure_message(part, status),
        })
    }
}

/// Pull the platform's error description out of a failed part, falling back
/// to the bare status code.
fn failure_message(part: &str, status: u16) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(serde::Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    part.find('{')
        .and_then(|start| serde_json::from_str::<ErrorBody>(&part[start..]).ok())
        .map(|body| body.error.message)
        .unwrap_or_else(|| format!("HTTP {status}"))
}
