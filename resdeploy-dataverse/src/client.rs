//! Authenticated Dataverse Web API client.

use serde::Deserialize;

use resdeploy_core::error::RemoteError;
use resdeploy_core::remote::{BatchOutcome, UpsertTask, WebResourceStore};
use resdeploy_core::types::{QualifiedName, RemoteRecord, ResourceId};

use crate::{auth, batch, odata};

/// Web API version the client speaks.
const API_VERSION: &str = "v9.2";

/// An authenticated session against one Dataverse environment.
///
/// Owns the HTTP agent and bearer token for the duration of a run; dropping
/// the client releases the session on every exit path.
pub struct DataverseClient {
    agent: ureq::Agent,
    api_root: String,
    token: String,
    batch_seq: u32,
}

impl DataverseClient {
    /// Establish an authenticated session against the `crm` environment.
    pub fn connect(crm: &str, client_id: &str, client_secret: &str) -> Result<Self, RemoteError> {
        let agent = ureq::AgentBuilder::new().build();
        let api_root = format!("{}/api/data/{API_VERSION}", crm.trim_end_matches('/'));

        let token_endpoint = auth::discover_token_endpoint(&agent, &api_root)?;
        tracing::debug!("token endpoint: {token_endpoint}");
        let token = auth::request_token(&agent, &token_endpoint, crm, client_id, client_secret)?;
        tracing::debug!("session established for {crm}");

        Ok(Self {
            agent,
            api_root,
            token,
            batch_seq: 0,
        })
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    value: Vec<QueryRow>,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    webresourceid: String,
    name: String,
}

impl WebResourceStore for DataverseClient {
    fn query_by_names(
        &mut self,
        names: &[QualifiedName],
    ) -> Result<Vec<RemoteRecord>, RemoteError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let response = self
            .agent
            .get(&format!("{}/webresourceset", self.api_root))
            .set("Authorization", &self.bearer())
            .set("OData-Version", "4.0")
            .set("Accept", "application/json")
            .query("$select", "webresourceid,name")
            .query("$filter", &odata::name_filter(names))
            .call()
            .map_err(call_error)?;
        let parsed: QueryResponse = response
            .into_json()
            .map_err(|e| RemoteError::Response(format!("query response: {e}")))?;
        Ok(parsed
            .value
            .into_iter()
            .map(|row| RemoteRecord {
                id: ResourceId(row.webresourceid),
                name: row.name,
            })
            .collect())
    }

    fn execute_batch(&mut self, tasks: &[UpsertTask]) -> Result<Vec<BatchOutcome>, RemoteError> {
        // An empty multipart batch is rejected by the platform; answer the
        // empty plan locally.
        if tasks.is_empty() {
            return Ok(Vec::new());
        }

        self.batch_seq += 1;
        let boundary = format!("batch_resdeploy_{}", self.batch_seq);
        let body = batch::build_body(&boundary, &self.api_root, tasks);
        tracing::debug!("posting batch of {} tasks", tasks.len());

        let response = self
            .agent
            .post(&format!("{}/$batch", self.api_root))
            .set("Authorization", &self.bearer())
            .set("OData-Version", "4.0")
            .set("Accept", "application/json")
            .set("Prefer", "odata.continue-on-error")
            .set("Content-Type", &format!("multipart/mixed; boundary={boundary}"))
            .send_string(&body)
            .map_err(call_error)?;

        let content_type = response.header("Content-Type").unwrap_or_default().to_string();
        let response_body = response
            .into_string()
            .map_err(|e| RemoteError::Response(format!("batch response: {e}")))?;
        let response_boundary = batch::response_boundary(&content_type)?;
        batch::parse_response(&response_body, &response_boundary, tasks.len())
    }

    fn publish(&mut self, ids: &[ResourceId]) -> Result<(), RemoteError> {
        tracing::debug!("publishing {} records", ids.len());
        self.agent
            .post(&format!("{}/PublishXml", self.api_root))
            .set("Authorization", &self.bearer())
            .set("OData-Version", "4.0")
            .set("Accept", "application/json")
            .send_json(serde_json::json!({ "ParameterXml": publish_parameter_xml(ids) }))
            .map_err(call_error)?;
        Ok(())
    }
}

/// `<importexportxml>` payload listing every identifier to publish.
fn publish_parameter_xml(ids: &[ResourceId]) -> String {
    let items: String = ids
        .iter()
        .map(|id| format!("<webresource>{{{id}}}</webresource>"))
        .collect();
    format!("<importexportxml><webresources>{items}</webresources></importexportxml>")
}

fn call_error(err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => RemoteError::Api {
            status,
            message: response.into_string().unwrap_or_default(),
        },
        other => RemoteError::Transport(other.to_string()),
    }
}
