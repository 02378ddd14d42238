//! HTTP implementation of [`PmsApi`].

use std::sync::Arc;

use pms_admin_core::{Email, Identifier, TreeNode};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, error, instrument, warn};
use url::Url;

use super::message::extract_error_message;
use super::types::{DeleteMultipleRequest, DeleteWithReporteesRequest, DeletionReport};
use super::{Operation, PmsApi, PmsError};
use crate::config::AdminConfig;

const HIERARCHY_PATH: &str = "/pms/users/vi_user_hierarchy.json";
const DELETE_WITH_REPORTEES_PATH: &str = "/pms/users/delete_user_with_reportees.json";
const DELETE_MULTIPLE_PATH: &str = "/pms/users/delete_multiple_vi_external_users.json";

/// PMS backend client.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct PmsClient {
    inner: Arc<PmsClientInner>,
}

struct PmsClientInner {
    client: reqwest::Client,
    config: AdminConfig,
}

impl std::fmt::Debug for PmsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PmsClient")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("employee_type", &self.inner.config.employee_type)
            .finish_non_exhaustive()
    }
}

impl PmsClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &AdminConfig) -> Result<Self, PmsError> {
        let mut headers = HeaderMap::new();

        let mut auth = HeaderValue::from_str(&config.auth_header())
            .map_err(|e| PmsError::Parse(format!("Invalid API token format: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(PmsClientInner {
                client,
                config: config.clone(),
            }),
        })
    }

    /// Configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Hierarchy lookup URL. The query key is `email` for both emails and
    /// mobile numbers.
    ///
    /// # Errors
    ///
    /// Returns error if the endpoint URL cannot be built.
    pub fn hierarchy_url(&self, identifier: &Identifier) -> Result<Url, PmsError> {
        let mut url = self.inner.config.endpoint(HIERARCHY_PATH)?;
        url.query_pairs_mut()
            .append_pair("email", identifier.as_str())
            .append_pair("employee_type", &self.inner.config.employee_type);
        Ok(url)
    }

    async fn post<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        operation: Operation,
    ) -> Result<Value, PmsError> {
        let url = self.inner.config.endpoint(path)?;
        let response = self.inner.client.post(url).json(body).send().await?;
        handle_response(response, operation).await
    }
}

/// Parse a 2xx body as JSON, or turn anything else into [`PmsError::Api`].
async fn handle_response(
    response: reqwest::Response,
    operation: Operation,
) -> Result<Value, PmsError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&body)
            .map_err(|e| PmsError::Parse(format!("Failed to parse response: {e}")));
    }

    let message = extract_error_message(&body, operation.fallback());
    error!(
        status = status.as_u16(),
        operation = %operation,
        message = %message,
        "PMS API error"
    );

    Err(PmsError::Api {
        status: status.as_u16(),
        message,
    })
}

impl PmsApi for PmsClient {
    #[instrument(skip(self), fields(identifier = %identifier, kind = %identifier.kind()))]
    async fn fetch_hierarchy(&self, identifier: &Identifier) -> Result<Option<TreeNode>, PmsError> {
        let url = self.hierarchy_url(identifier)?;
        debug!(url = %url, "Fetching hierarchy");

        let response = self.inner.client.get(url).send().await?;
        let value = handle_response(response, Operation::FetchHierarchy).await?;

        let tree = TreeNode::from_value(&value);
        match &tree {
            Some(root) => debug!(total_nodes = root.total_nodes(), "Hierarchy fetched"),
            None => warn!("Hierarchy payload is not an object"),
        }
        Ok(tree)
    }

    #[instrument(skip(self), fields(email = %email))]
    async fn delete_user_with_reportees(&self, email: &Email) -> Result<DeletionReport, PmsError> {
        let body = DeleteWithReporteesRequest {
            email: email.as_str(),
        };
        let value = self
            .post(
                DELETE_WITH_REPORTEES_PATH,
                &body,
                Operation::DeleteHierarchy,
            )
            .await?;

        let report = DeletionReport::from_value(&value);
        debug!(summary = %report.summary(), "Hierarchy delete processed");
        Ok(report)
    }

    #[instrument(skip(self, identifiers), fields(count = identifiers.len()))]
    async fn delete_multiple_users(
        &self,
        identifiers: &[String],
    ) -> Result<DeletionReport, PmsError> {
        let body = DeleteMultipleRequest {
            users_email_mobile: identifiers,
        };
        let value = self
            .post(DELETE_MULTIPLE_PATH, &body, Operation::DeleteUsers)
            .await?;

        let report = DeletionReport::from_value(&value);
        debug!(summary = %report.summary(), "Bulk delete processed");
        Ok(report)
    }
}
