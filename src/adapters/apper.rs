use crate::domain::model::{DeleteParams, Envelope, QueryParams, RecordParams};
use crate::domain::ports::{BackendClient, ConfigProvider};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use std::time::Duration;

pub const PROJECT_ID_HEADER: &str = "X-Apper-Project-Id";
pub const PUBLIC_KEY_HEADER: &str = "X-Apper-Public-Key";

/// HTTP implementation of [`BackendClient`] against the hosted table store.
///
/// Every verb is a JSON exchange under `/v1`:
/// - `POST   /v1/tables/{table}/query`              fetch records
/// - `POST   /v1/tables/{table}/records/{id}/query` fetch one record
/// - `POST   /v1/tables/{table}/records`            create (batch)
/// - `PATCH  /v1/tables/{table}/records`            update (batch)
/// - `DELETE /v1/tables/{table}/records`            delete (batch)
///
/// A non-2xx status with a decodable envelope body is a business rejection
/// and comes back as `success: false`; anything else is a transport error.
#[derive(Debug, Clone)]
pub struct ApperHttpClient {
    client: Client,
    base_url: String,
    project_id: String,
    public_key: String,
}

impl ApperHttpClient {
    pub fn new(
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            project_id: project_id.into(),
            public_key: public_key.into(),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            project_id: config.project_id().to_string(),
            public_key: config.public_key().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn exchange<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Envelope> {
        let url = self.endpoint(path);
        tracing::debug!(%url, method = %method, "apper request");

        let response = self
            .client
            .request(method, &url)
            .header(PROJECT_ID_HEADER, &self.project_id)
            .header(PUBLIC_KEY_HEADER, &self.public_key)
            .json(body)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "apper response");
        let envelope = response.json::<Envelope>().await?;
        Ok(envelope)
    }
}

#[async_trait]
impl BackendClient for ApperHttpClient {
    async fn fetch_records(&self, table: &str, params: &QueryParams) -> Result<Envelope> {
        self.exchange(Method::POST, &format!("tables/{}/query", table), params)
            .await
    }

    async fn get_record_by_id(
        &self,
        table: &str,
        id: i64,
        params: &QueryParams,
    ) -> Result<Envelope> {
        self.exchange(
            Method::POST,
            &format!("tables/{}/records/{}/query", table, id),
            params,
        )
        .await
    }

    async fn create_record(&self, table: &str, params: &RecordParams) -> Result<Envelope> {
        self.exchange(Method::POST, &format!("tables/{}/records", table), params)
            .await
    }

    async fn update_record(&self, table: &str, params: &RecordParams) -> Result<Envelope> {
        self.exchange(Method::PATCH, &format!("tables/{}/records", table), params)
            .await
    }

    async fn delete_record(&self, table: &str, params: &DeleteParams) -> Result<Envelope> {
        self.exchange(Method::DELETE, &format!("tables/{}/records", table), params)
            .await
    }
}
