use crate::domain::model::{DeleteParams, Envelope, QueryParams, RecordParams};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The hosted table store behind every service. Transport and decoding
/// problems are `Err`; business rejections come back as `success: false`
/// envelopes. The handle is read-only after construction.
#[async_trait]
pub trait BackendClient: Send + Sync {
    async fn fetch_records(&self, table: &str, params: &QueryParams) -> Result<Envelope>;

    async fn get_record_by_id(&self, table: &str, id: i64, params: &QueryParams)
        -> Result<Envelope>;

    async fn create_record(&self, table: &str, params: &RecordParams) -> Result<Envelope>;

    async fn update_record(&self, table: &str, params: &RecordParams) -> Result<Envelope>;

    async fn delete_record(&self, table: &str, params: &DeleteParams) -> Result<Envelope>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn project_id(&self) -> &str;
    fn public_key(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
