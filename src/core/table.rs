use crate::domain::model::{
    DeleteParams, Envelope, FieldSpec, OrderBy, PagingInfo, QueryParams, Record, RecordParams,
    SortDirection,
};
use crate::domain::ports::BackendClient;
use crate::utils::error::{FarmError, Result};

/// Static description of one backend table: which columns to project, the
/// default ordering, and the page size for listing.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    pub table: &'static str,
    pub fields: &'static [&'static str],
    pub order: Option<(&'static str, SortDirection)>,
    pub page_limit: usize,
    pub label: &'static str,
}

impl TableSpec {
    pub fn projection(&self) -> Vec<FieldSpec> {
        self.fields.iter().map(|f| FieldSpec::named(f)).collect()
    }

    fn list_params(&self) -> QueryParams {
        QueryParams {
            fields: self.projection(),
            order_by: self.order.map(|(field, direction)| {
                vec![OrderBy {
                    field_name: field.to_string(),
                    sorttype: direction,
                }]
            }),
            paging_info: Some(PagingInfo {
                limit: self.page_limit,
                offset: 0,
            }),
            filters: None,
        }
    }
}

/// Shared engine behind the four record services. Reads degrade to empty
/// results after logging; writes surface the store's failure message.
pub struct TableStore<C> {
    client: C,
    spec: TableSpec,
}

impl<C: BackendClient> TableStore<C> {
    pub fn new(client: C, spec: TableSpec) -> Self {
        Self { client, spec }
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    /// Runs an arbitrary query, degrading any failure to an empty list.
    pub async fn query(&self, params: QueryParams) -> Vec<Record> {
        match self.client.fetch_records(self.spec.table, &params).await {
            Ok(envelope) if envelope.success => envelope.data_records(),
            Ok(envelope) => {
                tracing::error!(
                    table = self.spec.table,
                    "{}",
                    envelope.message_or("fetch rejected by store")
                );
                Vec::new()
            }
            Err(e) => {
                tracing::error!(
                    table = self.spec.table,
                    "Error fetching {} records: {}",
                    self.spec.label,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Default listing: full projection, spec ordering, first page.
    pub async fn list(&self) -> Vec<Record> {
        self.query(self.spec.list_params()).await
    }

    pub async fn find(&self, id: i64) -> Option<Record> {
        let params = QueryParams {
            fields: self.spec.projection(),
            ..Default::default()
        };

        match self
            .client
            .get_record_by_id(self.spec.table, id, &params)
            .await
        {
            Ok(envelope) if envelope.success => envelope.data_record(),
            Ok(envelope) => {
                tracing::error!(
                    table = self.spec.table,
                    "{}",
                    envelope.message_or("record lookup rejected by store")
                );
                None
            }
            Err(e) => {
                tracing::error!(
                    table = self.spec.table,
                    "Error fetching {} {}: {}",
                    self.spec.label,
                    id,
                    e
                );
                None
            }
        }
    }

    pub async fn insert(&self, record: serde_json::Map<String, serde_json::Value>) -> Result<Record> {
        let params = RecordParams {
            records: vec![record],
        };

        let envelope = self
            .client
            .create_record(self.spec.table, &params)
            .await
            .map_err(|e| FarmError::CreationFailed {
                message: e.to_string(),
            })?;

        self.take_first_success(envelope, "create", |message| FarmError::CreationFailed {
            message,
        })
    }

    pub async fn modify(
        &self,
        id: i64,
        mut patch: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Record> {
        patch.insert("Id".to_string(), serde_json::Value::from(id));
        let params = RecordParams {
            records: vec![patch],
        };

        let envelope = self
            .client
            .update_record(self.spec.table, &params)
            .await
            .map_err(|e| FarmError::UpdateFailed {
                message: e.to_string(),
            })?;

        self.take_first_success(envelope, "update", |message| FarmError::UpdateFailed {
            message,
        })
    }

    pub async fn remove(&self, id: i64) -> Result<bool> {
        let params = DeleteParams {
            record_ids: vec![id],
        };

        let envelope = self
            .client
            .delete_record(self.spec.table, &params)
            .await
            .map_err(|e| FarmError::DeletionFailed {
                message: e.to_string(),
            })?;

        if !envelope.success {
            let message = envelope.message_or(&format!("Failed to delete {}", self.spec.label));
            tracing::error!(table = self.spec.table, "{}", message);
            return Err(FarmError::DeletionFailed { message });
        }

        Ok(true)
    }

    // Two-level batch policy: envelope failure carries the store's message,
    // a success envelope with no successful sub-result gets the generic one.
    fn take_first_success(
        &self,
        envelope: Envelope,
        verb: &str,
        make: fn(String) -> FarmError,
    ) -> Result<Record> {
        let fallback = format!("Failed to {} {}", verb, self.spec.label);

        if !envelope.success {
            let message = envelope.message_or(&fallback);
            tracing::error!(table = self.spec.table, "{}", message);
            return Err(make(message));
        }

        match envelope.first_successful() {
            Some(record) => Ok(record),
            None => {
                tracing::error!(table = self.spec.table, "{}", fallback);
                Err(make(fallback))
            }
        }
    }
}

/// Inserts a wire field only when a value is actually present, so absent
/// inputs never show up in a payload.
pub(crate) fn put<V: Into<serde_json::Value>>(
    record: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
    value: Option<V>,
) {
    if let Some(value) = value {
        record.insert(key.to_string(), value.into());
    }
}

/// Scripted in-memory backend used by the service unit tests.
#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    pub(crate) struct RecordedCall {
        pub verb: &'static str,
        pub table: String,
        pub params: serde_json::Value,
    }

    #[derive(Clone, Default)]
    pub(crate) struct MockBackend {
        replies: Arc<Mutex<VecDeque<Result<Envelope>>>>,
        calls: Arc<Mutex<Vec<RecordedCall>>>,
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn reply(self, envelope: Envelope) -> Self {
            self.replies.lock().unwrap().push_back(Ok(envelope));
            self
        }

        pub fn reply_err(self, error: FarmError) -> Self {
            self.replies.lock().unwrap().push_back(Err(error));
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        async fn exchange<P: serde::Serialize>(
            &self,
            verb: &'static str,
            table: &str,
            params: &P,
        ) -> Result<Envelope> {
            self.calls.lock().unwrap().push(RecordedCall {
                verb,
                table: table.to_string(),
                params: serde_json::to_value(params).unwrap(),
            });
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| panic!("no scripted reply for {} on {}", verb, table))
        }
    }

    pub(crate) fn accepted_with_data(data: serde_json::Value) -> Envelope {
        serde_json::from_value(serde_json::json!({"success": true, "data": data})).unwrap()
    }

    pub(crate) fn accepted_with_results(results: serde_json::Value) -> Envelope {
        serde_json::from_value(serde_json::json!({"success": true, "results": results})).unwrap()
    }

    pub(crate) fn rejected(message: &str) -> Envelope {
        serde_json::from_value(serde_json::json!({"success": false, "message": message})).unwrap()
    }

    #[async_trait::async_trait]
    impl BackendClient for MockBackend {
        async fn fetch_records(&self, table: &str, params: &QueryParams) -> Result<Envelope> {
            self.exchange("fetch", table, params).await
        }

        async fn get_record_by_id(
            &self,
            table: &str,
            id: i64,
            params: &QueryParams,
        ) -> Result<Envelope> {
            let wrapped = serde_json::json!({
                "id": id,
                "params": serde_json::to_value(params).unwrap(),
            });
            self.exchange("get_by_id", table, &wrapped).await
        }

        async fn create_record(&self, table: &str, params: &RecordParams) -> Result<Envelope> {
            self.exchange("create", table, params).await
        }

        async fn update_record(&self, table: &str, params: &RecordParams) -> Result<Envelope> {
            self.exchange("update", table, params).await
        }

        async fn delete_record(&self, table: &str, params: &DeleteParams) -> Result<Envelope> {
            self.exchange("delete", table, params).await
        }
    }
}
