use crate::core::table::{put, TableSpec, TableStore};
use crate::domain::model::{resolve_field, resolve_number, Numeric, Record, SortDirection};
use crate::domain::ports::BackendClient;
use crate::utils::error::Result;
use serde_json::{Map, Value};

const SPEC: TableSpec = TableSpec {
    table: "financial_c",
    fields: &[
        "Id",
        "Name",
        "type_c",
        "category_c",
        "amount_c",
        "description_c",
        "date_c",
        "crop_id_c",
    ],
    order: Some(("date_c", SortDirection::Desc)),
    page_limit: 100,
    label: "financial record",
};

/// Input for recording a transaction. `crop_id_c` is a plain identifier;
/// no referential check happens on this side.
#[derive(Debug, Clone, Default)]
pub struct FinancialDraft {
    pub type_c: Option<String>,
    pub category_c: Option<String>,
    pub amount_c: Option<Numeric>,
    pub description_c: Option<String>,
    pub date_c: Option<String>,
    pub crop_id_c: Option<i64>,
    // Deprecated aliases.
    pub r#type: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Numeric>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub crop_id: Option<i64>,
}

impl FinancialDraft {
    fn into_wire(self) -> Map<String, Value> {
        let mut record = Map::new();
        let description = resolve_field(&self.description_c, &self.description);

        record.insert(
            "Name".to_string(),
            Value::String(
                description
                    .clone()
                    .unwrap_or_else(|| "New Record".to_string()),
            ),
        );
        record.insert(
            "type_c".to_string(),
            Value::String(
                resolve_field(&self.type_c, &self.r#type)
                    .unwrap_or_else(|| "expense".to_string()),
            ),
        );
        put(
            &mut record,
            "category_c",
            resolve_field(&self.category_c, &self.category),
        );
        record.insert(
            "amount_c".to_string(),
            Value::from(resolve_number(&self.amount_c, &self.amount)),
        );
        put(&mut record, "description_c", description);
        put(&mut record, "date_c", resolve_field(&self.date_c, &self.date));
        put(
            &mut record,
            "crop_id_c",
            resolve_field(&self.crop_id_c, &self.crop_id),
        );
        record
    }
}

#[derive(Debug, Clone, Default)]
pub struct FinancialPatch {
    pub type_c: Option<String>,
    pub category_c: Option<String>,
    pub amount_c: Option<Numeric>,
    pub description_c: Option<String>,
    pub date_c: Option<String>,
    pub crop_id_c: Option<i64>,
    // Deprecated aliases.
    pub r#type: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Numeric>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub crop_id: Option<i64>,
}

impl FinancialPatch {
    fn into_wire(self) -> Map<String, Value> {
        let mut record = Map::new();

        put(
            &mut record,
            "type_c",
            resolve_field(&self.type_c, &self.r#type),
        );
        put(
            &mut record,
            "category_c",
            resolve_field(&self.category_c, &self.category),
        );
        if self.amount_c.is_some() || self.amount.is_some() {
            record.insert(
                "amount_c".to_string(),
                Value::from(resolve_number(&self.amount_c, &self.amount)),
            );
        }
        if let Some(description) = resolve_field(&self.description_c, &self.description) {
            record.insert(
                "description_c".to_string(),
                Value::String(description.clone()),
            );
            record.insert("Name".to_string(), Value::String(description));
        }
        put(&mut record, "date_c", resolve_field(&self.date_c, &self.date));
        put(
            &mut record,
            "crop_id_c",
            resolve_field(&self.crop_id_c, &self.crop_id),
        );
        record
    }
}

pub struct FinancialService<C> {
    store: TableStore<C>,
}

impl<C: BackendClient> FinancialService<C> {
    pub fn new(client: C) -> Self {
        Self {
            store: TableStore::new(client, SPEC),
        }
    }

    pub async fn get_all(&self) -> Vec<Record> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: i64) -> Option<Record> {
        self.store.find(id).await
    }

    pub async fn create(&self, draft: FinancialDraft) -> Result<Record> {
        self.store.insert(draft.into_wire()).await
    }

    pub async fn update(&self, id: i64, patch: FinancialPatch) -> Result<Record> {
        self.store.modify(id, patch.into_wire()).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.store.remove(id).await
    }
}
