use crate::core::table::{put, TableSpec, TableStore};
use crate::domain::model::{resolve_field, resolve_number, Numeric, Record, SortDirection};
use crate::domain::ports::BackendClient;
use crate::utils::error::Result;
use serde_json::{Map, Value};

const SPEC: TableSpec = TableSpec {
    table: "crop_c",
    fields: &[
        "Id",
        "Name",
        "name_c",
        "variety_c",
        "planting_date_c",
        "expected_harvest_c",
        "field_location_c",
        "quantity_c",
        "status_c",
        "notes_c",
    ],
    order: Some(("planting_date_c", SortDirection::Desc)),
    page_limit: 100,
    label: "crop",
};

/// Input for creating a crop. Every logical field has a canonical `*_c`
/// column and a deprecated alias kept for callers that have not migrated;
/// the canonical value always wins.
#[derive(Debug, Clone, Default)]
pub struct CropDraft {
    pub name_c: Option<String>,
    pub variety_c: Option<String>,
    pub planting_date_c: Option<String>,
    pub expected_harvest_c: Option<String>,
    pub field_location_c: Option<String>,
    pub quantity_c: Option<Numeric>,
    pub status_c: Option<String>,
    pub notes_c: Option<String>,
    // Deprecated aliases.
    pub name: Option<String>,
    pub variety: Option<String>,
    pub planting_date: Option<String>,
    pub expected_harvest: Option<String>,
    pub field_location: Option<String>,
    pub quantity: Option<Numeric>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl CropDraft {
    fn into_wire(self) -> Map<String, Value> {
        let mut record = Map::new();
        let name = resolve_field(&self.name_c, &self.name);

        record.insert(
            "Name".to_string(),
            Value::String(name.clone().unwrap_or_else(|| "New Crop".to_string())),
        );
        put(&mut record, "name_c", name);
        put(
            &mut record,
            "variety_c",
            resolve_field(&self.variety_c, &self.variety),
        );
        put(
            &mut record,
            "planting_date_c",
            resolve_field(&self.planting_date_c, &self.planting_date),
        );
        put(
            &mut record,
            "expected_harvest_c",
            resolve_field(&self.expected_harvest_c, &self.expected_harvest),
        );
        put(
            &mut record,
            "field_location_c",
            resolve_field(&self.field_location_c, &self.field_location),
        );
        record.insert(
            "quantity_c".to_string(),
            Value::from(resolve_number(&self.quantity_c, &self.quantity)),
        );
        record.insert(
            "status_c".to_string(),
            Value::String(
                resolve_field(&self.status_c, &self.status)
                    .unwrap_or_else(|| "planted".to_string()),
            ),
        );
        put(
            &mut record,
            "notes_c",
            resolve_field(&self.notes_c, &self.notes),
        );
        record
    }
}

/// Partial update: only fields actually present end up in the payload.
#[derive(Debug, Clone, Default)]
pub struct CropPatch {
    pub name_c: Option<String>,
    pub variety_c: Option<String>,
    pub planting_date_c: Option<String>,
    pub expected_harvest_c: Option<String>,
    pub field_location_c: Option<String>,
    pub quantity_c: Option<Numeric>,
    pub status_c: Option<String>,
    pub notes_c: Option<String>,
    // Deprecated aliases.
    pub name: Option<String>,
    pub variety: Option<String>,
    pub planting_date: Option<String>,
    pub expected_harvest: Option<String>,
    pub field_location: Option<String>,
    pub quantity: Option<Numeric>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl CropPatch {
    fn into_wire(self) -> Map<String, Value> {
        let mut record = Map::new();

        if let Some(name) = resolve_field(&self.name_c, &self.name) {
            // A renamed crop also renames the record's display name.
            record.insert("name_c".to_string(), Value::String(name.clone()));
            record.insert("Name".to_string(), Value::String(name));
        }
        put(
            &mut record,
            "variety_c",
            resolve_field(&self.variety_c, &self.variety),
        );
        put(
            &mut record,
            "planting_date_c",
            resolve_field(&self.planting_date_c, &self.planting_date),
        );
        put(
            &mut record,
            "expected_harvest_c",
            resolve_field(&self.expected_harvest_c, &self.expected_harvest),
        );
        put(
            &mut record,
            "field_location_c",
            resolve_field(&self.field_location_c, &self.field_location),
        );
        if self.quantity_c.is_some() || self.quantity.is_some() {
            record.insert(
                "quantity_c".to_string(),
                Value::from(resolve_number(&self.quantity_c, &self.quantity)),
            );
        }
        put(
            &mut record,
            "status_c",
            resolve_field(&self.status_c, &self.status),
        );
        put(
            &mut record,
            "notes_c",
            resolve_field(&self.notes_c, &self.notes),
        );
        record
    }
}

pub struct CropService<C> {
    store: TableStore<C>,
}

impl<C: BackendClient> CropService<C> {
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

    pub async fn create(&self, draft: CropDraft) -> Result<Record> {
        self.store.insert(draft.into_wire()).await
    }

    pub async fn update(&self, id: i64, patch: CropPatch) -> Result<Record> {
        self.store.modify(id, patch.into_wire()).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.store.remove(id).await
    }
}
