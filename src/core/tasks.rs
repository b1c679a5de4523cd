use crate::core::table::{put, TableSpec, TableStore};
use crate::domain::model::{resolve_field, Record, SortDirection};
use crate::domain::ports::BackendClient;
use crate::utils::error::Result;
use serde_json::{Map, Value};

const SPEC: TableSpec = TableSpec {
    table: "task_c",
    fields: &[
        "Id",
        "Name",
        "title_c",
        "description_c",
        "due_date_c",
        "priority_c",
        "category_c",
        "completed_c",
        "crop_id_c",
    ],
    order: Some(("due_date_c", SortDirection::Asc)),
    page_limit: 100,
    label: "task",
};

#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    pub title_c: Option<String>,
    pub description_c: Option<String>,
    pub due_date_c: Option<String>,
    pub priority_c: Option<String>,
    pub category_c: Option<String>,
    pub completed_c: Option<bool>,
    pub crop_id_c: Option<i64>,
    // Deprecated aliases.
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub crop_id: Option<i64>,
}

impl TaskDraft {
    fn into_wire(self) -> Map<String, Value> {
        let mut record = Map::new();
        let title = resolve_field(&self.title_c, &self.title);

        record.insert(
            "Name".to_string(),
            Value::String(title.clone().unwrap_or_else(|| "New Task".to_string())),
        );
        put(&mut record, "title_c", title);
        put(
            &mut record,
            "description_c",
            resolve_field(&self.description_c, &self.description),
        );
        put(
            &mut record,
            "due_date_c",
            resolve_field(&self.due_date_c, &self.due_date),
        );
        record.insert(
            "priority_c".to_string(),
            Value::String(
                resolve_field(&self.priority_c, &self.priority)
                    .unwrap_or_else(|| "medium".to_string()),
            ),
        );
        record.insert(
            "category_c".to_string(),
            Value::String(
                resolve_field(&self.category_c, &self.category)
                    .unwrap_or_else(|| "general".to_string()),
            ),
        );
        record.insert(
            "completed_c".to_string(),
            Value::Bool(resolve_field(&self.completed_c, &self.completed).unwrap_or(false)),
        );
        put(
            &mut record,
            "crop_id_c",
            resolve_field(&self.crop_id_c, &self.crop_id),
        );
        record
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub title_c: Option<String>,
    pub description_c: Option<String>,
    pub due_date_c: Option<String>,
    pub priority_c: Option<String>,
    pub category_c: Option<String>,
    pub completed_c: Option<bool>,
    pub crop_id_c: Option<i64>,
    // Deprecated aliases.
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
    pub crop_id: Option<i64>,
}

impl TaskPatch {
    fn into_wire(self) -> Map<String, Value> {
        let mut record = Map::new();

        if let Some(title) = resolve_field(&self.title_c, &self.title) {
            record.insert("title_c".to_string(), Value::String(title.clone()));
            record.insert("Name".to_string(), Value::String(title));
        }
        put(
            &mut record,
            "description_c",
            resolve_field(&self.description_c, &self.description),
        );
        put(
            &mut record,
            "due_date_c",
            resolve_field(&self.due_date_c, &self.due_date),
        );
        put(
            &mut record,
            "priority_c",
            resolve_field(&self.priority_c, &self.priority),
        );
        put(
            &mut record,
            "category_c",
            resolve_field(&self.category_c, &self.category),
        );
        put(
            &mut record,
            "completed_c",
            resolve_field(&self.completed_c, &self.completed),
        );
        put(
            &mut record,
            "crop_id_c",
            resolve_field(&self.crop_id_c, &self.crop_id),
        );
        record
    }
}

pub struct TaskService<C> {
    store: TableStore<C>,
}

impl<C: BackendClient> TaskService<C> {
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

    pub async fn create(&self, draft: TaskDraft) -> Result<Record> {
        self.store.insert(draft.into_wire()).await
    }

    pub async fn update(&self, id: i64, patch: TaskPatch) -> Result<Record> {
        self.store.modify(id, patch.into_wire()).await
    }

    pub async fn delete(&self, id: i64) -> Result<bool> {
        self.store.remove(id).await
    }
}
