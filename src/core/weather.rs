use crate::core::table::{TableSpec, TableStore};
use crate::domain::model::{Filter, PagingInfo, QueryParams, Record, SortDirection};
use crate::domain::ports::BackendClient;
use chrono::{DateTime, Utc};

const SPEC: TableSpec = TableSpec {
    table: "weather_c",
    fields: &[
        "Id",
        "Name",
        "date_c",
        "temperature_c",
        "condition_c",
        "humidity_c",
        "precipitation_c",
    ],
    order: Some(("date_c", SortDirection::Asc)),
    // One week of forecast entries.
    page_limit: 7,
    label: "weather forecast",
};

/// Read-only view over the forecast table. Weather rows are maintained by
/// the store; this side never writes them.
pub struct WeatherService<C> {
    store: TableStore<C>,
}

impl<C: BackendClient> WeatherService<C> {
    pub fn new(client: C) -> Self {
        Self {
            store: TableStore::new(client, SPEC),
        }
    }

    /// The seven-day forecast, earliest day first. Empty on any failure.
    pub async fn forecast(&self) -> Vec<Record> {
        self.store.list().await
    }

    /// Today's entry: the first forecast row, if there is one.
    pub async fn current(&self) -> Option<Record> {
        self.forecast().await.into_iter().next()
    }

    /// Forecast entry for a specific day. The input is truncated to its UTC
    /// calendar day before matching; stored `date_c` values are assumed to
    /// use the same `YYYY-MM-DD` convention.
    pub async fn by_date(&self, date: DateTime<Utc>) -> Option<Record> {
        let day = date.date_naive().to_string();
        let params = QueryParams {
            fields: self.store.spec().projection(),
            order_by: None,
            paging_info: Some(PagingInfo {
                limit: 1,
                offset: 0,
            }),
            filters: Some(vec![Filter {
                field_name: "date_c".to_string(),
                operator: "EqualTo".to_string(),
                values: vec![serde_json::Value::String(day)],
            }]),
        };

        self.store.query(params).await.into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::mock::{accepted_with_data, rejected, MockBackend};
    use chrono::TimeZone;
    use serde_json::json;

    #[tokio::test]
    async fn forecast_requests_one_week_ascending() {
        let backend = MockBackend::new().reply(accepted_with_data(json!([
            {"Id": 1, "date_c": "2024-05-01", "condition_c": "sunny"},
            {"Id": 2, "date_c": "2024-05-02", "condition_c": "rain"}
        ])));
        let service = WeatherService::new(backend.clone());

        let forecast = service.forecast().await;
        assert_eq!(forecast.len(), 2);

        let params = &backend.calls()[0].params;
        assert_eq!(params["pagingInfo"], json!({"limit": 7, "offset": 0}));
        assert_eq!(
            params["orderBy"],
            json!([{"fieldName": "date_c", "sorttype": "ASC"}])
        );
    }

    #[tokio::test]
    async fn forecast_degrades_to_empty_on_rejection() {
        let backend = MockBackend::new().reply(rejected("forecast unavailable"));
        let service = WeatherService::new(backend);
        assert!(service.forecast().await.is_empty());
    }

    #[tokio::test]
    async fn current_takes_first_forecast_entry() {
        let backend = MockBackend::new().reply(accepted_with_data(json!([
            {"Id": 1, "condition_c": "sunny"},
            {"Id": 2, "condition_c": "rain"}
        ])));
        let service = WeatherService::new(backend);

        let current = service.current().await.unwrap();
        assert_eq!(current.get_str("condition_c"), Some("sunny"));
    }

    #[tokio::test]
    async fn current_is_none_when_forecast_is_empty() {
        let backend = MockBackend::new().reply(accepted_with_data(json!([])));
        let service = WeatherService::new(backend);
        assert!(service.current().await.is_none());
    }

    #[tokio::test]
    async fn by_date_filters_on_truncated_utc_day() {
        let backend = MockBackend::new().reply(accepted_with_data(json!([
            {"Id": 3, "date_c": "2024-05-01", "temperature_c": 21.5}
        ])));
        let service = WeatherService::new(backend.clone());

        let date = Utc.with_ymd_and_hms(2024, 5, 1, 15, 30, 0).unwrap();
        let entry = service.by_date(date).await.unwrap();
        assert_eq!(entry.get_f64("temperature_c"), Some(21.5));

        let params = &backend.calls()[0].params;
        assert_eq!(
            params["where"],
            json!([{"FieldName": "date_c", "Operator": "EqualTo", "Values": ["2024-05-01"]}])
        );
        assert_eq!(params["pagingInfo"], json!({"limit": 1, "offset": 0}));
        assert!(params.get("orderBy").is_none());
    }

    #[tokio::test]
    async fn by_date_is_none_when_no_entry_matches() {
        let backend = MockBackend::new().reply(accepted_with_data(json!([])));
        let service = WeatherService::new(backend);

        let date = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert!(service.by_date(date).await.is_none());
    }
}
