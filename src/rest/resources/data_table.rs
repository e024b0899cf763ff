//! Data table and data row resources.
//!
//! Data tables hold free-form rows, typically filled in by services (poll
//! answers, survey responses) or imported by hand.
//!
//! # Example
//!
//! ```rust,ignore
//! let table = project.get_or_create_data_table("Survey").await?;
//!
//! let mut vars = Map::new();
//! vars.insert("q1".to_string(), json!("yes"));
//! let mut row = table.create_row(json!({"vars": vars}).as_object().cloned().unwrap_or_default()).await?;
//!
//! let counts = table.count_rows_by_value("q1").await?;
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, cursor, declare_resource, delete, field_getters, field_setters, request_list,
    request_resource, timestamp_getters,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

declare_resource! {
    /// A table of rows with free-form variables.
    DataTable => "/projects/{project_id}/tables/{id}", ["project_id", "id"]
}

impl SavableResource for DataTable {}

field_getters!(DataTable {
    name: String,
    num_rows: u64,
    show_add_row: bool,
    show_stats: bool,
    show_contact_columns: bool,
    project_id: String,
});

field_setters!(DataTable {
    set_name => name: String,
    set_show_add_row => show_add_row: bool,
    set_show_stats => show_stats: bool,
    set_show_contact_columns => show_contact_columns: bool,
});

impl DataTable {
    /// Queries the rows of this table.
    #[must_use]
    pub fn query_rows(&self, params: QueryParams) -> ApiCursor<DataRow> {
        cursor(self.transport(), child_path(self, &["rows"]), Some(params.into_params()))
    }

    /// Adds a row. `options` may hold `contact_id`, `from_number` and `vars`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn create_row(&self, options: Map<String, Value>) -> Result<DataRow, ApiError> {
        let path = child_path(self, &["rows"]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Fetches a row by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the row does not exist.
    pub async fn get_row_by_id(&self, id: &str) -> Result<DataRow, ApiError> {
        let path = child_path(self, &["rows", id]);
        request_resource(self.transport(), HttpMethod::Get, &path, None).await
    }

    /// Creates a handle to a row without fetching it.
    #[must_use]
    pub fn init_row_by_id(&self, id: &str) -> DataRow {
        let project_id = self.entity().peek_str("project_id").unwrap_or_default();
        DataRow::init(
            Arc::clone(self.transport()),
            &[("project_id", project_id), ("table_id", self.id()), ("id", id)],
        )
    }

    /// Fetches the table's field definitions.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_fields(&self) -> Result<Vec<Value>, ApiError> {
        let path = child_path(self, &["fields"]);
        request_list(self.transport(), HttpMethod::Get, &path, None).await
    }

    /// Updates display metadata (`name`, `type`, `order`, ...) of one field.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set_field_metadata(
        &self,
        variable: &str,
        options: Map<String, Value>,
    ) -> Result<Value, ApiError> {
        let path = child_path(self, &["fields", variable]);
        self.transport()
            .request(HttpMethod::Post, &path, Some(options))
            .await
    }

    /// Returns the number of rows for each distinct value of `variable`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn count_rows_by_value(&self, variable: &str) -> Result<Value, ApiError> {
        let path = child_path(self, &["count_rows_by_value"]);
        let mut params = Map::new();
        params.insert("variable".to_string(), Value::from(variable));
        self.transport()
            .request(HttpMethod::Get, &path, Some(params))
            .await
    }

    /// Deletes the table and all its rows.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}

declare_resource! {
    /// One row of a [`DataTable`].
    DataRow => "/projects/{project_id}/tables/{table_id}/rows/{id}", ["project_id", "table_id", "id"]
}

impl SavableResource for DataRow {}

field_getters!(DataRow {
    contact_id: String,
    from_number: String,
    table_id: String,
    project_id: String,
});

timestamp_getters!(DataRow {
    time_created,
    time_updated,
});

field_setters!(DataRow {
    set_contact_id => contact_id: String,
    set_from_number => from_number: String,
});

impl DataRow {
    /// Deletes the row.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::FakeTransport;
    use serde_json::json;

    fn table(transport: &FakeTransport) -> DataTable {
        DataTable::init(Arc::new(transport.clone()), &[("project_id", "PJ1"), ("id", "DT1")])
    }

    #[tokio::test]
    async fn test_row_handles_carry_table_and_project() {
        let transport = FakeTransport::new();
        transport.push_response(json!({}));
        let table = table(&transport);

        let mut row = table.init_row_by_id("DR1");
        assert_eq!(row.base_api_path(), "/projects/PJ1/tables/DT1/rows/DR1");

        row.set_var("q1", "yes");
        row.save().await.unwrap();

        assert_eq!(
            transport.last_call().params.map(Value::Object),
            Some(json!({"vars": {"q1": "yes"}}))
        );
    }

    #[tokio::test]
    async fn test_create_row_returns_loaded_row() {
        let transport = FakeTransport::new();
        transport.push_response(json!({
            "id": "DR2",
            "table_id": "DT1",
            "project_id": "PJ1",
            "vars": {"q1": "no"}
        }));
        let table = table(&transport);

        let mut options = Map::new();
        options.insert("vars".to_string(), json!({"q1": "no"}));
        let mut row = table.create_row(options).await.unwrap();

        assert!(row.is_loaded());
        assert_eq!(row.vars().await.unwrap().get("q1"), Some(&json!("no")));
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.last_call().path, "/projects/PJ1/tables/DT1/rows");
    }

    #[tokio::test]
    async fn test_field_helpers() {
        let transport = FakeTransport::new();
        transport.push_response(json!([{"variable": "q1", "name": "Question 1"}]));
        transport.push_response(json!({"name": "Renamed"}));
        transport.push_response(json!({"yes": 3, "no": 1}));
        let table = table(&transport);

        assert_eq!(table.get_fields().await.unwrap().len(), 1);

        let mut options = Map::new();
        options.insert("name".to_string(), json!("Renamed"));
        table.set_field_metadata("q1", options).await.unwrap();
        assert_eq!(transport.last_call().path, "/projects/PJ1/tables/DT1/fields/q1");

        let counts = table.count_rows_by_value("q1").await.unwrap();
        assert_eq!(counts["yes"], 3);
        assert_eq!(transport.last_call().param("variable"), Some(&json!("q1")));
    }
}
