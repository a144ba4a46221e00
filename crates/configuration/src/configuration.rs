//! Reading and writing the schema of a resource.
//!
//! A schema lives in a directory as `schema.json`. Every option has a default, so an empty
//! object enables filtering, sorting and pagination with pages of 20 rows.

use std::path::Path;

use query_engine_metadata::metadata::Schema;
use schemars::{gen::SchemaSettings, schema::RootSchema};
use tokio::fs;

use crate::error::{ParseSchemaError, WriteSchemaError};

pub const SCHEMA_FILENAME: &str = "schema.json";

/// Read `schema.json` from a directory.
pub async fn parse_schema(schema_dir: impl AsRef<Path>) -> Result<Schema, ParseSchemaError> {
    let schema_file = schema_dir.as_ref().join(SCHEMA_FILENAME);

    let schema_file_contents = fs::read_to_string(&schema_file).await.map_err(|err| {
        ParseSchemaError::IoErrorButStringified(format!("{}: {}", &schema_file.display(), err))
    })?;

    let schema: Schema = serde_json::from_str(&schema_file_contents).map_err(|error| {
        ParseSchemaError::ParseError {
            file_path: schema_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    })?;

    tracing::debug!(file = %schema_file.display(), "read schema");
    Ok(schema)
}

/// Write a schema to `schema.json` in a directory, creating the directory if needed.
pub async fn write_schema(
    schema: &Schema,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteSchemaError> {
    let schema_file = out_dir.as_ref().join(SCHEMA_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    fs::write(
        schema_file,
        serde_json::to_string_pretty(schema).map_err(std::io::Error::from)? + "\n",
    )
    .await?;

    Ok(())
}

/// The JSON Schema describing `schema.json`.
pub fn generate_schema_json_schema() -> RootSchema {
    SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<Schema>()
}
