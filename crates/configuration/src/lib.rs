pub mod configuration;
pub mod error;

pub use configuration::{
    generate_schema_json_schema, parse_schema, write_schema, SCHEMA_FILENAME,
};
pub use error::{ParseSchemaError, WriteSchemaError};
