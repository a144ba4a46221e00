//! Translate a query string into SQL for one table, using the schema in a configuration
//! directory.
//!
//! ```sh
//! query-dsl-cli --configuration ./resources/users --table users 'filter[age][>]=18&sort=-id'
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use query_dsl_configuration::{generate_schema_json_schema, parse_schema};
use query_engine_sql::sql;
use query_engine_sql::sql::string::Param;
use query_engine_translation::translation::adapter::SqlAdapter;
use query_engine_translation::translation::error::Error;
use query_engine_translation::translation::querier::Querier;
use query_engine_translation::translation::raw_query::parse_query_string;

#[derive(Parser)]
#[command(version)]
struct Options {
    #[command(subcommand)]
    command: Option<Command>,

    /// The directory containing `schema.json`.
    #[arg(long, env = "QUERY_DSL_CONFIGURATION", value_name = "DIRECTORY")]
    configuration: Option<PathBuf>,

    /// The table to select from.
    #[arg(long, value_name = "TABLE")]
    table: Option<String>,

    /// Print `$n` placeholders followed by the parameters instead of inlining strings.
    #[arg(long)]
    parameterized: bool,

    /// The query string, for example `filter[name][like]=%25a%25&page=2`.
    query: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the JSON Schema of `schema.json`.
    PrintJsonSchema,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let options = Options::parse();

    match run(options).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(options: Options) -> anyhow::Result<()> {
    if let Some(Command::PrintJsonSchema) = options.command {
        println!(
            "{}",
            serde_json::to_string_pretty(&generate_schema_json_schema())?
        );
        return Ok(());
    }

    let configuration = options
        .configuration
        .ok_or_else(|| anyhow::anyhow!("--configuration is required"))?;
    let table = options
        .table
        .ok_or_else(|| anyhow::anyhow!("--table is required"))?;

    let schema = parse_schema(&configuration).await?;
    let raw_query = parse_query_string(options.query.as_deref().unwrap_or_default());

    let adapter = SqlAdapter::new();
    let select = Querier::new(
        &raw_query,
        sql::helpers::select_from_table(&table),
        &schema,
        &adapter,
    )
    .run()
    .map_err(|error| match error {
        Error::Validation(_) => anyhow::anyhow!("invalid query: {error}"),
        other => anyhow::Error::new(other),
    })?;

    if options.parameterized {
        let query = select.query_sql();
        tracing::info!(table = %table, sql = %query.sql, "translated query");
        println!("{}", query.sql);
        for (index, Param::String(value)) in query.params.iter().enumerate() {
            println!("${} = {}", index + 1, serde_json::Value::from(value.as_str()));
        }
    } else {
        tracing::info!(table = %table, sql = %select, "translated query");
        println!("{select}");
    }

    Ok(())
}
