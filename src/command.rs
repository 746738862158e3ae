//! The parameter query command: resolve arguments, then list or render.

use crate::error::ClientError;
use crate::list::{ListedParameter, list_parameters};
use crate::query::{Query, resolve_arguments};
use crate::registry::{ParameterSource, find_parameter};
use crate::render::render_required;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::info;

/// How results are written to the output sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Visible parameters with a value, in name order.
    Listed(Vec<ListedParameter>),
    /// The value of one explicitly requested parameter.
    Value {
        name: String,
        subparam: Option<i64>,
        value: String,
    },
}

/// Run the command against `source` without writing anything.
///
/// Arguments are validated before the source is touched.
pub fn execute<S, T>(source: &S, tokens: &[T]) -> Result<Outcome, ClientError>
where
    S: ParameterSource,
    T: AsRef<str>,
{
    let query = resolve_arguments(tokens)?;
    execute_query(source, query)
}

/// Answer an already resolved query.
pub fn execute_query<S: ParameterSource>(source: &S, query: Query) -> Result<Outcome, ClientError> {
    match query {
        Query::ListAll => Ok(Outcome::Listed(list_parameters(source)?)),
        Query::Named { name, subparam } => {
            let parameter = find_parameter(source, &name)?;
            let value = render_required(parameter, subparam)?;
            info!(name = %name, ?subparam, "rendered parameter");
            Ok(Outcome::Value {
                name,
                subparam,
                value,
            })
        }
    }
}

/// Write a successful outcome. Text listings are `label: value` lines and
/// a direct query is the bare value on one line.
pub fn write_outcome<W: Write>(
    outcome: &Outcome,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ClientError> {
    match format {
        OutputFormat::Text => match outcome {
            Outcome::Listed(parameters) => {
                for parameter in parameters {
                    writeln!(out, "{}", parameter)?;
                }
            }
            Outcome::Value { value, .. } => writeln!(out, "{}", value)?,
        },
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Execute and write in one step. Nothing is written when execution fails.
pub fn run<S, T, W>(
    source: &S,
    tokens: &[T],
    format: OutputFormat,
    out: &mut W,
) -> Result<Outcome, ClientError>
where
    S: ParameterSource,
    T: AsRef<str>,
    W: Write,
{
    let outcome = execute(source, tokens)?;
    write_outcome(&outcome, format, out)?;
    Ok(outcome)
}
