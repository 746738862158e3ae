//! brlparam - inspect the parameters a braille device connection exposes.
//!
//! With no arguments every visible parameter is listed as `label: value`,
//! sorted by name. With a parameter name (and optionally a subparam index)
//! only that value is printed. Parameters come from any [`ParameterSource`];
//! [`Snapshot`] is a file-backed one.

pub mod command;
pub mod config;
pub mod error;
pub mod list;
pub mod logging;
pub mod query;
pub mod registry;
pub mod render;
pub mod snapshot;

pub use command::{OutputFormat, Outcome, execute, execute_query, run, write_outcome};
pub use config::{ClientConfig, ConfigError, Settings, find_config, load_config, resolve_settings};
pub use error::{ClientError, ErrorKind, qualified_name};
pub use list::{ListedParameter, list_parameters};
pub use query::{MAX_ARGUMENTS, Query, resolve_arguments};
pub use registry::{Parameter, ParameterSource, find_parameter};
pub use render::{render, render_required};
pub use snapshot::{Snapshot, SnapshotError, SnapshotParameter, Value};
