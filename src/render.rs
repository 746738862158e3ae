//! Rendering resolved parameters to text.

use crate::error::ClientError;
use crate::registry::Parameter;

/// Render a parameter, or one subparam of it. `None` means no value.
pub fn render<P: Parameter + ?Sized>(parameter: &P, subparam: Option<i64>) -> Option<String> {
    match subparam {
        None => parameter.value(),
        Some(index) => parameter.value_at(index),
    }
}

/// Render for an explicit request, where a missing value is an error.
///
/// The error names `name[index]` whenever a subparam was supplied, even
/// if the parameter has no subparam dimension at all.
pub fn render_required<P: Parameter + ?Sized>(
    parameter: &P,
    subparam: Option<i64>,
) -> Result<String, ClientError> {
    render(parameter, subparam).ok_or_else(|| ClientError::NoValue {
        name: parameter.name().to_string(),
        subparam,
    })
}
