//! Capabilities a connection exposes for parameter introspection.

use crate::error::ClientError;
use tracing::debug;

/// A device parameter. Values are computed on demand and never cached here.
pub trait Parameter {
    /// Stable key, unique within one registry snapshot.
    fn name(&self) -> &str;
    fn label(&self) -> &str;
    /// Hidable parameters are left out of the default listing.
    fn is_hidable(&self) -> bool;
    /// Current value, or `None` when the parameter has none.
    fn value(&self) -> Option<String>;
    /// Current value at one subparam index, or `None` when there is none.
    fn value_at(&self, subparam: i64) -> Option<String>;
}

/// The set of parameters a connection can see at query time.
pub trait ParameterSource {
    type Parameter: Parameter;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every parameter, in whatever order the source keeps them.
    fn parameters(&self) -> Result<Vec<&Self::Parameter>, Self::Error>;

    /// The parameter called `name`, hidable or not.
    fn parameter(&self, name: &str) -> Result<Option<&Self::Parameter>, Self::Error> {
        Ok(self.parameters()?.into_iter().find(|p| p.name() == name))
    }
}

/// Look up a parameter by name without applying any visibility filter.
pub fn find_parameter<'a, S: ParameterSource>(
    source: &'a S,
    name: &str,
) -> Result<&'a S::Parameter, ClientError> {
    let parameter = source.parameter(name).map_err(ClientError::registry)?;
    match parameter {
        Some(p) => {
            debug!(name, hidable = p.is_hidable(), "found parameter");
            Ok(p)
        }
        None => Err(ClientError::UnknownParameter(name.to_string())),
    }
}
