//! Turns positional tokens into a parameter query.

use crate::error::ClientError;
use tracing::debug;

/// Most positional tokens a query accepts: a name and a subparam.
pub const MAX_ARGUMENTS: usize = 2;

/// Field name reported when the subparam token is not an integer.
pub const SUBPARAM_FIELD: &str = "subparam";

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// List every visible parameter.
    ListAll,
    /// Render one parameter, optionally at a subparam index.
    Named { name: String, subparam: Option<i64> },
}

/// Token arity, checked before any token is interpreted.
#[derive(Debug, PartialEq, Eq)]
enum Arguments<'a> {
    ZeroArgs,
    OneArg(&'a str),
    TwoArgs(&'a str, &'a str),
}

impl<'a> Arguments<'a> {
    fn classify<S: AsRef<str>>(tokens: &'a [S]) -> Result<Self, ClientError> {
        match tokens {
            [] => Ok(Arguments::ZeroArgs),
            [name] => Ok(Arguments::OneArg(name.as_ref())),
            [name, subparam] => Ok(Arguments::TwoArgs(name.as_ref(), subparam.as_ref())),
            _ => Err(ClientError::TooManyParameters {
                received: tokens.iter().map(|t| t.as_ref().to_string()).collect(),
                max: MAX_ARGUMENTS,
            }),
        }
    }
}

/// Parse a signed integer field, naming the field on failure.
pub fn parse_integer(field: &str, value: &str) -> Result<i64, ClientError> {
    value.parse::<i64>().map_err(|_| ClientError::InvalidInteger {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Resolve 0-2 positional tokens into a [`Query`].
///
/// The subparam token is only validated when it is present, and the
/// name token is never inspected, so a syntax failure can only come from
/// the arity or the second token.
pub fn resolve_arguments<S: AsRef<str>>(tokens: &[S]) -> Result<Query, ClientError> {
    let query = match Arguments::classify(tokens)? {
        Arguments::ZeroArgs => Query::ListAll,
        Arguments::OneArg(name) => Query::Named {
            name: name.to_string(),
            subparam: None,
        },
        Arguments::TwoArgs(name, subparam) => Query::Named {
            name: name.to_string(),
            subparam: Some(parse_integer(SUBPARAM_FIELD, subparam)?),
        },
    };
    debug!(?query, "resolved arguments");
    Ok(query)
}
