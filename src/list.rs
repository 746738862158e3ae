//! Listing of all visible parameters.

use crate::error::ClientError;
use crate::registry::{Parameter, ParameterSource};
use crate::render::render;
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// One line of a parameter listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedParameter {
    pub name: String,
    pub label: String,
    pub value: String,
}

impl fmt::Display for ListedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// List every non-hidable parameter that currently has a value, sorted by name.
///
/// Parameters without a value are skipped rather than reported. Only a
/// failure to read the source itself is an error.
pub fn list_parameters<S: ParameterSource>(source: &S) -> Result<Vec<ListedParameter>, ClientError> {
    let mut parameters: Vec<&S::Parameter> = source
        .parameters()
        .map_err(ClientError::registry)?
        .into_iter()
        .filter(|p| !p.is_hidable())
        .collect();
    parameters.sort_by(|a, b| a.name().cmp(b.name()));

    let mut listed = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        match render(parameter, None) {
            Some(value) => listed.push(ListedParameter {
                name: parameter.name().to_string(),
                label: parameter.label().to_string(),
                value,
            }),
            None => debug!(name = parameter.name(), "omitting parameter without value"),
        }
    }

    info!(count = listed.len(), "listed parameters");
    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Snapshot, SnapshotParameter};

    #[test]
    fn test_hidable_parameters_excluded() {
        let source = Snapshot::from_parameters(vec![
            SnapshotParameter::new("A", "Alpha", false).with_value("1"),
            SnapshotParameter::new("B", "Bravo", true).with_value("2"),
        ])
        .unwrap();

        let listed = list_parameters(&source).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].to_string(), "Alpha: 1");
    }

    #[test]
    fn test_sorted_by_name_not_label_or_insertion() {
        let source = Snapshot::from_parameters(vec![
            SnapshotParameter::new("zeta", "A label", false).with_value("z"),
            SnapshotParameter::new("Mid", "B label", false).with_value("m"),
            SnapshotParameter::new("alpha", "C label", false).with_value("a"),
        ])
        .unwrap();

        let names: Vec<String> = list_parameters(&source)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        // Uppercase sorts before lowercase.
        assert_eq!(names, vec!["Mid", "alpha", "zeta"]);
    }

    #[test]
    fn test_parameters_without_value_omitted() {
        let source = Snapshot::from_parameters(vec![
            SnapshotParameter::new("A", "Alpha", false).with_value("1"),
            SnapshotParameter::new("C", "Charlie", false),
            SnapshotParameter::new("D", "Delta", false).with_value("4"),
        ])
        .unwrap();

        let lines: Vec<String> = list_parameters(&source)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(lines, vec!["Alpha: 1", "Delta: 4"]);
    }

    #[test]
    fn test_empty_source_lists_nothing() {
        let source = Snapshot::from_parameters(Vec::new()).unwrap();
        assert!(list_parameters(&source).unwrap().is_empty());
    }
}
