pub mod duplication;
pub mod semantic;
pub mod smells;

use crate::core::{Finding, SmellKind};
use std::collections::HashMap;

/// Group findings by smell kind, preserving order within each kind
pub fn group_by_kind(findings: Vec<Finding>) -> HashMap<SmellKind, Vec<Finding>> {
    findings.into_iter().fold(HashMap::new(), |mut acc, finding| {
        acc.entry(finding.kind).or_default().push(finding);
        acc
    })
}
