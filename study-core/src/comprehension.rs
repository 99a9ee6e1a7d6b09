//! Comprehension snapshot: subject rows joined with their field rows.
//!
//! The snapshot is serialized next to the conversation document when asking the model
//! which fields to update.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::records::{FieldRecord, SubjectRecord};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldComprehension {
    pub field: String,
    pub comprehension: f64,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectComprehension {
    pub subject: String,
    pub comprehension: f64,
    pub explanation: Option<String>,
    pub fields: Vec<FieldComprehension>,
}

/// Joins field rows under their subject, keeping subject fetch order.
///
/// Field rows pointing at an unknown subject are dropped.
pub fn assemble_comprehension(
    subjects: &[SubjectRecord],
    fields: &[FieldRecord],
) -> Vec<SubjectComprehension> {
    let mut snapshot: Vec<SubjectComprehension> = Vec::with_capacity(subjects.len());
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(subjects.len());

    for subject in subjects {
        index.insert(subject.id.as_str(), snapshot.len());
        snapshot.push(SubjectComprehension {
            subject: subject.subject.clone(),
            comprehension: subject.comprehension,
            explanation: subject.explanation.clone(),
            fields: Vec::new(),
        });
    }

    for field in fields {
        if let Some(&pos) = index.get(field.comprehension_id.as_str()) {
            snapshot[pos].fields.push(FieldComprehension {
                field: field.field.clone(),
                comprehension: field.comprehension,
                explanation: field.explanation.clone(),
            });
        }
    }

    snapshot
}
