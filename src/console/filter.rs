//! Selecting and numbering the records shown in the console.

use crate::model::OutputRecord;
use crate::store::OutputStore;
use uuid::Uuid;

/// A record paired with its position in the currently filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedOutputRecord<'a> {
    pub index: usize,
    pub record: &'a OutputRecord,
}

/// Whether `record` belongs to the view of `project_id`, scoped to `task_id` if given.
pub fn matches(record: &OutputRecord, project_id: Uuid, task_id: Option<Uuid>) -> bool {
    record.project_id == project_id && task_id.is_none_or(|t| record.task_id == t)
}

/// Records of `project_id` (and `task_id`, if given) in append order, numbered from zero.
///
/// The index counts only included records, so row banding is independent of
/// where a record sits in the full store.
pub fn filter(
    records: &[OutputRecord],
    project_id: Uuid,
    task_id: Option<Uuid>,
) -> Vec<IndexedOutputRecord<'_>> {
    records
        .iter()
        .filter(|r| matches(r, project_id, task_id))
        .enumerate()
        .map(|(index, record)| IndexedOutputRecord { index, record })
        .collect()
}

/// Remove every record the same view would show. Returns how many were removed.
pub fn clear<S: OutputStore>(store: &mut S, project_id: Uuid, task_id: Option<Uuid>) -> usize {
    store.remove_where(|r| matches(r, project_id, task_id))
}
