//! Task selector state.
//!
//! The console shows either every task of the project or a single task. The
//! selector is driven by picks in the footer picker and by selection signals
//! from the host, and keeps the picker index in step with the selected task.

use crate::events::{SelectionSignal, ALL_TASKS_INDEX};
use crate::model::Project;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selector {
    #[default]
    AllTasks,
    /// May name a task that is no longer in the project; the view is then empty.
    SingleTask(Uuid),
}

impl Selector {
    /// The task filter passed to [`super::filter::filter`].
    pub fn task_id(&self) -> Option<Uuid> {
        match self {
            Selector::AllTasks => None,
            Selector::SingleTask(id) => Some(*id),
        }
    }
}

/// Selection state of one open console.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelection {
    selector: Selector,
    /// Picker position. `None` is the "All Tasks" entry.
    selected_index: Option<usize>,
}

impl ViewSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selector(&self) -> Selector {
        self.selector
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn task_id(&self) -> Option<Uuid> {
        self.selector.task_id()
    }

    /// Picker entry "All Tasks".
    pub fn select_all(&mut self) {
        self.selector = Selector::AllTasks;
        self.selected_index = None;
    }

    /// Picker entry for the task at `index`. Returns false if there is no such task.
    pub fn select_task_at(&mut self, project: &Project, index: usize) -> bool {
        match project.tasks.get(index) {
            Some(task) => {
                self.selector = Selector::SingleTask(task.id);
                self.selected_index = Some(index);
                true
            }
            None => false,
        }
    }

    /// Apply a selection signal from the host. Returns whether the selector changed.
    pub fn apply(&mut self, signal: &SelectionSignal, project: &Project) -> bool {
        let before = self.clone();
        match signal {
            SelectionSignal::TaskIndexChanged(ALL_TASKS_INDEX) => self.select_all(),
            SelectionSignal::TaskIndexChanged(index) => {
                let in_range = usize::try_from(*index)
                    .ok()
                    .is_some_and(|i| self.select_task_at(project, i));
                if !in_range {
                    tracing::warn!(
                        index = *index,
                        task_count = project.tasks.len(),
                        project = %project.name,
                        "ignoring task selection outside the project's task list"
                    );
                }
            }
            SelectionSignal::ViewingTaskChanged(task_id) => {
                self.selector = Selector::SingleTask(*task_id);
                if let Some(index) = project.task_index(*task_id) {
                    self.selected_index = Some(index);
                }
            }
        }
        *self != before
    }

    /// Move the picker to the next entry, wrapping from the last task to "All Tasks".
    pub fn cycle_next(&mut self, project: &Project) {
        let count = project.tasks.len();
        match self.selected_index {
            None if count > 0 => {
                self.select_task_at(project, 0);
            }
            Some(i) if i + 1 < count => {
                self.select_task_at(project, i + 1);
            }
            _ => self.select_all(),
        }
    }

    /// Move the picker to the previous entry, wrapping from "All Tasks" to the last task.
    pub fn cycle_prev(&mut self, project: &Project) {
        let count = project.tasks.len();
        match self.selected_index {
            None if count > 0 => {
                self.select_task_at(project, count - 1);
            }
            Some(i) if i > 0 && i <= count => {
                self.select_task_at(project, i - 1);
            }
            _ => self.select_all(),
        }
    }

    /// Text of the current picker entry.
    pub fn picker_label(&self, project: &Project) -> String {
        match self.selector {
            Selector::AllTasks => "All Tasks".to_string(),
            Selector::SingleTask(id) => project
                .task(id)
                .map(|t| t.label())
                .unwrap_or_else(|| "Unknown task".to_string()),
        }
    }
}

/// The picker is only offered when there is more than one task to choose from.
pub fn picker_visible(project: &Project) -> bool {
    project.tasks.len() > 1
}
