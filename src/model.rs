//! Projects, tasks and the output records they produce.
//!
//! These types are owned by the host task runner. The console only reads
//! them, so everything here is plain data with serde support for the
//! projects file and the output feed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single command configured in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    /// Path or name of the program to run.
    pub executable: String,
    /// Argument string passed to the program, kept as written.
    #[serde(default)]
    pub arguments: String,
}

impl Task {
    pub fn new(executable: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            executable: executable.into(),
            arguments: arguments.into(),
        }
    }

    /// Label shown in the task picker: executable and arguments joined by a space.
    pub fn label(&self) -> String {
        if self.arguments.is_empty() {
            self.executable.clone()
        } else {
            format!("{} {}", self.executable, self.arguments)
        }
    }
}

/// A project and its ordered task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Project {
    pub fn new(name: impl Into<String>, tasks: Vec<Task>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tasks,
        }
    }

    /// Position of a task in this project's task list.
    pub fn task_index(&self, task_id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == task_id)
    }

    pub fn task(&self, task_id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }
}

/// One captured chunk of subprocess output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub id: Uuid,
    pub task_id: Uuid,
    pub project_id: Uuid,
    pub content: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl OutputRecord {
    pub fn new(project_id: Uuid, task_id: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task_id,
            project_id,
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_label_joins_executable_and_arguments() {
        let task = Task::new("npm", "run dev");
        assert_eq!(task.label(), "npm run dev");
    }

    #[test]
    fn test_task_label_without_arguments() {
        let task = Task::new("/usr/bin/make", "");
        assert_eq!(task.label(), "/usr/bin/make");
    }

    #[test]
    fn test_project_task_index() {
        let a = Task::new("cargo", "watch");
        let b = Task::new("npm", "start");
        let b_id = b.id;
        let project = Project::new("web", vec![a, b]);

        assert_eq!(project.task_index(b_id), Some(1));
        assert_eq!(project.task_index(Uuid::new_v4()), None);
        assert_eq!(project.task(b_id).map(|t| t.label()), Some("npm start".into()));
    }

    #[test]
    fn test_output_record_deserializes_without_timestamp() {
        let json = format!(
            r#"{{"id":"{}","task_id":"{}","project_id":"{}","content":"hello"}}"#,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4()
        );
        let record: OutputRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.content, "hello");
    }
}
