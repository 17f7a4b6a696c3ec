//! Signals delivered to the console.
//!
//! The host publishes on two channels: new output (optionally carrying the
//! record that was produced) and selection changes. Both arrive as
//! [`ConsoleEvent`] values over an mpsc channel so the console can be driven
//! without a terminal in tests.

use crate::model::OutputRecord;
use std::sync::mpsc::{self, Receiver, Sender};
use uuid::Uuid;

/// Index value meaning "All Tasks" on the selection channel.
pub const ALL_TASKS_INDEX: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionSignal {
    /// The selected task index changed. `-1` selects all tasks.
    TaskIndexChanged(i64),
    /// The host started viewing a specific task.
    ViewingTaskChanged(Uuid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleEvent {
    /// New output was produced. `None` asks to re-scroll to the latest known record.
    NewOutput(Option<OutputRecord>),
    Selection(SelectionSignal),
}

/// Sending half handed to whoever produces console signals.
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: Sender<ConsoleEvent>,
}

impl EventSender {
    /// Send an event. Returns false once the console has gone away.
    pub fn send(&self, event: ConsoleEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn new_output(&self, record: OutputRecord) -> bool {
        self.send(ConsoleEvent::NewOutput(Some(record)))
    }

    pub fn scroll_to_latest(&self) -> bool {
        self.send(ConsoleEvent::NewOutput(None))
    }

    pub fn select_index(&self, index: i64) -> bool {
        self.send(ConsoleEvent::Selection(SelectionSignal::TaskIndexChanged(
            index,
        )))
    }

    pub fn viewing_task(&self, task_id: Uuid) -> bool {
        self.send(ConsoleEvent::Selection(SelectionSignal::ViewingTaskChanged(
            task_id,
        )))
    }
}

/// Receiving half owned by the console loop.
#[derive(Debug)]
pub struct EventReceiver {
    rx: Receiver<ConsoleEvent>,
}

impl EventReceiver {
    /// All events queued since the last drain, in send order.
    pub fn drain(&self) -> Vec<ConsoleEvent> {
        self.rx.try_iter().collect()
    }
}

pub fn channel() -> (EventSender, EventReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventSender { tx }, EventReceiver { rx })
}
