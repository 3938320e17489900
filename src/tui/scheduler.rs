//! Deadline timers driven by the event loop.
//!
//! Nothing here spawns threads: the loop asks for due tasks after every
//! poll, so all state changes happen on the UI thread.

use crate::host::NodeKey;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Rebuild and redraw one file's headings
    RebuildFile(PathBuf),
    /// Drop the location highlight if it is still on this row
    ClearHighlight(NodeKey),
    /// Clear the selection left by a heading navigation
    ClearSelection,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    pending: Vec<(Instant, Task)>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, delay: Duration, task: Task) {
        self.schedule_at(Instant::now() + delay, task);
    }

    pub fn schedule_at(&mut self, deadline: Instant, task: Task) {
        self.pending.push((deadline, task));
    }

    /// Schedule `task`, dropping any identical task still pending.
    ///
    /// A burst of changes to one file thus yields a single rebuild, run
    /// `delay` after the last change.
    pub fn debounce(&mut self, delay: Duration, task: Task) {
        self.debounce_at(Instant::now() + delay, task);
    }

    pub fn debounce_at(&mut self, deadline: Instant, task: Task) {
        self.cancel(&task);
        self.pending.push((deadline, task));
    }

    pub fn cancel(&mut self, task: &Task) {
        self.pending.retain(|(_, t)| t != task);
    }

    pub fn cancel_rebuilds(&mut self) {
        self.pending
            .retain(|(_, t)| !matches!(t, Task::RebuildFile(_)));
    }

    pub fn cancel_highlight_clears(&mut self) {
        self.pending
            .retain(|(_, t)| !matches!(t, Task::ClearHighlight(_)));
    }

    pub fn is_pending(&self, task: &Task) -> bool {
        self.pending.iter().any(|(_, t)| t == task)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return every task whose deadline has passed, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<Task> {
        let (mut due, rest): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|(deadline, _)| *deadline <= now);
        self.pending = rest;
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, task)| task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rebuild(name: &str) -> Task {
        Task::RebuildFile(PathBuf::from(name))
    }

    #[test]
    fn test_tasks_fire_after_deadline() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(start + Duration::from_millis(300), Task::ClearSelection);

        assert!(scheduler.take_due(start).is_empty());
        assert!(scheduler.take_due(start + Duration::from_millis(299)).is_empty());
        assert_eq!(
            scheduler.take_due(start + Duration::from_millis(300)),
            vec![Task::ClearSelection]
        );
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_debounce_supersedes_pending_rebuild() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.debounce_at(start + Duration::from_millis(200), rebuild("a.md"));
        scheduler.debounce_at(start + Duration::from_millis(300), rebuild("b.md"));
        scheduler.debounce_at(start + Duration::from_millis(350), rebuild("a.md"));

        assert_eq!(scheduler.len(), 2);
        assert_eq!(
            scheduler.take_due(start + Duration::from_millis(300)),
            vec![rebuild("b.md")]
        );
        assert_eq!(
            scheduler.take_due(start + Duration::from_millis(400)),
            vec![rebuild("a.md")]
        );
    }

    #[test]
    fn test_due_tasks_come_in_deadline_order() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(start + Duration::from_millis(20), Task::ClearSelection);
        scheduler.schedule_at(start + Duration::from_millis(10), rebuild("a.md"));

        assert_eq!(
            scheduler.take_due(start + Duration::from_millis(50)),
            vec![rebuild("a.md"), Task::ClearSelection]
        );
    }

    #[test]
    fn test_cancel_rebuilds_keeps_other_tasks() {
        let start = Instant::now();
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(start, rebuild("a.md"));
        scheduler.schedule_at(start, Task::ClearSelection);

        scheduler.cancel_rebuilds();
        assert!(!scheduler.is_pending(&rebuild("a.md")));
        assert!(scheduler.is_pending(&Task::ClearSelection));
    }

    #[test]
    fn test_cancel_highlight_clears() {
        let start = Instant::now();
        let key = NodeKey {
            path: PathBuf::from("a.md"),
            ordinal: 0,
        };
        let mut scheduler = Scheduler::new();
        scheduler.schedule_at(start, Task::ClearHighlight(key.clone()));
        scheduler.schedule_at(start, rebuild("a.md"));

        scheduler.cancel_highlight_clears();
        assert!(!scheduler.is_pending(&Task::ClearHighlight(key)));
        assert!(scheduler.is_pending(&rebuild("a.md")));
    }
}
