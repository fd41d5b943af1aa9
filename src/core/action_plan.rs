// src/core/action_plan.rs

use serde::{Deserialize, Serialize};
use strum::Display;
use tracing::debug;

use crate::core::errors::ActionPlanError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
pub enum Priority {
    High,
    Medium,
    Low,
}

// A single remediation task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionItem {
    pub id: u32,
    pub title: String,
    pub priority: Priority,
    pub due: String,
    pub assignee: String,
    #[serde(default)]
    pub completed: bool,
}

impl ActionItem {
    pub fn new(id: u32, title: &str, priority: Priority, due: &str, assignee: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            priority,
            due: due.to_string(),
            assignee: assignee.to_string(),
            completed: false,
        }
    }
}

/// Remediation tasks for one organisation, owned by whoever displays them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionPlan {
    items: Vec<ActionItem>,
}

impl ActionPlan {
    pub fn new(items: Vec<ActionItem>) -> Self {
        Self { items }
    }

    /// Appends a task with the next free id and returns that id.
    pub fn add(&mut self, title: &str, priority: Priority, due: &str, assignee: &str) -> u32 {
        let id = self.items.iter().map(|i| i.id).max().map_or(1, |max| max + 1);
        self.items.push(ActionItem::new(id, title, priority, due, assignee));
        debug!(id, title, "Action item added.");
        id
    }

    /// Flips the completion flag of a task and returns its new value.
    pub fn toggle(&mut self, id: u32) -> Result<bool, ActionPlanError> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(ActionPlanError::UnknownTask(id))?;
        item.completed = !item.completed;
        debug!(id, completed = item.completed, "Action item toggled.");
        Ok(item.completed)
    }

    pub fn items(&self) -> &[ActionItem] {
        &self.items
    }

    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|i| i.completed).count()
    }

    /// Rounded share of completed tasks; 0 for an empty plan.
    pub fn progress_percentage(&self) -> u8 {
        if self.items.is_empty() {
            return 0;
        }
        let ratio = self.completed_count() as f64 / self.items.len() as f64;
        (ratio * 100.0).round() as u8
    }
}
