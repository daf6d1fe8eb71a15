//! Dashboard view-model.
//!
//! Holds the transient task cache plus the client-only view state: the
//! active filter and the single inline-edit slot. Every mutation that the
//! backend accepts is followed by a full reload, so the cache is only ever
//! a whole `GET /tasks` result — never a speculative merge. A rejected
//! mutation performs no reload and leaves the cache untouched.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::task::{Filter, Task, TaskCounts, TaskPatch};

/// Draft state for the one row being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSlot {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// View-model for the task dashboard
pub struct Dashboard {
    api: ApiClient,
    token: String,
    tasks: Vec<Task>,
    filter: Filter,
    edit: Option<EditSlot>,
}

impl Dashboard {
    pub fn new(api: ApiClient, token: String) -> Self {
        Self {
            api,
            token,
            tasks: Vec::new(),
            filter: Filter::All,
            edit: None,
        }
    }

    // =========================================================================
    // Cache accessors
    // =========================================================================

    /// The full cached list, as of the last reload
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// The filtered subset currently visible
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Counts over the full cache; invariant under filter changes
    pub fn counts(&self) -> TaskCounts {
        TaskCounts::of(&self.tasks)
    }

    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    // =========================================================================
    // Backend operations (each successful mutation ends in a full reload)
    // =========================================================================

    /// Fetch all tasks and replace the cache wholesale.
    pub fn load(&mut self) -> Result<()> {
        self.tasks = self.api.list_tasks(&self.token)?;
        Ok(())
    }

    /// Create a task. An empty title is rejected locally: no request goes
    /// out and no state changes.
    pub fn create(&mut self, title: &str, description: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title cannot be empty".to_string()));
        }
        self.api.create_task(&self.token, title, description)?;
        self.load()
    }

    /// Flip Pending <-> Completed via a partial update.
    pub fn toggle(&mut self, id: &str) -> Result<()> {
        let task = self
            .task_by_id(id)
            .ok_or_else(|| Error::Validation(format!("unknown task id '{id}'")))?;
        let patch = TaskPatch::status(task.status.toggled());
        self.api.update_task(&self.token, id, &patch)?;
        self.load()
    }

    /// Persist new title and description for a task.
    pub fn update(&mut self, id: &str, title: &str, description: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("title cannot be empty".to_string()));
        }
        let patch = TaskPatch::content(title.to_string(), description.to_string());
        self.api.update_task(&self.token, id, &patch)?;
        self.load()
    }

    /// Remove a task.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        self.api.delete_task(&self.token, id)?;
        self.load()
    }

    // =========================================================================
    // Local-only operations
    // =========================================================================

    /// Change the visible subset. Purely local; no backend call.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Enter edit mode for a row, seeding the draft from the cached task.
    /// Starting edit on another row abandons the previous draft.
    pub fn start_edit(&mut self, id: &str) -> Result<()> {
        let task = self
            .task_by_id(id)
            .ok_or_else(|| Error::Validation(format!("unknown task id '{id}'")))?;
        self.edit = Some(EditSlot {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
        });
        Ok(())
    }

    /// Discard the draft and return to viewing.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn edit(&self) -> Option<&EditSlot> {
        self.edit.as_ref()
    }

    pub fn edit_mut(&mut self) -> Option<&mut EditSlot> {
        self.edit.as_mut()
    }

    #[cfg(test)]
    pub(crate) fn seed(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Persist the draft. The slot stays occupied when the save is
    /// rejected, so the user can fix the draft and retry.
    pub fn save_edit(&mut self) -> Result<()> {
        let Some(slot) = self.edit.clone() else {
            return Err(Error::Validation("no edit in progress".to_string()));
        };
        self.update(&slot.id, &slot.title, &slot.description)?;
        self.edit = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn dashboard_with(tasks: Vec<Task>) -> Dashboard {
        let mut dashboard = Dashboard::new(ApiClient::new("http://127.0.0.1:1/api"), "t".into());
        dashboard.tasks = tasks;
        dashboard
    }

    fn task(id: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status,
            created_at: None,
        }
    }

    #[test]
    fn create_with_empty_title_makes_no_request() {
        // The API client points at a closed port; a request would fail
        // with Network, not Validation.
        let mut dashboard = dashboard_with(Vec::new());
        let err = dashboard.create("   ", "desc").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(dashboard.tasks().is_empty());
    }

    #[test]
    fn filter_changes_visible_subset_but_not_counts() {
        let mut dashboard = dashboard_with(vec![
            task("1", "a", TaskStatus::Pending),
            task("2", "b", TaskStatus::Completed),
            task("3", "c", TaskStatus::Pending),
        ]);
        let before = dashboard.counts();

        dashboard.set_filter(Filter::Completed);
        let visible: Vec<&str> = dashboard.visible().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec!["2"]);
        assert_eq!(dashboard.counts(), before);

        dashboard.set_filter(Filter::Pending);
        assert_eq!(dashboard.visible().len(), 2);
        assert_eq!(dashboard.counts(), before);
    }

    #[test]
    fn start_edit_seeds_draft_from_cache() {
        let mut tasks = vec![task("1", "Buy milk", TaskStatus::Pending)];
        tasks[0].description = Some("2 liters".to_string());
        let mut dashboard = dashboard_with(tasks);

        dashboard.start_edit("1").expect("start edit");
        let slot = dashboard.edit().expect("slot");
        assert_eq!(slot.id, "1");
        assert_eq!(slot.title, "Buy milk");
        assert_eq!(slot.description, "2 liters");
    }

    #[test]
    fn starting_edit_on_another_row_abandons_previous_draft() {
        let mut dashboard = dashboard_with(vec![
            task("1", "a", TaskStatus::Pending),
            task("2", "b", TaskStatus::Pending),
        ]);

        dashboard.start_edit("1").expect("edit 1");
        dashboard.edit_mut().expect("slot").title = "changed".to_string();
        dashboard.start_edit("2").expect("edit 2");

        let slot = dashboard.edit().expect("slot");
        assert_eq!(slot.id, "2");
        assert_eq!(slot.title, "b");
    }

    #[test]
    fn cancel_edit_discards_draft() {
        let mut dashboard = dashboard_with(vec![task("1", "a", TaskStatus::Pending)]);
        dashboard.start_edit("1").expect("edit");
        dashboard.cancel_edit();
        assert!(dashboard.edit().is_none());
    }

    #[test]
    fn save_edit_with_empty_title_keeps_slot_and_cache() {
        let mut dashboard = dashboard_with(vec![task("1", "a", TaskStatus::Pending)]);
        dashboard.start_edit("1").expect("edit");
        dashboard.edit_mut().expect("slot").title = " ".to_string();

        let err = dashboard.save_edit().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(dashboard.edit().is_some());
        assert_eq!(dashboard.tasks().len(), 1);
    }

    #[test]
    fn toggle_unknown_id_is_local_error() {
        let mut dashboard = dashboard_with(Vec::new());
        let err = dashboard.toggle("missing").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
