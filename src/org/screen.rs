//! Org units screen
//!
//! Owns the unit list, its derived index and forest, the edit form and the
//! screen notices. Every successful edit is followed by a full reload; there
//! is no partial patching of the derived structures.

use super::form::{EditForm, UpsertDraft};
use super::index::HierarchyIndex;
use super::repository::UnitRepository;
use super::tree::{build_forest, TreeNode, TreeOptions};
use super::unit::OrgUnit;
use crate::error::ConsoleResult;
use crate::notice::NoticeBoard;

/// Screen status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Loaded,
    LoadError,
    Submitting,
    SubmitError,
}

/// Stamp for one reload; only the newest ticket may update the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was started after this one; the response was dropped
    Superseded,
}

pub struct OrgUnitsScreen {
    state: ScreenState,
    index: HierarchyIndex,
    forest: Vec<TreeNode>,
    options: TreeOptions,
    latest_ticket: u64,
    pub form: EditForm,
    pub notices: NoticeBoard,
}

impl OrgUnitsScreen {
    pub fn new(options: TreeOptions) -> Self {
        Self {
            state: ScreenState::Idle,
            index: HierarchyIndex::default(),
            forest: Vec::new(),
            options,
            latest_ticket: 0,
            form: EditForm::new(),
            notices: NoticeBoard::new(),
        }
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn units(&self) -> &[OrgUnit] {
        self.index.units()
    }

    pub fn index(&self) -> &HierarchyIndex {
        &self.index
    }

    pub fn forest(&self) -> &[TreeNode] {
        &self.forest
    }

    /// Start a reload; responses carrying older tickets will be discarded
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.state = ScreenState::Loading;
        LoadTicket(self.latest_ticket)
    }

    /// Apply the response of the load stamped with `ticket`.
    ///
    /// On failure the previously rendered tree stays in place and an error
    /// notice is raised.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: ConsoleResult<Vec<OrgUnit>>,
    ) -> ConsoleResult<LoadOutcome> {
        if ticket.0 < self.latest_ticket {
            tracing::debug!(
                "Discarding org unit list for load {} (latest is {})",
                ticket.0,
                self.latest_ticket
            );
            return Ok(LoadOutcome::Superseded);
        }

        match result {
            Ok(units) => {
                self.apply_units(units);
                self.state = ScreenState::Loaded;
                Ok(LoadOutcome::Applied)
            }
            Err(e) => {
                self.state = ScreenState::LoadError;
                self.notices.error("Failed to load org units", e.to_string());
                Err(e)
            }
        }
    }

    fn apply_units(&mut self, units: Vec<OrgUnit>) {
        self.index = HierarchyIndex::build(units);
        self.forest = build_forest(&self.index, &self.options);

        let unreachable = self.index.unreachable();
        if !unreachable.is_empty() {
            tracing::warn!(
                "{} org unit(s) cannot be reached from any root: {:?}",
                unreachable.len(),
                unreachable
            );
        }
        tracing::debug!(
            "Rebuilt org hierarchy: {} units, {} roots",
            self.index.len(),
            self.forest.len()
        );
    }

    /// Fetch the full list and rebuild everything derived from it
    pub async fn load<R>(&mut self, repo: &R) -> ConsoleResult<LoadOutcome>
    where
        R: UnitRepository + ?Sized,
    {
        let ticket = self.begin_load();
        let result = repo.list_units().await;
        self.finish_load(ticket, result)
    }

    /// Seed the edit form from a listed unit
    pub fn select_unit(&mut self, id: i64) -> bool {
        self.form.select_unit(id, &self.index)
    }

    /// Send the form as an upsert, then reload.
    ///
    /// The form keeps the operator's input whatever the outcome. Parent
    /// tokens that are not integers are reported as warnings and left out.
    pub async fn submit<R>(&mut self, repo: &R) -> ConsoleResult<UpsertDraft>
    where
        R: UnitRepository + ?Sized,
    {
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                self.state = ScreenState::SubmitError;
                self.notices.error("Cannot save unit", e.to_string());
                return Err(e);
            }
        };

        for token in &draft.rejected_parents {
            self.notices.warning(
                "Ignored parent id",
                format!("'{}' is not an integer and was left out", token),
            );
        }

        self.state = ScreenState::Submitting;
        if let Err(e) = repo.upsert_unit(&draft.request).await {
            self.state = ScreenState::SubmitError;
            self.notices.error("Failed to save unit", e.to_string());
            return Err(e);
        }
        self.notices.success(
            "Unit saved",
            format!("{} (id:{})", draft.request.name, draft.request.id),
        );

        // Sequenced after the upsert so the reload reflects it
        self.load(repo).await?;
        Ok(draft)
    }

    /// Whether the last operation left the screen in an error state
    pub fn is_error(&self) -> bool {
        matches!(self.state, ScreenState::LoadError | ScreenState::SubmitError)
    }
}
