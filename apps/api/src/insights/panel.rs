//! Insight panel lifecycle: `idle → loading → {ready | degraded}`.
//!
//! Each trigger bumps the panel's generation and hands out a ticket. A settled
//! outcome is committed only when its ticket carries the current generation,
//! so a slow response for a previously selected company can never overwrite
//! the result for the company now in view.

use serde::Serialize;
use tracing::{debug, warn};

use crate::insights::InsightCategory;
use crate::llm_client::InsightResult;

/// Result shown by a settled panel. `Degraded` carries the category fallback.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum InsightOutcome {
    Ready(InsightResult),
    Degraded(InsightResult),
}

impl InsightOutcome {
    pub fn result(&self) -> &InsightResult {
        match self {
            InsightOutcome::Ready(result) | InsightOutcome::Degraded(result) => result,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelStatus {
    Idle,
    Loading,
    Ready,
    Degraded,
}

/// Handed out by `InsightPanel::trigger`; required to commit an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelTicket {
    pub category: InsightCategory,
    pub generation: u64,
    pub company_id: String,
}

#[derive(Debug, Clone)]
enum PanelState {
    Idle,
    Loading,
    Settled(InsightOutcome),
}

/// Serializable snapshot of a panel.
#[derive(Debug, Clone, Serialize)]
pub struct PanelView {
    pub category: InsightCategory,
    pub status: PanelStatus,
    pub company_id: Option<String>,
    pub generation: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<InsightResult>,
}

#[derive(Debug, Clone)]
pub struct InsightPanel {
    category: InsightCategory,
    generation: u64,
    company_id: Option<String>,
    state: PanelState,
}

impl InsightPanel {
    pub fn new(category: InsightCategory) -> Self {
        Self {
            category,
            generation: 0,
            company_id: None,
            state: PanelState::Idle,
        }
    }

    /// Starts a request for `company_id`. Returns `None` when the panel is
    /// already loading or showing that same company: analytical panels only
    /// re-run when the company identity changes.
    pub fn trigger(&mut self, company_id: &str) -> Option<PanelTicket> {
        let same_company = self.company_id.as_deref() == Some(company_id);
        if same_company && !matches!(self.state, PanelState::Idle) {
            debug!(
                "{} panel already covers {company_id}; not re-triggering",
                self.category
            );
            return None;
        }

        self.generation += 1;
        self.company_id = Some(company_id.to_string());
        self.state = PanelState::Loading;

        Some(PanelTicket {
            category: self.category,
            generation: self.generation,
            company_id: company_id.to_string(),
        })
    }

    /// Commits `outcome` if `ticket` is still current. Returns whether it was committed.
    pub fn settle(&mut self, ticket: &PanelTicket, outcome: InsightOutcome) -> bool {
        if ticket.category != self.category || ticket.generation != self.generation {
            warn!(
                "Discarding stale {} result for {} (generation {} != current {})",
                self.category, ticket.company_id, ticket.generation, self.generation
            );
            return false;
        }

        self.state = PanelState::Settled(outcome);
        true
    }

    pub fn status(&self) -> PanelStatus {
        match &self.state {
            PanelState::Idle => PanelStatus::Idle,
            PanelState::Loading => PanelStatus::Loading,
            PanelState::Settled(InsightOutcome::Ready(_)) => PanelStatus::Ready,
            PanelState::Settled(InsightOutcome::Degraded(_)) => PanelStatus::Degraded,
        }
    }

    /// The settled outcome. `None` while idle or loading.
    pub fn outcome(&self) -> Option<&InsightOutcome> {
        match &self.state {
            PanelState::Settled(outcome) => Some(outcome),
            PanelState::Idle | PanelState::Loading => None,
        }
    }

    pub fn view(&self) -> PanelView {
        PanelView {
            category: self.category,
            status: self.status(),
            company_id: self.company_id.clone(),
            generation: self.generation,
            result: self.outcome().map(|outcome| outcome.result().clone()),
        }
    }
}
