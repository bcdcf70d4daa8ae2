//! Dashboard sessions — one viewer's navigation state, insight panels and chat.
//!
//! Flow on navigation: resolve company → store navigation → if the company
//! identity changed: reset chat, trigger every insight panel.
//!
//! Each panel runs as its own spawned task and owns its own lock, so a slow
//! panel never blocks the others or the session. Late results for a company
//! that is no longer selected are dropped by the panel's generation check.

pub mod handlers;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;
use uuid::Uuid;

use crate::chat::assistant::answer_and_settle;
use crate::chat::prompts::SUGGESTED_QUESTIONS;
use crate::chat::{ChatMessage, ChatPanel};
use crate::companies::{resolve_company, CompanyProvider};
use crate::errors::AppError;
use crate::insights::panel::{InsightPanel, PanelView};
use crate::insights::runner::run_insight;
use crate::insights::InsightCategory;
use crate::llm_client::CompletionService;
use crate::models::company::Company;
use crate::navigation::{NavLink, NavigationState};

/// What the session currently shows. Guarded as one unit so navigation
/// and company always agree.
#[derive(Debug, Default)]
struct Selection {
    navigation: NavigationState,
    company: Option<Arc<Company>>,
}

pub struct DashboardSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    selection: Mutex<Selection>,
    /// Indexed by `InsightCategory as usize`, in `InsightCategory::ALL` order.
    panels: [Arc<Mutex<InsightPanel>>; 6],
    chat: Arc<Mutex<ChatPanel>>,
    last_seen: Mutex<Instant>,
}

#[derive(Debug, Serialize)]
pub struct ChatView {
    pub transcript: Vec<ChatMessage>,
    pub in_flight: bool,
    pub suggested_questions: [&'static str; 5],
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub navigation: NavigationState,
    pub url: String,
    pub links: Vec<NavLink>,
    pub company: Option<Company>,
    pub panels: Vec<PanelView>,
    pub chat: ChatView,
}

impl DashboardSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            selection: Mutex::new(Selection::default()),
            panels: InsightCategory::ALL
                .map(|category| Arc::new(Mutex::new(InsightPanel::new(category)))),
            chat: Arc::new(Mutex::new(ChatPanel::new())),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    /// Applies `requested` navigation. Unknown or missing tickers resolve to the
    /// first company. Returns the effective navigation state.
    pub async fn navigate(
        &self,
        requested: NavigationState,
        companies: &dyn CompanyProvider,
        completion: Arc<dyn CompletionService>,
    ) -> Result<NavigationState, AppError> {
        let company = resolve_company(companies, requested.selected_company.as_deref()).await?;

        let mut selection = self.selection.lock().await;

        let navigation = NavigationState {
            active_tab: requested.active_tab,
            selected_company: company
                .as_ref()
                .and_then(|c| c.ticker_symbol.clone())
                .or(requested.selected_company),
        };

        let company_changed = !same_company(selection.company.as_ref(), company.as_ref());
        selection.navigation = navigation.clone();

        if company_changed {
            info!(
                "Session {} switched company: {:?} -> {:?}",
                self.id,
                selection.company.as_ref().map(|c| c.display_name().to_string()),
                company.as_ref().map(|c| c.display_name()),
            );
            selection.company = company.clone();
            self.chat.lock().await.reset();
            if let Some(company) = company {
                self.trigger_panels(company, completion).await;
            }
        }

        Ok(navigation)
    }

    /// Triggers every panel for `company`. Panels already covering this company
    /// are left alone. Each triggered panel settles from its own task.
    async fn trigger_panels(&self, company: Arc<Company>, completion: Arc<dyn CompletionService>) {
        let company_id = company
            .identity()
            .unwrap_or(company.display_name())
            .to_string();

        for panel in &self.panels {
            let Some(ticket) = panel.lock().await.trigger(&company_id) else {
                continue;
            };

            let panel = panel.clone();
            let company = company.clone();
            let completion = completion.clone();
            tokio::spawn(async move {
                let outcome = run_insight(completion.as_ref(), ticket.category, &company).await;
                panel.lock().await.settle(&ticket, outcome);
            });
        }
    }

    /// Asks a chat question about the company in view. The company snapshot
    /// and the chat ticket are taken under the selection lock, so a concurrent
    /// company switch either happens first or drops this answer.
    pub async fn ask(
        &self,
        completion: Arc<dyn CompletionService>,
        question: &str,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let (company, ticket) = {
            let selection = self.selection.lock().await;
            let company = selection
                .company
                .clone()
                .ok_or_else(|| AppError::Validation("No company selected".to_string()))?;
            let ticket = self.chat.lock().await.begin(question)?;
            (company, ticket)
        };

        Ok(answer_and_settle(self.chat.clone(), completion, company, ticket).await)
    }

    pub async fn touch(&self) {
        *self.last_seen.lock().await = Instant::now();
    }

    pub async fn idle_for(&self) -> Duration {
        self.last_seen.lock().await.elapsed()
    }

    pub async fn panel_view(&self, category: InsightCategory) -> PanelView {
        self.panels[category as usize].lock().await.view()
    }

    pub async fn chat_view(&self) -> ChatView {
        let chat = self.chat.lock().await;
        ChatView {
            transcript: chat.transcript().to_vec(),
            in_flight: chat.is_in_flight(),
            suggested_questions: SUGGESTED_QUESTIONS,
        }
    }

    pub async fn view(&self) -> SessionView {
        let (navigation, company) = {
            let selection = self.selection.lock().await;
            (selection.navigation.clone(), selection.company.clone())
        };

        let mut panels = Vec::with_capacity(self.panels.len());
        for category in InsightCategory::ALL {
            panels.push(self.panel_view(category).await);
        }

        SessionView {
            session_id: self.id,
            created_at: self.created_at,
            url: navigation.url(),
            links: navigation.links(),
            navigation,
            company: company.map(|c| c.as_ref().clone()),
            panels,
            chat: self.chat_view().await,
        }
    }
}

/// Two selections show the same company when their identities match. Records
/// without any identity are compared by reference.
fn same_company(current: Option<&Arc<Company>>, next: Option<&Arc<Company>>) -> bool {
    match (current, next) {
        (None, None) => true,
        (Some(a), Some(b)) => match (a.identity(), b.identity()) {
            (Some(x), Some(y)) => x == y,
            (None, None) => Arc::ptr_eq(a, b),
            _ => false,
        },
        _ => false,
    }
}

impl Default for DashboardSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Live sessions keyed by id.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<DashboardSession>>>>,
}

impl SessionStore {
    pub async fn create(&self) -> Arc<DashboardSession> {
        let session = Arc::new(DashboardSession::new());
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        info!("Created dashboard session {}", session.id);
        session
    }

    /// Looks a session up and marks it as seen.
    pub async fn get(&self, id: Uuid) -> Result<Arc<DashboardSession>, AppError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.touch().await;
        Ok(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
    }

    /// Drops every session not seen for at least `ttl`. Returns how many went.
    pub async fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;

        let mut expired = Vec::new();
        for (id, session) in sessions.iter() {
            if session.idle_for().await >= ttl {
                expired.push(*id);
            }
        }

        for id in &expired {
            sessions.remove(id);
        }
        expired.len()
    }

    /// Background sweep that evicts idle sessions every `ttl / 4` (at least 1s).
    pub fn spawn_sweeper(&self, ttl: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let period = (ttl / 4).max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(ttl).await;
                if evicted > 0 {
                    info!("Evicted {evicted} idle dashboard sessions");
                }
            }
        })
    }
}
