//! Answers one chat question: complete → record answer or apology.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::chat::prompts::CHAT_PROMPT_TEMPLATE;
use crate::chat::{ChatMessage, ChatPanel, ChatTicket};
use crate::insights::builder::{render_template, CompanyFacts};
use crate::insights::completion::request_insight;
use crate::llm_client::{CompletionService, InsightRequest, InsightResult};
use crate::models::company::Company;

pub fn build_chat_prompt(company: &Company, question: &str) -> String {
    let facts = CompanyFacts::from_company(company);
    render_template(CHAT_PROMPT_TEMPLATE, |key| match key {
        "question" => Some(question),
        _ => facts.get(key),
    })
}

/// Chat answers are free text grounded with internet context.
pub fn chat_request(company: &Company, question: &str) -> InsightRequest {
    InsightRequest::new(build_chat_prompt(company, question)).with_internet_context(true)
}

/// Completes the question behind `ticket` and records the answer (or the
/// apology) in `chat`, returning the transcript afterwards.
///
/// The completion and the settle run in their own task: dropping this future
/// (client disconnect, request timeout) never leaves the chat stuck in flight.
pub async fn answer_and_settle(
    chat: Arc<Mutex<ChatPanel>>,
    service: Arc<dyn CompletionService>,
    company: Arc<Company>,
    ticket: ChatTicket,
) -> Vec<ChatMessage> {
    info!("Chat question about {}", company.display_name());

    let task = {
        let chat = chat.clone();
        let ticket = ticket.clone();
        tokio::spawn(async move {
            let answer = fetch_answer(service.as_ref(), &company, &ticket.question).await;
            chat.lock().await.settle(&ticket, answer);
        })
    };

    if let Err(e) = task.await {
        error!("Chat answer task failed: {e}");
        chat.lock().await.settle(&ticket, None);
    }

    chat.lock().await.transcript().to_vec()
}

async fn fetch_answer(
    service: &dyn CompletionService,
    company: &Company,
    question: &str,
) -> Option<String> {
    match request_insight(service, &chat_request(company, question)).await {
        Ok(InsightResult::Text(text)) => Some(text),
        Ok(InsightResult::Structured(value)) => Some(value.to_string()),
        Err(reason) => {
            warn!("Chat answer degraded: {reason}");
            None
        }
    }
}
