//! Interactive chat panel: an append-only transcript of questions and answers
//! about the company in view, with at most one question in flight.

pub mod assistant;
pub mod handlers;
pub mod prompts;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::chat::prompts::CHAT_FALLBACK_REPLY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn now(role: ChatRole, text: String) -> Self {
        Self {
            role,
            text,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChatRejection {
    #[error("question cannot be empty")]
    EmptyQuestion,

    #[error("a question is already being answered; wait for it to finish")]
    InFlight,
}

/// Returned by `ChatPanel::begin`; required to record the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTicket {
    generation: u64,
    pub question: String,
}

#[derive(Debug, Default)]
pub struct ChatPanel {
    transcript: Vec<ChatMessage>,
    in_flight: bool,
    /// Bumped by `reset`; answers for an older generation are dropped.
    generation: u64,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts a question: appends it to the transcript right away and marks
    /// the panel busy. Blank questions and questions asked while another is
    /// in flight are rejected without touching the transcript.
    pub fn begin(&mut self, question: &str) -> Result<ChatTicket, ChatRejection> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatRejection::EmptyQuestion);
        }
        if self.in_flight {
            return Err(ChatRejection::InFlight);
        }

        self.in_flight = true;
        self.transcript
            .push(ChatMessage::now(ChatRole::User, question.to_string()));

        Ok(ChatTicket {
            generation: self.generation,
            question: question.to_string(),
        })
    }

    /// Records the answer (or the apology when there is none) and frees the
    /// panel. Returns `false` if the chat was reset since `ticket` was issued.
    pub fn settle(&mut self, ticket: &ChatTicket, answer: Option<String>) -> bool {
        if ticket.generation != self.generation {
            warn!("Dropping chat answer for a reset conversation");
            return false;
        }

        let text = answer.unwrap_or_else(|| CHAT_FALLBACK_REPLY.to_string());
        self.transcript.push(ChatMessage::now(ChatRole::Assistant, text));
        self.in_flight = false;
        true
    }

    /// Starts a fresh conversation, e.g. when the company in view changes.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.transcript.clear();
        self.in_flight = false;
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}
