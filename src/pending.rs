//! Deferred mutations with simulated latency.
//!
//! A deferred request is queued with a due time and a cancellation token. The
//! request loop drains due actions before handling the next request; an action
//! whose token was cancelled (directly, or because its owning view was
//! discarded) is reported as cancelled and its effect is never applied.

use crate::error::LmsError;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

const MAX_OUTCOMES: usize = 100;

/// Shared cancellation signal, checked cooperatively before an effect applies.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct PendingAction {
    pub ticket: String,
    pub view_id: Option<String>,
    pub method: String,
    pub params: serde_json::Value,
    pub due: Instant,
    pub token: CancellationToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    Applied,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionOutcome {
    pub ticket: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    pub status: ActionStatus,
    pub result: serde_json::Value,
}

impl ActionOutcome {
    pub fn cancelled(action: &PendingAction) -> Self {
        Self {
            ticket: action.ticket.clone(),
            method: action.method.clone(),
            view_id: action.view_id.clone(),
            status: ActionStatus::Cancelled,
            result: serde_json::Value::Null,
        }
    }

    pub fn applied(action: &PendingAction, result: serde_json::Value) -> Self {
        Self {
            status: ActionStatus::Applied,
            result,
            ..Self::cancelled(action)
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingSummary {
    pub ticket: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view_id: Option<String>,
    pub cancelled: bool,
    pub due_in_ms: u64,
}

#[derive(Debug)]
pub struct PendingQueue {
    delay: Duration,
    queue: VecDeque<PendingAction>,
    outcomes: VecDeque<ActionOutcome>,
}

impl PendingQueue {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            queue: VecDeque::new(),
            outcomes: VecDeque::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn enqueue(
        &mut self,
        method: &str,
        params: serde_json::Value,
        view_id: Option<String>,
        now: Instant,
    ) -> &PendingAction {
        let action = PendingAction {
            ticket: Uuid::new_v4().to_string(),
            view_id,
            method: method.to_string(),
            params,
            due: now + self.delay,
            token: CancellationToken::new(),
        };
        tracing::debug!(ticket = %action.ticket, method, "action deferred");
        self.queue.push_back(action);
        &self.queue[self.queue.len() - 1]
    }

    pub fn cancel(&mut self, ticket: &str) -> Result<(), LmsError> {
        let action = self
            .queue
            .iter()
            .find(|a| a.ticket == ticket)
            .ok_or_else(|| LmsError::UnknownTicket(ticket.to_string()))?;
        action.token.cancel();
        tracing::debug!(ticket, "action cancelled");
        Ok(())
    }

    /// Cancel every queued action owned by `view_id`; returns how many were cancelled.
    pub fn discard_view(&mut self, view_id: &str) -> usize {
        let mut n = 0;
        for action in self
            .queue
            .iter()
            .filter(|a| a.view_id.as_deref() == Some(view_id) && !a.token.is_cancelled())
        {
            action.token.cancel();
            n += 1;
        }
        if n > 0 {
            tracing::debug!(view_id, cancelled = n, "view discarded");
        }
        n
    }

    /// Remove and return, in enqueue order, every action that is due at `now`
    /// (all of them when `force`). Cancelled actions are returned regardless of
    /// their due time so they can be reported without waiting.
    pub fn take_ready(&mut self, now: Instant, force: bool) -> Vec<PendingAction> {
        let (ready, waiting): (VecDeque<_>, VecDeque<_>) = self
            .queue
            .drain(..)
            .partition(|a| force || a.due <= now || a.token.is_cancelled());
        self.queue = waiting;
        ready.into()
    }

    pub fn record(&mut self, outcome: ActionOutcome) {
        if self.outcomes.len() == MAX_OUTCOMES {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(outcome);
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ActionOutcome> {
        self.outcomes.iter()
    }

    pub fn snapshot(&self, now: Instant) -> Vec<PendingSummary> {
        self.queue
            .iter()
            .map(|a| PendingSummary {
                ticket: a.ticket.clone(),
                method: a.method.clone(),
                view_id: a.view_id.clone(),
                cancelled: a.token.is_cancelled(),
                due_in_ms: a.due.saturating_duration_since(now).as_millis() as u64,
            })
            .collect()
    }
}
