use std::sync::Arc;
use std::time::Duration;

use parley_llm::{ChatClient, ChatOptions, ChatRequest, ChatResponse, LlmError, Message};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Result, SessionError};
use crate::models::Turn;
use crate::settings::NEW_CHAT_TITLE;
use crate::store::ChatStore;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Resolution of a model call as seen from the outside
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyState {
    Pending,
    Resolved(String),
    Failed(LlmError),
}

impl ReplyState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// A user turn that has been recorded and is waiting for its reply
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Chat the reply belongs to (already renamed if it was "New Chat")
    pub title: String,
    pub request: ChatRequest,
}

/// In-flight model call running as its own task.
///
/// The call stops at the deadline or when cancelled, whichever comes first.
/// Dropping the handle aborts the task.
pub struct ModelCall {
    title: String,
    cancel: CancellationToken,
    state: watch::Receiver<ReplyState>,
    task: JoinHandle<()>,
}

impl ModelCall {
    pub fn spawn(
        client: Arc<dyn ChatClient>,
        title: impl Into<String>,
        request: ChatRequest,
        deadline: Duration,
    ) -> Self {
        let (tx, state) = watch::channel(ReplyState::Pending);
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => Err(LlmError::Cancelled),
                result = tokio::time::timeout(deadline, client.chat(request)) => match result {
                    Ok(response) => response.and_then(ChatResponse::into_text),
                    Err(_) => Err(LlmError::Timeout(deadline)),
                },
            };

            let resolved = match outcome {
                Ok(text) => ReplyState::Resolved(text),
                Err(e) => ReplyState::Failed(e),
            };
            let _ = tx.send(resolved);
        });

        Self {
            title: title.into(),
            cancel,
            state,
            task,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current state without waiting
    pub fn state(&self) -> ReplyState {
        self.state.borrow().clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token that cancels this call, for wiring to signals or UI actions
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Wait until the call resolves or fails
    pub async fn finish(mut self) -> ReplyState {
        loop {
            {
                let current = self.state.borrow_and_update();
                if !current.is_pending() {
                    return current.clone();
                }
            }

            if self.state.changed().await.is_err() {
                // Sender gone without a verdict: the task died
                let current = self.state.borrow().clone();
                return match current {
                    ReplyState::Pending => ReplyState::Failed(LlmError::Cancelled),
                    other => other,
                };
            }
        }
    }
}

impl Drop for ModelCall {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Drives one chat exchange: record the user turn, ask the model, record
/// the reply.
#[derive(Clone)]
pub struct Conversation {
    client: Arc<dyn ChatClient>,
    model: String,
    options: ChatOptions,
    system_prompt: Option<String>,
    timeout: Duration,
}

impl Conversation {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            options: ChatOptions::default(),
            system_prompt: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Record the user's text in the active chat and build the request.
    ///
    /// A chat still called "New Chat" is renamed after the message in the same
    /// step, so the turn is never visible under the placeholder title.
    pub fn prepare(&self, store: &mut ChatStore, text: &str) -> Result<Exchange> {
        if text.trim().is_empty() {
            return Err(SessionError::EmptyMessage);
        }

        let current = store.active_title().to_string();
        store.append_turn(&current, Turn::user(text))?;

        if current == NEW_CHAT_TITLE {
            let derived = store.derive_title(text);
            store.rename_session(&current, &derived)?;
        }
        let title = store.active_title().to_string();

        let session = store
            .session(&title)
            .ok_or_else(|| SessionError::NotFound(title.clone()))?;

        let mut messages = Vec::with_capacity(session.len() + 1);
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message::system(prompt.clone()));
        }
        messages.extend(session.turns().iter().map(Turn::to_message));

        let request = ChatRequest::new(self.model.clone(), messages).with_options(self.options.clone());
        Ok(Exchange { title, request })
    }

    /// Start the model call for a prepared exchange
    pub fn dispatch(&self, exchange: Exchange) -> ModelCall {
        tracing::debug!(title = %exchange.title, model = %self.model, "dispatching model call");
        ModelCall::spawn(
            self.client.clone(),
            exchange.title,
            exchange.request,
            self.timeout,
        )
    }

    /// Record the outcome of a finished call.
    ///
    /// A failure leaves the user turn in place and adds nothing.
    pub fn complete(&self, store: &mut ChatStore, title: &str, state: ReplyState) -> Result<Turn> {
        match state {
            ReplyState::Resolved(text) => {
                let turn = Turn::assistant(text);
                store.append_turn(title, turn.clone())?;
                Ok(turn)
            }
            ReplyState::Failed(e) => {
                tracing::warn!(title, error = %e, "model call failed");
                Err(SessionError::ModelCall(e))
            }
            ReplyState::Pending => Err(SessionError::Pending(title.to_string())),
        }
    }

    /// Full exchange in one call: prepare, dispatch, wait, complete
    pub async fn send(&self, store: &mut ChatStore, text: &str) -> Result<Turn> {
        let exchange = self.prepare(store, text)?;
        let call = self.dispatch(exchange);
        let title = call.title().to_string();
        let state = call.finish().await;
        self.complete(store, &title, state)
    }
}
