use crate::client::{Endpoint, ResponseBody, ScoringApi};
use crate::error::AppError;
use crate::form::TaskForm;
use crate::model::{ScoredTask, Task};
use crate::payload::{self, Payload};
use crate::render::{self, Block, Markup, MessageKind, Region};
use serde_json::Value;

pub const SUGGESTION_LIMIT: usize = 3;

/// Owns the session's task list and drives one request/render cycle per action.
pub struct Controller<A, R> {
    tasks: Vec<Task>,
    api: A,
    region: R,
}

impl<A: ScoringApi, R: Region> Controller<A, R> {
    pub fn new(api: A, region: R) -> Self {
        Self {
            tasks: Vec::new(),
            api,
            region,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn region(&self) -> &R {
        &self.region
    }

    /// Empties the task list and returns how many tasks were dropped.
    pub fn clear_tasks(&mut self) -> usize {
        let dropped = self.tasks.len();
        self.tasks.clear();
        dropped
    }

    pub fn add_task(&mut self, form: &TaskForm) -> Result<&Task, AppError> {
        let task = match form.to_task() {
            Ok(task) => task,
            Err(err) => {
                tracing::warn!(error = %err, "task rejected");
                self.region.replace(error_markup(None, &err));
                return Err(err);
            }
        };

        self.region.replace(Markup::message(
            MessageKind::Success,
            format!("✅ Task \"{}\" added.", task.title),
        ));
        self.tasks.push(task);
        tracing::debug!(tasks = self.tasks.len(), "task added");
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Renders the validation message itself when no payload can be built.
    pub fn build_payload(&mut self, bulk: &str) -> Result<Payload, AppError> {
        payload::build_payload(bulk, &self.tasks).inspect_err(|err| {
            tracing::warn!(error = %err, "payload rejected");
            self.region.replace(error_markup(None, err));
        })
    }

    pub fn analyze(&mut self, bulk: &str) -> Result<(), AppError> {
        self.submit(Endpoint::Analyze, bulk, analysis_markup)
    }

    pub fn suggest(&mut self, bulk: &str) -> Result<(), AppError> {
        self.submit(Endpoint::Suggest, bulk, suggestion_markup)
    }

    fn submit(
        &mut self,
        endpoint: Endpoint,
        bulk: &str,
        interpret: fn(&ResponseBody) -> Markup,
    ) -> Result<(), AppError> {
        let payload = self.build_payload(bulk)?;

        self.region.replace(Markup::loading(loading_text(endpoint)));
        // Every branch below replaces the loading indicator.
        match self.api.post_payload(endpoint, &payload) {
            Ok(body) => {
                self.region.replace(interpret(&body));
                Ok(())
            }
            Err(err) => {
                self.region.replace(error_markup(Some(endpoint), &err));
                Err(err)
            }
        }
    }
}

fn loading_text(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Analyze => "Analyzing tasks...",
        Endpoint::Suggest => "Getting top suggestions...",
    }
}

fn failure_context(endpoint: Option<Endpoint>) -> &'static str {
    match endpoint {
        Some(Endpoint::Analyze) => "during analysis",
        Some(Endpoint::Suggest) => "while getting suggestions",
        None => "while preparing the request",
    }
}

// Only the shape of the response is checked; each element becomes a card.
fn scored_tasks(value: &Value) -> Option<Vec<ScoredTask>> {
    value
        .as_array()
        .map(|items| items.iter().map(ScoredTask::from_value).collect())
}

pub fn analysis_markup(body: &ResponseBody) -> Markup {
    match body.as_json().and_then(scored_tasks) {
        Some(tasks) => render::display(&tasks),
        None => Markup::raw(body.pretty()),
    }
}

pub fn suggestion_markup(body: &ResponseBody) -> Markup {
    let parsed = body
        .as_json()
        .and_then(|value| value.get("suggestions"))
        .and_then(scored_tasks);

    let Some(suggestions) = parsed else {
        return Markup::message(
            MessageKind::Error,
            "Unexpected response from server for suggestions.",
        )
        .push(Block::Raw(body.pretty()));
    };

    if suggestions.is_empty() {
        return Markup::message(MessageKind::Info, "No suggestions returned by server.");
    }

    let top = suggestions.into_iter().take(SUGGESTION_LIMIT).collect::<Vec<_>>();
    top.iter().cloned().fold(
        Markup::new().push(Block::Heading(format!(
            "Top {} Suggested Tasks",
            top.len()
        ))),
        |markup, task| markup.push(Block::Card(task)),
    )
}

pub fn error_markup(endpoint: Option<Endpoint>, err: &AppError) -> Markup {
    match err {
        AppError::Validation(message) => Markup::message(MessageKind::Error, message.clone()),
        AppError::Network { message, detail } => {
            tracing::warn!(detail = %detail, "scoring service unreachable");
            Markup::message(MessageKind::Error, format!("🚫 {message}"))
        }
        AppError::Http { status, body } => Markup::preformatted_message(
            MessageKind::Error,
            format!("❌ Server error ({status}): {}", http_body_text(body)),
        ),
        other => {
            tracing::error!(error = %other, endpoint = ?endpoint, "request failed");
            Markup::message(
                MessageKind::Error,
                format!(
                    "❌ Unexpected error {}. See log for details.",
                    failure_context(endpoint)
                ),
            )
        }
    }
}

// An empty body is shown as an empty object; a JSON string is shown bare.
fn http_body_text(body: &ResponseBody) -> String {
    match body {
        ResponseBody::Text(text) if text.is_empty() => "{}".to_string(),
        ResponseBody::Json(Value::Null) => "{}".to_string(),
        ResponseBody::Json(Value::String(text)) => text.clone(),
        other => other.pretty(),
    }
}
