use crate::error::AppError;
use crate::model::Task;
use serde::Serialize;
use serde_json::Value;

pub const INVALID_BULK_JSON: &str = "❌ Invalid JSON in bulk input. Please fix it and try again.";
pub const BULK_NOT_ARRAY: &str = "❌ Bulk JSON must be an array of tasks.";
pub const NO_TASKS: &str = "⚠️ No tasks to send. Add tasks or paste bulk JSON first.";

/// The request body for one submission. Serializes as a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Bulk(Vec<Value>),
    Tasks(Vec<Task>),
}

impl Payload {
    pub fn len(&self) -> usize {
        match self {
            Self::Bulk(items) => items.len(),
            Self::Tasks(tasks) => tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn source(&self) -> &'static str {
        match self {
            Self::Bulk(_) => "bulk",
            Self::Tasks(_) => "tasks",
        }
    }
}

/// Non-empty bulk text always wins over the accumulated list.
pub fn build_payload(bulk: &str, tasks: &[Task]) -> Result<Payload, AppError> {
    if !bulk.trim().is_empty() {
        let parsed: Value = serde_json::from_str(bulk).map_err(|err| {
            tracing::debug!(error = %err, "bulk input is not valid JSON");
            AppError::validation(INVALID_BULK_JSON)
        })?;

        return match parsed {
            Value::Array(items) => Ok(Payload::Bulk(items)),
            _ => Err(AppError::validation(BULK_NOT_ARRAY)),
        };
    }

    if tasks.is_empty() {
        return Err(AppError::validation(NO_TASKS));
    }

    Ok(Payload::Tasks(tasks.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::{BULK_NOT_ARRAY, INVALID_BULK_JSON, NO_TASKS, Payload, build_payload};
    use crate::error::AppError;
    use crate::form::TaskForm;

    #[test]
    fn bulk_json_takes_precedence_over_list() {
        let tasks = vec![TaskForm::titled("from list").to_task().unwrap()];
        let payload = build_payload(r#"[{"title":"from bulk"}]"#, &tasks).unwrap();

        match payload {
            Payload::Bulk(items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0]["title"], "from bulk");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn empty_bulk_array_is_still_bulk() {
        let tasks = vec![TaskForm::titled("from list").to_task().unwrap()];
        let payload = build_payload("[]", &tasks).unwrap();

        assert_eq!(payload.source(), "bulk");
        assert!(payload.is_empty());
    }

    #[test]
    fn invalid_bulk_is_rejected() {
        let tasks = vec![TaskForm::titled("from list").to_task().unwrap()];
        let err = build_payload("[{", &tasks).unwrap_err();
        assert_eq!(err, AppError::validation(INVALID_BULK_JSON));

        let err = build_payload(r#"{"title":"x"}"#, &tasks).unwrap_err();
        assert_eq!(err, AppError::validation(BULK_NOT_ARRAY));
    }

    #[test]
    fn whitespace_bulk_falls_back_to_list() {
        let tasks = vec![TaskForm::titled("from list").to_task().unwrap()];
        let payload = build_payload("  \n ", &tasks).unwrap();

        assert_eq!(payload, Payload::Tasks(tasks));
    }

    #[test]
    fn empty_list_without_bulk_is_rejected() {
        let err = build_payload("", &[]).unwrap_err();
        assert_eq!(err, AppError::validation(NO_TASKS));
    }

    #[test]
    fn task_payload_serializes_as_array() {
        let tasks = vec![TaskForm::titled("solo").to_task().unwrap()];
        let payload = build_payload("", &tasks).unwrap();
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(
            value,
            serde_json::json!([{
                "title": "solo",
                "due_date": null,
                "estimated_hours": 1.0,
                "importance": 5,
                "dependencies": []
            }])
        );
    }
}
