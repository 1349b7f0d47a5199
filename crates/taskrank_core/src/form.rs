use crate::error::AppError;
use crate::model::{DEFAULT_ESTIMATED_HOURS, DEFAULT_IMPORTANCE, Task};
use time::Date;
use time::macros::format_description;

/// Raw contents of the task entry fields. An unset field is the empty string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub due: String,
    pub hours: String,
    pub importance: String,
    pub deps: String,
}

impl TaskForm {
    pub fn titled<T: Into<String>>(title: T) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn to_task(&self) -> Result<Task, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("⚠️ Title is required to add a task."));
        }

        Ok(Task {
            title: title.to_string(),
            due_date: parse_due_date(&self.due)?,
            estimated_hours: parse_hours(&self.hours)?,
            importance: parse_importance(&self.importance)?,
            dependencies: parse_dependencies(&self.deps),
        })
    }
}

fn parse_due_date(raw: &str) -> Result<Option<String>, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let format = format_description!("[year]-[month]-[day]");
    Date::parse(trimmed, &format)
        .map_err(|_| AppError::validation("⚠️ Due date must be a date in YYYY-MM-DD format."))?;
    Ok(Some(trimmed.to_string()))
}

// Defaults apply only to the empty string; "0" is a real value.
fn parse_hours(raw: &str) -> Result<f64, AppError> {
    if raw.is_empty() {
        return Ok(DEFAULT_ESTIMATED_HOURS);
    }

    match raw.trim().parse::<f64>() {
        Ok(hours) if hours.is_finite() => Ok(hours),
        _ => Err(AppError::validation("⚠️ Estimated hours must be a number.")),
    }
}

fn parse_importance(raw: &str) -> Result<i64, AppError> {
    if raw.is_empty() {
        return Ok(DEFAULT_IMPORTANCE);
    }

    raw.trim()
        .parse::<i64>()
        .map_err(|_| AppError::validation("⚠️ Importance must be a whole number."))
}

pub fn parse_dependencies(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}
