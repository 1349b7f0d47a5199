use serde::{Deserialize, Serialize};

pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;
pub const DEFAULT_IMPORTANCE: i64 = 5;

/// A task as submitted to the scoring service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default = "default_estimated_hours")]
    pub estimated_hours: f64,
    #[serde(default = "default_importance")]
    pub importance: i64,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

fn default_estimated_hours() -> f64 {
    DEFAULT_ESTIMATED_HOURS
}

fn default_importance() -> i64 {
    DEFAULT_IMPORTANCE
}
