use crate::cli::{
    BulkArgs, Command, ConfigOverrideTarget, Format, TaskArgs, parse_config_override,
};
use std::path::Path;
use tabled::{Table, Tabled};
use taskrank_core::config::{Config, ConfigOverrides, Palette, merge_overrides};
use taskrank_core::controller::Controller;
use taskrank_core::error::AppError;
use taskrank_core::model::Task;
use taskrank_core::render::{Markup, Region};
use taskrank_core::{HttpScoringClient, ScoringApi};

/// Writes loading indicators to stderr and everything else to stdout.
pub struct TerminalRegion {
    format: Format,
    palette: Palette,
}

impl TerminalRegion {
    pub fn new(format: Format, palette: Palette) -> Self {
        Self { format, palette }
    }
}

impl Region for TerminalRegion {
    fn replace(&mut self, markup: Markup) {
        let rendered = match self.format {
            Format::Text => markup.to_text(&self.palette),
            Format::Html => markup.to_html(),
        };

        if markup.is_loading() {
            eprintln!("{rendered}");
        } else {
            println!("{rendered}");
        }
    }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Importance")]
    importance: i64,
    #[tabled(rename = "Dependencies")]
    dependencies: String,
}

pub fn task_table(tasks: &[Task]) -> String {
    let rows = tasks.iter().enumerate().map(|(index, task)| TaskRow {
        index: index + 1,
        title: task.title.clone(),
        due: task.due_date.clone().unwrap_or_else(|| "-".to_string()),
        hours: task.estimated_hours.to_string(),
        importance: task.importance,
        dependencies: task.dependencies.join(", "),
    });
    Table::new(rows).to_string()
}

pub fn apply_config_overrides(config: &Config, raw: &[String]) -> Result<Config, AppError> {
    let mut overrides = ConfigOverrides::default();
    for entry in raw {
        let parsed = parse_config_override(entry).map_err(AppError::validation)?;
        match parsed.target {
            ConfigOverrideTarget::BaseUrl => overrides.base_url = Some(parsed.value),
            ConfigOverrideTarget::Theme => overrides.theme = Some(parsed.value),
            ConfigOverrideTarget::Alias(name) => {
                overrides.aliases.insert(name, parsed.value);
            }
        }
    }
    Ok(merge_overrides(config, &overrides))
}

fn read_bulk_file(path: &Path) -> Result<String, AppError> {
    std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))
}

/// State of one client session: the controller plus the bulk JSON field.
pub struct Session<A, R> {
    controller: Controller<A, R>,
    bulk: String,
}

impl Session<HttpScoringClient, TerminalRegion> {
    pub fn connect(config: &Config, format: Format) -> Result<Self, AppError> {
        let client = HttpScoringClient::new(&config.base_url())?;
        tracing::debug!(base_url = %client.base_url(), "scoring client ready");
        let region = TerminalRegion::new(format, config.palette());
        Ok(Self::new(client, region))
    }
}

impl<A: ScoringApi, R: Region> Session<A, R> {
    pub fn new(api: A, region: R) -> Self {
        Self {
            controller: Controller::new(api, region),
            bulk: String::new(),
        }
    }

    pub fn controller(&self) -> &Controller<A, R> {
        &self.controller
    }

    pub fn bulk(&self) -> &str {
        &self.bulk
    }

    pub fn execute(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Add(args) => self.add(&args),
            Command::Analyze(args) => {
                let bulk = self.bulk_for(&args)?;
                self.controller.analyze(&bulk)
            }
            Command::Suggest(args) => {
                let bulk = self.bulk_for(&args)?;
                self.controller.suggest(&bulk)
            }
            Command::Bulk { json, file, clear } => {
                self.bulk = match (json, file) {
                    _ if clear => String::new(),
                    (Some(json), _) => json,
                    (None, Some(path)) => read_bulk_file(&path)?,
                    (None, None) => {
                        return Err(AppError::validation(
                            "bulk requires JSON, --file or --clear",
                        ));
                    }
                };
                if self.bulk.trim().is_empty() {
                    println!("Bulk input cleared.");
                } else {
                    println!("Bulk input set ({} bytes).", self.bulk.len());
                }
                Ok(())
            }
            Command::List => {
                let tasks = self.controller.tasks();
                if tasks.is_empty() {
                    println!("No tasks added yet.");
                } else {
                    println!("{}", task_table(tasks));
                }
                Ok(())
            }
            Command::Clear => {
                let dropped = self.controller.clear_tasks();
                println!("Cleared {dropped} task(s).");
                Ok(())
            }
        }
    }

    fn add(&mut self, args: &TaskArgs) -> Result<(), AppError> {
        self.controller.add_task(&args.to_form()).map(|_| ())
    }

    // One-off bulk arguments win over the session's bulk field.
    fn bulk_for(&self, args: &BulkArgs) -> Result<String, AppError> {
        match (&args.bulk, &args.bulk_file) {
            (Some(json), _) => Ok(json.clone()),
            (None, Some(path)) => read_bulk_file(path),
            (None, None) => Ok(self.bulk.clone()),
        }
    }
}
