use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use taskrank_core::form::TaskForm;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run one command; without one, start an interactive session
    #[command(subcommand)]
    pub command: Option<Command>,

    /// How results are rendered
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    pub format: Format,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

/// One line of an interactive session.
#[derive(Parser, Debug)]
#[command(name = "taskrank", about = "Commands available in an interactive session")]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task to the session list
    ///
    /// Example: taskrank add "Write report" --due 2025-12-24 --hours 3 --importance 8
    /// Example: taskrank add "Deploy" --deps "Write report, Review"
    Add(TaskArgs),
    /// Score tasks and show the full ranking
    ///
    /// Example: taskrank analyze --bulk '[{"title":"Write report"}]'
    /// Example: taskrank analyze --bulk-file tasks.json
    Analyze(BulkArgs),
    /// Show the top suggested tasks
    ///
    /// Example: taskrank suggest --bulk-file tasks.json
    Suggest(BulkArgs),
    /// Set the bulk JSON used by later analyze/suggest commands
    ///
    /// Example: bulk '[{"title":"a"},{"title":"b"}]'
    /// Example: bulk --file tasks.json
    /// Example: bulk --clear
    Bulk {
        json: Option<String>,
        #[arg(long, value_name = "PATH", conflicts_with = "json")]
        file: Option<PathBuf>,
        #[arg(long, conflicts_with_all = ["json", "file"])]
        clear: bool,
    },
    /// List the tasks added in this session
    List,
    /// Remove every task from the session list
    Clear,
}

#[derive(Args, Debug, Default)]
pub struct TaskArgs {
    pub title: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
    /// Estimated hours (defaults to 1)
    #[arg(long, allow_hyphen_values = true)]
    pub hours: Option<String>,
    /// Importance (defaults to 5)
    #[arg(long, allow_hyphen_values = true)]
    pub importance: Option<String>,
    /// Comma separated dependency titles
    #[arg(long)]
    pub deps: Option<String>,
}

impl TaskArgs {
    pub fn to_form(&self) -> TaskForm {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        TaskForm {
            title: field(&self.title),
            due: field(&self.due),
            hours: field(&self.hours),
            importance: field(&self.importance),
            deps: field(&self.deps),
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct BulkArgs {
    /// JSON array of tasks; takes precedence over the session list
    #[arg(long, value_name = "JSON")]
    pub bulk: Option<String>,
    /// Read the JSON array of tasks from a file
    #[arg(long = "bulk-file", value_name = "PATH", conflicts_with = "bulk")]
    pub bulk_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    BaseUrl,
    Theme,
    Alias(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedConfigOverride {
    pub target: ConfigOverrideTarget,
    pub value: String,
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<ParsedConfigOverride, String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let (field, remainder) = key_raw
        .split_once('.')
        .map(|(field, rest)| (field.trim(), Some(rest.trim())))
        .unwrap_or((key_raw.trim(), None));

    let canonical_field =
        canonicalize_flag_name(field).ok_or_else(|| "override key cannot be empty".to_string())?;

    match canonical_field.as_str() {
        "base_url" | "url" => {
            if remainder.is_some() {
                Err("base_url override cannot have subfields".to_string())
            } else {
                Ok(ParsedConfigOverride {
                    target: ConfigOverrideTarget::BaseUrl,
                    value,
                })
            }
        }
        "theme" => {
            if remainder.is_some() {
                Err("theme override cannot have subfields".to_string())
            } else {
                Ok(ParsedConfigOverride {
                    target: ConfigOverrideTarget::Theme,
                    value,
                })
            }
        }
        "aliases" | "alias" => {
            let alias_name = remainder
                .filter(|segment| !segment.is_empty())
                .ok_or_else(|| "aliases override requires an alias name".to_string())?;
            Ok(ParsedConfigOverride {
                target: ConfigOverrideTarget::Alias(alias_name.to_string()),
                value,
            })
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
