use super::{Block, Markup, format_scalar, format_text};
use crate::config::Palette;
use crate::model::ScoredTask;

impl Markup {
    pub fn to_text(&self, palette: &Palette) -> String {
        self.blocks()
            .iter()
            .map(|block| block_text(block, palette))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn block_text(block: &Block, palette: &Palette) -> String {
    match block {
        Block::Loading(text) => palette.mutedize(text),
        Block::Message { text, .. } => text.clone(),
        Block::Heading(text) => palette.accentize(text),
        Block::Card(task) => card_text(task, palette),
        Block::Raw(text) => text.clone(),
    }
}

fn card_text(task: &ScoredTask, palette: &Palette) -> String {
    let heading = format!(
        "{} — Score: {}",
        task.title.as_deref().unwrap_or_default(),
        format_scalar(task.score.as_ref())
    );
    let details = format!(
        "Due: {}, Hours: {}, Importance: {}",
        format_text(task.due_date.as_deref()),
        format_scalar(task.estimated_hours.as_ref()),
        format_scalar(task.importance.as_ref())
    );

    let mut lines = vec![palette.accentize(&heading)];
    if let Some(explanation) = task.explanation.as_deref().filter(|text| !text.is_empty()) {
        lines.push(format!("  {explanation}"));
    }
    lines.push(format!("  {}", palette.mutedize(&details)));
    lines.join("\n")
}
