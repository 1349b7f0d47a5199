use super::{Block, Markup, format_scalar, format_text};
use crate::model::ScoredTask;

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl Markup {
    pub fn to_html(&self) -> String {
        self.blocks()
            .iter()
            .map(block_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn block_html(block: &Block) -> String {
    match block {
        Block::Loading(text) => format!(r#"<div class="message info">{}</div>"#, escape_html(text)),
        Block::Message {
            kind,
            text,
            preformatted,
        } => {
            let body = if *preformatted {
                format!("<pre>{}</pre>", escape_html(text))
            } else {
                escape_html(text)
            };
            format!(r#"<div class="message {}">{}</div>"#, kind.as_str(), body)
        }
        Block::Heading(text) => format!("<h3>{}</h3>", escape_html(text)),
        Block::Card(task) => card_html(task),
        Block::Raw(text) => format!("<pre>{}</pre>", escape_html(text)),
    }
}

fn card_html(task: &ScoredTask) -> String {
    format!(
        concat!(
            "<div class=\"card\">\n",
            "    <h3>{} — Score: {}</h3>\n",
            "    <p>{}</p>\n",
            "    <small>Due: {}, Hours: {}, Importance: {}</small>\n",
            "</div>"
        ),
        escape_html(task.title.as_deref().unwrap_or_default()),
        format_scalar(task.score.as_ref()),
        escape_html(task.explanation.as_deref().unwrap_or_default()),
        escape_html(format_text(task.due_date.as_deref())),
        format_scalar(task.estimated_hours.as_ref()),
        format_scalar(task.importance.as_ref()),
    )
}
