mod html;
mod region;
mod text;

pub use html::escape_html;
pub use region::{MemoryRegion, Region};

use crate::model::{Scalar, ScoredTask};

pub const PLACEHOLDER: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
    Info,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Loading(String),
    Message {
        kind: MessageKind,
        text: String,
        preformatted: bool,
    },
    Heading(String),
    Card(ScoredTask),
    Raw(String),
}

/// Structured contents of the output region. Strings are stored unescaped;
/// escaping happens when rendering to HTML.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Markup {
    blocks: Vec<Block>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading<T: Into<String>>(text: T) -> Self {
        Self::new().push(Block::Loading(text.into()))
    }

    pub fn message<T: Into<String>>(kind: MessageKind, text: T) -> Self {
        Self::new().push(Block::Message {
            kind,
            text: text.into(),
            preformatted: false,
        })
    }

    pub fn preformatted_message<T: Into<String>>(kind: MessageKind, text: T) -> Self {
        Self::new().push(Block::Message {
            kind,
            text: text.into(),
            preformatted: true,
        })
    }

    pub fn raw<T: Into<String>>(text: T) -> Self {
        Self::new().push(Block::Raw(text.into()))
    }

    pub fn push(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.blocks.as_slice(), [Block::Loading(_)])
    }

    pub fn cards(&self) -> impl Iterator<Item = &ScoredTask> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Card(task) => Some(task),
            _ => None,
        })
    }

    pub fn heading(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            Block::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn first_message(&self) -> Option<(MessageKind, &str)> {
        self.blocks.iter().find_map(|block| match block {
            Block::Message { kind, text, .. } => Some((*kind, text.as_str())),
            _ => None,
        })
    }
}

/// Cards for an analyze result, or an informational message when empty.
pub fn display(tasks: &[ScoredTask]) -> Markup {
    if tasks.is_empty() {
        return Markup::message(MessageKind::Info, "No tasks returned from server.");
    }

    tasks
        .iter()
        .cloned()
        .fold(Markup::new(), |markup, task| markup.push(Block::Card(task)))
}

pub(crate) fn format_scalar(value: Option<&Scalar>) -> String {
    value
        .map(Scalar::to_string)
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

pub(crate) fn format_text(value: Option<&str>) -> &str {
    value.unwrap_or(PLACEHOLDER)
}
