use super::Markup;

/// Where rendered markup goes. Each call replaces the previous contents.
pub trait Region {
    fn replace(&mut self, markup: Markup);
}

/// Keeps every replacement, newest last.
#[derive(Debug, Default)]
pub struct MemoryRegion {
    history: Vec<Markup>,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Markup> {
        self.history.last()
    }

    pub fn history(&self) -> &[Markup] {
        &self.history
    }
}

impl Region for MemoryRegion {
    fn replace(&mut self, markup: Markup) {
        self.history.push(markup);
    }
}
