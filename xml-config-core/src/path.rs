/// Separator between segments of a flattened configuration key.
pub const KEY_DELIMITER: &str = ":";

/// Join segments into a flattened key.
pub fn combine<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments.into_iter().collect::<Vec<_>>().join(KEY_DELIMITER)
}

/// Current position in the XML tree while flattening.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathContext {
    segments: Vec<String>,
}

impl PathContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// The current path as a flattened key.
    pub fn path(&self) -> String {
        combine(self.segments.iter().map(String::as_str))
    }

    /// The key of `name` directly beneath the current path.
    pub fn key_for(&self, name: &str) -> String {
        combine(
            self.segments
                .iter()
                .map(String::as_str)
                .chain(std::iter::once(name)),
        )
    }
}
