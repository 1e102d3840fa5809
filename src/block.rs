/// A list (ordered or unordered). Items are bullet bodies in encounter order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub ordered: bool,
    pub items: Vec<String>,
}

/// Block-level elements classified from a plain-text answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// The source line exactly as written, surrounding whitespace included.
    Paragraph { text: String },
    /// One blank line.
    Spacer,
    /// Trimmed line ending in `:`.
    Title { text: String },
    List(List),
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Block::Title { text: text.into() }
    }

    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::List(List {
            ordered,
            items: items.into_iter().map(Into::into).collect(),
        })
    }

    /// Short name of the block variant, used for inspection and logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Paragraph { .. } => "paragraph",
            Block::Spacer => "spacer",
            Block::Title { .. } => "title",
            Block::List(List { ordered: true, .. }) => "ordered-list",
            Block::List(List { ordered: false, .. }) => "unordered-list",
        }
    }
}

/// A block together with its render key: the zero-based input line it
/// starts on. Keys are only meaningful within one parse call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBlock {
    pub line: usize,
    pub block: Block,
}
