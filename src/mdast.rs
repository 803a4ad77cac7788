// MDAST node types, after https://github.com/syntax-tree/mdast
//
// The subset of the Markdown abstract syntax tree that note pages produce.
// Each node is a variant of the `Node` enum. Parent nodes own their children.
// Leaf nodes hold a `value: String`.

/// Alignment of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignKind {
    Left,
    Right,
    Center,
}

// ---------------------------------------------------------------------------
// Node structs
// ---------------------------------------------------------------------------

/// Document root.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Root {
    pub children: Vec<Node>,
}

/// Block quote (`> ...`).
#[derive(Debug, Clone, PartialEq)]
pub struct Blockquote {
    pub children: Vec<Node>,
}

/// Fenced code block.
#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub value: String,
    pub lang: Option<String>,
}

/// ATX or setext heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub depth: u8, // 1–6
    pub children: Vec<Node>,
}

/// Ordered or unordered list.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    pub ordered: bool,
    pub start: Option<u32>,
    pub children: Vec<Node>,
}

/// Item inside a list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    /// Blank lines between the item's blocks.
    pub spread: bool,
    /// Task-list checkbox state, if the item starts with one.
    pub checked: Option<bool>,
    pub children: Vec<Node>,
}

/// Thematic break (`---`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThematicBreak;

/// Paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

/// Plain text.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
}

/// Emphasis (`*text*`).
#[derive(Debug, Clone, PartialEq)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

/// Strong emphasis (`**text**`).
#[derive(Debug, Clone, PartialEq)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Inline code (`` `code` ``).
#[derive(Debug, Clone, PartialEq)]
pub struct InlineCode {
    pub value: String,
}

/// Hard line break (`\` at end of line).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Break;

/// Hyperlink (`[text](url "title")`).
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub url: String,
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// Image (`![alt](url "title")`).
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub url: String,
    pub title: Option<String>,
    pub alt: String,
}

/// Strikethrough (`~~text~~`).
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub children: Vec<Node>,
}

/// GFM table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub align: Vec<Option<AlignKind>>,
    pub children: Vec<Node>, // TableRow
}

/// Row in a GFM table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub children: Vec<Node>, // TableCell
}

/// Cell in a GFM table row.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub children: Vec<Node>,
}

// ---------------------------------------------------------------------------
// Node enum
// ---------------------------------------------------------------------------

/// A node in the Markdown abstract syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Document
    Root(Root),

    // Flow (block) content
    Blockquote(Blockquote),
    Code(Code),
    Heading(Heading),
    List(List),
    ListItem(ListItem),
    ThematicBreak(ThematicBreak),
    Paragraph(Paragraph),

    // Phrasing (inline) content
    Break(Break),
    Delete(Delete),
    Emphasis(Emphasis),
    Image(Image),
    InlineCode(InlineCode),
    Link(Link),
    Strong(Strong),
    Text(Text),

    // Table (GFM)
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text { value: value.into() })
    }

    /// Returns a reference to this node's children, if it has any.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Root(n) => Some(&n.children),
            Node::Blockquote(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::List(n) => Some(&n.children),
            Node::ListItem(n) => Some(&n.children),
            Node::Paragraph(n) => Some(&n.children),
            Node::Emphasis(n) => Some(&n.children),
            Node::Strong(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            _ => None,
        }
    }

    /// Returns a mutable reference to this node's children, if it has any.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Root(n) => Some(&mut n.children),
            Node::Blockquote(n) => Some(&mut n.children),
            Node::Heading(n) => Some(&mut n.children),
            Node::List(n) => Some(&mut n.children),
            Node::ListItem(n) => Some(&mut n.children),
            Node::Paragraph(n) => Some(&mut n.children),
            Node::Emphasis(n) => Some(&mut n.children),
            Node::Strong(n) => Some(&mut n.children),
            Node::Delete(n) => Some(&mut n.children),
            Node::Link(n) => Some(&mut n.children),
            Node::Table(n) => Some(&mut n.children),
            Node::TableRow(n) => Some(&mut n.children),
            Node::TableCell(n) => Some(&mut n.children),
            _ => None,
        }
    }

    /// Whether this node is phrasing (inline) content.
    pub fn is_phrasing(&self) -> bool {
        matches!(
            self,
            Node::Break(_)
                | Node::Delete(_)
                | Node::Emphasis(_)
                | Node::Image(_)
                | Node::InlineCode(_)
                | Node::Link(_)
                | Node::Strong(_)
                | Node::Text(_)
        )
    }

    /// Whether this node is flow (block) content.
    pub fn is_flow(&self) -> bool {
        matches!(
            self,
            Node::Blockquote(_)
                | Node::Code(_)
                | Node::Heading(_)
                | Node::List(_)
                | Node::ThematicBreak(_)
                | Node::Paragraph(_)
                | Node::Table(_)
        )
    }
}
