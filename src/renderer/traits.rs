use crate::parser::{Ast, NodeId, NodeKind};
use crate::renderer::components::IndentationHelper;

/// Configuration context for rendering operations
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub depth: usize,
    /// Spaces per nesting level
    pub indent_width: usize,
    /// Emit a closing brace after a function's children. Off by default, which
    /// keeps function blocks open exactly like existing snapshots expect.
    pub close_function_blocks: bool,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            depth: 0,
            indent_width: 2,
            close_function_blocks: false,
        }
    }

    pub fn with_depth(&self, depth: usize) -> Self {
        Self {
            depth,
            indent_width: self.indent_width,
            close_function_blocks: self.close_function_blocks,
        }
    }

    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    pub fn with_closed_functions(mut self, close: bool) -> Self {
        self.close_function_blocks = close;
        self
    }

    pub fn indent(&self) -> String {
        IndentationHelper::indent_for_depth(self.depth, self.indent_width)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Which list of a node the traversal descends into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildList {
    /// The generic, ordered child list every node has
    Children,
    /// A struct's explicit field list
    Members,
}

impl ChildList {
    pub fn resolve(self, ast: &Ast, owner: NodeId) -> &[NodeId] {
        match self {
            ChildList::Children => ast.children(owner),
            ChildList::Members => match ast.kind(owner) {
                NodeKind::Struct { members, .. } => members,
                _ => ast.children(owner),
            },
        }
    }
}

/// A nested block opened by a formatted node: its body list is walked one
/// level deeper, then `close` is written at the node's own indentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub list: ChildList,
    pub close: String,
}

/// Output of one per-kind formatting rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Formatted {
    pub text: String,
    pub block: Option<Block>,
    /// A node this one renders on its own behalf; it is marked emitted so it
    /// does not produce a line of its own.
    pub claims: Option<NodeId>,
}

impl Formatted {
    pub fn text(text: String) -> Self {
        Self {
            text,
            ..Default::default()
        }
    }

    pub fn nothing() -> Self {
        Self::default()
    }
}

/// Core rendering trait: the formatting rule for one node.
pub trait Render {
    fn render(&self, ast: &Ast, context: &RenderContext) -> Formatted;
}
