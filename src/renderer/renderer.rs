use std::collections::HashSet;
use tracing::{debug, trace, warn};

use crate::parser::*;
use crate::renderer::renders::render_dangling;
use crate::renderer::traits::*;

/// Depth-first text renderer for an [`Ast`].
///
/// The emitted-set lives as long as the renderer. A node rendered once is
/// skipped on every later visit, including visits from a second `render`
/// call, so take a fresh renderer for every snapshot.
pub struct AstRenderer {
    context: RenderContext,
    emitted: HashSet<NodeId>,
    output: String,
    traversals: usize,
}

impl AstRenderer {
    pub fn new() -> Self {
        Self::with_context(RenderContext::new())
    }

    pub fn with_context(context: RenderContext) -> Self {
        Self {
            context,
            emitted: HashSet::new(),
            output: String::new(),
            traversals: 0,
        }
    }

    /// Walks every top-level node of `ast`, appending to the output buffer.
    pub fn render(&mut self, ast: &Ast) {
        if self.traversals > 0 {
            warn!(
                emitted = self.emitted.len(),
                "renderer reused; nodes from earlier traversals will be skipped"
            );
        }
        self.traversals += 1;

        let depth = self.context.depth;
        debug!(roots = ast.roots().len(), depth, "rendering AST");
        self.traverse(ast, ast.roots(), depth);
        debug!(bytes = self.output.len(), emitted = self.emitted.len(), "rendering done");
    }

    pub fn text(&self) -> &str {
        &self.output
    }

    pub fn into_text(self) -> String {
        self.output
    }

    pub fn is_emitted(&self, id: NodeId) -> bool {
        self.emitted.contains(&id)
    }

    fn traverse(&mut self, ast: &Ast, nodes: &[NodeId], depth: usize) {
        for &id in nodes {
            if self.emitted.contains(&id) {
                trace!(node = %id, "already emitted, skipping");
                continue;
            }
            self.emitted.insert(id);
            if ast.get(id).is_none() {
                warn!(node = %id, nodes = ast.len(), "node handle outside the tree");
                let context = self.context.with_depth(depth);
                self.output.push_str(&render_dangling(id, &context).text);
                continue;
            }
            self.visit(ast, id, depth);
            self.traverse_list(ast, id, ChildList::Children, depth + 1);
        }
    }

    fn traverse_list(&mut self, ast: &Ast, owner: NodeId, list: ChildList, depth: usize) {
        let nodes = list.resolve(ast, owner);
        if !nodes.is_empty() {
            self.traverse(ast, nodes, depth);
        }
    }

    fn visit(&mut self, ast: &Ast, id: NodeId, depth: usize) {
        let kind = ast.kind(id);
        trace!(node = %id, kind = kind.kind_name(), depth, "visiting");

        if let NodeKind::Other(name) = kind {
            debug!(node = %id, kind = %name, "no formatter for node kind");
        }

        let context = self.context.with_depth(depth);
        let formatted = kind.render(ast, &context);

        if let Some(claimed) = formatted.claims {
            self.emitted.insert(claimed);
        }
        self.output.push_str(&formatted.text);

        if let Some(block) = formatted.block {
            self.traverse_list(ast, id, block.list, depth + 1);
            self.output.push_str(&block.close);
        }
    }
}

impl Default for AstRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders `ast` with a fresh renderer and returns the text.
pub fn render_to_string(ast: &Ast, context: &RenderContext) -> String {
    let mut renderer = AstRenderer::with_context(context.clone());
    renderer.render(ast);
    renderer.into_text()
}
