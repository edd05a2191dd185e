use crate::parser::*;

/// Helper for rendering attribute slots of a node
pub struct AttributeRenderer;

impl AttributeRenderer {
    pub fn render_visibility(&self, vis: Visibility) -> &'static str {
        vis.as_str()
    }

    /// Name of a call target when it is a plain identifier, otherwise empty.
    pub fn render_callee(&self, ast: &Ast, callee: NodeId) -> String {
        match ast.kind_of(callee) {
            Some(NodeKind::Identifier { name }) => name.clone(),
            _ => String::new(),
        }
    }

    /// Type name carried by a declaration's type node. Empty if the handle
    /// does not point at a type name.
    pub fn render_type_name(&self, ast: &Ast, type_name: NodeId) -> String {
        match ast.kind_of(type_name) {
            Some(NodeKind::TypeName { name }) => name.clone(),
            Some(NodeKind::Identifier { name }) => name.clone(),
            _ => String::new(),
        }
    }

    /// Base contract names joined directly onto the contract header.
    pub fn render_bases(&self, bases: &[String]) -> String {
        bases.join(", ")
    }
}

/// Helper for consistent indentation
pub struct IndentationHelper;

impl IndentationHelper {
    pub fn indent_for_depth(depth: usize, width: usize) -> String {
        " ".repeat(depth * width)
    }
}
