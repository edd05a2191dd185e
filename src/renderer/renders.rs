use crate::parser::*;
use crate::renderer::components::*;
use crate::renderer::traits::*;

impl Render for NodeKind {
    fn render(&self, ast: &Ast, context: &RenderContext) -> Formatted {
        let indent = context.indent();
        let attrs = AttributeRenderer;

        match self {
            // Its children are reached by the regular walk; a line here would duplicate them.
            NodeKind::SourceUnit => Formatted::nothing(),
            NodeKind::Pragma { text } => Formatted::text(format!("{}{}\n", indent, text)),
            NodeKind::Import { name } => Formatted::text(format!("{}Import: {}\n", indent, name)),
            NodeKind::Modifier { name } => {
                Formatted::text(format!("{}Modifier: {}\n", indent, name))
            }
            NodeKind::Function {
                name, visibility, ..
            } => {
                // Parameters and return types are not part of the header line.
                let mut formatted = Formatted::text(format!(
                    "{}function {}() {} {{\n",
                    indent,
                    name,
                    attrs.render_visibility(*visibility)
                ));
                if context.close_function_blocks {
                    formatted.block = Some(Block {
                        list: ChildList::Children,
                        close: format!("{}}}\n", indent),
                    });
                }
                formatted
            }
            NodeKind::Contract { name, bases } => {
                let mut signature = format!("{}Contract {}", indent, name);
                signature.push_str(&attrs.render_bases(bases));
                signature.push_str(" {\n");
                Formatted {
                    text: signature,
                    block: Some(Block {
                        list: ChildList::Children,
                        close: format!("{}}}\n", indent),
                    }),
                    claims: None,
                }
            }
            NodeKind::Struct { name, .. } => Formatted {
                text: format!("{}struct {} {{\n", indent, name),
                block: Some(Block {
                    list: ChildList::Members,
                    close: format!("{}}}\n", indent),
                }),
                claims: None,
            },
            NodeKind::Variable {
                name, type_name, ..
            } => Formatted {
                text: format!(
                    "{}{} {}; \n",
                    indent,
                    attrs.render_type_name(ast, *type_name),
                    name
                ),
                block: None,
                claims: Some(*type_name),
            },
            NodeKind::FunctionCall { callee, .. } => Formatted::text(format!(
                "{}{}(args) \n",
                indent,
                attrs.render_callee(ast, *callee)
            )),
            NodeKind::TypeName { name } => {
                Formatted::text(format!("{}TypeName: {}\n", indent, name))
            }
            // Expression fragment: no indentation, no line break.
            NodeKind::Identifier { name } => Formatted::text(name.clone()),
            NodeKind::Other(kind) => {
                Formatted::text(format!("{}Unknown Node: {}\n", indent, kind))
            }
        }
    }
}

/// Placeholder for a handle that does not point into the arena.
pub fn render_dangling(id: NodeId, context: &RenderContext) -> Formatted {
    Formatted::text(format!("{}Unknown Node: <dangling {}>\n", context.indent(), id))
}
