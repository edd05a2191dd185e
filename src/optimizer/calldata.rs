use std::collections::HashSet;

use crate::parser::*;

/// Names every function call in the tree targets by plain identifier.
fn called_names(ast: &Ast) -> HashSet<String> {
    ast.ids()
        .filter_map(|id| match ast.kind(id) {
            NodeKind::FunctionCall { callee, .. } => match ast.kind_of(*callee) {
                Some(NodeKind::Identifier { name }) if !name.is_empty() => Some(name.clone()),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

/// Turns `public` functions that take arguments and are never called from
/// inside the program into `external` ones, so their arguments can stay in
/// call data. Returns the number of functions changed.
pub fn optimize_call_data(ast: &mut Ast) -> usize {
    let called = called_names(ast);

    let candidates: Vec<NodeId> = ast
        .ids()
        .filter(|id| match ast.kind(*id) {
            NodeKind::Function {
                name,
                visibility: Visibility::Public,
                parameters,
                ..
            } => !parameters.is_empty() && !name.is_empty() && !called.contains(name),
            _ => false,
        })
        .collect();

    for &id in &candidates {
        if let NodeKind::Function { visibility, .. } = &mut ast.node_mut(id).kind {
            *visibility = Visibility::External;
        }
    }
    candidates.len()
}
