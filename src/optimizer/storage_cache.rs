use std::collections::{HashMap, HashSet};

use crate::parser::*;

const CACHE_SUFFIX: &str = "Cached";

/// State variables declared directly in a contract body: name -> type name.
fn state_variables(ast: &Ast, contract: NodeId) -> HashMap<String, String> {
    ast.children(contract)
        .iter()
        .filter_map(|&child| match ast.kind_of(child) {
            Some(NodeKind::Variable {
                form: VariableForm::State,
                name,
                type_name,
            }) => Some((name.clone(), ast.name_of(*type_name).to_string())),
            _ => None,
        })
        .collect()
}

/// Parameters, return parameters and locals declared anywhere inside `function`.
fn local_names(ast: &Ast, function: NodeId) -> HashSet<&str> {
    ast.descendants(function)
        .into_iter()
        .filter_map(|id| match ast.kind_of(id) {
            Some(NodeKind::Variable {
                form: VariableForm::Parameter,
                name,
                ..
            }) => Some(name.as_str()),
            _ => None,
        })
        .collect()
}

/// State variables read at least twice inside `function`, in first-read order.
/// Names shadowed by a parameter or local of the function are not state reads.
fn repeated_reads(
    ast: &Ast,
    function: NodeId,
    state: &HashMap<String, String>,
) -> Vec<String> {
    let shadowed = local_names(ast, function);
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for id in ast.descendants(function) {
        if let Some(NodeKind::Identifier { name }) = ast.kind_of(id) {
            if !state.contains_key(name) || shadowed.contains(name.as_str()) {
                continue;
            }
            let count = counts.entry(name.as_str()).or_insert(0);
            if *count == 0 {
                order.push(name.clone());
            }
            *count += 1;
        }
    }
    order.retain(|name| counts.get(name.as_str()).copied().unwrap_or(0) >= 2);
    order
}

fn has_local(ast: &Ast, function: NodeId, local: &str) -> bool {
    ast.children(function).iter().any(|&child| {
        matches!(ast.kind_of(child), Some(NodeKind::Variable { name, .. }) if name == local)
    })
}

/// Inserts a cached local copy at the top of each function body for every
/// state variable that function reads more than once. Returns the number of
/// locals added.
pub fn cache_storage_variables(ast: &mut Ast) -> usize {
    let contracts: Vec<NodeId> = ast
        .ids()
        .filter(|id| matches!(ast.kind(*id), NodeKind::Contract { .. }))
        .collect();

    let mut added = 0;
    for contract in contracts {
        let state = state_variables(ast, contract);
        if state.is_empty() {
            continue;
        }
        let functions: Vec<NodeId> = ast
            .children(contract)
            .iter()
            .copied()
            .filter(|id| matches!(ast.kind_of(*id), Some(NodeKind::Function { .. })))
            .collect();

        for function in functions {
            let header_len = match ast.kind(function) {
                NodeKind::Function {
                    parameters, returns, ..
                } => parameters.len() + returns.len(),
                _ => 0,
            };
            let mut insert_at = header_len.min(ast.children(function).len());

            for name in repeated_reads(ast, function, &state) {
                let local = format!("{}{}", name, CACHE_SUFFIX);
                if has_local(ast, function, &local) {
                    continue;
                }
                let type_name = state.get(&name).cloned().unwrap_or_default();
                let ty = ast.alloc(NodeKind::TypeName { name: type_name }, Vec::new());
                let declaration = ast.alloc(
                    NodeKind::Variable {
                        form: VariableForm::Parameter,
                        name: local,
                        type_name: ty,
                    },
                    vec![ty],
                );
                ast.node_mut(function).children.insert(insert_at, declaration);
                insert_at += 1;
                added += 1;
            }
        }
    }
    added
}
