use crate::parser::*;

const SLOT_SIZE: usize = 32;

/// Storage width in bytes of an elementary type name.
pub fn type_width(type_name: &str) -> usize {
    let ty = type_name.trim();
    if ty == "bool" {
        return 1;
    }
    if ty == "address" || ty == "address payable" {
        return 20;
    }
    let bits = ty
        .strip_prefix("uint")
        .or_else(|| ty.strip_prefix("int"))
        .and_then(|rest| rest.parse::<usize>().ok());
    if let Some(bits) = bits {
        if bits > 0 && bits <= 256 && bits % 8 == 0 {
            return bits / 8;
        }
    }
    if let Some(bytes) = ty.strip_prefix("bytes").and_then(|rest| rest.parse::<usize>().ok()) {
        if (1..=32).contains(&bytes) {
            return bytes;
        }
    }
    SLOT_SIZE
}

/// Number of storage slots used by fields of the given widths, laid out in order.
pub fn slots_used(widths: &[usize]) -> usize {
    let mut slots = 0;
    let mut used = SLOT_SIZE;
    for &width in widths {
        if used + width > SLOT_SIZE {
            slots += 1;
            used = 0;
        }
        used += width;
    }
    slots
}

fn member_width(ast: &Ast, member: NodeId) -> usize {
    match ast.kind_of(member) {
        Some(NodeKind::Variable { type_name, .. }) if ast.get(*type_name).is_some() => {
            type_width(ast.name_of(*type_name))
        }
        _ => SLOT_SIZE,
    }
}

/// Reorders struct fields widest-first wherever that saves storage slots.
/// Returns the number of structs rewritten.
pub fn pack_structs(ast: &mut Ast) -> usize {
    let structs: Vec<NodeId> = ast
        .ids()
        .filter(|id| matches!(ast.kind(*id), NodeKind::Struct { .. }))
        .collect();

    let mut changed = 0;
    for id in structs {
        let NodeKind::Struct { members, .. } = ast.kind(id) else {
            continue;
        };
        let current: Vec<usize> = members.iter().map(|m| member_width(ast, *m)).collect();

        let mut packed = members.clone();
        packed.sort_by_key(|m| std::cmp::Reverse(member_width(ast, *m)));
        let packed_widths: Vec<usize> = packed.iter().map(|m| member_width(ast, *m)).collect();

        if slots_used(&packed_widths) >= slots_used(&current) {
            continue;
        }

        let node = ast.node_mut(id);
        // Keep any non-member children where they were, members in the new order.
        let mut reordered = packed.iter().copied();
        let is_member = |child: &NodeId| packed.contains(child);
        let children: Vec<NodeId> = node
            .children
            .iter()
            .map(|child| {
                if is_member(child) {
                    reordered.next().unwrap_or(*child)
                } else {
                    *child
                }
            })
            .collect();
        node.children = children;
        if let NodeKind::Struct { members, .. } = &mut node.kind {
            *members = packed;
        }
        changed += 1;
    }
    changed
}
