use crate::parser::types::*;

/// Incremental constructor for an [`Ast`] arena.
///
/// Node constructors allocate the node and wire up the child lists the way the
/// renderer expects to find them; `attach` and `push_root` link nodes into
/// place. The same node may be attached under more than one parent.
#[derive(Debug, Default)]
pub struct AstBuilder {
    ast: Ast,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        self.ast.alloc(kind, children)
    }

    pub fn push_root(&mut self, id: NodeId) -> &mut Self {
        self.ast.roots.push(id);
        self
    }

    /// Appends `child` to `parent`'s generic child list.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> &mut Self {
        self.ast.node_mut(parent).children.push(child);
        self
    }

    pub fn source_unit(&mut self, children: Vec<NodeId>) -> NodeId {
        self.add(NodeKind::SourceUnit, children)
    }

    pub fn pragma(&mut self, text: &str) -> NodeId {
        self.add(NodeKind::Pragma { text: text.to_string() }, Vec::new())
    }

    pub fn import(&mut self, name: &str) -> NodeId {
        self.add(NodeKind::Import { name: name.to_string() }, Vec::new())
    }

    pub fn contract(&mut self, name: &str, bases: &[&str], body: Vec<NodeId>) -> NodeId {
        self.add(
            NodeKind::Contract {
                name: name.to_string(),
                bases: bases.iter().map(|b| b.to_string()).collect(),
            },
            body,
        )
    }

    pub fn structure(&mut self, name: &str, members: Vec<NodeId>) -> NodeId {
        self.add(
            NodeKind::Struct {
                name: name.to_string(),
                members: members.clone(),
            },
            members,
        )
    }

    pub fn modifier(&mut self, name: &str, body: Vec<NodeId>) -> NodeId {
        self.add(NodeKind::Modifier { name: name.to_string() }, body)
    }

    /// Children are parameters, then return parameters, then body nodes.
    pub fn function(
        &mut self,
        name: &str,
        visibility: Visibility,
        parameters: Vec<NodeId>,
        returns: Vec<NodeId>,
        body: Vec<NodeId>,
    ) -> NodeId {
        let mut children = parameters.clone();
        children.extend(returns.iter().copied());
        children.extend(body);
        self.add(
            NodeKind::Function {
                name: name.to_string(),
                visibility,
                parameters,
                returns,
            },
            children,
        )
    }

    pub fn type_name(&mut self, name: &str) -> NodeId {
        self.add(NodeKind::TypeName { name: name.to_string() }, Vec::new())
    }

    /// Declares a variable together with its own type node, which also
    /// becomes the declaration's first child.
    pub fn variable(&mut self, form: VariableForm, type_name: &str, name: &str) -> NodeId {
        let ty = self.type_name(type_name);
        self.variable_with_type(form, ty, name)
    }

    pub fn variable_with_type(
        &mut self,
        form: VariableForm,
        type_name: NodeId,
        name: &str,
    ) -> NodeId {
        self.add(
            NodeKind::Variable {
                form,
                name: name.to_string(),
                type_name,
            },
            vec![type_name],
        )
    }

    pub fn state_variable(&mut self, type_name: &str, name: &str) -> NodeId {
        self.variable(VariableForm::State, type_name, name)
    }

    pub fn parameter(&mut self, type_name: &str, name: &str) -> NodeId {
        self.variable(VariableForm::Parameter, type_name, name)
    }

    pub fn identifier(&mut self, name: &str) -> NodeId {
        self.add(NodeKind::Identifier { name: name.to_string() }, Vec::new())
    }

    /// Children are the callee followed by the arguments.
    pub fn call(&mut self, callee: NodeId, arguments: Vec<NodeId>) -> NodeId {
        let mut children = vec![callee];
        children.extend(arguments.iter().copied());
        self.add(NodeKind::FunctionCall { callee, arguments }, children)
    }

    pub fn other(&mut self, kind: &str, children: Vec<NodeId>) -> NodeId {
        self.add(NodeKind::Other(kind.to_string()), children)
    }

    pub fn finish(self) -> Ast {
        self.ast
    }
}
