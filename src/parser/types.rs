use serde::Deserialize;

/// Opaque handle to a node stored in an [`Ast`] arena.
///
/// Two structurally identical nodes at different positions get different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    Internal,
    Private,
    External,
    #[default]
    Unknown,
}

impl Visibility {
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "public" => Visibility::Public,
            "internal" => Visibility::Internal,
            "private" => Visibility::Private,
            "external" => Visibility::External,
            _ => Visibility::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Internal => "internal",
            Visibility::Private => "private",
            Visibility::External => "external",
            Visibility::Unknown => "unknown",
        }
    }
}

/// The two shapes a variable declaration takes in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableForm {
    /// Contract-level storage variable
    State,
    /// Function parameter, return parameter or local
    Parameter,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    SourceUnit,
    Pragma {
        text: String,
    },
    Import {
        name: String,
    },
    Contract {
        name: String,
        bases: Vec<String>,
    },
    Struct {
        name: String,
        members: Vec<NodeId>,
    },
    Modifier {
        name: String,
    },
    Function {
        name: String,
        visibility: Visibility,
        parameters: Vec<NodeId>,
        returns: Vec<NodeId>,
    },
    Variable {
        form: VariableForm,
        name: String,
        type_name: NodeId,
    },
    FunctionCall {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    TypeName {
        name: String,
    },
    Identifier {
        name: String,
    },
    /// Any construct without a dedicated formatter, keyed by its kind name.
    Other(String),
}

impl NodeKind {
    /// Stable name of the kind, as written in input documents.
    pub fn kind_name(&self) -> &str {
        match self {
            NodeKind::SourceUnit => "SourceUnit",
            NodeKind::Pragma { .. } => "PragmaDirective",
            NodeKind::Import { .. } => "ImportDirective",
            NodeKind::Contract { .. } => "ContractDefinition",
            NodeKind::Struct { .. } => "StructDefinition",
            NodeKind::Modifier { .. } => "ModifierDefinition",
            NodeKind::Function { .. } => "FunctionDefinition",
            NodeKind::Variable { .. } => "VariableDeclaration",
            NodeKind::FunctionCall { .. } => "FunctionCall",
            NodeKind::TypeName { .. } => "ElementaryTypeName",
            NodeKind::Identifier { .. } => "Identifier",
            NodeKind::Other(kind) => kind,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
}

/// Arena holding every node of a program tree.
///
/// `roots` is the ordered list of top-level nodes the renderer walks.
#[derive(Debug, Clone, Default)]
pub struct Ast {
    pub(crate) nodes: Vec<Node>,
    pub(crate) roots: Vec<NodeId>,
}

impl Ast {
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    /// Kind of `id`, or `None` when the handle does not belong to this arena.
    pub fn kind_of(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|node| &node.kind)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, children: Vec<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, children });
        id
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Name carried by the node, or an empty string for kinds without one and
    /// for handles outside the arena.
    pub fn name_of(&self, id: NodeId) -> &str {
        match self.kind_of(id) {
            Some(
                NodeKind::Import { name }
                | NodeKind::Contract { name, .. }
                | NodeKind::Struct { name, .. }
                | NodeKind::Modifier { name }
                | NodeKind::Function { name, .. }
                | NodeKind::Variable { name, .. }
                | NodeKind::TypeName { name }
                | NodeKind::Identifier { name },
            ) => name,
            _ => "",
        }
    }

    /// Every node reachable from `start` through child lists, pre-order, each once.
    pub fn descendants(&self, start: NodeId) -> Vec<NodeId> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let Some(node) = self.get(id) else {
                continue;
            };
            out.push(id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }
}

// Raw document structures, as read from JSON input

#[derive(Debug, Deserialize, Default)]
pub struct RawDocument {
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawNode {
    pub kind: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub members: Vec<RawNode>,
    #[serde(default)]
    pub parameters: Vec<RawNode>,
    #[serde(default)]
    pub returns: Vec<RawNode>,
    #[serde(default)]
    pub callee: Option<Box<RawNode>>,
    #[serde(default)]
    pub arguments: Vec<RawNode>,
    #[serde(default)]
    pub children: Vec<RawNode>,
}
