use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing::{debug, warn};

use crate::parser::builder::AstBuilder;
use crate::parser::types::*;

// Parser for converting raw JSON documents into the node arena
pub struct AstParser {
    builder: AstBuilder,
}

impl AstParser {
    pub fn new() -> Self {
        Self {
            builder: AstBuilder::new(),
        }
    }

    pub fn parse_file(path: &Path) -> Result<Ast> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::parse_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn parse_str(json: &str) -> Result<Ast> {
        let document: RawDocument = serde_json::from_str(json).context("invalid AST document")?;
        Self::new().parse_document(&document)
    }

    pub fn parse_document(mut self, document: &RawDocument) -> Result<Ast> {
        for raw in &document.nodes {
            let id = self.parse_node(raw)?;
            self.builder.push_root(id);
        }
        let ast = self.builder.finish();
        debug!(nodes = ast.len(), roots = ast.roots().len(), "parsed AST document");
        Ok(ast)
    }

    fn parse_nodes(&mut self, raws: &[RawNode]) -> Result<Vec<NodeId>> {
        raws.iter().map(|raw| self.parse_node(raw)).collect()
    }

    fn parse_node(&mut self, raw: &RawNode) -> Result<NodeId> {
        let kind = raw
            .kind
            .as_deref()
            .ok_or_else(|| anyhow!("node without a `kind` field (name: {:?})", raw.name))?;
        let name = raw.name.as_deref().unwrap_or_default();

        let id = match kind {
            "SourceUnit" => {
                let children = self.parse_nodes(&raw.children)?;
                self.builder.source_unit(children)
            }
            "Pragma" | "PragmaDirective" => {
                let text = raw.text.as_deref().or(raw.name.as_deref()).unwrap_or_default();
                self.builder.pragma(text)
            }
            "Import" | "ImportDirective" => self.builder.import(name),
            "Contract" | "ContractDefinition" => {
                let body = self.parse_nodes(&raw.children)?;
                let bases: Vec<&str> = raw.bases.iter().map(String::as_str).collect();
                self.builder.contract(name, &bases, body)
            }
            "Struct" | "StructDefinition" => {
                let members = self.parse_nodes(&raw.members)?;
                self.builder.structure(name, members)
            }
            "Modifier" | "ModifierDefinition" => {
                let body = self.parse_nodes(&raw.children)?;
                self.builder.modifier(name, body)
            }
            "Function" | "FunctionDefinition" => {
                let parameters = self.parse_nodes(&raw.parameters)?;
                let returns = self.parse_nodes(&raw.returns)?;
                let body = self.parse_nodes(&raw.children)?;
                let visibility = raw
                    .visibility
                    .as_deref()
                    .map(Visibility::from_keyword)
                    .unwrap_or_default();
                self.builder.function(name, visibility, parameters, returns, body)
            }
            "StateVariable" | "StateVariableDeclaration" => {
                self.parse_variable(raw, VariableForm::State)?
            }
            "Parameter" | "VariableDeclaration" => {
                self.parse_variable(raw, VariableForm::Parameter)?
            }
            "FunctionCall" => {
                let callee = match &raw.callee {
                    Some(callee) => self.parse_node(callee)?,
                    None => self.builder.identifier(""),
                };
                let arguments = self.parse_nodes(&raw.arguments)?;
                self.builder.call(callee, arguments)
            }
            "TypeName" | "ElementaryTypeName" => self.builder.type_name(name),
            "Identifier" | "PrimaryExpression" => self.builder.identifier(name),
            other => {
                let children = self.parse_nodes(&raw.children)?;
                debug!(kind = other, "no dedicated node kind, keeping as generic node");
                self.builder.other(other, children)
            }
        };
        if !takes_children(kind) && !raw.children.is_empty() {
            warn!(
                kind,
                children = raw.children.len(),
                "unexpected children on node, attaching after its own"
            );
            for child in &raw.children {
                let child = self.parse_node(child)?;
                self.builder.attach(id, child);
            }
        }
        Ok(id)
    }

    fn parse_variable(&mut self, raw: &RawNode, form: VariableForm) -> Result<NodeId> {
        let name = raw.name.as_deref().unwrap_or_default();
        let type_name = match raw.type_name.as_deref() {
            Some(ty) => ty,
            None => {
                warn!(variable = name, "variable declaration without a type");
                ""
            }
        };
        let id = self.builder.variable(form, type_name, name);
        for child in &raw.children {
            let child = self.parse_node(child)?;
            self.builder.attach(id, child);
        }
        Ok(id)
    }
}

/// Whether the constructor for `kind` already consumes the raw `children` list.
fn takes_children(kind: &str) -> bool {
    !matches!(
        kind,
        "Pragma"
            | "PragmaDirective"
            | "Import"
            | "ImportDirective"
            | "Struct"
            | "StructDefinition"
            | "FunctionCall"
            | "TypeName"
            | "ElementaryTypeName"
            | "Identifier"
            | "PrimaryExpression"
    )
}

impl Default for AstParser {
    fn default() -> Self {
        Self::new()
    }
}
