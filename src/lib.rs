//! # solprint
//!
//! Renders a contract program's syntax tree into indented text, so that a
//! tree can be snapshotted before and after an optimizer pass and the two
//! snapshots compared.

pub mod optimizer;
pub mod parser;
pub mod renderer;
pub mod verify;


pub use optimizer::{Optimizer, Pass, PassReport};
pub use parser::{Ast, AstBuilder, AstParser, NodeId, NodeKind, VariableForm, Visibility};
pub use renderer::{render_to_string, AstRenderer, RenderContext};
pub use verify::{verify, Expectation, VerifyOutcome};
