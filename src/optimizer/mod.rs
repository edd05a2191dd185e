//! In-place tree transformations.
//!
//! Each pass rewrites the arena directly and reports how many sites it
//! changed. Passes do not re-render anything; comparing before/after text is
//! the job of [`crate::verify`].

pub mod calldata;
pub mod storage_cache;
pub mod struct_packing;

use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::parser::Ast;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    StructPacking,
    CallData,
    StorageCache,
}

impl Pass {
    pub const ALL: [Pass; 3] = [Pass::StructPacking, Pass::CallData, Pass::StorageCache];

    pub fn name(self) -> &'static str {
        match self {
            Pass::StructPacking => "struct-pack",
            Pass::CallData => "calldata",
            Pass::StorageCache => "storage-cache",
        }
    }

    fn apply(self, ast: &mut Ast) -> usize {
        match self {
            Pass::StructPacking => struct_packing::pack_structs(ast),
            Pass::CallData => calldata::optimize_call_data(ast),
            Pass::StorageCache => storage_cache::cache_storage_variables(ast),
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pass {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Pass::ALL
            .into_iter()
            .find(|pass| pass.name() == s)
            .ok_or_else(|| {
                anyhow!(
                    "unknown pass `{}` (expected struct-pack, calldata or storage-cache)",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    pub applied: Vec<(Pass, usize)>,
}

impl PassReport {
    pub fn total_changes(&self) -> usize {
        self.applied.iter().map(|(_, changes)| changes).sum()
    }

    pub fn changes_for(&self, pass: Pass) -> usize {
        self.applied
            .iter()
            .filter(|(p, _)| *p == pass)
            .map(|(_, changes)| changes)
            .sum()
    }
}

pub struct Optimizer;

impl Optimizer {
    /// Applies `passes` to `ast` in order.
    pub fn run(ast: &mut Ast, passes: &[Pass]) -> PassReport {
        let mut report = PassReport::default();
        for &pass in passes {
            let changes = pass.apply(ast);
            debug!(pass = pass.name(), changes, "pass applied");
            report.applied.push((pass, changes));
        }
        report
    }
}
