use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{
    core::FrameFn,
    error::{LumicError, LumicResult},
    tagged::TaggedSeq,
};

/// Operator classes of the host engine's chain API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum OpKind {
    Source,
    Color,
    Geometry,
    Combine,
    Modulate,
}

/// Immutable operator definition, shared across every chain (and clone) that
/// references it. `arity` counts the stored arguments, not the implicit input
/// a non-source operator consumes from the previous node.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OperatorDef {
    pub name: String,
    pub kind: OpKind,
    pub arity: usize,
}

impl OperatorDef {
    pub fn new(name: impl Into<String>, kind: OpKind, arity: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            arity,
        }
    }
}

/// Output-routing identifier (`o0`..`o3` in the engine).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct OutputSlot(pub u8);

/// Default-uniform configuration the engine applies when evaluating a chain.
/// Owned by the evaluation context; chains and their clones share it by
/// reference.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChainDefaults {
    pub uniforms: BTreeMap<String, f64>,
}

/// One stored argument of an operator node. The variant encodes the ownership
/// rule cloning must follow: a node owns its `List` payload, while `Fn`
/// callables and operator definitions are shared references.
#[derive(Debug)]
pub enum Arg {
    Number(f64),
    Text(String),
    Flag(bool),
    Fn(FrameFn),
    List(TaggedSeq<f64>),
    Chain(OperatorChain),
}

impl From<f64> for Arg {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Arg {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<FrameFn> for Arg {
    fn from(f: FrameFn) -> Self {
        Self::Fn(f)
    }
}

impl From<TaggedSeq<f64>> for Arg {
    fn from(seq: TaggedSeq<f64>) -> Self {
        Self::List(seq)
    }
}

impl From<Vec<f64>> for Arg {
    fn from(values: Vec<f64>) -> Self {
        Self::List(TaggedSeq::new(values))
    }
}

impl From<OperatorChain> for Arg {
    fn from(chain: OperatorChain) -> Self {
        Self::Chain(chain)
    }
}

/// One step of a composed chain.
#[derive(Debug)]
pub struct OperatorNode {
    pub def: Arc<OperatorDef>,
    pub args: Vec<Arg>,
}

/// An ordered composition of operator nodes. Each node consumes the evaluated
/// output of the previous one; the first node is a source. Duplication goes
/// through [`clone_chain`], deliberately not `Clone`, so the per-argument
/// sharing rules cannot be bypassed.
#[derive(Debug)]
pub struct OperatorChain {
    pub nodes: Vec<OperatorNode>,
    pub output: OutputSlot,
    pub defaults: Arc<ChainDefaults>,
}

impl OperatorChain {
    /// Operator names in chain order.
    pub fn op_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.def.name.as_str()).collect()
    }

    pub fn route_to(mut self, slot: OutputSlot) -> Self {
        self.output = slot;
        self
    }
}

/// Structurally-identical, aliasing-free copy of `chain`.
///
/// Feeding one chain object into two branches of a larger composition makes
/// the engine treat both branches as depending on a single mutable state,
/// which ends in runaway self-modulation. Cloning breaks the aliasing while
/// keeping argument semantics: callables stay shared (live parameters keep
/// updating identically in both branches), plain lists get independent
/// containers, nested chains are cloned recursively, operator definitions and
/// the defaults context stay shared references.
///
/// Fails with `InvalidInput` when `chain` carries no operator list; there is
/// no partial clone.
#[tracing::instrument(skip(chain), fields(nodes = chain.nodes.len()))]
pub fn clone_chain(chain: &OperatorChain) -> LumicResult<OperatorChain> {
    if chain.nodes.is_empty() {
        return Err(LumicError::invalid_input(
            "clone requires a composed chain with at least one operator node",
        ));
    }

    let nodes = chain
        .nodes
        .iter()
        .map(clone_node)
        .collect::<LumicResult<Vec<_>>>()?;

    Ok(OperatorChain {
        nodes,
        output: chain.output,
        defaults: Arc::clone(&chain.defaults),
    })
}

fn clone_node(node: &OperatorNode) -> LumicResult<OperatorNode> {
    let args = node
        .args
        .iter()
        .map(clone_arg)
        .collect::<LumicResult<Vec<_>>>()?;
    Ok(OperatorNode {
        def: Arc::clone(&node.def),
        args,
    })
}

fn clone_arg(arg: &Arg) -> LumicResult<Arg> {
    match arg {
        Arg::Number(n) => Ok(Arg::Number(*n)),
        Arg::Text(s) => Ok(Arg::Text(s.clone())),
        Arg::Flag(b) => Ok(Arg::Flag(*b)),
        Arg::Fn(f) => Ok(Arg::Fn(f.clone())), // shared, same callable
        Arg::List(seq) => Ok(Arg::List(seq.clone())), // new container
        Arg::Chain(nested) => Ok(Arg::Chain(clone_chain(nested)?)),
    }
}
