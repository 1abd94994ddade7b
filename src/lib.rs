//! Lumic is a composition support library for a live visual-synthesis engine.
//!
//! The engine owns evaluation (frame timing, shader execution, output
//! routing); this crate owns the structural side of composing with it:
//!
//! - **Chain cloning**: [`clone_chain`] duplicates a composed operator chain
//!   so feedback/self-referencing compositions never alias one mutable chain.
//! - **Seeded generation**: [`generate`] / [`generate_color`] derive stable
//!   per-seed values from scalar, callable, or nested-sequence seeds.
//! - **Channel reshaping**: [`reshape()`] transposes per-sample color triples
//!   into the per-channel sequences the engine's parameter slots expect.
//! - A declarative layer over those primitives: the chain DSL ([`ops`]),
//!   palette compositions ([`palette`]), clock-driven faders ([`mixer`]),
//!   and sampling helpers ([`random`]).
#![forbid(unsafe_code)]

pub mod core;
pub mod error;
pub mod graph;
pub mod mixer;
pub mod motion;
pub mod ops;
pub mod palette;
pub mod random;
pub mod reshape;
pub mod seed;
pub mod tagged;

pub use crate::core::FrameFn;
pub use error::{LumicError, LumicResult};
pub use graph::{
    Arg, ChainDefaults, OpKind, OperatorChain, OperatorDef, OperatorNode, OutputSlot, clone_chain,
};
pub use mixer::{Clock, fade_in, fade_out, pulse, pulse_bpm};
pub use motion::circular_scroll;
pub use ops::{OpRegistry, osc, shape, solid, src};
pub use reshape::reshape;
pub use seed::{Seed, generate, generate_color};
pub use tagged::{TAG_PREFIX, TaggedSeq};
