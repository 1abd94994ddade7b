use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use crate::{
    error::{LumicError, LumicResult},
    graph::{Arg, ChainDefaults, OpKind, OperatorChain, OperatorDef, OperatorNode, OutputSlot},
};

/// Built-in operator definitions, shared by every chain the DSL builds.
pub struct OpRegistry {
    defs: BTreeMap<&'static str, Arc<OperatorDef>>,
}

impl OpRegistry {
    pub fn builtin() -> &'static OpRegistry {
        static REGISTRY: OnceLock<OpRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let table: &[(&'static str, OpKind, usize)] = &[
                ("osc", OpKind::Source, 3),
                ("solid", OpKind::Source, 4),
                ("shape", OpKind::Source, 3),
                ("src", OpKind::Source, 1),
                ("color", OpKind::Color, 3),
                ("saturate", OpKind::Color, 1),
                ("contrast", OpKind::Color, 1),
                ("invert", OpKind::Color, 1),
                ("posterize", OpKind::Color, 2),
                ("thresh", OpKind::Color, 2),
                ("luma", OpKind::Color, 2),
                ("r", OpKind::Color, 2),
                ("g", OpKind::Color, 2),
                ("b", OpKind::Color, 2),
                ("rotate", OpKind::Geometry, 2),
                ("scroll", OpKind::Geometry, 2),
                ("blend", OpKind::Combine, 2),
                ("add", OpKind::Combine, 2),
                ("diff", OpKind::Combine, 1),
                ("modulate", OpKind::Modulate, 2),
            ];
            let defs = table
                .iter()
                .map(|(name, kind, arity)| (*name, Arc::new(OperatorDef::new(*name, *kind, *arity))))
                .collect();
            OpRegistry { defs }
        })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<OperatorDef>> {
        self.defs.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defs.keys().copied()
    }
}

// Built-in defs are looked up by the name they were registered under.
fn builtin(name: &'static str) -> Arc<OperatorDef> {
    Arc::clone(
        OpRegistry::builtin()
            .get(name)
            .unwrap_or_else(|| unreachable!("builtin operator '{name}' is registered")),
    )
}

fn source(name: &'static str, args: Vec<Arg>) -> OperatorChain {
    OperatorChain {
        nodes: vec![OperatorNode {
            def: builtin(name),
            args,
        }],
        output: OutputSlot::default(),
        defaults: Arc::new(ChainDefaults::default()),
    }
}

/// Oscillator source.
pub fn osc(freq: impl Into<Arg>, sync: impl Into<Arg>, offset: impl Into<Arg>) -> OperatorChain {
    source("osc", vec![freq.into(), sync.into(), offset.into()])
}

/// Flat color source.
pub fn solid(
    r: impl Into<Arg>,
    g: impl Into<Arg>,
    b: impl Into<Arg>,
    a: impl Into<Arg>,
) -> OperatorChain {
    source("solid", vec![r.into(), g.into(), b.into(), a.into()])
}

/// Polygon source.
pub fn shape(
    sides: impl Into<Arg>,
    radius: impl Into<Arg>,
    smoothing: impl Into<Arg>,
) -> OperatorChain {
    source("shape", vec![sides.into(), radius.into(), smoothing.into()])
}

/// External named input (camera, canvas, image slot).
pub fn src(input: impl Into<Arg>) -> OperatorChain {
    source("src", vec![input.into()])
}

impl OperatorChain {
    /// Appends `def` with `args`, validating the stored-argument count.
    pub fn push(mut self, def: Arc<OperatorDef>, args: Vec<Arg>) -> LumicResult<Self> {
        if args.len() != def.arity {
            return Err(LumicError::invalid_input(format!(
                "operator '{}' takes {} arguments, got {}",
                def.name,
                def.arity,
                args.len()
            )));
        }
        self.nodes.push(OperatorNode { def, args });
        Ok(self)
    }

    fn append(mut self, name: &'static str, args: Vec<Arg>) -> Self {
        let def = builtin(name);
        debug_assert_eq!(args.len(), def.arity);
        self.nodes.push(OperatorNode { def, args });
        self
    }

    pub fn color(self, r: impl Into<Arg>, g: impl Into<Arg>, b: impl Into<Arg>) -> Self {
        self.append("color", vec![r.into(), g.into(), b.into()])
    }

    pub fn saturate(self, amount: impl Into<Arg>) -> Self {
        self.append("saturate", vec![amount.into()])
    }

    pub fn contrast(self, amount: impl Into<Arg>) -> Self {
        self.append("contrast", vec![amount.into()])
    }

    pub fn invert(self, amount: impl Into<Arg>) -> Self {
        self.append("invert", vec![amount.into()])
    }

    pub fn posterize(self, bins: impl Into<Arg>, gamma: impl Into<Arg>) -> Self {
        self.append("posterize", vec![bins.into(), gamma.into()])
    }

    pub fn thresh(self, threshold: impl Into<Arg>, tolerance: impl Into<Arg>) -> Self {
        self.append("thresh", vec![threshold.into(), tolerance.into()])
    }

    pub fn luma(self, threshold: impl Into<Arg>, tolerance: impl Into<Arg>) -> Self {
        self.append("luma", vec![threshold.into(), tolerance.into()])
    }

    pub fn r(self, scale: impl Into<Arg>, offset: impl Into<Arg>) -> Self {
        self.append("r", vec![scale.into(), offset.into()])
    }

    pub fn g(self, scale: impl Into<Arg>, offset: impl Into<Arg>) -> Self {
        self.append("g", vec![scale.into(), offset.into()])
    }

    pub fn b(self, scale: impl Into<Arg>, offset: impl Into<Arg>) -> Self {
        self.append("b", vec![scale.into(), offset.into()])
    }

    pub fn rotate(self, angle: impl Into<Arg>, speed: impl Into<Arg>) -> Self {
        self.append("rotate", vec![angle.into(), speed.into()])
    }

    pub fn scroll(self, x: impl Into<Arg>, y: impl Into<Arg>) -> Self {
        self.append("scroll", vec![x.into(), y.into()])
    }

    pub fn blend(self, other: OperatorChain, amount: impl Into<Arg>) -> Self {
        self.append("blend", vec![other.into(), amount.into()])
    }

    pub fn add(self, other: OperatorChain, amount: impl Into<Arg>) -> Self {
        self.append("add", vec![other.into(), amount.into()])
    }

    pub fn diff(self, other: OperatorChain) -> Self {
        self.append("diff", vec![other.into()])
    }

    pub fn modulate(self, other: OperatorChain, amount: impl Into<Arg>) -> Self {
        self.append("modulate", vec![other.into(), amount.into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameFn;

    #[test]
    fn registry_exposes_builtins() {
        let reg = OpRegistry::builtin();
        let osc = reg.get("osc").unwrap();
        assert_eq!(osc.kind, OpKind::Source);
        assert_eq!(osc.arity, 3);
        assert!(reg.get("warp").is_none());
    }

    #[test]
    fn registry_defs_are_shared() {
        let a = builtin("color");
        let b = builtin("color");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn chaining_appends_in_order() {
        let chain = osc(20.0, 0.1, 0.0).color(1.0, 0.0, 0.0).saturate(0.0);
        assert_eq!(chain.op_names(), ["osc", "color", "saturate"]);
    }

    #[test]
    fn combine_ops_nest_the_other_chain() {
        let chain = osc(5.0, 0.4, 0.0).add(solid(0.0, 0.0, 0.0, 1.0), 1.0);
        let Arg::Chain(nested) = &chain.nodes[1].args[0] else {
            panic!("expected nested chain argument");
        };
        assert_eq!(nested.op_names(), ["solid"]);
    }

    #[test]
    fn push_rejects_arity_mismatch() {
        let def = builtin("color");
        let err = osc(1.0, 0.0, 0.0)
            .push(def, vec![Arg::Number(1.0)])
            .unwrap_err();
        assert!(matches!(err, LumicError::InvalidInput(_)));
    }

    #[test]
    fn args_accept_frame_fns_and_lists() {
        let chain = osc(FrameFn::constant(10.0), 0.1, 0.0).scroll(vec![-0.1, 0.1], 0.0);
        assert!(matches!(chain.nodes[0].args[0], Arg::Fn(_)));
        assert!(matches!(chain.nodes[1].args[0], Arg::List(_)));
    }
}
