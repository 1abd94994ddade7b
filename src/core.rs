use std::fmt;
use std::sync::Arc;

/// A zero-argument callable the host engine re-evaluates once per rendered
/// frame. Cloning shares the underlying closure; two branches of a
/// composition holding the same `FrameFn` see identical values each frame.
#[derive(Clone)]
pub struct FrameFn(Arc<dyn Fn() -> f64 + Send + Sync>);

impl FrameFn {
    pub fn new(f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn constant(value: f64) -> Self {
        Self::new(move || value)
    }

    pub fn call(&self) -> f64 {
        (self.0)()
    }

    /// True when both handles share the same underlying closure.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for FrameFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FrameFn(..)")
    }
}

impl From<f64> for FrameFn {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_identity() {
        let f = FrameFn::new(|| 0.25);
        let g = f.clone();
        assert!(FrameFn::ptr_eq(&f, &g));
        assert_eq!(g.call(), 0.25);
    }

    #[test]
    fn separate_closures_are_distinct() {
        let f = FrameFn::constant(1.0);
        let g = FrameFn::constant(1.0);
        assert!(!FrameFn::ptr_eq(&f, &g));
    }

    #[test]
    fn reinvocation_is_stateless() {
        let f = FrameFn::new(|| 3.0);
        for _ in 0..100 {
            assert_eq!(f.call(), 3.0);
        }
    }
}
