use crate::{core::FrameFn, tagged::TaggedSeq};

/// Seed offsets for the green and blue channels of [`generate_color`]. The
/// red channel uses the seed as-is.
const GREEN_OFFSET: f64 = 666.0;
const BLUE_OFFSET: f64 = 1337.0;

/// Input to deterministic generation. Generation never mutates a seed and
/// always produces output of the same shape: a scalar maps to a scalar, a
/// generator to a generator, a sequence to a sequence (tags preserved).
#[derive(Clone, Debug)]
pub enum Seed {
    Scalar(f64),
    Generator(FrameFn),
    Sequence(TaggedSeq<Seed>),
}

impl Seed {
    pub fn from_fn(f: impl Fn() -> f64 + Send + Sync + 'static) -> Self {
        Self::Generator(FrameFn::new(f))
    }

    /// Scalar payload, if this seed is one.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Seed {
    fn from(n: f64) -> Self {
        Self::Scalar(n)
    }
}

impl From<FrameFn> for Seed {
    fn from(f: FrameFn) -> Self {
        Self::Generator(f)
    }
}

impl From<Vec<Seed>> for Seed {
    fn from(seeds: Vec<Seed>) -> Self {
        Self::Sequence(TaggedSeq::new(seeds))
    }
}

// Fractional part of sin(n) * 10000. Non-cryptographic; picked for run-to-run
// repeatability at the cost of one float op. Non-finite seeds flow through
// unguarded.
fn fract_sin(n: f64) -> f64 {
    let x = n.sin() * 10000.0;
    x - x.floor()
}

/// Deterministic value in [0, 1) (per scalar) derived from `seed`, with the
/// same shape as `seed`. Generators compose lazily: the returned generator
/// hashes the wrapped callable's value at each evaluation instead of
/// evaluating it here.
pub fn generate(seed: &Seed) -> Seed {
    match seed {
        Seed::Scalar(n) => Seed::Scalar(fract_sin(*n)),
        Seed::Generator(g) => {
            let g = g.clone();
            Seed::Generator(FrameFn::new(move || fract_sin(g.call())))
        }
        Seed::Sequence(seeds) => Seed::Sequence(seeds.map(generate)),
    }
}

/// Three correlated-but-distinct channels from one seed: the seed itself,
/// the seed offset by a fixed green constant, and by a fixed blue constant.
/// Each channel is then fed through [`generate`], so the components follow
/// the seed's shape.
pub fn generate_color(seed: &Seed) -> [Seed; 3] {
    [
        generate(seed),
        generate(&offset(seed, GREEN_OFFSET)),
        generate(&offset(seed, BLUE_OFFSET)),
    ]
}

// Shape-preserving offset: scalars add, generators wrap (the constant is
// added to the wrapped result before hashing), sequences add elementwise
// with tags preserved.
fn offset(seed: &Seed, by: f64) -> Seed {
    match seed {
        Seed::Scalar(n) => Seed::Scalar(n + by),
        Seed::Generator(g) => {
            let g = g.clone();
            Seed::Generator(FrameFn::new(move || g.call() + by))
        }
        Seed::Sequence(seeds) => Seed::Sequence(seeds.map(|s| offset(s, by))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn scalar(seed: &Seed) -> f64 {
        seed.as_scalar().expect("expected scalar")
    }

    #[test]
    fn scalar_generation_is_deterministic() {
        let a = scalar(&generate(&Seed::Scalar(5.0)));
        let b = scalar(&generate(&Seed::Scalar(5.0)));
        assert_eq!(a, b);
        assert!((0.0..1.0).contains(&a));
    }

    #[test]
    fn distinct_seeds_differ() {
        let a = scalar(&generate(&Seed::Scalar(1.0)));
        let b = scalar(&generate(&Seed::Scalar(2.0)));
        assert_ne!(a, b);
    }

    #[test]
    fn scalar_matches_fixed_formula() {
        let n = 5.0f64;
        let x = n.sin() * 10000.0;
        assert_eq!(scalar(&generate(&Seed::Scalar(n))), x - x.floor());
    }

    #[test]
    fn generator_composes_without_eager_evaluation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let seed = Seed::from_fn(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            7.0
        });

        let out = generate(&seed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        let Seed::Generator(g) = out else {
            panic!("generator seed must generate a generator");
        };
        let expected = scalar(&generate(&Seed::Scalar(7.0)));
        assert_eq!(g.call(), expected);
        assert_eq!(g.call(), expected);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn sequence_generation_is_elementwise_and_keeps_tags() {
        let seeds = TaggedSeq::new(vec![Seed::Scalar(1.0), Seed::Scalar(2.0), Seed::Scalar(3.0)])
            .with_tag("_speed", 2)
            .unwrap();
        let out = generate(&Seed::Sequence(seeds));

        let Seed::Sequence(out) = out else {
            panic!("sequence seed must generate a sequence");
        };
        assert_eq!(out.len(), 3);
        assert_eq!(out.tag("_speed"), Some(&serde_json::json!(2)));
        for (i, n) in [1.0, 2.0, 3.0].iter().enumerate() {
            assert_eq!(
                scalar(&out.items()[i]),
                scalar(&generate(&Seed::Scalar(*n)))
            );
        }
    }

    #[test]
    fn color_channels_use_fixed_offsets() {
        let [r, g, b] = generate_color(&Seed::Scalar(5.0));
        assert_eq!(scalar(&r), scalar(&generate(&Seed::Scalar(5.0))));
        assert_eq!(scalar(&g), scalar(&generate(&Seed::Scalar(5.0 + 666.0))));
        assert_eq!(scalar(&b), scalar(&generate(&Seed::Scalar(5.0 + 1337.0))));
    }

    #[test]
    fn color_of_generator_seed_offsets_before_hashing() {
        let seed = Seed::from_fn(|| 5.0);
        let [_, g, _] = generate_color(&seed);
        let Seed::Generator(g) = g else {
            panic!("generator seed must generate generator channels");
        };
        assert_eq!(g.call(), scalar(&generate(&Seed::Scalar(5.0 + 666.0))));
    }

    #[test]
    fn color_of_sequence_seed_offsets_elementwise() {
        let seeds = TaggedSeq::new(vec![Seed::Scalar(1.0), Seed::Scalar(2.0)])
            .with_tag("_ease", "sin")
            .unwrap();
        let [_, _, b] = generate_color(&Seed::Sequence(seeds));
        let Seed::Sequence(b) = b else {
            panic!("sequence seed must generate sequence channels");
        };
        assert_eq!(b.tag("_ease"), Some(&serde_json::json!("sin")));
        assert_eq!(
            scalar(&b.items()[1]),
            scalar(&generate(&Seed::Scalar(2.0 + 1337.0)))
        );
    }
}
