//! Motion compositions over the chain DSL.

use crate::{
    error::LumicResult,
    graph::{OperatorChain, clone_chain},
    tagged::TaggedSeq,
};

/// Scrolls an independent copy of `source` along a circle of `radius`.
///
/// Both scroll coordinates sweep `[-radius, radius]` with sine easing at
/// `|speed|`; the x coordinate is phase-shifted by a quarter turn in the
/// direction of `speed`'s sign. The easing, rate, and phase ride on the
/// coordinate lists as `_ease` / `_speed` / `_offset` tags for the engine's
/// sequence interpolator.
pub fn circular_scroll(
    source: &OperatorChain,
    speed: f64,
    radius: f64,
) -> LumicResult<OperatorChain> {
    let sign = if speed > 0.0 {
        1.0
    } else if speed < 0.0 {
        -1.0
    } else {
        0.0
    };
    let x = TaggedSeq::new(vec![-radius, radius])
        .with_tag("_ease", "sin")?
        .with_tag("_speed", speed.abs())?
        .with_tag("_offset", sign * 0.5)?;
    let y = TaggedSeq::new(vec![-radius, radius])
        .with_tag("_ease", "sin")?
        .with_tag("_speed", speed.abs())?;
    Ok(clone_chain(source)?.scroll(x, y))
}
