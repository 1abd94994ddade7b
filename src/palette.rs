//! Color compositions over the chain DSL.
//!
//! Everything here builds chains declaratively; evaluation stays with the
//! host engine. Compositions that feed a source into two diverging branches
//! clone it first, so the branches never alias one mutable chain.

use std::f64::consts::PI;

use crate::{
    error::{LumicError, LumicResult},
    graph::{OperatorChain, clone_chain},
    ops::osc,
};

/// Smooth two-phase gradient: an oscillator blended with its half-turn
/// rotation.
pub fn better_gradient(speed: f64) -> OperatorChain {
    osc(PI / 2.0, speed, PI / 2.0).blend(osc(PI / 2.0, speed, PI / 2.0).rotate(PI, 0.0), 0.5)
}

/// Posterized single-color stripes modulated by `source`.
pub fn mono_stripes(source: &OperatorChain, color: [f64; 3]) -> LumicResult<OperatorChain> {
    let modulator = clone_chain(source)?;
    Ok(osc(20.0, 0.04, 0.0)
        .color(color[0], color[1], color[2])
        .posterize(20.0, 0.6)
        .modulate(modulator, 0.5))
}

/// Two-tone stripes: a light oscillator plus its inverted dark counterpart,
/// each modulated by an independent copy of `source`.
pub fn duo_stripes(
    source: &OperatorChain,
    light: [f64; 3],
    dark: [f64; 3],
) -> LumicResult<OperatorChain> {
    let osc_freq = 5.0;
    let osc_sync = 0.4;
    let light_branch = clone_chain(source)?;
    let dark_branch = clone_chain(source)?;
    Ok(osc(osc_freq, osc_sync, 0.0)
        .color(light[0], light[1], light[2])
        .modulate(light_branch, 0.5)
        .add(
            osc(osc_freq, osc_sync, 0.0)
                .invert(1.0)
                .color(dark[0], dark[1], dark[2])
                .modulate(dark_branch, 0.5),
            1.0,
        ))
}

/// Desaturates `source` and recolors it.
pub fn monochrome(source: &OperatorChain, color: [f64; 3]) -> LumicResult<OperatorChain> {
    Ok(clone_chain(source)?
        .saturate(0.0)
        .color(color[0], color[1], color[2]))
}

/// Light tone on the source plus dark tone on its inverse, over independent
/// copies.
pub fn duochrome(
    source: &OperatorChain,
    light: [f64; 3],
    dark: [f64; 3],
) -> LumicResult<OperatorChain> {
    let light_branch = clone_chain(source)?;
    let dark_branch = clone_chain(source)?;
    Ok(light_branch
        .saturate(0.0)
        .color(light[0], light[1], light[2])
        .add(
            dark_branch
                .invert(1.0)
                .saturate(0.0)
                .color(dark[0], dark[1], dark[2]),
            1.0,
        ))
}

/// Single-branch duochrome approximation: recolor, crush the contrast, then
/// oversaturate.
pub fn simple_duochrome(source: &OperatorChain, color: [f64; 3]) -> LumicResult<OperatorChain> {
    Ok(clone_chain(source)?
        .saturate(0.0)
        .color(color[0], color[1], color[2])
        .contrast(0.1)
        .saturate(10.0))
}

/// Edge outline: the difference of two threshold levels of `source`,
/// re-thresholded.
pub fn contour(source: &OperatorChain) -> LumicResult<OperatorChain> {
    let fine = clone_chain(source)?;
    let coarse = clone_chain(source)?;
    Ok(fine
        .thresh(0.01, 0.04)
        .diff(coarse.thresh(0.1, 0.04))
        .thresh(0.5, 0.04))
}

/// Splits `source` into independent red, green, and blue chains.
pub fn split_colors(source: &OperatorChain) -> LumicResult<[OperatorChain; 3]> {
    Ok([
        clone_chain(source)?.color(1.0, 0.0, 0.0),
        clone_chain(source)?.color(0.0, 1.0, 0.0),
        clone_chain(source)?.color(0.0, 0.0, 1.0),
    ])
}

/// Recombines the channels of `source` through one color transform per
/// channel: output = r·transforms[0] + g·transforms[1] + b·transforms[2].
pub fn shift_colors(
    source: &OperatorChain,
    transforms: &[[f64; 3]; 3],
) -> LumicResult<OperatorChain> {
    let [t0, t1, t2] = transforms;
    Ok(clone_chain(source)?
        .r(1.0, 0.0)
        .color(t0[0], t0[1], t0[2])
        .add(
            clone_chain(source)?.g(1.0, 0.0).color(t1[0], t1[1], t1[2]),
            1.0,
        )
        .add(
            clone_chain(source)?.b(1.0, 0.0).color(t2[0], t2[1], t2[2]),
            1.0,
        ))
}

/// Parses `#rrggbb` (hash optional) into normalized RGB.
pub fn hex_to_rgb(hex: &str) -> LumicResult<[f64; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(LumicError::invalid_input(format!(
            "expected a 6-digit hex color, got '{hex}'"
        )));
    }

    let mut rgb = [0.0; 3];
    for (slot, pair) in rgb.iter_mut().zip([0..2, 2..4, 4..6]) {
        let byte = u8::from_str_radix(&digits[pair], 16).map_err(|_| {
            LumicError::invalid_input(format!("'{hex}' contains a non-hex digit"))
        })?;
        *slot = f64::from(byte) / 255.0;
    }
    Ok(rgb)
}
