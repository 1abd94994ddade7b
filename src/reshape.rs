use crate::{
    error::{LumicError, LumicResult},
    tagged::TaggedSeq,
};

/// Transposes N color triples into 3 per-channel sequences of length N.
///
/// The engine's multi-component parameter slots expect one sequence per
/// channel (all red values, all green values, all blue values), while callers
/// produce data as a list of per-sample triples. Every tag on the input is
/// copied onto each of the three outputs: tags describe the batch, and
/// downstream consumers inspect them on whichever channel they receive.
///
/// Fails with `InvalidShape` if the input is empty or any inner sequence's
/// length is not exactly 3, before any output is constructed.
#[tracing::instrument(skip(triples), fields(len = triples.len()))]
pub fn reshape(
    triples: &TaggedSeq<Vec<f64>>,
) -> LumicResult<(TaggedSeq<f64>, TaggedSeq<f64>, TaggedSeq<f64>)> {
    if triples.is_empty() {
        return Err(LumicError::invalid_shape(
            "input must be a non-empty sequence of triples",
        ));
    }
    for (i, inner) in triples.iter().enumerate() {
        if inner.len() != 3 {
            return Err(LumicError::invalid_shape(format!(
                "element {i} has {} components, expected 3",
                inner.len()
            )));
        }
    }

    let mut channels = [
        Vec::with_capacity(triples.len()),
        Vec::with_capacity(triples.len()),
        Vec::with_capacity(triples.len()),
    ];
    for inner in triples {
        for (channel, value) in channels.iter_mut().zip(inner) {
            channel.push(*value);
        }
    }

    let [c0, c1, c2] = channels;
    Ok((
        TaggedSeq::from_parts(c0, triples.tags().clone()),
        TaggedSeq::from_parts(c1, triples.tags().clone()),
        TaggedSeq::from_parts(c2, triples.tags().clone()),
    ))
}
