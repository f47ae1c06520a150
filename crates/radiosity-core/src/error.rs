//! Typed error surface for the light-transport pipeline.

/// The four error kinds the core exposes to callers. Parser-level failures
/// (malformed scene files) live in `radiosity-formats`'s own `FormatError`
/// — this enum is strictly the core pipeline's concern.
#[derive(Debug, thiserror::Error)]
pub enum RadiosityError {
    /// Non-positive patch size, non-positive iteration count, or other
    /// malformed configuration caught defensively by the core (the parser
    /// is expected to catch most of this first).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A quad with a zero-length edge or zero-area face. Callers that want
    /// to treat this as fatal may match on it; `subdivide` itself only
    /// logs a warning and skips the quad.
    #[error("degenerate geometry in quad {index}: {reason}")]
    DegenerateGeometry { index: usize, reason: String },

    /// The hemicube's per-cell weights summed to zero, making
    /// normalization impossible. Not reachable with a positive subdivision
    /// count, but checked rather than silently producing NaNs.
    #[error("numeric breakdown: {0}")]
    NumericBreakdown(String),

    /// A patch's `viewable` and `formFactors` sequences disagree in length
    /// after being loaded from an external source (e.g. a `.los`/`.for`
    /// scene file). The core surfaces this rather than silently
    /// truncating or padding — callers that can tolerate padding (the
    /// `.for` reader) do so themselves and never construct this variant.
    #[error("inconsistent patch state: {0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_render_their_context() {
        let err = RadiosityError::DegenerateGeometry {
            index: 3,
            reason: "zero-length AB edge".into(),
        };
        assert_eq!(err.to_string(), "degenerate geometry in quad 3: zero-length AB edge");
    }
}
