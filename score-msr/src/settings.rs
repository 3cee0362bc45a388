use serde::{Deserialize, Serialize};

/// Switches controlling how the model is built and what is traced.
///
/// Every part keeps its own copy and hands it to its voices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MsrSettings {
    pub trace_measures: bool,
    pub trace_repeats: bool,
    pub trace_multiple_rests: bool,
    pub trace_positions: bool,
    /// When off, multiple rest markers are ignored and the rest measures
    /// stay ordinary measures.
    pub compress_multiple_rests: bool,
    /// Pad measures left empty to the part high tide when the next
    /// measure is created.
    pub pad_empty_measures: bool,
    pub discard_trailing_empty_measure: bool,
}
impl MsrSettings {
    pub fn new() -> Self {
        Self::default()
    }
    /// Default behavior with every trace switched on.
    pub fn traced() -> Self {
        Self {
            trace_measures: true,
            trace_repeats: true,
            trace_multiple_rests: true,
            trace_positions: true,
            ..Self::default()
        }
    }
}
impl Default for MsrSettings {
    fn default() -> Self {
        Self {
            trace_measures: false,
            trace_repeats: false,
            trace_multiple_rests: false,
            trace_positions: false,
            compress_multiple_rests: true,
            pad_empty_measures: true,
            discard_trailing_empty_measure: true,
        }
    }
}
