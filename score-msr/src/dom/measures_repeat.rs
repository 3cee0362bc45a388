use crate::error::{MsrError, MsrResult};

use super::Segment;

/// Pattern of measures, then its replicas written as repeat signs.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuresRepeat {
    pattern_measures: usize,
    slashes: u32,
    pattern: Segment,
    replicas: Segment,
}
impl MeasuresRepeat {
    /// Fails if the replicas are not a whole number of patterns.
    pub fn new(
        pattern_measures: usize,
        slashes: u32,
        pattern: Segment,
        replicas: Segment,
    ) -> MsrResult<Self> {
        let repeat = Self {
            pattern_measures,
            slashes,
            pattern,
            replicas,
        };
        repeat.replica_count()?;
        Ok(repeat)
    }
    pub fn pattern_measures(&self) -> usize {
        self.pattern_measures
    }
    pub fn slashes(&self) -> u32 {
        self.slashes
    }
    pub fn pattern(&self) -> &Segment {
        &self.pattern
    }
    pub fn replicas(&self) -> &Segment {
        &self.replicas
    }
    pub fn replica_count(&self) -> MsrResult<usize> {
        Self::check_replicas(self.pattern_measures, self.replicas.len())
    }
    /// Number of pattern replicas in `replicas` measures.
    pub fn check_replicas(pattern: usize, replicas: usize) -> MsrResult<usize> {
        if pattern == 0 || replicas % pattern != 0 {
            return Err(MsrError::UnevenReplicas { pattern, replicas });
        }
        Ok(replicas / pattern)
    }
}
