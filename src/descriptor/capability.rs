use std::collections::BTreeSet;

use crate::foundation::error::{ViewerError, ViewerResult};

/// Base tag: the dataset is backed by a query data model.
pub const MODEL_TAG: &str = "tonic-query-data-model";
/// Specialization tag: the dataset carries in-situ probe data.
pub const PROBER_TAG: &str = "in-situ-data-prober";
/// Specialization tag: the dataset carries a composite image pipeline.
pub const COMPOSITE_TAG: &str = "composite-pipeline";

/// The viewer pipeline variants this engine can activate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineKind {
    /// Plain image viewer over an eagerly-fetched model.
    Plain,
    /// Image view plus a synthetic time-probe chart.
    Probe,
    /// Composite image viewer.
    Composite,
}

/// Capability tags parsed once from a descriptor's `type` sequence.
///
/// Resolution tests membership, not order; the raw tag count is kept because
/// a bare single-tag descriptor selects the plain viewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilitySet {
    tags: BTreeSet<String>,
    raw_count: usize,
}

impl CapabilitySet {
    pub fn parse(tags: &[String]) -> Self {
        Self {
            tags: tags.iter().cloned().collect(),
            raw_count: tags.len(),
        }
    }

    pub fn supports_query_model(&self) -> bool {
        self.tags.contains(MODEL_TAG)
    }

    pub fn supports_prober(&self) -> bool {
        self.tags.contains(PROBER_TAG)
    }

    pub fn supports_composite(&self) -> bool {
        self.tags.contains(COMPOSITE_TAG)
    }

    /// Select the pipelines to activate for this capability set.
    ///
    /// Without the base model tag nothing can be served. With only the base
    /// tag the plain viewer runs. Specialization tags each add their own
    /// pipeline; an unrecognized tag is silently skipped, which can leave the
    /// selection empty.
    pub fn select_pipelines(&self) -> ViewerResult<Vec<PipelineKind>> {
        if !self.supports_query_model() {
            return Err(ViewerError::unsupported(format!(
                "descriptor does not declare the '{MODEL_TAG}' capability"
            )));
        }

        if self.raw_count == 1 {
            return Ok(vec![PipelineKind::Plain]);
        }

        let mut kinds = Vec::new();
        if self.supports_prober() {
            kinds.push(PipelineKind::Probe);
        }
        if self.supports_composite() {
            kinds.push(PipelineKind::Composite);
        }
        Ok(kinds)
    }
}
