// TopicArtifact — the saved output of the (out-of-scope) topic-model fit.
//
// The artifact is a JSON document holding the per-document topic proportions,
// the topic labels, and the document ids. Labels and matrix columns live in
// the same structure so they cannot drift out of alignment; everything else
// in the pipeline works from a validated artifact.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::publication::Publication;

/// A fitted topic model's output: document × topic proportions plus labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicArtifact {
    /// Topic display labels, one per proportion column, positionally aligned
    pub topics: Vec<String>,
    /// Document ids of the form `<publication>_<id>`, one per row
    pub documents: Vec<String>,
    /// Row-major proportions in [0, 1]; rows = documents, columns = topics
    pub proportions: Vec<Vec<f64>>,
    /// When the model was fit (provenance only, not used by the pipeline)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitted_at: Option<DateTime<Utc>>,
}

impl TopicArtifact {
    /// Read and parse the artifact, then validate its shape.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read topic artifact at {}", path.display()))?;
        let artifact: TopicArtifact = serde_json::from_str(&raw)
            .with_context(|| format!("topic artifact at {} is not valid JSON", path.display()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Check the invariants the rest of the pipeline relies on: matching
    /// row/column arity, proportions in range, parseable document ids,
    /// unique topic labels.
    pub fn validate(&self) -> Result<()> {
        if self.documents.is_empty() {
            anyhow::bail!("topic artifact contains no documents");
        }
        if self.topics.len() < 2 {
            anyhow::bail!(
                "topic artifact has {} topic column(s); at least 2 are required",
                self.topics.len()
            );
        }
        if self.proportions.len() != self.documents.len() {
            anyhow::bail!(
                "proportion matrix has {} rows but there are {} document ids",
                self.proportions.len(),
                self.documents.len()
            );
        }
        for (doc, row) in self.documents.iter().zip(&self.proportions) {
            if row.len() != self.topics.len() {
                anyhow::bail!(
                    "document '{doc}' has {} proportions but there are {} topics",
                    row.len(),
                    self.topics.len()
                );
            }
            for (label, &value) in self.topics.iter().zip(row) {
                if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                    anyhow::bail!(
                        "document '{doc}' has proportion {value} for topic '{label}'; \
                         proportions must lie in [0, 1]"
                    );
                }
            }
        }
        for (i, label) in self.topics.iter().enumerate() {
            if self.topics[..i].contains(label) {
                anyhow::bail!("topic label '{label}' appears more than once");
            }
        }
        for doc in &self.documents {
            Publication::from_doc_id(doc)?;
        }
        Ok(())
    }

    /// Return a copy with one topic column removed by label.
    ///
    /// Used to drop the catch-all topic before any statistics run. Fails when
    /// the label is absent — silently misaligned labels are exactly the bug
    /// this guards against — or when fewer than two topics would remain.
    pub fn without_topic(&self, label: &str) -> Result<TopicArtifact> {
        let Some(drop_idx) = self.topics.iter().position(|t| t == label) else {
            anyhow::bail!(
                "catch-all topic '{label}' not found in artifact (topics: {})",
                self.topics.join(", ")
            );
        };
        if self.topics.len() - 1 < 2 {
            anyhow::bail!(
                "dropping '{label}' would leave {} topic(s); at least 2 are needed to cluster",
                self.topics.len() - 1
            );
        }

        let topics = self
            .topics
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != drop_idx)
            .map(|(_, t)| t.clone())
            .collect();
        let proportions = self
            .proportions
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != drop_idx)
                    .map(|(_, &v)| v)
                    .collect()
            })
            .collect();

        Ok(TopicArtifact {
            topics,
            documents: self.documents.clone(),
            proportions,
            fitted_at: self.fitted_at,
        })
    }

    /// The proportions as a dense documents × topics matrix.
    pub fn matrix(&self) -> Result<Array2<f64>> {
        let flat: Vec<f64> = self.proportions.iter().flatten().copied().collect();
        Array2::from_shape_vec((self.documents.len(), self.topics.len()), flat)
            .context("proportion rows have inconsistent lengths")
    }

    /// The publication of each document, in row order.
    pub fn publications(&self) -> Result<Vec<Publication>> {
        self.documents
            .iter()
            .map(|doc| Publication::from_doc_id(doc))
            .collect()
    }
}
