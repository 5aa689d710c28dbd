// Per-publication coverage means and their chart scaling.
//
// Documents are grouped by publication, each topic's mean proportion is
// taken within the group, and the means are min-max scaled into [0, 0.5] so
// the bars fit under the dendrogram's leaf floor.

use anyhow::Result;
use tracing::warn;

use crate::artifact::TopicArtifact;
use crate::publication::Publication;

/// Upper bound of the scaled bar range; the dendrogram starts above it.
pub const BAR_CEILING: f64 = 0.5;

/// Mean topic proportions for one publication, in artifact column order.
#[derive(Debug, Clone)]
pub struct PublicationMeans {
    pub publication: Publication,
    pub doc_count: usize,
    pub means: Vec<f64>,
}

/// One bar on the chart: a (publication, topic) pair positioned by the
/// topic's leaf rank, carrying both the raw mean and its scaled value.
#[derive(Debug, Clone)]
pub struct CoverageRow {
    pub publication: Publication,
    /// Axis slot: the topic's position in the dendrogram leaf order
    pub rank: usize,
    pub topic: String,
    pub mean: f64,
    pub scaled: f64,
}

/// Group documents by publication and average each topic column.
///
/// Publications with no documents in the artifact are skipped with a
/// warning; an empty group has no mean and the chart simply omits its bars.
pub fn publication_means(artifact: &TopicArtifact) -> Result<Vec<PublicationMeans>> {
    let publications = artifact.publications()?;
    let n_topics = artifact.topics.len();

    let mut result = Vec::new();
    for publication in Publication::ALL {
        let rows: Vec<&Vec<f64>> = publications
            .iter()
            .zip(&artifact.proportions)
            .filter(|(p, _)| **p == publication)
            .map(|(_, row)| row)
            .collect();

        if rows.is_empty() {
            warn!(
                publication = publication.key(),
                "no documents for publication; omitting its bars"
            );
            continue;
        }

        let mut means = vec![0.0f64; n_topics];
        for row in &rows {
            for (acc, &v) in means.iter_mut().zip(row.iter()) {
                *acc += v;
            }
        }
        for acc in &mut means {
            *acc /= rows.len() as f64;
        }

        result.push(PublicationMeans {
            publication,
            doc_count: rows.len(),
            means,
        });
    }

    if result.is_empty() {
        anyhow::bail!("no publication has any documents; nothing to plot");
    }
    Ok(result)
}

/// Join the means to the leaf order and scale them into [0, BAR_CEILING].
///
/// Scaling is a global min-max over every (publication, topic) mean. A zero
/// range means every publication covers every topic identically — a
/// degenerate model output — and is rejected rather than divided through.
pub fn coverage_rows(
    means: &[PublicationMeans],
    leaf_order: &[usize],
    topics: &[String],
) -> Result<Vec<CoverageRow>> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for pm in means {
        for &v in &pm.means {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    let range = hi - lo;
    if !range.is_finite() || range <= f64::EPSILON {
        anyhow::bail!(
            "publication means are identical across all topics (range {range:.3e}); \
             cannot scale bars"
        );
    }

    let mut rows = Vec::with_capacity(means.len() * leaf_order.len());
    for pm in means {
        for (rank, &topic_idx) in leaf_order.iter().enumerate() {
            let mean = pm.means[topic_idx];
            rows.push(CoverageRow {
                publication: pm.publication,
                rank,
                topic: topics[topic_idx].clone(),
                mean,
                scaled: (mean - lo) / range * BAR_CEILING,
            });
        }
    }
    Ok(rows)
}
