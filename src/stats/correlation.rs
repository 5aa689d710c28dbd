// Pearson correlation between topic columns.
//
// The dendrogram is built over the correlation structure of the topics, not
// over raw proportions: two topics that rise and fall together across the
// corpus should merge early even when their absolute levels differ.

use anyhow::Result;
use ndarray::{Array2, ArrayView1};

/// Compute the topic × topic Pearson correlation matrix.
///
/// `proportions` is documents × topics; `labels` names the columns for error
/// reporting. A zero-variance column makes its correlations undefined, so it
/// is rejected outright rather than mapped to some sentinel — a constant
/// topic means the artifact upstream is degenerate.
pub fn pearson(proportions: &Array2<f64>, labels: &[String]) -> Result<Array2<f64>> {
    let n_docs = proportions.nrows();
    let n_topics = proportions.ncols();
    if n_docs == 0 {
        anyhow::bail!("cannot correlate topics over an empty document set");
    }

    // Center each column once; reject constant columns while we're at it.
    let mut centered: Vec<Vec<f64>> = Vec::with_capacity(n_topics);
    let mut norms: Vec<f64> = Vec::with_capacity(n_topics);
    for (j, label) in labels.iter().enumerate() {
        let col = proportions.column(j);
        let mean = column_mean(&col);
        let deviations: Vec<f64> = col.iter().map(|&v| v - mean).collect();
        let sum_sq: f64 = deviations.iter().map(|d| d * d).sum();
        if sum_sq <= f64::EPSILON {
            anyhow::bail!(
                "topic '{label}' has zero variance across {n_docs} document(s); \
                 its correlations are undefined"
            );
        }
        centered.push(deviations);
        norms.push(sum_sq.sqrt());
    }

    let mut corr = Array2::zeros((n_topics, n_topics));
    for i in 0..n_topics {
        corr[(i, i)] = 1.0;
        for j in (i + 1)..n_topics {
            let dot: f64 = centered[i]
                .iter()
                .zip(&centered[j])
                .map(|(a, b)| a * b)
                .sum();
            let r = (dot / (norms[i] * norms[j])).clamp(-1.0, 1.0);
            corr[(i, j)] = r;
            corr[(j, i)] = r;
        }
    }
    Ok(corr)
}

fn column_mean(col: &ArrayView1<f64>) -> f64 {
    col.iter().copied().sum::<f64>() / col.len() as f64
}
