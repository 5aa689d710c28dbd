// Dendrogram geometry and cluster bands.
//
// Coordinates here are in (rank, height) space: rank is the topic's slot on
// the categorical axis (its position in the leaf order), height is the Ward
// merge distance. The renderer flips the axes so rank runs vertically.

use crate::stats::cluster::Dendrogram;
use crate::stats::summary::{CoverageRow, BAR_CEILING};

/// One straight piece of the dendrogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub rank0: f64,
    pub height0: f64,
    pub rank1: f64,
    pub height1: f64,
}

/// A contiguous run of axis slots covered by one cluster, inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub first: usize,
    pub last: usize,
}

/// Everything the renderer needs, in data coordinates.
#[derive(Debug, Clone)]
pub struct PlotModel {
    /// Topic labels in axis order (leaf order)
    pub leaf_labels: Vec<String>,
    pub segments: Vec<Segment>,
    pub bands: Vec<Band>,
    pub rows: Vec<CoverageRow>,
    /// Largest height appearing in any segment
    pub max_height: f64,
}

/// Assemble the plot geometry from the tree and the coverage rows.
///
/// Segment endpoints are clipped up to `BAR_CEILING` so the dendrogram never
/// descends into the band the bars occupy. Bands come from cutting the tree
/// into `band_count` groups; each group is a subtree, so its slots are
/// contiguous.
pub fn build(
    tree: &Dendrogram,
    rows: Vec<CoverageRow>,
    topics: &[String],
    band_count: usize,
) -> PlotModel {
    let rank = tree.leaf_rank();

    // Position of every node: leaves sit at their slot with height zero,
    // internal nodes sit midway between their children at the merge height.
    let mut pos: Vec<(f64, f64)> = Vec::with_capacity(2 * tree.n_leaves - 1);
    for topic in 0..tree.n_leaves {
        pos.push((rank[topic] as f64, 0.0));
    }
    for merge in &tree.merges {
        let (xl, _) = pos[merge.left];
        let (xr, _) = pos[merge.right];
        pos.push(((xl + xr) / 2.0, merge.height));
    }

    let clip = |h: f64| h.max(BAR_CEILING);
    let mut segments = Vec::with_capacity(3 * tree.merges.len());
    let mut max_height = BAR_CEILING;
    for merge in &tree.merges {
        let (xl, hl) = pos[merge.left];
        let (xr, hr) = pos[merge.right];
        let h = clip(merge.height);
        max_height = max_height.max(h);
        segments.push(Segment {
            rank0: xl,
            height0: clip(hl),
            rank1: xl,
            height1: h,
        });
        segments.push(Segment {
            rank0: xr,
            height0: clip(hr),
            rank1: xr,
            height1: h,
        });
        segments.push(Segment {
            rank0: xl,
            height0: h,
            rank1: xr,
            height1: h,
        });
    }

    let bands = tree
        .cut(band_count)
        .into_iter()
        .map(|leaves| {
            let ranks = leaves.iter().map(|&l| rank[l]);
            Band {
                first: ranks.clone().min().unwrap_or(0),
                last: ranks.max().unwrap_or(0),
            }
        })
        .collect();

    let leaf_labels = tree
        .leaf_order
        .iter()
        .map(|&topic| topics[topic].clone())
        .collect();

    PlotModel {
        leaf_labels,
        segments,
        bands,
        rows,
        max_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::cluster::ward;
    use ndarray::arr2;

    #[test]
    fn leaf_segments_are_clipped_to_the_bar_ceiling() {
        let corr = arr2(&[
            [1.00, 0.90, 0.05],
            [0.90, 1.00, 0.05],
            [0.05, 0.05, 1.00],
        ]);
        let tree = ward(&corr).unwrap();
        let topics = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let model = build(&tree, Vec::new(), &topics, 1);

        assert_eq!(model.segments.len(), 3 * tree.merges.len());
        for seg in &model.segments {
            assert!(seg.height0 >= BAR_CEILING);
            assert!(seg.height1 >= BAR_CEILING);
        }
        assert!(model.max_height >= BAR_CEILING);
    }
}
