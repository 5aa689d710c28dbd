// Agglomerative clustering of topics with Ward's linkage.
//
// Observations are the rows of the correlation matrix, compared by Euclidean
// distance, so each topic is clustered by its correlation profile against
// every other topic. Merges use the Lance–Williams update for Ward's
// criterion on squared distances; reported heights are the square roots.
//
// Determinism matters here: the leaf order drives the chart's topic axis,
// so ties are broken by scan order over ascending cluster ids. Identical
// input always yields an identical merge sequence.

use anyhow::Result;
use ndarray::Array2;

/// One agglomeration step. `left`/`right` are cluster ids: `0..n_leaves` are
/// the original topics, `n_leaves + i` is the cluster created by step `i`.
#[derive(Debug, Clone)]
pub struct Merge {
    pub left: usize,
    pub right: usize,
    /// Ward distance at which the two clusters merged
    pub height: f64,
    /// Number of leaves in the merged cluster
    pub size: usize,
}

/// The full merge tree plus the derived leaf order.
#[derive(Debug, Clone)]
pub struct Dendrogram {
    pub n_leaves: usize,
    pub merges: Vec<Merge>,
    /// Topic indices in drawing order (left-to-right traversal of the tree)
    pub leaf_order: Vec<usize>,
}

/// Cluster the rows of a correlation matrix with Ward's linkage.
pub fn ward(corr: &Array2<f64>) -> Result<Dendrogram> {
    let t = corr.nrows();
    if t != corr.ncols() {
        anyhow::bail!(
            "correlation matrix is {}x{}, expected square",
            corr.nrows(),
            corr.ncols()
        );
    }
    if t < 2 {
        anyhow::bail!("need at least 2 topics to cluster, got {t}");
    }

    let total = 2 * t - 1;
    let mut d2 = vec![vec![0.0f64; total]; total];
    for i in 0..t {
        for j in (i + 1)..t {
            let v = row_sq_dist(corr, i, j);
            d2[i][j] = v;
            d2[j][i] = v;
        }
    }

    let mut size = vec![1usize; total];
    let mut active: Vec<usize> = (0..t).collect();
    let mut merges: Vec<Merge> = Vec::with_capacity(t - 1);

    for step in 0..(t - 1) {
        let mut best = f64::INFINITY;
        let (mut best_a, mut best_b) = (0usize, 0usize);
        for (ai, &a) in active.iter().enumerate() {
            for &b in &active[ai + 1..] {
                if d2[a][b] < best {
                    best = d2[a][b];
                    best_a = a;
                    best_b = b;
                }
            }
        }

        let new_id = t + step;
        for &k in &active {
            if k == best_a || k == best_b {
                continue;
            }
            let ni = size[best_a] as f64;
            let nj = size[best_b] as f64;
            let nk = size[k] as f64;
            let v = ((ni + nk) * d2[best_a][k] + (nj + nk) * d2[best_b][k] - nk * best)
                / (ni + nj + nk);
            d2[new_id][k] = v;
            d2[k][new_id] = v;
        }
        size[new_id] = size[best_a] + size[best_b];
        active.retain(|&c| c != best_a && c != best_b);
        active.push(new_id);

        merges.push(Merge {
            left: best_a,
            right: best_b,
            height: best.max(0.0).sqrt(),
            size: size[new_id],
        });
    }

    let leaf_order = traversal_order(t, &merges);
    Ok(Dendrogram {
        n_leaves: t,
        merges,
        leaf_order,
    })
}

impl Dendrogram {
    /// Inverse of `leaf_order`: rank (axis slot) of each topic index.
    pub fn leaf_rank(&self) -> Vec<usize> {
        let mut rank = vec![0usize; self.n_leaves];
        for (pos, &topic) in self.leaf_order.iter().enumerate() {
            rank[topic] = pos;
        }
        rank
    }

    /// Cut the tree into `k` groups (clamped to [1, n_leaves]).
    ///
    /// Groups are returned in leaf-order position, each holding its topic
    /// indices in traversal order. Because every group is a subtree, its
    /// members occupy a contiguous run of axis slots.
    pub fn cut(&self, k: usize) -> Vec<Vec<usize>> {
        let t = self.n_leaves;
        let k = k.clamp(1, t);
        let mut active: Vec<usize> = (0..t).collect();
        for (step, merge) in self.merges.iter().take(t - k).enumerate() {
            active.retain(|&c| c != merge.left && c != merge.right);
            active.push(t + step);
        }

        let rank = self.leaf_rank();
        let mut groups: Vec<Vec<usize>> = active
            .iter()
            .map(|&node| self.collect_leaves(node))
            .collect();
        groups.sort_by_key(|leaves| rank[leaves[0]]);
        groups
    }

    /// All leaves under `node`, in traversal order.
    fn collect_leaves(&self, node: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            if current < self.n_leaves {
                leaves.push(current);
            } else {
                let merge = &self.merges[current - self.n_leaves];
                stack.push(merge.right);
                stack.push(merge.left);
            }
        }
        leaves
    }
}

/// Squared Euclidean distance between two rows of a square matrix.
fn row_sq_dist(m: &Array2<f64>, i: usize, j: usize) -> f64 {
    m.row(i)
        .iter()
        .zip(m.row(j).iter())
        .map(|(a, b)| (a - b) * (a - b))
        .sum()
}

/// Left-to-right leaf order from a depth-first traversal rooted at the final
/// merge. Pushing right before left makes the left subtree come out first.
fn traversal_order(n_leaves: usize, merges: &[Merge]) -> Vec<usize> {
    let root = n_leaves + merges.len() - 1;
    let mut order = Vec::with_capacity(n_leaves);
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node < n_leaves {
            order.push(node);
        } else {
            let merge = &merges[node - n_leaves];
            stack.push(merge.right);
            stack.push(merge.left);
        }
    }
    order
}
