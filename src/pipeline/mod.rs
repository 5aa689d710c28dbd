// The rendering pipeline — one linear pass from saved artifact to image.
//
// `prepare` covers every data transform and is pure; `run` wraps it with
// file handling: artifact load, output directory creation, rendering into a
// temporary file, and the atomic rename into place.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::artifact::TopicArtifact;
use crate::config::Config;
use crate::plot::layout::{self, PlotModel};
use crate::plot::render;
use crate::stats::{cluster, correlation, summary};

/// What a completed run produced.
pub struct RenderOutcome {
    pub model: PlotModel,
    pub image_path: PathBuf,
}

/// Run every data transform: drop the catch-all topic, correlate, cluster,
/// aggregate per publication, scale, and lay out the chart geometry.
/// Touches no files.
pub fn prepare(artifact: &TopicArtifact, catchall: &str, band_count: usize) -> Result<PlotModel> {
    let retained = artifact.without_topic(catchall)?;
    info!(
        topics = retained.topics.len(),
        documents = retained.documents.len(),
        "dropped catch-all topic '{catchall}'"
    );

    let matrix = retained.matrix()?;
    let corr = correlation::pearson(&matrix, &retained.topics)?;
    let tree = cluster::ward(&corr)?;
    info!(merges = tree.merges.len(), "clustered topics (Ward linkage)");

    let means = summary::publication_means(&retained)?;
    let rows = summary::coverage_rows(&means, &tree.leaf_order, &retained.topics)?;

    Ok(layout::build(&tree, rows, &retained.topics, band_count))
}

/// The full run: load, prepare, render, move into place.
pub fn run(config: &Config, band_count: usize) -> Result<RenderOutcome> {
    let artifact = TopicArtifact::load(&config.artifact_path)?;
    info!(
        documents = artifact.documents.len(),
        topics = artifact.topics.len(),
        "loaded topic artifact"
    );

    let model = prepare(&artifact, &config.catchall_label, band_count)?;

    let out = &config.output_path;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("cannot create output directory {}", parent.display())
            })?;
        }
    }

    // Render through a temporary sibling so an interrupted run never leaves
    // a half-written image at the final path.
    let tmp = temp_image_path(out);
    remove_stale_temp(&tmp);
    render::render(&model, &tmp)?;
    fs::rename(&tmp, out)
        .with_context(|| format!("cannot move rendered image to {}", out.display()))?;
    info!(path = %out.display(), "wrote chart");

    Ok(RenderOutcome {
        model,
        image_path: out.clone(),
    })
}

/// Temporary sibling path the image is rendered into before the rename.
pub fn temp_image_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("chart");
    output.with_file_name(format!("{stem}.tmp.png"))
}

/// Best-effort removal of a leftover temporary from an interrupted prior
/// run. Failure here never fails the pipeline.
pub fn remove_stale_temp(tmp: &Path) {
    if !tmp.exists() {
        return;
    }
    match fs::remove_file(tmp) {
        Ok(()) => info!(path = %tmp.display(), "removed stale temporary image"),
        Err(e) => warn!(path = %tmp.display(), "could not remove stale temporary: {e}"),
    }
}
