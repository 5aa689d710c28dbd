// Colored terminal output for artifact summaries and cluster listings.
//
// All terminal-specific formatting lives here; main.rs delegates to these
// functions after the pipeline has run.

use colored::Colorize;

use crate::artifact::TopicArtifact;
use crate::plot::layout::PlotModel;
use crate::publication::Publication;

/// Summarize a loaded artifact: document counts per publication, topic
/// labels, provenance.
pub fn display_artifact(artifact: &TopicArtifact, catchall: &str) {
    println!(
        "\n{}",
        format!(
            "=== Topic Artifact ({} documents) ===",
            artifact.documents.len()
        )
        .bold()
    );
    if let Some(fitted) = artifact.fitted_at {
        println!("  Fitted: {}", fitted.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();

    let parsed: Vec<Publication> = artifact
        .documents
        .iter()
        .filter_map(|doc| Publication::from_doc_id(doc).ok())
        .collect();
    for publication in Publication::ALL {
        let count = parsed.iter().filter(|p| **p == publication).count();
        println!(
            "  {:<20} {:>6} documents",
            publication.display_name(),
            count
        );
    }

    println!("\n  {} topics:", artifact.topics.len());
    for topic in &artifact.topics {
        if topic == catchall {
            println!(
                "    {} {}",
                topic,
                "(catch-all, excluded from clustering)".dimmed()
            );
        } else {
            println!("    {topic}");
        }
    }

    if !artifact.topics.iter().any(|t| t == catchall) {
        println!(
            "\n  {}",
            format!("Warning: catch-all topic '{catchall}' not present — rendering will fail.")
                .yellow()
        );
    }
}

/// Print the dendrogram leaf order, grouped by cluster band, with a small
/// coverage bar per topic (mean across publications).
pub fn display_leaf_order(model: &PlotModel) {
    println!(
        "\n{}",
        format!(
            "=== Topic cluster order ({} topics, {} clusters) ===",
            model.leaf_labels.len(),
            model.bands.len()
        )
        .bold()
    );

    let bar_width: usize = 20;
    let max_mean = model
        .rows
        .iter()
        .map(|row| row.mean)
        .fold(0.0f64, f64::max)
        .max(f64::EPSILON);

    for (i, band) in model.bands.iter().enumerate() {
        println!("\n  {}", format!("Cluster {}", i + 1).dimmed());
        for rank in band.first..=band.last {
            let mean = slot_mean(model, rank);
            let share = mean / max_mean;
            let filled = (share * bar_width as f64).round() as usize;
            let bar = format!(
                "[{}{}]",
                "=".repeat(filled.min(bar_width)),
                " ".repeat(bar_width.saturating_sub(filled))
            );
            let colored_bar = if share >= 0.66 {
                bar.bright_green()
            } else if share >= 0.33 {
                bar.bright_yellow()
            } else {
                bar.bright_blue()
            };
            println!(
                "    {:<28} {} {:.3}",
                super::truncate_chars(&model.leaf_labels[rank], 28).bold(),
                colored_bar,
                mean
            );
        }
    }
}

/// Mean coverage across publications for one axis slot.
fn slot_mean(model: &PlotModel, rank: usize) -> f64 {
    let values: Vec<f64> = model
        .rows
        .iter()
        .filter(|row| row.rank == rank)
        .map(|row| row.mean)
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
