// End-to-end pipeline tests over a synthetic three-publication corpus.
//
// These run every data stage (catch-all drop, correlation, Ward clustering,
// aggregation, scaling, layout) without touching the bitmap renderer.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use trellis::artifact::TopicArtifact;
use trellis::pipeline;
use trellis::stats::summary::BAR_CEILING;

const RETAINED: [&str; 5] = ["Protests", "Elections", "Economy", "Courts", "Religion"];

/// Three publications, five substantive topics plus a catch-all, two
/// documents each. Every retained column varies across documents.
fn synthetic_artifact() -> TopicArtifact {
    let topics = vec![
        "Protests".to_string(),
        "Elections".to_string(),
        "Economy".to_string(),
        "Courts".to_string(),
        "Religion".to_string(),
        "Miscellaneous".to_string(),
    ];
    let documents = vec![
        "egind_doc1".to_string(),
        "egind_doc2".to_string(),
        "ahram_doc1".to_string(),
        "ahram_doc2".to_string(),
        "dne_doc1".to_string(),
        "dne_doc2".to_string(),
    ];
    let proportions = vec![
        vec![0.30, 0.10, 0.05, 0.20, 0.15, 0.20],
        vec![0.25, 0.15, 0.10, 0.15, 0.15, 0.20],
        vec![0.05, 0.30, 0.25, 0.10, 0.10, 0.20],
        vec![0.10, 0.25, 0.30, 0.05, 0.10, 0.20],
        vec![0.15, 0.05, 0.10, 0.30, 0.20, 0.20],
        vec![0.10, 0.10, 0.05, 0.25, 0.30, 0.20],
    ];
    TopicArtifact {
        topics,
        documents,
        proportions,
        fitted_at: None,
    }
}

#[test]
fn leaf_order_is_a_permutation_of_the_retained_topics() {
    let model = pipeline::prepare(&synthetic_artifact(), "Miscellaneous", 2).unwrap();

    assert_eq!(model.leaf_labels.len(), 5);
    let on_axis: HashSet<&str> = model.leaf_labels.iter().map(|s| s.as_str()).collect();
    let expected: HashSet<&str> = RETAINED.iter().copied().collect();
    assert_eq!(on_axis, expected, "each retained topic exactly once");
}

#[test]
fn coverage_table_has_one_row_per_publication_topic_pair() {
    let model = pipeline::prepare(&synthetic_artifact(), "Miscellaneous", 2).unwrap();

    assert_eq!(model.rows.len(), 15, "3 publications × 5 topics");
    let pairs: HashSet<(String, String)> = model
        .rows
        .iter()
        .map(|row| (format!("{:?}", row.publication), row.topic.clone()))
        .collect();
    assert_eq!(pairs.len(), 15, "no duplicate (publication, topic) pair");

    for row in &model.rows {
        assert!(row.rank < 5);
        assert!((0.0..=BAR_CEILING + 1e-12).contains(&row.scaled));
        assert_eq!(model.leaf_labels[row.rank], row.topic);
    }
}

#[test]
fn repeated_preparation_yields_the_same_leaf_order() {
    let artifact = synthetic_artifact();
    let a = pipeline::prepare(&artifact, "Miscellaneous", 2).unwrap();
    let b = pipeline::prepare(&artifact, "Miscellaneous", 2).unwrap();
    assert_eq!(a.leaf_labels, b.leaf_labels);
}

#[test]
fn bands_partition_the_axis_contiguously() {
    let model = pipeline::prepare(&synthetic_artifact(), "Miscellaneous", 2).unwrap();

    assert_eq!(model.bands.len(), 2);
    assert_eq!(model.bands[0].first, 0);
    assert_eq!(model.bands.last().unwrap().last, 4);
    for pair in model.bands.windows(2) {
        assert_eq!(
            pair[1].first,
            pair[0].last + 1,
            "bands must tile the axis without gap or overlap"
        );
    }
}

#[test]
fn band_count_tracks_the_requested_cut() {
    let artifact = synthetic_artifact();
    for k in 1..=5 {
        let model = pipeline::prepare(&artifact, "Miscellaneous", k).unwrap();
        assert_eq!(model.bands.len(), k);
    }
}

#[test]
fn segments_never_dip_below_the_bar_ceiling() {
    let model = pipeline::prepare(&synthetic_artifact(), "Miscellaneous", 3).unwrap();
    assert_eq!(model.segments.len(), 3 * 4, "three segments per merge");
    for seg in &model.segments {
        assert!(seg.height0 >= BAR_CEILING);
        assert!(seg.height1 >= BAR_CEILING);
        assert!(seg.height1 <= model.max_height);
    }
}

#[test]
fn missing_catchall_fails_the_pipeline() {
    let err = pipeline::prepare(&synthetic_artifact(), "Sports", 2).unwrap_err();
    assert!(err.to_string().contains("'Sports' not found"));
}

// ============================================================
// temporary-image handling
// ============================================================

#[test]
fn temp_path_is_a_png_sibling() {
    let out = Path::new("output/topic-dendrogram.png");
    assert_eq!(
        pipeline::temp_image_path(out),
        PathBuf::from("output/topic-dendrogram.tmp.png")
    );
}

#[test]
fn stale_temp_removal_is_best_effort() {
    let tmp = std::env::temp_dir().join(format!(
        "trellis-test-{}-stale.tmp.png",
        std::process::id()
    ));
    std::fs::write(&tmp, b"leftover").unwrap();
    pipeline::remove_stale_temp(&tmp);
    assert!(!tmp.exists());

    // A missing file is not an error
    pipeline::remove_stale_temp(&tmp);
}
