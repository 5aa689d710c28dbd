// Unit tests for artifact validation and the catch-all topic drop.
//
// The artifact is the only input the pipeline has; everything downstream
// assumes validate() has rejected malformed shapes, so the rejection paths
// get exercised one by one here.

use std::path::PathBuf;

use trellis::artifact::TopicArtifact;

fn sample_artifact() -> TopicArtifact {
    TopicArtifact {
        topics: vec![
            "Protests".to_string(),
            "Elections".to_string(),
            "Miscellaneous".to_string(),
        ],
        documents: vec![
            "egind_1".to_string(),
            "ahram_1".to_string(),
            "dne_1".to_string(),
        ],
        proportions: vec![
            vec![0.5, 0.3, 0.2],
            vec![0.2, 0.6, 0.2],
            vec![0.4, 0.4, 0.2],
        ],
        fitted_at: None,
    }
}

// ============================================================
// validate — rejection paths
// ============================================================

#[test]
fn valid_artifact_passes() {
    sample_artifact().validate().unwrap();
}

#[test]
fn empty_documents_rejected() {
    let mut artifact = sample_artifact();
    artifact.documents.clear();
    artifact.proportions.clear();
    let err = artifact.validate().unwrap_err();
    assert!(err.to_string().contains("no documents"));
}

#[test]
fn row_count_mismatch_rejected() {
    let mut artifact = sample_artifact();
    artifact.proportions.pop();
    let err = artifact.validate().unwrap_err();
    assert!(err.to_string().contains("rows"));
}

#[test]
fn row_arity_mismatch_rejected() {
    let mut artifact = sample_artifact();
    artifact.proportions[1].pop();
    let err = artifact.validate().unwrap_err();
    assert!(err.to_string().contains("ahram_1"));
}

#[test]
fn out_of_range_proportion_rejected() {
    let mut artifact = sample_artifact();
    artifact.proportions[0][0] = 1.2;
    let err = artifact.validate().unwrap_err();
    assert!(err.to_string().contains("[0, 1]"));
}

#[test]
fn non_finite_proportion_rejected() {
    let mut artifact = sample_artifact();
    artifact.proportions[2][1] = f64::NAN;
    assert!(artifact.validate().is_err());
}

#[test]
fn duplicate_topic_label_rejected() {
    let mut artifact = sample_artifact();
    artifact.topics[1] = "Protests".to_string();
    let err = artifact.validate().unwrap_err();
    assert!(err.to_string().contains("more than once"));
}

#[test]
fn unknown_publication_prefix_rejected() {
    let mut artifact = sample_artifact();
    artifact.documents[0] = "reuters_1".to_string();
    let err = artifact.validate().unwrap_err();
    assert!(err.to_string().contains("unknown publication prefix"));
}

// ============================================================
// without_topic — the catch-all drop
// ============================================================

#[test]
fn drop_removes_exactly_one_column() {
    let artifact = sample_artifact();
    let retained = artifact.without_topic("Miscellaneous").unwrap();

    assert_eq!(retained.topics, vec!["Protests", "Elections"]);
    assert_eq!(retained.documents, artifact.documents);
    // Remaining columns keep their values untouched
    for (before, after) in artifact.proportions.iter().zip(&retained.proportions) {
        assert_eq!(after.len(), before.len() - 1);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1]);
    }
}

#[test]
fn drop_of_interior_column_preserves_alignment() {
    let artifact = sample_artifact();
    let retained = artifact.without_topic("Elections").unwrap();
    assert_eq!(retained.topics, vec!["Protests", "Miscellaneous"]);
    assert_eq!(retained.proportions[0], vec![0.5, 0.2]);
}

#[test]
fn missing_catchall_is_an_error() {
    let err = sample_artifact().without_topic("Sports").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("'Sports' not found"), "got: {msg}");
    // The message lists what IS there, to make the fix obvious
    assert!(msg.contains("Protests"));
}

#[test]
fn drop_leaving_one_topic_is_an_error() {
    let mut artifact = sample_artifact();
    artifact.topics = vec!["A".to_string(), "B".to_string()];
    artifact.proportions = vec![
        vec![0.5, 0.5],
        vec![0.4, 0.6],
        vec![0.3, 0.7],
    ];
    let err = artifact.without_topic("B").unwrap_err();
    assert!(err.to_string().contains("at least 2"));
}

// ============================================================
// load — file handling
// ============================================================

fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("trellis-test-{}-{name}", std::process::id()))
}

#[test]
fn load_round_trips_through_json() {
    let path = scratch_path("artifact.json");
    let json = serde_json::to_string_pretty(&sample_artifact()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = TopicArtifact::load(&path).unwrap();
    assert_eq!(loaded.topics, sample_artifact().topics);
    assert_eq!(loaded.documents.len(), 3);

    std::fs::remove_file(&path).ok();
}

#[test]
fn load_missing_file_names_the_path() {
    let path = scratch_path("does-not-exist.json");
    let err = TopicArtifact::load(&path).unwrap_err();
    assert!(err.to_string().contains("cannot read topic artifact"));
}

#[test]
fn load_rejects_invalid_json() {
    let path = scratch_path("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = TopicArtifact::load(&path).unwrap_err();
    assert!(err.to_string().contains("not valid JSON"));
    std::fs::remove_file(&path).ok();
}

#[test]
fn load_runs_validation() {
    let path = scratch_path("invalid-shape.json");
    let mut artifact = sample_artifact();
    artifact.proportions[0][0] = 2.0;
    std::fs::write(&path, serde_json::to_string(&artifact).unwrap()).unwrap();
    assert!(TopicArtifact::load(&path).is_err());
    std::fs::remove_file(&path).ok();
}
