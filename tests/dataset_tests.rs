use ake_bench_report::dataset::{
    build_primitive_dataset, build_protocol_dataset, extract_bandwidth,
};
use ake_bench_report::parser::{Kind, PrimitiveType, Round};
use ake_bench_report::utils::error::{DatasetError, SampleError};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write a leaf directory with its `base` and `new` measurement batches.
fn write_leaf(leaf: &Path, base: (&[f64], &[f64]), new: (&[f64], &[f64])) {
    for (dir, (iters, times)) in [("base", base), ("new", new)] {
        let batch = leaf.join(dir);
        fs::create_dir_all(&batch).unwrap();
        let body = serde_json::json!({ "iters": iters, "times": times });
        fs::write(batch.join("sample.json"), body.to_string()).unwrap();
    }
}

#[test]
fn test_build_protocol_dataset_from_pq_and_classic_trees() {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion
            .path()
            .join("Protocol_PQ/Round 1/kyber768-dilithium3-1024"),
        (&[1.0], &[10.0]),
        (&[1.0], &[20.0]),
    );
    write_leaf(
        &criterion.path().join("Protocol_Classic/Round 1/1024"),
        (&[1.0], &[5.0]),
        (&[1.0], &[15.0]),
    );
    // An unrelated sibling tree must not leak into the protocol dataset.
    write_leaf(
        &criterion.path().join("PKE_PQ/Encapsulation/kyber768"),
        (&[1.0], &[99.0]),
        (&[1.0], &[99.0]),
    );

    let rows = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap();
    assert_eq!(rows.len(), 4);

    // Families come back sorted by name, Classic before PQ.
    let classic = &rows[0];
    assert_eq!(classic.algorithm, "ECIES+ECDSA(seckp256k1)");
    assert_eq!(classic.clients, 1024);
    assert_eq!(classic.round, Round::Round1);
    assert_eq!(classic.kind, Kind::Classic);
    assert_eq!(classic.time, 5.0);
    assert_eq!(rows[1].time, 15.0);

    let pq = &rows[2];
    assert_eq!(pq.algorithm, "Kyber768+Dilithium3");
    assert_eq!(pq.clients, 1024);
    assert_eq!(pq.kind, Kind::PostQuantum);
    assert_eq!((rows[2].time, rows[3].time), (10.0, 20.0));
}

#[test]
fn test_build_protocol_dataset_normalizes_by_iteration_count() {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion.path().join("Protocol_PQ/Round 2/kyber768-dilithium3-64"),
        (&[2.0, 4.0], &[20.0, 100.0]),
        (&[10.0], &[10.0]),
    );

    let rows = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap();
    let times: Vec<f64> = rows.iter().map(|row| row.time).collect();
    assert_eq!(times, vec![10.0, 25.0, 1.0]);
}

#[test]
fn test_build_protocol_dataset_empty_prefix_yields_empty_table() {
    let criterion = TempDir::new().unwrap();
    fs::create_dir(criterion.path().join("PKE_PQ")).unwrap();

    let rows = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap();
    assert!(rows.is_empty());
}

#[test]
fn test_build_protocol_dataset_fails_on_unknown_round_name() {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion.path().join("Protocol_PQ/Warmup/kyber768-dilithium3-64"),
        (&[1.0], &[1.0]),
        (&[1.0], &[1.0]),
    );

    let err = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap_err();
    assert!(matches!(err, DatasetError::Decode(_)));
}

#[test]
fn test_build_protocol_dataset_fails_on_stray_file_at_leaf_depth() {
    let criterion = TempDir::new().unwrap();
    let round = criterion.path().join("Protocol_PQ/Round 1");
    fs::create_dir_all(&round).unwrap();
    fs::write(round.join("index.html"), "<html></html>").unwrap();

    let err = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap_err();
    assert!(matches!(err, DatasetError::UnexpectedEntry(_)));
}

#[test]
fn test_build_protocol_dataset_fails_on_missing_batch() {
    let criterion = TempDir::new().unwrap();
    let leaf = criterion.path().join("Protocol_PQ/Round 1/kyber768-dilithium3-64");
    let base = leaf.join("base");
    fs::create_dir_all(&base).unwrap();
    fs::write(
        base.join("sample.json"),
        r#"{"iters": [1.0], "times": [1.0]}"#,
    )
    .unwrap();
    // No `new` batch.
    let err = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap_err();
    assert!(matches!(err, DatasetError::Sample(SampleError::Io { .. })));
}

#[test]
fn test_build_protocol_dataset_fails_on_length_mismatch() {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion.path().join("Protocol_PQ/Round 1/kyber768-dilithium3-64"),
        (&[1.0, 2.0], &[1.0]),
        (&[1.0], &[1.0]),
    );

    let err = build_protocol_dataset(&criterion.path().join("Protocol")).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::Sample(SampleError::LengthMismatch { .. })
    ));
}

#[test]
fn test_build_primitive_dataset_spans_both_roots() {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion.path().join("PKE_PQ/Encapsulation/kyber768"),
        (&[1.0], &[1.0]),
        (&[1.0], &[3.0]),
    );
    write_leaf(
        &criterion.path().join("PKE_Classic/Encryption/baseline"),
        (&[1.0], &[4.0]),
        (&[1.0], &[6.0]),
    );
    write_leaf(
        &criterion.path().join("SIG_PQ/Signing/dilithium3"),
        (&[1.0], &[2.0]),
        (&[1.0], &[2.0]),
    );

    let roots = vec![criterion.path().join("PKE"), criterion.path().join("SIG")];
    let rows = build_primitive_dataset(&roots).unwrap();
    assert_eq!(rows.len(), 6);

    // PKE root first (Classic family before PQ within it), then SIG.
    assert_eq!(rows[0].algorithm, "ECIES(seckp256k1)");
    assert_eq!(rows[0].primitive, PrimitiveType::Pke);
    assert_eq!(rows[0].operation, "Encryption");
    assert_eq!(rows[0].kind, Kind::Classic);

    assert_eq!(rows[2].algorithm, "Kyber768");
    assert_eq!(rows[2].operation, "Encapsulation");
    assert_eq!(rows[2].kind, Kind::PostQuantum);

    assert_eq!(rows[4].algorithm, "Dilithium3");
    assert_eq!(rows[4].primitive, PrimitiveType::Sig);
    assert_eq!(rows[4].operation, "Signing");
}

#[test]
fn test_build_primitive_dataset_fails_on_unknown_family_kind() {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion.path().join("PKE_Hybrid/Encapsulation/kyber768"),
        (&[1.0], &[1.0]),
        (&[1.0], &[1.0]),
    );

    let err = build_primitive_dataset(&[criterion.path().join("PKE")]).unwrap_err();
    assert!(matches!(err, DatasetError::Decode(_)));
}

#[test]
fn test_extract_bandwidth_alongside_pipeline_outputs() {
    let criterion = TempDir::new().unwrap();
    fs::write(
        criterion.path().join("pq-kyber768-dilithium3-16384.csv"),
        "100,200\n50,50\n",
    )
    .unwrap();
    fs::write(criterion.path().join("classic-ecies-ecdsa-16384.csv"), "30\n12\n").unwrap();
    // Previously written datasets must never be re-read as bandwidth input.
    fs::write(criterion.path().join("data.csv"), "Algorithm,Clients\n").unwrap();
    fs::write(criterion.path().join("data_bandwidth.csv"), "Kind,Algorithm\n").unwrap();
    fs::write(criterion.path().join("statistics_protocol.csv"), "x\n").unwrap();
    fs::create_dir(criterion.path().join("Protocol_PQ")).unwrap();

    let records = extract_bandwidth(criterion.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].algorithm, "ECIES+ECDSA(seckp256k1)");
    assert_eq!(records[0].bandwidth, 42);
    assert_eq!(records[1].algorithm, "Kyber768+Dilithium3");
    assert_eq!(records[1].clients, 16384);
    assert_eq!(records[1].bandwidth, 400);
}
