use ake_bench_report::commands::{execute_report, validate_args, ReportArgs};
use ake_bench_report::output::{read_manifest, read_protocol_rows, read_stat_table};
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

/// A small but complete criterion directory: one PQ and one classical
/// protocol configuration, two primitive configurations, two bandwidth
/// tables.
fn create_test_criterion_dir() -> TempDir {
    let criterion = TempDir::new().unwrap();
    write_leaf(
        &criterion
            .path()
            .join("Protocol_PQ/Round 1/kyber768-dilithium3-1024"),
        (&[1.0, 1.0], &[10.0, 20.0]),
        (&[2.0], &[60.0]),
    );
    write_leaf(
        &criterion.path().join("Protocol_Classic/Round 1/1024"),
        (&[1.0], &[5.0]),
        (&[1.0], &[15.0]),
    );
    write_leaf(
        &criterion.path().join("PKE_PQ/Encapsulation/kyber768"),
        (&[1.0], &[1.0]),
        (&[1.0], &[3.0]),
    );
    write_leaf(
        &criterion.path().join("SIG_Classic/Signing/baseline"),
        (&[1.0], &[2.0]),
        (&[1.0], &[2.0]),
    );
    fs::write(
        criterion.path().join("pq-kyber768-dilithium3-1024.csv"),
        "100,200\n50,50\n",
    )
    .unwrap();
    fs::write(criterion.path().join("classic-ecies-ecdsa-1024.csv"), "30\n12\n").unwrap();
    criterion
}

#[test]
fn test_execute_report_writes_every_dataset() {
    let criterion = create_test_criterion_dir();
    let args = ReportArgs {
        criterion_dir: Some(criterion.path().to_path_buf()),
        ..Default::default()
    };

    validate_args(&args).unwrap();
    execute_report(args).unwrap();

    for file in [
        "data.csv",
        "data_primitives.csv",
        "data_bandwidth.csv",
        "statistics_protocol.csv",
        "statistics_primitives.csv",
        "report_manifest.json",
    ] {
        assert!(criterion.path().join(file).exists(), "{file} missing");
    }

    let manifest = read_manifest(criterion.path().join("report_manifest.json")).unwrap();
    assert_eq!(manifest.dataset("protocol").unwrap().rows, 5);
    assert_eq!(manifest.dataset("primitives").unwrap().rows, 4);
    assert_eq!(manifest.dataset("bandwidth").unwrap().rows, 2);
    assert_eq!(manifest.dataset("protocol_statistics").unwrap().rows, 2);
    assert_eq!(manifest.dataset("primitive_statistics").unwrap().rows, 2);

    let rows = read_protocol_rows(criterion.path().join("data.csv")).unwrap();
    assert_eq!(rows.len(), 5);

    let stats = read_stat_table(criterion.path().join("statistics_protocol.csv")).unwrap();
    assert_eq!(
        stats.columns,
        vec!["Algorithm", "Clients", "Round", "Time_mean", "Time_std", "Samples"]
    );
    // Classical baseline sorts ahead of the PQ pair.
    assert_eq!(stats.rows[0].key[0], "ECIES+ECDSA(seckp256k1)");
    assert_eq!(stats.rows[0].mean, 10.0);
    assert_eq!(stats.rows[0].std, Some(7.071));
    assert_eq!(stats.rows[0].count, 2);
    // PQ observations are {10, 20, 30} after normalizing the 2-iteration batch.
    assert_eq!(stats.rows[1].key[0], "Kyber768+Dilithium3");
    assert_eq!(stats.rows[1].mean, 20.0);
    assert_eq!(stats.rows[1].std, Some(10.0));
    assert_eq!(stats.rows[1].count, 3);
}

#[test]
fn test_execute_report_is_rerunnable_over_its_own_outputs() {
    let criterion = create_test_criterion_dir();
    let args = ReportArgs {
        criterion_dir: Some(criterion.path().to_path_buf()),
        ..Default::default()
    };

    execute_report(args.clone()).unwrap();
    // The first run's outputs now sit in the bandwidth scan directory;
    // a second run must not pick them up as input.
    execute_report(args).unwrap();

    let manifest = read_manifest(criterion.path().join("report_manifest.json")).unwrap();
    assert_eq!(manifest.dataset("bandwidth").unwrap().rows, 2);
    assert_eq!(manifest.dataset("protocol").unwrap().rows, 5);
}

#[test]
fn test_execute_report_honours_output_dir_override() {
    let criterion = create_test_criterion_dir();
    let out = TempDir::new().unwrap();
    let args = ReportArgs {
        criterion_dir: Some(criterion.path().to_path_buf()),
        output_dir: Some(out.path().to_path_buf()),
        ..Default::default()
    };

    execute_report(args).unwrap();

    assert!(out.path().join("data.csv").exists());
    assert!(out.path().join("report_manifest.json").exists());
    assert!(!criterion.path().join("data.csv").exists());
}

#[test]
fn test_execute_report_reads_config_file() {
    let criterion = create_test_criterion_dir();
    let out = TempDir::new().unwrap();
    let config_path = criterion.path().join("report.toml");
    fs::write(
        &config_path,
        format!(
            "criterion_dir = {:?}\noutput_dir = {:?}\n",
            criterion.path(),
            out.path()
        ),
    )
    .unwrap();

    let args = ReportArgs {
        config_file: Some(config_path),
        ..Default::default()
    };
    validate_args(&args).unwrap();
    execute_report(args).unwrap();

    assert!(out.path().join("data.csv").exists());
}

#[test]
fn test_execute_report_fails_fast_on_malformed_tree() {
    let criterion = create_test_criterion_dir();
    let round = criterion.path().join("Protocol_PQ/Round 1");
    fs::write(round.join("stray.txt"), "not a leaf").unwrap();

    let args = ReportArgs {
        criterion_dir: Some(criterion.path().to_path_buf()),
        ..Default::default()
    };
    let err = execute_report(args).unwrap_err();
    assert!(err.to_string().contains("protocol dataset"));
    assert!(!criterion.path().join("report_manifest.json").exists());
}
