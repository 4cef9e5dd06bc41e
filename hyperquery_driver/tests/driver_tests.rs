#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use hyperquery_common::{CHAIN_CASE, GenerationConfig, STAR_CASE, parse_query_name};
use hyperquery_driver::{Driver, DriverError};
use hyperquery_walk::{QueryHypergraph, WalkError};
use rstest::rstest;
use tempfile::tempdir;

fn init_test_logger() {
    static INIT: OnceLock<()> = OnceLock::new();
    let _ = INIT.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn read_all(paths: &[impl AsRef<Path>]) -> BTreeMap<String, String> {
    paths
        .iter()
        .map(|p| {
            let p = p.as_ref();
            (
                p.file_name().unwrap().to_string_lossy().into_owned(),
                std::fs::read_to_string(p).unwrap(),
            )
        })
        .collect()
}

#[test]
fn test_registry_loads_once() {
    init_test_logger();
    let tmp = tempdir().unwrap();
    STAR_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset(STAR_CASE.name);

    assert!(driver.get(&key).is_none());
    let first = driver.get_or_load(&key).unwrap();
    let second = driver.get_or_load(&key).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(driver.loaded_datasets(), vec![key.clone()]);

    assert!(driver.unload(&key).is_some());
    assert!(driver.get(&key).is_none());
    assert_eq!(first.num_hyperedges(), STAR_CASE.expected_hyperedges);
}

#[test]
fn test_missing_dataset_is_load_error() {
    let tmp = tempdir().unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset("absent");
    let err = driver
        .generate(&key, &GenerationConfig::default().with_seed(1))
        .unwrap_err();
    assert!(matches!(err, DriverError::Load(_)));
    assert!(!key.query_dir().exists());
}

#[test]
fn test_missing_root() {
    let tmp = tempdir().unwrap();
    let err = Driver::new(tmp.path().join("nope")).unwrap_err();
    assert!(matches!(err, DriverError::Io { op: "resolve", .. }));
}

#[test]
fn test_invalid_config_rejected() {
    let tmp = tempdir().unwrap();
    STAR_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let config = GenerationConfig::default().with_lengths(vec![0]);
    let err = driver
        .generate(&driver.dataset(STAR_CASE.name), &config)
        .unwrap_err();
    assert!(matches!(err, DriverError::Config(_)));
}

#[test]
fn test_generate_writes_readable_queries() {
    init_test_logger();
    let tmp = tempdir().unwrap();
    STAR_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset(STAR_CASE.name);
    let config = GenerationConfig::default()
        .with_lengths(vec![2, 3])
        .with_samples_per_length(6)
        .with_seed(2024);

    let report = driver.generate(&key, &config).unwrap();
    assert_eq!(report.seed, 2024);
    assert_eq!(report.total(), 12);
    assert_eq!(report.counts.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    assert_eq!(report.counts.values().sum::<usize>(), report.written.len());
    assert!(
        report
            .failures
            .iter()
            .all(|f| matches!(f.error, WalkError::WalkStuck { .. }))
    );

    for path in &report.written {
        assert_eq!(path.parent().unwrap(), key.query_dir());
        let stem = path.file_stem().unwrap().to_str().unwrap();
        let (length, _) = parse_query_name(stem).unwrap();
        let query = QueryHypergraph::read(path).unwrap();
        assert_eq!(query.num_hyperedges(), length);
        assert!(query.is_walk_connected());
    }
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_same_seed_same_queries(#[case] parallel: bool) {
    let config = GenerationConfig::default()
        .with_lengths(vec![1, 2, 3])
        .with_samples_per_length(8)
        .with_seed(7);

    let run = |parallel: bool| {
        let tmp = tempdir().unwrap();
        STAR_CASE.write_dataset(tmp.path()).unwrap();
        let driver = Driver::new(tmp.path()).unwrap();
        let key = driver.dataset(STAR_CASE.name);
        let report = driver
            .generate(&key, &config.clone().with_parallel(parallel))
            .unwrap();
        read_all(&report.written)
    };

    let sequential = run(false);
    assert!(!sequential.is_empty());
    assert_eq!(run(parallel), sequential);
}

#[test]
fn test_too_long_lengths_reported() {
    let tmp = tempdir().unwrap();
    CHAIN_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset(CHAIN_CASE.name);
    let config = GenerationConfig::default()
        .with_lengths(vec![1, 5])
        .with_samples_per_length(3)
        .with_seed(3);

    let report = driver.generate(&key, &config).unwrap();
    assert!(!report.is_complete());
    assert_eq!(report.counts[&1], 3);
    assert_eq!(report.counts[&5], 0);
    assert_eq!(report.failures.len(), 3);
    for failure in &report.failures {
        assert_eq!(failure.task.length, 5);
        assert!(matches!(
            failure.error,
            WalkError::InsufficientHyperedges {
                requested: 5,
                available: 3
            }
        ));
        assert!(!key.query_file(5, failure.task.index).exists());
    }
}

#[test]
fn test_failed_task_removes_previous_query() {
    init_test_logger();
    let tmp = tempdir().unwrap();
    CHAIN_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset(CHAIN_CASE.name);
    std::fs::create_dir_all(key.query_dir()).unwrap();
    let previous = key.query_file(5, 0);
    std::fs::write(&previous, "4 2\n0 1 1 2\n0,1\n1,2,3\n").unwrap();

    let config = GenerationConfig::default()
        .with_lengths(vec![5])
        .with_samples_per_length(1)
        .with_seed(1);
    let report = driver.generate(&key, &config).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(!previous.exists());
}

#[test]
fn test_rerun_overwrites_successful_queries() {
    let tmp = tempdir().unwrap();
    CHAIN_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset(CHAIN_CASE.name);
    std::fs::create_dir_all(key.query_dir()).unwrap();
    std::fs::write(key.query_file(1, 0), "stale\n").unwrap();

    let config = GenerationConfig::default()
        .with_lengths(vec![1])
        .with_samples_per_length(1)
        .with_seed(1);
    let report = driver.generate(&key, &config).unwrap();

    assert!(report.is_complete());
    let query = QueryHypergraph::read(&key.query_file(1, 0)).unwrap();
    assert_eq!(query.num_hyperedges(), 1);
}

#[test]
fn test_duplicate_lengths_rejected() {
    let tmp = tempdir().unwrap();
    STAR_CASE.write_dataset(tmp.path()).unwrap();
    let driver = Driver::new(tmp.path()).unwrap();
    let key = driver.dataset(STAR_CASE.name);
    let config = GenerationConfig::default()
        .with_lengths(vec![1, 1])
        .with_samples_per_length(3)
        .with_seed(1);

    let err = driver.generate(&key, &config).unwrap_err();
    assert!(matches!(err, DriverError::Config(_)));
    assert!(!key.query_dir().exists());
}
