use noterfy::logging;

#[test]
fn file_logging_writes_entries() {
    let dir = tempfile::tempdir().unwrap();
    logging::init(Some(dir.path())).unwrap();

    tracing::info!("logging smoke test entry");

    // Give the appender a moment to flush.
    std::thread::sleep(std::time::Duration::from_millis(100));

    let log_file = dir.path().join(logging::LOG_FILE_NAME);
    assert!(log_file.exists());
    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("logging smoke test entry"));
}
