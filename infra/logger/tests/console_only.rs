use databind_logger::{LevelFilter, Logger};

#[test]
fn console_logger_writes_no_files() {
    let logger = Logger::builder("databind-console").level(LevelFilter::INFO).init().unwrap();

    tracing::info!(model = "Git", "described");
    assert!(!logger.writes_files());
}
