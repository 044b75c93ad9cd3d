//! Line-count rotation example.
//!
//! Writes eight lines with a threshold of five, so `demo-1.log` fills up
//! and the last three lines land in `demo-2.log`.

use duolog::LoggerConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;

    let logger = duolog::builder()
        .with_prefix("MY_APP")
        .with_log_dir(temp_dir.path())
        .with_file("demo.log")
        .with_max_lines(5)
        .build()?;

    for i in 1..=5 {
        logger.info(format!("Line {} of the log", i));
    }
    logger.info("Line 6 in the new file");
    logger.debug("Debug message");
    logger.error("Something went wrong!");

    for seq in 1..=logger.sequence() {
        let path = temp_dir.path().join(format!("demo-{}.log", seq));
        let lines = std::fs::read_to_string(&path)?.lines().count();
        println!("{} holds {} lines", path.display(), lines);
    }

    // Same settings from a config file.
    let config: LoggerConfig = toml::from_str(
        r#"
prefix = "FROM_TOML"
file = "toml.log"
max_lines = "1k"
"#,
    )?;
    println!("max_lines from TOML: {}", config.max_lines);

    Ok(())
}
