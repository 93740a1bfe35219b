use std::fs;
use anyhow::Result;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::rolling_file::policy::compound::roll::fixed_window::FixedWindowRoller;
use log4rs::append::rolling_file::policy::compound::trigger::size::SizeTrigger;
use log4rs::append::rolling_file::policy::compound::CompoundPolicy;
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::General;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} | {l} | {m}{n}";

/// Log file size that triggers a roll over
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Number of rolled log files to keep
const ROLL_COUNT: u32 = 28;

/// Sets up logging to a rolling file in the configured log directory and, optionally, stdout
///
/// # Arguments
///
/// * 'general' - general configuration holding log path, level and stdout flag
pub fn setup_logger(general: &General) -> Result<()> {
    fs::create_dir_all(&general.log_path)?;

    let roller = FixedWindowRoller::builder()
        .build(&format!("{}/agilepost.{{}}.log", general.log_path), ROLL_COUNT)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));

    let file = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(format!("{}/agilepost.log", general.log_path), Box::new(policy))?;

    let mut config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file)));
    let mut root = Root::builder().appender("file");

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        config = config.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    log4rs::init_config(config.build(root.build(general.log_level))?)?;

    Ok(())
}
