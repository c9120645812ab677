use log::{self, Level, LevelFilter, Metadata, Record};

/// Targets that log at the configured level; every other crate is held to
/// warnings and errors.
const OWN_TARGETS: [&str; 2] = ["tictactoe_client", "ttt"];

struct SimpleLogger {
    level: LevelFilter,
}

impl SimpleLogger {
    fn allows(&self, target: &str, level: Level) -> bool {
        let own = OWN_TARGETS
            .iter()
            .any(|t| target == *t || target.starts_with(&format!("{}::", t)));
        if own {
            level <= self.level
        } else {
            level <= Level::Warn && level <= self.level
        }
    }
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.allows(metadata.target(), metadata.level())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logger at `level`, normally `ClientConfig::log_level`.
/// Only the first call has any effect.
pub fn init_logging(level: LevelFilter) {
    let logger = Box::new(SimpleLogger { level });
    let _ = log::set_boxed_logger(logger).map(|()| log::set_max_level(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_targets_follow_configured_level() {
        let logger = SimpleLogger {
            level: LevelFilter::Debug,
        };
        assert!(logger.allows("tictactoe_client::view_model", Level::Debug));
        assert!(logger.allows("ttt", Level::Info));
        assert!(!logger.allows("tictactoe_client", Level::Trace));
    }

    #[test]
    fn other_crates_only_warn() {
        let logger = SimpleLogger {
            level: LevelFilter::Debug,
        };
        assert!(!logger.allows("hyper::proto", Level::Debug));
        assert!(!logger.allows("tictactoe_clientele", Level::Info));
        assert!(logger.allows("reqwest::connect", Level::Warn));

        let quiet = SimpleLogger {
            level: LevelFilter::Error,
        };
        assert!(!quiet.allows("reqwest::connect", Level::Warn));
    }
}
