//! Logger initialisation for the mission binaries

use std::io::Write;

use log::info;

use crate::common::MissionResult;

pub use log::LevelFilter;

/// Initialise `env_logger` at `level`; `RUST_LOG` still overrides per module.
///
/// Fails if a logger has already been installed.
pub fn init(level: LevelFilter) -> MissionResult<()> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {:<5}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        })
        .try_init()?;

    info!("Logging initialised, level {:?}", level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // The first call may race other tests; only the second must fail.
        let _ = init(LevelFilter::Warn);
        assert!(init(LevelFilter::Warn).is_err());
    }
}
