use crate::invoker::{invoke, Strategy};

use landgrab_proto::{
    traits::{ActionWrite, RecordError, RecordRead, MAX_RECORD_LEN},
    Action, GameState,
};
use log::*;

use std::io::{self, BufRead, Write};

////////////////////////////////////////////////////////////////////////////////

/// Trimmed lines shorter than this carry no record.
pub const MIN_RECORD_LEN: usize = 10;

#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub min_record_len: usize,
    pub max_record_len: usize,
    pub fallback: Action,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            min_record_len: MIN_RECORD_LEN,
            max_record_len: MAX_RECORD_LEN,
            fallback: Action::default(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionStats {
    pub answered: usize,
    pub fallbacks: usize,
    pub noise: usize,
    pub dropped: usize,
}

////////////////////////////////////////////////////////////////////////////////

/// Drives a strategy over a line protocol: one record in, one action out.
pub struct Harness<S> {
    strategy: S,
    config: HarnessConfig,
    state: GameState,
    line: Vec<u8>,
}

impl<S: Strategy> Harness<S> {
    pub fn new(strategy: S) -> Self {
        Self::with_config(strategy, HarnessConfig::default())
    }

    pub fn with_config(strategy: S, config: HarnessConfig) -> Self {
        Self {
            strategy,
            config,
            state: GameState::default(),
            line: Vec::new(),
        }
    }

    /// Serves turns until `reader` runs dry.
    ///
    /// Only a failure to write or flush an action is returned as an error.
    pub fn run(
        &mut self,
        mut reader: impl BufRead,
        mut writer: impl Write,
    ) -> io::Result<SessionStats> {
        let mut stats = SessionStats::default();

        loop {
            let line = match reader.read_record(&mut self.line, self.config.max_record_len) {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(RecordError::Io(err)) => {
                    error!("failed to read input, stopping: {err}");
                    break;
                }
                Err(err) => {
                    warn!("dropping record: {err}");
                    stats.dropped += 1;
                    continue;
                }
            };

            if line.trim().len() < self.config.min_record_len {
                debug!("skipping noise line ({} bytes)", line.len());
                stats.noise += 1;
                continue;
            }

            self.state.parse_from(&line);

            let action = match invoke(&mut self.strategy, &self.state) {
                Ok(action) => action,
                Err(fault) => {
                    warn!("{fault}, answering {}", self.config.fallback);
                    stats.fallbacks += 1;
                    self.config.fallback.clone()
                }
            };

            trace!("turn #{}: {action}", stats.answered);
            writer.write_action(&action)?;
            stats.answered += 1;
        }

        info!(
            "input closed after {} turns ({} fallbacks, {} noise lines, {} dropped records)",
            stats.answered, stats.fallbacks, stats.noise, stats.dropped
        );

        Ok(stats)
    }
}

////////////////////////////////////////////////////////////////////////////////
