use crate::config::ResponseKeys;
use crate::design::{Bin, Congruency, Direction, ScaleType};
use crate::error::{FlResult, FlankerError};
use crate::scoring::{Response, TrialOutcome};
use crate::trials::{RewardCue, TrialCondition};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

pub const NO_RESPONSE: &str = "None";

/// One row of the participant's data file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub block: usize,
    pub trial: usize,
    pub tag: usize,
    pub bins: Bin,
    pub congruency: Congruency,
    pub scale_type: ScaleType,
    pub cor_ans: char,
    pub bin_size: i32,
    pub accuracy: u8,
    pub response: String,
    pub rt: f64,
    pub reward_size: i32,
    pub earned_reward: i32,
    pub deadline: f64,
    /// Empty on trial rows. Only the closing row written by
    /// [`TrialSink::finish`] carries the session total.
    pub total_reward: Option<i64>,
}

impl TrialRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        block: usize,
        trial: usize,
        condition: &TrialCondition,
        cue: &RewardCue,
        response: &Response,
        outcome: &TrialOutcome,
        deadline: f64,
        keys: &ResponseKeys,
    ) -> Self {
        Self {
            block,
            trial,
            tag: condition.tag,
            bins: condition.bin,
            congruency: condition.congruency,
            scale_type: condition.scale_type,
            cor_ans: key_for(condition.correct, keys),
            bin_size: condition.bin_size,
            accuracy: outcome.accuracy,
            response: response
                .key
                .map(|d| key_for(d, keys).to_string())
                .unwrap_or_else(|| NO_RESPONSE.to_string()),
            rt: response.rt,
            reward_size: cue.reward_size,
            earned_reward: outcome.earned_reward,
            deadline,
            total_reward: None,
        }
    }
}

fn key_for(direction: Direction, keys: &ResponseKeys) -> char {
    match direction {
        Direction::Left => keys.left_key,
        Direction::Right => keys.right_key,
    }
}

/// Destination for completed trial records.
pub trait TrialSink {
    fn record(&mut self, record: TrialRecord) -> FlResult<()>;

    /// Appends the session total once the last block is done.
    fn finish(&mut self, total_reward: i64) -> FlResult<()>;
}

/// Column order of the data file, one entry per [`TrialRecord`] field.
pub const HEADER: [&str; 15] = [
    "block",
    "trial",
    "tag",
    "bins",
    "congruency",
    "scale_type",
    "cor_ans",
    "bin_size",
    "accuracy",
    "response",
    "rt",
    "reward_size",
    "earned_reward",
    "deadline",
    "total_reward",
];

/// Writes and flushes one CSV row per trial as it completes. `finish`
/// appends a closing row that only carries the session total.
pub struct CsvRecorder<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
    rows: usize,
}

impl CsvRecorder<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> FlResult<Self> {
        let path = path.as_ref();
        info!("💾 Writing trial data to: {}", path.display());
        let file = File::create(path)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvRecorder<W> {
    pub fn from_writer(w: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().has_headers(false).from_writer(w),
            header_written: false,
            rows: 0,
        }
    }

    /// Trial rows written so far. The closing total row is not counted.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    fn ensure_header(&mut self) -> FlResult<()> {
        if !self.header_written {
            self.writer.write_record(HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }

    pub fn into_inner(self) -> FlResult<W> {
        self.writer
            .into_inner()
            .map_err(|e| FlankerError::Io(e.into_error()))
    }
}

impl<W: Write> TrialSink for CsvRecorder<W> {
    fn record(&mut self, record: TrialRecord) -> FlResult<()> {
        self.ensure_header()?;
        self.writer.serialize(&record)?;
        self.writer.flush()?;
        self.rows += 1;
        Ok(())
    }

    fn finish(&mut self, total_reward: i64) -> FlResult<()> {
        self.ensure_header()?;
        let total = total_reward.to_string();
        let row = HEADER.map(|col| if col == "total_reward" { total.as_str() } else { "" });
        self.writer.write_record(row)?;
        self.writer.flush()?;
        debug!("Recorder finished after {} trial rows", self.rows);
        Ok(())
    }
}

/// Dry runs keep nothing.
#[derive(Debug, Default)]
pub struct NullRecorder;

impl TrialSink for NullRecorder {
    fn record(&mut self, _record: TrialRecord) -> FlResult<()> {
        Ok(())
    }

    fn finish(&mut self, _total_reward: i64) -> FlResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub participant: String,
    pub name: String,
    pub counterbalance: u8,
    pub total_reward: i64,
    pub monetary_reward: f64,
    pub accuracy_pct: f64,
    pub scored_trials: usize,
    pub final_deadline: f64,
}

impl SessionSummary {
    pub fn save<P: AsRef<Path>>(&self, path: P) -> FlResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("💾 Session summary saved to: {}", path.display());
        Ok(())
    }
}
