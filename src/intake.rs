use crate::error::{FlResult, FlankerError};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};
use tracing::info;

#[derive(Debug, Clone, Copy, Default, EnumString, Display, PartialEq, Eq, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Female,
    Male,
    #[default]
    Other,
}

#[derive(Args, Debug, Clone)]
pub struct ParticipantArgs {
    /// Participant number (digits only).
    #[arg(short, long)]
    pub participant: String,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value_t = Gender::Other)]
    pub gender: Gender,

    /// Shrink every block and keep no data.
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    #[arg(long, default_value = "DATA")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub name: String,
    pub number: u64,
    pub gender: Gender,
    pub dry_run: bool,
}

impl ParticipantInfo {
    pub fn from_args(args: &ParticipantArgs) -> FlResult<Self> {
        let number = parse_participant_number(&args.participant)?;
        Ok(Self {
            name: args.name.trim().to_string(),
            number,
            gender: args.gender,
            dry_run: args.dry_run,
        })
    }

    /// Even participant numbers get flag 1, odd get 0.
    pub fn counterbalance(&self) -> u8 {
        counterbalance(self.number)
    }
}

pub fn counterbalance(participant_number: u64) -> u8 {
    if participant_number % 2 == 0 {
        1
    } else {
        0
    }
}

pub fn parse_participant_number(raw: &str) -> FlResult<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FlankerError::Intake(format!(
            "participant number '{}' must be digits only, try another participant number",
            raw
        )));
    }
    raw.parse::<u64>()
        .map_err(|e| FlankerError::Intake(format!("participant number '{}': {}", raw, e)))
}

/// Where one participant's files live.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub subject_dir: PathBuf,
    pub data_file: PathBuf,
    pub summary_file: PathBuf,
}

impl DataPaths {
    pub fn for_participant<P: AsRef<Path>>(root: P, number: u64) -> Self {
        let subject_dir = root.as_ref().join(format!("subject_{}", number));
        let stem = format!("subject_{}_data", number);
        Self {
            data_file: subject_dir.join(format!("{}.csv", stem)),
            summary_file: subject_dir.join(format!("{}_summary.json", stem)),
            subject_dir,
        }
    }

    /// Creates the subject directory and refuses to reuse a participant
    /// number that already has a data file.
    pub fn prepare(&self) -> FlResult<()> {
        if self.data_file.exists() {
            return Err(FlankerError::Intake(format!(
                "data file '{}' already exists, try another participant number",
                self.data_file.display()
            )));
        }
        if !self.subject_dir.is_dir() {
            fs::create_dir_all(&self.subject_dir)?;
            info!("📂 Created subject directory: {}", self.subject_dir.display());
        }
        Ok(())
    }
}
