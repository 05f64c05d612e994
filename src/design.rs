use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Direction the central arrow points in. The correct answer is always
/// this direction, whatever the flankers do.
#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Direction {
    #[strum(serialize = "left")]
    #[serde(rename = "left")]
    Left,
    #[strum(serialize = "right")]
    #[serde(rename = "right")]
    Right,
}

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum Congruency {
    #[strum(serialize = "L_Con")]
    #[serde(rename = "L_Con")]
    LeftCongruent,
    #[strum(serialize = "R_Con")]
    #[serde(rename = "R_Con")]
    RightCongruent,
    #[strum(serialize = "L_Incon")]
    #[serde(rename = "L_Incon")]
    LeftIncongruent,
    #[strum(serialize = "R_Incon")]
    #[serde(rename = "R_Incon")]
    RightIncongruent,
}

impl Congruency {
    pub fn correct_direction(&self) -> Direction {
        match self {
            Self::LeftCongruent => Direction::Left,
            Self::RightCongruent => Direction::Right,
            Self::LeftIncongruent => Direction::Left,
            Self::RightIncongruent => Direction::Right,
        }
    }

    /// The five-arrow array shown to the participant.
    pub fn glyphs(&self) -> &'static str {
        match self {
            Self::LeftCongruent => "<<<<<",
            Self::RightCongruent => ">>>>>",
            Self::LeftIncongruent => ">><>>",
            Self::RightIncongruent => "<<><<",
        }
    }

    pub fn is_congruent(&self) -> bool {
        matches!(self, Self::LeftCongruent | Self::RightCongruent)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub enum Bin {
    #[strum(serialize = "Bin_1")]
    #[serde(rename = "Bin_1")]
    Bin1,
    #[strum(serialize = "Bin_2")]
    #[serde(rename = "Bin_2")]
    Bin2,
    #[strum(serialize = "Bin_3")]
    #[serde(rename = "Bin_3")]
    Bin3,
    #[strum(serialize = "Bin_4")]
    #[serde(rename = "Bin_4")]
    Bin4,
    #[strum(serialize = "Bin_5")]
    #[serde(rename = "Bin_5")]
    Bin5,
}

impl Bin {
    pub fn base_value(&self) -> i32 {
        match self {
            Self::Bin1 => 0,
            Self::Bin2 => 20,
            Self::Bin3 => 50,
            Self::Bin4 => 80,
            Self::Bin5 => 100,
        }
    }
}

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum ScaleType {
    #[strum(serialize = "Prob")]
    #[serde(rename = "Prob")]
    Probabilistic,
    #[strum(serialize = "Det")]
    #[serde(rename = "Det")]
    Deterministic,
}

impl ScaleType {
    /// Scale used in the practice block.
    pub const PRACTICE: ScaleType = ScaleType::Deterministic;

    /// Blocks whose parity matches the counterbalance flag are probabilistic.
    pub fn for_block(block: usize, counterbalance: u8) -> ScaleType {
        if block == 0 {
            return Self::PRACTICE;
        }
        if block % 2 == counterbalance as usize {
            Self::Probabilistic
        } else {
            Self::Deterministic
        }
    }
}

/// Payout of a successful probabilistic draw.
pub const PROBABILISTIC_PAYOUT: i32 = 100;

/// Points per euro when converting the session total.
pub const POINTS_PER_EURO: f64 = 16_000.0;

pub fn points_to_euro(points: i64) -> f64 {
    (points as f64 / POINTS_PER_EURO * 100.0).round() / 100.0
}
