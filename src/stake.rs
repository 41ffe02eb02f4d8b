//! Stake presets offered when joining a guild

use crate::error::ParseError;
use crate::types::StakeAmount;
use serde::{Deserialize, Serialize};

/// Preset stake levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StakePreset {
    /// 1 unit
    Min,
    /// 5 units
    #[default]
    Default,
    /// 10 units
    Strong,
    /// User-entered amount
    Custom,
}

impl StakePreset {
    pub const ALL: [StakePreset; 4] = [
        StakePreset::Min,
        StakePreset::Default,
        StakePreset::Strong,
        StakePreset::Custom,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Min => "Minimum",
            Self::Default => "Default",
            Self::Strong => "Strong",
            Self::Custom => "Custom",
        }
    }

    /// Fixed amount in whole native units; `None` for `Custom`
    pub fn amount(&self) -> Option<StakeAmount> {
        match self {
            Self::Min => Some(StakeAmount::whole(1)),
            Self::Default => Some(StakeAmount::whole(5)),
            Self::Strong => Some(StakeAmount::whole(10)),
            Self::Custom => None,
        }
    }
}

/// The stake currently chosen: a preset, plus the custom input text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeSelection {
    pub preset: StakePreset,
    #[serde(default)]
    pub custom: String,
}

impl StakeSelection {
    pub fn preset(preset: StakePreset) -> Self {
        Self {
            preset,
            custom: String::new(),
        }
    }

    pub fn custom(input: impl Into<String>) -> Self {
        Self {
            preset: StakePreset::Custom,
            custom: input.into(),
        }
    }

    /// Resolve to an amount. Blank custom input is zero.
    pub fn amount(&self) -> Result<StakeAmount, ParseError> {
        match self.preset.amount() {
            Some(amount) => Ok(amount),
            None if self.custom.trim().is_empty() => Ok(StakeAmount::ZERO),
            None => self.custom.parse(),
        }
    }

    /// Whether the selection resolves to a positive amount
    pub fn is_submittable(&self) -> bool {
        self.amount().map(|a| !a.is_zero()).unwrap_or(false)
    }

    /// Back to the default preset with empty custom input
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
