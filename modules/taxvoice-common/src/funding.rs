use serde::{Deserialize, Serialize};

// --- Funding levels ---

/// Discrete funding stance a user picks for one spending item.
///
/// The dashboard slider runs 0-100 and is bucketed into these five levels;
/// the same buckets drive both suggestion matching and email prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum FundingLevel {
    SlashHeavily,
    CutSignificantly,
    ImproveEfficiency,
    Fund,
    FundMore,
}

impl FundingLevel {
    pub const ALL: [FundingLevel; 5] = [
        FundingLevel::SlashHeavily,
        FundingLevel::CutSignificantly,
        FundingLevel::ImproveEfficiency,
        FundingLevel::Fund,
        FundingLevel::FundMore,
    ];

    /// 0-10 → -2, 11-35 → -1, 36-65 → 0, 66-90 → 1, 91-100 → 2.
    pub fn from_slider(value: f64) -> Self {
        if value <= 10.0 {
            FundingLevel::SlashHeavily
        } else if value <= 35.0 {
            FundingLevel::CutSignificantly
        } else if value <= 65.0 {
            FundingLevel::ImproveEfficiency
        } else if value <= 90.0 {
            FundingLevel::Fund
        } else {
            FundingLevel::FundMore
        }
    }

    /// Midpoint of the slider range that buckets into this level.
    pub fn to_slider(self) -> u8 {
        match self {
            FundingLevel::SlashHeavily => 5,
            FundingLevel::CutSignificantly => 23,
            FundingLevel::ImproveEfficiency => 50,
            FundingLevel::Fund => 78,
            FundingLevel::FundMore => 95,
        }
    }

    pub fn value(self) -> i8 {
        match self {
            FundingLevel::SlashHeavily => -2,
            FundingLevel::CutSignificantly => -1,
            FundingLevel::ImproveEfficiency => 0,
            FundingLevel::Fund => 1,
            FundingLevel::FundMore => 2,
        }
    }

    pub fn from_value(value: i8) -> Option<Self> {
        match value {
            -2 => Some(FundingLevel::SlashHeavily),
            -1 => Some(FundingLevel::CutSignificantly),
            0 => Some(FundingLevel::ImproveEfficiency),
            1 => Some(FundingLevel::Fund),
            2 => Some(FundingLevel::FundMore),
            _ => None,
        }
    }

    pub fn action(self) -> FundingAction {
        FundingAction::from_level(f64::from(self.value()))
    }

    pub fn short_description(self) -> &'static str {
        match self {
            FundingLevel::SlashHeavily => "Slash Heavily",
            FundingLevel::CutSignificantly => "Cut Significantly",
            FundingLevel::ImproveEfficiency => "Improve Efficiency/Review",
            FundingLevel::Fund => "Fund",
            FundingLevel::FundMore => "Fund More",
        }
    }

    pub fn full_description(self) -> &'static str {
        match self {
            FundingLevel::SlashHeavily => {
                "Slash Heavily (e.g., eliminate or drastically reduce funding)"
            }
            FundingLevel::CutSignificantly => "Cut Significantly (e.g., make notable reductions)",
            FundingLevel::ImproveEfficiency => {
                "Improve Efficiency/Review (e.g., maintain funding but demand better results or oversight)"
            }
            FundingLevel::Fund => "Fund (e.g., ensure adequate or modestly increased resources)",
            FundingLevel::FundMore => "Fund More (e.g., substantially increase investment)",
        }
    }
}

impl From<FundingLevel> for i8 {
    fn from(level: FundingLevel) -> Self {
        level.value()
    }
}

impl TryFrom<i8> for FundingLevel {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        FundingLevel::from_value(value)
            .ok_or_else(|| format!("funding level must be between -2 and 2, got {value}"))
    }
}

// --- Funding actions ---

/// The three-way direction the suggestion engine reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingAction {
    Slash,
    Fund,
    Review,
}

impl FundingAction {
    pub const ALL: [FundingAction; 3] =
        [FundingAction::Slash, FundingAction::Fund, FundingAction::Review];

    /// Bucket a signed funding level: below -0.5 slashes, above 0.5 funds.
    pub fn from_level(level: f64) -> Self {
        if level < -0.5 {
            FundingAction::Slash
        } else if level > 0.5 {
            FundingAction::Fund
        } else {
            FundingAction::Review
        }
    }

    /// Canonical tag suffix for this action.
    pub fn suffix(self) -> &'static str {
        match self {
            FundingAction::Slash => "slash",
            FundingAction::Fund => "fund",
            FundingAction::Review => "review",
        }
    }

    /// Verb phrase used when restating a user's concern.
    pub fn verb_phrase(self) -> &'static str {
        match self {
            FundingAction::Slash => "slashing funding for",
            FundingAction::Fund => "increasing funding for",
            FundingAction::Review => "reviewing spending on",
        }
    }
}

impl std::fmt::Display for FundingAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

// --- Tone ---

/// Tone bucket derived from the 0-100 aggressiveness slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Kind,
    Concerned,
    Stern,
    Angry,
}

impl Tone {
    /// 0-24 → Kind, 25-49 → Concerned, 50-74 → Stern, 75-100 → Angry.
    pub fn from_aggressiveness(aggressiveness: f64) -> Self {
        let bucket = (aggressiveness.max(0.0) / 25.0).floor().min(3.0) as u8;
        match bucket {
            0 => Tone::Kind,
            1 => Tone::Concerned,
            2 => Tone::Stern,
            _ => Tone::Angry,
        }
    }

    pub fn bucket(self) -> u8 {
        match self {
            Tone::Kind => 0,
            Tone::Concerned => 1,
            Tone::Stern => 2,
            Tone::Angry => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tone::Kind => "Kind",
            Tone::Concerned => "Concerned",
            Tone::Stern => "Stern",
            Tone::Angry => "Angry",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
