use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Simple,
    Medium,
    Hard,
    #[default]
    #[serde(other)]
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyShift {
    Easier,
    Harder,
}

impl Difficulty {
    pub const OPTIONS: [Difficulty; 4] = [
        Difficulty::Any,
        Difficulty::Simple,
        Difficulty::Medium,
        Difficulty::Hard,
    ];

    /// Ordered scale walked by the "easier"/"harder" actions.
    pub const SCALE: [Difficulty; 3] = [Difficulty::Simple, Difficulty::Medium, Difficulty::Hard];

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Any => "Any",
            Difficulty::Simple => "Simple",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::OPTIONS
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(label))
    }

    fn scale_position(&self) -> Option<usize> {
        Self::SCALE.iter().position(|d| d == self)
    }

    /// Steps one position along the scale, clamped at both ends. Values off the scale
    /// start from `Medium`.
    pub fn shifted(self, shift: DifficultyShift) -> Self {
        let position = self.scale_position().unwrap_or(1);
        let next = match shift {
            DifficultyShift::Easier => position.saturating_sub(1),
            DifficultyShift::Harder => (position + 1).min(Self::SCALE.len() - 1),
        };
        Self::SCALE[next]
    }

    /// The starting point is the session override, then the stored preference, then
    /// `Medium`; `Any` never counts as a starting point.
    pub fn next(
        session_override: Option<Difficulty>,
        preferred: Option<Difficulty>,
        shift: DifficultyShift,
    ) -> Self {
        session_override
            .filter(|d| d.scale_position().is_some())
            .or_else(|| preferred.filter(|d| d.scale_position().is_some()))
            .unwrap_or(Difficulty::Medium)
            .shifted(shift)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cuisine {
    European,
    Asian,
    Mexican,
    #[serde(rename = "Middle Eastern")]
    MiddleEastern,
    Indian,
    #[default]
    #[serde(other)]
    Any,
}

impl Cuisine {
    pub const OPTIONS: [Cuisine; 6] = [
        Cuisine::Any,
        Cuisine::European,
        Cuisine::Asian,
        Cuisine::Mexican,
        Cuisine::MiddleEastern,
        Cuisine::Indian,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Cuisine::Any => "Any",
            Cuisine::European => "European",
            Cuisine::Asian => "Asian",
            Cuisine::Mexican => "Mexican",
            Cuisine::MiddleEastern => "Middle Eastern",
            Cuisine::Indian => "Indian",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::OPTIONS
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

/// A single-field change to the stored preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceUpdate {
    HealthyProfile(bool),
    PreferredCuisine(Cuisine),
    Difficulty(Difficulty),
}
