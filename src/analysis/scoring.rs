//! Score-to-color banding.
//!
//! One function maps a 0-100 score to a display band, parameterized by
//! the metric's direction (higher-is-better vs lower-is-better) and
//! the threshold scheme. The standard scheme splits at 60/80; the
//! dashboard uses a wider 60/75/85 split with an extra pink band on
//! [60, 75). Both sets exist in the data the backend was built
//! against, so both are kept rather than unified.

/// The display band a score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    /// Healthy range.
    Success,
    /// Acceptable-but-watch range, only produced by the wide scheme.
    Pink,
    /// Needs attention.
    Warning,
    /// Out of tolerance.
    Error,
}

impl Band {
    /// Emoji marker used in text reports.
    pub fn emoji(&self) -> &'static str {
        match self {
            Band::Success => "🟢",
            Band::Pink => "🟣",
            Band::Warning => "🟡",
            Band::Error => "🔴",
        }
    }
}

/// Whether a higher score is better (satisfaction, resolution,
/// attitude, overall performance) or worse (risk, unresolved rate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// Threshold set to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    /// 60/80 split, used on list rows and detail panels.
    #[default]
    Standard,
    /// 60/75/85 split with the pink band, used on dashboard cards.
    /// Lower-is-better metrics ignore the scheme and always split at
    /// 20/40.
    Wide,
}

/// Map a score to its band. Scores are trusted to be in [0, 100];
/// out-of-range values are not clamped.
pub fn score_band(value: f64, direction: Direction, scheme: Scheme) -> Band {
    match direction {
        Direction::HigherIsBetter => match scheme {
            Scheme::Standard => {
                if value >= 80.0 {
                    Band::Success
                } else if value >= 60.0 {
                    Band::Warning
                } else {
                    Band::Error
                }
            }
            Scheme::Wide => {
                if value >= 85.0 {
                    Band::Success
                } else if value >= 75.0 {
                    Band::Warning
                } else if value >= 60.0 {
                    Band::Pink
                } else {
                    Band::Error
                }
            }
        },
        Direction::LowerIsBetter => {
            if value <= 20.0 {
                Band::Success
            } else if value <= 40.0 {
                Band::Warning
            } else {
                Band::Error
            }
        }
    }
}
