//! Heuristic password strength estimation.
//!
//! Purely advisory: the score nudges users toward longer, mixed-class
//! passwords but never gates submission.

/// Strength tier for display, derived from a [`score`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthTier {
    VeryWeak,
    Weak,
    Good,
    Strong,
}

impl StrengthTier {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "Very Weak",
            StrengthTier::Weak => "Weak",
            StrengthTier::Good => "Good",
            StrengthTier::Strong => "Strong",
        }
    }

    /// Display color (hex).
    pub fn color(&self) -> &'static str {
        match self {
            StrengthTier::VeryWeak => "#dc3545",
            StrengthTier::Weak => "#fd7e14",
            StrengthTier::Good => "#ffc107",
            StrengthTier::Strong => "#28a745",
        }
    }
}

/// Scores a password in [0, 100].
///
/// Rewards length thresholds (8, 12, 16 chars) and the presence of each of
/// the four character classes, capped at 100. An empty password scores 0.
pub fn score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let mut score: u32 = 0;
    let len = password.chars().count();

    if len >= 8 {
        score += 20;
    }
    if len >= 12 {
        score += 15;
    }
    if len >= 16 {
        score += 15;
    }

    if password.chars().any(|c| c.is_ascii_lowercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_uppercase()) {
        score += 10;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 10;
    }
    if password.chars().any(|c| !c.is_ascii_alphanumeric()) {
        score += 20;
    }

    score.min(100) as u8
}

/// Maps a score to its display tier.
pub fn tier(score: u8) -> StrengthTier {
    match score {
        0..=24 => StrengthTier::VeryWeak,
        25..=49 => StrengthTier::Weak,
        50..=74 => StrengthTier::Good,
        _ => StrengthTier::Strong,
    }
}
