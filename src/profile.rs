use serde::{Deserialize, Deserializer, Serialize};

/// Handle drawn when a profile arrives without one.
pub const UNKNOWN_HANDLE: &str = "Unknown";
/// Team drawn when the profile does not name one.
pub const DEFAULT_TEAM: &str = "morvax60";
/// CTF count drawn when the profile does not carry one.
pub const DEFAULT_CTF_COUNT: u32 = 10;

/// Ranking profile rendered onto a card. Never mutated by the engine.
///
/// Field aliases accept the records written by the profile store (`thmUsername`, `points`,
/// `avatar`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Display handle; unbounded length.
    #[serde(default, alias = "thmUsername")]
    pub handle: String,
    /// Score; negative values are treated as zero. JSON floats and numeric strings are
    /// accepted and floored.
    #[serde(default, alias = "points", deserialize_with = "lenient_score")]
    pub score: i64,
    /// URI or file path of the avatar image; empty strings read as absent.
    #[serde(
        default,
        alias = "avatar",
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_ref: Option<String>,
    /// Team shown in the left secondary field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// CTF count shown in the right secondary field.
    #[serde(default, alias = "ctfs", skip_serializing_if = "Option::is_none")]
    pub ctf_count: Option<u32>,
}

impl Profile {
    /// Profile with a handle and score and no avatar.
    pub fn new(handle: impl Into<String>, score: i64) -> Self {
        Self {
            handle: handle.into(),
            score,
            ..Self::default()
        }
    }

    /// Attach an avatar reference.
    pub fn with_avatar(mut self, avatar_ref: impl Into<String>) -> Self {
        let r = avatar_ref.into();
        self.avatar_ref = if r.trim().is_empty() { None } else { Some(r) };
        self
    }

    /// Score with negatives clamped to zero.
    pub fn clamped_score(&self) -> i64 {
        self.score.max(0)
    }

    /// Handle as drawn on the card.
    pub fn display_handle(&self) -> &str {
        let h = self.handle.trim();
        if h.is_empty() { UNKNOWN_HANDLE } else { h }
    }

    /// Ten-digit, zero-padded license number derived from the score.
    pub fn license_number(&self) -> String {
        format!("{:010}", self.clamped_score())
    }

    /// Avatar reference, if any non-blank one is set.
    pub fn avatar(&self) -> Option<&str> {
        self.avatar_ref
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Team as drawn on the card.
    pub fn display_team(&self) -> &str {
        self.team
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TEAM)
    }

    /// CTF count as drawn on the card.
    pub fn display_ctf_count(&self) -> String {
        self.ctf_count.unwrap_or(DEFAULT_CTF_COUNT).to_string()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScore {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Scores come from a scraper; anything numeric-looking is taken, anything else reads as zero.
fn lenient_score<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let score = match Option::<RawScore>::deserialize(de)? {
        None => 0,
        Some(RawScore::Int(v)) => v,
        Some(RawScore::Float(v)) => score_from_f64(v),
        Some(RawScore::Text(raw)) => {
            let digits: String = raw.trim().chars().filter(|&c| c != ',' && c != '_').collect();
            match digits.parse::<i64>() {
                Ok(v) => v,
                Err(_) => digits.parse::<f64>().map(score_from_f64).unwrap_or(0),
            }
        }
    };
    Ok(score)
}

/// Floor a float score into `i64`; NaN reads as zero and infinities saturate.
pub fn score_from_f64(v: f64) -> i64 {
    if v.is_nan() {
        return 0;
    }
    // `as` saturates at the i64 bounds.
    v.floor() as i64
}

fn empty_string_as_none<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(de)?;
    Ok(raw.filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
#[path = "../tests/unit/profile.rs"]
mod tests;
