use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::catalog::ability::AbilitySlot;
use crate::history::{Rating, SkillReviewRecord};

/// Number of recent ratings shown per ability.
pub const RECENT_PER_ABILITY: usize = 5;

/// Rounded mastery percentage, or `None` when there are no records.
/// `None` is "no data" and is not the same thing as 0%.
pub fn compute_mastery<'a, I>(records: I) -> Option<u32>
where
    I: IntoIterator<Item = &'a SkillReviewRecord>,
{
    let (count, points) = records
        .into_iter()
        .fold((0u32, 0u32), |(count, points), r| (count + 1, points + r.rating.points()));
    if count == 0 {
        return None;
    }
    let ratio = points as f64 / (count * Rating::MAX_POINTS) as f64;
    Some((ratio * 100.0).round() as u32)
}

/// Mastery over the records of one champion, optionally one slot.
pub fn mastery_for(
    records: &[SkillReviewRecord],
    champion_id: Option<&str>,
    slot: Option<AbilitySlot>,
) -> Option<u32> {
    compute_mastery(records.iter().filter(|r| {
        champion_id.map_or(true, |id| r.champion_id == id)
            && slot.map_or(true, |s| r.ability_key == s)
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasteryTier {
    NoData,
    Weak,
    Fair,
    Strong,
}

impl MasteryTier {
    pub fn from_mastery(mastery: Option<u32>) -> Self {
        match mastery {
            None => MasteryTier::NoData,
            Some(m) if m >= 80 => MasteryTier::Strong,
            Some(m) if m >= 50 => MasteryTier::Fair,
            Some(_) => MasteryTier::Weak,
        }
    }
}

pub fn records_by_champion(records: &[SkillReviewRecord]) -> HashMap<&str, Vec<&SkillReviewRecord>> {
    let mut map: HashMap<&str, Vec<&SkillReviewRecord>> = HashMap::new();
    for r in records {
        map.entry(r.champion_id.as_str()).or_default().push(r);
    }
    map
}

/// Newest `limit` records for one ability of one champion.
pub fn recent_for_ability<'a>(
    records: &'a [SkillReviewRecord],
    champion_id: &str,
    slot: AbilitySlot,
    limit: usize,
) -> Vec<&'a SkillReviewRecord> {
    let mut matching: Vec<&SkillReviewRecord> = records
        .iter()
        .filter(|r| r.champion_id == champion_id && r.ability_key == slot)
        .collect();
    matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    matching.truncate(limit);
    matching
}

/// All records, newest first.
pub fn newest_first(records: &[SkillReviewRecord]) -> Vec<&SkillReviewRecord> {
    let mut sorted: Vec<&SkillReviewRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
}

pub fn relative_time(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(timestamp).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }
    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }
    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = hours / 24;
    if days < 30 {
        return format!("{}d ago", days);
    }
    format!("{}mo ago", days / 30)
}
