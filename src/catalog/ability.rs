use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::models::{FormattedAbilityDto, LegacyPassiveDto, LegacySpellDto};

/// Ability position on a champion. Declaration order is the canonical
/// P, Q, W, E, R traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AbilitySlot {
    P,
    Q,
    W,
    E,
    R,
}

pub const ALL_SLOTS: [AbilitySlot; 5] = [
    AbilitySlot::P,
    AbilitySlot::Q,
    AbilitySlot::W,
    AbilitySlot::E,
    AbilitySlot::R,
];

impl AbilitySlot {
    pub fn letter(self) -> char {
        match self {
            Self::P => 'P',
            Self::Q => 'Q',
            Self::W => 'W',
            Self::E => 'E',
            Self::R => 'R',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(Self::P),
            'Q' => Some(Self::Q),
            'W' => Some(Self::W),
            'E' => Some(Self::E),
            'R' => Some(Self::R),
            _ => None,
        }
    }
}

impl fmt::Display for AbilitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for AbilitySlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("passive") {
            return Ok(Self::P);
        }
        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Self::from_letter(c).ok_or_else(|| format!("unknown ability slot '{}'", trimmed))
            }
            _ => Err(format!("unknown ability slot '{}'", trimmed)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaling {
    pub attribute: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityEffect {
    pub description: String,
    pub scalings: Vec<Scaling>,
}

/// One ability, normalized from whichever snapshot shape it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ability {
    pub slot: AbilitySlot,
    pub name: String,
    pub icon_url: String,
    pub effects: Vec<AbilityEffect>,
    pub cooldown: Option<String>,
    pub cost: Option<String>,
    pub resource: Option<String>,
    pub damage_type: Option<String>,
    pub targeting: Option<String>,
}

impl Ability {
    pub fn from_formatted(
        dto: FormattedAbilityDto,
        slot: AbilitySlot,
        champion_id: &str,
    ) -> Self {
        let icon_url = dto
            .icon
            .filter(|icon| !icon.is_empty())
            .unwrap_or_else(|| community_icon_url(champion_id, slot));

        Ability {
            slot,
            name: dto.name,
            icon_url,
            effects: dto
                .effects
                .into_iter()
                .map(|e| AbilityEffect {
                    description: e.description,
                    scalings: e
                        .scalings
                        .into_iter()
                        .map(|s| Scaling {
                            attribute: s.attribute,
                            value: s.value,
                        })
                        .collect(),
                })
                .collect(),
            cooldown: dto.cooldown.filter(|s| !s.is_empty()),
            cost: dto.cost.filter(|s| !s.is_empty()),
            resource: dto.resource.filter(|s| !s.is_empty()),
            damage_type: dto.damage_type,
            targeting: dto.targeting,
        }
    }

    pub fn from_legacy_passive(dto: LegacyPassiveDto, champion_id: &str, version: &str) -> Self {
        let icon_url = match dto.image {
            Some(file) if !file.is_empty() => ddragon_icon_url(version, "passive", &file),
            _ => community_icon_url(champion_id, AbilitySlot::P),
        };

        Ability {
            slot: AbilitySlot::P,
            name: dto.name,
            icon_url,
            effects: plain_effects(dto.description),
            cooldown: None,
            cost: None,
            resource: None,
            damage_type: None,
            targeting: None,
        }
    }

    pub fn from_legacy_spell(
        dto: LegacySpellDto,
        slot: AbilitySlot,
        champion_id: &str,
        version: &str,
    ) -> Self {
        let icon_url = match dto.image {
            Some(file) if !file.is_empty() => ddragon_icon_url(version, "spell", &file),
            _ => community_icon_url(champion_id, slot),
        };

        Ability {
            slot,
            name: dto.name,
            icon_url,
            effects: plain_effects(dto.description),
            cooldown: format_per_level(&dto.cooldown),
            cost: format_per_level(&dto.cost).filter(|c| c != "0"),
            resource: dto
                .cost_type
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty()),
            damage_type: None,
            targeting: None,
        }
    }
}

fn plain_effects(description: String) -> Vec<AbilityEffect> {
    if description.trim().is_empty() {
        return Vec::new();
    }
    vec![AbilityEffect {
        description,
        scalings: Vec::new(),
    }]
}

/// Renders per-rank values as "10/9/8"; identical ranks collapse to one value.
pub fn format_per_level(values: &[f64]) -> Option<String> {
    let first = *values.first()?;
    if values.iter().all(|v| *v == first) {
        return Some(format_number(first));
    }
    Some(
        values
            .iter()
            .map(|v| format_number(*v))
            .collect::<Vec<_>>()
            .join("/"),
    )
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn ddragon_icon_url(version: &str, kind: &str, file: &str) -> String {
    format!(
        "https://ddragon.leagueoflegends.com/cdn/{}/img/{}/{}",
        version, kind, file
    )
}

pub fn community_icon_url(champion_id: &str, slot: AbilitySlot) -> String {
    format!(
        "https://cdn.communitydragon.org/latest/champion/{}/ability-icon/{}",
        champion_id,
        slot.letter().to_ascii_lowercase()
    )
}
