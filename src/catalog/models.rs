use serde::Deserialize;
use std::collections::HashMap;

// champions.json
#[derive(Debug, Deserialize)]
pub struct ChampionListDto {
    pub version: String,
    pub champions: Vec<ChampionDto>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChampionDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
}

// championClasses.json: champion id -> class tags. Tags stay strings here,
// unknown ones are filtered out during normalization.
pub type ChampionClassesDto = HashMap<String, Vec<String>>;

// championSpells.json
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionSpellsDto {
    pub version: String,
    #[serde(default)]
    pub fetched_at: Option<String>,
    pub champions: HashMap<String, RawChampionSpells>,
}

/// The spell snapshot went through two shapes. Both are accepted and
/// normalized by the loader.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawChampionSpells {
    Formatted(FormattedSpellsDto),
    Legacy(LegacySpellsDto),
}

#[derive(Debug, Deserialize)]
pub struct FormattedSpellsDto {
    #[serde(default)]
    pub name: String,
    pub abilities: Vec<FormattedAbilityDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedAbilityDto {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub effects: Vec<EffectDto>,
    #[serde(default)]
    pub cooldown: Option<String>,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub damage_type: Option<String>,
    #[serde(default)]
    pub targeting: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EffectDto {
    pub description: String,
    #[serde(default)]
    pub scalings: Vec<ScalingDto>,
}

#[derive(Debug, Deserialize)]
pub struct ScalingDto {
    pub attribute: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct LegacySpellsDto {
    pub passive: LegacyPassiveDto,
    pub spells: Vec<LegacySpellDto>,
}

#[derive(Debug, Deserialize)]
pub struct LegacyPassiveDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySpellDto {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cooldown: Vec<f64>,
    #[serde(default)]
    pub cost: Vec<f64>,
    #[serde(default)]
    pub cost_type: Option<String>,
}
