use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::ability::{Ability, AbilitySlot};
use super::classes::{ChampionClass, ALL_CLASSES};
use super::models::{ChampionClassesDto, ChampionListDto, ChampionSpellsDto, RawChampionSpells};
use crate::error::AppError;

pub const CHAMPIONS_FILE: &str = "champions.json";
pub const CLASSES_FILE: &str = "championClasses.json";
pub const SPELLS_FILE: &str = "championSpells.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Champion {
    pub id: String,
    pub name: String,
    pub image: String,
}

/// A champion together with its resolved classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameChampion {
    pub champion: Champion,
    pub classes: Vec<ChampionClass>,
}

/// Champion id -> classes, with the Specialist fallback for unmapped ids.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    classes: HashMap<String, Vec<ChampionClass>>,
}

impl ClassMap {
    pub fn from_dto(dto: ChampionClassesDto) -> Self {
        let mut classes = HashMap::new();
        for (id, tags) in dto {
            let valid: Vec<ChampionClass> = tags
                .iter()
                .filter_map(|tag| match tag.parse::<ChampionClass>() {
                    Ok(class) => Some(class),
                    Err(e) => {
                        tracing::warn!("Dropping class tag for {}: {}", id, e);
                        None
                    }
                })
                .collect();
            if !valid.is_empty() {
                classes.insert(id, valid);
            }
        }
        ClassMap { classes }
    }

    /// Classes for a champion. Unmapped champions are Specialists.
    pub fn classes_for(&self, champion_id: &str) -> Vec<ChampionClass> {
        self.classes
            .get(champion_id)
            .cloned()
            .unwrap_or_else(|| vec![ChampionClass::FALLBACK])
    }
}

/// Metadata of the snapshot the catalog was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotInfo {
    pub version: String,
    pub fetched_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub snapshot: SnapshotInfo,
    champions: Vec<Champion>,
    class_map: ClassMap,
    abilities: HashMap<String, BTreeMap<AbilitySlot, Ability>>,
}

impl Catalog {
    /// Loads the three snapshot files from `dir`. The spell file is optional;
    /// without it the skills trainer simply has nothing to ask.
    pub fn load(dir: &Path) -> Result<Self, AppError> {
        let list: ChampionListDto = read_json(&dir.join(CHAMPIONS_FILE))?;
        let classes: ChampionClassesDto = read_json(&dir.join(CLASSES_FILE))?;

        let spells_path = dir.join(SPELLS_FILE);
        let spells: Option<ChampionSpellsDto> = if spells_path.exists() {
            Some(read_json(&spells_path)?)
        } else {
            tracing::warn!("No spell snapshot at {}", spells_path.display());
            None
        };

        let catalog = Self::from_dtos(list, classes, spells);
        tracing::debug!(
            "Loaded catalog {} with {} champions",
            catalog.snapshot.version,
            catalog.champions.len()
        );
        Ok(catalog)
    }

    pub fn from_dtos(
        list: ChampionListDto,
        classes: ChampionClassesDto,
        spells: Option<ChampionSpellsDto>,
    ) -> Self {
        let champions: Vec<Champion> = list
            .champions
            .into_iter()
            .map(|c| Champion {
                id: c.id,
                name: c.name,
                image: c.image,
            })
            .collect();

        let mut fetched_at = None;
        let mut abilities = HashMap::new();
        if let Some(spells) = spells {
            fetched_at = spells.fetched_at;
            for (id, raw) in spells.champions {
                let set = normalize_abilities(&id, raw, &spells.version);
                abilities.insert(id, set);
            }
        }

        Catalog {
            snapshot: SnapshotInfo {
                version: list.version,
                fetched_at,
            },
            champions,
            class_map: ClassMap::from_dto(classes),
            abilities,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.champions.is_empty()
    }

    pub fn champions(&self) -> &[Champion] {
        &self.champions
    }

    pub fn game_champion(&self, champion: &Champion) -> GameChampion {
        GameChampion {
            champion: champion.clone(),
            classes: self.class_map.classes_for(&champion.id),
        }
    }

    pub fn game_champions(&self) -> Vec<GameChampion> {
        self.champions.iter().map(|c| self.game_champion(c)).collect()
    }

    pub fn find_champion(&self, id_or_name: &str) -> Option<&Champion> {
        self.champions
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(id_or_name) || c.name.eq_ignore_ascii_case(id_or_name))
    }

    pub fn ability(&self, champion_id: &str, slot: AbilitySlot) -> Option<&Ability> {
        self.abilities.get(champion_id)?.get(&slot)
    }

    /// Abilities of a champion in canonical slot order.
    #[allow(dead_code)]
    pub fn abilities_for(&self, champion_id: &str) -> Vec<&Ability> {
        self.abilities
            .get(champion_id)
            .map(|set| set.values().collect())
            .unwrap_or_default()
    }

    pub fn champions_with_class(&self, class: ChampionClass) -> Vec<&Champion> {
        self.champions
            .iter()
            .filter(|c| self.class_map.classes_for(&c.id).contains(&class))
            .collect()
    }

    /// Class -> number of champions carrying it, for the taxonomy overview.
    pub fn class_counts(&self) -> Vec<(ChampionClass, usize)> {
        ALL_CLASSES
            .iter()
            .map(|class| (*class, self.champions_with_class(*class).len()))
            .collect()
    }

    pub fn image_url(&self, champion: &Champion) -> String {
        format!(
            "https://ddragon.leagueoflegends.com/cdn/{}/img/champion/{}",
            self.snapshot.version, champion.image
        )
    }
}

fn normalize_abilities(
    champion_id: &str,
    raw: RawChampionSpells,
    version: &str,
) -> BTreeMap<AbilitySlot, Ability> {
    let mut set = BTreeMap::new();
    match raw {
        RawChampionSpells::Formatted(dto) => {
            for ability in dto.abilities {
                match ability.key.parse::<AbilitySlot>() {
                    Ok(slot) => {
                        set.insert(slot, Ability::from_formatted(ability, slot, champion_id));
                    }
                    Err(e) => tracing::warn!("Skipping ability of {}: {}", champion_id, e),
                }
            }
        }
        RawChampionSpells::Legacy(dto) => {
            set.insert(
                AbilitySlot::P,
                Ability::from_legacy_passive(dto.passive, champion_id, version),
            );
            for spell in dto.spells {
                match spell.key.parse::<AbilitySlot>() {
                    Ok(slot) if slot != AbilitySlot::P => {
                        set.insert(slot, Ability::from_legacy_spell(spell, slot, champion_id, version));
                    }
                    _ => tracing::warn!("Skipping spell {} of {}", spell.key, champion_id),
                }
            }
        }
    }
    set
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let content = fs::read_to_string(path).map_err(|e| {
        AppError::CatalogError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        AppError::JsonError(format!("Failed to parse {}: {}", path.display(), e))
    })
}
