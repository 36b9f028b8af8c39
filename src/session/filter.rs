use std::collections::BTreeSet;

use crate::catalog::ability::{AbilitySlot, ALL_SLOTS};
use crate::catalog::classes::{ChampionClass, ALL_CLASSES};
use crate::catalog::loader::{Catalog, GameChampion};

/// Which classes and ability slots are in play. Shared by the trainers'
/// start screens and the progress directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    enabled_classes: BTreeSet<ChampionClass>,
    enabled_slots: BTreeSet<AbilitySlot>,
    search: String,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            enabled_classes: ALL_CLASSES.iter().copied().collect(),
            enabled_slots: ALL_SLOTS.iter().copied().collect(),
            search: String::new(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_class(&mut self, class: ChampionClass) {
        if !self.enabled_classes.remove(&class) {
            self.enabled_classes.insert(class);
        }
    }

    #[allow(dead_code)]
    pub fn select_all_classes(&mut self) {
        self.enabled_classes = ALL_CLASSES.iter().copied().collect();
    }

    pub fn deselect_all_classes(&mut self) {
        self.enabled_classes.clear();
    }

    pub fn toggle_slot(&mut self, slot: AbilitySlot) {
        if !self.enabled_slots.remove(&slot) {
            self.enabled_slots.insert(slot);
        }
    }

    #[allow(dead_code)]
    pub fn select_all_slots(&mut self) {
        self.enabled_slots = ALL_SLOTS.iter().copied().collect();
    }

    pub fn deselect_all_slots(&mut self) {
        self.enabled_slots.clear();
    }

    pub fn set_search(&mut self, search: &str) {
        self.search = search.trim().to_lowercase();
    }

    pub fn is_class_enabled(&self, class: ChampionClass) -> bool {
        self.enabled_classes.contains(&class)
    }

    pub fn is_slot_enabled(&self, slot: AbilitySlot) -> bool {
        self.enabled_slots.contains(&slot)
    }

    /// Enabled slots in canonical P, Q, W, E, R order.
    pub fn enabled_slots(&self) -> Vec<AbilitySlot> {
        self.enabled_slots.iter().copied().collect()
    }

    #[allow(dead_code)]
    pub fn enabled_classes(&self) -> Vec<ChampionClass> {
        self.enabled_classes.iter().copied().collect()
    }

    /// Nothing to play with: no class or no slot enabled.
    pub fn is_empty(&self) -> bool {
        self.enabled_classes.is_empty() || self.enabled_slots.is_empty()
    }

    pub fn matches_champion(&self, champion: &GameChampion) -> bool {
        if !self.search.is_empty()
            && !champion.champion.name.to_lowercase().contains(&self.search)
        {
            return false;
        }
        if self.enabled_classes.len() == ALL_CLASSES.len() {
            return true;
        }
        champion
            .classes
            .iter()
            .any(|class| self.enabled_classes.contains(class))
    }

    pub fn filter_champions(&self, catalog: &Catalog) -> Vec<GameChampion> {
        catalog
            .game_champions()
            .into_iter()
            .filter(|c| self.matches_champion(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::tests::sample_catalog;

    fn ids(champions: &[GameChampion]) -> Vec<&str> {
        champions.iter().map(|c| c.champion.id.as_str()).collect()
    }

    #[test]
    fn everything_enabled_by_default() {
        let filter = FilterState::new();
        assert!(!filter.is_empty());
        assert_eq!(filter.enabled_slots(), ALL_SLOTS.to_vec());
        assert_eq!(ids(&filter.filter_champions(&sample_catalog())).len(), 4);
    }

    #[test]
    fn champion_matches_when_any_class_is_enabled() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new();
        filter.deselect_all_classes();
        filter.toggle_class(ChampionClass::Burst);
        assert_eq!(ids(&filter.filter_champions(&catalog)), vec!["Ahri"]);

        filter.toggle_class(ChampionClass::Assassin);
        assert_eq!(ids(&filter.filter_champions(&catalog)), vec!["Ahri", "Zed"]);

        filter.toggle_class(ChampionClass::Burst);
        filter.toggle_class(ChampionClass::Assassin);
        assert!(filter.is_empty());
        assert!(filter.filter_champions(&catalog).is_empty());
    }

    #[test]
    fn empty_slot_selection_empties_the_filter() {
        let mut filter = FilterState::new();
        filter.deselect_all_slots();
        assert!(filter.is_empty());
        filter.toggle_slot(AbilitySlot::R);
        assert!(!filter.is_empty());
        assert_eq!(filter.enabled_slots(), vec![AbilitySlot::R]);
        filter.select_all_slots();
        assert!(filter.is_slot_enabled(AbilitySlot::P));
    }

    #[test]
    fn search_narrows_by_name() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new();
        filter.set_search("  GA ");
        assert_eq!(ids(&filter.filter_champions(&catalog)), vec!["Garen"]);
    }
}
