use rand::Rng;

use crate::catalog::ability::{Ability, AbilitySlot};
use crate::catalog::loader::{Catalog, GameChampion};
use crate::session::filter::FilterState;

/// How the skills queue is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueueOrder {
    /// All of a champion's abilities before moving on.
    #[default]
    Grouped,
    /// Abilities of different champions mixed together.
    Interleaved,
}

/// One (champion, ability) pair to quiz on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueItem {
    pub champion: GameChampion,
    pub ability: Ability,
    /// Snapshot version the ability data comes from.
    pub patch: String,
}

impl QueueItem {
    pub fn slot(&self) -> AbilitySlot {
        self.ability.slot
    }
}

/// Fisher-Yates: walks from the last index down to 1, swapping each
/// position with a uniformly drawn index in [0, i].
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Champion traversal for the class trainer: the filtered champions in
/// random order.
pub fn build_champion_queue<R: Rng + ?Sized>(
    catalog: &Catalog,
    filter: &FilterState,
    rng: &mut R,
) -> Vec<GameChampion> {
    if filter.is_empty() {
        return Vec::new();
    }
    let mut champions = filter.filter_champions(catalog);
    shuffle(&mut champions, rng);
    tracing::debug!("Built class queue with {} champions", champions.len());
    champions
}

/// Ability traversal for the skills trainer. Covers every enabled
/// (champion, slot) pair with ability data exactly once.
pub fn build_ability_queue<R: Rng + ?Sized>(
    catalog: &Catalog,
    filter: &FilterState,
    order: QueueOrder,
    rng: &mut R,
) -> Vec<QueueItem> {
    if filter.is_empty() {
        return Vec::new();
    }

    let champions = build_champion_queue(catalog, filter, rng);
    let slots = filter.enabled_slots();

    let mut items = Vec::new();
    for champion in champions {
        for slot in &slots {
            if let Some(ability) = catalog.ability(&champion.champion.id, *slot) {
                items.push(QueueItem {
                    champion: champion.clone(),
                    ability: ability.clone(),
                    patch: catalog.snapshot.version.clone(),
                });
            }
        }
    }

    if order == QueueOrder::Interleaved {
        shuffle(&mut items, rng);
    }

    tracing::debug!("Built {:?} skills queue with {} items", order, items.len());
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ability::ALL_SLOTS;
    use crate::catalog::loader::tests::sample_catalog;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn pairs(items: &[QueueItem]) -> Vec<(String, AbilitySlot)> {
        items
            .iter()
            .map(|i| (i.champion.champion.id.clone(), i.slot()))
            .collect()
    }

    #[test]
    fn shuffle_of_empty_and_single_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());
        let mut one = vec![7];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![7]);
    }

    #[test]
    fn grouped_queue_keeps_slots_in_canonical_order_per_champion() {
        let catalog = sample_catalog();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let items = build_ability_queue(&catalog, &FilterState::new(), QueueOrder::Grouped, &mut rng);

        // Ahri and Garen have spell data, Zed and Bard do not.
        assert_eq!(items.len(), 10);
        for block in items.chunks(5) {
            let champ = &block[0].champion.champion.id;
            assert!(block.iter().all(|i| &i.champion.champion.id == champ));
            let slots: Vec<_> = block.iter().map(|i| i.slot()).collect();
            assert_eq!(slots, ALL_SLOTS.to_vec());
        }
        assert!(items.iter().all(|i| i.patch == "14.1.1"));
    }

    #[test]
    fn disabled_slots_are_left_out() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new();
        filter.toggle_slot(AbilitySlot::P);
        filter.toggle_slot(AbilitySlot::R);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let items = build_ability_queue(&catalog, &filter, QueueOrder::Grouped, &mut rng);
        assert_eq!(items.len(), 6);
        assert!(items
            .iter()
            .all(|i| i.slot() != AbilitySlot::P && i.slot() != AbilitySlot::R));
    }

    #[test]
    fn empty_filter_yields_empty_queues() {
        let catalog = sample_catalog();
        let mut filter = FilterState::new();
        filter.deselect_all_classes();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert!(build_champion_queue(&catalog, &filter, &mut rng).is_empty());
        assert!(build_ability_queue(&catalog, &filter, QueueOrder::Interleaved, &mut rng).is_empty());

        let mut filter = FilterState::new();
        filter.deselect_all_slots();
        assert!(build_ability_queue(&catalog, &filter, QueueOrder::Grouped, &mut rng).is_empty());
    }

    proptest! {
        #[test]
        fn shuffle_is_a_permutation(values in proptest::collection::vec(0u32..1000, 0..64), seed in any::<u64>()) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut out = values.clone();
            shuffle(&mut out, &mut rng);
            let mut expected = values.clone();
            out.sort();
            expected.sort();
            prop_assert_eq!(out, expected);
        }

        #[test]
        fn champion_queue_is_a_permutation_of_filtered_champions(seed in any::<u64>()) {
            let catalog = sample_catalog();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let queue = build_champion_queue(&catalog, &FilterState::new(), &mut rng);
            let mut ids: Vec<_> = queue.iter().map(|c| c.champion.id.clone()).collect();
            ids.sort();
            prop_assert_eq!(ids, vec!["Ahri", "Bard", "Garen", "Zed"]);
        }

        #[test]
        fn interleaved_queue_covers_each_pair_once(seed in any::<u64>()) {
            let catalog = sample_catalog();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let filter = FilterState::new();
            let items = build_ability_queue(&catalog, &filter, QueueOrder::Interleaved, &mut rng);
            let seen: HashSet<_> = pairs(&items).into_iter().collect();
            prop_assert_eq!(seen.len(), items.len());
            prop_assert_eq!(items.len(), 10);

            let mut grouped = pairs(&build_ability_queue(&catalog, &filter, QueueOrder::Grouped, &mut rng));
            let mut interleaved = pairs(&items);
            grouped.sort();
            interleaved.sort();
            prop_assert_eq!(grouped, interleaved);
        }
    }
}
