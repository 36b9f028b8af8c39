//! Skills trainer: recall each ability, reveal it, rate yourself.
//!
//! There is no retry loop. Every rating produces a review record and moves
//! on; the session finishes when the queue runs out.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::filter::FilterState;
use super::queue::{build_ability_queue, QueueItem, QueueOrder};
use super::SessionPhase;
use crate::catalog::loader::Catalog;
use crate::error::AppError;
use crate::history::{Rating, SkillReviewRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingTally {
    pub nailed: u32,
    pub partial: u32,
    pub no_idea: u32,
}

impl RatingTally {
    fn add(&mut self, rating: Rating) {
        match rating {
            Rating::Nailed => self.nailed += 1,
            Rating::Partial => self.partial += 1,
            Rating::NoIdea => self.no_idea += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.nailed + self.partial + self.no_idea
    }
}

pub struct SkillsTrainer<R: Rng> {
    rng: R,
    phase: SessionPhase,
    order: QueueOrder,
    queue: Vec<QueueItem>,
    index: usize,
    revealed: bool,
    tally: RatingTally,
}

impl<R: Rng> SkillsTrainer<R> {
    pub fn new(rng: R) -> Self {
        SkillsTrainer {
            rng,
            phase: SessionPhase::NotStarted,
            order: QueueOrder::default(),
            queue: Vec::new(),
            index: 0,
            revealed: false,
            tally: RatingTally::default(),
        }
    }

    pub fn start(
        &mut self,
        catalog: &Catalog,
        filter: &FilterState,
        order: QueueOrder,
    ) -> Result<(), AppError> {
        let queue = build_ability_queue(catalog, filter, order, &mut self.rng);
        if queue.is_empty() {
            return Err(AppError::NoData(
                "no abilities match the enabled classes and slots".to_string(),
            ));
        }

        self.order = order;
        self.queue = queue;
        self.index = 0;
        self.revealed = false;
        self.tally = RatingTally::default();
        self.phase = SessionPhase::InProgress;
        tracing::debug!("Skills trainer started with {} abilities", self.queue.len());
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn order(&self) -> QueueOrder {
        self.order
    }

    pub fn current(&self) -> Option<&QueueItem> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.queue.get(self.index)
    }

    /// (items done, queue length)
    pub fn progress(&self) -> (usize, usize) {
        (self.index, self.queue.len())
    }

    pub fn tally(&self) -> RatingTally {
        self.tally
    }

    pub fn reveal(&mut self) {
        if self.current().is_some() {
            self.revealed = true;
        }
    }

    #[allow(dead_code)]
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn submit_rating(&mut self, rating: Rating) -> Result<SkillReviewRecord, AppError> {
        self.submit_rating_at(rating, Utc::now())
    }

    /// Rates the current ability and always advances. The returned record
    /// is what the caller persists.
    pub fn submit_rating_at(
        &mut self,
        rating: Rating,
        now: DateTime<Utc>,
    ) -> Result<SkillReviewRecord, AppError> {
        let item = self
            .current()
            .ok_or_else(|| AppError::NoData("no ability to rate".to_string()))?;

        let record = SkillReviewRecord {
            champion_id: item.champion.champion.id.clone(),
            champion_name: item.champion.champion.name.clone(),
            ability_key: item.slot(),
            ability_name: item.ability.name.clone(),
            rating,
            timestamp: now,
        };

        self.tally.add(rating);
        self.revealed = false;
        self.index += 1;
        if self.index >= self.queue.len() {
            self.phase = SessionPhase::Finished;
            tracing::debug!("Skills trainer finished after {} ratings", self.tally.total());
        }
        Ok(record)
    }

    pub fn finish(&mut self) {
        if self.phase == SessionPhase::InProgress {
            self.phase = SessionPhase::Finished;
        }
    }

    pub fn restart(&mut self) {
        self.queue.clear();
        self.index = 0;
        self.revealed = false;
        self.tally = RatingTally::default();
        self.phase = SessionPhase::NotStarted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ability::AbilitySlot;
    use crate::catalog::loader::tests::sample_catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn started(order: QueueOrder) -> SkillsTrainer<ChaCha8Rng> {
        let mut trainer = SkillsTrainer::new(ChaCha8Rng::seed_from_u64(11));
        trainer.start(&sample_catalog(), &FilterState::new(), order).unwrap();
        trainer
    }

    #[test]
    fn start_is_refused_without_abilities() {
        let mut trainer = SkillsTrainer::new(ChaCha8Rng::seed_from_u64(1));
        let mut filter = FilterState::new();
        filter.deselect_all_slots();
        let result = trainer.start(&sample_catalog(), &filter, QueueOrder::Grouped);
        assert!(matches!(result, Err(AppError::NoData(_))));
        assert_eq!(trainer.phase(), SessionPhase::NotStarted);

        // Champions without spell data give nothing to ask either.
        let mut filter = FilterState::new();
        filter.set_search("zed");
        assert!(trainer.start(&sample_catalog(), &filter, QueueOrder::Grouped).is_err());
    }

    #[test]
    fn rating_builds_record_and_always_advances() {
        let mut trainer = started(QueueOrder::Grouped);
        let item = trainer.current().unwrap().clone();
        assert_eq!(item.slot(), AbilitySlot::P);

        trainer.reveal();
        assert!(trainer.is_revealed());
        let now = Utc::now();
        let record = trainer.submit_rating_at(Rating::NoIdea, now).unwrap();

        assert_eq!(record.champion_id, item.champion.champion.id);
        assert_eq!(record.ability_key, AbilitySlot::P);
        assert_eq!(record.ability_name, item.ability.name);
        assert_eq!(record.timestamp, now);
        assert_eq!(trainer.progress(), (1, 10));
        assert!(!trainer.is_revealed());
        assert_eq!(trainer.current().unwrap().slot(), AbilitySlot::Q);
    }

    #[test]
    fn last_rating_finishes_the_session() {
        let mut trainer = started(QueueOrder::Interleaved);
        let ratings = [Rating::Nailed, Rating::Partial, Rating::NoIdea];
        for i in 0..10 {
            trainer.submit_rating(ratings[i % 3]).unwrap();
        }
        assert_eq!(trainer.phase(), SessionPhase::Finished);
        assert!(trainer.current().is_none());
        assert_eq!(
            trainer.tally(),
            RatingTally { nailed: 4, partial: 3, no_idea: 3 }
        );
        assert!(matches!(
            trainer.submit_rating(Rating::Nailed),
            Err(AppError::NoData(_))
        ));
    }

    #[test]
    fn finish_early_and_restart() {
        let mut trainer = started(QueueOrder::Grouped);
        trainer.submit_rating(Rating::Nailed).unwrap();
        trainer.finish();
        assert_eq!(trainer.phase(), SessionPhase::Finished);
        assert_eq!(trainer.tally().total(), 1);

        trainer.restart();
        assert_eq!(trainer.phase(), SessionPhase::NotStarted);
        assert_eq!(trainer.progress(), (0, 0));
        assert_eq!(trainer.tally().total(), 0);
    }
}
