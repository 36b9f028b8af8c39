//! Class trainer: name the class(es) of each champion in a shuffled queue.
//!
//! A wrong guess keeps the player on the same champion with hit/miss hints.
//! A point is only awarded when the exact class set is found on the first
//! attempt. Exhausting the queue reshuffles the same champions and keeps going.

use std::collections::BTreeSet;

use rand::Rng;

use super::evaluator::{classify_guess, is_exact_match, missed_classes, ClassGuessResult};
use super::filter::FilterState;
use super::queue::{build_champion_queue, shuffle};
use super::SessionPhase;
use crate::catalog::classes::ChampionClass;
use crate::catalog::loader::{Catalog, Champion, GameChampion};
use crate::error::AppError;

pub const MAX_SELECTED_CLASSES: usize = 2;
const RESHUFFLE_TRIES: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub champion: Champion,
    pub guess_results: Vec<ClassGuessResult>,
    pub exact_match: bool,
}

/// A champion that was not solved on the first attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissedChampion {
    pub champion: Champion,
    pub actual_classes: Vec<ChampionClass>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct {
        first_attempt: bool,
        /// The queue ran out and was reshuffled.
        wrapped: bool,
    },
    Incorrect {
        results: Vec<ClassGuessResult>,
        /// Actual classes the guess did not name.
        not_found: Vec<ChampionClass>,
        attempts: u32,
    },
}

pub struct ClassTrainer<R: Rng> {
    rng: R,
    phase: SessionPhase,
    queue: Vec<GameChampion>,
    index: usize,
    score: u32,
    total_attempted: u32,
    attempts_on_current: u32,
    history: Vec<HistoryEntry>,
    selected: Vec<ChampionClass>,
    discarded: BTreeSet<ChampionClass>,
    missed: Vec<MissedChampion>,
}

impl<R: Rng> ClassTrainer<R> {
    pub fn new(rng: R) -> Self {
        ClassTrainer {
            rng,
            phase: SessionPhase::NotStarted,
            queue: Vec::new(),
            index: 0,
            score: 0,
            total_attempted: 0,
            attempts_on_current: 0,
            history: Vec::new(),
            selected: Vec::new(),
            discarded: BTreeSet::new(),
            missed: Vec::new(),
        }
    }

    /// Starts a session over the champions the filter lets through.
    /// Refused when that leaves nothing to play.
    pub fn start(&mut self, catalog: &Catalog, filter: &FilterState) -> Result<(), AppError> {
        let queue = build_champion_queue(catalog, filter, &mut self.rng);
        if queue.is_empty() {
            return Err(AppError::NoData(
                "no champions match the enabled classes".to_string(),
            ));
        }

        self.reset();
        self.queue = queue;
        self.phase = SessionPhase::InProgress;
        tracing::debug!("Class trainer started with {} champions", self.queue.len());
        Ok(())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&GameChampion> {
        if self.phase != SessionPhase::InProgress {
            return None;
        }
        self.queue.get(self.index)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn total_attempted(&self) -> u32 {
        self.total_attempted
    }

    pub fn attempts_on_current(&self) -> u32 {
        self.attempts_on_current
    }

    pub fn position(&self) -> (usize, usize) {
        (self.index, self.queue.len())
    }

    #[allow(dead_code)]
    pub fn queue(&self) -> &[GameChampion] {
        &self.queue
    }

    pub fn selected(&self) -> &[ChampionClass] {
        &self.selected
    }

    pub fn missed(&self) -> &[MissedChampion] {
        &self.missed
    }

    /// Adds or removes a class from the pending guess. At most two can be
    /// selected at once.
    pub fn toggle_selection(&mut self, class: ChampionClass) -> Result<(), AppError> {
        if let Some(pos) = self.selected.iter().position(|c| *c == class) {
            self.selected.remove(pos);
            return Ok(());
        }
        if self.selected.len() >= MAX_SELECTED_CLASSES {
            return Err(AppError::InvalidInput(format!(
                "at most {} classes can be selected",
                MAX_SELECTED_CLASSES
            )));
        }
        self.selected.push(class);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Strikes a class out for the current champion. Purely a player aid.
    pub fn toggle_discard(&mut self, class: ChampionClass) {
        if !self.discarded.remove(&class) {
            self.discarded.insert(class);
        }
    }

    pub fn is_discarded(&self, class: ChampionClass) -> bool {
        self.discarded.contains(&class)
    }

    /// Submits the pending selection.
    pub fn submit_selection(&mut self) -> Result<GuessOutcome, AppError> {
        let guessed = self.selected.clone();
        self.submit_guess(&guessed)
    }

    pub fn submit_guess(&mut self, guessed: &[ChampionClass]) -> Result<GuessOutcome, AppError> {
        if guessed.is_empty() {
            return Err(AppError::InvalidInput("select at least one class".to_string()));
        }
        if guessed.len() > MAX_SELECTED_CLASSES {
            return Err(AppError::InvalidInput(format!(
                "at most {} classes can be guessed",
                MAX_SELECTED_CLASSES
            )));
        }
        let current = match self.current() {
            Some(current) => current.clone(),
            None => return Err(AppError::NoData("no champion to guess".to_string())),
        };

        let exact_match = is_exact_match(&current.classes, guessed);
        let results = classify_guess(&current.classes, guessed);
        self.history.push(HistoryEntry {
            champion: current.champion.clone(),
            guess_results: results.clone(),
            exact_match,
        });
        self.selected.clear();

        if !exact_match {
            self.attempts_on_current += 1;
            return Ok(GuessOutcome::Incorrect {
                results,
                not_found: missed_classes(&current.classes, guessed),
                attempts: self.attempts_on_current,
            });
        }

        let first_attempt = self.attempts_on_current == 0;
        if first_attempt {
            self.score += 1;
        } else {
            self.missed.push(MissedChampion {
                champion: current.champion,
                actual_classes: current.classes,
            });
        }
        self.total_attempted += 1;

        let wrapped = self.advance();
        Ok(GuessOutcome::Correct {
            first_attempt,
            wrapped,
        })
    }

    /// Hit/miss marks from the guesses already made on the current champion.
    pub fn hints(&self) -> Vec<ClassGuessResult> {
        let n = self.attempts_on_current as usize;
        let start = self.history.len().saturating_sub(n);
        let mut hints: Vec<ClassGuessResult> = Vec::new();
        for entry in &self.history[start..] {
            for result in &entry.guess_results {
                if !hints.iter().any(|h| h.class == result.class) {
                    hints.push(*result);
                }
            }
        }
        hints
    }

    /// Most recent history entries, newest first.
    pub fn recent_history(&self, limit: usize) -> Vec<&HistoryEntry> {
        self.history.iter().rev().take(limit).collect()
    }

    #[allow(dead_code)]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Ends the session early, keeping score and history.
    pub fn finish(&mut self) {
        if self.phase == SessionPhase::InProgress {
            self.phase = SessionPhase::Finished;
            tracing::debug!("Class trainer finished with score {}", self.score);
        }
    }

    pub fn restart(&mut self) {
        self.reset();
        self.queue.clear();
        self.phase = SessionPhase::NotStarted;
    }

    fn reset(&mut self) {
        self.index = 0;
        self.score = 0;
        self.total_attempted = 0;
        self.attempts_on_current = 0;
        self.history.clear();
        self.selected.clear();
        self.discarded.clear();
        self.missed.clear();
    }

    /// Moves to the next champion. Returns true when the queue wrapped.
    fn advance(&mut self) -> bool {
        self.attempts_on_current = 0;
        self.discarded.clear();
        self.selected.clear();
        self.index += 1;
        if self.index < self.queue.len() {
            return false;
        }

        self.reshuffle();
        self.index = 0;
        true
    }

    /// New order for the same champions, different from the exhausted one
    /// whenever a different one exists.
    fn reshuffle(&mut self) {
        let previous: Vec<String> = self.queue.iter().map(|c| c.champion.id.clone()).collect();
        if previous.len() < 2 {
            return;
        }

        for _ in 0..RESHUFFLE_TRIES {
            shuffle(&mut self.queue, &mut self.rng);
            if self
                .queue
                .iter()
                .zip(&previous)
                .any(|(c, id)| &c.champion.id != id)
            {
                tracing::debug!("Class queue exhausted, reshuffled");
                return;
            }
        }
        // Unlucky draws: a rotation is always a different order.
        self.queue.rotate_left(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::loader::tests::sample_catalog;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use ChampionClass::*;

    fn started(seed: u64) -> ClassTrainer<ChaCha8Rng> {
        let mut trainer = ClassTrainer::new(ChaCha8Rng::seed_from_u64(seed));
        trainer.start(&sample_catalog(), &FilterState::new()).unwrap();
        trainer
    }

    fn wrong_guess(actual: &[ChampionClass]) -> ChampionClass {
        if actual.contains(&Warden) {
            Catcher
        } else {
            Warden
        }
    }

    #[test]
    fn start_is_refused_when_filters_leave_nothing() {
        let mut trainer = ClassTrainer::new(ChaCha8Rng::seed_from_u64(1));
        let mut filter = FilterState::new();
        filter.deselect_all_classes();
        assert!(matches!(
            trainer.start(&sample_catalog(), &filter),
            Err(AppError::NoData(_))
        ));
        assert_eq!(trainer.phase(), SessionPhase::NotStarted);
        assert!(trainer.current().is_none());
    }

    #[test]
    fn first_attempt_exact_match_scores() {
        let mut trainer = started(2);
        let actual = trainer.current().unwrap().classes.clone();
        let outcome = trainer.submit_guess(&actual).unwrap();

        assert_eq!(outcome, GuessOutcome::Correct { first_attempt: true, wrapped: false });
        assert_eq!(trainer.score(), 1);
        assert_eq!(trainer.total_attempted(), 1);
        assert_eq!(trainer.position().0, 1);
    }

    #[test]
    fn later_correct_guess_counts_attempt_but_not_score() {
        let mut trainer = started(3);
        let current = trainer.current().unwrap().clone();
        let wrong = wrong_guess(&current.classes);

        match trainer.submit_guess(&[wrong]).unwrap() {
            GuessOutcome::Incorrect { not_found, attempts, .. } => {
                assert_eq!(attempts, 1);
                assert_eq!(not_found, current.classes);
            }
            other => panic!("expected incorrect, got {:?}", other),
        }
        assert_eq!(trainer.current().unwrap().champion, current.champion);

        trainer.submit_guess(&current.classes).unwrap();
        assert_eq!(trainer.score(), 0);
        assert_eq!(trainer.total_attempted(), 1);
        assert_eq!(trainer.missed().len(), 1);
        assert_eq!(trainer.missed()[0].champion, current.champion);
        assert_eq!(trainer.attempts_on_current(), 0);
    }

    #[test]
    fn history_records_every_guess() {
        let mut trainer = started(4);
        let current = trainer.current().unwrap().clone();
        trainer.submit_guess(&[wrong_guess(&current.classes)]).unwrap();
        trainer.submit_guess(&current.classes).unwrap();

        assert_eq!(trainer.history().len(), 2);
        assert!(!trainer.history()[0].exact_match);
        assert!(trainer.history()[1].exact_match);
        assert!(trainer.recent_history(1)[0].exact_match);
    }

    #[test]
    fn hints_come_from_guesses_on_the_current_champion() {
        let mut trainer = started(5);
        // Solve the first champion so its guesses are in history too.
        let first = trainer.current().unwrap().classes.clone();
        trainer.submit_guess(&first).unwrap();
        assert!(trainer.hints().is_empty());

        // No sample champion is a Warden, so these guesses are never exact.
        let current = trainer.current().unwrap().clone();
        let wrong = wrong_guess(&current.classes);
        trainer.submit_guess(&[wrong, current.classes[0]]).unwrap();
        trainer.submit_guess(&[wrong]).unwrap();
        assert_eq!(trainer.attempts_on_current(), 2);

        let hints = trainer.hints();
        assert_eq!(hints.len(), 2);
        assert!(hints.contains(&ClassGuessResult { class: wrong, hit: false }));
        assert!(hints.contains(&ClassGuessResult { class: current.classes[0], hit: true }));
    }

    #[test]
    fn selection_is_capped_at_two() {
        let mut trainer = started(6);
        trainer.toggle_selection(Burst).unwrap();
        trainer.toggle_selection(Assassin).unwrap();
        assert!(matches!(trainer.toggle_selection(Warden), Err(AppError::InvalidInput(_))));
        trainer.toggle_selection(Burst).unwrap();
        assert_eq!(trainer.selected(), &[Assassin]);

        assert!(trainer.submit_guess(&[Burst, Assassin, Warden]).is_err());
        assert!(trainer.submit_guess(&[]).is_err());
        assert!(trainer.history().is_empty());
    }

    #[test]
    fn submit_selection_clears_selection_and_discards_reset_on_advance() {
        let mut trainer = started(7);
        let actual = trainer.current().unwrap().classes.clone();
        trainer.toggle_discard(Vanguard);
        assert!(trainer.is_discarded(Vanguard));
        for class in &actual {
            trainer.toggle_selection(*class).unwrap();
        }
        trainer.submit_selection().unwrap();
        assert!(trainer.selected().is_empty());
        assert!(!trainer.is_discarded(Vanguard));
    }

    #[test]
    fn exhausted_queue_reshuffles_same_champions() {
        let mut trainer = started(8);
        let before: Vec<String> = trainer.queue().iter().map(|c| c.champion.id.clone()).collect();

        let mut last = None;
        for _ in 0..before.len() {
            let actual = trainer.current().unwrap().classes.clone();
            last = Some(trainer.submit_guess(&actual).unwrap());
        }
        assert_eq!(last, Some(GuessOutcome::Correct { first_attempt: true, wrapped: true }));
        assert_eq!(trainer.position(), (0, before.len()));
        assert_eq!(trainer.score(), 4);

        let after: Vec<String> = trainer.queue().iter().map(|c| c.champion.id.clone()).collect();
        assert_ne!(after, before);
        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        assert_eq!(sorted_after, sorted_before);
    }

    #[test]
    fn finish_keeps_score_and_restart_clears_it() {
        let mut trainer = started(9);
        let actual = trainer.current().unwrap().classes.clone();
        trainer.submit_guess(&actual).unwrap();
        trainer.finish();

        assert_eq!(trainer.phase(), SessionPhase::Finished);
        assert_eq!(trainer.score(), 1);
        assert!(trainer.current().is_none());
        assert!(trainer.submit_guess(&actual).is_err());

        trainer.restart();
        assert_eq!(trainer.phase(), SessionPhase::NotStarted);
        assert_eq!(trainer.score(), 0);
        assert!(trainer.history().is_empty());
    }
}
