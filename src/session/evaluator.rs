use crate::catalog::classes::ChampionClass;

/// Hit/miss mark for one guessed class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassGuessResult {
    pub class: ChampionClass,
    pub hit: bool,
}

/// Same classes, same count, any order.
pub fn is_exact_match(actual: &[ChampionClass], guessed: &[ChampionClass]) -> bool {
    if actual.len() != guessed.len() {
        return false;
    }
    let mut a = actual.to_vec();
    let mut g = guessed.to_vec();
    a.sort();
    g.sort();
    a == g
}

pub fn classify_guess(actual: &[ChampionClass], guessed: &[ChampionClass]) -> Vec<ClassGuessResult> {
    guessed
        .iter()
        .map(|class| ClassGuessResult {
            class: *class,
            hit: actual.contains(class),
        })
        .collect()
}

/// Actual classes the guess did not name.
pub fn missed_classes(actual: &[ChampionClass], guessed: &[ChampionClass]) -> Vec<ChampionClass> {
    actual
        .iter()
        .filter(|class| !guessed.contains(class))
        .copied()
        .collect()
}
