use crate::analysis::mastery::{relative_time, MasteryTier};
use crate::catalog::ability::Ability;
use crate::catalog::classes::{ChampionClass, ALL_GROUPS};
use crate::history::{Rating, SkillReviewRecord};
use crate::session::class_trainer::{GuessOutcome, HistoryEntry, MissedChampion};
use crate::session::evaluator::ClassGuessResult;
use crate::session::queue::QueueItem;
use crate::session::skills_trainer::RatingTally;
use chrono::Utc;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct DirectoryRow {
    champion: String,
    classes: String,
    reviews: String,
    mastery: String,
}

#[derive(Tabled)]
struct AbilityRow {
    slot: String,
    ability: String,
    mastery: String,
    recent: String,
}

#[derive(Tabled)]
struct ReviewRow {
    champion: String,
    slot: String,
    ability: String,
    rating: String,
    when: String,
}

#[derive(Tabled)]
struct GuessRow {
    champion: String,
    guess: String,
    result: String,
}

/// One directory line: champion name, classes, records, mastery.
pub struct DirectoryEntry {
    pub name: String,
    pub classes: Vec<ChampionClass>,
    pub reviews: usize,
    pub mastery: Option<u32>,
}

/// One ability line of the champion detail view.
pub struct AbilityProgress<'a> {
    pub slot: char,
    pub name: String,
    pub mastery: Option<u32>,
    pub recent: Vec<&'a SkillReviewRecord>,
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_no_data(reason: &str) {
    println!("\n{}", "📭 No data".bold().yellow());
    println!("   {}\n", reason);
}

pub fn mastery_badge(mastery: Option<u32>) -> String {
    match (MasteryTier::from_mastery(mastery), mastery) {
        (MasteryTier::NoData, _) | (_, None) => "No data".dimmed().to_string(),
        (MasteryTier::Strong, Some(m)) => format!("{}%", m).green().to_string(),
        (MasteryTier::Fair, Some(m)) => format!("{}%", m).yellow().to_string(),
        (MasteryTier::Weak, Some(m)) => format!("{}%", m).red().to_string(),
    }
}

fn rating_badge(rating: Rating) -> String {
    match rating {
        Rating::Nailed => rating.label().green().to_string(),
        Rating::Partial => rating.label().yellow().to_string(),
        Rating::NoIdea => rating.label().red().to_string(),
    }
}

fn join_classes(classes: &[ChampionClass]) -> String {
    classes
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn guess_marks(results: &[ClassGuessResult]) -> String {
    results
        .iter()
        .map(|r| {
            if r.hit {
                format!("✓ {}", r.class).green().to_string()
            } else {
                format!("✗ {}", r.class).red().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

// --- Class trainer ---

pub fn display_class_board(discarded: &dyn Fn(ChampionClass) -> bool) {
    for group in ALL_GROUPS {
        let subclasses: Vec<String> = group
            .subclasses()
            .into_iter()
            .map(|c| {
                if discarded(c) {
                    c.name().strikethrough().dimmed().to_string()
                } else {
                    c.name().to_string()
                }
            })
            .collect();
        println!("  {:<11} {}", group.name().bold(), subclasses.join("  "));
    }
}

pub fn display_champion_prompt(
    name: &str,
    position: (usize, usize),
    attempts: u32,
    hints: &[ClassGuessResult],
) {
    println!(
        "\n{} {}",
        format!("[{}/{}]", position.0 + 1, position.1).dimmed(),
        name.bold().cyan()
    );
    if attempts > 0 {
        println!("   Attempt {} | Hints: {}", attempts + 1, guess_marks(hints));
    }
}

pub fn display_guess_outcome(outcome: &GuessOutcome, champion: &str) {
    match outcome {
        GuessOutcome::Correct {
            first_attempt,
            wrapped,
        } => {
            if *first_attempt {
                display_success(&format!("{} - correct! +1", champion));
            } else {
                display_success(&format!("{} - correct (no point after a miss)", champion));
            }
            if *wrapped {
                display_info("All champions done, reshuffling the queue");
            }
        }
        GuessOutcome::Incorrect {
            results,
            not_found,
            attempts,
        } => {
            println!(
                "{} {}  ({} still missing, attempt {})",
                "✗ Not quite:".red().bold(),
                guess_marks(results),
                not_found.len(),
                attempts
            );
        }
    }
}

pub fn display_recent_history(entries: &[&HistoryEntry]) {
    if entries.is_empty() {
        return;
    }

    let rows: Vec<GuessRow> = entries
        .iter()
        .map(|e| GuessRow {
            champion: e.champion.name.clone(),
            guess: guess_marks(&e.guess_results),
            result: if e.exact_match {
                "EXACT".green().to_string()
            } else {
                "MISS".red().to_string()
            },
        })
        .collect();

    println!("\n{}", "🕘 Recent guesses".bold().cyan());
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_class_summary(score: u32, total_attempted: u32, missed: &[MissedChampion]) {
    println!("\n{}", "🏁 Class Trainer Results".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    let rate = if total_attempted == 0 {
        0.0
    } else {
        score as f64 / total_attempted as f64 * 100.0
    };
    println!(
        "{} {} / {} first-try ({:.1}%)\n",
        "📈 Score:".bold(),
        score.to_string().green(),
        total_attempted,
        rate
    );

    if !missed.is_empty() {
        println!("{}", "Needed more than one try".bold().yellow());
        for m in missed {
            println!("  {} - {}", m.champion.name, join_classes(&m.actual_classes));
        }
        println!();
    }
}

// --- Skills trainer ---

pub fn display_ability_prompt(item: &QueueItem, position: (usize, usize)) {
    println!(
        "\n{} {} {}",
        format!("[{}/{}]", position.0 + 1, position.1).dimmed(),
        item.champion.champion.name.bold().cyan(),
        format!("[{}]", item.slot()).bold().yellow()
    );
    println!("   {}", item.ability.icon_url.dimmed());
}

pub fn display_ability_reveal(ability: &Ability, patch: &str) {
    println!("   {} {}", ability.name.bold(), format!("(patch {})", patch).dimmed());
    for effect in &ability.effects {
        println!("   • {}", effect.description);
        for scaling in &effect.scalings {
            println!("       {}: {}", scaling.attribute.dimmed(), scaling.value);
        }
    }
    if let Some(cooldown) = &ability.cooldown {
        println!("   Cooldown: {}", cooldown);
    }
    if let Some(cost) = &ability.cost {
        let resource = ability.resource.as_deref().unwrap_or("");
        println!("   Cost: {} {}", cost, resource);
    }
    if let Some(damage) = &ability.damage_type {
        println!("   Damage: {}", damage);
    }
    if let Some(targeting) = &ability.targeting {
        println!("   Targeting: {}", targeting);
    }
}

pub fn display_skills_summary(tally: RatingTally) {
    println!("\n{}", "🏁 Skills Trainer Results".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "{} {}   {} {}   {} {}\n",
        rating_badge(Rating::Nailed),
        tally.nailed,
        rating_badge(Rating::Partial),
        tally.partial,
        rating_badge(Rating::NoIdea),
        tally.no_idea
    );
}

// --- Catalog ---

pub fn display_taxonomy(version: &str, fetched_at: Option<&str>, counts: &[(ChampionClass, usize)]) {
    println!("\n{}", format!("🗂️ Class Taxonomy (patch {})", version).bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());
    if let Some(fetched_at) = fetched_at {
        println!("   Snapshot fetched {}\n", fetched_at.dimmed());
    }
    for group in ALL_GROUPS {
        let parts: Vec<String> = group
            .subclasses()
            .into_iter()
            .map(|class| {
                let count = counts
                    .iter()
                    .find(|(c, _)| *c == class)
                    .map(|(_, n)| *n)
                    .unwrap_or(0);
                format!("{} ({})", class, count)
            })
            .collect();
        println!("  {:<11} {}", group.name().bold(), parts.join("  "));
    }
    println!();
}

// --- Progress ---

pub fn display_directory(entries: Vec<DirectoryEntry>) {
    println!("\n{}", "📚 Champion Directory".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if entries.is_empty() {
        println!("{}", "No champions match your filters.".yellow());
        return;
    }

    let rows: Vec<DirectoryRow> = entries
        .into_iter()
        .map(|e| DirectoryRow {
            champion: e.name,
            classes: join_classes(&e.classes),
            reviews: e.reviews.to_string(),
            mastery: mastery_badge(e.mastery),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_champion_detail(
    name: &str,
    image_url: &str,
    mastery: Option<u32>,
    abilities: Vec<AbilityProgress>,
) {
    println!("\n{} {}", name.bold().cyan(), mastery_badge(mastery));
    println!("{}", image_url.dimmed());
    println!("{}\n", "=".repeat(60).cyan());

    let rows: Vec<AbilityRow> = abilities
        .into_iter()
        .map(|a| AbilityRow {
            slot: a.slot.to_string(),
            ability: a.name,
            mastery: mastery_badge(a.mastery),
            recent: if a.recent.is_empty() {
                "Not reviewed yet".dimmed().to_string()
            } else {
                a.recent
                    .iter()
                    .map(|r| rating_badge(r.rating))
                    .collect::<Vec<_>>()
                    .join(" ")
            },
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_review_history(records: Vec<&SkillReviewRecord>) {
    println!("\n{}", "🗒️ Review History".bold().cyan());
    println!("{}\n", "=".repeat(60).cyan());

    if records.is_empty() {
        println!("No reviews yet. Play the skills trainer to build history.\n");
        return;
    }

    let now = Utc::now();
    let rows: Vec<ReviewRow> = records
        .into_iter()
        .map(|r| ReviewRow {
            champion: r.champion_name.clone(),
            slot: r.ability_key.to_string(),
            ability: r.ability_name.clone(),
            rating: rating_badge(r.rating),
            when: relative_time(r.timestamp, now),
        })
        .collect();

    let total = rows.len();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
    println!("{} reviews\n", total);
}
