mod analysis;
mod catalog;
mod config;
mod display;
mod error;
mod history;
mod session;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use analysis::mastery::{
    compute_mastery, mastery_for, newest_first, recent_for_ability, records_by_champion,
    RECENT_PER_ABILITY,
};
use catalog::ability::{AbilitySlot, ALL_SLOTS};
use catalog::classes::ChampionClass;
use catalog::loader::Catalog;
use clap::{Args as ClapArgs, Parser, Subcommand};
use config::Config;
use display::output::{
    display_ability_prompt, display_ability_reveal, display_champion_detail,
    display_champion_prompt, display_class_board, display_class_summary, display_directory,
    display_error, display_guess_outcome, display_info, display_no_data, display_recent_history,
    display_review_history, display_skills_summary, display_success, display_taxonomy,
    AbilityProgress, DirectoryEntry,
};
use error::AppError;
use history::{HistoryStore, Rating};
use indicatif::{ProgressBar, ProgressStyle};
use session::class_trainer::ClassTrainer;
use session::filter::FilterState;
use session::queue::QueueOrder;
use session::skills_trainer::SkillsTrainer;
use session::SessionPhase;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "Champ Trainer")]
#[command(about = "Practice League of Legends champion classes and abilities", long_about = None)]
struct Cli {
    /// Directory holding the champion data snapshot (overrides CHAMP_TRAINER_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Guess each champion's class(es)
    Classes {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Recall champion abilities and rate yourself
    Skills {
        #[command(flatten)]
        filter: FilterArgs,

        /// Ability slots to include, e.g. "QWE" (default: PQWER)
        #[arg(long, default_value = "PQWER")]
        slots: String,

        /// Mix abilities of different champions instead of going champion by champion
        #[arg(long)]
        interleave: bool,
    },

    /// Mastery per champion, or per ability with --champion
    Progress {
        #[command(flatten)]
        filter: FilterArgs,

        /// Show the ability breakdown of one champion (id or name)
        #[arg(short, long)]
        champion: Option<String>,

        /// Only champions whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List every skill review, newest first
    History,

    /// Delete all skill review history
    ClearHistory {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the class taxonomy with champion counts
    Taxonomy,
}

#[derive(ClapArgs, Debug, Default)]
struct FilterArgs {
    /// Only include these classes (comma separated)
    #[arg(long, value_delimiter = ',')]
    only_class: Vec<ChampionClass>,

    /// Exclude these classes (comma separated)
    #[arg(long, value_delimiter = ',')]
    skip_class: Vec<ChampionClass>,
}

impl FilterArgs {
    fn to_filter(&self) -> FilterState {
        let mut filter = FilterState::new();
        if !self.only_class.is_empty() {
            filter.deselect_all_classes();
            for class in &self.only_class {
                if !filter.is_class_enabled(*class) {
                    filter.toggle_class(*class);
                }
            }
        }
        for class in &self.skip_class {
            if filter.is_class_enabled(*class) {
                filter.toggle_class(*class);
            }
        }
        filter
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("champ_trainer=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let store = HistoryStore::new(config.history_path.clone());
    tracing::debug!("Using history at {}", store.path().display());

    match cli.command {
        Command::Classes { filter } => {
            let Some(catalog) = load_catalog(&config) else {
                return Ok(());
            };
            run_class_trainer(&catalog, &filter.to_filter(), &config)
        }
        Command::Skills {
            filter,
            slots,
            interleave,
        } => {
            let Some(catalog) = load_catalog(&config) else {
                return Ok(());
            };
            let mut filter_state = filter.to_filter();
            apply_slots(&mut filter_state, &slots)?;
            let order = if interleave {
                QueueOrder::Interleaved
            } else {
                QueueOrder::Grouped
            };
            run_skills_trainer(&catalog, &filter_state, order, &store)
        }
        Command::Progress {
            filter,
            champion,
            search,
        } => {
            let Some(catalog) = load_catalog(&config) else {
                return Ok(());
            };
            let mut filter_state = filter.to_filter();
            if let Some(search) = search {
                filter_state.set_search(&search);
            }
            show_progress(&catalog, &filter_state, champion.as_deref(), &store)
        }
        Command::History => {
            let records = store.load();
            display_review_history(newest_first(&records));
            Ok(())
        }
        Command::ClearHistory { yes } => clear_history(&store, yes),
        Command::Taxonomy => {
            let Some(catalog) = load_catalog(&config) else {
                return Ok(());
            };
            display_taxonomy(
                &catalog.snapshot.version,
                catalog.snapshot.fetched_at.as_deref(),
                &catalog.class_counts(),
            );
            Ok(())
        }
    }
}

/// A missing or empty catalog is a "no data" screen, not a failure.
fn load_catalog(config: &Config) -> Option<Catalog> {
    match Catalog::load(&config.data_dir) {
        Ok(catalog) if catalog.is_empty() => {
            display_no_data("The champion data snapshot contains no champions.");
            None
        }
        Ok(catalog) => Some(catalog),
        Err(e) => {
            tracing::warn!("Catalog unavailable: {}", e);
            display_no_data(&format!(
                "Champion data could not be loaded from {}.",
                config.data_dir.display()
            ));
            None
        }
    }
}

fn apply_slots(filter: &mut FilterState, slots: &str) -> Result<(), AppError> {
    filter.deselect_all_slots();
    for c in slots.chars().filter(|c| !c.is_whitespace() && *c != ',') {
        let slot = AbilitySlot::from_letter(c)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown ability slot '{}'", c)))?;
        if !filter.is_slot_enabled(slot) {
            filter.toggle_slot(slot);
        }
    }
    Ok(())
}

fn prompt(message: &str) -> Result<Option<String>, AppError> {
    print!("{} ", message);
    io::stdout()
        .flush()
        .map_err(|e| AppError::IoError(e.to_string()))?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| AppError::IoError(e.to_string()))?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn parse_classes(input: &str) -> Result<Vec<ChampionClass>, AppError> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<ChampionClass>().map_err(AppError::InvalidInput))
        .collect()
}

fn run_class_trainer(catalog: &Catalog, filter: &FilterState, config: &Config) -> Result<(), AppError> {
    let mut trainer = ClassTrainer::new(rand::thread_rng());
    if let Err(e) = trainer.start(catalog, filter) {
        display_no_data(&e.to_string());
        return Ok(());
    }

    display_info(&format!(
        "Class trainer: {} champions. Type one or two classes, '-x <class>' to strike one out, 'h' for recent guesses, 'q' to finish.",
        trainer.position().1
    ));

    while trainer.phase() == SessionPhase::InProgress {
        let Some(current) = trainer.current().cloned() else {
            display_no_data("No champion left to guess.");
            break;
        };

        display_champion_prompt(
            &current.champion.name,
            trainer.position(),
            trainer.attempts_on_current(),
            &trainer.hints(),
        );
        display_class_board(&|class| trainer.is_discarded(class));

        let Some(line) = prompt(">")? else {
            trainer.finish();
            break;
        };

        match line.as_str() {
            "q" | "quit" => trainer.finish(),
            "h" | "history" => display_recent_history(&trainer.recent_history(config.history_window)),
            _ if line.starts_with("-x ") => match parse_classes(&line[3..]) {
                Ok(classes) => classes.into_iter().for_each(|c| trainer.toggle_discard(c)),
                Err(e) => display_error(&e.to_string()),
            },
            _ => {
                let classes = match parse_classes(&line) {
                    Ok(classes) => classes,
                    Err(e) => {
                        display_error(&e.to_string());
                        continue;
                    }
                };
                trainer.clear_selection();
                if let Err(e) = classes.into_iter().try_for_each(|c| trainer.toggle_selection(c)) {
                    trainer.clear_selection();
                    display_error(&e.to_string());
                    continue;
                }
                match trainer.submit_selection() {
                    Ok(outcome) => display_guess_outcome(&outcome, &current.champion.name),
                    Err(e) => display_error(&e.to_string()),
                }
            }
        }
    }

    display_class_summary(trainer.score(), trainer.total_attempted(), trainer.missed());
    Ok(())
}

fn parse_rating(input: &str) -> Option<Rating> {
    match input.to_lowercase().as_str() {
        "n" | "nailed" | "2" => Some(Rating::Nailed),
        "p" | "partial" | "1" => Some(Rating::Partial),
        "x" | "no" | "no_idea" | "0" => Some(Rating::NoIdea),
        _ => None,
    }
}

fn run_skills_trainer(
    catalog: &Catalog,
    filter: &FilterState,
    order: QueueOrder,
    store: &HistoryStore,
) -> Result<(), AppError> {
    let mut trainer = SkillsTrainer::new(rand::thread_rng());
    if let Err(e) = trainer.start(catalog, filter, order) {
        display_no_data(&e.to_string());
        return Ok(());
    }

    let total = trainer.progress().1;
    display_info(&format!(
        "Skills trainer: {} abilities ({:?}). Enter reveals, then rate n/p/x. 'q' finishes.",
        total,
        trainer.order()
    ));

    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} reviewed") {
        pb.set_style(style);
    }

    while let Some(item) = trainer.current().cloned() {
        let position = trainer.progress();
        let line = pb.suspend(|| {
            display_ability_prompt(&item, position);
            prompt("Recall it, then press Enter to reveal ('q' to finish):")
        })?;
        match line.as_deref() {
            None | Some("q") => {
                trainer.finish();
                break;
            }
            _ => trainer.reveal(),
        }

        let rating = loop {
            let answer = pb.suspend(|| {
                display_ability_reveal(&item.ability, &item.patch);
                prompt("How did you do? [n]ailed / [p]artial / [x] no idea:")
            })?;
            match answer.as_deref() {
                None | Some("q") => break None,
                Some(text) => match parse_rating(text) {
                    Some(rating) => break Some(rating),
                    None => display_error("Answer n, p or x"),
                },
            }
        };

        let Some(rating) = rating else {
            trainer.finish();
            break;
        };

        let record = trainer.submit_rating(rating)?;
        store.append(&[record])?;
        pb.inc(1);
    }

    pb.finish_and_clear();
    display_skills_summary(trainer.tally());
    Ok(())
}

fn show_progress(
    catalog: &Catalog,
    filter: &FilterState,
    champion: Option<&str>,
    store: &HistoryStore,
) -> Result<(), AppError> {
    let records = store.load();

    if let Some(wanted) = champion {
        let champion = catalog
            .find_champion(wanted)
            .ok_or_else(|| AppError::InvalidInput(format!("unknown champion '{}'", wanted)))?;

        let abilities: Vec<AbilityProgress> = ALL_SLOTS
            .iter()
            .map(|slot| AbilityProgress {
                slot: slot.letter(),
                name: catalog
                    .ability(&champion.id, *slot)
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| slot.to_string()),
                mastery: mastery_for(&records, Some(champion.id.as_str()), Some(*slot)),
                recent: recent_for_ability(&records, &champion.id, *slot, RECENT_PER_ABILITY),
            })
            .collect();

        display_champion_detail(
            &champion.name,
            &catalog.image_url(champion),
            mastery_for(&records, Some(champion.id.as_str()), None),
            abilities,
        );
        return Ok(());
    }

    let by_champion = records_by_champion(&records);
    let entries: Vec<DirectoryEntry> = filter
        .filter_champions(catalog)
        .into_iter()
        .map(|c| {
            let reviews = by_champion
                .get(c.champion.id.as_str())
                .map(|r| r.as_slice())
                .unwrap_or(&[]);
            DirectoryEntry {
                name: c.champion.name.clone(),
                classes: c.classes.clone(),
                reviews: reviews.len(),
                mastery: compute_mastery(reviews.iter().copied()),
            }
        })
        .collect();

    display_directory(entries);
    Ok(())
}

fn clear_history(store: &HistoryStore, yes: bool) -> Result<(), AppError> {
    let count = store.load().len();
    if count == 0 {
        display_info("History is already empty.");
        return Ok(());
    }

    if !yes {
        let answer = prompt(&format!(
            "Clear all {} review records? This cannot be undone. [y/N]",
            count
        ))?;
        let confirmed = matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes"));
        if !confirmed {
            display_info("Nothing cleared.");
            return Ok(());
        }
    }

    store.clear()?;
    display_success(&format!("Cleared {} review records", count));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_input_accepts_commas_and_spaces() {
        assert_eq!(
            parse_classes("burst, Assassin").unwrap(),
            vec![ChampionClass::Burst, ChampionClass::Assassin]
        );
        assert_eq!(parse_classes("warden").unwrap(), vec![ChampionClass::Warden]);
        assert!(parse_classes("burst mage").is_err());
    }

    #[test]
    fn rating_input_accepts_letters_and_points() {
        assert_eq!(parse_rating("N"), Some(Rating::Nailed));
        assert_eq!(parse_rating("1"), Some(Rating::Partial));
        assert_eq!(parse_rating("x"), Some(Rating::NoIdea));
        assert_eq!(parse_rating("maybe"), None);
    }

    #[test]
    fn filter_args_restrict_then_exclude() {
        let args = FilterArgs {
            only_class: vec![ChampionClass::Burst, ChampionClass::Assassin],
            skip_class: vec![ChampionClass::Assassin],
        };
        let filter = args.to_filter();
        assert_eq!(filter.enabled_classes(), vec![ChampionClass::Burst]);

        let filter = FilterArgs::default().to_filter();
        assert_eq!(filter.enabled_classes().len(), 13);
    }

    #[test]
    fn slot_argument_replaces_enabled_slots() {
        let mut filter = FilterState::new();
        apply_slots(&mut filter, "q, r").unwrap();
        assert_eq!(filter.enabled_slots(), vec![AbilitySlot::Q, AbilitySlot::R]);
        assert!(apply_slots(&mut filter, "QZ").is_err());

        apply_slots(&mut filter, "").unwrap();
        assert!(filter.is_empty());
    }
}
