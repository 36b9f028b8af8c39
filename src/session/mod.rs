pub mod class_trainer;
pub mod evaluator;
pub mod filter;
pub mod queue;
pub mod skills_trainer;

/// Lifecycle shared by both trainers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Finished,
}
