use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Riot's champion subclasses. Every champion maps to one or two of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChampionClass {
    Enchanter,
    Catcher,
    Juggernaut,
    Diver,
    Burst,
    Battlemage,
    Artillery,
    Marksman,
    Assassin,
    Skirmisher,
    Vanguard,
    Warden,
    Specialist,
}

/// Parent categories the subclasses are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClassGroup {
    Controller,
    Fighter,
    Mage,
    Marksman,
    Slayer,
    Tank,
    Specialist,
}

pub const ALL_CLASSES: [ChampionClass; 13] = [
    ChampionClass::Enchanter,
    ChampionClass::Catcher,
    ChampionClass::Juggernaut,
    ChampionClass::Diver,
    ChampionClass::Burst,
    ChampionClass::Battlemage,
    ChampionClass::Artillery,
    ChampionClass::Marksman,
    ChampionClass::Assassin,
    ChampionClass::Skirmisher,
    ChampionClass::Vanguard,
    ChampionClass::Warden,
    ChampionClass::Specialist,
];

pub const ALL_GROUPS: [ClassGroup; 7] = [
    ClassGroup::Controller,
    ClassGroup::Fighter,
    ClassGroup::Mage,
    ClassGroup::Marksman,
    ClassGroup::Slayer,
    ClassGroup::Tank,
    ClassGroup::Specialist,
];

impl ChampionClass {
    /// Class used for champions the class map does not cover.
    pub const FALLBACK: ChampionClass = ChampionClass::Specialist;

    pub fn group(self) -> ClassGroup {
        match self {
            Self::Enchanter | Self::Catcher => ClassGroup::Controller,
            Self::Juggernaut | Self::Diver => ClassGroup::Fighter,
            Self::Burst | Self::Battlemage | Self::Artillery => ClassGroup::Mage,
            Self::Marksman => ClassGroup::Marksman,
            Self::Assassin | Self::Skirmisher => ClassGroup::Slayer,
            Self::Vanguard | Self::Warden => ClassGroup::Tank,
            Self::Specialist => ClassGroup::Specialist,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Enchanter => "Enchanter",
            Self::Catcher => "Catcher",
            Self::Juggernaut => "Juggernaut",
            Self::Diver => "Diver",
            Self::Burst => "Burst",
            Self::Battlemage => "Battlemage",
            Self::Artillery => "Artillery",
            Self::Marksman => "Marksman",
            Self::Assassin => "Assassin",
            Self::Skirmisher => "Skirmisher",
            Self::Vanguard => "Vanguard",
            Self::Warden => "Warden",
            Self::Specialist => "Specialist",
        }
    }
}

impl ClassGroup {
    pub fn name(self) -> &'static str {
        match self {
            Self::Controller => "Controller",
            Self::Fighter => "Fighter",
            Self::Mage => "Mage",
            Self::Marksman => "Marksman",
            Self::Slayer => "Slayer",
            Self::Tank => "Tank",
            Self::Specialist => "Specialist",
        }
    }

    pub fn subclasses(self) -> Vec<ChampionClass> {
        ALL_CLASSES
            .iter()
            .copied()
            .filter(|c| c.group() == self)
            .collect()
    }
}

impl fmt::Display for ChampionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChampionClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ALL_CLASSES
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown champion class '{}'", wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_class_belongs_to_exactly_one_group() {
        let total: usize = ALL_GROUPS.iter().map(|g| g.subclasses().len()).sum();
        assert_eq!(total, ALL_CLASSES.len());
        assert_eq!(
            ClassGroup::Mage.subclasses(),
            vec![ChampionClass::Burst, ChampionClass::Battlemage, ChampionClass::Artillery]
        );
    }

    #[test]
    fn parsing_ignores_case_and_rejects_unknown_tags() {
        assert_eq!("vanguard".parse::<ChampionClass>(), Ok(ChampionClass::Vanguard));
        assert_eq!(" Burst ".parse::<ChampionClass>(), Ok(ChampionClass::Burst));
        assert!("Mage".parse::<ChampionClass>().is_err());
    }
}
