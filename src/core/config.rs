//! Rule parameters.
//!
//! A `RuleConfig` is fixed when a game is created and travels with the
//! game state, so stored games keep the rules they started with.
//!
//! ```
//! use rps_skirmish::core::{DrawRule, RuleConfig, StartingPlayer};
//!
//! let rules = RuleConfig::default()
//!     .with_combat_pieces(6)
//!     .with_draw_rule(DrawRule::DefenderStays)
//!     .with_starting_player(StartingPlayer::Random);
//! assert_eq!(rules.setup_cells(), 8);
//! ```

use serde::{Deserialize, Serialize};

use super::PlayerId;
use crate::board::HomeLayout;
use crate::pieces::PieceKind;

/// Same-kind collision outcome.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawRule {
    /// Both pieces are removed.
    #[default]
    RemoveBoth,
    /// The attacker is removed and the defender keeps its cell.
    DefenderStays,
}

/// What happens to a trap once it fires.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrapRule {
    /// The marker is consumed.
    #[default]
    SingleUse,
    /// The marker stays and fires again.
    Reusable,
}

/// Who moves first once every player is ready.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartingPlayer {
    Fixed(PlayerId),
    /// Drawn from the game's seeded RNG.
    Random,
}

impl Default for StartingPlayer {
    fn default() -> Self {
        StartingPlayer::Fixed(PlayerId::new(0))
    }
}

/// Complete rule set for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Rock + Paper + Scissors each player deploys.
    pub combat_pieces: u32,

    /// Optional cap on any single combat kind.
    pub max_per_kind: Option<u32>,

    pub draw_rule: DrawRule,

    pub trap_rule: TrapRule,

    pub starting_player: StartingPlayer,

    pub home_layout: HomeLayout,

    /// Seed for the game's RNG.
    pub seed: u64,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            combat_pieces: 12,
            max_per_kind: None,
            draw_rule: DrawRule::default(),
            trap_rule: TrapRule::default(),
            starting_player: StartingPlayer::default(),
            home_layout: HomeLayout::default(),
            seed: 0,
        }
    }
}

impl RuleConfig {
    #[must_use]
    pub fn with_combat_pieces(mut self, count: u32) -> Self {
        self.combat_pieces = count;
        self
    }

    #[must_use]
    pub fn with_max_per_kind(mut self, cap: u32) -> Self {
        self.max_per_kind = Some(cap);
        self
    }

    #[must_use]
    pub fn with_draw_rule(mut self, rule: DrawRule) -> Self {
        self.draw_rule = rule;
        self
    }

    #[must_use]
    pub fn with_trap_rule(mut self, rule: TrapRule) -> Self {
        self.trap_rule = rule;
        self
    }

    #[must_use]
    pub fn with_starting_player(mut self, policy: StartingPlayer) -> Self {
        self.starting_player = policy;
        self
    }

    #[must_use]
    pub fn with_home_layout(mut self, layout: HomeLayout) -> Self {
        self.home_layout = layout;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cells a home region needs: every combat piece plus flag and trap.
    #[must_use]
    pub fn setup_cells(&self) -> usize {
        self.combat_pieces as usize + PieceKind::MARKERS.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules = RuleConfig::default();

        assert_eq!(rules.combat_pieces, 12);
        assert_eq!(rules.max_per_kind, None);
        assert_eq!(rules.draw_rule, DrawRule::RemoveBoth);
        assert_eq!(rules.trap_rule, TrapRule::SingleUse);
        assert_eq!(rules.starting_player, StartingPlayer::Fixed(PlayerId::new(0)));
        assert_eq!(rules.home_layout, HomeLayout::Bands { depth: 2 });
        assert_eq!(rules.setup_cells(), 14);
    }

    #[test]
    fn test_builder() {
        let rules = RuleConfig::default()
            .with_combat_pieces(3)
            .with_max_per_kind(1)
            .with_trap_rule(TrapRule::Reusable)
            .with_starting_player(StartingPlayer::Fixed(PlayerId::new(1)))
            .with_seed(99);

        assert_eq!(rules.combat_pieces, 3);
        assert_eq!(rules.max_per_kind, Some(1));
        assert_eq!(rules.trap_rule, TrapRule::Reusable);
        assert_eq!(rules.seed, 99);
    }

    #[test]
    fn test_serde() {
        let rules = RuleConfig::default().with_draw_rule(DrawRule::DefenderStays);
        let json = serde_json::to_string(&rules).unwrap();
        let back: RuleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(rules, back);
    }
}
