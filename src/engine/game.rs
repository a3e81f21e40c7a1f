//! The game engine: one intent in, one successor state and its events out.

use tracing::{debug, info, instrument};

use super::event::{Events, GameEvent};
use super::intent::Intent;
use crate::board::{Board, Position};
use crate::core::{
    GameError, GameId, GameState, MoveRecord, Phase, PhaseError, PlayerId, RuleConfig, StartingPlayer,
    StructuralError, TrapRule, ValidationError,
};
use crate::rules::combat::{resolve_encounter, Encounter};
use crate::rules::{movement, setup};

/// Result of an accepted intent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: GameState,
    pub events: Events,
}

impl Transition {
    fn single(state: GameState, event: GameEvent) -> Self {
        let mut events = Events::new();
        events.push(event);
        Self { state, events }
    }
}

/// Stateless rules engine.
///
/// Holds only the rule set used for new games. Each game carries its own
/// copy of the rules, so `apply` follows the rules a game was created with.
///
/// `apply` never mutates its input: a rejected intent leaves the caller's
/// state exactly as it was, and the same state plus the same intent always
/// yields the same transition. Hosts must still serialise intents per game
/// (one writer per version); the engine has no shared state of its own.
///
/// ```
/// use rps_skirmish::core::{Phase, PlayerId, RuleConfig};
/// use rps_skirmish::engine::{GameEngine, Intent};
///
/// let engine = GameEngine::new(RuleConfig::default());
/// let state = engine.create_game("demo", 2, None).unwrap();
/// assert_eq!(state.phase(), Phase::Setup);
///
/// let err = engine
///     .apply(&state, &Intent::MarkReady { player: PlayerId::new(0) })
///     .unwrap_err();
/// assert!(err.is_recoverable());
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameEngine {
    rules: RuleConfig,
}

impl GameEngine {
    #[must_use]
    pub fn new(rules: RuleConfig) -> Self {
        Self { rules }
    }

    /// Rules applied to games this engine creates.
    #[must_use]
    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    /// Open a table in `Setup` with an empty board.
    pub fn create_game(
        &self,
        id: impl Into<GameId>,
        player_count: usize,
        password: Option<String>,
    ) -> Result<GameState, GameError> {
        let id = id.into();
        let board = Board::new(player_count)?;

        if self.rules.combat_pieces == 0 {
            return Err(StructuralError::InvalidRules("combat_pieces must be at least 1".into()).into());
        }
        if let StartingPlayer::Fixed(first) = self.rules.starting_player {
            if first.index() >= player_count {
                return Err(StructuralError::InvalidRules(format!(
                    "starting player {first} is not seated at a {player_count}-player table"
                ))
                .into());
            }
        }

        let homes = self
            .rules
            .home_layout
            .resolve(&board, player_count, self.rules.setup_cells())?;

        info!(game = %id, player_count, shape = ?board.shape(), "game created");
        Ok(GameState::new(id, board, homes, self.rules.clone(), password))
    }

    /// Apply one intent.
    #[instrument(level = "debug", skip(self, state, intent), fields(game = %state.id(), intent = intent.name()))]
    pub fn apply(&self, state: &GameState, intent: &Intent) -> Result<Transition, GameError> {
        let result = self.dispatch(state, intent);
        match &result {
            Ok(transition) => debug!(events = transition.events.len(), "intent accepted"),
            Err(err) => debug!(error = %err, "intent rejected"),
        }
        result
    }

    fn dispatch(&self, state: &GameState, intent: &Intent) -> Result<Transition, GameError> {
        match (state.phase(), intent) {
            (Phase::Setup, Intent::PlacePiece { player, at, kind }) => {
                let (next, event) = setup::place_piece(state, *player, *at, *kind)?;
                Ok(Transition::single(next, event))
            }
            (Phase::Setup, Intent::MarkReady { player }) => {
                let (next, event) = setup::mark_ready(state, *player)?;
                Ok(Transition::single(next, event))
            }
            (Phase::Setup, Intent::StartGame) => {
                let (next, event) = setup::start_game(state)?;
                Ok(Transition::single(next, event))
            }
            (Phase::Playing, Intent::MoveCharacter { player, from, to }) => {
                self.move_character(state, *player, *from, *to)
            }
            (Phase::Playing, Intent::Forfeit { player }) => self.forfeit(state, *player),
            (phase, intent) => Err(PhaseError::IllegalIntentForPhase {
                intent: intent.name(),
                phase,
            }
            .into()),
        }
    }

    fn move_character(
        &self,
        state: &GameState,
        player: PlayerId,
        from: Position,
        to: Position,
    ) -> Result<Transition, GameError> {
        if !state.players().contains(player) {
            return Err(ValidationError::UnknownPlayer { player }.into());
        }
        if state.current_player() != player {
            return Err(PhaseError::NotYourTurn { player }.into());
        }
        movement::check_move(state.board(), from, to, player)?;

        let (mover, target) = match (state.board().occupant(from), state.board().cell(to)) {
            (Some(mover), Some(target)) => (mover.clone(), target.clone()),
            _ => return Err(ValidationError::NotYourPiece { player, pos: from }.into()),
        };

        let mut next = state.clone();
        let mut events = Events::new();

        match resolve_encounter(&mover, &target) {
            Encounter::Advance => {
                next.board.relocate(from, to);
                events.push(GameEvent::Moved { player, piece: mover.id, from, to });
            }
            Encounter::FlagCapture { owner } => {
                if let Some(displaced) = next.board.relocate(from, to) {
                    events.push(GameEvent::Captured {
                        piece: displaced.id,
                        loser: displaced.owner,
                        kind: displaced.kind,
                        at: to,
                    });
                }
                next.board.set_marker(to, None);
                events.push(GameEvent::Moved { player, piece: mover.id, from, to });
                events.push(GameEvent::FlagCaptured { at: to, winner: player, loser: owner });
                next.history.push_back(MoveRecord { player, from, to, turn: next.turn_number });
                end_game(&mut next, player, &mut events);
                return Ok(Transition { state: next, events });
            }
            Encounter::Trap { owner } => {
                next.board.take_piece(from);
                let consumed = next.rules.trap_rule == TrapRule::SingleUse;
                if consumed {
                    next.board.set_marker(to, None);
                }
                events.push(GameEvent::TrapTriggered {
                    at: to,
                    owner,
                    victim: player,
                    piece: mover.id,
                    consumed,
                });
            }
            Encounter::Combat { defender, outcome } => {
                let Some(defending) = target.occupant.as_ref() else {
                    return Err(ValidationError::NotYourPiece { player, pos: from }.into());
                };
                for (piece, at) in [(&mover, from), (defending, to)] {
                    if !piece.revealed {
                        next.board.reveal(at);
                        events.push(GameEvent::Revealed {
                            piece: piece.id,
                            owner: piece.owner,
                            kind: piece.kind,
                            at,
                        });
                    }
                }

                let casualties = outcome.casualties(next.rules.draw_rule);
                if casualties.defender {
                    next.board.take_piece(to);
                    events.push(GameEvent::Captured {
                        piece: defending.id,
                        loser: defender,
                        kind: defending.kind,
                        at: to,
                    });
                }
                if casualties.attacker {
                    next.board.take_piece(from);
                    events.push(GameEvent::Captured {
                        piece: mover.id,
                        loser: player,
                        kind: mover.kind,
                        at: from,
                    });
                } else {
                    next.board.relocate(from, to);
                    events.push(GameEvent::Moved { player, piece: mover.id, from, to });
                }
            }
            Encounter::Blocked => return Err(ValidationError::FriendlyOccupied { pos: to }.into()),
        }

        next.history.push_back(MoveRecord { player, from, to, turn: next.turn_number });
        settle_eliminations(&mut next, player, &mut events);
        if !next.is_ended() {
            advance_turn(&mut next);
        }
        Ok(Transition { state: next, events })
    }

    fn forfeit(&self, state: &GameState, player: PlayerId) -> Result<Transition, GameError> {
        if !state.players().contains(player) {
            return Err(ValidationError::UnknownPlayer { player }.into());
        }
        if !state.is_active(player) {
            return Err(PhaseError::Eliminated { player }.into());
        }

        let mut next = state.clone();
        let mut events = Events::new();
        eliminate(&mut next, player, &mut events);

        let active = next.active_players();
        if let [winner] = active.as_slice() {
            end_game(&mut next, *winner, &mut events);
        } else if next.current_player == player {
            pass_turn(&mut next);
        }
        Ok(Transition { state: next, events })
    }
}

/// Remove every active player who has lost their flag or cannot move, then
/// end the game if a single player is left.
///
/// Beaten players are collected in one pass before anyone is removed.
/// Elimination only ever frees cells, so removing one player can never strand
/// another. When the pass would empty the table, as when a same-kind draw
/// takes both last pieces, the mover stays seated and wins.
fn settle_eliminations(state: &mut GameState, mover: PlayerId, events: &mut Events) {
    let active = state.active_players();
    if active.len() <= 1 {
        return;
    }
    let mut beaten: Vec<PlayerId> = active
        .iter()
        .copied()
        .filter(|&p| state.flag_position(p).is_none() || !movement::has_legal_move(state.board(), p))
        .collect();
    if beaten.len() == active.len() {
        beaten.retain(|&p| p != mover);
    }
    for player in beaten {
        eliminate(state, player, events);
    }

    if let [winner] = state.active_players().as_slice() {
        end_game(state, *winner, events);
    }
}

fn eliminate(state: &mut GameState, player: PlayerId, events: &mut Events) {
    let removed = state.board.clear_player(player);
    if let Some(slot) = state.slot_mut(player) {
        slot.eliminated = true;
    }
    info!(game = %state.id(), %player, removed, "player eliminated");
    events.push(GameEvent::PlayerEliminated { player });
}

fn end_game(state: &mut GameState, winner: PlayerId, events: &mut Events) {
    state.phase = Phase::Ended;
    state.winner = Some(winner);
    info!(game = %state.id(), %winner, turn = state.turn_number, "game ended");
    events.push(GameEvent::GameEnded { winner });
}

/// Hand the turn to the next active seat without counting a move.
fn pass_turn(state: &mut GameState) {
    if let Some(next) = state.players.next_matching(state.current_player, |slot| !slot.eliminated) {
        state.current_player = next;
    }
}

fn advance_turn(state: &mut GameState) {
    pass_turn(state);
    state.turn_number += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::HomeLayout;
    use crate::core::DrawRule;
    use crate::pieces::PieceKind;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn pos(row: u16, col: u16) -> Position {
        Position::new(row, col)
    }

    fn run(engine: &GameEngine, state: GameState, intents: &[Intent]) -> GameState {
        intents
            .iter()
            .fold(state, |s, intent| engine.apply(&s, intent).unwrap().state)
    }

    fn place(player: PlayerId, at: Position, kind: PieceKind) -> Intent {
        Intent::PlacePiece { player, at, kind }
    }

    fn mv(player: PlayerId, from: Position, to: Position) -> Intent {
        Intent::MoveCharacter { player, from, to }
    }

    /// One combat piece each: P0 Rock at (1, 3), P1 Scissors at (6, 3).
    fn duel(rules: RuleConfig) -> (GameEngine, GameState) {
        let engine = GameEngine::new(rules.with_combat_pieces(1));
        let state = engine.create_game("duel", 2, None).unwrap();
        let state = run(
            &engine,
            state,
            &[
                place(P0, pos(0, 0), PieceKind::Flag),
                place(P0, pos(0, 7), PieceKind::Trap),
                place(P0, pos(1, 3), PieceKind::Rock),
                place(P1, pos(7, 7), PieceKind::Flag),
                place(P1, pos(7, 0), PieceKind::Trap),
                place(P1, pos(6, 3), PieceKind::Scissors),
                Intent::MarkReady { player: P0 },
                Intent::MarkReady { player: P1 },
                Intent::StartGame,
            ],
        );
        (engine, state)
    }

    #[test]
    fn test_create_game_validation() {
        let engine = GameEngine::default();
        assert_eq!(
            engine.create_game("x", 1, None).unwrap_err(),
            StructuralError::InvalidPlayerCount(1).into()
        );
        assert!(matches!(
            GameEngine::new(RuleConfig::default().with_combat_pieces(0)).create_game("x", 2, None),
            Err(GameError::Structural(StructuralError::InvalidRules(_)))
        ));
        assert!(matches!(
            GameEngine::new(RuleConfig::default().with_starting_player(StartingPlayer::Fixed(PlayerId::new(2))))
                .create_game("x", 2, None),
            Err(GameError::Structural(StructuralError::InvalidRules(_)))
        ));
        assert!(matches!(
            engine.create_game("x", 3, None),
            Err(GameError::Structural(StructuralError::HomeRegionTooSmall { .. }))
        ));
    }

    #[test]
    fn test_create_game_intent_is_rejected() {
        let engine = GameEngine::default();
        let state = engine.create_game("x", 2, Some("pw".into())).unwrap();
        let intent = Intent::CreateGame { player_count: 2, password: None };

        assert_eq!(
            engine.apply(&state, &intent).unwrap_err(),
            PhaseError::IllegalIntentForPhase { intent: "CreateGame", phase: Phase::Setup }.into()
        );
        assert!(state.requires_password());
    }

    #[test]
    fn test_move_before_start_is_illegal() {
        let engine = GameEngine::default();
        let state = engine.create_game("x", 2, None).unwrap();

        assert_eq!(
            engine.apply(&state, &mv(P0, pos(1, 0), pos(2, 0))).unwrap_err(),
            PhaseError::IllegalIntentForPhase { intent: "MoveCharacter", phase: Phase::Setup }.into()
        );
    }

    #[test]
    fn test_simple_advance_rotates_turn() {
        let (engine, state) = duel(RuleConfig::default());
        assert_eq!(state.current_player(), P0);

        let t = engine.apply(&state, &mv(P0, pos(1, 3), pos(2, 3))).unwrap();
        assert_eq!(
            t.events.as_slice(),
            &[GameEvent::Moved { player: P0, piece: crate::pieces::PieceId(0), from: pos(1, 3), to: pos(2, 3) }]
        );
        assert_eq!(t.state.current_player(), P1);
        assert_eq!(t.state.turn_number(), 2);
        assert_eq!(t.state.history().len(), 1);
        assert!(t.state.check_invariants().is_ok());
    }

    #[test]
    fn test_not_your_turn() {
        let (engine, state) = duel(RuleConfig::default());
        assert_eq!(
            engine.apply(&state, &mv(P1, pos(6, 3), pos(5, 3))).unwrap_err(),
            PhaseError::NotYourTurn { player: P1 }.into()
        );
    }

    #[test]
    fn test_draw_removes_both_by_default() {
        let engine = GameEngine::new(RuleConfig::default().with_combat_pieces(2));
        let state = engine.create_game("draw", 2, None).unwrap();
        let state = run(
            &engine,
            state,
            &[
                place(P0, pos(0, 0), PieceKind::Flag),
                place(P0, pos(0, 1), PieceKind::Trap),
                place(P0, pos(1, 3), PieceKind::Rock),
                place(P0, pos(1, 6), PieceKind::Paper),
                place(P1, pos(7, 0), PieceKind::Flag),
                place(P1, pos(7, 1), PieceKind::Trap),
                place(P1, pos(6, 3), PieceKind::Rock),
                place(P1, pos(6, 6), PieceKind::Paper),
                Intent::MarkReady { player: P0 },
                Intent::MarkReady { player: P1 },
                Intent::StartGame,
                mv(P0, pos(1, 3), pos(2, 3)),
                mv(P1, pos(6, 3), pos(5, 3)),
                mv(P0, pos(2, 3), pos(3, 3)),
                mv(P1, pos(5, 3), pos(4, 3)),
            ],
        );

        let t = engine.apply(&state, &mv(P0, pos(3, 3), pos(4, 3))).unwrap();
        assert!(t.state.board().occupant(pos(3, 3)).is_none());
        assert!(t.state.board().occupant(pos(4, 3)).is_none());
        let captured = t
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Captured { .. }))
            .count();
        assert_eq!(captured, 2);
        assert_eq!(t.state.pieces_remaining(P0), 1);
        assert_eq!(t.state.pieces_remaining(P1), 1);
    }

    #[test]
    fn test_draw_defender_stays() {
        let engine = GameEngine::new(
            RuleConfig::default()
                .with_combat_pieces(2)
                .with_draw_rule(DrawRule::DefenderStays),
        );
        let state = engine.create_game("draw", 2, None).unwrap();
        let state = run(
            &engine,
            state,
            &[
                place(P0, pos(0, 0), PieceKind::Flag),
                place(P0, pos(0, 1), PieceKind::Trap),
                place(P0, pos(1, 3), PieceKind::Rock),
                place(P0, pos(1, 6), PieceKind::Paper),
                place(P1, pos(7, 0), PieceKind::Flag),
                place(P1, pos(7, 1), PieceKind::Trap),
                place(P1, pos(6, 3), PieceKind::Rock),
                place(P1, pos(6, 6), PieceKind::Paper),
                Intent::MarkReady { player: P0 },
                Intent::MarkReady { player: P1 },
                Intent::StartGame,
                mv(P0, pos(1, 3), pos(2, 3)),
                mv(P1, pos(6, 3), pos(5, 3)),
                mv(P0, pos(2, 3), pos(3, 3)),
                mv(P1, pos(5, 3), pos(4, 3)),
            ],
        );

        let t = engine.apply(&state, &mv(P0, pos(3, 3), pos(4, 3))).unwrap();
        assert!(t.state.board().occupant(pos(3, 3)).is_none());
        let survivor = t.state.board().occupant(pos(4, 3)).unwrap();
        assert_eq!(survivor.owner, P1);
        assert!(survivor.revealed);
    }

    #[test]
    fn test_losing_last_mover_ends_game() {
        let (engine, state) = duel(RuleConfig::default());
        // Walk P0's rock into P1's scissors: rock wins, P1 has nothing left to move.
        let state = run(
            &engine,
            state,
            &[
                mv(P0, pos(1, 3), pos(2, 3)),
                mv(P1, pos(6, 3), pos(5, 3)),
                mv(P0, pos(2, 3), pos(3, 3)),
                mv(P1, pos(5, 3), pos(4, 3)),
            ],
        );

        let t = engine.apply(&state, &mv(P0, pos(3, 3), pos(4, 3))).unwrap();
        assert_eq!(t.state.phase(), Phase::Ended);
        assert_eq!(t.state.winner(), Some(P0));
        assert!(t.events.contains(&GameEvent::PlayerEliminated { player: P1 }));
        assert_eq!(t.events.last(), Some(&GameEvent::GameEnded { winner: P0 }));
        assert!(t.state.check_invariants().is_ok());

        assert_eq!(
            engine.apply(&t.state, &mv(P0, pos(4, 3), pos(5, 3))).unwrap_err(),
            PhaseError::IllegalIntentForPhase { intent: "MoveCharacter", phase: Phase::Ended }.into()
        );
    }

    /// Two lone rocks: P0 at (1, 3), P1 at (6, `col`).
    fn rock_duel(col: u16) -> (GameEngine, GameState) {
        let engine = GameEngine::new(RuleConfig::default().with_combat_pieces(1));
        let state = engine.create_game("rocks", 2, None).unwrap();
        let state = run(
            &engine,
            state,
            &[
                place(P0, pos(0, 0), PieceKind::Flag),
                place(P0, pos(0, 7), PieceKind::Trap),
                place(P0, pos(1, 3), PieceKind::Rock),
                place(P1, pos(7, 7), PieceKind::Flag),
                place(P1, pos(7, 0), PieceKind::Trap),
                place(P1, pos(6, col), PieceKind::Rock),
                Intent::MarkReady { player: P0 },
                Intent::MarkReady { player: P1 },
                Intent::StartGame,
            ],
        );
        (engine, state)
    }

    #[test]
    fn test_mutual_wipeout_goes_to_mover() {
        // P0 attacks.
        let (engine, state) = rock_duel(3);
        let state = run(
            &engine,
            state,
            &[
                mv(P0, pos(1, 3), pos(2, 3)),
                mv(P1, pos(6, 3), pos(5, 3)),
                mv(P0, pos(2, 3), pos(3, 3)),
                mv(P1, pos(5, 3), pos(4, 3)),
            ],
        );
        let t = engine.apply(&state, &mv(P0, pos(3, 3), pos(4, 3))).unwrap();
        assert_eq!(t.state.board().pieces().count(), 0);
        assert_eq!(t.state.winner(), Some(P0));
        assert!(t.events.contains(&GameEvent::PlayerEliminated { player: P1 }));
        assert!(!t.events.contains(&GameEvent::PlayerEliminated { player: P0 }));
        assert_eq!(t.events.last(), Some(&GameEvent::GameEnded { winner: P0 }));
        assert!(t.state.check_invariants().is_ok());

        // P1 attacks.
        let (engine, state) = rock_duel(4);
        let state = run(
            &engine,
            state,
            &[
                mv(P0, pos(1, 3), pos(2, 3)),
                mv(P1, pos(6, 4), pos(5, 4)),
                mv(P0, pos(2, 3), pos(3, 3)),
                mv(P1, pos(5, 4), pos(4, 4)),
                mv(P0, pos(3, 3), pos(3, 4)),
            ],
        );
        let t = engine.apply(&state, &mv(P1, pos(4, 4), pos(3, 4))).unwrap();
        assert_eq!(t.state.board().pieces().count(), 0);
        assert_eq!(t.state.winner(), Some(P1));
        assert!(t.events.contains(&GameEvent::PlayerEliminated { player: P0 }));
        assert!(!t.events.contains(&GameEvent::PlayerEliminated { player: P1 }));
        assert_eq!(t.events.last(), Some(&GameEvent::GameEnded { winner: P1 }));
        assert!(t.state.check_invariants().is_ok());
    }

    #[test]
    fn test_reusable_trap_stays() {
        let (engine, state) = duel(RuleConfig::default().with_trap_rule(TrapRule::Reusable));
        // P0 walks down column 0 towards P1's trap at (7, 0) while P1 shuffles.
        let path = [(1, 3), (1, 2), (1, 1), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)];
        let mut intents = Vec::new();
        for (i, step) in path.windows(2).enumerate() {
            intents.push(mv(P0, pos(step[0].0, step[0].1), pos(step[1].0, step[1].1)));
            let (a, b) = if i % 2 == 0 { (3, 4) } else { (4, 3) };
            intents.push(mv(P1, pos(6, a), pos(6, b)));
        }
        let state = run(&engine, state, &intents);

        let t = engine.apply(&state, &mv(P0, pos(6, 0), pos(7, 0))).unwrap();
        assert!(t.state.board().cell(pos(7, 0)).unwrap().is_trap());
        assert!(t.events.contains(&GameEvent::TrapTriggered {
            at: pos(7, 0),
            owner: P1,
            victim: P0,
            piece: crate::pieces::PieceId(0),
            consumed: false,
        }));
        // P0 lost its only piece.
        assert_eq!(t.state.winner(), Some(P1));
        assert!(t.state.check_invariants().is_ok());
    }

    #[test]
    fn test_forfeit() {
        let engine = GameEngine::new(
            RuleConfig::default()
                .with_combat_pieces(1)
                .with_home_layout(HomeLayout::Bands { depth: 2 }),
        );
        let state = engine.create_game("ff", 4, None).unwrap();
        let mut intents = Vec::new();
        for (seat, row) in [(0u8, 0u16), (1, 2), (2, 4), (3, 6)] {
            let p = PlayerId::new(seat);
            intents.push(place(p, pos(row, 0), PieceKind::Flag));
            intents.push(place(p, pos(row, 1), PieceKind::Trap));
            intents.push(place(p, pos(row + 1, 5), PieceKind::Rock));
        }
        for seat in 0..4 {
            intents.push(Intent::MarkReady { player: PlayerId::new(seat) });
        }
        intents.push(Intent::StartGame);
        let state = run(&engine, state, &intents);

        // Current player forfeits: turn passes on.
        let t = engine.apply(&state, &Intent::Forfeit { player: P0 }).unwrap();
        assert_eq!(t.events.as_slice(), &[GameEvent::PlayerEliminated { player: P0 }]);
        assert_eq!(t.state.current_player(), P1);
        assert_eq!(t.state.turn_number(), state.turn_number());
        assert_eq!(t.state.pieces_remaining(P0), 0);
        assert!(t.state.flag_position(P0).is_none());
        assert!(t.state.check_invariants().is_ok());

        assert_eq!(
            engine.apply(&t.state, &Intent::Forfeit { player: P0 }).unwrap_err(),
            PhaseError::Eliminated { player: P0 }.into()
        );

        // Off-turn forfeits until one player remains.
        let t = engine.apply(&t.state, &Intent::Forfeit { player: PlayerId::new(3) }).unwrap();
        assert_eq!(t.state.current_player(), P1);
        let t = engine.apply(&t.state, &Intent::Forfeit { player: P1 }).unwrap();
        assert_eq!(t.state.winner(), Some(PlayerId::new(2)));
        assert_eq!(t.events.last(), Some(&GameEvent::GameEnded { winner: PlayerId::new(2) }));
    }
}
