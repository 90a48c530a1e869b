//! Turn-based game controller.
//!
//! A [`Game`] owns the position, tracks whose turn it is and drives the
//! status machine `NotStarted → Active → {Checkmate | Stalemate}`. Callers
//! submit moves, ask the bound AI to move and read [`GameSnapshot`]s.

use chess_ai::{AiAgent, Difficulty};
use chess_core::{Color, Move, Square};
use chess_engine::{is_king_attacked, legal_destinations, outcome, Outcome, Position};
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::error::{GameError, SnapshotError};
use crate::snapshot::{GameSnapshot, Players};
use crate::status::{GameMode, GameStatus};

/// Parameters for [`Game::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSettings {
    pub mode: GameMode,
    /// Required for [`GameMode::HumanVsAi`].
    pub difficulty: Option<Difficulty>,
    pub white: String,
    pub black: String,
    /// Side the AI plays in [`GameMode::HumanVsAi`].
    pub ai_color: Color,
}

impl GameSettings {
    pub fn human_vs_human(white: impl Into<String>, black: impl Into<String>) -> Self {
        GameSettings {
            mode: GameMode::HumanVsHuman,
            difficulty: None,
            white: white.into(),
            black: black.into(),
            ai_color: Color::Black,
        }
    }

    pub fn human_vs_ai(
        difficulty: Difficulty,
        white: impl Into<String>,
        black: impl Into<String>,
    ) -> Self {
        GameSettings {
            mode: GameMode::HumanVsAi,
            difficulty: Some(difficulty),
            white: white.into(),
            black: black.into(),
            ai_color: Color::Black,
        }
    }

    pub fn with_ai_color(mut self, color: Color) -> Self {
        self.ai_color = color;
        self
    }
}

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReport {
    pub mv: Move,
    pub message: String,
    pub status: GameStatus,
}

/// Search knobs applied to every agent the game binds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AgentTuning {
    seed: Option<u64>,
    node_limit: Option<u64>,
}

/// A single chess game between two players, one of which may be the AI.
#[derive(Debug, Clone)]
pub struct Game {
    /// `None` until the game is started.
    position: Option<Position>,
    turn: Color,
    status: GameStatus,
    winner: Option<Color>,
    mode: Option<GameMode>,
    difficulty: Option<Difficulty>,
    players: Players,
    agent: Option<AiAgent>,
    tuning: AgentTuning,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game that has not been started.
    pub fn new() -> Self {
        Game {
            position: None,
            turn: Color::White,
            status: GameStatus::NotStarted,
            winner: None,
            mode: None,
            difficulty: None,
            players: Players::default(),
            agent: None,
            tuning: AgentTuning::default(),
        }
    }

    /// Creates an unstarted game whose agents use the configured seed and
    /// node limit.
    pub fn with_config(config: &GameConfig) -> Self {
        Game {
            tuning: AgentTuning {
                seed: config.ai.seed,
                node_limit: config.ai.node_limit,
            },
            ..Self::new()
        }
    }

    /// Starts a fresh game from the standard setup with White to move.
    ///
    /// # Errors
    ///
    /// [`GameError::MissingDifficulty`] for an AI game without a difficulty.
    /// The current game is left untouched in that case.
    pub fn start(&mut self, settings: GameSettings) -> Result<(), GameError> {
        let agent = match (settings.mode, settings.difficulty) {
            (GameMode::HumanVsAi, None) => return Err(GameError::MissingDifficulty),
            (GameMode::HumanVsAi, Some(difficulty)) => {
                Some(self.bind_agent(difficulty, settings.ai_color))
            }
            (GameMode::HumanVsHuman, _) => None,
        };

        info!(
            white = %settings.white,
            black = %settings.black,
            mode = %settings.mode,
            difficulty = ?settings.difficulty,
            "game started"
        );

        self.position = Some(Position::standard());
        self.turn = Color::White;
        self.status = GameStatus::Active;
        self.winner = None;
        self.mode = Some(settings.mode);
        self.difficulty = settings.difficulty;
        self.players = Players {
            white: settings.white,
            black: settings.black,
        };
        self.agent = agent;
        Ok(())
    }

    fn bind_agent(&self, difficulty: Difficulty, color: Color) -> AiAgent {
        let mut agent = AiAgent::new(difficulty, color);
        if let Some(seed) = self.tuning.seed {
            agent = agent.with_seed(seed);
        }
        if let Some(limit) = self.tuning.node_limit {
            agent = agent.with_node_limit(limit);
        }
        agent
    }

    /// Plays `from → to` for the side to move.
    ///
    /// On success the opponent's position is checked for mate or stalemate.
    /// If the game goes on, the turn passes and the new position is recorded
    /// for repetition tracking.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<MoveReport, GameError> {
        let status = self.status;
        let position = match (&mut self.position, status) {
            (Some(position), GameStatus::Active) => position,
            _ => return Err(GameError::NotActive { status }),
        };

        let piece = position.piece_at(from).ok_or(GameError::NoPiece)?;
        if piece.color() != self.turn {
            return Err(GameError::WrongTurn {
                turn: self.turn,
                color: piece.color(),
            });
        }

        let mv = position.try_move(from, to)?;
        let opponent = self.turn.opposite();
        let message = match outcome(position, opponent) {
            Some(Outcome::Checkmate { winner }) => {
                self.status = GameStatus::Checkmate;
                self.winner = Some(winner);
                let name = match winner {
                    Color::White => &self.players.white,
                    Color::Black => &self.players.black,
                };
                info!(%winner, %mv, "checkmate");
                format!("Checkmate! {} wins.", name)
            }
            Some(Outcome::Stalemate) => {
                self.status = GameStatus::Stalemate;
                info!(%mv, "stalemate");
                "Stalemate.".to_string()
            }
            None => {
                self.turn = opponent;
                position.record_position(opponent);
                "Move successful.".to_string()
            }
        };

        Ok(MoveReport {
            mv,
            message,
            status: self.status,
        })
    }

    /// Like [`submit_move`](Game::submit_move) with algebraic squares.
    ///
    /// Notation is validated before anything else is looked at.
    pub fn submit_move_algebraic(&mut self, from: &str, to: &str) -> Result<MoveReport, GameError> {
        let from = parse_square(from)?;
        let to = parse_square(to)?;
        self.submit_move(from, to)
    }

    /// Lets the AI play for the side to move.
    ///
    /// The agent searches the live position, which is unchanged once it
    /// returns. If the agent finds no move the terminal status is refreshed
    /// and reported through [`GameError::AiHasNoMove`].
    pub fn request_ai_move(&mut self) -> Result<MoveReport, GameError> {
        let status = self.status;
        let turn = self.turn;
        let position = match (&mut self.position, status) {
            (Some(position), GameStatus::Active) => position,
            _ => return Err(GameError::NotActive { status }),
        };
        let agent = match self.agent.as_mut() {
            Some(agent) if agent.color() == turn => agent,
            _ => return Err(GameError::NoAgent(turn)),
        };

        let Some(mv) = agent.get_best_move(position) else {
            match outcome(position, turn) {
                Some(Outcome::Checkmate { winner }) => {
                    self.status = GameStatus::Checkmate;
                    self.winner = Some(winner);
                }
                Some(Outcome::Stalemate) => self.status = GameStatus::Stalemate,
                None => {}
            }
            warn!(color = %turn, status = %self.status, "AI has no legal moves");
            return Err(GameError::AiHasNoMove {
                status: self.status,
            });
        };

        let report = self.submit_move(mv.from(), mv.to())?;
        info!(color = %turn, %mv, "AI moved");
        let mut message = format!("AI ({}) moved from {} to {}.", turn, mv.from(), mv.to());
        if report.status.is_terminal() {
            message = format!("{} {}", message, report.message);
        }
        Ok(MoveReport { message, ..report })
    }

    /// Legal targets of the piece on `from`, provided it belongs to the side
    /// to move. Empty when the game is not active.
    pub fn legal_destinations(&mut self, from: Square) -> Vec<Square> {
        let turn = self.turn;
        match (&mut self.position, self.status) {
            (Some(position), GameStatus::Active) => match position.piece_at(from) {
                Some(piece) if piece.color() == turn => legal_destinations(position, from),
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    /// Captures the full game state.
    pub fn snapshot(&self) -> Result<GameSnapshot, GameError> {
        let position = match (&self.position, self.status) {
            (_, GameStatus::NotStarted) | (None, _) => return Err(GameError::NotStarted),
            (Some(position), _) => position,
        };
        let in_check = Color::BOTH
            .into_iter()
            .find(|&color| is_king_attacked(position, color));
        let ai_color = match self.mode {
            Some(GameMode::HumanVsAi) => self.agent.as_ref().map(AiAgent::color),
            _ => None,
        };

        Ok(GameSnapshot {
            board: position.symbols(),
            turn: self.turn,
            status: self.status,
            winner: self.winner,
            in_check,
            move_history: position
                .move_history()
                .iter()
                .map(|mv| mv.to_algebraic_pair())
                .collect(),
            players: self.players.clone(),
            game_mode: self.mode,
            difficulty: self.difficulty,
            ai_color,
        })
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// The restored position is recorded once for repetition tracking. AI
    /// games rebind an agent to the snapshot's AI color, Black if absent.
    pub fn restore(snapshot: &GameSnapshot) -> Result<Self, SnapshotError> {
        Self::new().restored(snapshot)
    }

    /// Like [`restore`](Game::restore), keeping this game's agent tuning.
    pub fn restored(self, snapshot: &GameSnapshot) -> Result<Self, SnapshotError> {
        if snapshot.status == GameStatus::NotStarted {
            return Err(SnapshotError::NotStarted);
        }

        let mut position = Position::from_symbols(&snapshot.board)?;
        position.check_invariants()?;
        let history = snapshot
            .move_history
            .iter()
            .map(|[from, to]| {
                Move::from_algebraic_pair(from, to)
                    .ok_or_else(|| SnapshotError::InvalidSquare(format!("{}{}", from, to)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        position.extend_history(history);
        position.record_position(snapshot.turn);

        let agent = match (snapshot.game_mode, snapshot.difficulty) {
            (Some(GameMode::HumanVsAi), None) => return Err(SnapshotError::MissingDifficulty),
            (Some(GameMode::HumanVsAi), Some(difficulty)) => Some(
                self.bind_agent(difficulty, snapshot.ai_color.unwrap_or(Color::Black)),
            ),
            _ => None,
        };

        info!(status = %snapshot.status, turn = %snapshot.turn, "game restored");

        Ok(Game {
            position: Some(position),
            turn: snapshot.turn,
            status: snapshot.status,
            winner: snapshot.winner,
            mode: snapshot.game_mode,
            difficulty: snapshot.difficulty,
            players: snapshot.players.clone(),
            agent,
            tuning: self.tuning,
        })
    }

    /// Resets to an unstarted game. Agent tuning is kept.
    pub fn end(&mut self) {
        info!(status = %self.status, "game ended");
        *self = Game {
            tuning: self.tuning,
            ..Self::new()
        };
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    pub fn mode(&self) -> Option<GameMode> {
        self.mode
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn players(&self) -> &Players {
        &self.players
    }

    /// The live position, if started.
    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    /// Color the AI plays, if an agent is bound.
    pub fn ai_color(&self) -> Option<Color> {
        self.agent.as_ref().map(AiAgent::color)
    }

    /// Returns true if the game is active and the AI is to move.
    pub fn is_ai_turn(&self) -> bool {
        self.status == GameStatus::Active && self.ai_color() == Some(self.turn)
    }
}

fn parse_square(s: &str) -> Result<Square, GameError> {
    Square::from_algebraic(s).ok_or_else(|| GameError::InvalidSquare(s.to_string()))
}
