use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Final tally reported when a run ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub final_score: u32,
    pub highscore: u32,
    pub new_highscore: bool,
}

/// Outcome of a single input step.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum MoveOutcome {
    NoChange,
    Moved,
    Painted { cells: CellCount },
    LevelComplete { level: Level, cells: CellCount },
    GameOver(GameSummary),
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the visible state.
    pub const fn has_update(self) -> bool {
        use MoveOutcome::*;
        match self {
            NoChange => false,
            Moved => true,
            Painted { .. } => true,
            LevelComplete { .. } => true,
            GameOver(_) => true,
        }
    }
}

/// The whole game from the input layer's point of view: one board, one player,
/// one target color, and the level/turn/score bookkeeping around them.
///
/// A run is a continuous loop; a game over folds the score into the reported
/// [`GameSummary`] and immediately restarts at level 1, so there is no
/// externally observable dead state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    config: BoardConfig,
    board: Board,
    player: Coord2,
    target: ColorSlot,
    level: Level,
    turns: u32,
    turn_budget: u32,
    level_score: CellCount,
    total_score: u32,
    highscore: u32,
    // not persisted; a restored session simply starts a fresh random stream
    #[serde(skip, default = "restored_rng")]
    rng: SmallRng,
}

fn restored_rng() -> SmallRng {
    SmallRng::seed_from_u64(0)
}

impl GameSession {
    /// Starts a fresh run at level 1. `highscore` is the persisted best the
    /// caller loaded; the session only reads and updates it in memory.
    pub fn new(config: BoardConfig, seed: u64, highscore: u32) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = StampedBoardGenerator::new(rng.random()).generate(config, 1);
        let turn_budget = roll_turn_budget(1, &mut rng);

        let mut session = Self {
            config,
            board,
            player: (0, 0),
            target: ColorSlot::new_unchecked(0),
            level: 1,
            turns: 1,
            turn_budget,
            level_score: 0,
            total_score: 0,
            highscore,
            rng,
        };
        session.reroll_target();
        session
    }

    /// Starts at an explicit board instead of a generated one.
    pub fn from_board(board: Board, level: Level, seed: u64, highscore: u32) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let turn_budget = roll_turn_budget(level, &mut rng);

        let mut session = Self {
            config: BoardConfig::new(board.size()),
            board,
            player: (0, 0),
            target: ColorSlot::new_unchecked(0),
            level,
            turns: 1,
            turn_budget,
            level_score: 0,
            total_score: 0,
            highscore,
            rng,
        };
        session.reroll_target();
        session
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> ColorSlot {
        self.board[coords]
    }

    pub fn player(&self) -> Coord2 {
        self.player
    }

    pub fn target(&self) -> ColorSlot {
        self.target
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn turn_budget(&self) -> u32 {
        self.turn_budget
    }

    pub fn level_score(&self) -> CellCount {
        self.level_score
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn highscore(&self) -> u32 {
        self.highscore
    }

    /// Translates the player by one cell. An out-of-bounds move is silently
    /// rejected; nothing else about the session changes either way.
    pub fn move_player(&mut self, direction: Direction) -> MoveOutcome {
        match direction.step(self.player, self.board.size()) {
            Some(next) => {
                self.player = next;
                MoveOutcome::Moved
            }
            None => MoveOutcome::NoChange,
        }
    }

    /// Paints the player's region with the current target color, then runs the
    /// uniformity and budget checks. A move that changes no cells (the region
    /// already has the target color) leaves every counter untouched and does
    /// not re-roll the target.
    pub fn apply_move(&mut self) -> MoveOutcome {
        let region_color = self.board[self.player];
        if region_color == self.target {
            return MoveOutcome::NoChange;
        }

        let cells = self.board.flood_fill(self.player, region_color, self.target);
        debug_assert!(cells > 0);
        self.level_score = self.level_score.saturating_add(cells);
        self.turns += 1;

        if self.board.is_uniform() {
            // must come before any target re-roll: a uniform board has only
            // one candidate color left
            let level = self.level;
            self.advance_level();
            MoveOutcome::LevelComplete { level, cells }
        } else if self.turns > self.turn_budget {
            MoveOutcome::GameOver(self.end_game())
        } else {
            self.reroll_target();
            MoveOutcome::Painted { cells }
        }
    }

    fn advance_level(&mut self) {
        self.level += 1;
        self.total_score += u32::from(self.level_score);
        log::debug!(
            "level {} complete, total score {}",
            self.level - 1,
            self.total_score
        );
        self.start_level();
    }

    fn end_game(&mut self) -> GameSummary {
        self.total_score += u32::from(self.level_score);
        let final_score = self.total_score;
        let new_highscore = final_score > self.highscore;
        if new_highscore {
            self.highscore = final_score;
        }
        log::debug!(
            "game over at level {}, score {}, highscore {}",
            self.level,
            final_score,
            self.highscore
        );

        self.level = 1;
        self.total_score = 0;
        self.start_level();

        GameSummary {
            final_score,
            highscore: self.highscore,
            new_highscore,
        }
    }

    /// Start-of-level reset shared by level advance and post-game-over
    /// reinitialization. `level` and `total_score` are already set.
    fn start_level(&mut self) {
        self.level_score = 0;
        self.turns = 1;
        self.turn_budget = roll_turn_budget(self.level, &mut self.rng);
        self.board =
            StampedBoardGenerator::new(self.rng.random()).generate(self.config, self.level);
        self.player = (0, 0);
        self.reroll_target();
    }

    /// Picks a new target color among the active palette colors actually
    /// present on the board. Bounded: candidates are collected up front, no
    /// retry loop to wedge on.
    fn reroll_target(&mut self) {
        let active = active_colors(self.level);
        let mut present = [false; PALETTE_LEN as usize];
        for cell in self.board.iter_cells() {
            present[usize::from(cell.index())] = true;
        }

        let mut pool = [0u8; PALETTE_LEN as usize];
        let mut len = 0;
        for index in 0..active {
            if present[usize::from(index)] {
                pool[len] = index;
                len += 1;
            }
        }
        if len == 0 {
            // a restored board may only hold colors outside the active prefix
            for index in active..PALETTE_LEN {
                if present[usize::from(index)] {
                    pool[len] = index;
                    len += 1;
                }
            }
        }

        self.target = ColorSlot::new_unchecked(pool[self.rng.random_range(0..len)]);
    }
}
