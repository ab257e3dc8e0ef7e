use tracing::{debug, trace};
use web_time::Instant;

use crate::board::BoardSnapshot;
use crate::config::{EngineConfig, MoveRules};
use crate::error::EngineResult;
use crate::types::{Coord, Move, Owner, Point};

/// `(d_column, d_row)`: up-left, up-right, down-right, down-left.
const DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];

/// One jump of a capture chain, as snapshot indexes.
#[derive(Debug, Clone, Copy)]
struct Jump {
    captured: usize,
    landing: usize,
}

/// Holds the current frame's snapshot and the per-instance configuration.
#[derive(Debug, Clone)]
pub struct MoveGenerator {
    config: EngineConfig,
    snapshot: BoardSnapshot,
}

impl MoveGenerator {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            snapshot: BoardSnapshot::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Drops the previous frame's board and installs `snapshot`.
    pub fn replace_snapshot(&mut self, snapshot: BoardSnapshot) {
        self.snapshot = snapshot;
    }

    /// Rebuilds the board from this frame's calibration corners.
    /// On error the previous snapshot is kept.
    pub fn load_corners(&mut self, corners: &[Point]) -> EngineResult<()> {
        let snapshot = BoardSnapshot::from_corners(corners, self.config.board_size)?;
        self.replace_snapshot(snapshot);
        Ok(())
    }

    pub fn set_owner(&mut self, coord: Coord, owner: Owner) -> EngineResult<()> {
        self.snapshot.set_owner(coord, owner)
    }

    pub fn clear_owners(&mut self) {
        self.snapshot.clear_owners();
    }

    pub fn find_moves(&self, player: Owner) -> Vec<Move> {
        let started = Instant::now();
        let moves = find_moves(&self.snapshot, player, self.config.rules);
        debug!(
            ?player,
            sources = self.snapshot.count(player),
            moves = moves.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "generated moves"
        );
        moves
    }

    pub fn find_move_strings(&self, player: Owner) -> Vec<String> {
        self.find_moves(player)
            .iter()
            .map(ToString::to_string)
            .collect()
    }
}

/// Lists every move `player` can make on `board`.
///
/// Pieces are visited in snapshot order and directions in `DIRECTIONS`
/// order. Every capture chain is followed to its end and reported once per
/// branch with its full path. Backward slides are dropped; captures may go
/// in any direction.
pub fn find_moves(board: &BoardSnapshot, player: Owner, rules: MoveRules) -> Vec<Move> {
    if !player.is_player() {
        return Vec::new();
    }

    let owners = board.owners();
    let mut moves = Vec::new();

    for (from, field) in board.fields().iter().enumerate() {
        if field.owner != player {
            continue;
        }

        for (d_column, d_row) in DIRECTIONS {
            let Some(next) = board.neighbor(from, d_column, d_row) else {
                continue;
            };

            if owners[next] == Owner::None {
                moves.push(Move::slide(field.coord, board.fields()[next].coord));
                continue;
            }

            for chain in jumps(board, &owners, player, from, d_column, d_row) {
                moves.push(chain_to_move(board, field.coord, &chain));
            }
        }
    }

    moves.retain(|mv| {
        let backward = is_backward_slide(mv, player);
        if backward {
            trace!(%mv, "dropping backward slide");
        }
        !backward
    });

    if rules.mandatory_capture && moves.iter().any(Move::is_capture) {
        moves.retain(Move::is_capture);
    }

    moves
}

/// Capture chains starting with a jump from `from` in one direction.
///
/// `owners` is this branch's view of the board; the snapshot only decides
/// which squares exist.
fn jumps(
    board: &BoardSnapshot,
    owners: &[Owner],
    player: Owner,
    from: usize,
    d_column: i8,
    d_row: i8,
) -> Vec<Vec<Jump>> {
    let Some(captured) = board.neighbor(from, d_column, d_row) else {
        return Vec::new();
    };
    if owners[captured] != player.opponent() {
        return Vec::new();
    }
    let Some(landing) = board.neighbor(captured, d_column, d_row) else {
        return Vec::new();
    };
    if owners[landing] != Owner::None {
        return Vec::new();
    }

    let mut next = owners.to_vec();
    next[from] = Owner::None;
    next[captured] = Owner::None;
    next[landing] = player;

    let jump = Jump { captured, landing };
    let tails = continuations(board, &next, player, landing);
    if tails.is_empty() {
        return vec![vec![jump]];
    }

    tails
        .into_iter()
        .map(|tail| {
            let mut chain = Vec::with_capacity(tail.len() + 1);
            chain.push(jump);
            chain.extend(tail);
            chain
        })
        .collect()
}

/// Every further capture chain from a landing square.
fn continuations(
    board: &BoardSnapshot,
    owners: &[Owner],
    player: Owner,
    from: usize,
) -> Vec<Vec<Jump>> {
    DIRECTIONS
        .iter()
        .flat_map(|&(d_column, d_row)| jumps(board, owners, player, from, d_column, d_row))
        .collect()
}

fn chain_to_move(board: &BoardSnapshot, origin: Coord, chain: &[Jump]) -> Move {
    let fields = board.fields();
    let mut path = Vec::with_capacity(chain.len() + 1);
    path.push(origin);
    path.extend(chain.iter().map(|jump| fields[jump.landing].coord));

    Move {
        path,
        captured: chain.iter().map(|jump| fields[jump.captured].coord).collect(),
    }
}

fn is_backward_slide(mv: &Move, player: Owner) -> bool {
    if mv.is_capture() || mv.path.len() != 2 {
        return false;
    }
    let d_row = mv.destination().row as i16 - mv.origin().row as i16;
    d_row == -(player.forward() as i16)
}
