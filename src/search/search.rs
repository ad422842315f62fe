//! Iterative-deepening negamax alpha-beta search.

use std::time::Instant;

use crate::board::Board;
use crate::evaluate::{
    INITIAL_ALPHA, MIN_DRAW_SCORE, evaluate, evaluate_without_legal_moves,
    is_checkmating_opponent_score, is_legal_position_after_move,
};
use crate::history::History;
use crate::logger::Logger;
use crate::moves::generate::generate_all_potential_moves;
use crate::moves::types::Move;
use crate::piece::Color;
use crate::search::timer::MoveTimer;
use crate::search::tt::{BoundType, TTStats, TranspositionTable};

/// What a (partial or completed) search iteration produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub mv: Option<Move>,
    pub score: i32,
    pub depth: i32,
    pub timed_out: bool,
}

impl Default for SearchResult {
    fn default() -> SearchResult {
        SearchResult {
            mv: None,
            score: -INITIAL_ALPHA,
            depth: 0,
            timed_out: false,
        }
    }
}

fn drawing_score(searching_color: Color, current_color: Color) -> i32 {
    // A draw is mildly unwelcome for the engine looking for a move; for its
    // opponent it is neutral.
    if current_color == searching_color {
        MIN_DRAW_SCORE
    } else {
        0
    }
}

fn is_probably_drawing_move(board: &Board, history: &History) -> bool {
    history.is_probably_third_repetition(board)
        || History::has_been_fifty_moves_without_progress(board)
}

pub struct IterativeSearch<'a> {
    original_board: Board,
    history: History,
    logger: &'a dyn Logger,
    timer: MoveTimer,
    transposition_table: &'a mut TranspositionTable,

    total_depth: i32,
    search_depth: i32,
    current_result: SearchResult,
    searching_color: Color,

    nodes_visited: u64,
    alpha_beta_cutoffs: u64,
    total_nodes_visited: u64,
    total_alpha_beta_cutoffs: u64,
}

impl<'a> IterativeSearch<'a> {
    pub fn new(
        board: &Board,
        history: &History,
        logger: &'a dyn Logger,
        timer: MoveTimer,
        total_depth: i32,
        transposition_table: &'a mut TranspositionTable,
    ) -> IterativeSearch<'a> {
        IterativeSearch {
            original_board: board.clone(),
            history: history.clone(),
            logger,
            timer,
            transposition_table,
            total_depth,
            search_depth: 0,
            current_result: SearchResult::default(),
            searching_color: Color::White,
            nodes_visited: 0,
            alpha_beta_cutoffs: 0,
            total_nodes_visited: 0,
            total_alpha_beta_cutoffs: 0,
        }
    }

    pub fn move_timer(&self) -> &MoveTimer {
        &self.timer
    }

    pub fn is_cancelled(&self) -> bool {
        self.timer.is_cancelled()
    }

    /// Search depths 1, 3, 5, … up to the configured maximum, keeping the
    /// best fully-completed iteration. Depth 1 guarantees *some* move
    /// quickly; stepping by two keeps each iteration an even number of
    /// plies so both sides get the last word in turn.
    pub fn iteratively_deepen(&mut self, side: Color) -> SearchResult {
        let mut best_result = SearchResult::default();
        self.searching_color = side;
        self.timer.start();

        let mut depth = 1;
        while depth <= self.total_depth {
            self.logger.info(&format!("Searching depth {}", depth));

            self.iterate(side, depth);
            if self.current_result.timed_out {
                break;
            }

            let next_result = self.current_result;
            if next_result.mv.is_some() {
                best_result = next_result;
                if is_checkmating_opponent_score(next_result.score) {
                    break;
                }
            }

            if self.timer.check_cancellation() {
                break;
            }

            depth += 2;
        }

        self.logger.debug(&format!(
            "totals: nodes visited = {}, alpha-beta cutoffs = {}",
            self.total_nodes_visited, self.total_alpha_beta_cutoffs
        ));

        best_result
    }

    fn iterate(&mut self, side: Color, depth: i32) -> SearchResult {
        self.logger
            .debug(&format!("finding moves for {}", side));

        self.nodes_visited = 0;
        self.alpha_beta_cutoffs = 0;

        let tt_stats_start = self.transposition_table.stats();
        let start = Instant::now();

        self.search_depth = depth;
        self.current_result = SearchResult::default();
        let board = self.original_board.clone();
        self.search(&board, side, depth, -INITIAL_ALPHA, INITIAL_ALPHA, 0);

        let elapsed = start.elapsed();
        let result = self.current_result;

        self.log_search_time(elapsed.as_secs_f64());
        self.total_nodes_visited += self.nodes_visited;
        self.total_alpha_beta_cutoffs += self.alpha_beta_cutoffs;
        self.log_iteration_stats(tt_stats_start);

        if result.timed_out {
            self.logger.info("Search timed out");
        } else if let Some(best_move) = result.mv {
            self.logger.info(&format!(
                "move selected = {} [ score: {} ]",
                best_move, result.score
            ));
        }

        result
    }

    fn search(
        &mut self,
        board: &Board,
        side: Color,
        depth: i32,
        mut alpha: i32,
        beta: i32,
        ply: i32,
    ) -> i32 {
        if is_probably_drawing_move(board, &self.history) {
            return drawing_score(self.searching_color, side);
        }

        if depth < 0 {
            return evaluate(board, side, self.search_depth - depth);
        }

        let original_alpha = alpha;
        let hash = board.code().hash_code();

        if ply > 0 {
            if let Some(tt_score) =
                self.transposition_table.probe(hash, depth, alpha, beta, ply)
            {
                self.current_result.mv = self.transposition_table.get_best_move(hash);
                self.current_result.score = tt_score;
                self.current_result.depth = self.search_depth - depth;
                return tt_score;
            }
        }

        let tt_move = self.transposition_table.get_best_move(hash);
        let mut moves = generate_all_potential_moves(board, side);
        if let Some(tt_move) = tt_move {
            moves.bring_to_front(tt_move);
        }

        let mut best_move: Option<Move> = None;
        let mut best_score = -INITIAL_ALPHA;

        for &mv in &moves {
            if self.timer.is_triggered() {
                self.current_result.timed_out = true;
                return -INITIAL_ALPHA;
            }

            let child_board = board.with_move(side, mv);
            if !is_legal_position_after_move(&child_board, side, mv) {
                continue;
            }

            self.nodes_visited += 1;

            // The pop after the recursive call is unconditional: no early
            // return sits between the push and the pop, so an abort deep in
            // the tree cannot leak tentative entries.
            self.history.add_tentative_position(&child_board);
            let score = -self.search(&child_board, side.opposite(), depth - 1, -beta, -alpha, ply + 1);
            self.history.remove_last_tentative_position();

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if best_score > alpha {
                alpha = best_score;
            }

            if self.current_result.timed_out {
                return -INITIAL_ALPHA;
            }

            if alpha >= beta {
                self.alpha_beta_cutoffs += 1;
                break;
            }
        }

        self.current_result.depth = self.search_depth - depth;
        if best_move.is_none() {
            // No legal moves: checkmate or stalemate.
            best_score = evaluate_without_legal_moves(board, side, self.current_result.depth);
        }
        self.current_result.mv = best_move;
        self.current_result.score = best_score;

        if !self.current_result.timed_out {
            let bound = if best_score <= original_alpha {
                BoundType::UpperBound
            } else if best_score >= beta {
                BoundType::LowerBound
            } else {
                BoundType::Exact
            };
            self.transposition_table
                .store(hash, best_score, depth, bound, best_move, ply);
        }

        best_score
    }

    fn log_search_time(&self, seconds: f64) {
        let rate = self.nodes_visited as f64 / seconds.max(1e-9);
        self.logger.info(&format!(
            "search took {:.3}s, {:.0} nodes/sec",
            seconds, rate
        ));
    }

    fn log_iteration_stats(&self, tt_stats_start: TTStats) {
        let tt_stats_end = self.transposition_table.stats();
        let probes = tt_stats_end.probes - tt_stats_start.probes;
        let hits = tt_stats_end.hits - tt_stats_start.hits;
        let hit_rate = if probes > 0 {
            hits as f64 * 100.0 / probes as f64
        } else {
            0.0
        };

        self.logger.debug(&format!(
            "nodes visited = {}, alpha-beta cutoffs = {}",
            self.nodes_visited, self.alpha_beta_cutoffs
        ));
        self.logger.debug(&format!(
            "transposition table: entries = {}/{}, probes = {}, hits = {}, hit rate = {:.1}%",
            tt_stats_end.stored_entries,
            self.transposition_table.size(),
            probes,
            hits,
            hit_rate
        ));
    }
}
