//! Standard chess rules, backed by the `chess` crate.
//!
//! The crate's `Board` handles legality, application, and mate/stalemate
//! detection, but carries no halfmove clock or fullmove number — those
//! FEN fields are maintained here so the fifty-move rule stays
//! detectable on a bare position value.

use std::str::FromStr;

use chess::{Board, BoardStatus, CastleRights, ChessMove, Color, File, Piece, Rank, Square};

use crate::domain::state::Side;
use crate::engine::{EngineError, Position, Promotion, ProposedMove, RulesEngine, TerminalStatus};

const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Threshold of the fifty-move rule, in halfmoves.
const FIFTY_MOVE_HALFMOVES: u32 = 100;

#[derive(Debug, Default)]
pub struct StandardRules;

impl StandardRules {
    pub fn new() -> Self {
        Self
    }
}

impl RulesEngine for StandardRules {
    fn starting_position(&self) -> Position {
        Position::new(STARTING_FEN)
    }

    fn side_to_move(&self, position: &Position) -> Result<Side, EngineError> {
        let (board, _, _) = parse_position(position)?;
        Ok(side_of(board.side_to_move()))
    }

    fn validate_move(
        &self,
        position: &Position,
        proposed: &ProposedMove,
    ) -> Result<Position, EngineError> {
        let (board, halfmove, fullmove) = parse_position(position)?;

        let from = parse_square(&proposed.from)?;
        let to = parse_square(&proposed.to)?;
        let candidate = ChessMove::new(from, to, proposed.promotion.map(promotion_piece));

        if !board.legal(candidate) {
            return Err(EngineError::Illegal(format!(
                "{}{} is not legal in this position",
                proposed.from, proposed.to
            )));
        }

        let moved_pawn = board.piece_on(from) == Some(Piece::Pawn);
        // A pawn leaving its file onto an empty square is an en passant
        // capture; an occupied target is a capture for any piece.
        let capture =
            board.piece_on(to).is_some() || (moved_pawn && from.get_file() != to.get_file());

        let next = board.make_move_new(candidate);
        let halfmove = if moved_pawn || capture { 0 } else { halfmove + 1 };
        let fullmove = if board.side_to_move() == Color::Black {
            fullmove + 1
        } else {
            fullmove
        };

        Ok(Position::new(render_fen(&next, halfmove, fullmove)))
    }

    fn terminal_status(
        &self,
        position: &Position,
    ) -> Result<Option<TerminalStatus>, EngineError> {
        let (board, halfmove, _) = parse_position(position)?;

        let status = match board.status() {
            BoardStatus::Checkmate => Some(TerminalStatus::Checkmate {
                loser: side_of(board.side_to_move()),
            }),
            BoardStatus::Stalemate => Some(TerminalStatus::Stalemate),
            BoardStatus::Ongoing => {
                if insufficient_material(&board) {
                    Some(TerminalStatus::InsufficientMaterial)
                } else if halfmove >= FIFTY_MOVE_HALFMOVES {
                    Some(TerminalStatus::Draw)
                } else {
                    None
                }
            }
        };
        Ok(status)
    }
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn promotion_piece(promotion: Promotion) -> Piece {
    match promotion {
        Promotion::Queen => Piece::Queen,
        Promotion::Rook => Piece::Rook,
        Promotion::Bishop => Piece::Bishop,
        Promotion::Knight => Piece::Knight,
    }
}

fn parse_square(text: &str) -> Result<Square, EngineError> {
    Square::from_str(text)
        .map_err(|_| EngineError::Illegal(format!("malformed square '{text}'")))
}

/// Split a FEN value into the crate's board plus the two move counters
/// the crate does not model.
fn parse_position(position: &Position) -> Result<(Board, u32, u32), EngineError> {
    let fen = position.as_fen();
    let board = Board::from_str(fen)
        .map_err(|err| EngineError::Unavailable(format!("unreadable position: {err}")))?;

    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(EngineError::Unavailable(format!(
            "position has {} FEN fields, expected 6",
            fields.len()
        )));
    }
    let halfmove = fields[4]
        .parse::<u32>()
        .map_err(|_| EngineError::Unavailable(format!("bad halfmove clock '{}'", fields[4])))?;
    let fullmove = fields[5]
        .parse::<u32>()
        .map_err(|_| EngineError::Unavailable(format!("bad fullmove number '{}'", fields[5])))?;

    Ok((board, halfmove, fullmove))
}

fn render_fen(board: &Board, halfmove: u32, fullmove: u32) -> String {
    let mut placement = String::new();
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
            match (board.piece_on(square), board.color_on(square)) {
                (Some(piece), Some(color)) => {
                    if empty > 0 {
                        placement.push_str(&empty.to_string());
                        empty = 0;
                    }
                    placement.push_str(&piece.to_string(color));
                }
                _ => empty += 1,
            }
        }
        if empty > 0 {
            placement.push_str(&empty.to_string());
        }
        if rank > 0 {
            placement.push('/');
        }
    }

    let turn = match board.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut castling = String::new();
    match board.castle_rights(Color::White) {
        CastleRights::Both => castling.push_str("KQ"),
        CastleRights::KingSide => castling.push('K'),
        CastleRights::QueenSide => castling.push('Q'),
        CastleRights::NoRights => {}
    }
    match board.castle_rights(Color::Black) {
        CastleRights::Both => castling.push_str("kq"),
        CastleRights::KingSide => castling.push('k'),
        CastleRights::QueenSide => castling.push('q'),
        CastleRights::NoRights => {}
    }
    if castling.is_empty() {
        castling.push('-');
    }

    // The crate reports the double-stepped pawn's square; FEN wants the
    // capture target behind it.
    let en_passant = match board.en_passant() {
        Some(square) => {
            let target_rank = match square.get_rank() {
                Rank::Fourth => Rank::Third,
                _ => Rank::Sixth,
            };
            Square::make_square(target_rank, square.get_file()).to_string()
        }
        None => "-".to_string(),
    };

    format!("{placement} {turn} {castling} {en_passant} {halfmove} {fullmove}")
}

/// Neither side can force mate: bare kings, a lone minor piece, or
/// bishops that all stand on same-colored squares.
fn insufficient_material(board: &Board) -> bool {
    let heavy = board.pieces(Piece::Pawn).popcnt()
        + board.pieces(Piece::Rook).popcnt()
        + board.pieces(Piece::Queen).popcnt();
    if heavy > 0 {
        return false;
    }

    let knights = board.pieces(Piece::Knight).popcnt();
    let bishops = *board.pieces(Piece::Bishop);
    if knights + bishops.popcnt() <= 1 {
        return true;
    }
    if knights > 0 {
        return false;
    }

    let mut square_colors =
        bishops.map(|square| (square.get_rank().to_index() + square.get_file().to_index()) % 2);
    match square_colors.next() {
        None => true,
        Some(first) => square_colors.all(|color| color == first),
    }
}
