use std::fmt::Display;
use std::result::Result;

use crate::attacks;
use crate::board::BitBoard;
use crate::fen::{read_fen, DEFAULT_FEN};
use crate::game_elements::{CastlingRights, Color, Color::*, Move, PieceType, PieceType::*, Square};
use crate::zobrist;

use super::movegen;

#[derive(Clone, Copy)]
pub struct Board {
    castling_rights: CastlingRights,
    turn: Color,
    halfmove_clock: u16,
    full_turns: u16,
    plies: u16,
    en_passant_target: BitBoard,
    white_pieces: Pieces,
    black_pieces: Pieces,
    all_whites: BitBoard,
    all_blacks: BitBoard,
    all_pieces: BitBoard,
    piece_on_square: [Option<PieceType>; 64],
    white_attacks: BitBoard,
    black_attacks: BitBoard,
    zobrist_key: u64,
}

#[derive(Clone, Copy, Default)]
pub struct Pieces {
    pub pawns: BitBoard,
    pub rooks: BitBoard,
    pub knights: BitBoard,
    pub bishops: BitBoard,
    pub queens: BitBoard,
    pub king: BitBoard,
}

impl Board {
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let fen_info = read_fen(fen)?;
        let plies = (fen_info.fullmoves_since_start - 1) * 2
            + (fen_info.turn == Black) as u16;

        let mut board = Self {
            castling_rights: fen_info.castling_rights,
            turn: fen_info.turn,
            en_passant_target: fen_info.en_passant_square,
            halfmove_clock: fen_info.halfmoves_since_capture,
            full_turns: fen_info.fullmoves_since_start,
            white_pieces: fen_info.white_pieces,
            black_pieces: fen_info.black_pieces,
            all_whites: BitBoard::default(),
            all_blacks: BitBoard::default(),
            all_pieces: BitBoard::default(),
            piece_on_square: fen_info.piece_on_square,
            white_attacks: BitBoard::default(),
            black_attacks: BitBoard::default(),
            zobrist_key: 0,
            plies,
        };

        board.update_aux_bitboards();
        board.create_zobrist_key();

        // The side that just moved must not be left in check
        if board.is_check(!board.turn) {
            return Err("The side not to move is in check".to_owned());
        }

        Ok(board)
    }

    // Checked variant of make_move() for externally provided moves: the
    // move must appear in the current legal move list.
    pub fn try_move(&self, movement: &Move) -> Result<Self, String> {
        if !self.legal_moves().contains(movement) {
            return Err("Illegal move".to_owned());
        }

        Ok(self.make_move(movement))
    }

    // Applies a move assumed to come from our own move generator and
    // returns the resulting board. Legality of everything except
    // leaving the own king in check is assumed; that last condition is
    // what legal_moves() filters on afterwards.
    pub fn make_move(&self, movement: &Move) -> Self {
        // Copy the current board and make the changes on it
        let mut new_board = *self;

        // If there is one active e.p. square, remove it from the zobrist key.
        // The e.p. flag is only part of the key when the side to move has
        // a pawn ready to capture on that square, which is the same
        // condition that set the flag in the first place. This runs before
        // update_en_passant() because that function clears the square, and
        // move_piece() still needs it to recognise e.p. captures.
        if self.update_ep_zobrist(self.turn) {
            new_board.zobrist_key ^= zobrist::get_key_ep_square(self.ep_square().first_piece_index());
        }

        // Perform the movement in question
        if matches!(movement, Move::LongCastle | Move::ShortCastle) {
            new_board.castle(movement);
            // Castling calls move_piece twice, so the half-move counter
            // is incremented twice and must be rebalanced
            new_board.halfmove_clock -= 1;
        } else {
            new_board.move_piece(movement);
        }

        // Update the en passant data
        new_board.update_en_passant(movement);

        // Update the current color to play and the number of total turns,
        // if black just moved
        new_board.turn = !self.turn;
        new_board.zobrist_key ^= zobrist::get_key_white_turn();

        if new_board.turn == White {
            new_board.full_turns += 1;
        }

        new_board.update_aux_bitboards();
        new_board.plies += 1;
        new_board
    }

    // Passes the turn without moving: the side to move flips and any
    // active e.p. square is cleared. Everything else stays untouched.
    pub fn make_null_move(&self) -> Self {
        let mut new_board = *self;

        if self.update_ep_zobrist(self.turn) {
            new_board.zobrist_key ^= zobrist::get_key_ep_square(self.ep_square().first_piece_index());
        }

        new_board.en_passant_target.clear();
        new_board.turn = !self.turn;
        new_board.zobrist_key ^= zobrist::get_key_white_turn();
        new_board
    }

    pub fn pseudolegal_moves(&self) -> Vec<Move> {
        movegen::get_pseudolegal_moves(self, self.turn)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.pseudolegal_moves().into_iter()
            .filter(|mv| matches!(mv, Move::ShortCastle | Move::LongCastle) ||
                         !self.make_move(mv).is_check(self.turn))
            .collect()
    }

    // Like legal_moves().is_empty(), but bails out at the first legal
    // move found. Used by the terminal-position checks, which run often.
    pub fn has_legal_moves(&self) -> bool {
        self.pseudolegal_moves().into_iter()
            .any(|mv| matches!(mv, Move::ShortCastle | Move::LongCastle) ||
                      !self.make_move(&mv).is_check(self.turn))
    }

    pub fn is_check(&self, color: Color) -> bool {
        match color {
            White => !(self.white_pieces.king & self.black_attacks).is_empty(),
            Black => !(self.black_pieces.king & self.white_attacks).is_empty(),
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check(self.turn) && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.turn) && !self.has_legal_moves()
    }

    // Whether playing this move leaves the opponent in check
    pub fn gives_check(&self, movement: &Move) -> bool {
        let next_board = self.make_move(movement);
        next_board.is_check(next_board.turn)
    }

    // A position is a draw by insufficient material if both sides have
    // either only K, KB or KN
    pub fn is_draw_by_material(&self) -> bool {
        let n_whites = self.all_whites.count();
        let n_blacks = self.all_blacks.count();

        (n_whites == 1 || n_whites == 2 && (self.white_pieces.bishops.count() == 1 || self.white_pieces.knights.count() == 1))
            && (n_blacks == 1 || n_blacks == 2 && (self.black_pieces.bishops.count() == 1 || self.black_pieces.knights.count() == 1))
    }

    // Draw claimable under the fifty-move rule
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    // Forced draw under the seventy-five-move rule
    pub fn is_seventyfive_move_draw(&self) -> bool {
        self.halfmove_clock >= 150
    }

    // Whether a side still has pieces other than pawns and the king.
    // Null-move pruning is unsound without this condition, since in pawn
    // endgames zugzwang is common and "passing" can be the best move.
    pub fn has_non_pawn_material(&self, color: Color) -> bool {
        let pieces = self.get_pieces(color);
        (pieces.knights | pieces.bishops | pieces.rooks | pieces.queens).is_not_empty()
    }

    // All pieces of a color that attack the given square, pinned or not
    pub fn attackers_of(&self, square: u8, color: Color) -> BitBoard {
        let pieces = self.get_pieces(color);
        let sq = square as usize;

        let mut attackers = attacks::pawn_attacks(sq, !color) & pieces.pawns;
        attackers |= attacks::knight_moves(sq) & pieces.knights;
        attackers |= attacks::king_moves(sq) & pieces.king;
        attackers |= attacks::rook_moves(sq, self.all_pieces) & (pieces.rooks | pieces.queens);
        attackers |= attacks::bishop_moves(sq, self.all_pieces) & (pieces.bishops | pieces.queens);
        attackers
    }

    pub fn ep_square(&self) -> BitBoard {
        self.en_passant_target
    }

    pub fn castling_info(&self) -> &CastlingRights {
        &self.castling_rights
    }

    pub fn turn_number(&self) -> u16 {
        self.full_turns
    }

    pub fn turn_color(&self) -> Color {
        self.turn
    }

    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    pub fn current_ply(&self) -> u16 {
        self.plies
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn get_pieces(&self, color: Color) -> &Pieces {
        match color {
            White => &self.white_pieces,
            Black => &self.black_pieces,
        }
    }

    pub fn piece_on(&self, square: u8) -> &Option<PieceType> {
        &self.piece_on_square[square as usize]
    }

    pub fn king_square(&self, color: Color) -> u8 {
        self.get_pieces(color).king.first_piece_index()
    }

    pub fn get_color_bitboard(&self, color: Color) -> BitBoard {
        match color {
            White => self.all_whites,
            Black => self.all_blacks,
        }
    }

    pub fn get_all_bitboard(&self) -> BitBoard {
        self.all_pieces
    }

    pub fn get_attack_bitboard(&self, color: Color) -> BitBoard {
        match color {
            White => self.white_attacks,
            Black => self.black_attacks,
        }
    }

    pub fn fen(&self) -> String {
        let mut placement = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                let square = rank * 8 + file;
                match self.piece_on_square[square as usize] {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        let color = if (BitBoard::from_square(square) & self.all_whites).is_not_empty() {
                            White
                        } else {
                            Black
                        };
                        placement.push(piece.as_fen_char(color));
                    },
                }
            }

            if empty > 0 {
                placement.push_str(&empty.to_string());
            }

            if rank != 0 {
                placement.push('/');
            }
        }

        let turn = match self.turn {
            White => "w",
            Black => "b",
        };

        let mut castling = String::new();
        if self.castling_rights.can_castle_kingside(White) { castling.push('K'); }
        if self.castling_rights.can_castle_queenside(White) { castling.push('Q'); }
        if self.castling_rights.can_castle_kingside(Black) { castling.push('k'); }
        if self.castling_rights.can_castle_queenside(Black) { castling.push('q'); }
        if castling.is_empty() { castling.push('-'); }

        let ep = if self.en_passant_target.is_empty() {
            "-".to_owned()
        } else {
            Square::new(self.en_passant_target.first_piece_index()).to_string()
        };

        format!("{} {} {} {} {} {}", placement, turn, castling, ep, self.halfmove_clock, self.full_turns)
    }

    ///////////////////////////////////////////////////////////////////////////
    /// Private auxiliary functions

    fn move_piece(&mut self, movement: &Move) {
        // This function is called with generated moves, so we can assume
        // that the piece exists in the "from" position and can move to the
        // target position. It only does single moves, not castling.
        let from_bb = BitBoard::from_square(movement.from());
        let to_bb = BitBoard::from_square(movement.to());
        let (moving_color, enemy_color) = (self.turn, !self.turn);
        let piece_moving = self.piece_on_square[movement.from() as usize].unwrap();
        let enemy_pieces = self.get_color_bitboard(enemy_color);

        let mut captured_piece = None;

        // If there is a piece in the destination square, remove it.
        // First check for e.p., where the square we must clear is not the
        // destination square itself. A movement is an en passant capture
        // if it's a pawn landing on the active e.p. square; a pawn can
        // never be pushed onto it, since the square behind a just-pushed
        // pawn is occupied by that pawn's origin by definition.
        if piece_moving == Pawn && to_bb == self.ep_square() {
            let target_ep = match moving_color {
                White => movement.to() - 8,
                Black => movement.to() + 8,
            };

            // Remove the pawn that was captured e.p.
            let target_bb = BitBoard::from_square(target_ep);
            *self.get_pieces_mut(enemy_color).get_pieces_of_type_mut(Pawn) ^= target_bb;
            *self.piece_on_mut(target_ep) = None;

            captured_piece = Some(Pawn);
            self.zobrist_key ^= zobrist::get_key_for_piece(Pawn, enemy_color, target_ep);

        // Not an en-passant, just a normal capture
        } else if !(enemy_pieces & to_bb).is_empty() {
            self.get_pieces_mut(enemy_color).apply_mask(!to_bb);
            captured_piece = self.piece_on_square[movement.to() as usize];
            // Update the zobrist key (no need to update piece_on_square since it'll be overwritten)
            self.zobrist_key ^= zobrist::get_key_for_piece(captured_piece.unwrap(), enemy_color, movement.to());
        }

        // Move the piece, depending on whether this is a pawn promotion or not
        self.zobrist_key ^= zobrist::get_key_for_piece(piece_moving, moving_color, movement.from());
        *self.piece_on_mut(movement.from()) = None;
        let our_pieces = self.get_pieces_mut(moving_color);

        if let Move::PawnPromotion { promote_to, .. } = movement {
            *our_pieces.get_pieces_of_type_mut(Pawn) ^= from_bb;
            *our_pieces.get_pieces_of_type_mut(*promote_to) ^= to_bb;
            self.zobrist_key ^= zobrist::get_key_for_piece(*promote_to, moving_color, movement.to());
            *self.piece_on_mut(movement.to()) = Some(*promote_to);
        } else {
            *our_pieces.get_pieces_of_type_mut(piece_moving) ^= from_bb | to_bb;
            self.zobrist_key ^= zobrist::get_key_for_piece(piece_moving, moving_color, movement.to());
            *self.piece_on_mut(movement.to()) = Some(piece_moving);
        }

        // Update the counter towards the fifty-move rule
        if captured_piece.is_some() || piece_moving == Pawn {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        // Update castling rights
        self.zobrist_key ^= zobrist::get_key_castling(&self.castling_rights);
        self.update_castling_rights(movement);
        self.zobrist_key ^= zobrist::get_key_castling(&self.castling_rights);
    }

    fn castle(&mut self, movement: &Move) {
        // Note that "self.turn" still hasn't updated at this point, hence
        // we can use it to get which color is castling
        let color = self.turn;
        let short = matches!(movement, Move::ShortCastle);

        let row_start = if color == White { 0 } else { 56 };

        let (king_from, king_to, rook_from, rook_to) = if short {
            (row_start + 4, row_start + 6, row_start + 7, row_start + 5)
        } else {
            (row_start + 4, row_start + 2, row_start, row_start + 3)
        };

        let king_move = Move::Normal { from: king_from, to: king_to };
        let rook_move = Move::Normal { from: rook_from, to: rook_to };

        self.move_piece(&king_move);
        self.move_piece(&rook_move);
    }

    fn update_en_passant(&mut self, movement: &Move) {
        // Remove the e.p. square
        self.en_passant_target.clear();

        // If this is a pawn move, check if it's a double push to set the
        // e.p. square. This runs *after* the piece has been moved, so the
        // piece we are looking for is in the "to" position, but the turn
        // has not flipped yet.
        if let Move::Normal { from, to } = movement {
            if self.piece_on(*to) == &Some(Pawn) {
                // Pawns move in increments (white) or decrements (black)
                // of 8, so a difference of 16 means a double push
                if self.turn == White && to - from == 16 {
                    self.en_passant_target = BitBoard::from_square(*from + 8);
                    if self.update_ep_zobrist(Black) {
                        self.zobrist_key ^= zobrist::get_key_ep_square(*from + 8);
                    }
                } else if self.turn == Black && from - to == 16 {
                    self.en_passant_target = BitBoard::from_square(*from - 8);
                    if self.update_ep_zobrist(White) {
                        self.zobrist_key ^= zobrist::get_key_ep_square(*from - 8);
                    }
                }
            }
        }
    }

    fn update_castling_rights(&mut self, movement: &Move) {
        // Initial rook squares: (queenside, kingside) for white and black
        let white_rooks = (0, 7);
        let black_rooks = (56, 63);

        let (from, to) = (movement.from(), movement.to());
        let color = self.turn;
        let op_color = !color;

        let (own_rooks, enemy_rooks) = match color {
            White => (white_rooks, black_rooks),
            Black => (black_rooks, white_rooks),
        };

        // Check if we are capturing one of the opponent's rooks on its
        // home square, which takes away that castling right
        if self.castling_rights.can_castle_queenside(op_color) && to == enemy_rooks.0 {
            self.castling_rights.update_queenside(op_color, false);
        } else if self.castling_rights.can_castle_kingside(op_color) && to == enemy_rooks.1 {
            self.castling_rights.update_kingside(op_color, false);
        }

        // Check if we are moving our own king or one of our rooks.
        // This runs after the piece has been moved, so the piece we are
        // looking for is in the "to" position.
        if self.piece_on(to) == &Some(King) {
            self.castling_rights.disable_all(color);
        } else if self.castling_rights.can_castle_queenside(color) && from == own_rooks.0 {
            self.castling_rights.update_queenside(color, false);
        } else if self.castling_rights.can_castle_kingside(color) && from == own_rooks.1 {
            self.castling_rights.update_kingside(color, false);
        }
    }

    fn update_aux_bitboards(&mut self) {
        let blacks = self.black_pieces;
        let whites = self.white_pieces;
        self.all_blacks = blacks.pawns | blacks.rooks | blacks.knights | blacks.bishops | blacks.queens | blacks.king;
        self.all_whites = whites.pawns | whites.rooks | whites.knights | whites.bishops | whites.queens | whites.king;
        self.all_pieces = self.all_blacks | self.all_whites;

        self.white_attacks = movegen::get_controlled_squares(self, White);
        self.black_attacks = movegen::get_controlled_squares(self, Black);
    }

    fn create_zobrist_key(&mut self) {
        // Creates the zobrist key for this board from scratch, assuming
        // that the initial value is 0. This should only be called once,
        // when the board is created; move-related methods update the key
        // incrementally.

        // First, the pieces
        for color in [Black, White] {
            for piece_type in [King, Queen, Bishop, Knight, Rook, Pawn] {
                self.get_pieces(color).get_pieces_of_type(piece_type)
                    .piece_indices()
                    .for_each(|sq| self.zobrist_key ^= zobrist::get_key_for_piece(piece_type, color, sq));
            }
        }

        // Then, castling rights
        self.zobrist_key ^= zobrist::get_key_castling(&self.castling_rights);

        // e.p. square, if it's set and there is a pawn ready to capture it...
        if self.update_ep_zobrist(self.turn) {
            self.zobrist_key ^= zobrist::get_key_ep_square(self.ep_square().first_piece_index());
        }

        // ...finally, white's turn
        if self.turn == White {
            self.zobrist_key ^= zobrist::get_key_white_turn();
        }
    }

    fn get_pieces_mut(&mut self, color: Color) -> &mut Pieces {
        match color {
            White => &mut self.white_pieces,
            Black => &mut self.black_pieces,
        }
    }

    fn piece_on_mut(&mut self, square: u8) -> &mut Option<PieceType> {
        &mut self.piece_on_square[square as usize]
    }

    fn update_ep_zobrist(&self, color_capturing: Color) -> bool {
        // Returns whether the current board should have the zobrist flag
        // for an active e.p. square on. This is only true if the e.p.
        // square is set AND there is a pawn of the capturing color able
        // to take on it.
        !self.ep_square().is_empty() && !(
            attacks::ep_attackers(self.ep_square().first_piece_index() as usize) &
            self.get_pieces(color_capturing).pawns
        ).is_empty()
    }
}

impl Default for Board {
    fn default() -> Self {
        // The default FEN is hard-coded and correct, so we can unwrap the result safely
        Self::from_fen(DEFAULT_FEN).unwrap()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // Dump the pieces from the bitboards into an 8x8 array
        let mut pieces: [[Option<char>; 8]; 8] = [[None; 8]; 8];

        for color in [Black, White] {
            for piece_type in [King, Queen, Pawn, Knight, Bishop, Rook] {
                let piece_bb = self.get_pieces(color).get_pieces_of_type(piece_type);
                for square in piece_bb.piece_indices() {
                    let bbsquare = Square::new(square);
                    pieces[bbsquare.rank() as usize][bbsquare.file() as usize] = Some(piece_type.as_char(color));
                }
            }
        }

        writeln!(f, "{} to play, turn #{}\n", self.turn, self.full_turns)?;
        writeln!(f, "  ┌───┬───┬───┬───┬───┬───┬───┬───┐")?;

        for rank in (0..8).rev() {
            let pieces_line = (0..8)
                .map(|file| match pieces[rank][file] {
                    None => "   ".to_string(),
                    Some(c) => format!(" {} ", c),
                })
                .collect::<Vec<String>>()
                .join("│");

            writeln!(f, "{} │{}│", rank + 1, pieces_line)?;

            if rank != 0 {
                writeln!(f, "  ├───┼───┼───┼───┼───┼───┼───┼───┤")?;
            }
        }

        writeln!(f, "  └───┴───┴───┴───┴───┴───┴───┴───┘")?;
        writeln!(f, "    a   b   c   d   e   f   g   h ")?;
        Ok(())
    }
}

impl Pieces {
    pub fn get_pieces_of_type(&self, piece_type: PieceType) -> BitBoard {
        match piece_type {
            Pawn => self.pawns,
            Knight => self.knights,
            Bishop => self.bishops,
            Rook => self.rooks,
            Queen => self.queens,
            King => self.king,
        }
    }

    pub fn get_pieces_of_type_mut(&mut self, piece_type: PieceType) -> &mut BitBoard {
        match piece_type {
            Pawn => &mut self.pawns,
            Knight => &mut self.knights,
            Bishop => &mut self.bishops,
            Rook => &mut self.rooks,
            Queen => &mut self.queens,
            King => &mut self.king,
        }
    }

    pub fn apply_mask(&mut self, mask: BitBoard) {
        self.pawns &= mask;
        self.knights &= mask;
        self.bishops &= mask;
        self.rooks &= mask;
        self.queens &= mask;
        self.king &= mask;
    }
}
