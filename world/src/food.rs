use rand::Rng;
use snake_arcade_core::{Board, Cell};

use crate::body::SnakeBody;

/// Chooses the next food cell.
///
/// Free cells are those not covered by `body`. The cell in `previous` is
/// skipped so food never reappears where it was just eaten, unless it is the
/// only free cell left. Returns `None` when the body covers the whole board.
pub(crate) fn place_food<R>(
    board: &Board,
    body: &SnakeBody,
    previous: Option<Cell>,
    rng: &mut R,
) -> Option<Cell>
where
    R: Rng + ?Sized,
{
    let occupied = body.occupied();
    let free: Vec<Cell> = board
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    match free.as_slice() {
        [] => None,
        [only] => Some(*only),
        _ => {
            let candidates: Vec<Cell> = free
                .into_iter()
                .filter(|cell| Some(*cell) != previous)
                .collect();
            let index = rng.gen_range(0..candidates.len());
            candidates.get(index).copied()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn never_lands_on_the_body() {
        let board = Board::new(4, 3);
        let body = SnakeBody::from_cells(vec![
            Cell::new(0, 0),
            Cell::new(1, 0),
            Cell::new(2, 0),
            Cell::new(3, 0),
            Cell::new(3, 1),
        ]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..200 {
            let cell = place_food(&board, &body, None, &mut rng).expect("free cells remain");
            assert!(board.contains(cell));
            assert!(!body.contains(cell, false));
        }
    }

    #[test]
    fn skips_the_previous_food_cell() {
        let board = Board::new(2, 1);
        let body = SnakeBody::from_cells(vec![Cell::new(9, 9)]);
        let previous = Cell::new(0, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        for _ in 0..50 {
            assert_eq!(
                place_food(&board, &body, Some(previous), &mut rng),
                Some(Cell::new(1, 0))
            );
        }
    }

    #[test]
    fn single_free_cell_is_returned_even_if_it_repeats() {
        let board = Board::new(2, 1);
        let body = SnakeBody::from_cells(vec![Cell::new(1, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        assert_eq!(
            place_food(&board, &body, Some(Cell::new(0, 0)), &mut rng),
            Some(Cell::new(0, 0))
        );
    }

    #[test]
    fn full_board_has_no_placement() {
        let board = Board::new(2, 1);
        let body = SnakeBody::from_cells(vec![Cell::new(0, 0), Cell::new(1, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        assert_eq!(place_food(&board, &body, None, &mut rng), None);
    }

    #[test]
    fn placement_is_deterministic_for_a_seed() {
        let board = Board::new(20, 12);
        let body = SnakeBody::spawn(Cell::new(0, 6), 3);
        let mut first = ChaCha8Rng::seed_from_u64(42);
        let mut second = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..20 {
            assert_eq!(
                place_food(&board, &body, None, &mut first),
                place_food(&board, &body, None, &mut second)
            );
        }
    }
}
