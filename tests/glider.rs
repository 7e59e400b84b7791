use termlife::board::BitBoard;
use termlife::engine::Automaton;
use termlife::rule_set::RuleSet;

const GLIDER: &str = "
    .#......
    ..#.....
    ###.....
    ........
    ........
    ........
    ........
    ........
";

/// Copy of `board` with every cell moved by `(dx, dy)`, wrapping around the edges
fn translated(board: &BitBoard, dx: usize, dy: usize) -> BitBoard {
    let (w, h) = board.dimensions();
    let mut res = BitBoard::new(w, h);

    for (x, y) in board.alive_cells() {
        res.set((x + dx) % w, (y + dy) % h, true);
    }

    res
}

#[test]
fn glider_moves_diagonally() -> anyhow::Result<()> {
    let start: BitBoard = GLIDER.parse()?;
    let mut world = Automaton::from_board(RuleSet::default(), start.clone());

    for _ in 0..4 {
        world.step();
    }

    assert_eq!(world.board(), &translated(&start, 1, 1));

    insta::assert_snapshot!(world.board().to_string(), @r"
    ........
    ..#.....
    ...#....
    .###....
    ........
    ........
    ........
    ........
    ");

    Ok(())
}

#[test]
fn glider_wraps_around_the_torus() -> anyhow::Result<()> {
    let start: BitBoard = GLIDER.parse()?;
    let mut world = Automaton::from_board("B3/S23".parse()?, start.clone());

    // one cell per 4 generations, 8 cells to come back around
    for generation in 1..=32 {
        world.step();
        assert_eq!(world.board().population(), 5, "generation {generation}");
    }

    assert_eq!(world.board(), &start);
    assert_eq!(world.generation(), 32);

    Ok(())
}
