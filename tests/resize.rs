use rand::SeedableRng;
use rand::rngs::StdRng;
use termlife::engine::Automaton;
use termlife::rule_set::B3S23;

fn random_world(w: usize, h: usize, seed: u64) -> Automaton {
    let mut world = Automaton::with_size(B3S23, w, h);
    world.randomize(&mut StdRng::seed_from_u64(seed));
    world
}

#[test]
fn shrinking_keeps_top_left() {
    let mut world = random_world(10, 10, 1);
    let before = world.board().clone();

    world.resize_preserving(5, 5);

    assert_eq!(world.dimensions(), (5, 5));
    for y in 0..5 {
        for x in 0..5 {
            assert_eq!(world.get(x, y), before.get(x, y), "cell ({x}, {y})");
        }
    }
}

#[test]
fn growing_zero_fills() {
    let mut world = random_world(5, 5, 2);
    let before = world.board().clone();

    world.resize_preserving(10, 10);

    assert_eq!(world.dimensions(), (10, 10));
    for y in 0..10 {
        for x in 0..10 {
            let expected = x < 5 && y < 5 && before.get(x, y);
            assert_eq!(world.get(x, y), expected, "cell ({x}, {y})");
        }
    }
}

#[test]
fn uneven_resize() {
    let mut world = random_world(12, 3, 3);
    let before = world.board().clone();

    world.resize_preserving(4, 9);

    for y in 0..9 {
        for x in 0..4 {
            let expected = y < 3 && before.get(x, y);
            assert_eq!(world.get(x, y), expected, "cell ({x}, {y})");
        }
    }

    // stepping after a resize must see a scratch board of the new size
    world.step();
    assert_eq!(world.dimensions(), (4, 9));
}
