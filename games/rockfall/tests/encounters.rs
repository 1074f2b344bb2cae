//! State-level checks for pickups, hazards, pushes and the exit. Where the
//! golden-trace suite pins down the order of changes, these tests pin down
//! scores, counters, messages and the final board.

use gridfall_rockfall::Rockfall;
use gridfall_world::Level;

fn load(name: &str, text: &str) -> Level<Rockfall> {
    let mut level = Level::new();
    level.load(name, text).expect("level loads");
    level
}

#[test]
fn status_line_shows_help_then_star_count() {
    let mut level = load("cavern", "5 4 10\nFirst Cave\n#####\n#@*.#\n#...#\n#####");
    assert_eq!(
        level.status(),
        "Level cavern: First Cave     Use arrow keys to move, space to stand still     \
         Score: 0     Moves: 10"
    );
    level.resolve('.');
    assert_eq!(
        level.status(),
        "Level cavern: First Cave     Stars: 1     Score: 0     Moves: 9"
    );
}

#[test]
fn earth_star_clock_and_exit_pay_out() {
    let mut level = load("loot", "8 4 0\nLoot\n########\n#@:*CX.#\n#......#\n########");
    assert_eq!(level.count("STARS"), 1);

    level.record();
    level.resolve('>');
    assert_eq!(level.score(), 1);
    level.resolve('>');
    assert_eq!(level.score(), 11);
    assert_eq!(level.count("STARS"), 0);
    level.resolve('>');
    assert_eq!(level.score(), 16);
    assert_eq!(level.count("MOVES"), 1247);
    level.resolve('>');

    assert_eq!(level.score(), 266);
    assert_eq!(level.count("MOVES"), 1246);
    assert!(level.succeeded());
    assert!(level.status().contains("Success!"));
    assert_eq!(level.visible(5, 1), Some('X'));
    assert_eq!(
        level.take_recording(),
        vec![
            "> 1,1,. 2,1,@",
            "> 2,1,. 3,1,@",
            "> 3,1,. 4,1,@",
            "> 4,1,.",
        ]
    );
}

#[test]
fn landmine_kills_on_contact() {
    let mut level = load("mine", "5 3 0\nMine\n#####\n#@!.#\n#####");
    level.record();
    level.resolve('>');
    assert_eq!(level.visible(2, 1), Some('?'));
    assert!(level.status().contains("Killed by an exploding landmine"));
    assert!(!level.succeeded());

    // The board is dead: further commands are recorded but move nothing.
    level.resolve('<');
    assert_eq!(level.take_recording(), vec!["> 1,1,. 2,1,?", "<"]);
}

#[test]
fn running_out_of_moves_is_fatal() {
    let mut level = load("rush", "5 3 2\nRush\n#####\n#@..#\n#####");
    level.resolve('>');
    level.resolve('>');
    assert_eq!(level.count("MOVES"), 0);
    assert!(!level.status().contains("Killed"));

    level.resolve('>');
    assert_eq!(level.count("MOVES"), -1);
    assert_eq!(level.visible(3, 1), Some('?'));
    assert!(level.status().contains("Killed by running out of time"));
}

#[test]
fn pushed_boulder_crushes_a_monster() {
    let mut level = load("crush", "6 3 0\nCrush\n######\n#@OM.#\n######");
    level.record();
    level.resolve('>');
    assert_eq!(level.take_recording(), vec!["> 1,1,. 2,1,@ 3,1,O"]);
    assert_eq!(level.score(), 100);
    assert_eq!(level.visible(3, 1), Some('O'));
    assert!(!level.status().contains("Killed"));
}

#[test]
fn baby_trades_itself_for_a_star_in_a_cage() {
    let mut level = load("cage", "6 4 0\nCage\n######\n#S+..#\n#..@.#\n######");
    level.record();
    level.resolve('.');
    assert_eq!(level.take_recording(), vec![". 1,1,. 2,1,*"]);
    assert_eq!(level.score(), 20);
    // Caging swaps one star for another, so the tally is unchanged.
    assert_eq!(level.count("STARS"), 1);

    level.resolve('^');
    level.resolve('<');
    assert_eq!(level.score(), 30);
    assert_eq!(level.count("STARS"), 0);
    assert!(level.status().contains("Stars: 0"));
}

#[test]
fn baby_catches_the_player() {
    let mut level = load("nip", "5 4 0\nNip\n#####\n#S@.#\n#...#\n#####");
    level.record();
    level.resolve('.');
    assert_eq!(level.take_recording(), vec![". 1,1,. 2,1,?"]);
    assert!(level.status().contains("Killed by the little monsters"));
    assert!(!level.succeeded());
}

#[test]
fn arrows_push_vertically_and_fly_off_sideways() {
    let mut level = load("hoist", "6 5 0\nHoist\n######\n#....#\n#.<..#\n#.@..#\n######");
    level.record();
    level.resolve('^');
    assert_eq!(
        level.take_recording(),
        vec!["^ 2,1,< 2,2,@ 2,3,. 1,1,< 2,1,."]
    );
    assert_eq!(level.visible(1, 1), Some('<'));
    assert_eq!(level.visible(2, 2), Some('@'));
}

#[test]
fn arrows_refuse_a_horizontal_push() {
    let mut level = load("jam", "6 4 0\nJam\n######\n#@<..#\n#....#\n######");
    level.record();
    level.resolve('>');
    assert_eq!(level.take_recording(), vec![">"]);
    assert_eq!(level.visible(1, 1), Some('@'));
    assert_eq!(level.visible(2, 1), Some('<'));
}

#[test]
fn balloons_push_sideways_like_boulders() {
    let mut level = load("bump", "6 3 0\nBump\n######\n#@^..#\n######");
    level.record();
    level.resolve('>');
    assert_eq!(level.take_recording(), vec!["> 1,1,. 2,1,@ 3,1,^"]);
    assert_eq!(level.visible(3, 1), Some('^'));
}

#[test]
fn teleport_moves_the_player_to_the_arrival_point() {
    let mut level = load(
        "warp",
        "8 5 0\nWarp\n########\n#@T....#\n#......#\n#....A.#\n########",
    );
    assert_eq!(level.visible(5, 3), Some('.'));

    level.record();
    level.resolve('>');
    assert_eq!(level.take_recording(), vec!["> 1,1,. 2,1,. 5,3,@"]);
    assert_eq!(level.score(), 20);
    assert_eq!(level.visible(5, 3), Some('@'));
    assert_eq!(level.visible(2, 1), Some('.'));
}

#[test]
fn exit_is_sealed_while_stars_remain() {
    let mut level = load("seal", "6 3 0\nSeal\n######\n#@X*.#\n######");
    level.record();
    level.resolve('>');
    assert_eq!(level.take_recording(), vec![">"]);
    assert!(!level.succeeded());
    assert_eq!(level.visible(1, 1), Some('@'));
}
