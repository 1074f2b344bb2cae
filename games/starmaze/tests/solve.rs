//! A full solve of a small maze, checked both as a golden trace and
//! through the level's state accessors.

use gridfall_starmaze::Starmaze;
use gridfall_world::{replay_suite, Level, ReplayCase};

const ORBIT: &str = "6 4 0\nOrbit\n######\n#@.*.#\n#..*.#\n######";
const ORBIT_RECORDING: &str = "\
^
> 1,1,. 2,1,@
> 2,1,. 3,1,@
v 3,1,. 3,2,@
> 3,2,. 4,2,@";

#[test]
fn bundled_recording_replays_cleanly() {
    let cases = [ReplayCase {
        name: "orbit",
        level: ORBIT,
        recording: ORBIT_RECORDING,
    }];
    let failures = replay_suite::<Starmaze>(&cases).expect("level loads");
    assert!(failures.is_empty(), "unexpected divergences: {failures:?}");
}

#[test]
fn collecting_every_star_solves_the_level() {
    let mut level = Level::<Starmaze>::new();
    level.load("orbit", ORBIT).expect("level loads");
    assert_eq!(level.count("STARS"), 2);
    assert_eq!(level.status(), "Stars: 2");

    // Into the wall: nothing moves.
    level.resolve('^');
    assert_eq!(level.visible(1, 1), Some('@'));

    level.resolve('>');
    level.resolve('>');
    assert_eq!(level.count("STARS"), 1);
    assert_eq!(level.status(), "Stars: 1");
    assert!(!level.succeeded());
    // The swallowed star's cell is walkable space again.
    assert_eq!(level.visible(2, 1), Some('.'));

    level.resolve('v');
    assert_eq!(level.count("STARS"), 0);
    assert_eq!(level.status(), "Success!");
    assert!(level.succeeded());

    // Success does not freeze the board; the player can wander on.
    level.resolve('>');
    assert_eq!(level.visible(4, 2), Some('@'));
}
