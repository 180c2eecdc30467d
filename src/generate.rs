//! Generate random machines that are known to be solvable

use std::convert::TryFrom;

use rand::seq::index;
use rand::Rng;

use crate::machine::{Button, Joltage, Machine, Manual, Presses};
use crate::solve::lights::MAX_LIGHTS;

/// the most times a button is pressed in a planted solution
const MAX_PLANTED_PRESSES: Presses = 20;

/// Generate a machine with `counter_count` counters and `button_count` buttons.
///
/// Each button is wired to a random non-empty set of counters and pressed a
/// random number of times; the joltage requirements are the levels those
/// presses reach and the indicator is their parity. The planted presses are
/// returned with the machine, but they are not necessarily the fewest.
///
/// Panics if `counter_count` is zero or wider than `MAX_LIGHTS`, or if
/// `button_count` is large enough that a level could overflow `Joltage`.
pub fn generate_machine(
    counter_count: usize,
    button_count: usize,
    rng: &mut impl Rng,
) -> (Machine, Vec<Presses>) {
    assert!(counter_count > 0, "a machine needs at least one counter");
    assert!(
        counter_count <= MAX_LIGHTS,
        "a machine has at most {} counters",
        MAX_LIGHTS
    );
    assert!(
        button_count as Presses <= Presses::from(Joltage::max_value()) / MAX_PLANTED_PRESSES,
        "too many buttons for joltage levels to fit"
    );
    let buttons: Vec<Button> = (0..button_count)
        .map(|_| {
            let wired = rng.gen_range(1, counter_count + 1);
            let mut counters = index::sample(rng, counter_count, wired).into_vec();
            counters.sort_unstable();
            Button::new(counters)
        })
        .collect();
    let planted: Vec<Presses> = (0..button_count)
        .map(|_| rng.gen_range(0, MAX_PLANTED_PRESSES + 1))
        .collect();
    let levels: Vec<Presses> = (0..counter_count)
        .map(|counter| {
            buttons
                .iter()
                .zip(&planted)
                .filter(|(button, _)| button.affects(counter))
                .map(|(_, &p)| p)
                .sum()
        })
        .collect();
    let indicator = levels.iter().map(|&level| level % 2 == 1).collect();
    let joltage = levels
        .iter()
        .map(|&level| Joltage::try_from(level).expect("level is bounded by the planted presses"))
        .collect();
    debug!("planted presses: {:?}", planted);
    (Machine::new(Some(indicator), buttons, Some(joltage)), planted)
}

/// Generate a manual of `machine_count` machines, all of the same shape
pub fn generate_manual(
    machine_count: usize,
    counter_count: usize,
    button_count: usize,
    rng: &mut impl Rng,
) -> Manual {
    let machines = (0..machine_count)
        .map(|_| generate_machine(counter_count, button_count, rng).0)
        .collect();
    Manual::new(machines)
}
