//! Configure indicator lights. Every button toggles its lights, so pressing a
//! button twice does nothing and each button is pressed at most once.

use itertools::Itertools;

use crate::machine::{Button, ButtonId};
use crate::solve::{SolveResult, Solution};

type LightMask = u64;

/// the widest indicator diagram that fits in a `LightMask`
pub const MAX_LIGHTS: usize = 64;

/// Find the fewest presses that turn on exactly the lights that are on in
/// `indicator`. A diagram wider than `MAX_LIGHTS` cannot be configured.
pub fn fewest_presses(indicator: &[bool], buttons: &[Button]) -> SolveResult {
    if indicator.len() > MAX_LIGHTS {
        warn!("{} lights do not fit in a light mask", indicator.len());
        return SolveResult::Infeasible;
    }
    let target = mask(indicator.iter().positions(|&on| on), indicator.len());
    let masks = buttons
        .iter()
        .map(|button| mask(button.counters().iter().copied(), indicator.len()))
        .collect_vec();

    if target == 0 {
        return SolveResult::Solved(solution(&[], buttons.len()));
    }
    // smaller combinations first, so the first match has the fewest presses
    for count in 1..=buttons.len() {
        let found = (0..buttons.len())
            .combinations(count)
            .find(|combination| combination.iter().fold(0, |lights, &b| lights ^ masks[b]) == target);
        if let Some(pressed) = found {
            debug!("pressing buttons {:?}", pressed);
            return SolveResult::Solved(solution(&pressed, buttons.len()));
        }
    }
    SolveResult::Infeasible
}

/// the mask of the given lights, ignoring lights past the end of the diagram
fn mask(lights: impl Iterator<Item = usize>, len: usize) -> LightMask {
    lights.filter(|&light| light < len).fold(0, |mask, light| mask | 1 << light)
}

fn solution(pressed: &[ButtonId], button_count: usize) -> Solution {
    let mut presses = vec![0; button_count];
    for &b in pressed {
        presses[b] = 1;
    }
    Solution::new(presses)
}
