//! Factory machines and the manual that lists them

use std::fmt::{self, Display};
use std::fs;
use std::path::Path;

use itertools::Itertools;

use crate::error::{ManualFromFileError, ParseError, ParseErrorType};
use crate::parse::{parse_machine, parse_manual};
use crate::solve::{joltage, lights, SolveResult};

/// Index of a counter (or indicator light) on a machine
pub type CounterId = usize;
/// Index of a button on a machine
pub type ButtonId = usize;
/// A counter's required joltage level
pub type Joltage = u32;
/// How many times a button is pressed
pub type Presses = u64;

/// A button that increments (or toggles) a fixed set of counters
#[derive(Clone, Debug, PartialEq)]
pub struct Button {
    counters: Vec<CounterId>,
}

impl Button {
    /// creates a button wired to the given counters
    pub fn new(counters: Vec<CounterId>) -> Self {
        Self { counters }
    }

    /// the counters this button is wired to, in input order
    pub fn counters(&self) -> &[CounterId] {
        &self.counters
    }

    /// true if pressing this button changes the given counter
    pub fn affects(&self, counter: CounterId) -> bool {
        self.counters.contains(&counter)
    }
}

impl Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.counters.iter().join(","))
    }
}

/// A single machine: an indicator diagram, buttons and joltage requirements
///
/// The indicator diagram is only needed to configure the lights, and the
/// joltage requirements are only needed to configure the counters, so
/// either may be absent.
#[derive(Clone, Debug, PartialEq)]
pub struct Machine {
    indicator: Option<Vec<bool>>,
    buttons: Vec<Button>,
    joltage: Option<Vec<Joltage>>,
}

impl Machine {
    /// creates a machine from its parts
    pub fn new(
        indicator: Option<Vec<bool>>,
        buttons: Vec<Button>,
        joltage: Option<Vec<Joltage>>,
    ) -> Self {
        Self {
            indicator,
            buttons,
            joltage,
        }
    }

    /// parse a machine from one line of a manual
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse_machine(s)
    }

    /// the target light pattern, `true` is on
    pub fn indicator(&self) -> Result<&[bool], ParseError> {
        self.indicator
            .as_deref()
            .ok_or_else(|| ParseError::from_type(ParseErrorType::MissingIndicator))
    }

    /// the buttons, indexed by `ButtonId`
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// the required joltage of each counter, indexed by `CounterId`
    pub fn joltage(&self) -> Result<&[Joltage], ParseError> {
        self.joltage
            .as_deref()
            .ok_or_else(|| ParseError::from_type(ParseErrorType::MissingJoltage))
    }

    /// find the fewest presses that match the indicator diagram
    pub fn solve_lights(&self) -> Result<SolveResult, ParseError> {
        let indicator = self.indicator()?;
        if indicator.len() > lights::MAX_LIGHTS {
            return Err(ParseError::new(
                ParseErrorType::IndicatorTooLong,
                indicator.len(),
                0,
            ));
        }
        let result = lights::fewest_presses(indicator, &self.buttons);
        if let Some(solution) = result.solved() {
            debug_assert!(self.verify_lights(solution.presses()));
        }
        Ok(result)
    }

    /// find the fewest presses that reach every joltage requirement
    pub fn solve_joltage(&self) -> Result<SolveResult, ParseError> {
        let result = joltage::fewest_presses(self.joltage()?, &self.buttons);
        if let Some(solution) = result.solved() {
            debug_assert!(self.verify_joltage(solution.presses()));
        }
        Ok(result)
    }

    /// true if pressing each button the given number of times
    /// toggles exactly the lights that are on in the indicator diagram
    pub fn verify_lights(&self, presses: &[Presses]) -> bool {
        let indicator = match &self.indicator {
            Some(indicator) => indicator,
            None => return false,
        };
        if presses.len() != self.buttons.len() {
            return false;
        }
        indicator.iter().enumerate().all(|(light, &on)| {
            let toggles: Presses = self
                .buttons
                .iter()
                .zip(presses)
                .filter(|(button, _)| button.affects(light))
                .map(|(_, &p)| p)
                .sum();
            (toggles % 2 == 1) == on
        })
    }

    /// true if pressing each button the given number of times
    /// raises every counter exactly to its joltage requirement
    pub fn verify_joltage(&self, presses: &[Presses]) -> bool {
        let joltage = match &self.joltage {
            Some(joltage) => joltage,
            None => return false,
        };
        if presses.len() != self.buttons.len() {
            return false;
        }
        joltage.iter().enumerate().all(|(counter, &target)| {
            let level: Presses = self
                .buttons
                .iter()
                .zip(presses)
                .filter(|(button, _)| button.affects(counter))
                .map(|(_, &p)| p)
                .sum();
            level == Presses::from(target)
        })
    }
}

impl Display for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = Vec::with_capacity(self.buttons.len() + 2);
        if let Some(indicator) = &self.indicator {
            let lights: String = indicator.iter().map(|&on| if on { '#' } else { '.' }).collect();
            segments.push(format!("[{}]", lights));
        }
        segments.extend(self.buttons.iter().map(Button::to_string));
        if let Some(joltage) = &self.joltage {
            segments.push(format!("{{{}}}", joltage.iter().join(",")));
        }
        write!(f, "{}", segments.join(" "))
    }
}

/// A list of machines, one per line
#[derive(Clone, Debug, PartialEq)]
pub struct Manual {
    machines: Vec<Machine>,
}

impl Manual {
    /// creates a manual from a list of machines
    pub fn new(machines: Vec<Machine>) -> Self {
        Self { machines }
    }

    /// parse a manual, skipping blank lines
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        parse_manual(s)
    }

    /// read and parse a manual file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManualFromFileError> {
        let s = fs::read_to_string(path)?;
        let manual = Self::parse(&s)?;
        Ok(manual)
    }

    /// the machines in the manual
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    /// sum of the fewest presses to configure every machine's indicator lights,
    /// where a machine that cannot be configured counts as -1
    pub fn fewest_light_presses(&self) -> Result<i64, ParseError> {
        self.sum_results(Machine::solve_lights)
    }

    /// sum of the fewest presses to configure every machine's joltage counters,
    /// where a machine that cannot be configured counts as -1
    pub fn fewest_joltage_presses(&self) -> Result<i64, ParseError> {
        self.sum_results(Machine::solve_joltage)
    }

    fn sum_results(
        &self,
        solve: impl Fn(&Machine) -> Result<SolveResult, ParseError>,
    ) -> Result<i64, ParseError> {
        let mut total: i64 = 0;
        for (i, machine) in self.machines.iter().enumerate() {
            let result = solve(machine).map_err(|e| e.at_line(i + 1))?;
            match result.solved() {
                Some(solution) => debug!("machine {}: {} presses", i + 1, solution.total()),
                None => info!("machine {} cannot be configured", i + 1),
            }
            total = total.saturating_add(result.total_or_sentinel());
        }
        Ok(total)
    }
}

impl Display for Manual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for machine in &self.machines {
            writeln!(f, "{}", machine)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::{Button, Machine, Manual};
    use crate::error::ParseErrorType;

    const EXAMPLE: &str = "\
[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    #[test]
    fn example_lights() {
        let manual = Manual::parse(EXAMPLE).unwrap();
        let totals: Vec<_> = manual
            .machines()
            .iter()
            .map(|m| m.solve_lights().unwrap().total())
            .collect();
        assert_eq!(totals, vec![Some(2), Some(3), Some(2)]);
        assert_eq!(manual.fewest_light_presses().unwrap(), 7);
    }

    #[test]
    fn example_joltage() {
        let manual = Manual::parse(EXAMPLE).unwrap();
        let totals: Vec<_> = manual
            .machines()
            .iter()
            .map(|m| m.solve_joltage().unwrap().total())
            .collect();
        assert_eq!(totals, vec![Some(10), Some(12), Some(11)]);
        assert_eq!(manual.fewest_joltage_presses().unwrap(), 33);
    }

    #[test]
    fn infeasible_counts_as_sentinel() {
        let manual = Manual::parse("(0) {1,1}\n(0,1) {2,2}\n").unwrap();
        assert_eq!(manual.fewest_joltage_presses().unwrap(), -1 + 2);
    }

    #[test]
    fn missing_segment_propagates() {
        let manual = Manual::parse("[#] (0) {1}\n(0) {1}\n").unwrap();
        let error = manual.fewest_light_presses().unwrap_err();
        assert_eq!(*error.error_type(), ParseErrorType::MissingIndicator);
        assert_eq!(error.line(), Some(2));
    }

    #[test]
    fn indicator_too_long_is_an_error() {
        let machine = Machine::new(Some(vec![true; 70]), vec![Button::new(vec![0])], None);
        let manual = Manual::new(vec![machine]);
        let error = manual.fewest_light_presses().unwrap_err();
        assert_eq!(*error.error_type(), ParseErrorType::IndicatorTooLong);
        assert_eq!(error.line(), Some(1));
    }

    #[test]
    fn display_round_trip() {
        let manual = Manual::parse(EXAMPLE).unwrap();
        assert_eq!(manual.to_string(), EXAMPLE);
        assert_eq!(Manual::parse(&manual.to_string()).unwrap(), manual);
    }

    #[test]
    fn verify() {
        let machine = Machine::new(
            Some(vec![true, false]),
            vec![Button::new(vec![0]), Button::new(vec![0, 1])],
            Some(vec![3, 1]),
        );
        assert!(machine.verify_joltage(&[2, 1]));
        assert!(!machine.verify_joltage(&[1, 2]));
        assert!(!machine.verify_joltage(&[2]));
        assert!(machine.verify_lights(&[1, 0]));
        assert!(!machine.verify_lights(&[0, 2]));
        assert!(!machine.verify_lights(&[0, 1]));
    }
}
