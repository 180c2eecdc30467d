use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use factory::solve::lights::MAX_LIGHTS;

const DEFAULT_MACHINE_COUNT: usize = 1;
const DEFAULT_COUNTER_COUNT: usize = 4;
const DEFAULT_BUTTON_COUNT: usize = 6;

#[derive(Clone, Debug)]
pub(crate) struct Options {
    source: Source,
    parts: Parts,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else {
            Source::Generate(Generate {
                machine_count: parse_count(matches, "count", DEFAULT_MACHINE_COUNT)?,
                counter_count: parse_counter_count(matches)?,
                button_count: parse_count(matches, "buttons", DEFAULT_BUTTON_COUNT)?,
                output_path: matches.value_of("output").map(PathBuf::from),
            })
        };
        let parts = match matches.value_of("part") {
            None => Parts::Both,
            Some("1") => Parts::Lights,
            Some("2") => Parts::Joltage,
            Some(part) => return Err(anyhow!("invalid part: {}", part)),
        };
        Ok(Self { source, parts })
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn solve_lights(&self) -> bool {
        self.parts != Parts::Joltage
    }

    pub fn solve_joltage(&self) -> bool {
        self.parts != Parts::Lights
    }
}

fn parse_count(matches: &ArgMatches<'_>, name: &str, default: usize) -> Result<usize> {
    let count = match matches.value_of(name) {
        None => return Ok(default),
        Some(s) => s
            .parse::<usize>()
            .with_context(|| format!("invalid {}: {}", name, s))?,
    };
    if count == 0 {
        return Err(anyhow!("{} must be at least 1", name));
    }
    Ok(count)
}

/// every counter is also an indicator light, so counters are limited to the widest diagram
fn parse_counter_count(matches: &ArgMatches<'_>) -> Result<usize> {
    let count = parse_count(matches, "counters", DEFAULT_COUNTER_COUNT)?;
    if count > MAX_LIGHTS {
        return Err(anyhow!("counters must be at most {}", MAX_LIGHTS));
    }
    Ok(count)
}

#[derive(Clone, Debug)]
pub(crate) enum Source {
    File(PathBuf),
    Generate(Generate),
}

#[derive(Clone, Debug)]
pub(crate) struct Generate {
    pub machine_count: usize,
    pub counter_count: usize,
    pub button_count: usize,
    pub output_path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Parts {
    Lights,
    Joltage,
    Both,
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("Factory")
        .about("Configure factory machines with the fewest button presses")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "input"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate a random manual")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("read a manual from a file")
                .display_order(1),
        )
        .arg(
            Arg::with_name("part")
                .short("p")
                .long("part")
                .takes_value(true)
                .possible_values(&["1", "2"])
                .help("only configure indicator lights (1) or joltage counters (2)"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .takes_value(true)
                .requires("generate")
                .help("the number of machines to generate"),
        )
        .arg(
            Arg::with_name("counters")
                .long("counters")
                .takes_value(true)
                .requires("generate")
                .help("the number of counters on each generated machine"),
        )
        .arg(
            Arg::with_name("buttons")
                .long("buttons")
                .takes_value(true)
                .requires("generate")
                .help("the number of buttons on each generated machine"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .takes_value(true)
                .value_name("PATH")
                .requires("generate")
                .help("save the generated manual to a file"),
        )
}

#[cfg(test)]
mod test {
    use super::{clap_app, Options, Source};

    fn options(args: &[&str]) -> anyhow::Result<Options> {
        let matches = clap_app().get_matches_from_safe(args)?;
        Options::from_arg_matches(&matches)
    }

    #[test]
    fn generate_counts() {
        let options = options(&["factory", "-g", "-c", "3", "--counters", "64"]).unwrap();
        match options.source() {
            Source::Generate(generate) => {
                assert_eq!(generate.machine_count, 3);
                assert_eq!(generate.counter_count, 64);
            }
            Source::File(_) => panic!("expected a generated manual"),
        }
        assert!(options.solve_lights() && options.solve_joltage());
    }

    #[test]
    fn invalid_counts() {
        assert!(options(&["factory", "-g", "--counters", "65"]).is_err());
        assert!(options(&["factory", "-g", "--buttons", "0"]).is_err());
        assert!(options(&["factory", "-g", "-c", "x"]).is_err());
    }

    #[test]
    fn part_and_source() {
        let options = options(&["factory", "-i", "manual.txt", "-p", "2"]).unwrap();
        assert!(!options.solve_lights() && options.solve_joltage());
        assert!(matches!(options.source(), Source::File(_)));
        assert!(clap_app()
            .get_matches_from_safe(&["factory", "-i", "manual.txt", "-o", "out.txt"])
            .is_err());
    }
}
