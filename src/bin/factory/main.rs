#![warn(rust_2018_idioms)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unused_qualifications)]

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use factory::generate::generate_manual;
use factory::machine::Manual;
use tempfile::NamedTempFile;

use crate::options::{Options, Source};

mod options;

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::from_args()?;
    let manual = source_manual(options.source())?;
    log::info!("{} machines", manual.machines().len());
    if options.solve_lights() {
        let presses = manual.fewest_light_presses()?;
        println!("Part 1: {}", presses);
    }
    if options.solve_joltage() {
        let presses = manual.fewest_joltage_presses()?;
        println!("Part 2: {}", presses);
    }
    Ok(())
}

fn source_manual(source: &Source) -> Result<Manual> {
    match source {
        Source::File(path) => {
            log::info!("Reading manual from \"{}\"", path.display());
            Manual::from_file(path)
                .with_context(|| format!("Error reading manual: {}", path.display()))
        }
        Source::Generate(generate) => {
            let manual = generate_manual(
                generate.machine_count,
                generate.counter_count,
                generate.button_count,
                &mut rand::thread_rng(),
            );
            if let Some(path) = &generate.output_path {
                save_manual(&manual, path)?;
                println!("Saved manual to {}", path.display());
            } else {
                print!("{}", manual);
            }
            Ok(manual)
        }
    }
}

/// write through a temporary file in the same directory, then move it into place
fn save_manual(manual: &Manual, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Error creating temporary file in {}", dir.display()))?;
    file.write_all(manual.to_string().as_bytes())?;
    file.persist(path)
        .with_context(|| format!("Error saving manual: {}", path.display()))?;
    Ok(())
}
