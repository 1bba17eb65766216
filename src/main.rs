use std::path::PathBuf;

use clap::{arg, command, value_parser};
use color_eyre::eyre::{Result, WrapErr};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use vm16::console::Terminal;
use vm16::memory::StdMem;
use vm16::processor::Processor;

fn main() -> Result<()> {
    color_eyre::install()?; // rust error handling
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .unwrap(); // logging

    let image_arg =
        arg!(<image> "Path to the binary program image").value_parser(value_parser!(PathBuf));

    let matches = command!().arg(image_arg).get_matches();
    let image = matches.get_one::<PathBuf>("image").unwrap();

    let mut memory = StdMem::from_file(image)
        .wrap_err_with(|| format!("could not load program image `{}`", image.display()))?;

    let mut cpu = Processor::new();
    let mut console = Terminal;
    cpu.run_until_halt(&mut memory, &mut console)?;

    Ok(())
}
