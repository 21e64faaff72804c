use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use libdeassembler::Deassembler;
use libemulator::{computer::Computer, DEFAULT_MAX_CYCLES};

mod command;
mod monitor;


#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Assembly source, or machine code with `--raw`
    program: PathBuf,

    /// Treat the program file as machine code loaded at address 0
    #[arg(short, long)]
    raw: bool,

    #[arg(short, long, default_value_t = DEFAULT_MAX_CYCLES)]
    max_cycles: usize,

    /// Print a listing of the program instead of running it
    #[arg(short, long)]
    disassemble: bool,

    /// Start the step-by-step monitor
    #[arg(short, long)]
    interactive: bool,

    /// Log every executed instruction (same as RUST_LOG=debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let (mut computer, image) = load(&args)?;

    if args.disassemble {
        print!("{}", Deassembler::new(image.iter()).deassemble_text());
        return Ok(());
    }

    if args.interactive {
        return monitor::run(&mut computer, args.max_cycles);
    }

    let state = if args.verbose {
        computer.run_with(args.max_cycles, |cpu| log::debug!("{}", cpu.state()))
    } else {
        computer.run(args.max_cycles)
    };

    println!("{}", state);
    println!("{}", computer.dump_registers());

    Ok(())
}

/// Loads the program named by `args`, returning its memory image too.
fn load(args: &Args) -> anyhow::Result<(Computer, Vec<u8>)> {
    let mut computer = Computer::new();

    if args.raw {
        let code = fs::read(&args.program)
            .with_context(|| format!("Failed to read {}", args.program.display()))?;
        computer.cpu.load_program(&code, 0)?;

        return Ok((computer, code));
    }

    let source = fs::read_to_string(&args.program)
        .with_context(|| format!("Failed to read {}", args.program.display()))?;
    computer.load_program(&source)?;

    let image = computer
        .assembly
        .as_ref()
        .map(|assembly| assembly.image())
        .unwrap_or_default();

    Ok((computer, image))
}
