use libemulator::computer::Computer;
use log::debug;

use crate::command::{Command, CommandArgs, CommandError, Number};

/// Cap on steps for the run-until commands when no limit is given.
const DEFAULT_RUN_LIMIT: u64 = 1_000_000;

const HELP: &str = "\
s [n]                step n instructions (default 1)
r [max]              run until HALT or max cycles
eb <pc> [max]        run until PC reaches <pc>
er <reg> <v> [max]   run until register <reg> holds <v>
d [start] [end]      dump memory (default 0x00..0x20)
regs                 dump registers
state                show PC, flags and cycle count
jmp <addr>           set PC
reset                reset the CPU, keeping registers and memory
q                    quit";

pub enum Flow {
    Continue,
    Quit,
}

pub fn run(computer: &mut Computer, max_cycles: usize) -> anyhow::Result<()> {
    println!("{}", computer.cpu.state());

    while let Some(command) = Command::prompt()? {
        match execute_command(command.args(), computer, max_cycles) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(e) => eprintln!("!> {}", e),
        }
    }

    Ok(())
}

pub fn execute_command<'a, I>(
    mut args: CommandArgs<'a, I>,
    computer: &mut Computer,
    max_cycles: usize,
) -> Result<Flow, CommandError>
where
    I: Iterator<Item = &'a str>,
{
    let name = match args.next() {
        Ok(name) => name,
        Err(_) => return Ok(Flow::Continue),
    };

    match name {
        "s" => {
            let Number(count) = args.next_parsed_or(Number(1))?;

            for _ in 0..count {
                if !computer.cpu.step() {
                    break;
                }
                print_step(computer);
            }
        }
        "r" => {
            let Number(max) = args.next_parsed_or(Number(max_cycles as u64))?;
            let state = computer.run(max as usize);
            println!("{}", state);
        }
        "eb" => {
            let Number(break_pc) = args.next_parsed()?;
            let Number(limit) = args.next_parsed_or(Number(DEFAULT_RUN_LIMIT))?;

            run_until(computer, limit, |computer| {
                computer.cpu.pc() as u64 == break_pc
            });
        }
        "er" => {
            let Number(register) = args.next_parsed()?;
            let Number(value) = args.next_parsed()?;
            let Number(limit) = args.next_parsed_or(Number(DEFAULT_RUN_LIMIT))?;

            run_until(computer, limit, |computer| {
                computer.cpu.register(register as usize) as u64 == value
            });
        }
        "d" => {
            let Number(start) = args.next_parsed_or(Number(0))?;
            let Number(end) = args.next_parsed_or(Number(
                libemulator::computer::DEFAULT_DUMP_END as u64,
            ))?;

            println!("{}", computer.dump_memory(start as usize, end as usize));
        }
        "regs" => println!("{}", computer.dump_registers()),
        "state" => println!("{}", computer.cpu.state()),
        "jmp" => {
            let Number(addr) = args.next_parsed()?;
            let addr = libisa::Address::try_from(addr)
                .map_err(|_| CommandError::ParseError(format!("address {:#x} out of range", addr)))?;

            computer.cpu.jump(addr);
        }
        "reset" => {
            computer.reset();
            println!("{}", computer.cpu.state());
        }
        "h" | "help" => println!("{}", HELP),
        "q" => return Ok(Flow::Quit),
        _ => return Err(CommandError::UnknownCommand(name.to_string())),
    }

    let unused_arg_count = args.remaining();
    if unused_arg_count != 0 {
        eprintln!("{} unused command arguments!", unused_arg_count);
    }

    Ok(Flow::Continue)
}

fn run_until<F>(computer: &mut Computer, limit: u64, mut reached: F)
where
    F: FnMut(&Computer) -> bool,
{
    let mut executed = 0;

    while !reached(computer) {
        if executed >= limit {
            eprintln!("Didn't reach break condition by {} executed instructions", executed);
            return;
        }

        if !computer.cpu.step() {
            eprintln!("Halted after {} instructions", executed);
            return;
        }
        executed += 1;
    }

    debug!("Break condition reached");
    println!("Executed {} instructions", executed);
}

pub fn print_step(computer: &Computer) {
    let address = computer.cpu.current_address;
    let instruction = computer
        .cpu
        .current_instruction
        .map(|instruction| instruction.to_string())
        .unwrap_or_default();

    match computer.source_line(address) {
        Some(line) => println!("{:#04x}: {:<16} ; line {}", address, instruction, line),
        None => println!("{:#04x}: {}", address, instruction),
    }
}
