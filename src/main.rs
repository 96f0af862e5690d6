//! 16-bit MIPS Pipeline Simulator CLI.
//!
//! Assembles (or loads) a program, runs it to completion under the
//! configured cycle cap, and prints the final architectural state and the
//! execution statistics.
//!
//! # Usage
//!
//! The simulator accepts either an assembly source file (`--file`) or a
//! pre-assembled program with one 16-bit binary word per line (`--bin`).

use clap::Parser;
use std::{fs, process};

use mips16_emulator::asm;
use mips16_emulator::config::Config;
use mips16_emulator::core::Cpu;
use mips16_emulator::sim::{loader, runner};

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "16-bit MIPS Cycle-Accurate Pipeline Simulator")]
struct Args {
    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    /// Assembly source file.
    #[arg(short, long)]
    file: Option<String>,

    /// Pre-assembled program, one 16-bit binary word per line.
    #[arg(long)]
    bin: Option<String>,

    /// Print a per-stage trace of every cycle.
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();
    let config: Config = match fs::read_to_string(&args.config) {
        Ok(content) => toml::from_str(&content).expect("Failed to parse config"),
        Err(_) => Config::default(),
    };

    let program_lines: Vec<String> = if let Some(path) = &args.file {
        let source = loader::load_text(path);
        let program = asm::assemble(&source);
        for warning in &program.warnings {
            eprintln!("Warning: {}", warning);
        }
        program.binary_lines()
    } else if let Some(path) = &args.bin {
        loader::load_binary_lines(path)
    } else {
        eprintln!("Error: No program specified.");
        eprintln!("Usage:");
        eprintln!("  Assembly source:  --file <program.asm>");
        eprintln!("  Binary program:   --bin <program.txt>");
        process::exit(1);
    };

    let mut cpu = Cpu::new();
    cpu.trace = args.trace || config.general.trace_instructions;
    cpu.load_program(&program_lines);

    println!("[*] Loaded {} instructions", cpu.instr_mem.len());

    let outcome = runner::run_to_completion(&mut cpu, config.sim.max_cycles);
    if !outcome.completed {
        eprintln!(
            "\n[!] Cycle cap of {} reached without completing; stopping.",
            config.sim.max_cycles
        );
    }

    println!();
    cpu.dump_state();
    cpu.stats.print();
}
