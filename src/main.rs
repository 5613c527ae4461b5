//! CLI entry point: parses arguments, builds the terminal host adapters,
//! loads the ROM, and drives the emulation loop until quit or a fault.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use chip::chip8::{ChipSet, Options};
use chip::resources::Rom;
use chip::runner::{LoopSignal, Runner};
use chip::terminal::{TerminalBell, TerminalHost, TerminalKeyboard};

/// sysexits-style exit codes, per the external interface contract.
mod exit {
    pub const OK: u8 = 0;
    pub const ROM_TOO_LARGE: u8 = 65;
    pub const ROM_NOT_FOUND: u8 = 66;
    pub const EXECUTION_FAULT: u8 = 70;
    pub const HOST_INIT_FAILED: u8 = 75;
}

#[derive(Parser, Debug)]
#[command(name = "chip8", version, about = "A CHIP-8 interpreter")]
struct Cli {
    /// Path to the ROM file to load.
    rom: PathBuf,

    /// CPU clock, in Hz.
    #[arg(long, default_value_t = chip::definitions::cpu::DEFAULT_HERTZ)]
    cpufreq: u64,

    /// Pixels per CHIP-8 pixel on the host surface.
    #[arg(long, default_value_t = 10)]
    vidscale: u32,

    /// Tone frequency for the sound timer gate, in Hz.
    #[arg(long, default_value_t = 440)]
    audiofreq: u32,

    /// Tone amplitude.
    #[arg(long, default_value_t = 20000)]
    ampl: u32,

    /// Enable verbose logging (CPU dumps on fault, trace-level opcodes).
    #[arg(short, long)]
    verbose: bool,

    /// Select the ORIGINAL_IMPL (Cowgod) dialect for 8XY6/8XYE/FX55/FX65.
    #[arg(long)]
    original: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let rom = match Rom::load(&cli.rom) {
        Ok(rom) => rom,
        Err(e @ chip::error::RomError::NotFound { .. }) => {
            log::error!("{}", e);
            return ExitCode::from(exit::ROM_NOT_FOUND);
        }
        Err(e @ chip::error::RomError::TooLarge { .. }) => {
            log::error!("{}", e);
            return ExitCode::from(exit::ROM_TOO_LARGE);
        }
    };

    let options = Options {
        original_impl: cli.original,
        verbose: cli.verbose,
    };
    let mut chip = ChipSet::new(&rom, options);

    let video = match TerminalHost::new(cli.vidscale) {
        Ok(v) => v,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::from(exit::HOST_INIT_FAILED);
        }
    };
    let audio = TerminalBell::new(cli.audiofreq, cli.ampl);
    let keyboard = TerminalKeyboard::new();
    let mut runner = Runner::new(video, audio, keyboard, cli.cpufreq);

    loop {
        match runner.pass(&mut chip) {
            Ok(LoopSignal::Continue) => continue,
            Ok(LoopSignal::Quit) => {
                log::info!("quit requested");
                return ExitCode::from(exit::OK);
            }
            Ok(LoopSignal::Reload) => {
                log::info!("reloading '{}'", rom.name());
                chip = ChipSet::new(&rom, options);
            }
            Err(fault) => {
                if cli.verbose {
                    log::error!("{}\n{}", fault, chip);
                } else {
                    log::error!("{}", fault);
                }
                return ExitCode::from(exit::EXECUTION_FAULT);
            }
        }
    }
}
