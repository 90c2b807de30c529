use clap::{Args, Parser, Subcommand, ValueEnum};
use memmap2::Mmap;
use mini65_core::config::{DEFAULT_STEP_LIMIT, FILL_BYTE};
use mini65_core::emulator::{check_fill_byte, Emulator, Stop};
use mini65_core::trace::{StepRecord, Tracer};
use mini65_core::{disasm, utils, Error, Result};
use std::{fs::File, ops::Deref, path::PathBuf};

/// Eight NOOPs, HALT, NOOP
const DEMO_PROGRAM: [u8; 10] = [0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0xFF];

#[derive(Parser, Debug)]
#[command(name = "mini65", version = "0.1.0",
    about = "A tiny 65xx-flavoured byte-code virtual machine", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a program until it halts
    Run(RunArgs),
    /// Print a listing of a program
    Disasm(ImageArgs),
}

#[derive(Args, Debug)]
pub struct ImageArgs {
    /// Path to the program image (the built-in demo runs when omitted)
    path: Option<PathBuf>,
    /// How the program file is encoded
    #[arg(short, long, value_enum, default_value = "bin")]
    format: Format,
    /// Program bytes given inline as hex, e.g. "a9 05 aa 00"
    #[arg(long, conflicts_with = "path")]
    hex: Option<String>,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    image: ImageArgs,
    /// Print halt flag, instruction register and program counter after every step
    #[arg(short, long)]
    trace: bool,
    /// Give up after this many instructions
    #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
    max_steps: u64,
    /// Byte written to memory not covered by the program; must execute as NOOP
    #[arg(long, value_parser = parse_fill, default_value_t = FILL_BYTE)]
    fill: u8,
    /// Stop before executing the instruction at this address
    #[arg(short, long = "break", value_parser = parse_addr)]
    breakpoints: Vec<u16>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Raw bytes
    Bin,
    /// Hex text, `;` comments allowed
    Hex,
}

fn parse_fill(text: &str) -> std::result::Result<u8, String> {
    utils::parse_u8(text)
        .and_then(check_fill_byte)
        .map_err(|e| e.to_string())
}

fn parse_addr(text: &str) -> std::result::Result<u16, String> {
    utils::parse_u16(text).map_err(|e| e.to_string())
}

/// Program bytes, either mapped from a file or owned.
enum Image {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Image {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Image::Mapped(mmap) => &mmap[..],
            Image::Owned(bytes) => &bytes[..],
        }
    }
}

fn load_image(args: &ImageArgs) -> Result<Image> {
    if let Some(hex) = &args.hex {
        return Ok(Image::Owned(utils::parse_hex(hex)?));
    }
    let Some(path) = &args.path else {
        return Ok(Image::Owned(DEMO_PROGRAM.to_vec()));
    };

    let path_str = path.to_string_lossy().to_string();
    let file = File::open(path)
        .map_err(|e| Error::IoError(e, path_str.clone()))?;
    let len = file.metadata()
        .map_err(|e| Error::IoError(e, path_str.clone()))?
        .len();

    let bytes = if len == 0 {
        Image::Owned(Vec::new())
    } else {
        // SAFETY: the file is opened read-only and only read while `file` is alive.
        let mmap = unsafe { Mmap::map(&file) }
            .map_err(|e| Error::IoError(e, path_str.clone()))?;
        Image::Mapped(mmap)
    };

    match args.format {
        Format::Bin => Ok(bytes),
        Format::Hex => {
            let text = String::from_utf8_lossy(&bytes);
            Ok(Image::Owned(utils::parse_hex(&text)?))
        }
    }
}

/// Prints one line per step: halt flag, instruction register, program counter.
#[derive(Debug)]
struct LineTracer;

impl Tracer for LineTracer {
    fn on_step(&mut self, record: &StepRecord) {
        println!("{:x}  {:x}  {:x}\t{}", record.halted as u8, record.ir(), record.pc, record.insn);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        mini65_core::log::Level::Trace
    } else {
        mini65_core::log::Level::Warn
    };
    mini65_core::log::log_init(level);

    match cli.command {
        Commands::Run(args) => cmd_run(args),
        Commands::Disasm(args) => cmd_disasm(args),
    }
}

fn cmd_run(args: RunArgs) -> Result<()> {
    let image = load_image(&args.image)?;

    let mut builder = Emulator::new()
        .fill_byte(args.fill)
        .step_limit(args.max_steps);
    for addr in args.breakpoints {
        builder = builder.breakpoint(addr);
    }
    if args.trace {
        builder = builder.tracer(Box::new(LineTracer));
    }
    let mut emulator = builder.build()?;

    emulator.load_program(&image)?;

    match emulator.run() {
        Stop::Halted(steps) => {
            println!("CPU halted.");
            println!("[mini65] {} steps, A={:#04x} X={:#04x} Y={:#04x}",
                steps,
                emulator.machine().state().a(),
                emulator.machine().state().x(),
                emulator.machine().state().y());
            println!("Exit code 0");
            Ok(())
        }
        Stop::Breakpoint(addr) => {
            println!("[mini65] breakpoint at {:#06x} after {} steps", addr, emulator.steps());
            Ok(())
        }
        Stop::StepLimit(_) => {
            let err = Error::StepLimitExceeded(args.max_steps);
            eprintln!("[mini65] program exited with error: {}", err);
            Err(err)
        }
    }
}

fn cmd_disasm(args: ImageArgs) -> Result<()> {
    let image = load_image(&args)?;
    print!("{}", disasm::disassemble(&image, 0));
    Ok(())
}
