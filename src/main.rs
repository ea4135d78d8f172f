use emu6502::bus::{Bus, MemoryMap};
use emu6502::cpu::{Cpu, Halt, RunExit};
use emu6502::savestate::SaveState;
use emu6502::timing::{Pacer, RealTimePacer, Unpaced};
use emu6502::{debug_flags, loader, mmio, shutdown, viewer};
use std::env;
use std::process;

/// Cycles run between checks of the quit flag.
const BATCH_CYCLES: u64 = 10_000;

const EXIT_CONFIG_ERROR: i32 = 1;
const EXIT_USAGE: i32 = 2;
const EXIT_ILLEGAL_OPCODE: i32 = 3;
const EXIT_INTERRUPTED: i32 = 130;

struct Options {
    image: Option<String>,
    load_addr: u16,
    set_vector: bool,
    alias_vectors: bool,
    mmio_config: Option<String>,
    dump: Option<(u16, usize)>,
    cycles: Option<u64>,
    realtime: bool,
    hz: u64,
    flat: bool,
    continue_on_brk: bool,
    save_state: Option<String>,
    load_state: Option<String>,
    dump_image: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            image: None,
            load_addr: 0x8000,
            set_vector: true,
            alias_vectors: false,
            mmio_config: None,
            dump: None,
            cycles: None,
            realtime: debug_flags::realtime(),
            hz: debug_flags::cpu_hz(),
            flat: false,
            continue_on_brk: false,
            save_state: None,
            load_state: None,
            dump_image: None,
        }
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {} [options] <image>", program);
    eprintln!();
    eprintln!("  --load <hex>           load address (default 8000)");
    eprintln!("  --no-vector            leave the reset vector alone");
    eprintln!("  --alias-vectors        point NMI, RESET and IRQ at the load address");
    eprintln!("  -m, --mmio <file>      MMIO device configuration");
    eprintln!("  -r, --ram              hex dump of $0000-$01FF after the run");
    eprintln!("  --dump-range <hex> <n> hex dump of n bytes after the run");
    eprintln!("  --cycles <n>           stop after n cycles");
    eprintln!("  --realtime             pace execution to --hz (default 1000000)");
    eprintln!("  --hz <n>               target clock for --realtime");
    eprintln!("  --flat                 all 64 KiB are RAM");
    eprintln!("  --continue-on-brk      BRK jumps through $FFFE instead of halting");
    eprintln!("  --save-state <file>    write CPU and memory after the run");
    eprintln!("  --load-state <file>    restore CPU and memory before the run");
    eprintln!("  --dump-image <file>    write the raw 64 KiB memory image after the run");
    eprintln!();
    eprintln!("Environment: RUST_LOG, QUIET, DEBUG_TRACE, DEBUG_BUS, EMU_REALTIME, EMU_CPU_HZ");
}

fn parse_hex(text: &str) -> Result<u16, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix('$'))
        .unwrap_or(text);
    u16::from_str_radix(digits, 16).map_err(|_| format!("'{}' is not a 16-bit hex address", text))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut i = 1;

    let value = |i: usize, flag: &str| -> Result<String, String> {
        args.get(i + 1)
            .cloned()
            .ok_or_else(|| format!("{} requires a value", flag))
    };

    while i < args.len() {
        match args[i].as_str() {
            "--load" => {
                opts.load_addr = parse_hex(&value(i, "--load")?)?;
                i += 2;
            }
            "--no-vector" => {
                opts.set_vector = false;
                i += 1;
            }
            "--alias-vectors" => {
                opts.alias_vectors = true;
                i += 1;
            }
            "-m" | "--mmio" => {
                opts.mmio_config = Some(value(i, "--mmio")?);
                i += 2;
            }
            "-r" | "--ram" => {
                if opts.dump.is_none() {
                    opts.dump = Some((0x0000, 0x200));
                }
                i += 1;
            }
            "--dump-range" => {
                let start = parse_hex(&value(i, "--dump-range")?)?;
                let len = value(i + 1, "--dump-range")?
                    .parse::<usize>()
                    .map_err(|e| format!("--dump-range length: {}", e))?;
                opts.dump = Some((start, len));
                i += 3;
            }
            "--cycles" => {
                let n = value(i, "--cycles")?
                    .parse::<u64>()
                    .map_err(|e| format!("--cycles: {}", e))?;
                opts.cycles = Some(n);
                i += 2;
            }
            "--realtime" => {
                opts.realtime = true;
                i += 1;
            }
            "--hz" => {
                opts.hz = value(i, "--hz")?
                    .parse::<u64>()
                    .map_err(|e| format!("--hz: {}", e))?;
                i += 2;
            }
            "--flat" => {
                opts.flat = true;
                i += 1;
            }
            "--continue-on-brk" => {
                opts.continue_on_brk = true;
                i += 1;
            }
            "--save-state" => {
                opts.save_state = Some(value(i, "--save-state")?);
                i += 2;
            }
            "--load-state" => {
                opts.load_state = Some(value(i, "--load-state")?);
                i += 2;
            }
            "--dump-image" => {
                opts.dump_image = Some(value(i, "--dump-image")?);
                i += 2;
            }
            s if s.starts_with('-') => return Err(format!("Unknown option: {}", s)),
            s => {
                if opts.image.is_some() {
                    return Err(format!("Unexpected argument: {}", s));
                }
                opts.image = Some(s.to_string());
                i += 1;
            }
        }
    }

    if opts.image.is_none() && opts.load_state.is_none() {
        return Err("image argument missing".to_string());
    }
    Ok(opts)
}

/// Everything that has to succeed before the first instruction runs.
fn build_system(opts: &Options) -> Result<(Cpu, Bus), Box<dyn std::error::Error>> {
    let map = if opts.flat {
        MemoryMap::flat()
    } else {
        MemoryMap::default()
    };
    let mut bus = Bus::with_map(map);
    bus.set_trace(debug_flags::bus_trace());

    if let Some(path) = &opts.mmio_config {
        let specs = mmio::config::load_file(path)?;
        mmio::config::install(&mut bus, &specs)?;
    }

    if let Some(path) = &opts.image {
        loader::load_image(&mut bus, path, opts.load_addr)?;
        if opts.alias_vectors {
            loader::alias_vectors(&mut bus, opts.load_addr);
        } else if opts.set_vector {
            loader::set_reset_vector(&mut bus, opts.load_addr);
        }
    }

    let mut cpu = Cpu::new();
    cpu.halt_on_brk = !opts.continue_on_brk;
    cpu.reset(&mut bus);

    if let Some(path) = &opts.load_state {
        SaveState::load_from_file(path)?.restore(&mut cpu, &mut bus);
        cpu.halt_on_brk = !opts.continue_on_brk;
    }
    Ok((cpu, bus))
}

fn run(
    cpu: &mut Cpu,
    bus: &mut Bus,
    budget: Option<u64>,
    pacer: &mut dyn Pacer,
) -> Option<RunExit> {
    let mut spent = 0u64;
    loop {
        if shutdown::should_quit() {
            return None;
        }
        let batch = match budget {
            Some(limit) if spent >= limit => return Some(RunExit::BudgetExhausted),
            Some(limit) => BATCH_CYCLES.min(limit - spent),
            None => BATCH_CYCLES,
        };
        let outcome = cpu.run(bus, batch, pacer);
        spent += outcome.cycles;
        if let RunExit::Halted(halt) = outcome.exit {
            return Some(RunExit::Halted(halt));
        }
    }
}

fn exit_code_for(exit: Option<RunExit>) -> i32 {
    match exit {
        None => EXIT_INTERRUPTED,
        Some(RunExit::BudgetExhausted) | Some(RunExit::Halted(Halt::Break)) => 0,
        Some(RunExit::Halted(Halt::IllegalOpcode(_))) => EXIT_ILLEGAL_OPCODE,
        Some(RunExit::Halted(Halt::ExitRequested(code))) => code as i32,
    }
}

fn write_outputs(opts: &Options, cpu: &Cpu, bus: &Bus) -> Result<(), Box<dyn std::error::Error>> {
    if let Some((start, len)) = opts.dump {
        print!("{}", viewer::hex_dump(bus.memory().as_slice(), start, len));
    }
    if let Some(path) = &opts.save_state {
        SaveState::capture(cpu, bus).save_to_file(path)?;
    }
    if let Some(path) = &opts.dump_image {
        std::fs::write(path, bus.memory().as_slice())?;
        log::info!("Memory image written to: {}", path);
    }
    Ok(())
}

fn main() {
    let quiet = debug_flags::quiet();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if quiet { "warn" } else { "info" }),
    )
    .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("emu6502");
    if args.len() < 2 || args.iter().any(|a| a == "--help" || a == "-h") {
        usage(program);
        process::exit(if args.len() < 2 { EXIT_USAGE } else { 0 });
    }

    let opts = match parse_args(&args) {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("{}", msg);
            usage(program);
            process::exit(EXIT_USAGE);
        }
    };

    shutdown::install();

    let (mut cpu, mut bus) = match build_system(&opts) {
        Ok(system) => system,
        Err(e) => {
            eprintln!("Failed to start: {}", e);
            process::exit(EXIT_CONFIG_ERROR);
        }
    };

    if !quiet {
        println!(
            "Starting at ${:04X} ({} MMIO devices{})",
            cpu.pc,
            bus.mmio().len(),
            if opts.realtime { ", real time" } else { "" }
        );
    }

    let mut pacer: Box<dyn Pacer> = if opts.realtime {
        Box::new(RealTimePacer::new(opts.hz))
    } else {
        Box::new(Unpaced::new())
    };
    let exit = run(&mut cpu, &mut bus, opts.cycles, pacer.as_mut());

    match exit {
        Some(RunExit::Halted(Halt::IllegalOpcode(op))) => {
            eprintln!("Illegal opcode ${:02X} near ${:04X}", op, cpu.pc.wrapping_sub(1))
        }
        Some(RunExit::Halted(halt)) => log::info!("Halted: {}", halt),
        Some(RunExit::BudgetExhausted) => log::info!("Cycle budget exhausted"),
        None => log::warn!("Interrupted"),
    }
    if !quiet {
        let stats = bus.stats();
        println!("{}", cpu);
        println!(
            "bus: {} reads, {} writes, {} ROM writes ignored, {}/{} MMIO reads/writes denied",
            stats.reads,
            stats.writes,
            stats.rom_writes_ignored,
            stats.mmio_reads_denied,
            stats.mmio_writes_denied
        );
    }

    shutdown::set_exit_code(exit_code_for(exit));
    if let Err(e) = write_outputs(&opts, &cpu, &bus) {
        eprintln!("Failed to write output: {}", e);
        shutdown::set_exit_code(EXIT_CONFIG_ERROR);
    }

    let code = shutdown::exit_code();
    if code != 0 {
        process::exit(code);
    }
}
