//! The `choco` command-line driver.
//!
//! Owns everything the engine does not: argument parsing, reading the
//! source, all-or-nothing persistence of the generated Python, status
//! output, and the optional post-transpile launchers (PyInstaller
//! packaging, running the output). The engine itself never touches a file.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use anyhow::{bail, Context};
use choco_types::{SourceFile, TranspileError};
use clap::{Args, Parser, Subcommand};
use log::info;

/// ChocoScript transpiler.
#[derive(Parser)]
#[command(name = "choco", version, about = "Transpile ChocoScript to Python")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile a .choco file to Python.
    Transpile(TranspileArgs),
    /// Print the depth-annotated instruction listing as JSON.
    Dump(DumpArgs),
}

#[derive(Args)]
struct TranspileArgs {
    /// The source file to transpile.
    input: PathBuf,

    /// The output file to write.
    #[arg(short, long, default_value = "output.py")]
    output: PathBuf,

    /// Say absolutely nothing.
    #[arg(short, long)]
    silent: bool,

    /// Package the output into a standalone executable with PyInstaller.
    #[arg(short = 'c', long)]
    executable: bool,

    /// Run the generated program after transpiling.
    #[arg(short, long, conflicts_with = "run_executable")]
    run: bool,

    /// Run the packaged executable after transpiling.
    #[arg(long, requires = "executable", conflicts_with = "run")]
    run_executable: bool,

    /// Report transpilation errors as JSON on stderr.
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DumpArgs {
    /// The source file to inspect.
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Transpile(args) => {
            init_logging(args.silent);
            transpile_command(&args)
        }
        Commands::Dump(args) => {
            init_logging(true);
            dump_command(&args)
        }
    };
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn transpile_command(args: &TranspileArgs) -> anyhow::Result<()> {
    let source = load_source(&args.input)?;

    info!(
        "transpiling {} to {}",
        source.name,
        args.output.display()
    );

    let generated = match choco_transpiler::transpile(&source) {
        Ok(generated) => generated,
        Err(err) => {
            report_engine_error(&source, &err, args.json);
            // Any prior output file is left untouched.
            std::process::exit(1);
        }
    };

    write_atomically(&args.output, &generated)?;
    info!("wrote {}", args.output.display());

    // Launchers run strictly after a successful write, keyed only by the
    // output path.
    if args.executable {
        package(&args.output)?;
    }
    if args.run {
        run_python(&args.output)?;
    } else if args.run_executable {
        run_packaged(&args.output)?;
    }
    Ok(())
}

fn dump_command(args: &DumpArgs) -> anyhow::Result<()> {
    let source = load_source(&args.input)?;
    match choco_transpiler::lower(&source) {
        Ok(program) => {
            let json = serde_json::to_string_pretty(&program.instructions)
                .context("failed to serialise the instruction listing")?;
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            report_engine_error(&source, &err, false);
            std::process::exit(1);
        }
    }
}

fn load_source(input: &Path) -> anyhow::Result<SourceFile> {
    let text = fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    Ok(SourceFile::new(input.display().to_string(), text))
}

/// Print the error with its source line underneath, or as JSON.
fn report_engine_error(source: &SourceFile, err: &TranspileError, json: bool) {
    if json {
        match serde_json::to_string(err) {
            Ok(rendered) => eprintln!("{rendered}"),
            Err(_) => eprintln!("{err}"),
        }
        return;
    }
    eprintln!("error: {err}");
    if let Some(line) = err.line() {
        if let Some(text) = source.line(line) {
            eprintln!("  {line} | {text}");
        }
    }
}

/// Write next to the destination, then rename into place: the output path
/// either keeps its old contents or gets the complete new ones.
fn write_atomically(path: &Path, contents: &str) -> anyhow::Result<()> {
    let mut tmp_name = OsString::from(path.as_os_str());
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);

    fs::write(&tmp, contents)
        .with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move output into {}", path.display()))?;
    Ok(())
}

fn package(output: &Path) -> anyhow::Result<()> {
    info!("packaging {} with PyInstaller", output.display());
    let status = Command::new("pyinstaller")
        .arg(output)
        .arg("-y")
        .args(["--distpath", "build"])
        .status()
        .context("failed to launch pyinstaller")?;
    if !status.success() {
        bail!("pyinstaller exited with {status}");
    }
    info!("executable created");
    Ok(())
}

fn run_python(output: &Path) -> anyhow::Result<()> {
    info!("running {}", output.display());
    let status = Command::new("python3")
        .arg(output)
        .status()
        .context("failed to launch python3")?;
    if !status.success() {
        bail!("python3 exited with {status}");
    }
    Ok(())
}

fn run_packaged(output: &Path) -> anyhow::Result<()> {
    let stem = output
        .file_stem()
        .context("output path has no file name")?;
    // PyInstaller lays the binary out as <distpath>/<stem>/<stem>.
    let exe = Path::new("build").join(stem).join(stem);
    info!("running {}", exe.display());
    let status = Command::new(&exe)
        .status()
        .with_context(|| format!("failed to launch {}", exe.display()))?;
    if !status.success() {
        bail!("{} exited with {status}", exe.display());
    }
    Ok(())
}

fn init_logging(silent: bool) {
    let level = if silent {
        log::LevelFilter::Off
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}
