use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use netsift_core::{TemplateKey, render_template};
use netsift_extract::auto_ping::run_auto_ping;
use netsift_extract::config::SiftConfig;
use netsift_extract::output::{
    OutputFormat, format_analysis, format_auto_ping, format_inventory, format_ip_list,
};
use netsift_extract::ping::SystemPing;
use netsift_extract::{Result, device_report, ip_report, ip_report_with_devices, ping_report};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "netsift")]
#[command(version, about = "Turn pasted NOC alert dumps and ping output into reports")]
struct Cli {
    /// Log skipped and partial matches to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Group interface-down alerts by device.
    Devices(DevicesArgs),
    /// Extract unique IPv4 addresses as ping commands.
    Ips(IpsArgs),
    /// Summarize pasted ping console output.
    Analyze(AnalyzeArgs),
    /// Extract addresses, ping them, and print the collected output.
    Ping(PingArgs),
    /// Print a canned command or resolution template.
    Template(TemplateArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Read input from a file instead of stdin.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct DevicesArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Append remediation commands for each device.
    #[arg(long)]
    commands: bool,
}

#[derive(Debug, Args)]
struct IpsArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Keep the device label written before each address.
    #[arg(long)]
    with_devices: bool,
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Debug, Args)]
struct PingArgs {
    #[command(flatten)]
    input: InputArgs,
    /// YAML config file with ping settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Echo requests per address.
    #[arg(long)]
    count: Option<u32>,
    /// Addresses pinged at the same time.
    #[arg(long)]
    concurrency: Option<usize>,
    /// Seconds to wait for one address.
    #[arg(long)]
    timeout: Option<u64>,
    /// Append the up/down status report.
    #[arg(long)]
    analyze: bool,
}

#[derive(Debug, Args)]
struct TemplateArgs {
    /// Template key (e.g. `node-up`) or legacy identifier.
    #[arg(required_unless_present = "list")]
    key: Option<String>,
    /// List the available template keys.
    #[arg(long, conflicts_with = "key")]
    list: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Devices(args) => run_devices(args),
        Command::Ips(args) => run_ips(args),
        Command::Analyze(args) => run_analyze(args),
        Command::Ping(args) => run_ping(args),
        Command::Template(args) => run_template(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(args: &InputArgs) -> Result<String> {
    match &args.input {
        Some(path) => {
            debug!(path = %path.display(), "Reading input file");
            Ok(fs::read_to_string(path)?)
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn emit(rendered: &str) {
    if rendered.ends_with('\n') {
        print!("{rendered}");
    } else {
        println!("{rendered}");
    }
}

fn run_devices(args: DevicesArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let inventory = device_report(&text);
    emit(&format_inventory(&inventory, args.input.format, args.commands)?);
    Ok(())
}

fn run_ips(args: IpsArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let list = if args.with_devices {
        ip_report_with_devices(&text)
    } else {
        ip_report(&text)
    };
    emit(&format_ip_list(&list, args.input.format)?);
    Ok(())
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let text = read_input(&args.input)?;
    let analysis = ping_report(&text);
    emit(&format_analysis(&analysis, args.input.format)?);
    Ok(())
}

fn run_ping(args: PingArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SiftConfig::load(path)?,
        None => SiftConfig::default(),
    };
    if let Some(count) = args.count {
        config.ping.count = count;
    }
    if let Some(concurrency) = args.concurrency {
        config.ping.concurrency = concurrency;
    }
    if let Some(timeout) = args.timeout {
        config.ping.timeout_secs = timeout;
    }
    config.ping.analyze |= args.analyze;
    config.ping.validate()?;

    let text = read_input(&args.input)?;
    let run = run_auto_ping(&text, &SystemPing, &config.ping)?;
    emit(&format_auto_ping(&run, args.input.format)?);
    Ok(())
}

fn run_template(args: TemplateArgs) -> Result<()> {
    if args.list {
        for key in TemplateKey::ALL {
            println!("{key}");
        }
        return Ok(());
    }

    emit(&render_template(args.key.as_deref().unwrap_or_default()));
    Ok(())
}
