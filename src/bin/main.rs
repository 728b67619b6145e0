//! CLI for hostinfo

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use hostinfo::HostInfo;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "hostinfo")]
#[command(about = "Linux host hardware and software inventory", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json", global = true)]
    format: String,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Show the full inventory (default)
    All,
    /// Show network devices
    Network,
    /// Show CPU information
    Cpu,
    /// Show memory information
    Memory,
    /// Show storage devices and logical volumes
    Storage,
    /// Show DMI identity (product, board, chassis, BIOS)
    Dmi,
    /// Show OS and kernel versions
    Os,
    /// Show node identity
    Node,
}

#[cfg(feature = "cli")]
fn emit<T: serde::Serialize>(value: &T, format: &str) {
    if format == "text" {
        match serde_json::to_value(value) {
            Ok(v) => print_text(&v, 0),
            Err(e) => eprintln!("serialization failed: {e}"),
        }
    } else {
        match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("serialization failed: {e}"),
        }
    }
}

#[cfg(feature = "cli")]
fn print_text(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map {
                match val {
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        println!("{pad}{key}:");
                        print_text(val, indent + 1);
                    }
                    _ => println!("{pad}{key}: {val}"),
                }
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                println!("{pad}-");
                print_text(item, indent + 1);
            }
        }
        _ => println!("{pad}{value}"),
    }
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let info = HostInfo::collect();
    let format = cli.format.as_str();

    match cli.command.unwrap_or(Commands::All) {
        Commands::All => emit(&info, format),
        Commands::Network => emit(&info.network, format),
        Commands::Cpu => emit(&info.cpu, format),
        Commands::Memory => emit(&info.memory, format),
        Commands::Storage => {
            emit(&info.storage, format);
            if !info.lvm.is_empty() {
                emit(&info.lvm, format);
            }
        }
        Commands::Dmi => {
            emit(&info.product, format);
            emit(&info.board, format);
            emit(&info.chassis, format);
            emit(&info.bios, format);
        }
        Commands::Os => {
            emit(&info.os, format);
            emit(&info.kernel, format);
        }
        Commands::Node => emit(&info.node, format),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("hostinfo was built without the 'cli' feature");
}
