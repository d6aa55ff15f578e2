//! Styled terminal messages.
//!
//! Status and diagnostics go to stderr so they never mix with anything a
//! user pipes from stdout; the scan summary goes to stdout.

use crate::types::{CidrBlock, HostRecord};
use console::style;

/// Print a banner before scanning begins.
pub fn print_scan_header(target: &CidrBlock, engine: &str, args: &[String]) {
    eprintln!();
    eprintln!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("netsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!(
        "{} Target: {} (network {}, {} addresses)",
        style("•").dim(),
        style(target).white().bold(),
        target.network(),
        target.host_count()
    );
    eprintln!(
        "{} Engine: {} {}",
        style("•").dim(),
        style(engine).yellow(),
        args.join(" ")
    );
    eprintln!();
}

/// Echo discovered hosts and their open ports.
pub fn print_hosts(results: &[HostRecord]) {
    if results.is_empty() {
        println!("  {}", style("No hosts up.").dim());
        return;
    }

    for host in results {
        println!("{} {}", style("Host:").bold(), style(&host.ip).white().bold());
        if host.ports.is_empty() {
            println!("    {}", style("no open ports").dim());
        }
        for entry in &host.ports {
            println!(
                "    {:>6}  {}  {}",
                entry.port,
                style("open").green().bold(),
                entry.service
            );
        }
    }
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}
