//! Output formatting utilities.
//!
//! Pretty printing for CLI commands.

use colored::Colorize;
use editionmint_types::TransactionReceipt;

/// Format a wei amount for display.
pub fn format_eth(wei: u128) -> String {
    if wei >= 1_000_000_000_000_000 {
        let eth = wei as f64 / 1_000_000_000_000_000_000.0;
        format!("{:.4} ETH", eth)
    } else if wei >= 1_000_000_000 {
        let gwei = wei as f64 / 1_000_000_000.0;
        format!("{:.2} Gwei", gwei)
    } else {
        format!("{} wei", wei)
    }
}

/// Print success message.
pub fn print_success(msg: &str) {
    println!("{}", format!("✓ {}", msg).green());
}

/// Print error message.
pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✗ {}", msg).red());
}

/// Print warning message.
pub fn print_warning(msg: &str) {
    println!("{}", format!("⚠ {}", msg).yellow());
}

/// Print info message.
pub fn print_info(msg: &str) {
    println!("{}", format!("ℹ {}", msg).blue());
}

/// Print a section heading.
pub fn print_heading(msg: &str) {
    println!();
    println!("{}", msg.bold());
    println!("{}", "=".repeat(50));
}

/// Print the confirmed receipt.
pub fn print_receipt(receipt: &TransactionReceipt) {
    let status = if receipt.is_success() {
        "Success".green()
    } else {
        "Failed".red()
    };
    println!("Transaction status: {}", status);
    println!("Gas used:           {}", receipt.gas_used.to_string().bright_yellow());
    println!("Block number:       {}", receipt.block_number.to_string().bright_green());
}

/// Create a spinner for an open-ended wait.
pub fn create_spinner(msg: &str) -> indicatif::ProgressBar {
    let pb = indicatif::ProgressBar::new_spinner();
    pb.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
