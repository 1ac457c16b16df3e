use colored::Colorize;
use readme_update::error::is_tool_unavailable;
use std::process;

fn main() {
    if let Err(e) = readme_update::cli::run() {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if is_tool_unavailable(&e) {
            eprintln!("The document was left unchanged.");
        }
        process::exit(1);
    }
}
