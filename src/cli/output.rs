//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print a tree heading (cyan bold)
pub fn tree_header(pos: usize, root_name: &str) {
    println!("{} {}", format!("tree {}:", pos).cyan().bold(), root_name.bold());
}

/// Print a rendered tree, highlighting checked boxes
pub fn tree(rendered: &(impl std::fmt::Display + ?Sized)) {
    for line in rendered.to_string().lines() {
        if line.contains("[x]") {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

/// Print counter lines under a "counters" heading
pub fn counters(lines: &str) {
    println!("{}", "counters".cyan().bold());
    for line in lines.lines() {
        println!("  {}", line.yellow());
    }
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}
