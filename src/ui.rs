//! Console styling.
//!
//! Centralizes the banner and the colored status-line prefixes so the
//! rest of the tool never touches crossterm directly.

use crossterm::style::Stylize;

const BANNER: &str = r"
    ____  ____  ____  ________  ________    ___   _____ __  __
   / __ \/ __ \/ __ \/  _/ __ \/ ____/ /   /   | / ___// / / /
  / / / / /_/ / / / // // / / / /_  / /   / /| | \__ \/ /_/ /
 / /_/ / _, _/ /_/ // // /_/ / __/ / /___/ ___ |___/ / __  /
/_____/_/ |_|\____/___/_____/_/   /_____/_/  |_/____/_/ /_/

        ANDROID PROVISIONING CONSOLE
";

/// Print the startup banner.
pub fn print_banner() {
    println!("{}", BANNER.cyan());
}

/// Green success line.
pub fn ok_line(msg: &str) {
    println!("{} {}", "[OK]".green(), msg);
}

/// Red failure line.
pub fn fail_line(msg: &str) {
    println!("{} {}", "[FAIL]".red(), msg);
}

/// Yellow warning line.
pub fn warn_line(msg: &str) {
    println!("{} {}", "[WARN]".yellow(), msg);
}

/// Plain step announcement.
pub fn step_line(msg: &str) {
    println!("{} {}", "[*]".cyan(), msg);
}
