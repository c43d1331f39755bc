use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

static COLOR: AtomicBool = AtomicBool::new(true);

/// Enable or disable ANSI colors for every message helper.
pub fn set_color(enabled: bool) {
    COLOR.store(enabled, Ordering::Relaxed);
}

pub fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

fn line<T: fmt::Display>(fg: &str, icon: &str, msg: T) -> String {
    if color_enabled() {
        format!("{}{}{} {}{}", fg, BOLD, icon, RESET, msg)
    } else {
        format!("{} {}", icon, msg)
    }
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_BLUE, ICON_INFO, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_GREEN, ICON_OK, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", line(FG_YELLOW, ICON_WARN, msg));
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", line(FG_RED, ICON_ERR, msg));
}

/// Formatted section header
pub fn header<T: fmt::Display>(msg: T) {
    if color_enabled() {
        println!("{}{}====================== {}\n{}", FG_BLUE, BOLD, msg, RESET);
    } else {
        println!("====================== {}\n", msg);
    }
}
