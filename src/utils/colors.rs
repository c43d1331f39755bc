/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const CYAN: &str = "\x1b[36m";

/// Color for a rendered table value:
/// NaN or empty → grey
/// negative numbers → red
/// anything else → reset
pub fn color_for_value(value: &str) -> &'static str {
    let v = value.trim();
    if v.is_empty() || v == "NaN" {
        return GREY;
    }
    match v.parse::<f64>() {
        Ok(n) if n < 0.0 => RED,
        _ => RESET,
    }
}

pub fn paint(value: &str, color: &str) -> String {
    if color == RESET {
        value.to_string()
    } else {
        format!("{color}{value}{RESET}")
    }
}
