//! CLI command messaging system
//!
//! Consistent, colored output for the one-shot commands (list, simulate,
//! clear, configure). Errors go to stderr so scripted output stays clean.

const COLOR_INFO: &str = "\x1b[1;33m";
const COLOR_WARN: &str = "\x1b[1;91m";
const COLOR_ERROR: &str = "\x1b[1;31m";
const COLOR_SUCCESS: &str = "\x1b[1;32m";
const COLOR_RESET: &str = "\x1b[0m";

fn format_line(color: &str, tag: &str, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{}[{}]{} {}", color, tag, COLOR_RESET, title)
    } else {
        format!("{}[{}]{} {}\t {}", color, tag, COLOR_RESET, title, details)
    }
}

/// Print CLI command info message
pub fn print_info(title: &str, details: &str) {
    println!("{}", format_line(COLOR_INFO, "INFO", title, details));
}

/// Print CLI command warn message
pub fn print_warn(title: &str, details: &str) {
    eprintln!("{}", format_line(COLOR_WARN, "WARN", title, details));
}

/// Print CLI command error
pub fn print_error(title: &str, details: Option<&str>) {
    eprintln!("{}", format_line(COLOR_ERROR, "ERROR", title, ""));
    if let Some(details) = details {
        eprintln!("{}[ERROR]{} Details: {}", COLOR_ERROR, COLOR_RESET, details);
    }
}

/// Print CLI command success
pub fn print_success(title: &str, details: &str) {
    println!("{}", format_line(COLOR_SUCCESS, "SUCCESS", title, details));
}

/// Macro for print_cmd_info! usage
#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_info($title, &format!($($details)*))
    };
}

/// Macro for print_cmd_warn! usage
#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_warn($title, &format!($($details)*))
    };
}

/// Macro for CLI errors
#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_error($title, None)
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_error($title, Some($details))
    };
}

/// Macro for CLI success messages
#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_success($title, &format!($($details)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_omits_empty_details() {
        assert_eq!(
            format_line(COLOR_INFO, "INFO", "Transactions", ""),
            "\x1b[1;33m[INFO]\x1b[0m Transactions"
        );
        assert_eq!(
            format_line(COLOR_SUCCESS, "SUCCESS", "Cleared", "local"),
            "\x1b[1;32m[SUCCESS]\x1b[0m Cleared\t local"
        );
    }
}
