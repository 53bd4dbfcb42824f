//! Colored output helpers for the CLI

use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

const COLUMN_WIDTH: usize = 20;

impl Output {
    /// Create a new output helper with colors enabled
    pub fn new() -> Self {
        Self { colored: true }
    }

    /// Create a new output helper with colors disabled
    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the Edflex banner
    pub fn banner(&self) {
        if self.colored {
            println!(
                r#"
   {}
   {}
   {}
   {}
   {}
"#,
                " _____ ____  _____ _     _______  __".bright_green().bold(),
                "| ____|  _ \\|  ___| |   | ____\\ \\/ /".bright_green().bold(),
                "|  _| | | | | |_  | |   |  _|  \\  / ".green().bold(),
                "| |___| |_| |  _| | |___| |___ /  \\ ".cyan().bold(),
                "|_____|____/|_|   |_____|_____/_/\\_\\".cyan().bold(),
            );
            println!(
                "   {} {}\n",
                "Personalised learning agents".bright_white().bold(),
                format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
            );
        } else {
            println!(
                r#"
 _____ ____  _____ _     _______  __
| ____|  _ \|  ___| |   | ____\ \/ /
|  _| | | | | |_  | |   |  _|  \  /
| |___| |_| |  _| | |___| |___ /  \
|_____|____/|_|   |_____|_____/_/\_\

   Personalised learning agents v{}
"#,
                env!("CARGO_PKG_VERSION")
            );
        }
    }

    /// Print a success message with a checkmark
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "✓".green().bold(), message.green());
        } else {
            println!("  [OK] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "⚠".yellow().bold(), message.yellow());
        } else {
            println!("  [WARN] {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print a header for a section
    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    /// Print a key-value pair
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Print a list item
    pub fn list_item(&self, item: &str) {
        if self.colored {
            println!("    {} {}", "•".blue(), item);
        } else {
            println!("    - {}", item);
        }
    }

    /// Print an HTTP endpoint line
    pub fn endpoint(&self, method: &str, path: &str, description: &str) {
        if self.colored {
            println!(
                "    {} {} {}",
                format!("{:<7}", method).bright_cyan().bold(),
                format!("{:<38}", path).bright_white(),
                description.dimmed()
            );
        } else {
            println!("    {:<7} {:<38} {}", method, path, description);
        }
    }

    /// Print a table header row
    pub fn table_header(&self, columns: &[&str]) {
        let header = format_row(columns);
        let rule_width = columns.len() * (COLUMN_WIDTH + 1);
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(rule_width).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(rule_width));
        }
    }

    /// Print a table row
    pub fn table_row(&self, values: &[&str]) {
        println!("    {}", format_row(values));
    }

    /// Print newline
    pub fn newline(&self) {
        println!();
    }
}

fn format_row(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|c| format!("{:<width$}", c, width = COLUMN_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_modes() {
        assert!(Output::new().colored);
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_format_row_pads_cells() {
        let row = format_row(&["learner_profiler", "default"]);
        assert!(row.starts_with("learner_profiler    "));
        assert_eq!(row.len(), COLUMN_WIDTH * 2 + 1);
        assert_eq!(format_row(&[]), "");
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("test success");
            output.info("test info");
            output.warning("test warning");
            output.error("test error");
            output.header("Test Header");
            output.kv("key", "value");
            output.list_item("item");
            output.endpoint("POST", "/api/profiler", "Learner Profiler");
            output.table_header(&["Key", "Model", "Tools"]);
            output.table_row(&["learner_profiler", "default", "9"]);
            output.table_row(&[]);
            output.newline();
        }
    }
}
