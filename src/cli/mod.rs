pub mod progress;

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "date-sorter")]
#[command(about = "Copy files into folders named after their creation date", long_about = None)]
pub struct Cli {
    /// Source directory, walked recursively
    #[arg(required_unless_present = "print_config")]
    pub source: Option<PathBuf>,

    /// Destination directory, created if missing
    #[arg(required_unless_present = "print_config")]
    pub destination: Option<PathBuf>,

    /// strftime-compatible folder name format, e.g. "%Y_%m", "%Y-%m-%d", "%Y", "%b_%Y"
    /// [default: %Y_%m]
    #[arg(long)]
    pub date_format: Option<String>,

    /// Skip files that already exist in the target folder instead of overwriting them
    #[arg(long)]
    pub ignore_duplicates: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub print_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positional_and_defaults() {
        let cli = Cli::try_parse_from(["date-sorter", "src", "dst"]).unwrap();
        assert_eq!(cli.source, Some(PathBuf::from("src")));
        assert_eq!(cli.destination, Some(PathBuf::from("dst")));
        assert_eq!(cli.date_format, None);
        assert!(!cli.ignore_duplicates);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "date-sorter",
            "src",
            "dst",
            "--date-format",
            "%Y",
            "--ignore-duplicates",
        ])
        .unwrap();
        assert_eq!(cli.date_format.as_deref(), Some("%Y"));
        assert!(cli.ignore_duplicates);
    }

    #[test]
    fn test_destination_is_required() {
        assert!(Cli::try_parse_from(["date-sorter", "src"]).is_err());
    }

    #[test]
    fn test_print_config_needs_no_paths() {
        let cli = Cli::try_parse_from(["date-sorter", "--print-config"]).unwrap();
        assert!(cli.print_config);
        assert!(cli.source.is_none());
    }
}
