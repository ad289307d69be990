use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Serve a directory over HTTP, allowing cross-origin requests from any origin
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Port to listen on (all interfaces)
    #[arg(default_value_t = 8000, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    #[arg(
        help = "Directory to serve files from (--help for more)",
        long_help = r"Directory to serve files from:
    - request paths are resolved relative to this directory, and can't escape it
    - directories are served by their index.html or index.htm, or listed if neither exists
Examples:
    - .
    - ./dist
    - /var/www/html",
        default_value = "."
    )]
    pub directory: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn defaults_to_port_8000_and_current_dir() {
        let options = Options::try_parse_from(["cors-serve"]).unwrap();
        assert_eq!(options.port, 8000);
        assert_eq!(options.directory, PathBuf::from("."));
        assert_eq!(options.verbose, 0);
    }

    #[test]
    fn positional_port_and_directory() {
        let options = Options::try_parse_from(["cors-serve", "-vv", "3000", "dist"]).unwrap();
        assert_eq!(options.port, 3000);
        assert_eq!(options.directory, PathBuf::from("dist"));
        assert_eq!(options.verbose, 2);
    }

    #[test]
    fn rejects_bad_ports() {
        assert!(Options::try_parse_from(["cors-serve", "0"]).is_err());
        assert!(Options::try_parse_from(["cors-serve", "65536"]).is_err());
        assert!(Options::try_parse_from(["cors-serve", "http"]).is_err());
    }
}
