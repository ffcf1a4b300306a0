use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "cvl",
    about = "Correction Value Ledger — a minimal hash-chained ledger with prefix-targeted nonce search",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a chain, correct one record against a prefix, and show the result
    Demo(DemoArgs),
    /// Compute the canonical digest of a record from explicit fields
    Digest(DigestArgs),
    /// Search a nonce for explicit record fields against a prefix
    Search(SearchArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    /// Target hash prefix for the correction
    #[arg(long, default_value = "0000")]
    pub prefix: String,

    /// 1-based position of the record to correct
    #[arg(long, default_value = "2")]
    pub position: u64,

    /// Payloads appended after the genesis record (repeatable)
    #[arg(long = "payload", default_values = ["Data 1", "Data 2", "Data 3"])]
    pub payloads: Vec<String>,

    /// Cap the nonce search instead of running it unbounded
    #[arg(long)]
    pub max_iterations: Option<u64>,
}

#[derive(Args)]
pub struct DigestArgs {
    #[arg(long)]
    pub position: u64,

    #[arg(long)]
    pub payload: String,

    #[arg(long, default_value = "0000")]
    pub prev_hash: String,

    #[arg(long, default_value = "0")]
    pub nonce: u64,
}

#[derive(Args)]
pub struct SearchArgs {
    #[arg(long)]
    pub position: u64,

    #[arg(long)]
    pub payload: String,

    #[arg(long, default_value = "0000")]
    pub prev_hash: String,

    /// Target hash prefix
    #[arg(long)]
    pub prefix: String,

    /// Cap the nonce search instead of running it unbounded
    #[arg(long)]
    pub max_iterations: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_demo_defaults() {
        let cli = Cli::try_parse_from(["cvl", "demo"]).unwrap();
        if let Command::Demo(args) = cli.command {
            assert_eq!(args.prefix, "0000");
            assert_eq!(args.position, 2);
            assert_eq!(args.payloads, vec!["Data 1", "Data 2", "Data 3"]);
            assert!(args.max_iterations.is_none());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_demo_custom_payloads() {
        let cli = Cli::try_parse_from([
            "cvl", "demo", "--payload", "a", "--payload", "b", "--prefix", "00",
        ])
        .unwrap();
        if let Command::Demo(args) = cli.command {
            assert_eq!(args.payloads, vec!["a", "b"]);
            assert_eq!(args.prefix, "00");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_demo_bounded() {
        let cli = Cli::try_parse_from(["cvl", "demo", "--max-iterations", "5000"]).unwrap();
        if let Command::Demo(args) = cli.command {
            assert_eq!(args.max_iterations, Some(5000));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_digest() {
        let cli = Cli::try_parse_from([
            "cvl", "digest", "--position", "1", "--payload", "x", "--nonce", "7",
        ])
        .unwrap();
        if let Command::Digest(args) = cli.command {
            assert_eq!(args.position, 1);
            assert_eq!(args.payload, "x");
            assert_eq!(args.prev_hash, "0000");
            assert_eq!(args.nonce, 7);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_search() {
        let cli = Cli::try_parse_from([
            "cvl", "search", "--position", "2", "--payload", "x", "--prefix", "0",
        ])
        .unwrap();
        if let Command::Search(args) = cli.command {
            assert_eq!(args.position, 2);
            assert_eq!(args.prefix, "0");
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn search_requires_a_prefix() {
        let result =
            Cli::try_parse_from(["cvl", "search", "--position", "2", "--payload", "x"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["cvl", "--verbose", "demo"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["cvl", "--format", "json", "demo"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}
