use clap::{Parser, Subcommand};
use stock_explorer::series::DEFAULT_POINTS;

#[derive(Parser)]
#[command(name = "stock-explorer")]
#[command(about = "Browse deterministic mock price plots and raw daily aggregates for US tickers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Start the terminal explorer (default)
    Interactive,

    /// Print the generated series for a ticker
    Generate {
        #[arg(value_parser = parse_ticker)]
        ticker: String,

        /// Number of days to generate
        #[arg(short, long, default_value_t = DEFAULT_POINTS)]
        points: usize,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Request two years of daily aggregates once and print the raw payload
    Fetch {
        #[arg(value_parser = parse_ticker)]
        ticker: String,
    },

    /// List the built-in tickers
    Tickers,

    /// Report whether an API key is configured
    CheckKey,
}

impl Cli {
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Commands::Interactive))
    }
}

fn parse_ticker(raw: &str) -> Result<String, String> {
    let ticker = raw.trim();
    if ticker.is_empty() {
        return Err("ticker must not be empty".to_string());
    }
    if !ticker.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        return Err(format!("`{ticker}` is not a ticker symbol"));
    }
    Ok(ticker.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["stock-explorer"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.is_interactive());
    }

    #[test]
    fn generate_defaults_and_normalizes_ticker() {
        let cli = Cli::try_parse_from(["stock-explorer", "generate", "aapl"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Generate {
                ticker: "AAPL".to_string(),
                points: DEFAULT_POINTS,
                json: false,
            })
        );
        assert!(!cli.is_interactive());
    }

    #[test]
    fn generate_accepts_points_and_json() {
        let cli =
            Cli::try_parse_from(["stock-explorer", "generate", "TSLA", "--points", "5", "--json"])
                .unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::Generate {
                ticker: "TSLA".to_string(),
                points: 5,
                json: true,
            })
        );
    }

    #[test]
    fn rejects_malformed_tickers() {
        assert!(Cli::try_parse_from(["stock-explorer", "fetch", "AA PL"]).is_err());
        assert!(Cli::try_parse_from(["stock-explorer", "fetch", " "]).is_err());
    }

    #[test]
    fn check_key_is_kebab_case() {
        let cli = Cli::try_parse_from(["stock-explorer", "check-key"]).unwrap();
        assert_eq!(cli.command, Some(Commands::CheckKey));
    }
}
