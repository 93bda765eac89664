use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "Optima Distributed Solver")]
#[clap(about = "Strongly solves a game by spreading its positions across ranks", long_about = None)]
pub struct Cli {
    /// The game to solve.
    #[clap(value_enum)]
    pub game: Game,

    #[clap(short, long, default_value_t = String::from("client.conf"))]
    pub config: String,

    /// Number of ranks. Overrides RANKS and the config file.
    #[clap(short, long)]
    pub ranks: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Game {
    Subtraction,
    Tictactoe,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_game_only() {
        let cli = Cli::parse_from(["client", "subtraction"]);

        assert_eq!(cli.game, Game::Subtraction);
        assert_eq!(cli.config, "client.conf");
        assert_eq!(cli.ranks, None);
    }

    #[test]
    fn test_parse_ranks_and_config() {
        let cli = Cli::parse_from(["client", "tictactoe", "--ranks", "6", "-c", "other.conf"]);

        assert_eq!(cli.game, Game::Tictactoe);
        assert_eq!(cli.config, "other.conf");
        assert_eq!(cli.ranks, Some(6));
    }

    #[test]
    fn test_game_is_required() {
        assert!(Cli::try_parse_from(["client"]).is_err());
    }
}
