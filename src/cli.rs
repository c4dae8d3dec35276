use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
  name = "nihil-cli",
  about = "Nullable values for JSON and SQL drivers",
  version
)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
  /// Print the demo users as JSON
  Json {
    /// Indent the output
    #[arg(long)]
    pretty: bool,
  },

  /// Print column types and the CREATE TABLE statement for a dialect
  Schema {
    /// mysql, postgres, sqlite or sqlserver
    #[arg(short, long, default_value = "sqlite")]
    dialect: String,
  },

  /// Decode a JSON literal into one of the nullable kinds
  Decode {
    /// bool, byte, int16, int32, int64, float64, string or time
    kind: String,

    /// The JSON text, e.g. 42, "hello" or null
    json: String,
  },
}
