use clap::ValueEnum;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain lines for people and pipes
    #[default]
    Human,
    /// One JSON document per command
    Json,
}
