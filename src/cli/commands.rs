use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "rollup-reformat",
    version,
    about = "Reformats v4 rollups into dashboard-friendly tables with 'all' facet categories"
)]
pub struct Cli {
    /// Input file to be converted
    #[arg(short = 'f', long = "file")]
    pub file: String,

    /// Output file
    #[arg(short, long)]
    pub output: String,

    /// Cut-off date (YYYY-MM-DD); rows on or after it are dropped. Defaults to the local date
    #[arg(long)]
    pub today: Option<String>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Field delimiter for input and output
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
