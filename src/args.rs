use clap::Parser;

/// This is an interactive program to vote for a set of options and draw random candidates.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, default food.json) The JSON file containing the options and the settings of the vote.
    /// For more information about the file format, read the manual of the weighted_voting crate.
    #[clap(short, long, value_parser, default_value = "food.json")]
    pub config: String,

    /// (number, optional) If specified, overrides the maximum number of choices per voter
    /// given by the `_max_choices` setting.
    #[clap(short, long, value_parser)]
    pub max_choices: Option<usize>,

    /// (number, optional) The seed of the random generator. Setting this option overrides the
    /// `_random_seed` setting. Without any seed, every run gives a different outcome.
    #[clap(short, long, value_parser)]
    pub seed: Option<u64>,

    /// (default 3) The maximum number of distinct candidates to draw.
    #[clap(long, value_parser)]
    pub candidates: Option<usize>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
