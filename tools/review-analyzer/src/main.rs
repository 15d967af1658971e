mod analyze;

use analyze::analyze_reviews;
use argh::FromArgs;
use std::path::PathBuf;

/// Word usage statistics for rated reviews
#[derive(FromArgs, Debug)]
pub struct Args {
    /// input CSV file with a header row
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// directory where charts are written (default: current directory)
    #[argh(option, short = 'o', default = "PathBuf::from(\".\")")]
    output: PathBuf,

    /// word to chart; may be given multiple times
    #[argh(option, short = 'w', long = "word")]
    words: Vec<String>,

    /// number of words listed in the summary table (default: 20)
    #[argh(option, short = 't', default = "20")]
    top: usize,

    /// print the aggregated counts as JSON instead of tables
    #[argh(switch)]
    json: bool,

    /// aggregate rows on all cores
    #[argh(switch, short = 'p')]
    parallel: bool,

    /// name of the comment column (default: "Comment Text")
    #[argh(option)]
    comment_column: Option<String>,

    /// name of the category column (default: "Professor Gender")
    #[argh(option)]
    category_column: Option<String>,

    /// name of the rating column (default: "Rating")
    #[argh(option)]
    rating_column: Option<String>,
}

fn main() {
    let args: Args = argh::from_env();

    if let Err(e) = analyze_reviews(&args) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}
