// wordseg-segment: Segment text from stdin.
//
// Reads text from stdin and prints each line split into words, separated by
// a space (or the given separator).
//
// Usage:
//   wordseg-segment [-d DICT_PATH] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH   Frequency table, or directory containing dictionary.txt
//   --separator STR        Separator printed between segments (default: " ")
//   --stats                Print search counters for each line to stderr
//   -v, --verbose          Enable debug logging on stderr
//   -h, --help             Print help

use std::io::{self, Read, Write};

use wordseg::Segmenter;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = wordseg_cli::parse_dict_path(&args);
    let (separator, args) = wordseg_cli::parse_option(&args, "--separator", None);

    if wordseg_cli::wants_help(&args) {
        println!("wordseg-segment: Split unspaced text into words.");
        println!();
        println!("Usage: wordseg-segment [-d DICT_PATH] [OPTIONS]");
        println!();
        println!("Reads text from stdin and prints every line as its segments,");
        println!("joined by the separator.");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Frequency table, or directory containing dictionary.txt");
        println!("  --separator STR        Separator printed between segments (default: \" \")");
        println!("  --stats                Print search counters for each line to stderr");
        println!("  -v, --verbose          Enable debug logging on stderr");
        println!("  -h, --help             Print this help");
        return;
    }

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    let show_stats = args.iter().any(|a| a == "--stats");
    let separator = separator.unwrap_or_else(|| " ".to_string());
    wordseg_cli::init_logging(verbose);

    let model =
        wordseg_cli::load_model(dict_path.as_deref()).unwrap_or_else(|e| wordseg_cli::fatal(&e));
    let segmenter = Segmenter::new(&model);

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .unwrap_or_else(|e| wordseg_cli::fatal(&format!("failed to read stdin: {e}")));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for (line_no, line) in input.lines().enumerate() {
        let (segments, stats) = segmenter.segment_with_stats(line);
        if show_stats {
            eprintln!(
                "line {:>4}: {} segments, {} expanded, {} relaxed, {} unrecognized",
                line_no + 1,
                segments.len(),
                stats.expanded,
                stats.relaxed,
                stats.unrecognized
            );
        }
        let _ = writeln!(out, "{}", segments.join(&separator));
    }
}
