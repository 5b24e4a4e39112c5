// Frequency table loading
//
// A frequency table is plain text with one record per line: a word and its
// raw frequency count, separated by whitespace. Further fields (such as a
// part-of-speech tag) are ignored. Records may come in any order and may
// repeat; they are sorted and de-duplicated before the model is built, since
// the dictionary only accepts sorted, unique words.
//
// Where a model comes from is always the caller's choice: the segmenter
// never loads anything implicitly. `ModelLoader` is the seam for plugging a
// source in.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::model::{ModelError, WordModel};

/// Error type for loading a frequency table into a model.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The table file could not be opened.
    #[error("failed to open {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    /// Reading the table failed.
    #[error("failed to read frequency table: {0}")]
    Io(#[from] io::Error),

    /// A non-blank line did not contain both a word and a frequency.
    #[error("line {line}: expected a word and a frequency")]
    MissingField { line: usize },

    /// The frequency field is not a number.
    #[error("line {line}: invalid frequency {value:?}")]
    InvalidFrequency { line: usize, value: String },

    /// The model rejected the data.
    #[error("failed to build word model: {0}")]
    Model(#[from] ModelError),
}

/// A source of finished word models.
pub trait ModelLoader {
    fn load(&self) -> Result<WordModel, LoadError>;
}

/// Loads a frequency table from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLoader {
    path: PathBuf,
}

impl FileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ModelLoader for FileLoader {
    fn load(&self) -> Result<WordModel, LoadError> {
        load_model_from_path(&self.path)
    }
}

/// Loads a frequency table held in memory, e.g. one embedded with
/// `include_bytes!`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferLoader {
    data: Vec<u8>,
}

impl BufferLoader {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl ModelLoader for BufferLoader {
    fn load(&self) -> Result<WordModel, LoadError> {
        load_model(self.data.as_slice())
    }
}

/// Parse `word frequency` records. Blank lines are skipped; line numbers in
/// errors are 1-based.
pub fn parse_records<R: BufRead>(reader: R) -> Result<Vec<(String, f32)>, LoadError> {
    let mut records = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let mut fields = line.split_whitespace();
        let Some(word) = fields.next() else {
            continue;
        };
        let Some(value) = fields.next() else {
            return Err(LoadError::MissingField { line: i + 1 });
        };
        let frequency: f32 = value.parse().map_err(|_| LoadError::InvalidFrequency {
            line: i + 1,
            value: value.to_string(),
        })?;
        records.push((word.to_string(), frequency));
    }
    Ok(records)
}

/// Build a finished model from unordered records.
///
/// Records whose frequency is not a positive finite number are skipped with
/// a warning first, so they never shadow a later usable record for the same
/// word. The rest are sorted by word; of several records for the same word
/// the first one in input order is kept.
pub fn build_model(records: Vec<(String, f32)>) -> Result<WordModel, LoadError> {
    let total = records.len();
    let mut records: Vec<(String, f32)> = records
        .into_iter()
        .filter(|(word, frequency)| {
            let usable = frequency.is_finite() && *frequency > 0.0;
            if !usable {
                warn!(word = %word, frequency, "skipping word with unusable frequency");
            }
            usable
        })
        .collect();
    records.sort_by(|a, b| a.0.cmp(&b.0));

    let mut model = WordModel::new();
    let mut previous: Option<&str> = None;
    let mut duplicates = 0usize;
    for (word, frequency) in &records {
        if previous == Some(word.as_str()) {
            duplicates += 1;
            continue;
        }
        previous = Some(word.as_str());
        model.add_word(word, *frequency)?;
    }
    model.finish()?;

    debug!(
        records = total,
        skipped = total - records.len(),
        duplicates,
        "loaded frequency table"
    );
    Ok(model)
}

/// Parse a frequency table and build a finished model from it.
pub fn load_model<R: BufRead>(reader: R) -> Result<WordModel, LoadError> {
    build_model(parse_records(reader)?)
}

/// Open a frequency table file and build a finished model from it.
pub fn load_model_from_path(path: impl AsRef<Path>) -> Result<WordModel, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "reading frequency table");
    load_model(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WeightedModel;

    #[test]
    fn parses_records_and_ignores_extra_fields() {
        let table = "儿子 2 n\n的 1\n\n  名字\t2.5  n\n";
        let records = parse_records(table.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                ("儿子".to_string(), 2.0),
                ("的".to_string(), 1.0),
                ("名字".to_string(), 2.5),
            ]
        );
    }

    #[test]
    fn missing_frequency_is_an_error() {
        let err = parse_records("的 1\n名字\n".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingField { line: 2 }));
    }

    #[test]
    fn unparsable_frequency_is_an_error() {
        let err = parse_records("的 many\n".as_bytes()).unwrap_err();
        match err {
            LoadError::InvalidFrequency { line, value } => {
                assert_eq!(line, 1);
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unsorted_table_is_sorted() {
        let model = load_model("的 1\n他 1\n儿子 2\n儿 1\n".as_bytes()).unwrap();
        assert!(model.is_finished());
        assert_eq!(model.len(), 4);
        let words: Vec<&str> = model
            .find_prefixes_with_weight("儿子")
            .iter()
            .map(|w| w.word)
            .collect();
        assert_eq!(words, ["儿", "儿子"]);
    }

    #[test]
    fn first_duplicate_wins() {
        let model = load_model("b 1\na 1\nb 6\n".as_bytes()).unwrap();
        assert_eq!(model.len(), 2);
        // Sum counts every kept record: 1 + 1.
        assert_eq!(model.weight_of("b"), Some(1.0));
    }

    #[test]
    fn unusable_frequencies_are_skipped() {
        let model = load_model("a 0\nb -3\nc 4\n".as_bytes()).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model.weight_of("a"), None);
        assert_eq!(model.weight_of("c"), Some(0.0));
    }

    #[test]
    fn unusable_record_does_not_shadow_later_duplicate() {
        let model = load_model("a 0\na 5\nb 1\n".as_bytes()).unwrap();
        assert_eq!(model.len(), 2);
        let expected = (6f64.log2() - 5f64.log2()) as f32;
        assert_eq!(model.weight_of("a"), Some(expected));
    }

    #[test]
    fn empty_table_gives_empty_model() {
        let model = load_model("".as_bytes()).unwrap();
        assert!(model.is_finished());
        assert!(model.is_empty());
    }

    #[test]
    fn buffer_loader_builds_model() {
        let loader = BufferLoader::new("名 1\n名字 3\n");
        let model = loader.load().unwrap();
        assert_eq!(model.weight_of("名"), Some(2.0));
    }

    #[test]
    fn file_loader_reports_missing_file() {
        let loader = FileLoader::new("/nonexistent/wordseg/dictionary.txt");
        let err = loader.load().unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
        assert!(err.to_string().contains("/nonexistent/wordseg/dictionary.txt"));
    }

    #[test]
    fn loader_is_usable_as_trait_object() {
        let loaders: Vec<Box<dyn ModelLoader>> = vec![
            Box::new(BufferLoader::new("a 1\n")),
            Box::new(BufferLoader::new("b 1\nc 1\n")),
        ];
        let sizes: Vec<usize> = loaders.iter().map(|l| l.load().unwrap().len()).collect();
        assert_eq!(sizes, [1, 2]);
    }
}
