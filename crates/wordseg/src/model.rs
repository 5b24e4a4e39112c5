// Weighted word model: a prefix dictionary plus unigram path costs
//
// The model is built in two phases. During the build phase words are
// appended in sorted order together with their raw frequency counts.
// `finish` freezes the dictionary and turns every frequency into the cost
// `log2(S) - log2(f)`, where `S` is the sum of all frequencies. Summing these
// costs along a path gives `-log2` of the product of the word probabilities,
// so the cheapest path is the most likely word sequence.
//
// Once finished, the model only talks to its dictionary through
// `PrefixDictionary`, so a finished model can also wrap a dictionary built
// elsewhere (see `WordModel::from_dictionary`).

use std::rc::Rc;
use std::sync::Arc;

use tracing::{debug, warn};
use wordseg_core::WordWeight;
use wordseg_dawg::{Dawg, DawgBuilder, DawgError, PrefixDictionary};

/// Error type for word model construction and queries.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// The dictionary rejected the word (unsorted, duplicate or empty).
    #[error("dictionary rejected word: {0}")]
    Dictionary(#[from] DawgError),

    /// The raw frequency is zero, negative or not finite.
    #[error("invalid frequency {frequency} for word {word:?}: frequencies must be finite and positive")]
    InvalidFrequency { word: String, frequency: f32 },

    /// A frequency passed alongside a prebuilt dictionary is unusable.
    #[error("invalid frequency {frequency} at index {index}: frequencies must be finite and positive")]
    InvalidFrequencyAt { index: usize, frequency: f32 },

    /// A prebuilt dictionary and its frequency table disagree in size.
    #[error("dictionary has {words} words but {frequencies} frequencies were given")]
    FrequencyCount { words: usize, frequencies: usize },

    /// `add_word` or `finish` was called on a finished model.
    #[error("word model is already finished")]
    AlreadyFinished,

    /// The model was queried before `finish`.
    #[error("word model is not finished")]
    NotFinished,
}

/// Query capability the segmenter depends on.
///
/// Any type that can list the weighted dictionary words starting a string can
/// drive a [`Segmenter`](crate::Segmenter), which makes it easy to substitute
/// fixed test models.
pub trait WeightedModel {
    /// Return every dictionary word that is a prefix of `text`, with its
    /// weight. Weights must be non-negative; lower means more probable.
    /// A path whose summed weight is not finite is never taken.
    fn find_prefixes_with_weight<'a>(&self, text: &'a str) -> Vec<WordWeight<'a>>;
}

impl<M: WeightedModel + ?Sized> WeightedModel for &M {
    fn find_prefixes_with_weight<'a>(&self, text: &'a str) -> Vec<WordWeight<'a>> {
        (**self).find_prefixes_with_weight(text)
    }
}

impl<M: WeightedModel + ?Sized> WeightedModel for Box<M> {
    fn find_prefixes_with_weight<'a>(&self, text: &'a str) -> Vec<WordWeight<'a>> {
        (**self).find_prefixes_with_weight(text)
    }
}

impl<M: WeightedModel + ?Sized> WeightedModel for Rc<M> {
    fn find_prefixes_with_weight<'a>(&self, text: &'a str) -> Vec<WordWeight<'a>> {
        (**self).find_prefixes_with_weight(text)
    }
}

impl<M: WeightedModel + ?Sized> WeightedModel for Arc<M> {
    fn find_prefixes_with_weight<'a>(&self, text: &'a str) -> Vec<WordWeight<'a>> {
        (**self).find_prefixes_with_weight(text)
    }
}

/// Dictionary-backed word model with frequency-derived weights.
///
/// ```
/// use wordseg::{WeightedModel, WordModel};
///
/// let mut model = WordModel::new();
/// model.add_word("名", 1.0).unwrap();
/// model.add_word("名字", 3.0).unwrap();
/// model.finish().unwrap();
///
/// let matches = model.find_prefixes_with_weight("名字叫");
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].word, "名");
/// assert_eq!(matches[0].weight, 2.0); // log2(4) - log2(1)
/// ```
#[derive(Debug)]
pub struct WordModel<D = Dawg> {
    /// Present during the build phase only.
    builder: Option<DawgBuilder>,
    /// Present once finished.
    dictionary: Option<D>,
    /// Raw frequencies in insertion order, cleared by `finish`.
    frequencies: Vec<f32>,
    /// Weights indexed by canonical dictionary index, filled by `finish`.
    weights: Vec<f32>,
}

impl Default for WordModel {
    fn default() -> Self {
        Self::new()
    }
}

impl WordModel {
    /// Create an empty model in its build phase.
    pub fn new() -> Self {
        Self {
            builder: Some(DawgBuilder::new()),
            dictionary: None,
            frequencies: Vec::new(),
            weights: Vec::new(),
        }
    }

    /// Append a word with its raw frequency count.
    ///
    /// Words must be added in strictly increasing codepoint order with no
    /// duplicates. A violation is reported immediately and nothing is added;
    /// callers are expected to sort and de-duplicate their data first.
    ///
    /// When real frequencies are unknown, passing the word's length makes
    /// the segmenter prefer the fewest words.
    pub fn add_word(&mut self, word: &str, frequency: f32) -> Result<(), ModelError> {
        let Some(builder) = self.builder.as_mut() else {
            return Err(ModelError::AlreadyFinished);
        };
        if !is_usable_frequency(frequency) {
            return Err(ModelError::InvalidFrequency {
                word: word.to_string(),
                frequency,
            });
        }
        builder.add(word)?;
        self.frequencies.push(frequency);
        Ok(())
    }

    /// Freeze the dictionary and compute every word's weight.
    ///
    /// Must be called exactly once, after the last `add_word`.
    pub fn finish(&mut self) -> Result<(), ModelError> {
        let Some(builder) = self.builder.take() else {
            return Err(ModelError::AlreadyFinished);
        };
        let dawg = builder.finish();
        let (weights, sum) = weights_from_frequencies(&self.frequencies);
        self.weights = weights;
        self.frequencies = Vec::new();

        debug!(
            words = dawg.len(),
            nodes = dawg.node_count(),
            edges = dawg.edge_count(),
            frequency_sum = sum,
            "word model finished"
        );
        self.dictionary = Some(dawg);
        Ok(())
    }
}

impl<D: PrefixDictionary> WordModel<D> {
    /// Create a finished model over a prebuilt dictionary.
    ///
    /// `frequencies[i]` is the raw frequency of the word with canonical
    /// index `i`; there must be exactly one per dictionary word.
    pub fn from_dictionary(dictionary: D, frequencies: &[f32]) -> Result<Self, ModelError> {
        if frequencies.len() != dictionary.len() {
            return Err(ModelError::FrequencyCount {
                words: dictionary.len(),
                frequencies: frequencies.len(),
            });
        }
        if let Some((index, &frequency)) = frequencies
            .iter()
            .enumerate()
            .find(|&(_, &f)| !is_usable_frequency(f))
        {
            return Err(ModelError::InvalidFrequencyAt { index, frequency });
        }
        let (weights, sum) = weights_from_frequencies(frequencies);
        debug!(
            words = dictionary.len(),
            frequency_sum = sum,
            "word model created from dictionary"
        );
        Ok(Self {
            builder: None,
            dictionary: Some(dictionary),
            frequencies: Vec::new(),
            weights,
        })
    }

    pub fn is_finished(&self) -> bool {
        self.dictionary.is_some()
    }

    /// Number of words added (before `finish`) or stored (after).
    pub fn len(&self) -> usize {
        match (&self.dictionary, &self.builder) {
            (Some(dictionary), _) => dictionary.len(),
            (None, Some(builder)) => builder.len(),
            (None, None) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The frozen dictionary, once finished.
    pub fn dictionary(&self) -> Option<&D> {
        self.dictionary.as_ref()
    }

    /// Weight of a single word, if the model is finished and knows it.
    pub fn weight_of(&self, word: &str) -> Option<f32> {
        let index = self.dictionary.as_ref()?.index_of(word)?;
        self.weights.get(index).copied()
    }

    /// Like [`WeightedModel::find_prefixes_with_weight`], but reports a
    /// query on an unfinished model as an error.
    ///
    /// Matches whose index has no weight are dropped.
    pub fn try_find_prefixes_with_weight<'a>(
        &self,
        text: &'a str,
    ) -> Result<Vec<WordWeight<'a>>, ModelError> {
        let dictionary = self.dictionary.as_ref().ok_or(ModelError::NotFinished)?;
        Ok(dictionary
            .find_prefixes(text)
            .into_iter()
            .filter_map(|m| {
                let weight = self.weights.get(m.index)?;
                Some(WordWeight::new(m.word, *weight))
            })
            .collect())
    }
}

impl<D: PrefixDictionary> WeightedModel for WordModel<D> {
    /// Querying an unfinished model is a contract violation: it logs a
    /// warning and finds nothing.
    fn find_prefixes_with_weight<'a>(&self, text: &'a str) -> Vec<WordWeight<'a>> {
        match self.try_find_prefixes_with_weight(text) {
            Ok(matches) => matches,
            Err(err) => {
                warn!(%err, "prefix query on a word model that is not finished");
                Vec::new()
            }
        }
    }
}

fn is_usable_frequency(frequency: f32) -> bool {
    frequency.is_finite() && frequency > 0.0
}

/// Turn raw frequencies into `log2(S) - log2(f)` costs. Also returns `S`.
fn weights_from_frequencies(frequencies: &[f32]) -> (Vec<f32>, f64) {
    let sum: f64 = frequencies.iter().map(|&f| f64::from(f)).sum();
    let log_total = sum.log2();
    let weights = frequencies
        .iter()
        .map(|&f| (log_total - f64::from(f).log2()) as f32)
        .collect();
    (weights, sum)
}
