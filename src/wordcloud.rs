//! Scaling of word weights to word cloud font sizes
//!
//! A job can report two sets of weighted words: words enriched in the
//! names of the input terms and words correlated with the user values.
//! Both are scaled independently onto the integer range
//! [`MIN_WORD_SIZE`]`..=`[`MAX_WORD_SIZE`].

use crate::{MAX_WORD_SIZE, MIN_WORD_SIZE};

/// A word together with its (non-negative) weight
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedWord {
    word: String,
    weight: f64,
}

impl WeightedWord {
    /// Constructs a new `WeightedWord`
    pub fn new(word: &str, weight: f64) -> Self {
        Self {
            word: word.to_string(),
            weight,
        }
    }

    /// The word
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The weight, e.g. the frequency of the word
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl From<(&str, f64)> for WeightedWord {
    fn from((word, weight): (&str, f64)) -> Self {
        WeightedWord::new(word, weight)
    }
}

/// A word with its scaled size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSize {
    word: String,
    size: u32,
}

impl WordSize {
    /// The word
    pub fn word(&self) -> &str {
        &self.word
    }

    /// The size, between `MIN_WORD_SIZE` and `MAX_WORD_SIZE`
    pub fn size(&self) -> u32 {
        self.size
    }
}

/// Transformation applied to the weights before scaling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// Use the weights as they are
    #[default]
    None,
    /// Use the square root of the weights, dampening very frequent words
    SquareRoot,
}

impl Compression {
    /// Applies the compression to `weight`
    pub fn apply(&self, weight: f64) -> f64 {
        match self {
            Compression::None => weight,
            Compression::SquareRoot => weight.sqrt(),
        }
    }
}

/// Scales the weights of `words` to word cloud sizes
///
/// Words with a (compressed) weight of 0 or less and words whose weight is
/// not finite are dropped, all other words keep their input order. The smallest weight gets a size of
/// `MIN_WORD_SIZE`, the largest one `MAX_WORD_SIZE`, and everything in
/// between is scaled linearly and rounded half to even. If all weights
/// are equal, all words get the smallest size.
///
/// # Examples
///
/// ```
/// use revigo_export::wordcloud::{sizes, Compression, WeightedWord};
///
/// let words = vec![
///     WeightedWord::new("apoptosis", 4.0),
///     WeightedWord::new("signal", 4.0),
///     WeightedWord::new("kinase", 1.0),
///     WeightedWord::new("of", 0.0),
/// ];
///
/// let result = sizes(&words, Compression::SquareRoot);
/// let result: Vec<(&str, u32)> = result.iter().map(|w| (w.word(), w.size())).collect();
/// assert_eq!(result, vec![("apoptosis", 9), ("signal", 9), ("kinase", 1)]);
/// ```
pub fn sizes(words: &[WeightedWord], compression: Compression) -> Vec<WordSize> {
    fn is_sized(weight: f64) -> bool {
        weight.is_finite() && weight > 0.0
    }

    let weights: Vec<f64> = words.iter().map(|w| compression.apply(w.weight)).collect();

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &weight in weights.iter().filter(|w| is_sized(**w)) {
        min = min.min(weight);
        max = max.max(weight);
    }

    if min > max {
        // no positive finite weights
        return Vec::new();
    }
    if min == max {
        max += 1.0;
    }
    let range = max - min;

    words
        .iter()
        .zip(weights)
        .filter(|(_, weight)| is_sized(*weight))
        .map(|(word, weight)| {
            let scaled = ((weight - min) * (MAX_WORD_SIZE - MIN_WORD_SIZE) / range).round_ties_even();
            WordSize {
                word: word.word.clone(),
                // huge ranges overflow the scaling to infinity
                size: (MIN_WORD_SIZE + scaled)
                    .clamp(MIN_WORD_SIZE, MAX_WORD_SIZE)
                    .ceil() as u32,
            }
        })
        .collect()
}
