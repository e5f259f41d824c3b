use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","can't","cannot","could","couldn't",
            "did","didn't","do","does","doesn't","doing","don't","down","during",
            "each","few","for","from","further",
            "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
            "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
            "let's","me","more","most","mustn't","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
            "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
            "under","until","up","very",
            "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
            "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// One analyzed token: the final term, the byte span it was matched at in
/// the original text, and its match ordinal.
///
/// Offsets always index the input passed to [`Analyzer::analyze`] and are
/// in-bounds, non-overlapping and non-decreasing across the stream.
/// Stopword removal leaves gaps in `position`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub term: String,
    pub start: usize,
    pub end: usize,
    pub position: u32,
}

/// Text analyzer: word segmentation, NFKC normalization, lowercasing,
/// stopword removal and English stemming.
///
/// Segmentation runs over the raw input so offsets stay valid for the
/// original text; normalization and stemming apply per token afterwards.
/// Analysis is a pure function of the input and the fixed stopword table.
pub struct Analyzer {
    word: Regex,
    stemmer: Stemmer,
}

impl Analyzer {
    pub fn new() -> Self {
        Self {
            word: Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex"),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Lazily tokenize `text`. The stream is finite, consumed once, and
    /// empty input yields an empty stream.
    pub fn analyze<'a>(&'a self, text: &'a str) -> impl Iterator<Item = Token> + 'a {
        self.word
            .find_iter(text)
            .enumerate()
            .filter_map(move |(pos, mat)| {
                let folded = mat.as_str().nfkc().collect::<String>().to_lowercase();
                if is_stopword(&folded) {
                    return None;
                }
                Some(Token {
                    term: self.stemmer.stem(&folded).to_string(),
                    start: mat.start(),
                    end: mat.end(),
                    position: pos as u32,
                })
            })
    }
}

impl Default for Analyzer {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_analyze() {
        let analyzer = Analyzer::new();
        let terms: Vec<String> = analyzer.analyze("Running, runner's run!").map(|t| t.term).collect();
        assert!(terms.iter().any(|w| w == "run"));
    }
}
