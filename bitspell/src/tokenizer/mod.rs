//! Splitting of raw text into dictionary words.
use smol_str::SmolStr;
use unic_ucd_category::GeneralCategory;

/// Turns a chunk of text into normalized words.
pub trait WordSplitter: Send + Sync {
    fn split(&self, text: &str) -> Vec<SmolStr>;
}

impl<F> WordSplitter for F
where
    F: Fn(&str) -> Vec<SmolStr> + Send + Sync,
{
    #[inline(always)]
    fn split(&self, text: &str) -> Vec<SmolStr> {
        self(text)
    }
}

/// Splits on whitespace, lower-cases every token and keeps its first run
/// of letters and hyphens. Tokens without such a run are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSplitter;

impl WordSplitter for DefaultSplitter {
    fn split(&self, text: &str) -> Vec<SmolStr> {
        text.split_whitespace().filter_map(normalize).collect()
    }
}

#[inline(always)]
fn is_word_char(c: char) -> bool {
    c == '-' || GeneralCategory::of(c).is_letter()
}

#[inline(always)]
pub fn lower_case(s: &str) -> SmolStr {
    s.chars()
        .map(|c| c.to_lowercase().collect::<String>())
        .collect::<SmolStr>()
}

/// Normalized form of a single whitespace-free token.
pub fn normalize(token: &str) -> Option<SmolStr> {
    let lower = lower_case(token);
    let start = lower.find(is_word_char)?;
    let rest = &lower[start..];
    let end = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
    Some(SmolStr::from(&rest[..end]))
}

pub trait Tokenize {
    /// Words of `self` according to [`DefaultSplitter`].
    fn words(&self) -> std::vec::IntoIter<SmolStr>;
}

impl Tokenize for str {
    fn words(&self) -> std::vec::IntoIter<SmolStr> {
        DefaultSplitter.split(self).into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic() {
        let msg = "This is an ordinary-sentence! \"Quoted,\" an emoji: (😄), and\t a TAB.";
        let words: Vec<_> = msg.words().collect();
        assert_eq!(
            words,
            vec![
                "this",
                "is",
                "an",
                "ordinary-sentence",
                "quoted",
                "an",
                "emoji",
                "and",
                "a",
                "tab"
            ]
        );
    }

    #[test]
    fn keeps_non_latin_letters() {
        let words: Vec<_> = "Яблоко, ÆRE şey".words().collect();
        assert_eq!(words, vec!["яблоко", "ære", "şey"]);
    }

    #[test]
    fn first_run_only() {
        assert_eq!(normalize("it's"), Some("it".into()));
        assert_eq!(normalize("123abc456def"), Some("abc".into()));
        assert_eq!(normalize("42"), None);
        assert_eq!(normalize("..."), None);
    }

    #[test]
    fn closures_are_splitters() {
        let by_comma = |s: &str| s.split(',').map(SmolStr::from).collect::<Vec<_>>();
        assert_eq!(by_comma.split("a,b"), vec!["a", "b"]);
    }
}
