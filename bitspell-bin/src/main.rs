use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use gumdrop::Options;
use serde::Serialize;

use bitspell::speller::suggestion::Suggestion;
use bitspell::tokenizer::{normalize, Tokenize};
use bitspell::{Spellchecker, SpellerConfig};

trait OutputWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool);
    fn write_suggestions(&mut self, word: &str, suggestions: &[Suggestion]);
    fn finish(&mut self) -> anyhow::Result<()>;
}

struct StdoutWriter;

impl OutputWriter for StdoutWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        println!(
            "Input: {}\t\t[{}]",
            &word,
            if is_correct { "CORRECT" } else { "INCORRECT" }
        );
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        for sugg in suggestions {
            println!("{}\t\t{:.4}", sugg.value, sugg.score);
        }
        println!();
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SuggestionRequest {
    word: String,
    is_correct: bool,
    suggestions: Vec<Suggestion>,
}

#[derive(Serialize)]
struct JsonWriter {
    results: Vec<SuggestionRequest>,
}

impl JsonWriter {
    pub fn new() -> JsonWriter {
        JsonWriter { results: vec![] }
    }
}

impl OutputWriter for JsonWriter {
    fn write_correction(&mut self, word: &str, is_correct: bool) {
        self.results.push(SuggestionRequest {
            word: word.to_owned(),
            is_correct,
            suggestions: vec![],
        });
    }

    fn write_suggestions(&mut self, _word: &str, suggestions: &[Suggestion]) {
        if let Some(last) = self.results.last_mut() {
            last.suggestions = suggestions.to_vec();
        }
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

fn run(
    speller: &Spellchecker,
    words: Vec<String>,
    writer: &mut dyn OutputWriter,
    n_best: usize,
    is_always_suggesting: bool,
) {
    for word in words {
        let is_correct = speller.is_correct(&word);
        writer.write_correction(&word, is_correct);

        if !is_correct || is_always_suggesting {
            let suggestions = speller.suggestions_n(&word, n_best);
            writer.write_suggestions(&word, &suggestions);
        }
    }
}

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(command)]
    command: Option<Command>,
}

#[derive(Debug, Options)]
enum Command {
    #[options(help = "build a dictionary from text files")]
    Build(BuildArgs),

    #[options(help = "get suggestions for provided input")]
    Suggest(SuggestArgs),

    #[options(help = "print input in word-separated tokenized form")]
    Tokenize(TokenizeArgs),
}

#[derive(Debug, Options)]
struct BuildArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "dictionary file to write", required)]
    output: PathBuf,

    #[options(no_short, help = "letters of the alphabet")]
    alphabet: Option<String>,

    #[options(no_short, help = "number of signature bits, 0 for one per letter")]
    length: Option<usize>,

    #[options(no_short, long = "max-errors", help = "largest edit distance for suggestions")]
    max_errors: Option<usize>,

    #[options(no_short, help = "JSON speller configuration")]
    config: Option<PathBuf>,

    #[options(free, help = "text files to read words from, stdin when empty")]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Options)]
struct SuggestArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "dictionary to be used", required)]
    dictionary: PathBuf,

    #[options(short = "S", help = "always show suggestions even if word is correct")]
    always_suggest: bool,

    #[options(no_short, long = "max-errors", help = "largest edit distance for suggestions")]
    max_errors: Option<usize>,

    #[options(short = "n", help = "maximum number of results")]
    nbest: Option<usize>,

    #[options(no_short, long = "json", help = "output in JSON format")]
    use_json: bool,

    #[options(free, help = "words to be processed")]
    inputs: Vec<String>,
}

#[derive(Debug, Options)]
struct TokenizeArgs {
    #[options(help = "print help message")]
    help: bool,

    #[options(short = "w", long = "words", help = "show words only")]
    is_words_only: bool,

    #[options(free, help = "text to be tokenized")]
    inputs: Vec<String>,
}

fn read_stdin() -> anyhow::Result<String> {
    eprintln!("Reading from stdin...");
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("reading stdin")?;
    Ok(buffer)
}

fn load_config(path: &Path) -> anyhow::Result<SpellerConfig> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn build(args: BuildArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SpellerConfig::default(),
    };

    if let Some(letters) = args.alphabet {
        config.alphabet.length = letters.chars().count();
        config.alphabet.letters = letters;
    }
    if let Some(v) = args.length {
        config.alphabet.length = v;
    }
    if let Some(v) = args.max_errors {
        config.max_errors = v;
    }

    log::debug!("building with {:?}", config);
    let speller = Spellchecker::new(config)?;

    if args.inputs.is_empty() {
        eprintln!("Reading from stdin...");
        let stdin = io::stdin();
        speller.add_from(stdin.lock())?;
    } else {
        for path in &args.inputs {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            speller
                .add_from(BufReader::new(file))
                .with_context(|| format!("reading {}", path.display()))?;
        }
    }

    speller.save_to_path(&args.output)?;
    eprintln!(
        "Wrote {} words to {}",
        speller.len(),
        args.output.display()
    );

    Ok(())
}

fn suggest(args: SuggestArgs) -> anyhow::Result<()> {
    let speller = Spellchecker::load_from_path(&args.dictionary)
        .with_context(|| format!("loading {}", args.dictionary.display()))?;

    if let Some(v) = args.max_errors {
        speller.set_max_errors(v);
    }
    let n_best = args.nbest.unwrap_or_else(|| speller.n_best());

    let mut writer: Box<dyn OutputWriter> = if args.use_json {
        Box::new(JsonWriter::new())
    } else {
        Box::new(StdoutWriter)
    };

    let words: Vec<String> = if args.inputs.is_empty() {
        let stdin = io::stdin();
        let mut out = vec![];
        for line in stdin.lock().lines() {
            let line = line.context("reading stdin")?;
            out.extend(line.split_whitespace().filter_map(normalize).map(|w| w.to_string()));
        }
        out
    } else {
        args.inputs
            .iter()
            .filter_map(|x| normalize(x))
            .map(|w| w.to_string())
            .collect()
    };

    run(&speller, words, &mut *writer, n_best, args.always_suggest);

    writer.finish()
}

fn tokenize(args: TokenizeArgs) -> anyhow::Result<()> {
    let inputs: String = if args.inputs.is_empty() {
        read_stdin()?
    } else {
        args.inputs.join(" ")
    };

    if args.is_words_only {
        for token in inputs.words() {
            println!("{}", token);
        }
    } else {
        for (index, token) in inputs.split_whitespace().enumerate() {
            match normalize(token) {
                Some(word) => println!("{:>4}: \"{}\" -> \"{}\"", index, token, word),
                None => println!("{:>4}: \"{}\" -> -", index, token),
            }
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();

    match args.command {
        None => Ok(()),
        Some(Command::Build(args)) => build(args),
        Some(Command::Suggest(args)) => suggest(args),
        Some(Command::Tokenize(args)) => tokenize(args),
    }
}
