use argh::FromArgs;
use sprig::{
    tests_common::{generate_key_fixed_length, generate_keys_skewed},
    visitor::{DotPrinter, DotPrinterSettings, TreeStatsCollector, WellFormedChecker},
    Keyed, Trie, TrieOptions,
};
use std::{
    error::Error,
    fmt::{self, Display},
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::PathBuf,
    str::FromStr,
};
use tracing_subscriber::EnvFilter;

#[derive(FromArgs)]
/// Build a trie from generated or user supplied keys and write it out as a
/// graphviz diagram.
struct TrieVizArgs {
    /// input to read keys from, one key per line
    #[argh(option)]
    input_file: Option<PathBuf>,

    /// maximum number of key bytes in a single node
    #[argh(option, default = "sprig::DEFAULT_MAX_PREFIX_PER_NODE")]
    max_prefix_per_node: usize,

    /// number of children kept in a sparse list before switching to dense
    #[argh(option, default = "sprig::DEFAULT_MAX_CHILDREN_PER_SPARSE_NODE")]
    max_children_per_sparse_node: usize,

    /// print node prefixes as escaped text instead of byte lists
    #[argh(switch)]
    text: bool,

    /// print trie statistics to stderr
    #[argh(switch)]
    stats: bool,

    /// what shape of trie to generate
    #[argh(positional)]
    shape: TrieShape,

    /// how large the trie should be
    #[argh(positional)]
    size: usize,

    /// where to output the trie diagram
    ///
    /// To output to stdout, use '_'.
    #[argh(positional)]
    output_location: String,
}

/// An item labelled with the order it was generated in.
struct Labeled {
    key: Box<[u8]>,
    label: String,
}

impl Keyed for Labeled {
    type Key = [u8];

    fn key(&self) -> &[u8] {
        &self.key
    }
}

impl Display for Labeled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: TrieVizArgs = argh::from_env();

    let options = TrieOptions::default()
        .max_prefix_per_node(args.max_prefix_per_node)
        .max_children_per_sparse_node(args.max_children_per_sparse_node);
    let mut trie = Trie::with_options(options);

    for item in args.shape.generate_items(args.size, args.input_file)? {
        let _ = trie.set(item);
    }

    if trie.is_empty() {
        return Err(Box::new(EmptyTrieError));
    }

    let num_nodes = WellFormedChecker::check(&trie)?;
    tracing::info!(items = trie.len(), nodes = num_nodes, "built trie");

    if args.stats {
        eprintln!("{}", TreeStatsCollector::collect(&trie));
    }

    let settings = DotPrinterSettings {
        display_prefix_as_text: args.text,
    };

    if args.output_location == "_" {
        let stdout = io::stdout();
        let handle = stdout.lock();

        let mut buffer = BufWriter::new(handle);

        DotPrinter::print(&mut buffer, &trie, settings)?;
        buffer.flush()?;
    } else {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(args.output_location)?;

        let mut buffer = BufWriter::new(file);

        DotPrinter::print(&mut buffer, &trie, settings)?;
        buffer.flush()?;
    }

    Ok(())
}

#[derive(Debug)]
enum TrieShape {
    Skewed,
    FanOut,
    FromTextFile,
}

impl TrieShape {
    fn generate_items(
        self,
        size: usize,
        text_file_path: Option<PathBuf>,
    ) -> Result<Box<dyn Iterator<Item = Labeled>>, Box<dyn Error>> {
        let keys: Box<dyn Iterator<Item = Box<[u8]>>> = match self {
            TrieShape::Skewed => Box::new(generate_keys_skewed(size.max(1))),
            TrieShape::FanOut => {
                let width = u8::try_from(size.clamp(1, 256) - 1)?;
                Box::new(generate_key_fixed_length(2, width))
            },
            TrieShape::FromTextFile => {
                let path = text_file_path.ok_or(MissingInputError)?;
                Box::new(read_keys_from_text_file(File::open(path)?)?.into_iter())
            },
        };

        Ok(Box::new(keys.enumerate().map(|(idx, key)| Labeled {
            key,
            label: idx.to_string(),
        })))
    }
}

fn read_keys_from_text_file(text_file: File) -> io::Result<Vec<Box<[u8]>>> {
    BufReader::new(text_file)
        .lines()
        .filter(|line| !matches!(line, Ok(line) if line.is_empty()))
        .map(|line| line.map(|line| line.into_bytes().into_boxed_slice()))
        .collect()
}

impl FromStr for TrieShape {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "skewed" => Ok(TrieShape::Skewed),
            "fan_out" => Ok(TrieShape::FanOut),
            "from_text_file" => Ok(TrieShape::FromTextFile),
            _ => Err(ShapeParseError(s.into())),
        }
    }
}

#[derive(Debug)]
struct ShapeParseError(String);

impl Display for ShapeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unable to parse trie shape from argument value [{}].",
            self.0
        )
    }
}

#[derive(Debug)]
struct MissingInputError;

impl Display for MissingInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "The 'from_text_file' shape needs an --input-file.")
    }
}

impl Error for MissingInputError {}

#[derive(Debug)]
struct EmptyTrieError;

impl Display for EmptyTrieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "There were no keys to insert into the trie!")
    }
}

impl Error for EmptyTrieError {}
