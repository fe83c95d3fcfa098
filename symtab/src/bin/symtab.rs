use clap::{Parser, Subcommand};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::exit;
use std::time::Instant;
use symtab::text::{filter_text, read_words, WordFrequencies, WordIndex, INDEX_BUCKETS};
use symtab::workload::{compare, TableConfig};
use symtab::{
    BinaryTreeStore, ChainedHashStore, Result, SortedArrayStore, StoreKind, SymbolTable,
    SymtabErrorKind, DEFAULT_BUCKETS, DEFAULT_CAPACITY,
};
use tracing::{info, Level};

// largest capacity or bucket count accepted from the command line
const MAX_TABLE_SIZE: usize = 1 << 24;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: SubCommand,

    #[clap(short, long, parse(from_occurrences))]
    #[clap(help = "Log progress to stderr, twice for debug output")]
    verbose: u64,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    #[clap(about = "Replace every character but letters, blanks and newlines with a blank")]
    Filter {
        #[clap(parse(from_os_str))]
        #[clap(help = "Text file, standard input if omitted")]
        file: Option<PathBuf>,
    },

    #[clap(about = "Put `key value` lines into a symbol table and print it")]
    Load {
        #[clap(long, default_value_t = StoreKind::Sorted)]
        #[clap(help = "Symbol table to use: sorted, tree or hash")]
        store: StoreKind,
        #[clap(long, default_value_t = DEFAULT_CAPACITY)]
        #[clap(help = "Initial capacity of the sorted store")]
        capacity: usize,
        #[clap(long, default_value_t = DEFAULT_BUCKETS)]
        #[clap(help = "Number of buckets of the hash store")]
        buckets: usize,
        #[clap(parse(from_os_str))]
        #[clap(help = "File of `key value` lines, value an integer")]
        file: PathBuf,
    },

    #[clap(about = "Index the words of a text and look up where they occur")]
    Index {
        #[clap(parse(from_os_str))]
        #[clap(help = "Text file to index")]
        file: PathBuf,
        #[clap(help = "Words to look up, asked for interactively if omitted")]
        words: Vec<String>,
        #[clap(long)]
        #[clap(help = "Print positions as a JSON array")]
        json: bool,
    },

    #[clap(about = "Rank the words of a text by how often they occur")]
    Common {
        #[clap(parse(from_os_str))]
        #[clap(help = "Text file to rank")]
        file: PathBuf,
        #[clap(help = "Queries `k` or `k+n`, asked for interactively if omitted")]
        queries: Vec<String>,
    },

    #[clap(about = "Time a word count in each symbol table")]
    Compare {
        #[clap(parse(from_os_str))]
        #[clap(help = "Text file to take the words from")]
        file: PathBuf,
        #[clap(long, default_value_t = 10)]
        #[clap(help = "Number of hundreds of words to count")]
        hundreds: usize,
        #[clap(long, default_value_t = 100)]
        #[clap(help = "Number of rounds to average")]
        rounds: u32,
        #[clap(long, default_value_t = DEFAULT_CAPACITY)]
        #[clap(help = "Initial capacity of the sorted store")]
        capacity: usize,
        #[clap(long, default_value_t = DEFAULT_BUCKETS)]
        #[clap(help = "Number of buckets of the hash store")]
        buckets: usize,
        #[clap(long)]
        #[clap(help = "Print the timings as JSON")]
        json: bool,
    },

    #[clap(about = "Show how evenly the words of a text spread over hash buckets")]
    Spread {
        #[clap(parse(from_os_str))]
        #[clap(help = "Text file to take the words from")]
        file: PathBuf,
        #[clap(long, default_value_t = INDEX_BUCKETS)]
        #[clap(help = "Number of buckets")]
        buckets: usize,
    },
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    info!("Application Started: Version {}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run(args.command) {
        eprintln!("{}", error);
        exit(1);
    }
}

fn run(command: SubCommand) -> Result<()> {
    match command {
        SubCommand::Filter { file } => {
            let stdout = io::stdout();
            match file {
                Some(path) => filter_text(open(&path)?, stdout.lock()),
                None => {
                    let stdin = io::stdin();
                    filter_text(stdin.lock(), stdout.lock())
                }
            }
        }

        SubCommand::Load {
            store,
            capacity,
            buckets,
            file,
        } => {
            check_table_size(capacity)?;
            check_table_size(buckets)?;
            let reader = open(&file)?;
            info!("Loading {} into {} store", file.display(), store);
            match store {
                StoreKind::Sorted => load(SortedArrayStore::with_capacity(capacity), reader),
                StoreKind::Tree => load(BinaryTreeStore::new(), reader),
                StoreKind::Hash => load(ChainedHashStore::with_buckets(buckets), reader),
            }
        }

        SubCommand::Index { file, words, json } => index(&file, &words, json),

        SubCommand::Common { file, queries } => common(&file, &queries),

        SubCommand::Compare {
            file,
            hundreds,
            rounds,
            capacity,
            buckets,
            json,
        } => {
            check_table_size(capacity)?;
            check_table_size(buckets)?;
            let words = read_words(open(&file)?, hundreds.saturating_mul(100))?;
            info!(words = words.len(), rounds, "Comparing symbol tables");
            let timings = compare(&words, rounds, TableConfig { capacity, buckets })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&timings)?);
            } else {
                for timing in &timings {
                    println!("{}: avg {} ns", timing.store, timing.mean_ns);
                }
            }
            Ok(())
        }

        SubCommand::Spread { file, buckets } => {
            check_table_size(buckets)?;
            spread(&file, buckets)
        }
    }
}

fn check_table_size(size: usize) -> Result<()> {
    if size > MAX_TABLE_SIZE {
        return Err(SymtabErrorKind::InvalidInput.into());
    }
    Ok(())
}

fn open(path: &Path) -> Result<BufReader<File>> {
    Ok(BufReader::new(File::open(path)?))
}

fn load<T, R>(mut table: T, reader: R) -> Result<()>
where
    T: SymbolTable<String, i64> + fmt::Display,
    R: BufRead,
{
    for line in reader.lines() {
        let line = line?;
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(key), Some(value)) => table.put(key.to_owned(), value.parse()?),
            // blank line
            (None, _) => continue,
            _ => return Err(SymtabErrorKind::InvalidInput.into()),
        }
    }
    println!("{}", table);
    Ok(())
}

fn index(path: &Path, words: &[String], json: bool) -> Result<()> {
    let index = WordIndex::build(open(path)?)?;

    let answer = |word: &str| -> Result<()> {
        if index.contains(word) {
            let positions = index.positions(word)?;
            if json {
                println!("{}", serde_json::to_string(positions)?);
            } else {
                println!("@ {:?}", positions);
            }
        } else {
            println!("That word is not contained within the text");
        }
        Ok(())
    };

    if words.is_empty() {
        prompt_loop("Please enter a word to find the index of: ", answer)
    } else {
        words.iter().try_for_each(|word| answer(word.as_str()))
    }
}

fn common(path: &Path, queries: &[String]) -> Result<()> {
    let start = Instant::now();
    let index = WordIndex::build(open(path)?)?;
    let ranking = WordFrequencies::from_index(&index);
    info!("Operations took {:.4} seconds", start.elapsed().as_secs_f64());

    let answer = |query: &str| -> Result<()> {
        let parsed = match parse_query(query) {
            Ok(parsed) => parsed,
            Err(_) => {
                println!("Expected a number k or k+n, please try again");
                return Ok(());
            }
        };

        let ranks = match parsed {
            (k, None) => ranking.rank(k).map(|rank| vec![rank]),
            (k, Some(n)) => ranking.range(k, n),
        };
        match ranks {
            Ok(ranks) => {
                for (offset, (frequency, words)) in ranks.iter().enumerate() {
                    println!(
                        "{}. [{}] ({} occurrences)",
                        parsed.0 + offset,
                        words.join(", "),
                        frequency
                    );
                }
            }
            Err(error) if error.kind() == SymtabErrorKind::OutOfRange => {
                println!("Input index is too small or too large, please try again");
            }
            Err(error) => return Err(error),
        }
        Ok(())
    };

    if queries.is_empty() {
        prompt_loop(
            "Please enter a number k for the kth most common words, or k+n for the kth to the k+nth: ",
            answer,
        )
    } else {
        queries.iter().try_for_each(|query| answer(query.as_str()))
    }
}

// `k` or `k+n`
fn parse_query(query: &str) -> Result<(usize, Option<usize>)> {
    match query.split_once('+') {
        Some((k, n)) => Ok((k.trim().parse()?, Some(n.trim().parse()?))),
        None => Ok((query.trim().parse()?, None)),
    }
}

fn spread(path: &Path, buckets: usize) -> Result<()> {
    let index = WordIndex::build_with_buckets(open(path)?, buckets)?;
    let table = index.table();

    // chain length -> number of buckets with a chain that long
    let mut tally: BinaryTreeStore<usize, usize> = BinaryTreeStore::new();
    for len in table.chain_lengths() {
        let count = if tally.contains(&len) {
            *tally.get(&len)? + 1
        } else {
            1
        };
        tally.put(len, count);
    }

    println!(
        "{} words in {} buckets, load factor {:.2}",
        table.size(),
        table.bucket_count(),
        table.load_factor()
    );
    for len in tally.inorder_keys() {
        println!("chain length {}: {} buckets", len, tally.get(len)?);
    }
    Ok(())
}

// Ask `prompt` until an empty line or the end of input
fn prompt_loop<F>(prompt: &str, mut answer: F) -> Result<()>
where
    F: FnMut(&str) -> Result<()>,
{
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", prompt);
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };
        let query = line.trim();
        if query.is_empty() {
            return Ok(());
        }
        answer(query)?;
        println!();
    }
}
