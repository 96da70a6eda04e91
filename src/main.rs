use chrono::Local;
use clap::Parser;
use cotuong::display_format::{DisplayFormat, Glyphs};
use cotuong::game::GameState;
use cotuong::location::{Move, ParseMoveError};
use cotuong::piece::Side;
use cotuong::ranker::{self, Ranker, Role};
use env_logger::Target;
use log::{debug, info, warn, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "play co tuong as red against the computer")]
struct Arguments {
    #[arg(
        short,
        long,
        default_value_t = ranker::DEFAULT_DEPTH,
        value_parser = clap::value_parser!(u32).range(1..),
        help = "search depth in plies"
    )]
    depth: u32,

    #[arg(long, help = "draw pieces as letters instead of chinese characters")]
    ascii: bool,

    #[arg(long, help = "disable terminal colours")]
    plain: bool,

    #[arg(long, help = "computer plays random moves instead of searching")]
    random: bool,

    #[arg(long, help = "seed for --random")]
    seed: Option<u64>,

    #[arg(long, help = "starting position, black's back rank first, red to move")]
    fen: Option<String>,

    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[arg(long, help = "also append log records to this file")]
    log_file: Option<PathBuf>,
}

impl Arguments {
    fn display_format(&self) -> DisplayFormat {
        let glyphs = if self.ascii { Glyphs::Letters } else { Glyphs::Chinese };
        DisplayFormat::new(glyphs, !self.plain)
    }
}

/// Writes every log record to both sinks.
struct Tee<A, B>(A, B);

impl<A: Write, B: Write> Write for Tee<A, B> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_all(buf)?;
        self.1.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.1.flush()
    }
}

enum Command {
    Play(Move),
    Hint,
    Undo,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, ParseMoveError> {
        match line.trim() {
            "hint" => Ok(Command::Hint),
            "undo" => Ok(Command::Undo),
            "quit" | "exit" => Ok(Command::Quit),
            line => line.parse().map(Command::Play),
        }
    }
}

enum Opponent {
    Search { depth: u32 },
    Random(StdRng),
}

impl Opponent {
    fn reply(&mut self, state: &GameState) -> Option<Move> {
        match self {
            Opponent::Search { depth } => {
                let (score, mv) = ranker::search_best_move(state, *depth);
                debug!("computer expects a score of {score}");
                mv
            }
            Opponent::Random(random) => {
                let moves = state.legal_moves(state.side_to_move());
                if moves.is_empty() {
                    return None;
                }
                Some(moves[random.random_range(0..moves.len())])
            }
        }
    }
}

fn init_logger(arguments: &Arguments) -> Result<(), Box<dyn Error>> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(arguments.log_level).format(|buf, record| {
        writeln!(
            buf,
            "{style}[{}] [{:5}]{style:#} {}",
            Local::now().format("%T%.3f"),
            record.level(),
            record.args(),
            style = buf.default_level_style(record.level()),
        )
    });

    if let Some(path) = &arguments.log_file {
        let file = std::fs::OpenOptions::new().append(true).create(true).open(path)?;
        let file = io::BufWriter::new(file);
        builder.target(Target::Pipe(Box::new(Tee(io::stderr(), file))));
    } else {
        builder.target(Target::Stderr);
    }

    builder.try_init()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let arguments = Arguments::parse();
    init_logger(&arguments)?;

    let format = arguments.display_format();

    let start = match &arguments.fen {
        Some(fen) => GameState::from_fen(fen, Side::Red).ok_or("invalid fen")?,
        None => GameState::initial(),
    };

    let mut opponent = if arguments.random {
        let random = match arguments.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Opponent::Random(random)
    } else {
        Opponent::Search { depth: arguments.depth }
    };

    info!("starting game from {start}");
    let mut history = vec![start];
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while let Some(state) = history.last().cloned() {
        if let Some(outcome) = state.outcome() {
            println!("{}", state.display(format));
            info!("game over: {outcome}");
            break;
        }

        if state.side_to_move() == Side::Black {
            let Some(mv) = opponent.reply(&state) else {
                println!("the computer has no move");
                break;
            };
            info!("computer plays {mv}");
            history.push(state.apply(mv));
            continue;
        }

        println!("{}", state.display(format));
        print!("move (row col row col), hint, undo or quit: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        match Command::parse(&line?) {
            Ok(Command::Play(mv)) => {
                if !state.legal_moves(Side::Red).contains(&mv) {
                    warn!("rejected illegal move {mv}");
                    println!("{mv} is not a legal move for red");
                    continue;
                }
                info!("human plays {mv}");
                history.push(state.apply(mv));
            }
            Ok(Command::Hint) => {
                let mut ranker = Ranker::new(state.clone(), Role::Maximizer);
                ranker.rank(arguments.depth - 1);
                print!("{}", ranker.display(format));
            }
            Ok(Command::Undo) => {
                if history.len() < 3 {
                    println!("nothing to undo");
                } else {
                    history.truncate(history.len() - 2);
                    info!("undid the last move pair");
                }
            }
            Ok(Command::Quit) => break,
            Err(err) => {
                warn!("rejected input: {err}");
                println!("{err}");
            }
        }
    }

    Ok(())
}
