use clap::Parser;
use mimalloc::MiMalloc;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use wordle_entropy::players::{Greedy, Player, TwoStep};
use wordle_entropy::{dictionary, pattern, Game, Matrix, Word, WordleError};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(name = "wordle_entropy", about = "Information-theoretic Wordle solver")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Builds the outcome matrix and writes it to disk.
    BuildMatrix {
        #[clap(long)]
        solutions: Option<PathBuf>,
        #[clap(long)]
        guesses: Option<PathBuf>,
        #[clap(long, default_value = "matrix.bin")]
        out: PathBuf,
    },
    /// Plays one scripted game against a known answer and prints each turn.
    Play {
        #[clap(long)]
        solution: String,
        #[clap(long)]
        matrix: Option<PathBuf>,
        #[clap(long, default_value = "greedy")]
        strategy: String,
        /// A guess to play unconditionally on the first turn (two-step only).
        #[clap(long)]
        opening: Option<String>,
    },
    /// Plays one game per target in parallel and emits `{target: score}` as JSON.
    Eval {
        #[clap(long)]
        matrix: Option<PathBuf>,
        #[clap(long, default_value = "greedy")]
        strategy: String,
        #[clap(long)]
        targets: Option<PathBuf>,
        /// A guess to play unconditionally on the first turn (two-step only).
        #[clap(long)]
        opening: Option<String>,
        /// Size of the rayon thread pool; defaults to the rayon/platform default.
        #[clap(long)]
        workers: Option<usize>,
    },
}

fn load_matrix(path: &Option<PathBuf>) -> Result<Matrix, WordleError> {
    match path {
        Some(p) => Matrix::load(p),
        None => Ok(Matrix::build(
            &dictionary::default_solutions(),
            &dictionary::default_guesses(),
            None,
        )),
    }
}

fn parse_opening(opening: &Option<String>) -> Result<Option<Word>, WordleError> {
    opening.as_deref().map(Word::parse).transpose()
}

fn make_player(
    strategy: &str,
    matrix: Arc<Matrix>,
    opening: Option<Word>,
) -> Result<Box<dyn Player>, WordleError> {
    match strategy {
        "greedy" => Ok(Box::new(Greedy::new(matrix))),
        "two-step" => Ok(Box::new(TwoStep::with_opening(matrix, opening))),
        other => Err(WordleError::BadWord {
            word: other.to_string(),
            reason: "unknown strategy; expected 'greedy' or 'two-step'",
        }),
    }
}

fn run() -> Result<(), WordleError> {
    let cli = Cli::parse();
    match cli.command {
        Command::BuildMatrix {
            solutions,
            guesses,
            out,
        } => {
            let solutions = match solutions {
                Some(p) => dictionary::load_words(p)?,
                None => dictionary::default_solutions(),
            };
            let guesses = match guesses {
                Some(p) => dictionary::load_words(p)?,
                None => dictionary::default_guesses(),
            };
            log::info!("building {}x{} matrix", solutions.len(), guesses.len());
            let matrix = Matrix::build(&solutions, &guesses, None);
            matrix.save(&out)?;
            log::info!("wrote matrix to {}", out.display());
            Ok(())
        }
        Command::Play {
            solution,
            matrix,
            strategy,
            opening,
        } => {
            let matrix = Arc::new(load_matrix(&matrix)?);
            let solution_word = Word::parse(&solution)?;
            let opening = parse_opening(&opening)?;
            let mut game = Game::new(solution_word);
            let mut player = make_player(&strategy, matrix, opening)?;
            while !game.is_over() {
                let guess = player.next_guess();
                let pattern = game.record_guess(guess)?;
                let code = pattern::encode(&pattern);
                println!("{} -> {:?}", guess, pattern);
                player.observe(guess, code)?;
            }
            log::info!(
                "{} '{solution_word}' in {} guesses (score {})",
                if game.solved() { "solved" } else { "failed to solve" },
                game.guesses_made(),
                game.score()
            );
            println!(
                "{} in {} guesses (score {})",
                if game.solved() { "solved" } else { "failed" },
                game.guesses_made(),
                game.score()
            );
            Ok(())
        }
        Command::Eval {
            matrix,
            strategy,
            targets,
            opening,
            workers,
        } => {
            use rayon::prelude::*;

            let matrix = Arc::new(load_matrix(&matrix)?);
            let opening = parse_opening(&opening)?;
            let eval_targets = match targets {
                Some(p) => dictionary::load_words(p)?,
                None => matrix.solutions().to_vec(),
            };

            let play_one = |target: Word| -> Result<(String, i64), WordleError> {
                let mut game = Game::new(target);
                let mut p = make_player(&strategy, matrix.clone(), opening)?;
                while !game.is_over() {
                    let guess = p.next_guess();
                    let pattern = game.record_guess(guess)?;
                    p.observe(guess, pattern::encode(&pattern))?;
                }
                Ok((target.to_string(), game.score()))
            };

            let run_eval =
                || -> Result<Vec<(String, i64)>, WordleError> { eval_targets.into_par_iter().map(play_one).collect() };
            let results = match workers {
                Some(n) => {
                    let pool = rayon::ThreadPoolBuilder::new()
                        .num_threads(n)
                        .build()
                        .map_err(|_| WordleError::CorruptMatrix {
                            reason: "could not start the requested worker thread pool",
                        })?;
                    pool.install(run_eval)?
                }
                None => run_eval()?,
            };

            log::info!("evaluated {} targets with '{}'", results.len(), strategy);
            let scores: serde_json::Map<String, serde_json::Value> = results
                .into_iter()
                .map(|(target, score)| (target, serde_json::json!(score)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&scores).unwrap());
            Ok(())
        }
    }
}

/// 0 success, 1 input error, 2 internal inconsistency.
fn exit_code_for(err: &WordleError) -> u8 {
    match err {
        WordleError::BadWord { .. } | WordleError::UnknownGuess { .. } | WordleError::GameOver => 1,
        WordleError::EmptyPosterior | WordleError::CorruptMatrix { .. } => 2,
    }
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(exit_code_for(&e))
        }
    }
}
