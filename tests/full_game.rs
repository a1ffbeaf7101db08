use std::sync::Arc;
use wordle_entropy::players::{Greedy, Player, TwoStep};
use wordle_entropy::{pattern, Game, Matrix, Word, WordleError};

fn w(s: &str) -> Word {
    Word::parse(s).unwrap()
}

fn fixture_matrix() -> Arc<Matrix> {
    let solutions = vec![
        w("crate"),
        w("trace"),
        w("slate"),
        w("board"),
        w("fusil"),
        w("treat"),
        w("tares"),
    ];
    let guesses = vec![
        w("crate"),
        w("trace"),
        w("slate"),
        w("board"),
        w("fusil"),
        w("treat"),
        w("tares"),
        w("treta"),
    ];
    Arc::new(Matrix::build(&solutions, &guesses, None))
}

fn play_to_completion(player: &mut dyn Player, solution: Word) -> Game {
    let mut game = Game::new(solution);
    while !game.is_over() {
        let guess = player.next_guess();
        let observed = game.record_guess(guess).expect("game accepts the guess");
        player
            .observe(guess, pattern::encode(&observed))
            .expect("posterior accepts the observed pattern");
    }
    game
}

#[test]
fn greedy_solves_every_fixture_word_within_six_guesses() {
    let matrix = fixture_matrix();
    for &solution in matrix.solutions() {
        let mut player = Greedy::new(matrix.clone());
        let game = play_to_completion(&mut player, solution);
        assert!(
            game.solved(),
            "greedy failed to solve '{solution}' in {} guesses",
            game.guesses_made()
        );
    }
}

#[test]
fn two_step_solves_every_fixture_word_within_six_guesses() {
    let matrix = fixture_matrix();
    for &solution in matrix.solutions() {
        let mut player = TwoStep::new(matrix.clone());
        let game = play_to_completion(&mut player, solution);
        assert!(
            game.solved(),
            "two-step failed to solve '{solution}' in {} guesses",
            game.guesses_made()
        );
    }
}

#[test]
fn game_rejects_a_guess_after_it_ends() {
    let matrix = fixture_matrix();
    let mut player = Greedy::new(matrix);
    let solution = w("crate");
    let mut game = Game::new(solution);
    while !game.is_over() {
        let guess = player.next_guess();
        let observed = game.record_guess(guess).unwrap();
        player.observe(guess, pattern::encode(&observed)).unwrap();
    }
    assert!(matches!(
        game.record_guess(w("slate")),
        Err(WordleError::GameOver)
    ));
}

#[test]
fn matrix_round_trips_and_still_drives_a_full_game_after_reload() {
    let matrix = fixture_matrix();
    let path = std::env::temp_dir().join("wordle_entropy_integration_matrix.bin");
    matrix.save(&path).unwrap();
    let reloaded = Arc::new(Matrix::load(&path).unwrap());
    std::fs::remove_file(&path).ok();

    let mut player = Greedy::new(reloaded);
    let game = play_to_completion(&mut player, w("tares"));
    assert!(game.solved());
}

#[test]
fn unknown_guess_is_rejected_by_the_matrix() {
    let matrix = fixture_matrix();
    assert!(matches!(
        matrix.guess_index(&w("zzzzz")),
        Err(WordleError::UnknownGuess { .. })
    ));
}
