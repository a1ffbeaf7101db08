use thiserror::Error;

/// The five documented failure modes of the solver core.
///
/// `BadWord`, `UnknownGuess`, and `GameOver` are reported to the caller — the
/// judge and players never try to recover from them locally. `EmptyPosterior`
/// and `CorruptMatrix` are fatal to the current game or session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordleError {
    #[error("bad word '{word}': {reason}")]
    BadWord { word: String, reason: &'static str },

    #[error("guess attempted after the game is already over")]
    GameOver,

    #[error("filter removed every surviving solution: the observed feedback is inconsistent")]
    EmptyPosterior,

    #[error("'{word}' is not in the allowed-guess vocabulary")]
    UnknownGuess { word: String },

    #[error("corrupt matrix blob: {reason}")]
    CorruptMatrix { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, WordleError>;
