use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("coordinates outside the board")]
    OutOfBounds,
    #[error("invalid board configuration")]
    InvalidConfiguration,
}

pub type Result<T> = core::result::Result<T, GameError>;
