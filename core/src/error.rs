use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Color slot outside the palette")]
    InvalidColorSlot,
}

pub type Result<T> = core::result::Result<T, GameError>;
