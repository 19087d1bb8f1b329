use thiserror::Error;

/// Fatal engine errors. Any of these stops the current hand; the caller
/// decides whether the session of hands continues.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("A table needs at least 2 players, got {0}")]
    NotEnoughPlayers(usize),
    #[error("Player name {0:?} is seated more than once")]
    DuplicatePlayer(String),
    #[error("No action requester registered for player {0:?}")]
    MissingRequester(String),
    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),
    #[error("Failed to parse engine config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("{total} chips exceed what a single stack can hold ({max})", max = u32::MAX)]
    TooManyChips { total: u64 },
    #[error("Seat {0} does not exist at the table")]
    InvalidSeat(usize),
    #[error("Player {name} is out of chips")]
    OutOfChips { name: String },
    #[error("Player {name} has {stack} chips, less than the {blind} blind")]
    InsufficientBlind { name: String, stack: u32, blind: u32 },
    #[error("Player {name} cannot commit {amount} chips from a stack of {stack}")]
    InsufficientChips { name: String, amount: u32, stack: u32 },
    #[error("Chips not conserved: pot + stacks = {actual}, table total = {expected}")]
    ChipsNotConserved { expected: u64, actual: u64 },
    #[error("Pot holds {pot} chips but players contributed {contributed}")]
    PotMismatch { pot: u64, contributed: u64 },
    #[error("Player {name} made no valid action in {attempts} attempts")]
    NoDecision { name: String, attempts: u32 },
    #[error("Deck exhausted")]
    DeckExhausted,
    #[error("Player {0} already holds two hole cards")]
    HoleCardsFull(String),
    #[error("Failed to write hand record: {0}")]
    Io(#[from] std::io::Error),
}

/// A requested action that does not fit the current betting situation.
/// The engine discards it and asks the same seat again.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("Raise to {target} does not exceed the current bet, minimum: {minimum}")]
    RaiseTooSmall { target: u32, minimum: u32 },
}
