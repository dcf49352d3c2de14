use thiserror::Error;

/// Why the engine refused an intent.
///
/// Every variant maps to a stable message the server surfaces verbatim, so
/// wording changes here are wire-visible.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("not your turn")]
    NotYourTurn,
    #[error("an action is waiting on responses")]
    PendingActionInProgress,
    #[error("already played 3 cards this turn")]
    PlayBudgetExceeded,
    #[error("invalid card")]
    InvalidCard,
    #[error("invalid color")]
    InvalidColor,
    #[error("that set is not complete")]
    IncompleteSet,
    #[error("that set already has this improvement")]
    AlreadyImproved,
    #[error("place your received wildcards first")]
    MustPlaceWildcardsFirst,
    #[error("no action is waiting on responses")]
    NoPendingAction,
    #[error("not waiting on a response from you")]
    NotAwaitingResponse,
    #[error("selection does not cover the amount owed")]
    InsufficientOffering,
    #[error("invalid target")]
    InvalidTarget,
    #[error("match is full")]
    MatchFull,
    #[error("display seat is already taken")]
    DisplaySeatTaken,
    #[error("need at least 2 ready players")]
    NotEnoughPlayers,
    #[error("only the host can do that")]
    NotHost,
    #[error("game already started")]
    AlreadyStarted,
    #[error("game has not started")]
    NotStarted,
    #[error("game is over")]
    MatchOver,
    #[error("unknown player")]
    UnknownPlayer,
}
