use super::*;

// Ledger reads and writes themselves have no error slot here: the host state
// API is total, and a storage level fault traps the invocation before the
// contract observes it.

/// The custom errors the contract can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// No record is stored under the requested ledger key (Error code: -4).
    NotFound,
    /// The record under the requested ledger key is of the other kind
    /// (Error code: -5).
    WrongRecordType,
    /// Caller is not the recorded owner of the car (Error code: -6)
    Unauthorized,
    /// The auction for this car has not been started (Error code: -7)
    AuctionNotStarted,
    /// The auction for this car has already been started (Error code: -8).
    AuctionAlreadyStarted,
    /// The auction for this car has already been closed (Error code: -9).
    AuctionAlreadyClosed,
    /// The auction for this car has not been closed yet (Error code: -10).
    AuctionNotClosed,
    /// Owner is not allowed to bid on their own car (Error code: -11)
    OwnerForbidden,
    /// Settlement attempted while the car has no bids (Error code: -12).
    NoBids,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}
