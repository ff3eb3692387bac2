use super::*;

pub type ContractResult<A> = Result<A, CustomContractError>;

/// Key addressing one record in the shared ledger namespace. Cars and bids
/// share this namespace; nothing but convention separates their keys.
pub type LedgerKey = String;
