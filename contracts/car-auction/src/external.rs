use commons::LedgerKey;
use concordium_std::*;

use crate::state::{Bid, Car};

/// Parameter for the `createCar` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct CreateCarParams {
    /// Ledger key to store the car under.
    pub key: LedgerKey,
    pub id: String,
    pub model: String,
    pub colour: String,
    /// Initial owner of the car.
    pub owner: String,
}

/// Parameter for the `startAuction`, `closeAuction` and `verifyAuction`
/// functions.
#[derive(Debug, Serialize, SchemaType)]
pub struct LifecycleParams {
    /// Ledger key of the car.
    pub key: LedgerKey,
    /// Identity performing the operation. Must match the recorded owner of
    /// the car.
    pub user: String,
}

/// Parameter for the `createBid` function.
#[derive(Debug, Serialize, SchemaType)]
pub struct CreateBidParams {
    /// Ledger key to store the bid under.
    pub key: LedgerKey,
    pub id: String,
    pub price: u64,
    /// The bidder.
    pub owner: String,
    /// Ledger key of the car the bid is for.
    pub car: LedgerKey,
}

/// One entry of the `queryAllCars` response.
#[derive(Debug, Serialize, SchemaType, Eq, PartialEq)]
pub struct CarQueryResult {
    /// Ledger key the car is stored under.
    pub key: LedgerKey,
    pub record: Car,
}

/// One entry of the `queryAllBidsForCarNumber` response.
#[derive(Debug, Serialize, SchemaType, Eq, PartialEq)]
pub struct BidQueryResult {
    /// Ledger key the bid is stored under.
    pub key: LedgerKey,
    pub record: Bid,
}
