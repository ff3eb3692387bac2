use commons::{ContractResult, CustomContractError, LedgerKey};
use concordium_std::*;

use crate::external::{BidQueryResult, CarQueryResult};

/// Lifecycle state of a car.
#[derive(Debug, Serialize, SchemaType, Eq, PartialEq, Clone, Copy)]
pub enum CarState {
    /// Registered, auction not yet started.
    Reservation,
    /// Auction is open and taking bids.
    ForSale,
    /// Auction is closed, pending or past settlement.
    Sold,
}

/// A vehicle under auction.
#[derive(Debug, Serialize, SchemaType, Eq, PartialEq, Clone)]
pub struct Car {
    pub id: String,
    pub model: String,
    pub colour: String,
    pub state: CarState,
    /// Current owner. Replaced by the winning bidder on settlement.
    pub owner: String,
}

/// A single offer on a car. Immutable once recorded.
#[derive(Debug, Serialize, SchemaType, Eq, PartialEq, Clone)]
pub struct Bid {
    pub id: String,
    pub price: u64,
    /// The bidder.
    pub owner: String,
    /// Ledger key of the car this bid is for.
    pub car: LedgerKey,
}

/// A ledger record. The discriminant is the type tag keeping cars and bids
/// apart in the shared key namespace.
#[derive(Serialize)]
pub enum Record {
    Car(Car),
    Bid(Bid),
}

impl Record {
    fn car(&self) -> Option<&Car> {
        match self {
            Self::Car(car) => Some(car),
            _ => None,
        }
    }

    fn bid(&self) -> Option<&Bid> {
        match self {
            Self::Bid(bid) => Some(bid),
            _ => None,
        }
    }
}

/// Bid resolved as the highest for a car during settlement.
#[must_use]
pub struct WinningBid {
    pub owner: String,
    pub price: u64,
}

/// The contract state.
#[derive(Serial, DeserialWithState)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// All cars and bids, in one flat key namespace.
    pub records: StateMap<LedgerKey, Record, S>,
}

impl<S: HasStateApi> State<S> {
    /// Create a new state with an empty ledger.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        State {
            records: state_builder.new_map(),
        }
    }

    /// Write a car under `key`, replacing whatever record was there before.
    pub fn put_car(&mut self, key: LedgerKey, car: Car) {
        self.records.insert(key, Record::Car(car));
    }

    /// Write a bid under `key` without validating it. Used for seeding.
    pub fn put_bid(&mut self, key: LedgerKey, bid: Bid) {
        self.records.insert(key, Record::Bid(bid));
    }

    /// Read the car stored under `key`.
    pub fn get_car(&self, key: &LedgerKey) -> ContractResult<Car> {
        let record = self
            .records
            .get(key)
            .ok_or_else(|| CustomContractError::NotFound)?;
        record
            .car()
            .cloned()
            .ok_or_else(|| CustomContractError::WrongRecordType)
    }

    /// Read the bid stored under `key`.
    pub fn get_bid(&self, key: &LedgerKey) -> ContractResult<Bid> {
        let record = self
            .records
            .get(key)
            .ok_or_else(|| CustomContractError::NotFound)?;
        record
            .bid()
            .cloned()
            .ok_or_else(|| CustomContractError::WrongRecordType)
    }

    /// Open the auction for the car under `key`, moving it from reservation
    /// to for sale. Only the recorded owner may do this.
    pub fn start_auction(&mut self, key: &LedgerKey, user: &String) -> ContractResult<()> {
        let mut car = self.get_car(key)?;
        ensure_eq!(&car.owner, user, CustomContractError::Unauthorized);
        ensure!(
            car.state == CarState::Reservation,
            CustomContractError::AuctionAlreadyStarted
        );
        car.state = CarState::ForSale;
        self.put_car(key.clone(), car);
        Ok(())
    }

    /// Close the auction for the car under `key`, moving it from for sale
    /// to sold. Only the recorded owner may do this.
    pub fn close_auction(&mut self, key: &LedgerKey, user: &String) -> ContractResult<()> {
        let mut car = self.get_car(key)?;
        ensure_eq!(&car.owner, user, CustomContractError::Unauthorized);
        match car.state {
            CarState::Reservation => bail!(CustomContractError::AuctionNotStarted),
            CarState::ForSale => (),
            CarState::Sold => bail!(CustomContractError::AuctionAlreadyClosed),
        }
        car.state = CarState::Sold;
        self.put_car(key.clone(), car);
        Ok(())
    }

    /// Settle the closed auction for the car under `key`: resolve the
    /// highest bid and hand ownership to that bidder. Only the recorded
    /// owner may do this. Nothing is written when settlement fails.
    pub fn verify_auction(&mut self, key: &LedgerKey, user: &String) -> ContractResult<WinningBid> {
        let mut car = self.get_car(key)?;
        ensure_eq!(&car.owner, user, CustomContractError::Unauthorized);
        match car.state {
            CarState::Reservation => bail!(CustomContractError::AuctionNotStarted),
            CarState::ForSale => bail!(CustomContractError::AuctionNotClosed),
            CarState::Sold => (),
        }
        let winning = self.winning_bid(key)?;
        car.owner = winning.owner.clone();
        self.put_car(key.clone(), car);
        Ok(winning)
    }

    /// Record a validated bid under `key`. The bid must target a car that
    /// is up for sale, and the bidder must not be the car's owner.
    pub fn create_bid(&mut self, key: LedgerKey, bid: Bid) -> ContractResult<()> {
        let car = self.get_car(&bid.car)?;
        // Owner is not allowed to bid on their own car
        ensure_ne!(bid.owner, car.owner, CustomContractError::OwnerForbidden);
        match car.state {
            CarState::Reservation => bail!(CustomContractError::AuctionNotStarted),
            CarState::ForSale => (),
            CarState::Sold => bail!(CustomContractError::AuctionAlreadyClosed),
        }
        self.put_bid(key, bid);
        Ok(())
    }

    /// All cars in the ledger, in ledger key order. Bids sharing the
    /// namespace are skipped by their type tag.
    pub fn cars(&self) -> Vec<CarQueryResult> {
        let mut cars = Vec::new();
        for (key, record) in self.records.iter() {
            if let Some(car) = record.car() {
                cars.push(CarQueryResult {
                    key: (*key).clone(),
                    record: car.clone(),
                });
            }
        }
        cars
    }

    /// All bids placed on the car under `car_number`, in ledger key order.
    pub fn bids_for_car(&self, car_number: &LedgerKey) -> Vec<BidQueryResult> {
        let mut bids = Vec::new();
        for (key, record) in self.records.iter() {
            if let Some(bid) = record.bid() {
                if &bid.car == car_number {
                    bids.push(BidQueryResult {
                        key: (*key).clone(),
                        record: bid.clone(),
                    });
                }
            }
        }
        bids
    }

    /// Resolve the highest bid placed on the car under `car_number`. The
    /// earliest of several equally priced bids wins. Settling a car that
    /// has no bids is an error, not a trap.
    fn winning_bid(&self, car_number: &LedgerKey) -> ContractResult<WinningBid> {
        let bids = self.bids_for_car(car_number);
        let mut winning = match bids.first() {
            Some(bid) => bid,
            None => bail!(CustomContractError::NoBids),
        };
        for entry in bids.iter().skip(1) {
            if entry.record.price > winning.record.price {
                winning = entry;
            }
        }
        Ok(WinningBid {
            owner: winning.record.owner.clone(),
            price: winning.record.price,
        })
    }
}
