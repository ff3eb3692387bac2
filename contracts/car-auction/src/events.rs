use commons::{
    LedgerKey, AUCTION_CLOSED_TAG, AUCTION_STARTED_TAG, AUCTION_VERIFIED_TAG, BID_CREATED_TAG,
    CAR_CREATED_TAG, SEEDED_TAG,
};
use concordium_std::*;

/// Ledger seeding event data.
#[derive(Debug, Serial)]
pub struct SeededEvent {
    /// Number of cars written.
    pub cars: u8,
    /// Number of bids written.
    pub bids: u8,
}

/// Car registration event data.
#[derive(Debug, Serial)]
pub struct CarCreatedEvent<'a> {
    /// Ledger key the car is stored under.
    pub key: &'a LedgerKey,
    /// Car identifier.
    pub id: &'a String,
    /// Initial owner of the car.
    pub owner: &'a String,
}

/// Auction opening event data.
#[derive(Debug, Serial)]
pub struct AuctionStartedEvent<'a> {
    /// Ledger key of the car.
    pub key: &'a LedgerKey,
    /// Owner who opened the auction.
    pub user: &'a String,
}

/// Auction closing event data.
#[derive(Debug, Serial)]
pub struct AuctionClosedEvent<'a> {
    /// Ledger key of the car.
    pub key: &'a LedgerKey,
    /// Owner who closed the auction.
    pub user: &'a String,
}

/// Settlement event data.
#[derive(Debug, Serial)]
pub struct AuctionVerifiedEvent<'a> {
    /// Ledger key of the car.
    pub key: &'a LedgerKey,
    /// The winning bidder, now owner of the car.
    pub winner: &'a String,
    /// The winning price.
    pub price: u64,
}

/// Bid placement event data.
#[derive(Debug, Serial)]
pub struct BidCreatedEvent<'a> {
    /// Ledger key the bid is stored under.
    pub key: &'a LedgerKey,
    /// Ledger key of the car the bid is for.
    pub car: &'a LedgerKey,
    /// The bidder.
    pub owner: &'a String,
    /// Offered price.
    pub price: u64,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug)]
pub enum AuctionEvents<'a> {
    Seeded(SeededEvent),
    CarCreated(CarCreatedEvent<'a>),
    AuctionStarted(AuctionStartedEvent<'a>),
    AuctionClosed(AuctionClosedEvent<'a>),
    AuctionVerified(AuctionVerifiedEvent<'a>),
    BidCreated(BidCreatedEvent<'a>),
}

impl<'a> AuctionEvents<'a> {
    pub fn seeded(cars: u8, bids: u8) -> Self {
        Self::Seeded(SeededEvent { cars, bids })
    }

    pub fn car_created(key: &'a LedgerKey, id: &'a String, owner: &'a String) -> Self {
        Self::CarCreated(CarCreatedEvent { key, id, owner })
    }

    pub fn auction_started(key: &'a LedgerKey, user: &'a String) -> Self {
        Self::AuctionStarted(AuctionStartedEvent { key, user })
    }

    pub fn auction_closed(key: &'a LedgerKey, user: &'a String) -> Self {
        Self::AuctionClosed(AuctionClosedEvent { key, user })
    }

    pub fn auction_verified(key: &'a LedgerKey, winner: &'a String, price: u64) -> Self {
        Self::AuctionVerified(AuctionVerifiedEvent { key, winner, price })
    }

    pub fn bid_created(
        key: &'a LedgerKey,
        car: &'a LedgerKey,
        owner: &'a String,
        price: u64,
    ) -> Self {
        Self::BidCreated(BidCreatedEvent {
            key,
            car,
            owner,
            price,
        })
    }
}

impl<'a> Serial for AuctionEvents<'a> {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            AuctionEvents::Seeded(event) => {
                out.write_u8(SEEDED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::CarCreated(event) => {
                out.write_u8(CAR_CREATED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::AuctionStarted(event) => {
                out.write_u8(AUCTION_STARTED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::AuctionClosed(event) => {
                out.write_u8(AUCTION_CLOSED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::AuctionVerified(event) => {
                out.write_u8(AUCTION_VERIFIED_TAG)?;
                event.serial(out)
            }
            AuctionEvents::BidCreated(event) => {
                out.write_u8(BID_CREATED_TAG)?;
                event.serial(out)
            }
        }
    }
}
