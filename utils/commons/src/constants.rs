/// Tag for the Seeded event.
pub const SEEDED_TAG: u8 = u8::MAX - 1;

/// Tag for the CarCreated event.
pub const CAR_CREATED_TAG: u8 = u8::MAX - 2;

/// Tag for the AuctionStarted event.
pub const AUCTION_STARTED_TAG: u8 = u8::MAX - 3;

/// Tag for the AuctionClosed event.
pub const AUCTION_CLOSED_TAG: u8 = u8::MAX - 4;

/// Tag for the AuctionVerified event.
pub const AUCTION_VERIFIED_TAG: u8 = u8::MAX - 5;

/// Tag for the BidCreated event.
pub const BID_CREATED_TAG: u8 = u8::MAX - 6;
