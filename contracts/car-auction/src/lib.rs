//! A car auction smart contract keeping its records in one shared ledger
//! namespace.
//!
//! # Description
//! Cars and bids are stored side by side under caller chosen ledger keys,
//! each record carrying a type tag so the two kinds never get confused.
//! A car moves through a three step lifecycle driven by its recorded owner:
//! it is registered in reservation, opened for sale, closed, and finally
//! settled. While a car is for sale anyone but its owner may place bids on
//! it. Settlement resolves the highest bid, earliest first on equal prices,
//! and hands the car to that bidder.
//!
//! The ledger can be populated with a fixed demonstration data set through
//! the `initLedger` function, or grown record by record through `createCar`
//! and `createBid`.

#![cfg_attr(not(feature = "std"), no_std)]

mod contract;
mod events;
mod external;
mod state;
