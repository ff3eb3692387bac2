use commons::{ContractResult, LedgerKey};
use concordium_std::*;

use crate::events::AuctionEvents;
use crate::external::*;
use crate::state::{Bid, Car, CarState, State};

/// Cars written by `initLedger`, keyed `CAR0` through `CAR7`.
const SEED_CARS: [(&str, &str, &str, &str, CarState, &str); 8] = [
    ("CAR0", "1", "Toyota", "blue", CarState::Sold, "Ariel"),
    ("CAR1", "2", "Ford", "red", CarState::ForSale, "Luis"),
    ("CAR2", "3", "Hyundai", "green", CarState::Sold, "Nadia"),
    ("CAR3", "4", "Volkswagen", "yellow", CarState::Reservation, "Amalia"),
    ("CAR4", "5", "Tesla", "black", CarState::Reservation, "Luis"),
    ("CAR5", "6", "Peugeot", "purple", CarState::Sold, "Gabriela"),
    ("CAR6", "7", "Chery", "white", CarState::ForSale, "Amalia"),
    ("CAR7", "8", "Fiat", "violet", CarState::ForSale, "Labourdette"),
];

/// Bids written by `initLedger`, keyed `BID0` through `BID20`. The `car`
/// column carries the values of the historical data set, which reference
/// car identifiers rather than ledger keys, so none of them resolve to the
/// seeded cars during settlement.
const SEED_BIDS: [(&str, &str, u64, &str, &str); 21] = [
    ("BID0", "1", 1500, "Lena", "1"),
    ("BID1", "2", 1600, "karla", "2"),
    ("BID2", "3", 2000, "Hugo", "1"),
    ("BID3", "4", 2100, "Nadia", "3"),
    ("BID4", "5", 3000, "Amalia", "1"),
    ("BID5", "6", 1000, "Hector", "3"),
    ("BID6", "7", 4500, "Ariel", "1"),
    ("BID7", "8", 600, "Bonifacio", "3"),
    ("BID8", "9", 5000, "SeoYong", "8"),
    ("BID9", "10", 3200, "Luffy", "1"),
    ("BID10", "11", 20, "Labourdette", "3"),
    ("BID11", "12", 1020, "Luis", "7"),
    ("BID12", "13", 1040, "Nadia", "2"),
    ("BID13", "14", 7000, "Gabriela", "8"),
    ("BID14", "15", 5200, "Ariel", "2"),
    ("BID15", "16", 4300, "Amalia", "8"),
    ("BID16", "17", 6000, "Mickey", "7"),
    ("BID17", "18", 2000, "Minnie", "8"),
    ("BID18", "19", 100, "Labourdette", "7"),
    ("BID19", "20", 2200, "Roly", "6"),
    ("BID20", "21", 2700, "Gabriela", "6"),
];

/// Initialize the contract instance with an empty ledger.
#[init(contract = "CarAuction")]
fn init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// Function to populate the ledger with the fixed demonstration data set.
///
/// Seeding is not idempotent in effect: calling it again rewrites every
/// seed key, so changes made to those records since the previous call are
/// lost.
///
/// It rejects if:
/// - Fails to log `Seeded` event.
#[receive(mutable, contract = "CarAuction", name = "initLedger", enable_logger)]
fn init_ledger<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let state = host.state_mut();

    for (key, id, model, colour, car_state, owner) in SEED_CARS.iter() {
        state.put_car(
            String::from(*key),
            Car {
                id: String::from(*id),
                model: String::from(*model),
                colour: String::from(*colour),
                state: *car_state,
                owner: String::from(*owner),
            },
        );
    }

    for (key, id, price, owner, car) in SEED_BIDS.iter() {
        state.put_bid(
            String::from(*key),
            Bid {
                id: String::from(*id),
                price: *price,
                owner: String::from(*owner),
                car: String::from(*car),
            },
        );
    }

    logger.log(&AuctionEvents::seeded(
        SEED_CARS.len() as u8,
        SEED_BIDS.len() as u8,
    ))?;

    Ok(())
}

/// Function to read the car stored under a ledger key.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No record is stored under the key;
/// - The record under the key is a bid.
#[receive(
    contract = "CarAuction",
    name = "queryCar",
    parameter = "LedgerKey",
    return_value = "Car"
)]
fn query_car<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Car> {
    let key = LedgerKey::deserial(&mut ctx.parameter_cursor())?;
    host.state().get_car(&key)
}

/// Function to list every car in the ledger, in ledger key order.
#[receive(
    contract = "CarAuction",
    name = "queryAllCars",
    return_value = "Vec<CarQueryResult>"
)]
fn query_all_cars<S: HasStateApi>(
    _ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<CarQueryResult>> {
    Ok(host.state().cars())
}

/// Function to register a new car. The car starts in reservation state,
/// whatever state the parameter may claim. Writing over an existing record
/// is allowed.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Fails to log `CarCreated` event.
#[receive(
    mutable,
    contract = "CarAuction",
    name = "createCar",
    parameter = "CreateCarParams",
    enable_logger
)]
fn create_car<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = CreateCarParams::deserial(&mut ctx.parameter_cursor())?;

    logger.log(&AuctionEvents::car_created(
        &params.key,
        &params.id,
        &params.owner,
    ))?;

    host.state_mut().put_car(
        params.key.clone(),
        Car {
            id: params.id,
            model: params.model,
            colour: params.colour,
            state: CarState::Reservation,
            owner: params.owner,
        },
    );

    Ok(())
}

/// Function to open the auction for a car, taking it from reservation to
/// for sale.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No car is stored under the key;
/// - `user` is not the recorded owner of the car;
/// - The auction has already been started;
/// - Fails to log `AuctionStarted` event.
#[receive(
    mutable,
    contract = "CarAuction",
    name = "startAuction",
    parameter = "LifecycleParams",
    enable_logger
)]
fn start_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = LifecycleParams::deserial(&mut ctx.parameter_cursor())?;

    host.state_mut().start_auction(&params.key, &params.user)?;

    logger.log(&AuctionEvents::auction_started(&params.key, &params.user))?;

    Ok(())
}

/// Function to close the auction for a car, taking it from for sale to
/// sold. Bids placed on the car stay in the ledger and become the input of
/// settlement.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No car is stored under the key;
/// - `user` is not the recorded owner of the car;
/// - The auction has not been started, or has already been closed;
/// - Fails to log `AuctionClosed` event.
#[receive(
    mutable,
    contract = "CarAuction",
    name = "closeAuction",
    parameter = "LifecycleParams",
    enable_logger
)]
fn close_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = LifecycleParams::deserial(&mut ctx.parameter_cursor())?;

    host.state_mut().close_auction(&params.key, &params.user)?;

    logger.log(&AuctionEvents::auction_closed(&params.key, &params.user))?;

    Ok(())
}

/// Function to settle a closed auction. The highest bid placed on the car
/// wins, the earliest of equally priced bids first, and the car's recorded
/// owner is replaced with the winning bidder.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No car is stored under the key;
/// - `user` is not the recorded owner of the car;
/// - The auction has not been started, or has not been closed yet;
/// - No bids were placed on the car;
/// - Fails to log `AuctionVerified` event.
#[receive(
    mutable,
    contract = "CarAuction",
    name = "verifyAuction",
    parameter = "LifecycleParams",
    enable_logger
)]
fn verify_auction<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = LifecycleParams::deserial(&mut ctx.parameter_cursor())?;

    let winning = host.state_mut().verify_auction(&params.key, &params.user)?;

    logger.log(&AuctionEvents::auction_verified(
        &params.key,
        &winning.owner,
        winning.price,
    ))?;

    Ok(())
}

/// Function to place a bid on a car that is up for sale. The bidder is
/// named in the parameter and must not be the car's owner.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - Fails to log `BidCreated` event;
/// - No car is stored under the key the bid is for;
/// - The bidder is the car's owner;
/// - The auction has not been started, or has already been closed.
#[receive(
    mutable,
    contract = "CarAuction",
    name = "createBid",
    parameter = "CreateBidParams",
    enable_logger
)]
fn create_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params = CreateBidParams::deserial(&mut ctx.parameter_cursor())?;

    logger.log(&AuctionEvents::bid_created(
        &params.key,
        &params.car,
        &params.owner,
        params.price,
    ))?;

    host.state_mut().create_bid(
        params.key.clone(),
        Bid {
            id: params.id,
            price: params.price,
            owner: params.owner,
            car: params.car,
        },
    )?;

    Ok(())
}

/// Function to read the bid stored under a ledger key.
///
/// It rejects if:
/// - Fails to parse parameter;
/// - No record is stored under the key;
/// - The record under the key is a car.
#[receive(
    contract = "CarAuction",
    name = "queryBid",
    parameter = "LedgerKey",
    return_value = "Bid"
)]
fn query_bid<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Bid> {
    let key = LedgerKey::deserial(&mut ctx.parameter_cursor())?;
    host.state().get_bid(&key)
}

/// Function to list every bid placed on one car, in ledger key order.
///
/// It rejects if:
/// - Fails to parse parameter.
#[receive(
    contract = "CarAuction",
    name = "queryAllBidsForCarNumber",
    parameter = "LedgerKey",
    return_value = "Vec<BidQueryResult>"
)]
fn query_all_bids_for_car_number<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<BidQueryResult>> {
    let car_number = LedgerKey::deserial(&mut ctx.parameter_cursor())?;
    Ok(host.state().bids_for_car(&car_number))
}

#[concordium_cfg_test]
mod tests {
    use core::fmt::Debug;

    use commons::CustomContractError;

    use super::*;
    use test_infrastructure::*;

    fn expect_error<E, T>(expr: Result<T, E>, err: E, msg: &str)
    where
        E: Eq + Debug,
        T: Debug,
    {
        let actual = expr.expect_err(msg);
        assert_eq!(actual, err);
    }

    fn parametrized_ctx<'a>(parameter_bytes: &'a [u8]) -> TestReceiveContext<'a> {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_parameter(parameter_bytes);
        ctx
    }

    fn empty_host() -> TestHost<State<TestStateApi>> {
        let mut state_builder = TestStateBuilder::new();
        let state = State::empty(&mut state_builder);
        TestHost::new(state, state_builder)
    }

    fn seeded_host() -> TestHost<State<TestStateApi>> {
        let mut host = empty_host();
        let mut logger = TestLogger::init();
        let ctx = TestReceiveContext::empty();
        init_ledger(&ctx, &mut host, &mut logger)
            .expect_report("Seeding the ledger should succeed");
        host
    }

    fn make_car(
        host: &mut TestHost<State<TestStateApi>>,
        key: &str,
        id: &str,
        model: &str,
        colour: &str,
        owner: &str,
    ) {
        let bytes = to_bytes(&CreateCarParams {
            key: key.into(),
            id: id.into(),
            model: model.into(),
            colour: colour.into(),
            owner: owner.into(),
        });
        let ctx = parametrized_ctx(&bytes);
        let mut logger = TestLogger::init();
        create_car(&ctx, host, &mut logger).expect_report("Creating a car should succeed");
    }

    fn start(
        host: &mut TestHost<State<TestStateApi>>,
        key: &str,
        user: &str,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&LifecycleParams {
            key: key.into(),
            user: user.into(),
        });
        let ctx = parametrized_ctx(&bytes);
        let mut logger = TestLogger::init();
        start_auction(&ctx, host, &mut logger)
    }

    fn close(
        host: &mut TestHost<State<TestStateApi>>,
        key: &str,
        user: &str,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&LifecycleParams {
            key: key.into(),
            user: user.into(),
        });
        let ctx = parametrized_ctx(&bytes);
        let mut logger = TestLogger::init();
        close_auction(&ctx, host, &mut logger)
    }

    fn verify(
        host: &mut TestHost<State<TestStateApi>>,
        key: &str,
        user: &str,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&LifecycleParams {
            key: key.into(),
            user: user.into(),
        });
        let ctx = parametrized_ctx(&bytes);
        let mut logger = TestLogger::init();
        verify_auction(&ctx, host, &mut logger)
    }

    fn place_bid(
        host: &mut TestHost<State<TestStateApi>>,
        key: &str,
        id: &str,
        price: u64,
        owner: &str,
        car: &str,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&CreateBidParams {
            key: key.into(),
            id: id.into(),
            price,
            owner: owner.into(),
            car: car.into(),
        });
        let ctx = parametrized_ctx(&bytes);
        let mut logger = TestLogger::init();
        create_bid(&ctx, host, &mut logger)
    }

    fn car_at(host: &TestHost<State<TestStateApi>>, key: &str) -> ContractResult<Car> {
        let bytes = to_bytes(&String::from(key));
        let ctx = parametrized_ctx(&bytes);
        query_car(&ctx, host)
    }

    fn bid_at(host: &TestHost<State<TestStateApi>>, key: &str) -> ContractResult<Bid> {
        let bytes = to_bytes(&String::from(key));
        let ctx = parametrized_ctx(&bytes);
        query_bid(&ctx, host)
    }

    fn all_cars(host: &TestHost<State<TestStateApi>>) -> Vec<CarQueryResult> {
        let ctx = TestReceiveContext::empty();
        query_all_cars(&ctx, host).expect_report("Listing cars should succeed")
    }

    fn bids_for(host: &TestHost<State<TestStateApi>>, car: &str) -> Vec<BidQueryResult> {
        let bytes = to_bytes(&String::from(car));
        let ctx = parametrized_ctx(&bytes);
        query_all_bids_for_car_number(&ctx, host).expect_report("Listing bids should succeed")
    }

    #[concordium_test]
    /// Test that initialization produces an empty ledger.
    fn test_init() {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();

        let state = init(&ctx, &mut state_builder).expect_report("Initialization should succeed");

        claim!(state.cars().is_empty(), "Ledger should start out empty");
    }

    #[concordium_test]
    /// Test that seeding writes the demonstration data set and that single
    /// records can be read back by key.
    fn test_init_ledger() {
        let host = seeded_host();

        let car = car_at(&host, "CAR0").expect_report("CAR0 should be stored");
        claim_eq!(car.id, "1");
        claim_eq!(car.model, "Toyota");
        claim_eq!(car.colour, "blue");
        claim_eq!(car.state, CarState::Sold);
        claim_eq!(car.owner, "Ariel");

        let bid = bid_at(&host, "BID0").expect_report("BID0 should be stored");
        claim_eq!(bid.id, "1");
        claim_eq!(bid.price, 1500);
        claim_eq!(bid.owner, "Lena");
        claim_eq!(bid.car, "1");
    }

    #[concordium_test]
    /// Test that seeding again rewrites the seed keys, dropping changes
    /// made to those records in between.
    fn test_reseed_overwrites_changes() {
        let mut host = seeded_host();

        start(&mut host, "CAR3", "Amalia").expect_report("Starting CAR3 should succeed");
        let car = car_at(&host, "CAR3").expect_report("CAR3 should be stored");
        claim_eq!(car.state, CarState::ForSale);

        let mut logger = TestLogger::init();
        let ctx = TestReceiveContext::empty();
        init_ledger(&ctx, &mut host, &mut logger).expect_report("Reseeding should succeed");

        let car = car_at(&host, "CAR3").expect_report("CAR3 should be stored");
        claim_eq!(
            car.state,
            CarState::Reservation,
            "Reseeding should restore the seed state"
        );
    }

    #[concordium_test]
    /// Test that listing cars returns all of them in key order and skips
    /// the bids sharing the namespace.
    fn test_query_all_cars() {
        let host = seeded_host();

        let cars = all_cars(&host);

        claim_eq!(cars.len(), 8, "The seed set holds eight cars");
        claim_eq!(cars[0].key, "CAR0");
        claim_eq!(cars[0].record.model, "Toyota");
        claim_eq!(cars[7].key, "CAR7");
        claim_eq!(cars[7].record.model, "Fiat");
    }

    #[concordium_test]
    /// Test that listing bids for a car returns exactly the bids on that
    /// car, in key order.
    fn test_query_all_bids_for_car_number() {
        let host = seeded_host();

        let bids = bids_for(&host, "1");

        claim_eq!(bids.len(), 5, "Five seed bids target car 1");
        claim_eq!(bids[0].key, "BID0");
        claim_eq!(bids[0].record.owner, "Lena");
        claim_eq!(bids[1].key, "BID2");
        claim_eq!(bids[2].key, "BID4");
        claim_eq!(bids[3].key, "BID6");
        claim_eq!(bids[3].record.price, 4500);
        claim_eq!(bids[4].key, "BID9");
        claim_eq!(bids[4].record.owner, "Luffy");

        claim!(
            bids_for(&host, "no-such-car").is_empty(),
            "A car without bids should list none"
        );
    }

    #[concordium_test]
    /// Test that reads reject missing keys and keys holding the other
    /// record kind.
    fn test_query_rejections() {
        let host = seeded_host();

        expect_error(
            car_at(&host, "CAR99"),
            CustomContractError::NotFound,
            "Missing car key should be reported",
        );
        expect_error(
            bid_at(&host, "BID99"),
            CustomContractError::NotFound,
            "Missing bid key should be reported",
        );
        expect_error(
            car_at(&host, "BID0"),
            CustomContractError::WrongRecordType,
            "A bid must not read as a car",
        );
        expect_error(
            bid_at(&host, "CAR0"),
            CustomContractError::WrongRecordType,
            "A car must not read as a bid",
        );
    }

    #[concordium_test]
    /// Test that records survive a serialization round trip unchanged.
    fn test_record_roundtrip() {
        let car = Car {
            id: String::from("77"),
            model: String::from("Lada"),
            colour: String::from("Blue"),
            state: CarState::Reservation,
            owner: String::from("Rafael"),
        };
        let decoded = from_bytes::<Car>(&to_bytes(&car)).expect_report("Car should decode");
        claim_eq!(decoded, car, "Car should round trip unchanged");

        let bid = Bid {
            id: String::from("900"),
            price: 4500,
            owner: String::from("Ariel"),
            car: String::from("88"),
        };
        let decoded = from_bytes::<Bid>(&to_bytes(&bid)).expect_report("Bid should decode");
        claim_eq!(decoded, bid, "Bid should round trip unchanged");
    }

    #[concordium_test]
    /// Test that a created car is stored in reservation state under the
    /// chosen key, and that creating to the same key again overwrites.
    fn test_create_car() {
        let mut host = empty_host();

        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.id, "77");
        claim_eq!(car.model, "Lada");
        claim_eq!(car.colour, "Blue");
        claim_eq!(car.state, CarState::Reservation, "A new car is in reservation");
        claim_eq!(car.owner, "Rafael");

        make_car(&mut host, "88", "78", "Lada", "Green", "Rafael");
        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.colour, "Green", "The second write should win");
    }

    #[concordium_test]
    /// Test that the owner can open the auction for their car.
    fn test_start_auction() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");

        start(&mut host, "88", "Rafael").expect_report("The owner should be able to start");

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.state, CarState::ForSale);
        claim_eq!(car.owner, "Rafael", "Starting does not change the owner");
    }

    #[concordium_test]
    /// Test the rejection paths of opening an auction.
    fn test_start_auction_rejections() {
        let mut host = seeded_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");

        expect_error(
            start(&mut host, "ODB2", "Rafael"),
            CustomContractError::NotFound,
            "Starting a missing car should be reported",
        );
        expect_error(
            start(&mut host, "BID0", "Lena"),
            CustomContractError::WrongRecordType,
            "Starting a bid key should be reported",
        );
        expect_error(
            start(&mut host, "88", "Mallory"),
            CustomContractError::Unauthorized,
            "Only the owner may start",
        );

        start(&mut host, "88", "Rafael").expect_report("The owner should be able to start");
        expect_error(
            start(&mut host, "88", "Rafael"),
            CustomContractError::AuctionAlreadyStarted,
            "A second start should be reported",
        );

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.state, CarState::ForSale, "Rejected starts must not change state");
    }

    #[concordium_test]
    /// Test that the owner can close an open auction.
    fn test_close_auction() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");
        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");

        close(&mut host, "88", "Rafael").expect_report("The owner should be able to close");

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.state, CarState::Sold);
        claim_eq!(car.owner, "Rafael", "Closing does not change the owner");
    }

    #[concordium_test]
    /// Test the rejection paths of closing an auction.
    fn test_close_auction_rejections() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");

        expect_error(
            close(&mut host, "88", "Rafael"),
            CustomContractError::AuctionNotStarted,
            "Closing before starting should be reported",
        );

        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");
        expect_error(
            close(&mut host, "88", "Mallory"),
            CustomContractError::Unauthorized,
            "Only the owner may close",
        );

        close(&mut host, "88", "Rafael").expect_report("Closing should succeed");
        expect_error(
            close(&mut host, "88", "Rafael"),
            CustomContractError::AuctionAlreadyClosed,
            "A second close should be reported",
        );
    }

    #[concordium_test]
    /// Test that a bid on a car up for sale is recorded and readable.
    fn test_create_bid() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");
        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");

        place_bid(&mut host, "BID100", "500", 1000, "Nadia", "88")
            .expect_report("Bidding on a car for sale should succeed");

        let bid = bid_at(&host, "BID100").expect_report("The bid should be stored");
        claim_eq!(bid.id, "500");
        claim_eq!(bid.price, 1000);
        claim_eq!(bid.owner, "Nadia");
        claim_eq!(bid.car, "88");

        let bids = bids_for(&host, "88");
        claim_eq!(bids.len(), 1, "The new bid should be listed for the car");
    }

    #[concordium_test]
    /// Test the rejection paths of placing a bid.
    fn test_create_bid_rejections() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");

        expect_error(
            place_bid(&mut host, "BID100", "500", 1000, "Nadia", "ODB2"),
            CustomContractError::NotFound,
            "Bidding on a missing car should be reported",
        );
        expect_error(
            place_bid(&mut host, "BID100", "500", 1000, "Nadia", "88"),
            CustomContractError::AuctionNotStarted,
            "Bidding before the auction opens should be reported",
        );

        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");
        expect_error(
            place_bid(&mut host, "BID100", "500", 1000, "Rafael", "88"),
            CustomContractError::OwnerForbidden,
            "The owner must not bid on their own car",
        );

        close(&mut host, "88", "Rafael").expect_report("Closing should succeed");
        expect_error(
            place_bid(&mut host, "BID100", "500", 1000, "Nadia", "88"),
            CustomContractError::AuctionAlreadyClosed,
            "Bidding after the auction closed should be reported",
        );

        expect_error(
            bid_at(&host, "BID100"),
            CustomContractError::NotFound,
            "No rejected bid may end up in the ledger",
        );
    }

    #[concordium_test]
    /// Test the full auction lifecycle: the highest bid wins settlement and
    /// its bidder becomes the owner.
    fn test_verify_auction_picks_highest() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");
        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");

        place_bid(&mut host, "BID100", "1", 100, "Lena", "88").expect_report("Bid should succeed");
        place_bid(&mut host, "BID101", "2", 500, "Hugo", "88").expect_report("Bid should succeed");
        place_bid(&mut host, "BID102", "3", 300, "Nadia", "88").expect_report("Bid should succeed");

        close(&mut host, "88", "Rafael").expect_report("Closing should succeed");
        verify(&mut host, "88", "Rafael").expect_report("Settlement should succeed");

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.state, CarState::Sold, "A settled car stays sold");
        claim_eq!(car.owner, "Hugo", "The highest bidder should own the car");
    }

    #[concordium_test]
    /// Test that the earliest of equally priced highest bids wins.
    fn test_verify_auction_tie_first_wins() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");
        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");

        place_bid(&mut host, "BID100", "1", 500, "Lena", "88").expect_report("Bid should succeed");
        place_bid(&mut host, "BID101", "2", 500, "Hugo", "88").expect_report("Bid should succeed");
        place_bid(&mut host, "BID102", "3", 200, "Nadia", "88").expect_report("Bid should succeed");

        close(&mut host, "88", "Rafael").expect_report("Closing should succeed");
        verify(&mut host, "88", "Rafael").expect_report("Settlement should succeed");

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.owner, "Lena", "The earliest highest bid should win the tie");
    }

    #[concordium_test]
    /// Test that settling a car without bids is rejected and leaves the
    /// car untouched.
    fn test_verify_auction_no_bids() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");
        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");
        close(&mut host, "88", "Rafael").expect_report("Closing should succeed");

        expect_error(
            verify(&mut host, "88", "Rafael"),
            CustomContractError::NoBids,
            "Settling without bids should be reported",
        );

        let car = car_at(&host, "88").expect_report("The car should be stored");
        claim_eq!(car.state, CarState::Sold, "A failed settlement must not change state");
        claim_eq!(car.owner, "Rafael", "A failed settlement must not change the owner");
    }

    #[concordium_test]
    /// Test the rejection paths of settlement.
    fn test_verify_auction_rejections() {
        let mut host = empty_host();
        make_car(&mut host, "88", "77", "Lada", "Blue", "Rafael");

        expect_error(
            verify(&mut host, "88", "Rafael"),
            CustomContractError::AuctionNotStarted,
            "Settling before starting should be reported",
        );

        start(&mut host, "88", "Rafael").expect_report("Starting should succeed");
        expect_error(
            verify(&mut host, "88", "Rafael"),
            CustomContractError::AuctionNotClosed,
            "Settling an open auction should be reported",
        );

        place_bid(&mut host, "BID100", "1", 100, "Lena", "88").expect_report("Bid should succeed");
        close(&mut host, "88", "Rafael").expect_report("Closing should succeed");
        expect_error(
            verify(&mut host, "88", "Mallory"),
            CustomContractError::Unauthorized,
            "Only the owner may settle",
        );
    }

    #[concordium_test]
    /// Test that seeded sold cars cannot be settled: the seed bids carry
    /// car identifiers in their `car` column, so no seeded car has bids
    /// under its ledger key.
    fn test_verify_seeded_car_without_bids() {
        let mut host = seeded_host();

        expect_error(
            verify(&mut host, "CAR2", "Nadia"),
            CustomContractError::NoBids,
            "A seeded car has no bids under its key",
        );
    }
}
