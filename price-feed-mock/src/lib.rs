#![no_std]

multiversx_sc::imports!();

pub mod price_feed_mock_proxy;

/// Interface version reported by the mock aggregator.
const VERSION: u64 = 0;

pub const ERR_NO_DATA: &str = "No data present.";

/// Aggregator stand-in for local tests: the answer is whatever was last
/// pushed through `updateAnswer` or `updateRoundData`.
#[multiversx_sc::contract]
pub trait PriceFeedMock {
    #[init]
    fn init(&self, decimals: u8, initial_answer: BigUint) {
        self.decimals().set(decimals);
        self.update_answer(initial_answer);
    }

    #[upgrade]
    fn upgrade(&self) {}

    /// Starts a new round stamped with the current block timestamp.
    #[endpoint(updateAnswer)]
    fn update_answer(&self, answer: BigUint) {
        let round_id = self.latest_round().get() + 1;
        let timestamp = self.blockchain().get_block_timestamp();
        self.store_round(round_id, answer, timestamp, timestamp);
    }

    #[endpoint(updateRoundData)]
    fn update_round_data(&self, round_id: u64, answer: BigUint, timestamp: u64, started_at: u64) {
        self.store_round(round_id, answer, timestamp, started_at);
    }

    fn store_round(&self, round_id: u64, answer: BigUint, timestamp: u64, started_at: u64) {
        self.latest_round().set(round_id);
        self.latest_answer().set(&answer);
        self.latest_timestamp().set(timestamp);
        self.latest_started_at().set(started_at);
    }

    #[view(latestRoundData)]
    fn latest_round_data(&self) -> MultiValue5<u64, BigUint, u64, u64, u64> {
        let round_id = self.latest_round().get();
        require!(round_id > 0, ERR_NO_DATA);
        (
            round_id,
            self.latest_answer().get(),
            self.latest_started_at().get(),
            self.latest_timestamp().get(),
            round_id,
        )
            .into()
    }

    #[view(decimals)]
    fn get_decimals(&self) -> u8 {
        self.decimals().get()
    }

    #[view(version)]
    fn version(&self) -> u64 {
        VERSION
    }

    #[storage_mapper("decimals")]
    fn decimals(&self) -> SingleValueMapper<u8>;

    #[storage_mapper("latestRound")]
    fn latest_round(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("latestAnswer")]
    fn latest_answer(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("latestTimestamp")]
    fn latest_timestamp(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("latestStartedAt")]
    fn latest_started_at(&self) -> SingleValueMapper<u64>;
}
