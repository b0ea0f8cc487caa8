multiversx_sc::imports!();

use crate::price_feed_proxy;

/// Minimum contribution, in whole USD.
pub const MINIMUM_USD: u64 = 50;

/// Fixed-point scale of every USD amount handled by the contract.
pub const USD_DECIMALS: u32 = 18;

/// EGLD is denominated in 10^-18 atoms.
pub const EGLD_DECIMALS: u32 = 18;

pub const ERR_INVALID_PRICE: &str = "PriceConverter__InvalidPrice";

/// USD value of `amount` EGLD atoms, scaled to `USD_DECIMALS`.
///
/// `price` is the USD price of one whole EGLD as reported by the feed,
/// carrying `price_decimals` decimals. Division truncates.
pub fn usd_value<M: ManagedTypeApi>(
    price: &BigUint<M>,
    price_decimals: u8,
    amount: &BigUint<M>,
) -> BigUint<M> {
    let scaled_price = rescale(price, price_decimals as u32, USD_DECIMALS);
    (&scaled_price * amount) / &pow10::<M>(EGLD_DECIMALS)
}

/// Moves a fixed-point value from `from` decimals to `to` decimals.
pub fn rescale<M: ManagedTypeApi>(value: &BigUint<M>, from: u32, to: u32) -> BigUint<M> {
    if from <= to {
        value * &pow10::<M>(to - from)
    } else {
        value / &pow10::<M>(from - to)
    }
}

pub fn minimum_usd<M: ManagedTypeApi>() -> BigUint<M> {
    BigUint::from(MINIMUM_USD) * pow10::<M>(USD_DECIMALS)
}

fn pow10<M: ManagedTypeApi>(exp: u32) -> BigUint<M> {
    BigUint::from(10u64).pow(exp)
}

// ============================================================
// Price gate: oracle reads and the minimum-USD policy.
// The feed is queried on every call, never cached. Its views never
// write, so a plain sync call reads them.
// ============================================================

#[multiversx_sc::module]
pub trait PriceConverterModule {
    /// Latest answer of the configured feed and its decimal scale.
    fn latest_price(&self) -> (BigUint, u8) {
        let price_feed = self.price_feed_address().get();

        let round: MultiValue5<u64, BigUint, u64, u64, u64> = self
            .tx()
            .to(&price_feed)
            .typed(price_feed_proxy::PriceFeedProxy)
            .latest_round_data()
            .returns(ReturnsResult)
            .sync_call();
        let (_round_id, answer, _started_at, _updated_at, _answered_in_round) = round.into_tuple();
        require!(answer > 0u64, ERR_INVALID_PRICE);

        let decimals: u8 = self
            .tx()
            .to(&price_feed)
            .typed(price_feed_proxy::PriceFeedProxy)
            .decimals()
            .returns(ReturnsResult)
            .sync_call();

        (answer, decimals)
    }

    fn convert_to_usd(&self, amount: &BigUint) -> BigUint {
        let (price, decimals) = self.latest_price();
        usd_value(&price, decimals, amount)
    }

    fn meets_minimum(&self, amount: &BigUint) -> bool {
        self.convert_to_usd(amount) >= minimum_usd::<Self::Api>()
    }

    fn price_feed_version(&self) -> u64 {
        let price_feed = self.price_feed_address().get();
        self.tx()
            .to(&price_feed)
            .typed(price_feed_proxy::PriceFeedProxy)
            .version()
            .returns(ReturnsResult)
            .sync_call()
    }

    #[storage_mapper("priceFeedAddress")]
    fn price_feed_address(&self) -> SingleValueMapper<ManagedAddress>;
}
