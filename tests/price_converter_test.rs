// Fixed-point arithmetic of the price gate, checked without a VM.

use fund_me::price_converter::{minimum_usd, rescale, usd_value, MINIMUM_USD};
use multiversx_sc_scenario::imports::*;

type Amount = BigUint<StaticApi>;

const ONE_EGLD: u64 = 1_000_000_000_000_000_000;

fn pow10(exp: u32) -> Amount {
    Amount::from(10u64).pow(exp)
}

#[test]
fn one_egld_at_2000_usd_is_2000_usd() {
    // 8-decimal feed answer, like most USD aggregators
    let price = Amount::from(200_000_000_000u64);
    let value = usd_value(&price, 8, &Amount::from(ONE_EGLD));
    assert_eq!(value, Amount::from(2_000u64) * pow10(18));
}

#[test]
fn zero_amount_is_worth_nothing() {
    let price = Amount::from(200_000_000_000u64);
    assert_eq!(usd_value(&price, 8, &Amount::zero()), Amount::zero());
}

#[test]
fn threshold_amount_lands_exactly_on_minimum() {
    let price = Amount::from(200_000_000_000u64);
    // 50 / 2000 = 0.025 EGLD
    let at_threshold = Amount::from(25_000_000_000_000_000u64);
    assert_eq!(usd_value(&price, 8, &at_threshold), minimum_usd::<StaticApi>());

    let below = Amount::from(24_999_999_999_999_999u64);
    assert!(usd_value(&price, 8, &below) < minimum_usd::<StaticApi>());
}

#[test]
fn feed_with_more_decimals_than_usd_scale_is_truncated() {
    assert_eq!(rescale(&Amount::from(123_456u64), 20, 18), Amount::from(1_234u64));
    assert_eq!(rescale(&Amount::from(99u64), 20, 18), Amount::zero());
}

#[test]
fn feed_with_usd_scale_is_unchanged() {
    let price = Amount::from(2_000u64) * pow10(18);
    assert_eq!(rescale(&price, 18, 18), price);
    assert_eq!(
        usd_value(&price, 18, &Amount::from(ONE_EGLD)),
        Amount::from(2_000u64) * pow10(18)
    );
}

#[test]
fn large_amounts_do_not_wrap() {
    // both well past u128
    let price = Amount::from(u32::MAX).pow(6);
    let amount = pow10(40);
    let value = usd_value(&price, 0, &amount);
    assert_eq!(value, &price * &amount);
    assert!(value > Amount::from(u32::MAX).pow(8));
    assert_eq!(value / pow10(40), price);
}

#[test]
fn minimum_is_fifty_usd_at_18_decimals() {
    assert_eq!(MINIMUM_USD, 50);
    assert_eq!(minimum_usd::<StaticApi>(), Amount::from(50u64) * pow10(18));
}
