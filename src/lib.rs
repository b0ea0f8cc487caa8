#![no_std]

multiversx_sc::imports!();

pub mod fund_me_proxy;
pub mod price_converter;
pub mod price_feed_proxy;

// ============================================================
// Error identifiers
// ============================================================

/// Kept as the funder-facing revert text; callers match on it like any
/// other identifier.
pub const ERR_INSUFFICIENT_CONTRIBUTION: &str = "You need to spend more EGLD!";
pub const ERR_NOT_OWNER: &str = "FundMe__NotOwner";
pub const ERR_INDEX_OUT_OF_RANGE: &str = "FundMe__IndexOutOfRange";
pub const ERR_INVALID_PRICE_FEED: &str = "FundMe__InvalidPriceFeed";
pub const ERR_TRANSFER_FAILED: &str = "FundMe__TransferFailed";

// ============================================================
// Contract
// ============================================================

/// Custodial funding ledger. Anyone may fund with at least the USD
/// minimum worth of EGLD; only the deployer may sweep the balance, which
/// resets every contributor record in the same transaction.
#[multiversx_sc::contract]
pub trait FundMe: price_converter::PriceConverterModule {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(&self, price_feed_address: ManagedAddress) {
        require!(
            self.blockchain().is_smart_contract(&price_feed_address),
            ERR_INVALID_PRICE_FEED
        );

        let deployer = self.blockchain().get_caller();
        self.owner().set(&deployer);
        self.price_feed_address().set(&price_feed_address);
    }

    /// Owner and feed are fixed for the contract's lifetime.
    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: fund
    // Gated by the USD value of the payment at the current feed price.
    // ========================================================

    #[endpoint(fund)]
    #[payable("EGLD")]
    fn fund(&self) {
        let caller = self.blockchain().get_caller();
        let payment_amount = self.call_value().egld_value().clone_value();

        require!(
            self.meets_minimum(&payment_amount),
            ERR_INSUFFICIENT_CONTRIBUTION
        );

        self.address_to_amount_funded(&caller)
            .update(|funded| *funded += &payment_amount);
        self.funders().push(&caller);

        self.fund_event(&caller, &payment_amount, self.funders().len());
    }

    // ========================================================
    // ENDPOINT: withdraw
    // Reads the roster straight from storage on every iteration.
    // ========================================================

    #[endpoint(withdraw)]
    fn withdraw(&self) {
        self.require_owner();

        let balance = self.held_balance();
        let funders_count = self.funders().len();

        for index in 1..=self.funders().len() {
            let funder = self.funders().get(index);
            self.address_to_amount_funded(&funder).clear();
        }
        self.funders().clear();

        self.payout(&balance, funders_count);
    }

    // ========================================================
    // ENDPOINT: cheaperWithdraw
    // Same observable behaviour as withdraw. The roster is loaded once
    // into a transient vector before the reset loop.
    // ========================================================

    #[endpoint(cheaperWithdraw)]
    fn cheaper_withdraw(&self) {
        self.require_owner();

        let balance = self.held_balance();

        let mut funders: ManagedVec<ManagedAddress> = ManagedVec::new();
        for funder in self.funders().iter() {
            funders.push(funder);
        }

        for funder in funders.iter() {
            self.address_to_amount_funded(&funder).clear();
        }
        self.funders().clear();

        self.payout(&balance, funders.len());
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_owner(&self) {
        let caller = self.blockchain().get_caller();
        require!(caller == self.owner().get(), ERR_NOT_OWNER);
    }

    fn held_balance(&self) -> BigUint {
        self.blockchain()
            .get_sc_balance(&EgldOrEsdtTokenIdentifier::egld(), 0)
    }

    /// Sends the captured balance to the owner. Runs after the bookkeeping
    /// reset; a failed transfer reverts the whole call.
    fn payout(&self, amount: &BigUint, funders_cleared: usize) {
        let owner = self.owner().get();
        if *amount > 0u64 {
            require!(self.accepts_egld_from_contract(&owner), ERR_TRANSFER_FAILED);
            self.send().direct_egld(&owner, amount);
        }
        self.withdraw_event(&owner, amount, funders_cleared);
    }

    /// Wallets always accept EGLD. Contracts only when deployed payable or
    /// payable by other contracts.
    fn accepts_egld_from_contract(&self, address: &ManagedAddress) -> bool {
        if !self.blockchain().is_smart_contract(address) {
            return true;
        }
        let code_metadata = self.blockchain().get_code_metadata(address);
        code_metadata.is_payable() || code_metadata.is_payable_by_sc()
    }

    // ========================================================
    // VIEWS
    // ========================================================

    #[view(getOwner)]
    fn get_owner(&self) -> ManagedAddress {
        self.owner().get()
    }

    #[view(getPriceFeed)]
    fn get_price_feed(&self) -> ManagedAddress {
        self.price_feed_address().get()
    }

    #[view(getAddressToAmountFunded)]
    fn get_address_to_amount_funded(&self, funder: &ManagedAddress) -> BigUint {
        self.address_to_amount_funded(funder).get()
    }

    /// Zero-based roster lookup.
    #[view(getFunder)]
    fn get_funder(&self, index: usize) -> ManagedAddress {
        let funders = self.funders();
        require!(index < funders.len(), ERR_INDEX_OUT_OF_RANGE);
        funders.get(index + 1)
    }

    #[view(getFundersCount)]
    fn get_funders_count(&self) -> usize {
        self.funders().len()
    }

    #[view(getFundStats)]
    fn get_fund_stats(&self) -> MultiValue2<BigUint, usize> {
        (self.held_balance(), self.funders().len()).into()
    }

    #[view(getMinimumUsd)]
    fn get_minimum_usd(&self) -> BigUint {
        price_converter::minimum_usd::<Self::Api>()
    }

    #[view(getVersion)]
    fn get_version(&self) -> u64 {
        self.price_feed_version()
    }

    /// USD value (18 decimals) of `amount` at the current feed price.
    #[view(getConversionRate)]
    fn get_conversion_rate(&self, amount: BigUint) -> BigUint {
        self.convert_to_usd(&amount)
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("fund")]
    fn fund_event(
        &self,
        #[indexed] funder: &ManagedAddress,
        #[indexed] amount: &BigUint,
        roster_length: usize,
    );

    #[event("withdraw")]
    fn withdraw_event(
        &self,
        #[indexed] owner: &ManagedAddress,
        #[indexed] amount: &BigUint,
        funders_cleared: usize,
    );

    // ========================================================
    // STORAGE
    // ========================================================

    #[storage_mapper("owner")]
    fn owner(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("addressToAmountFunded")]
    fn address_to_amount_funded(&self, funder: &ManagedAddress) -> SingleValueMapper<BigUint>;

    #[storage_mapper("funders")]
    fn funders(&self) -> VecMapper<ManagedAddress>;
}
