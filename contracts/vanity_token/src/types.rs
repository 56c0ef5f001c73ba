use soroban_sdk::{contracterror, contracttype, Address};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidConfig = 4,
    /// Token was deployed without a crowdsale to distribute for
    NoCrowdsale = 5,
    CrowdsaleNotFinalized = 6,
    /// Batch size is zero or runs past the participant list
    InvalidCount = 7,
    MintingFinished = 8,
    Paused = 9,
    NotPaused = 10,
    InvalidAmount = 11,
    InsufficientBalance = 12,
    InsufficientAllowance = 13,
    InvalidExpiration = 14,
    LengthMismatch = 15,
    Overflow = 16,
}

/// What a participant's token share is proportional to
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DistributionBasis {
    /// Amount paid in through the crowdsale
    Contribution,
    /// Payment-asset balance held at distribution time
    Balance,
}

/// Parameters of the post-sale distribution
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionConfig {
    /// Crowdsale whose participants receive tokens
    pub crowdsale: Address,
    /// Receiver of the ratio allocation once every participant is served
    pub reserve: Address,
    /// Per-participant weight ceiling, in payment-asset units
    pub cap: i128,
    /// Token units credited per unit of weight
    pub rate: i128,
    /// Reserve allocation = distributed * numerator / denominator
    pub reserve_numerator: i128,
    pub reserve_denominator: i128,
    pub basis: DistributionBasis,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceValue {
    pub amount: i128,
    /// Last ledger sequence at which the allowance is usable
    pub expiration_ledger: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Owner,
    Paused,
    MintingFinished,
    TotalSupply,
    Distribution,
    DistributedCount,
    /// Sum of capped weights already distributed
    DistributedWeight,
    Distributed,
    Balance(Address),
    Allowance(Address, Address),
}
