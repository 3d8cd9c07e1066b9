use soroban_sdk::{contracterror, contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Manager,
    Token,
    TargetAmount,
    Deadline,
    TotalRaised,
    ContributorCount,
    NumRequests,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Contribution(Address),
    Request(RequestId),
    Vote(RequestId, Address), // (RequestId, Contributor)
}

pub type RequestId = u32;

// Derived from the clock and totals on every read, never stored
#[derive(Clone, Copy, Debug, PartialEq)]
#[contracttype]
pub enum CampaignStatus {
    Active,
    Succeeded,
    Failed,
}

// Spending request proposed by the manager
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Request {
    pub description: String,
    pub recipient: Address,
    pub amount_requested: i128,
    pub vote_count: u32,
    pub completed: bool,
}

// Read-only snapshot of the campaign
#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct CampaignInfo {
    pub manager: Address,
    pub token: Address,
    pub target_amount: i128,
    pub deadline: u64,
    pub minimum_investment: i128,
    pub total_raised: i128,
    pub contributor_count: u32,
    pub num_requests: u32,
    pub status: CampaignStatus,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,
    Unauthorized = 4,
    DeadlinePassed = 5,
    TooEarly = 6,
    BelowMinimum = 7,
    TargetMet = 8,
    NothingToRefund = 9,
    InvalidRequest = 10,
    AlreadyVoted = 11,
    NotAContributor = 12,
    QuorumNotMet = 13,
    InsufficientFunds = 14,
    InvalidAmount = 15,
}

// Constants
pub const MINIMUM_INVESTMENT: i128 = 100; // smallest value units
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
