use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::storage_types::RequestId;

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CampaignInitializedEvent {
    pub manager: Address,
    pub token: Address,
    pub target_amount: i128,
    pub deadline: u64,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ContributedEvent {
    pub contributor: Address,
    pub amount: i128,
    pub total_contributed: i128,
    pub total_raised: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RefundedEvent {
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RequestCreatedEvent {
    pub request_id: RequestId,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RequestVotedEvent {
    pub request_id: RequestId,
    pub voter: Address,
    pub vote_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentMadeEvent {
    pub request_id: RequestId,
    pub recipient: Address,
    pub amount: i128,
}

pub fn emit_campaign_initialized(env: &Env, event: CampaignInitializedEvent) {
    env.events().publish((Symbol::new(env, "campaign_initialized"),), event);
}

pub fn emit_contributed(env: &Env, event: ContributedEvent) {
    env.events().publish((Symbol::new(env, "contributed"),), event);
}

pub fn emit_refunded(env: &Env, event: RefundedEvent) {
    env.events().publish((Symbol::new(env, "refunded"),), event);
}

pub fn emit_request_created(env: &Env, event: RequestCreatedEvent) {
    env.events().publish((Symbol::new(env, "request_created"),), event);
}

pub fn emit_request_voted(env: &Env, event: RequestVotedEvent) {
    env.events().publish((Symbol::new(env, "request_voted"),), event);
}

pub fn emit_payment_made(env: &Env, event: PaymentMadeEvent) {
    env.events().publish((Symbol::new(env, "payment_made"),), event);
}
