use soroban_sdk::{token, Address, Env};

use crate::storage_types::*;

pub fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

pub fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Manager)
}

/// Fails with `NotInitialized` before `initialize` has run.
pub fn require_initialized(env: &Env) -> Result<(), CrowdfundError> {
    if !is_initialized(env) {
        return Err(CrowdfundError::NotInitialized);
    }
    Ok(())
}

pub fn get_manager(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Manager)
        .ok_or(CrowdfundError::NotInitialized)
}

/// Fails with `Unauthorized` unless `caller` is the campaign manager.
pub fn require_manager(env: &Env, caller: &Address) -> Result<(), CrowdfundError> {
    if *caller != get_manager(env)? {
        return Err(CrowdfundError::Unauthorized);
    }
    Ok(())
}

pub fn get_token(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn get_target(env: &Env) -> Result<i128, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::TargetAmount)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn get_deadline(env: &Env) -> Result<u64, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Deadline)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn get_total_raised(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::TotalRaised).unwrap_or(0)
}

pub fn set_total_raised(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalRaised, &total);
}

pub fn get_contributor_count(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::ContributorCount).unwrap_or(0)
}

pub fn set_contributor_count(env: &Env, count: u32) {
    env.storage().instance().set(&DataKey::ContributorCount, &count);
}

pub fn get_num_requests(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::NumRequests).unwrap_or(0)
}

pub fn get_contribution(env: &Env, contributor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&PersistentKey::Contribution(contributor.clone()))
        .unwrap_or(0)
}

pub fn set_contribution(env: &Env, contributor: &Address, amount: i128) {
    let key = PersistentKey::Contribution(contributor.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent(env, &key);
}

pub fn get_request(env: &Env, request_id: RequestId) -> Result<Request, CrowdfundError> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Request(request_id))
        .ok_or(CrowdfundError::InvalidRequest)
}

/// Loads a request that can still be voted on or paid out.
pub fn get_open_request(env: &Env, request_id: RequestId) -> Result<Request, CrowdfundError> {
    let request = get_request(env, request_id)?;
    if request.completed {
        return Err(CrowdfundError::InvalidRequest);
    }
    Ok(request)
}

pub fn set_request(env: &Env, request_id: RequestId, request: &Request) {
    let key = PersistentKey::Request(request_id);
    env.storage().persistent().set(&key, request);
    extend_persistent(env, &key);
}

pub fn has_voted(env: &Env, request_id: RequestId, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&PersistentKey::Vote(request_id, voter.clone()))
}

pub fn record_vote(env: &Env, request_id: RequestId, voter: &Address) {
    let key = PersistentKey::Vote(request_id, voter.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent(env, &key);
}

/// Drops `voter`'s vote from a request that has not been paid out yet.
/// Votes on completed requests are kept as a record.
pub fn withdraw_vote(env: &Env, request_id: RequestId, voter: &Address) {
    if !has_voted(env, request_id, voter) {
        return;
    }
    let mut request = match get_open_request(env, request_id) {
        Ok(request) => request,
        Err(_) => return,
    };
    request.vote_count = request.vote_count.saturating_sub(1);
    set_request(env, request_id, &request);
    env.storage()
        .persistent()
        .remove(&PersistentKey::Vote(request_id, voter.clone()));
}

pub fn deadline_passed(env: &Env, deadline: u64) -> bool {
    env.ledger().timestamp() >= deadline
}

pub fn campaign_status(env: &Env) -> Result<CampaignStatus, CrowdfundError> {
    let deadline = get_deadline(env)?;
    if !deadline_passed(env, deadline) {
        return Ok(CampaignStatus::Active);
    }
    if get_total_raised(env) >= get_target(env)? {
        Ok(CampaignStatus::Succeeded)
    } else {
        Ok(CampaignStatus::Failed)
    }
}

/// Strict majority of the live contributor count, recomputed on every call.
pub fn has_quorum(vote_count: u32, contributor_count: u32) -> bool {
    (vote_count as u64) * 2 > contributor_count as u64
}

/// Funds currently held by the campaign.
pub fn held_balance(env: &Env) -> Result<i128, CrowdfundError> {
    let token_client = token::Client::new(env, &get_token(env)?);
    Ok(token_client.balance(&env.current_contract_address()))
}

/// Pull a contribution from `from` into the campaign.
pub fn collect(env: &Env, from: &Address, amount: i128) -> Result<(), CrowdfundError> {
    let token_client = token::Client::new(env, &get_token(env)?);
    token_client.transfer(from, &env.current_contract_address(), &amount);
    Ok(())
}

/// Pay `amount` out of the campaign to `to`. Callers must have finished
/// every state update before calling this.
pub fn disburse(env: &Env, to: &Address, amount: i128) -> Result<(), CrowdfundError> {
    let token_client = token::Client::new(env, &get_token(env)?);
    token_client.transfer(&env.current_contract_address(), to, &amount);
    Ok(())
}
