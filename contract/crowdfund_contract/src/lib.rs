#![no_std]

mod campaign;
mod events;
mod storage_types;


use soroban_sdk::{contract, contractimpl, log, Address, Env, String};

pub use storage_types::{
    CampaignInfo, CampaignStatus, CrowdfundError, Request, RequestId, MINIMUM_INVESTMENT,
};
use storage_types::DataKey;

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    /// Open the campaign. The deadline is `duration` seconds from now.
    pub fn initialize(
        env: Env,
        manager: Address,
        token: Address,
        target_amount: i128,
        duration: u64,
    ) -> Result<(), CrowdfundError> {
        if campaign::is_initialized(&env) {
            return Err(CrowdfundError::AlreadyInitialized);
        }
        manager.require_auth();

        if target_amount <= 0 || duration == 0 {
            return Err(CrowdfundError::InvalidConfig);
        }
        let deadline = env
            .ledger()
            .timestamp()
            .checked_add(duration)
            .ok_or(CrowdfundError::InvalidConfig)?;

        env.storage().instance().set(&DataKey::Manager, &manager);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::TargetAmount, &target_amount);
        env.storage().instance().set(&DataKey::Deadline, &deadline);
        env.storage().instance().set(&DataKey::TotalRaised, &0i128);
        env.storage().instance().set(&DataKey::ContributorCount, &0u32);
        env.storage().instance().set(&DataKey::NumRequests, &0u32);
        campaign::extend_instance(&env);

        events::emit_campaign_initialized(
            &env,
            events::CampaignInitializedEvent {
                manager,
                token,
                target_amount,
                deadline,
            },
        );
        Ok(())
    }

    /// Contribute `amount` to the campaign. Repeat contributions accumulate.
    pub fn contribute(env: Env, contributor: Address, amount: i128) -> Result<(), CrowdfundError> {
        contributor.require_auth();
        let deadline = campaign::get_deadline(&env)?;

        if campaign::deadline_passed(&env, deadline) {
            return Err(CrowdfundError::DeadlinePassed);
        }
        if amount < MINIMUM_INVESTMENT {
            return Err(CrowdfundError::BelowMinimum);
        }

        let previous = campaign::get_contribution(&env, &contributor);
        let total_contributed = previous
            .checked_add(amount)
            .ok_or(CrowdfundError::InvalidAmount)?;
        let total_raised = campaign::get_total_raised(&env)
            .checked_add(amount)
            .ok_or(CrowdfundError::InvalidAmount)?;

        campaign::set_contribution(&env, &contributor, total_contributed);
        campaign::set_total_raised(&env, total_raised);
        if previous == 0 {
            let count = campaign::get_contributor_count(&env)
                .checked_add(1)
                .ok_or(CrowdfundError::InvalidAmount)?;
            campaign::set_contributor_count(&env, count);
        }
        campaign::extend_instance(&env);

        campaign::collect(&env, &contributor, amount)?;

        events::emit_contributed(
            &env,
            events::ContributedEvent {
                contributor,
                amount,
                total_contributed,
                total_raised,
            },
        );
        Ok(())
    }

    /// Return the caller's whole contribution once the campaign has failed.
    pub fn refund(env: Env, contributor: Address) -> Result<i128, CrowdfundError> {
        contributor.require_auth();

        match campaign::campaign_status(&env)? {
            CampaignStatus::Active => return Err(CrowdfundError::TooEarly),
            CampaignStatus::Succeeded => return Err(CrowdfundError::TargetMet),
            CampaignStatus::Failed => {}
        }

        let amount = campaign::get_contribution(&env, &contributor);
        if amount <= 0 {
            return Err(CrowdfundError::NothingToRefund);
        }

        // Zero the balance before the transfer so a re-entrant refund finds nothing.
        campaign::set_contribution(&env, &contributor, 0);
        campaign::set_total_raised(&env, campaign::get_total_raised(&env) - amount);
        campaign::set_contributor_count(
            &env,
            campaign::get_contributor_count(&env).saturating_sub(1),
        );
        // Votes from a refunded identity no longer count toward any open request.
        for request_id in 0..campaign::get_num_requests(&env) {
            campaign::withdraw_vote(&env, request_id, &contributor);
        }
        campaign::extend_instance(&env);

        log!(&env, "refunding contributor", contributor, amount);
        campaign::disburse(&env, &contributor, amount)?;

        events::emit_refunded(&env, events::RefundedEvent { contributor, amount });
        Ok(amount)
    }

    /// Propose paying `amount` to `recipient`. Returns the new request's index.
    pub fn create_request(
        env: Env,
        manager: Address,
        description: String,
        recipient: Address,
        amount: i128,
    ) -> Result<RequestId, CrowdfundError> {
        manager.require_auth();
        campaign::require_manager(&env, &manager)?;

        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }
        if amount > campaign::held_balance(&env)? {
            return Err(CrowdfundError::InsufficientFunds);
        }

        let request_id = campaign::get_num_requests(&env);
        let request = Request {
            description,
            recipient: recipient.clone(),
            amount_requested: amount,
            vote_count: 0,
            completed: false,
        };
        campaign::set_request(&env, request_id, &request);
        env.storage().instance().set(&DataKey::NumRequests, &(request_id + 1));
        campaign::extend_instance(&env);

        events::emit_request_created(
            &env,
            events::RequestCreatedEvent {
                request_id,
                recipient,
                amount,
            },
        );
        Ok(request_id)
    }

    /// Approve a request. Every contributor has exactly one vote per request.
    pub fn vote_request(
        env: Env,
        voter: Address,
        request_id: RequestId,
    ) -> Result<(), CrowdfundError> {
        voter.require_auth();
        campaign::require_initialized(&env)?;

        let mut request = campaign::get_open_request(&env, request_id)?;
        if campaign::get_contribution(&env, &voter) <= 0 {
            return Err(CrowdfundError::NotAContributor);
        }
        if campaign::has_voted(&env, request_id, &voter) {
            return Err(CrowdfundError::AlreadyVoted);
        }

        campaign::record_vote(&env, request_id, &voter);
        request.vote_count = request
            .vote_count
            .checked_add(1)
            .ok_or(CrowdfundError::InvalidAmount)?;
        campaign::set_request(&env, request_id, &request);

        events::emit_request_voted(
            &env,
            events::RequestVotedEvent {
                request_id,
                voter,
                vote_count: request.vote_count,
            },
        );
        Ok(())
    }

    /// Pay out an approved request. Quorum is checked against the current
    /// contributor count, not the count when votes were cast.
    pub fn make_payment(
        env: Env,
        manager: Address,
        request_id: RequestId,
    ) -> Result<(), CrowdfundError> {
        manager.require_auth();
        campaign::require_manager(&env, &manager)?;

        let mut request = campaign::get_open_request(&env, request_id)?;
        if !campaign::has_quorum(request.vote_count, campaign::get_contributor_count(&env)) {
            return Err(CrowdfundError::QuorumNotMet);
        }
        if request.amount_requested > campaign::held_balance(&env)? {
            return Err(CrowdfundError::InsufficientFunds);
        }

        // Mark completed before the transfer so the request can never pay twice.
        request.completed = true;
        campaign::set_request(&env, request_id, &request);
        campaign::extend_instance(&env);

        log!(&env, "paying request", request_id, request.amount_requested);
        campaign::disburse(&env, &request.recipient, request.amount_requested)?;

        events::emit_payment_made(
            &env,
            events::PaymentMadeEvent {
                request_id,
                recipient: request.recipient,
                amount: request.amount_requested,
            },
        );
        Ok(())
    }

    /// View functions
    pub fn get_manager(env: Env) -> Result<Address, CrowdfundError> {
        campaign::get_manager(&env)
    }

    pub fn get_token(env: Env) -> Result<Address, CrowdfundError> {
        campaign::get_token(&env)
    }

    pub fn get_target(env: Env) -> Result<i128, CrowdfundError> {
        campaign::get_target(&env)
    }

    pub fn get_deadline(env: Env) -> Result<u64, CrowdfundError> {
        campaign::get_deadline(&env)
    }

    pub fn get_minimum_investment(_env: Env) -> i128 {
        MINIMUM_INVESTMENT
    }

    pub fn get_total_raised(env: Env) -> Result<i128, CrowdfundError> {
        campaign::require_initialized(&env)?;
        Ok(campaign::get_total_raised(&env))
    }

    pub fn get_contributor_count(env: Env) -> Result<u32, CrowdfundError> {
        campaign::require_initialized(&env)?;
        Ok(campaign::get_contributor_count(&env))
    }

    pub fn get_contribution(env: Env, contributor: Address) -> Result<i128, CrowdfundError> {
        campaign::require_initialized(&env)?;
        Ok(campaign::get_contribution(&env, &contributor))
    }

    pub fn get_num_requests(env: Env) -> Result<u32, CrowdfundError> {
        campaign::require_initialized(&env)?;
        Ok(campaign::get_num_requests(&env))
    }

    pub fn get_request(env: Env, request_id: RequestId) -> Result<Request, CrowdfundError> {
        campaign::require_initialized(&env)?;
        campaign::get_request(&env, request_id)
    }

    pub fn has_voted(env: Env, request_id: RequestId, voter: Address) -> Result<bool, CrowdfundError> {
        campaign::require_initialized(&env)?;
        Ok(campaign::has_voted(&env, request_id, &voter))
    }

    /// Whether the request would currently pass the quorum check in `make_payment`.
    pub fn get_quorum_status(env: Env, request_id: RequestId) -> Result<bool, CrowdfundError> {
        campaign::require_initialized(&env)?;
        let request = campaign::get_request(&env, request_id)?;
        Ok(campaign::has_quorum(
            request.vote_count,
            campaign::get_contributor_count(&env),
        ))
    }

    pub fn get_balance(env: Env) -> Result<i128, CrowdfundError> {
        campaign::held_balance(&env)
    }

    pub fn get_campaign(env: Env) -> Result<CampaignInfo, CrowdfundError> {
        Ok(CampaignInfo {
            manager: campaign::get_manager(&env)?,
            token: campaign::get_token(&env)?,
            target_amount: campaign::get_target(&env)?,
            deadline: campaign::get_deadline(&env)?,
            minimum_investment: MINIMUM_INVESTMENT,
            total_raised: campaign::get_total_raised(&env),
            contributor_count: campaign::get_contributor_count(&env),
            num_requests: campaign::get_num_requests(&env),
            status: campaign::campaign_status(&env)?,
        })
    }
}
