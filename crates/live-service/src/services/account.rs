//! Account service
//!
//! Resolves the authenticated caller to a ledger account, creating it on first use.

use live_core::entities::{Account, AccountRole, NewAccount};
use live_core::{DomainError, Snowflake};
use tracing::{info, instrument};

use crate::dto::BalanceResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Identity of the authenticated caller, as carried by the access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: Snowflake,
    pub role: AccountRole,
    pub name: Option<String>,
}

impl Caller {
    pub fn new(id: Snowflake, role: AccountRole, name: Option<String>) -> Self {
        Self { id, role, name }
    }

    /// Name shown in chat, falling back to a generated handle
    pub fn display_name(&self) -> String {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}-{}", self.role, self.id),
        }
    }

    /// Reject callers acting on an account other than their own
    pub fn require_owner(&self, account_id: Snowflake) -> ServiceResult<()> {
        if self.id == account_id {
            Ok(())
        } else {
            Err(ServiceError::Unauthorized)
        }
    }

    pub fn require_streamer(&self) -> ServiceResult<()> {
        if self.role == AccountRole::Streamer {
            Ok(())
        } else {
            Err(DomainError::WrongRole {
                id: self.id,
                expected: AccountRole::Streamer,
            }
            .into())
        }
    }
}

/// Account service
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's account, created with zero balances if it does not exist yet
    #[instrument(skip(self), fields(account_id = %caller.id))]
    pub async fn ensure(&self, caller: &Caller) -> ServiceResult<Account> {
        if let Some(account) = self.ctx.ledger().get_account(caller.id).await? {
            return Ok(account);
        }

        let account = self
            .ctx
            .ledger()
            .create_account_if_missing(&NewAccount::new(caller.id, caller.role, caller.display_name()))
            .await?;

        info!(account_id = %account.id, role = %account.role, "Account created");

        Ok(account)
    }

    /// Find an account, NotFound if absent
    #[instrument(skip(self))]
    pub async fn get(&self, account_id: Snowflake) -> ServiceResult<Account> {
        self.ctx
            .ledger()
            .get_account(account_id)
            .await?
            .ok_or_else(|| DomainError::AccountNotFound(account_id).into())
    }

    /// Find an account that must be a streamer
    #[instrument(skip(self))]
    pub async fn get_streamer(&self, streamer_id: Snowflake) -> ServiceResult<Account> {
        let account = self.get(streamer_id).await?;
        if !account.is_streamer() {
            return Err(DomainError::WrongRole {
                id: streamer_id,
                expected: AccountRole::Streamer,
            }
            .into());
        }
        Ok(account)
    }

    #[instrument(skip(self))]
    pub async fn balance(&self, account_id: Snowflake) -> ServiceResult<BalanceResponse> {
        let account = self.get(account_id).await?;
        Ok(BalanceResponse::from(&account))
    }
}
