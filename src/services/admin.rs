//! Privileged account workflows
//!
//! Creating, deleting and disabling accounts all require a privileged
//! operator and commit through the same ledger path as money operations.

use super::transaction::{Receipt, TransactionEngine};
use crate::audit::TransactionCode;
use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber, AccountType, Money};
use crate::storage::codec::ACCOUNT_WIDTH;

impl TransactionEngine {
    /// Open a new active account
    ///
    /// The account cannot be used for transactions until the next session.
    pub fn create_account(
        &mut self,
        number: &str,
        name: &str,
        account_type: AccountType,
        initial_balance: &str,
    ) -> BankResult<Receipt> {
        let result = self.try_create_account(number, name, account_type, initial_balance);
        if let Err(e) = &result {
            log::warn!("create account rejected: {}", e);
        }
        result
    }

    fn try_create_account(
        &mut self,
        number: &str,
        name: &str,
        account_type: AccountType,
        initial_balance: &str,
    ) -> BankResult<Receipt> {
        self.require_privileged("create accounts")?;

        let number = AccountNumber::parse(number)?;
        if number.len() > ACCOUNT_WIDTH {
            return Err(BankError::InvalidAccountNumber(number.to_string()));
        }

        let balance = Money::parse(initial_balance)
            .map_err(|_| BankError::InvalidAmount(initial_balance.trim().to_string()))?;

        let account = Account::new(number, name, account_type, balance);
        account.validate()?;

        self.ledger.insert(account.clone())?;
        self.session.mark_created(&account.number);

        Ok(self.commit(TransactionCode::CreateAccount, name, balance, account, None))
    }

    /// Remove an account; the holder name must match
    pub fn delete_account(&mut self, number: &str, name: &str) -> BankResult<Receipt> {
        let result = self.try_delete_account(number, name);
        if let Err(e) = &result {
            log::warn!("delete account rejected: {}", e);
        }
        result
    }

    fn try_delete_account(&mut self, number: &str, name: &str) -> BankResult<Receipt> {
        self.require_privileged("delete accounts")?;
        let account = self.holder_account(number, name)?;
        self.refuse_own_account(&account, "delete")?;

        let removed = self.ledger.remove(&account.number)?;
        let balance = removed.balance;
        Ok(self.commit(TransactionCode::DeleteAccount, name, balance, removed, None))
    }

    /// Mark an account disabled; fails without change if it already is
    pub fn disable_account(&mut self, number: &str, name: &str) -> BankResult<Receipt> {
        let result = self.try_disable_account(number, name);
        if let Err(e) = &result {
            log::warn!("disable account rejected: {}", e);
        }
        result
    }

    fn try_disable_account(&mut self, number: &str, name: &str) -> BankResult<Receipt> {
        self.require_privileged("disable accounts")?;
        let account = self.holder_account(number, name)?;
        self.refuse_own_account(&account, "disable")?;

        let updated = self.ledger.update(&account.number, Account::disabled)?;
        Ok(self.commit(TransactionCode::DisableAccount, name, Money::zero(), updated, None))
    }

    fn refuse_own_account(&self, account: &Account, action: &str) -> BankResult<()> {
        if account.number == self.session.operator.number {
            return Err(BankError::UnauthorizedOperation(format!(
                "cannot {} the account this session is logged in as",
                action
            )));
        }
        Ok(())
    }
}
