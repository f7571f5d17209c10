//! Transaction engine
//!
//! Every operation runs the same authorization sequence before touching a
//! balance: authenticate the account, resolve the counterparty, parse the
//! amount, enforce the session cap (unless the account is privileged), then
//! check funds. The balance change is committed through
//! [`Ledger::transact`], so a rejected operation never writes anything.

use serde::Serialize;

use super::policy::EngineConfig;
use super::session::{CappedOperation, Operator, Session};
use crate::audit::{AuditLogger, AuditRecord, TransactionCode};
use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber, AccountType, Money, MAX_BALANCE};
use crate::storage::Ledger;

/// Outcome of a committed operation
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    /// What was written to the transaction log
    pub record: AuditRecord,
    /// The acted-on account after the operation
    pub account: Account,
    /// Transfer destination after the operation
    pub destination: Option<Account>,
}

/// Runs one login session's operations against a ledger
pub struct TransactionEngine {
    pub(super) ledger: Ledger,
    pub(super) config: EngineConfig,
    pub(super) session: Session,
    audit: Option<AuditLogger>,
}

impl TransactionEngine {
    /// Authenticate `number`/`name` and open a session for that account
    ///
    /// The account must exist, carry exactly this holder name and be active.
    pub fn begin_session(
        mut ledger: Ledger,
        config: EngineConfig,
        audit: Option<AuditLogger>,
        number: &str,
        name: &str,
    ) -> BankResult<Self> {
        let report = ledger.load()?;
        if !report.is_clean() {
            log::warn!(
                "{} malformed ledger line(s) ignored",
                report.skipped.len()
            );
        }

        let account = match find_holder(&ledger, number, name) {
            Ok(account) if account.is_active() => account,
            Ok(account) => {
                let err = BankError::authentication(account.number.as_str(), "account is disabled");
                log::warn!("Login rejected: {}", err);
                return Err(err);
            }
            Err(e) => {
                let err = login_failure(number, e);
                log::warn!("Login rejected: {}", err);
                return Err(err);
            }
        };

        let operator = Operator {
            privileged: config.policy.is_privileged(&account),
            number: account.number.clone(),
            name: account.name.clone(),
        };
        log::info!(
            "Session started for account {} ({})",
            operator.number,
            if operator.privileged { "privileged" } else { "standard" }
        );

        Ok(Self {
            ledger,
            config,
            session: Session::new(operator),
            audit,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn operator(&self) -> &Operator {
        &self.session.operator
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Close the session and append the end-of-session sentinel
    pub fn end_session(self) -> BankResult<Session> {
        if let Some(logger) = &self.audit {
            logger.log(&AuditRecord::end_of_session())?;
        }
        log::info!(
            "Session ended for account {} (started {})",
            self.session.operator.number,
            self.session.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        Ok(self.session)
    }

    /// Every account in the ledger; privileged operators only
    pub fn view_all(&mut self) -> BankResult<Vec<Account>> {
        let result = self.try_view_all();
        rejected("view all", result)
    }

    fn try_view_all(&mut self) -> BankResult<Vec<Account>> {
        self.require_privileged("view all accounts")?;
        self.ledger.load()?;
        Ok(self.ledger.accounts().to_vec())
    }

    /// Take `amount` out of an account
    pub fn withdraw(&mut self, number: &str, holder: &str, amount: &str) -> BankResult<Receipt> {
        let result = self.try_withdraw(number, holder, amount);
        rejected("withdraw", result)
    }

    fn try_withdraw(&mut self, number: &str, holder: &str, amount: &str) -> BankResult<Receipt> {
        let account = self.authenticate(number, holder)?;
        let amount = parse_amount(amount)?;
        self.enforce_cap(&account, CappedOperation::Withdraw, amount)?;

        let updated = self.ledger.transact(|draft| {
            let next = draft.get(&account.number)?.debited(amount)?.with_transaction_recorded();
            draft.replace(next.clone())?;
            Ok(next)
        })?;

        self.count(&account, CappedOperation::Withdraw, amount);
        Ok(self.commit(TransactionCode::Withdraw, holder, amount, updated, None))
    }

    /// Move `amount` from one account to another
    ///
    /// Only the source is authenticated. The destination must exist.
    pub fn transfer(
        &mut self,
        from: &str,
        holder: &str,
        to: &str,
        amount: &str,
    ) -> BankResult<Receipt> {
        let result = self.try_transfer(from, holder, to, amount);
        rejected("transfer", result)
    }

    fn try_transfer(
        &mut self,
        from: &str,
        holder: &str,
        to: &str,
        amount: &str,
    ) -> BankResult<Receipt> {
        let source = self.authenticate(from, holder)?;

        let destination = AccountNumber::parse(to)
            .ok()
            .and_then(|number| self.ledger.find(&number).cloned())
            .ok_or_else(|| BankError::account_not_found(to.trim()))?;
        if destination.number == source.number {
            return Err(BankError::SelfTransfer(source.number.to_string()));
        }

        let amount = parse_amount(amount)?;
        self.enforce_cap(&source, CappedOperation::Transfer, amount)?;

        let (debited, credited) = self.ledger.transact(|draft| {
            let debited = draft.get(&source.number)?.debited(amount)?.with_transaction_recorded();
            let credited = draft.get(&destination.number)?.credited(amount)?;
            draft.replace(debited.clone())?;
            draft.replace(credited.clone())?;
            Ok((debited, credited))
        })?;

        self.count(&source, CappedOperation::Transfer, amount);
        Ok(self.commit(TransactionCode::Transfer, holder, amount, debited, Some(credited)))
    }

    /// Pay `amount` to a company on the payee allow-list
    pub fn pay_bill(
        &mut self,
        number: &str,
        holder: &str,
        payee: &str,
        amount: &str,
    ) -> BankResult<Receipt> {
        let result = self.try_pay_bill(number, holder, payee, amount);
        rejected("pay bill", result)
    }

    fn try_pay_bill(
        &mut self,
        number: &str,
        holder: &str,
        payee: &str,
        amount: &str,
    ) -> BankResult<Receipt> {
        let account = self.authenticate(number, holder)?;
        let payee = self
            .config
            .payees
            .resolve(payee)
            .map(str::to_string)
            .ok_or_else(|| BankError::InvalidPayee(payee.trim().to_string()))?;
        let amount = parse_amount(amount)?;
        self.enforce_cap(&account, CappedOperation::BillPayment, amount)?;

        let updated = self.ledger.transact(|draft| {
            let next = draft.get(&account.number)?.debited(amount)?.with_transaction_recorded();
            draft.replace(next.clone())?;
            Ok(next)
        })?;

        log::info!("Bill of {} paid to {} from account {}", amount, payee, updated.number);
        self.count(&account, CappedOperation::BillPayment, amount);
        Ok(self.commit(TransactionCode::PayBill, holder, amount, updated, None))
    }

    /// Record a deposit
    ///
    /// The amount is held as pending for the rest of the session and is not
    /// added to the usable balance.
    pub fn deposit(&mut self, number: &str, holder: &str, amount: &str) -> BankResult<Receipt> {
        let result = self.try_deposit(number, holder, amount);
        rejected("deposit", result)
    }

    fn try_deposit(&mut self, number: &str, holder: &str, amount: &str) -> BankResult<Receipt> {
        let account = self.authenticate(number, holder)?;
        let amount = parse_amount(amount)?;

        let projected = account
            .balance
            .checked_add(self.session.pending_deposit(&account.number))
            .and_then(|total| total.checked_add(amount))
            .ok_or_else(|| BankError::InvalidAmount(amount.to_string()))?;
        if projected > MAX_BALANCE {
            return Err(BankError::InvalidBalanceRange(projected));
        }

        self.session.add_pending_deposit(&account.number, amount);
        Ok(self.commit(TransactionCode::Deposit, holder, amount, account, None))
    }

    /// Move a student-plan account to the non-student plan
    pub fn change_plan(&mut self, number: &str, holder: &str) -> BankResult<Receipt> {
        let result = self.try_change_plan(number, holder);
        rejected("change plan", result)
    }

    fn try_change_plan(&mut self, number: &str, holder: &str) -> BankResult<Receipt> {
        self.require_privileged("change account plans")?;
        let account = self.authenticate(number, holder)?;

        if account.account_type != AccountType::StudentPlan {
            return Err(BankError::IneligiblePlanChange {
                account: account.number.to_string(),
                current: account.account_type.to_string(),
            });
        }

        let updated = self.ledger.update(&account.number, |current| {
            Ok(current.with_type(AccountType::NonStudentPlan))
        })?;

        Ok(self.commit(TransactionCode::ChangePlan, holder, Money::zero(), updated, None))
    }

    /// Fresh lookup of an account by number and exact holder name
    ///
    /// Absent accounts are `AccountNotFound`; a name mismatch is
    /// `AuthenticationFailed`.
    pub(super) fn holder_account(&mut self, number: &str, holder: &str) -> BankResult<Account> {
        self.ledger.load()?;
        find_holder(&self.ledger, number, holder)
    }

    /// Authenticate an account for a money operation
    fn authenticate(&mut self, number: &str, holder: &str) -> BankResult<Account> {
        let account = self
            .holder_account(number, holder)
            .map_err(|e| login_failure(number, e))?;

        if !account.is_active() {
            return Err(BankError::authentication(account.number.as_str(), "account is disabled"));
        }
        if self.session.created_this_session(&account.number) {
            return Err(BankError::authentication(
                account.number.as_str(),
                "account was created this session and is not available until the next one",
            ));
        }
        Ok(account)
    }

    pub(super) fn require_privileged(&self, action: &str) -> BankResult<()> {
        if self.session.operator.privileged {
            Ok(())
        } else {
            Err(BankError::UnauthorizedOperation(format!(
                "account {} may not {}",
                self.session.operator.number, action
            )))
        }
    }

    fn enforce_cap(
        &self,
        account: &Account,
        operation: CappedOperation,
        amount: Money,
    ) -> BankResult<()> {
        if self.config.policy.is_privileged(account) {
            return Ok(());
        }

        let limit = match operation {
            CappedOperation::Withdraw => self.config.limits.withdraw,
            CappedOperation::Transfer => self.config.limits.transfer,
            CappedOperation::BillPayment => self.config.limits.bill_payment,
        };
        let attempted = self
            .session
            .total(operation)
            .checked_add(amount)
            .ok_or_else(|| BankError::InvalidAmount(amount.to_string()))?;
        if attempted > limit {
            return Err(BankError::SessionLimitExceeded {
                operation: operation.label(),
                limit,
                attempted,
            });
        }
        Ok(())
    }

    fn count(&mut self, account: &Account, operation: CappedOperation, amount: Money) {
        if !self.config.policy.is_privileged(account) {
            self.session.record(operation, amount);
        }
    }

    /// Log a committed operation and build its receipt
    pub(super) fn commit(
        &self,
        code: TransactionCode,
        holder: &str,
        amount: Money,
        account: Account,
        destination: Option<Account>,
    ) -> Receipt {
        let record = AuditRecord::new(
            code,
            holder,
            &account.number,
            amount,
            account.account_type.plan_code(),
        );

        if let Some(logger) = &self.audit {
            // The ledger change is already on disk; a log failure can't undo it.
            if let Err(e) = logger.log(&record) {
                log::error!("Failed to write transaction log: {}", e);
            }
        }
        log::info!("{}", record.format_human_readable());

        Receipt {
            record,
            account,
            destination,
        }
    }
}

fn find_holder(ledger: &Ledger, number: &str, holder: &str) -> BankResult<Account> {
    let account = AccountNumber::parse(number)
        .ok()
        .and_then(|number| ledger.find(&number))
        .ok_or_else(|| BankError::account_not_found(number.trim()))?;

    if account.name != holder {
        return Err(BankError::authentication(
            account.number.as_str(),
            "holder name does not match",
        ));
    }
    Ok(account.clone())
}

fn login_failure(number: &str, err: BankError) -> BankError {
    if err.is_not_found() {
        BankError::authentication(number.trim(), "no such account")
    } else {
        err
    }
}

/// Positive amount with at most two decimals, no larger than a balance can hold
fn parse_amount(amount: &str) -> BankResult<Money> {
    Money::parse(amount)
        .ok()
        .filter(|m| m.is_positive() && *m <= MAX_BALANCE)
        .ok_or_else(|| BankError::InvalidAmount(amount.trim().to_string()))
}

fn rejected<T>(operation: &str, result: BankResult<T>) -> BankResult<T> {
    if let Err(e) = &result {
        log::warn!("{} rejected: {}", operation, e);
    }
    result
}
