//! Transaction log records
//!
//! One committed transaction becomes one fixed-width line:
//!
//! ```text
//! CC_HHHHHHHHHH_AAAAAA_PPPPPP_MM
//! 01_Jane Doe  _000042_020000_SP
//! ```
//!
//! code, holder (10, left-justified), account (6, zero-padded), amount in
//! cents (6, zero-padded; larger amounts widen the field) and a two-character
//! misc field.

use serde::Serialize;
use std::fmt;

use crate::error::{BankError, BankResult};
use crate::models::{AccountNumber, Money};

const HOLDER_WIDTH: usize = 10;
const ACCOUNT_WIDTH: usize = 6;
const AMOUNT_WIDTH: usize = 6;
const MISC_WIDTH: usize = 2;

/// Transaction kinds written to the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionCode {
    EndOfSession,
    Withdraw,
    Transfer,
    PayBill,
    Deposit,
    CreateAccount,
    DeleteAccount,
    DisableAccount,
    ChangePlan,
}

impl TransactionCode {
    /// Two-digit code
    pub fn code(&self) -> &'static str {
        match self {
            Self::EndOfSession => "00",
            Self::Withdraw => "01",
            Self::Transfer => "02",
            Self::PayBill => "03",
            Self::Deposit => "04",
            Self::CreateAccount => "05",
            Self::DeleteAccount => "06",
            Self::DisableAccount => "07",
            Self::ChangePlan => "08",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "00" => Self::EndOfSession,
            "01" => Self::Withdraw,
            "02" => Self::Transfer,
            "03" => Self::PayBill,
            "04" => Self::Deposit,
            "05" => Self::CreateAccount,
            "06" => Self::DeleteAccount,
            "07" => Self::DisableAccount,
            "08" => Self::ChangePlan,
            _ => return None,
        })
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EndOfSession => "End of Session",
            Self::Withdraw => "Withdraw",
            Self::Transfer => "Transfer",
            Self::PayBill => "Pay Bill",
            Self::Deposit => "Deposit",
            Self::CreateAccount => "Create Account",
            Self::DeleteAccount => "Delete Account",
            Self::DisableAccount => "Disable Account",
            Self::ChangePlan => "Change Plan",
        };
        write!(f, "{}", label)
    }
}

/// An immutable record of one committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditRecord {
    pub code: TransactionCode,
    /// Holder name as entered for the transaction
    pub holder: String,
    /// Canonical account number
    pub account: String,
    pub amount: Money,
    pub misc: String,
}

impl AuditRecord {
    pub fn new(
        code: TransactionCode,
        holder: impl Into<String>,
        account: &AccountNumber,
        amount: Money,
        misc: impl Into<String>,
    ) -> Self {
        Self {
            code,
            holder: holder.into(),
            account: account.to_string(),
            amount,
            misc: misc.into(),
        }
    }

    /// The `00` sentinel closing a session
    pub fn end_of_session() -> Self {
        Self {
            code: TransactionCode::EndOfSession,
            holder: "END_OF_SE".to_string(),
            account: "0".to_string(),
            amount: Money::zero(),
            misc: "ES".to_string(),
        }
    }

    /// Render as one log line (without terminator)
    pub fn encode(&self) -> String {
        let holder: String = self.holder.chars().take(HOLDER_WIDTH).collect();
        let misc: String = self.misc.chars().take(MISC_WIDTH).collect();

        format!(
            "{}_{:<hw$}_{:0>aw$}_{:0pw$}_{:<mw$}",
            self.code.code(),
            holder,
            self.account,
            self.amount.cents().max(0),
            misc,
            hw = HOLDER_WIDTH,
            aw = ACCOUNT_WIDTH,
            pw = AMOUNT_WIDTH,
            mw = MISC_WIDTH,
        )
    }

    /// Parse a log line written by [`AuditRecord::encode`]
    ///
    /// The holder is trimmed of its padding, so a record round-trips up to
    /// trailing spaces and truncation of long names.
    pub fn decode(line: &str) -> BankResult<Self> {
        let malformed = || BankError::Storage(format!("Malformed transaction log line: '{}'", line));
        let chars: Vec<char> = line.trim_end_matches(['\r', '\n']).chars().collect();

        // code _ holder _ account _ amount(>= 6) _ misc
        let min_len = 2 + 1 + HOLDER_WIDTH + 1 + ACCOUNT_WIDTH + 1 + AMOUNT_WIDTH + 1 + MISC_WIDTH;
        if chars.len() < min_len {
            return Err(malformed());
        }

        let holder_start = 3;
        let account_start = holder_start + HOLDER_WIDTH + 1;
        let amount_start = account_start + ACCOUNT_WIDTH + 1;
        let misc_start = chars.len() - MISC_WIDTH;
        let amount_end = misc_start - 1;

        for separator in [2, account_start - 1, amount_start - 1, amount_end] {
            if chars[separator] != '_' {
                return Err(malformed());
            }
        }

        let text = |start: usize, end: usize| -> String { chars[start..end].iter().collect() };

        let code = TransactionCode::from_code(&text(0, 2)).ok_or_else(malformed)?;
        let holder = text(holder_start, account_start - 1).trim_end().to_string();
        let account = AccountNumber::parse(&text(account_start, amount_start - 1))
            .map_err(|_| malformed())?;
        let cents: i64 = text(amount_start, amount_end)
            .parse()
            .map_err(|_| malformed())?;
        let misc = text(misc_start, chars.len()).trim_end().to_string();

        Ok(Self {
            code,
            holder,
            account: account.to_string(),
            amount: Money::from_cents(cents),
            misc,
        })
    }

    /// Format the record for human-readable output
    pub fn format_human_readable(&self) -> String {
        match self.code {
            TransactionCode::EndOfSession => "End of session".to_string(),
            _ => format!(
                "{} {} for {} (account {}) [{}]",
                self.code, self.amount, self.holder, self.account, self.misc
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: TransactionCode, holder: &str, account: &str, cents: i64) -> AuditRecord {
        AuditRecord::new(
            code,
            holder,
            &AccountNumber::parse(account).unwrap(),
            Money::from_cents(cents),
            "SP",
        )
    }

    #[test]
    fn test_code_values() {
        assert_eq!(TransactionCode::Withdraw.code(), "01");
        assert_eq!(TransactionCode::ChangePlan.code(), "08");
        assert_eq!(
            TransactionCode::from_code("04"),
            Some(TransactionCode::Deposit)
        );
        assert_eq!(TransactionCode::from_code("09"), None);
    }

    #[test]
    fn test_encode_layout() {
        let line = record(TransactionCode::Withdraw, "Jane Doe", "42", 20000).encode();
        assert_eq!(line, "01_Jane Doe  _000042_020000_SP");
    }

    #[test]
    fn test_encode_truncates_holder() {
        let line = record(TransactionCode::Transfer, "Maximilian Smith", "7", 5).encode();
        assert_eq!(line, "02_Maximilian_000007_000005_SP");
    }

    #[test]
    fn test_large_amount_widens() {
        let line = record(TransactionCode::CreateAccount, "Rich", "9", 9_999_999).encode();
        assert_eq!(line, "05_Rich      _000009_9999999_SP");
        assert_eq!(AuditRecord::decode(&line).unwrap().amount.cents(), 9_999_999);
    }

    #[test]
    fn test_end_of_session_line() {
        assert_eq!(
            AuditRecord::end_of_session().encode(),
            "00_END_OF_SE _000000_000000_ES"
        );
    }

    #[test]
    fn test_decode() {
        let decoded = AuditRecord::decode("03_Jane Doe  _000042_001550_SP").unwrap();
        assert_eq!(decoded, record(TransactionCode::PayBill, "Jane Doe", "42", 1550));

        let sentinel = AuditRecord::decode("00_END_OF_SE _000000_000000_ES").unwrap();
        assert_eq!(sentinel, AuditRecord::end_of_session());
    }

    #[test]
    fn test_decode_malformed() {
        assert!(AuditRecord::decode("garbage").is_err());
        assert!(AuditRecord::decode("99_Jane Doe  _000042_001550_SP").is_err());
        assert!(AuditRecord::decode("01-Jane Doe  _000042_001550_SP").is_err());
    }

    #[test]
    fn test_human_readable_format() {
        let formatted = record(TransactionCode::Deposit, "Jane", "42", 1050).format_human_readable();
        assert!(formatted.contains("Deposit"));
        assert!(formatted.contains("10.50"));
        assert!(formatted.contains("Jane"));
    }
}
