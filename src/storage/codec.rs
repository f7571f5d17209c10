//! Fixed-width record codec
//!
//! One ledger line holds one account:
//!
//! ```text
//! <acct:5> <name:20> <status:1> <balance:10> <txns:5>
//! 00001 Admin                A 1000.00    00000
//! ```
//!
//! Widths are counted in characters. The account number and transaction count
//! are zero-padded, the name and balance are left-justified and space-padded.

use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountNumber, AccountStatus, AccountType, Money, MAX_NAME_LEN};

pub const ACCOUNT_WIDTH: usize = 5;
pub const NAME_WIDTH: usize = MAX_NAME_LEN;
pub const STATUS_WIDTH: usize = 1;
pub const BALANCE_WIDTH: usize = 10;
pub const COUNT_WIDTH: usize = 5;

/// Total characters in a record, excluding the line terminator
pub const RECORD_WIDTH: usize =
    ACCOUNT_WIDTH + NAME_WIDTH + STATUS_WIDTH + BALANCE_WIDTH + COUNT_WIDTH + 4;

const MAX_COUNT: u32 = 99_999;

/// Field layout as (start, end) character offsets
const ACCOUNT_FIELD: (usize, usize) = (0, ACCOUNT_WIDTH);
const NAME_FIELD: (usize, usize) = (ACCOUNT_FIELD.1 + 1, ACCOUNT_FIELD.1 + 1 + NAME_WIDTH);
const STATUS_FIELD: (usize, usize) = (NAME_FIELD.1 + 1, NAME_FIELD.1 + 1 + STATUS_WIDTH);
const BALANCE_FIELD: (usize, usize) = (STATUS_FIELD.1 + 1, STATUS_FIELD.1 + 1 + BALANCE_WIDTH);
const COUNT_FIELD: (usize, usize) = (BALANCE_FIELD.1 + 1, BALANCE_FIELD.1 + 1 + COUNT_WIDTH);

const SEPARATORS: [usize; 4] = [ACCOUNT_FIELD.1, NAME_FIELD.1, STATUS_FIELD.1, BALANCE_FIELD.1];

/// Parses and serializes ledger lines
pub struct RecordCodec;

impl RecordCodec {
    /// Decode one ledger line into an account record
    ///
    /// Trailing whitespace and line terminators are stripped before the
    /// width check. The decoded record has type `basic`; the ledger applies
    /// the persisted plan type afterwards.
    pub fn decode(line: &str) -> BankResult<Account> {
        let chars: Vec<char> = line.trim_end().chars().collect();
        if chars.len() != RECORD_WIDTH {
            return Err(BankError::MalformedLength {
                expected: RECORD_WIDTH,
                actual: chars.len(),
            });
        }

        for &position in &SEPARATORS {
            if chars[position] != ' ' {
                return Err(BankError::MalformedSeparator(position + 1));
            }
        }

        let field = |(start, end): (usize, usize)| -> String { chars[start..end].iter().collect() };

        let number_field = field(ACCOUNT_FIELD);
        if !number_field.chars().all(|c| c.is_ascii_digit()) {
            return Err(BankError::InvalidAccountNumber(number_field));
        }
        let number = AccountNumber::parse(&number_field)?;

        let name = field(NAME_FIELD).trim_end().to_string();

        let status = AccountStatus::from_code(&field(STATUS_FIELD))?;

        let balance_field = field(BALANCE_FIELD);
        let balance_text = balance_field.trim_end();
        let balance = Money::parse_fixed(balance_text)
            .map_err(|_| BankError::InvalidBalanceFormat(balance_text.to_string()))?;
        if balance.is_negative() {
            return Err(BankError::NegativeBalance(balance));
        }
        if !balance.is_valid_balance() {
            return Err(BankError::InvalidBalanceRange(balance));
        }

        let count_field = field(COUNT_FIELD);
        if !count_field.chars().all(|c| c.is_ascii_digit()) {
            return Err(BankError::InvalidTransactionCount(count_field));
        }
        let total_transactions = count_field
            .parse::<u32>()
            .map_err(|_| BankError::InvalidTransactionCount(count_field.clone()))?;

        Ok(Account {
            number,
            name,
            status,
            balance,
            account_type: AccountType::Basic,
            total_transactions,
        })
    }

    /// Encode an account record as one ledger line (without terminator)
    pub fn encode(account: &Account) -> BankResult<String> {
        let number = account.number.as_str();
        if number.is_empty()
            || number.len() > ACCOUNT_WIDTH
            || !number.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(BankError::InvalidAccountNumber(number.to_string()));
        }

        let name_length = account.name.chars().count();
        if name_length > NAME_WIDTH {
            return Err(BankError::NameTooLong {
                length: name_length,
                max: NAME_WIDTH,
            });
        }

        if !account.balance.is_valid_balance() {
            return Err(BankError::InvalidBalanceRange(account.balance));
        }

        if account.total_transactions > MAX_COUNT {
            return Err(BankError::InvalidTransactionCount(
                account.total_transactions.to_string(),
            ));
        }

        Ok(format!(
            "{} {:<name_width$} {} {:<balance_width$} {:0count_width$}",
            account.number.padded(ACCOUNT_WIDTH),
            account.name,
            account.status.code(),
            account.balance.to_string(),
            account.total_transactions,
            name_width = NAME_WIDTH,
            balance_width = BALANCE_WIDTH,
            count_width = COUNT_WIDTH,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN_LINE: &str = "00001 Admin                A 1000.00    00000";

    fn sample() -> Account {
        Account {
            number: AccountNumber::parse("42").unwrap(),
            name: "Jane Doe".into(),
            status: AccountStatus::Active,
            balance: Money::from_cents(12345),
            account_type: AccountType::Basic,
            total_transactions: 7,
        }
    }

    #[test]
    fn test_record_width() {
        assert_eq!(RECORD_WIDTH, 45);
        assert_eq!(ADMIN_LINE.len(), RECORD_WIDTH);
    }

    #[test]
    fn test_decode_valid_line() {
        let account = RecordCodec::decode(ADMIN_LINE).unwrap();
        assert_eq!(account.number.as_str(), "1");
        assert_eq!(account.name, "Admin");
        assert_eq!(account.status, AccountStatus::Active);
        assert_eq!(account.balance.cents(), 100000);
        assert_eq!(account.total_transactions, 0);
    }

    #[test]
    fn test_decode_strips_terminator() {
        let line = format!("{}\r\n", ADMIN_LINE);
        assert!(RecordCodec::decode(&line).is_ok());
    }

    #[test]
    fn test_decode_wrong_length() {
        assert_eq!(
            RecordCodec::decode("00001 Admin A 10.00 00000"),
            Err(BankError::MalformedLength {
                expected: 45,
                actual: 25
            })
        );
    }

    #[test]
    fn test_decode_bad_separator() {
        let line = "00001_Admin                A 1000.00    00000";
        assert_eq!(
            RecordCodec::decode(line),
            Err(BankError::MalformedSeparator(6))
        );
    }

    #[test]
    fn test_decode_invalid_status() {
        let line = "00001 Admin                X 1000.00    00000";
        assert_eq!(
            RecordCodec::decode(line),
            Err(BankError::InvalidStatus("X".into()))
        );
    }

    #[test]
    fn test_decode_invalid_balance() {
        let line = "00001 Admin                A 10.0O      00000";
        assert!(matches!(
            RecordCodec::decode(line),
            Err(BankError::InvalidBalanceFormat(_))
        ));
    }

    #[test]
    fn test_decode_negative_balance() {
        let line = "00001 Admin                A -5.00      00000";
        assert_eq!(
            RecordCodec::decode(line),
            Err(BankError::NegativeBalance(Money::from_cents(-500)))
        );
    }

    #[test]
    fn test_decode_invalid_account_and_count() {
        let line = "0A001 Admin                A 1000.00    00000";
        assert!(matches!(
            RecordCodec::decode(line),
            Err(BankError::InvalidAccountNumber(_))
        ));

        let line = "00001 Admin                A 1000.00    0x000";
        assert!(matches!(
            RecordCodec::decode(line),
            Err(BankError::InvalidTransactionCount(_))
        ));
    }

    #[test]
    fn test_encode_layout() {
        let line = RecordCodec::encode(&sample()).unwrap();
        assert_eq!(line, "00042 Jane Doe             A 123.45     00007");
        assert_eq!(line.chars().count(), RECORD_WIDTH);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let decoded = RecordCodec::decode(ADMIN_LINE).unwrap();
        assert_eq!(RecordCodec::encode(&decoded).unwrap(), ADMIN_LINE);

        let line = RecordCodec::encode(&sample()).unwrap();
        assert_eq!(RecordCodec::decode(&line).unwrap(), sample());
    }

    #[test]
    fn test_round_trip_maximums() {
        let line = "99999 ABCDEFGHIJKLMNOPQRST D 99999.99   99999";
        let decoded = RecordCodec::decode(line).unwrap();
        assert_eq!(RecordCodec::encode(&decoded).unwrap(), line);
    }

    #[test]
    fn test_round_trip_non_ascii_name() {
        let mut account = sample();
        account.name = "Zoë Ångström".into();
        let line = RecordCodec::encode(&account).unwrap();
        assert_eq!(line.chars().count(), RECORD_WIDTH);
        assert_eq!(RecordCodec::decode(&line).unwrap().name, "Zoë Ångström");
    }

    #[test]
    fn test_encode_rejects_wide_number() {
        let mut account = sample();
        account.number = AccountNumber::parse("123456").unwrap();
        assert_eq!(
            RecordCodec::encode(&account),
            Err(BankError::InvalidAccountNumber("123456".into()))
        );
    }

    #[test]
    fn test_encode_rejects_long_name() {
        let mut account = sample();
        account.name = "x".repeat(21);
        assert_eq!(
            RecordCodec::encode(&account),
            Err(BankError::NameTooLong { length: 21, max: 20 })
        );
    }

    #[test]
    fn test_encode_rejects_balance_out_of_range() {
        let mut account = sample();
        account.balance = Money::from_cents(-1);
        assert!(matches!(
            RecordCodec::encode(&account),
            Err(BankError::InvalidBalanceRange(_))
        ));

        account.balance = Money::from_cents(10_000_000);
        assert!(matches!(
            RecordCodec::encode(&account),
            Err(BankError::InvalidBalanceRange(_))
        ));
    }

    #[test]
    fn test_encode_rejects_count_overflow() {
        let mut account = sample();
        account.total_transactions = 100_000;
        assert!(matches!(
            RecordCodec::encode(&account),
            Err(BankError::InvalidTransactionCount(_))
        ));
    }
}
