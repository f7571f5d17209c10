//! Transaction display formatting
//!
//! Receipts for committed operations and transaction log listings.

use crate::audit::{AuditRecord, TransactionCode};
use crate::services::Receipt;

/// Format the outcome of a committed operation
pub fn format_receipt(receipt: &Receipt) -> String {
    let record = &receipt.record;
    let account = &receipt.account;
    let mut output = String::new();

    output.push_str(&format!("{} complete\n", record.code));
    output.push_str(&format!(
        "  Account:  {} ({})\n",
        account.number.padded(5),
        account.name
    ));

    match record.code {
        TransactionCode::ChangePlan | TransactionCode::DisableAccount => {}
        _ => output.push_str(&format!(
            "  Amount:   {}\n",
            record.amount.format_with_symbol("$")
        )),
    }

    match record.code {
        TransactionCode::Deposit => output.push_str(&format!(
            "  Balance:  {} (deposit available next session)\n",
            account.balance.format_with_symbol("$")
        )),
        TransactionCode::DeleteAccount => output.push_str("  Account removed\n"),
        TransactionCode::DisableAccount => {
            output.push_str(&format!("  Status:   {}\n", account.status))
        }
        TransactionCode::ChangePlan => {
            output.push_str(&format!("  Plan:     {}\n", account.account_type))
        }
        _ => output.push_str(&format!(
            "  Balance:  {}\n",
            account.balance.format_with_symbol("$")
        )),
    }

    if let Some(destination) = &receipt.destination {
        output.push_str(&format!(
            "  To:       {} ({}), balance {}\n",
            destination.number.padded(5),
            destination.name,
            destination.balance.format_with_symbol("$")
        ));
    }

    output
}

/// Format transaction log records, one per line
pub fn format_audit_log(records: &[AuditRecord]) -> String {
    if records.is_empty() {
        return "No transactions logged.\n".to_string();
    }

    let mut output = String::new();
    for record in records {
        output.push_str(&format!(
            "{}  {}\n",
            record.encode(),
            record.format_human_readable()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountNumber, AccountType, Money};

    fn receipt(code: TransactionCode, destination: Option<Account>) -> Receipt {
        let account = Account::new(
            AccountNumber::parse("42").unwrap(),
            "Jane Doe",
            AccountType::Basic,
            Money::from_cents(80_000),
        );
        Receipt {
            record: AuditRecord::new(code, "Jane Doe", &account.number, Money::from_cents(20_000), "SP"),
            account,
            destination,
        }
    }

    #[test]
    fn test_format_withdraw_receipt() {
        let output = format_receipt(&receipt(TransactionCode::Withdraw, None));
        assert!(output.starts_with("Withdraw complete"));
        assert!(output.contains("00042 (Jane Doe)"));
        assert!(output.contains("Amount:   $200.00"));
        assert!(output.contains("Balance:  $800.00"));
    }

    #[test]
    fn test_format_transfer_receipt() {
        let destination = Account::new(
            AccountNumber::parse("7").unwrap(),
            "John Roe",
            AccountType::Basic,
            Money::from_cents(20_000),
        );
        let output = format_receipt(&receipt(TransactionCode::Transfer, Some(destination)));
        assert!(output.contains("To:       00007 (John Roe), balance $200.00"));
    }

    #[test]
    fn test_format_deposit_receipt() {
        let output = format_receipt(&receipt(TransactionCode::Deposit, None));
        assert!(output.contains("available next session"));
    }

    #[test]
    fn test_format_audit_log() {
        assert!(format_audit_log(&[]).contains("No transactions"));

        let output = format_audit_log(&[AuditRecord::end_of_session()]);
        assert!(output.contains("00_END_OF_SE _000000_000000_ES"));
    }
}
