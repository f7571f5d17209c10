//! Account display formatting
//!
//! Formats accounts for terminal output in table and detail views.

use crate::models::{Account, Money};

/// Format accounts as a table with a total row
pub fn format_account_list(accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return "No accounts found.".to_string();
    }

    let name_width = accounts
        .iter()
        .map(|a| a.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let type_width = accounts
        .iter()
        .map(|a| a.account_type.to_string().len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<6} {:<name_width$}  {:<type_width$}  {:<8}  {:>12}  {:>6}\n",
        "Number",
        "Name",
        "Type",
        "Status",
        "Balance",
        "Txns",
        name_width = name_width,
        type_width = type_width,
    ));

    let rule = format!(
        "{:-<6} {:-<name_width$}  {:-<type_width$}  {:-<8}  {:->12}  {:->6}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
        type_width = type_width,
    );
    output.push_str(&rule);

    for account in accounts {
        output.push_str(&format!(
            "{:<6} {:<name_width$}  {:<type_width$}  {:<8}  {:>12}  {:>6}\n",
            account.number.padded(5),
            account.name,
            account.account_type,
            account.status,
            account.balance.format_with_symbol("$"),
            account.total_transactions,
            name_width = name_width,
            type_width = type_width,
        ));
    }

    let total: Money = accounts.iter().map(|a| a.balance).sum();
    output.push_str(&rule);
    output.push_str(&format!(
        "{:<6} {:<name_width$}  {:<type_width$}  {:<8}  {:>12}\n",
        "TOTAL",
        "",
        "",
        "",
        total.format_with_symbol("$"),
        name_width = name_width,
        type_width = type_width,
    ));

    output
}

/// Format a single account's details
pub fn format_account_details(account: &Account) -> String {
    let mut output = String::new();

    output.push_str(&format!("Account: {}\n", account.number.padded(5)));
    output.push_str(&format!("  Holder:       {}\n", account.name));
    output.push_str(&format!("  Type:         {}\n", account.account_type));
    output.push_str(&format!("  Status:       {}\n", account.status));
    output.push_str(&format!(
        "  Balance:      {}\n",
        account.balance.format_with_symbol("$")
    ));
    output.push_str(&format!(
        "  Transactions: {}\n",
        account.total_transactions
    ));

    output
}
