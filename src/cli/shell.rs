//! Interactive numbered menu
//!
//! Each menu entry gathers its fields from the input and makes exactly one
//! engine call. Failures are printed and the menu continues; end of input
//! or `0` leaves the shell.

use std::io::{self, BufRead, Write};

use super::{with_session, SessionArgs};
use crate::config::{BankPaths, Settings};
use crate::display::{format_account_list, format_receipt};
use crate::error::{BankError, BankResult};
use crate::models::AccountType;
use crate::services::TransactionEngine;

const MENU: &str = "\
1) Create account
2) Delete account
3) Disable account
4) Withdraw
5) Deposit
6) Transfer
7) Pay bill
8) Change plan
9) View all accounts
0) Exit
";

/// Open a session and run the menu on stdin/stdout
pub fn handle_shell(paths: &BankPaths, settings: &Settings, session: &SessionArgs) -> BankResult<()> {
    with_session(paths, settings, session, |engine| {
        let stdin = io::stdin();
        run_shell(engine, stdin.lock(), io::stdout())
    })
}

/// Run the menu until `0` or end of input
pub fn run_shell<R: BufRead, W: Write>(
    engine: &mut TransactionEngine,
    mut input: R,
    mut output: W,
) -> BankResult<()> {
    writeln!(
        output,
        "Logged in as {} ({}) since {}",
        engine.operator().number,
        engine.operator().name,
        engine.session().started_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    loop {
        write!(output, "\n{}", MENU)?;
        let Some(choice) = prompt(&mut input, &mut output, "Select an option")? else {
            break;
        };

        let mut menu = Menu {
            engine: &mut *engine,
            input: &mut input,
            output: &mut output,
        };
        let outcome = match choice.as_str() {
            "0" | "exit" | "quit" => break,
            "1" => menu.create_account(),
            "2" => menu.delete_account(),
            "3" => menu.disable_account(),
            "4" => menu.withdraw(),
            "5" => menu.deposit(),
            "6" => menu.transfer(),
            "7" => menu.pay_bill(),
            "8" => menu.change_plan(),
            "9" => menu.view_all(),
            other => Ok(Some(format!("Unknown option '{}'\n", other))),
        };

        match outcome {
            Ok(Some(text)) => write!(output, "{}", text)?,
            Ok(None) => break,
            Err(e) => writeln!(output, "Error: {}", e)?,
        }
    }

    output.flush()?;
    Ok(())
}

/// Print `label` and read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> BankResult<Option<String>> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// One menu action's view of the session and terminal
struct Menu<'a, R, W> {
    engine: &'a mut TransactionEngine,
    input: &'a mut R,
    output: &'a mut W,
}

/// Read a field or give up on the action at end of input
macro_rules! field {
    ($menu:expr, $label:expr) => {
        match prompt(&mut *$menu.input, &mut *$menu.output, $label)? {
            Some(value) => value,
            None => return Ok(None),
        }
    };
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    /// Account number and holder, defaulting to the logged-in account
    fn target(&mut self) -> BankResult<Option<(String, String)>> {
        let operator = self.engine.operator().clone();
        let number = field!(self, &format!("Account number [{}]", operator.number));
        if number.is_empty() {
            return Ok(Some((operator.number.to_string(), operator.name)));
        }
        let holder = field!(self, "Account holder name");
        Ok(Some((number, holder)))
    }

    fn create_account(&mut self) -> BankResult<Option<String>> {
        let number = field!(self, "New account number");
        let name = field!(self, "Account holder name");
        let account_type = field!(self, "Account type [basic]");
        let balance = field!(self, "Initial balance");

        let account_type = if account_type.is_empty() {
            AccountType::Basic
        } else {
            AccountType::parse(&account_type)
                .ok_or_else(|| BankError::InvalidAccountType(account_type.clone()))?
        };

        let receipt = self
            .engine
            .create_account(&number, &name, account_type, &balance)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn delete_account(&mut self) -> BankResult<Option<String>> {
        let number = field!(self, "Account number");
        let name = field!(self, "Account holder name");
        let receipt = self.engine.delete_account(&number, &name)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn disable_account(&mut self) -> BankResult<Option<String>> {
        let number = field!(self, "Account number");
        let name = field!(self, "Account holder name");
        let receipt = self.engine.disable_account(&number, &name)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn withdraw(&mut self) -> BankResult<Option<String>> {
        let Some((number, holder)) = self.target()? else {
            return Ok(None);
        };
        let amount = field!(self, "Amount");
        let receipt = self.engine.withdraw(&number, &holder, &amount)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn deposit(&mut self) -> BankResult<Option<String>> {
        let Some((number, holder)) = self.target()? else {
            return Ok(None);
        };
        let amount = field!(self, "Amount");
        let receipt = self.engine.deposit(&number, &holder, &amount)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn transfer(&mut self) -> BankResult<Option<String>> {
        let Some((number, holder)) = self.target()? else {
            return Ok(None);
        };
        let to = field!(self, "Destination account number");
        let amount = field!(self, "Amount");
        let receipt = self.engine.transfer(&number, &holder, &to, &amount)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn pay_bill(&mut self) -> BankResult<Option<String>> {
        let Some((number, holder)) = self.target()? else {
            return Ok(None);
        };
        for payee in self.engine.config().payees.entries() {
            writeln!(self.output, "  {}", payee)?;
        }
        let payee = field!(self, "Payee");
        let amount = field!(self, "Amount");
        let receipt = self.engine.pay_bill(&number, &holder, &payee, &amount)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn change_plan(&mut self) -> BankResult<Option<String>> {
        let number = field!(self, "Account number");
        let name = field!(self, "Account holder name");
        let receipt = self.engine.change_plan(&number, &name)?;
        Ok(Some(format_receipt(&receipt)))
    }

    fn view_all(&mut self) -> BankResult<Option<String>> {
        let accounts = self.engine.view_all()?;
        Ok(Some(format_account_list(&accounts)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditLogger;
    use crate::models::{AccountNumber, Money};
    use crate::services::{AdminPolicy, EngineConfig};
    use crate::storage::{initialize_ledger, ledger_for, Ledger};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn admin_engine(paths: &BankPaths) -> TransactionEngine {
        TransactionEngine::begin_session(
            ledger_for(paths),
            EngineConfig::with_policy(AdminPolicy::AccountType),
            Some(AuditLogger::new(paths.audit_log())),
            "1",
            "Admin",
        )
        .unwrap()
    }

    fn run(engine: &mut TransactionEngine, script: &str) -> String {
        let mut output = Vec::new();
        run_shell(engine, Cursor::new(script.as_bytes()), &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn setup() -> (TempDir, BankPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BankPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_ledger(&paths).unwrap();
        (temp_dir, paths)
    }

    #[test]
    fn test_withdraw_defaults_to_operator() {
        let (_temp_dir, paths) = setup();
        let mut engine = admin_engine(&paths);

        let output = run(&mut engine, "4\n\n100\n9\n0\n");
        let started = engine.session().started_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        assert!(output.contains(&format!("Logged in as 1 (Admin) since {}", started)));
        assert!(output.contains("Withdraw complete"));
        assert!(output.contains("$900.00"));

        let ledger = Ledger::open(paths.ledger_file(), paths.account_types_file()).unwrap();
        assert_eq!(
            ledger.find(&AccountNumber::parse("1").unwrap()).unwrap().balance,
            Money::from_cents(90_000)
        );
    }

    #[test]
    fn test_errors_keep_the_menu_running() {
        let (_temp_dir, paths) = setup();
        let mut engine = admin_engine(&paths);

        let output = run(&mut engine, "4\n\nabc\n7\n\nWater Co\n5\n42\n0\n");
        assert!(output.contains("Error: Invalid amount: 'abc'"));
        assert!(output.contains("Error: Invalid payee: 'Water Co'"));
        assert!(output.contains("Unknown option '42'"));
    }

    #[test]
    fn test_create_then_transfer() {
        let (_temp_dir, paths) = setup();
        let mut engine = admin_engine(&paths);

        let output = run(
            &mut engine,
            "1\n7\nJane Doe\nstudent-plan\n10\n6\n\n7\n25\n",
        );
        assert!(output.contains("Create Account complete"));
        assert!(output.contains("Transfer complete"));
        assert!(output.contains("To:       00007 (Jane Doe), balance $35.00"));
    }

    #[test]
    fn test_unknown_account_type() {
        let (_temp_dir, paths) = setup();
        let mut engine = admin_engine(&paths);

        let output = run(&mut engine, "1\n7\nJane Doe\nplatinum\n10\n0\n");
        assert!(output.contains("Error: Invalid account type: 'platinum'"));
        assert!(!output.contains("Configuration error"));
        let ledger = Ledger::open(paths.ledger_file(), paths.account_types_file()).unwrap();
        assert!(ledger.find(&AccountNumber::parse("7").unwrap()).is_none());
    }

    #[test]
    fn test_end_of_input_mid_action() {
        let (_temp_dir, paths) = setup();
        let mut engine = admin_engine(&paths);

        let output = run(&mut engine, "2\n42\n");
        assert!(!output.contains("Error"));
    }
}
