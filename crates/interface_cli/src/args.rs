use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use core_kernel::{JournalEntryId, Money};

/// Keep double-entry books from the command line
#[derive(Parser, Debug)]
#[command(name = "ledger")]
#[command(about = "Keep double-entry books from the command line", long_about = None)]
pub struct Cli {
    /// Ledger data file (overrides LEDGER_DATA_FILE)
    #[arg(long = "data-file", value_name = "FILE", global = true)]
    pub data_file: Option<PathBuf>,

    /// Backup directory (overrides LEDGER_BACKUP_DIR)
    #[arg(long = "backup-dir", value_name = "DIR", global = true)]
    pub backup_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Post a balanced journal entry
    Post {
        #[arg(long, short = 'm')]
        description: String,

        /// Entry date, today when omitted
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Debit line; the account is a code or a name
        #[arg(long = "debit", value_name = "ACCOUNT=AMOUNT", value_parser = parse_line, required = true)]
        debits: Vec<LineArg>,

        /// Credit line; the account is a code or a name
        #[arg(long = "credit", value_name = "ACCOUNT=AMOUNT", value_parser = parse_line, required = true)]
        credits: Vec<LineArg>,
    },

    /// Post the mirror image of a posted entry
    Reverse {
        #[arg(value_name = "ENTRY_ID")]
        id: JournalEntryId,

        #[arg(long)]
        reason: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// Show the trial balance
    TrialBalance {
        #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },

    /// Show the income statement for a period
    IncomeStatement {
        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<NaiveDate>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<NaiveDate>,
    },

    /// Show the balance sheet
    BalanceSheet {
        #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,
    },

    /// Show the movements of one account with a running balance
    Statement {
        #[arg(value_name = "ACCOUNT")]
        account: String,

        #[arg(long, value_name = "YYYY-MM-DD")]
        from: Option<NaiveDate>,

        #[arg(long, value_name = "YYYY-MM-DD")]
        to: Option<NaiveDate>,
    },

    /// Show every account as a T-account
    TAccounts,

    /// List posted entries, newest first
    Journal {
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },

    /// List the chart of accounts with balances
    Accounts,

    /// Post straight-line depreciation on Equipment
    Depreciate {
        #[arg(long = "as-of", value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        /// Useful life (overrides LEDGER_DEPRECIATION_LIFE_YEARS)
        #[arg(long = "life-years", value_name = "YEARS")]
        life_years: Option<u32>,

        #[arg(long, value_name = "N", default_value_t = 1)]
        months: u32,

        #[arg(long, value_name = "AMOUNT")]
        salvage: Option<Money>,
    },

    /// Close revenue and expense accounts into equity
    Close {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Equity account receiving net income (default: Retained Earnings)
        #[arg(long = "into", value_name = "ACCOUNT")]
        into: Option<String>,
    },

    /// Replace the books with a sample trading scenario
    Demo {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },
}

impl Command {
    /// True for commands that change the books and must be saved
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Post { .. }
                | Command::Reverse { .. }
                | Command::Depreciate { .. }
                | Command::Close { .. }
                | Command::Demo { .. }
        )
    }
}

/// One `ACCOUNT=AMOUNT` line of a posted entry
#[derive(Debug, Clone, PartialEq)]
pub struct LineArg {
    pub account: String,
    pub amount: Money,
}

/// Parses `ACCOUNT=AMOUNT`, splitting on the last `=` so names may contain one
pub fn parse_line(s: &str) -> Result<LineArg, String> {
    let (account, amount) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected ACCOUNT=AMOUNT, got '{}'", s))?;
    let account = account.trim();
    if account.is_empty() {
        return Err(format!("missing account in '{}'", s));
    }
    let amount = amount.parse::<Money>().map_err(|e| e.to_string())?;
    Ok(LineArg {
        account: account.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_line() {
        let line = parse_line("1000=1,250.5").unwrap();
        assert_eq!(line.account, "1000");
        assert_eq!(line.amount, Money::new(dec!(1250.50)));

        let named = parse_line("Owner's Equity=10").unwrap();
        assert_eq!(named.account, "Owner's Equity");
    }

    #[test]
    fn test_parse_line_errors() {
        assert!(parse_line("1000").is_err());
        assert!(parse_line("=10").is_err());
        assert!(parse_line("1000=ten").is_err());
    }

    #[test]
    fn test_post_parsing() {
        let cli = Cli::try_parse_from([
            "ledger",
            "post",
            "-m",
            "Sale",
            "--date",
            "2024-01-15",
            "--debit",
            "1000=400",
            "--debit",
            "1100=200",
            "--credit",
            "Sales Revenue=600",
        ])
        .unwrap();

        match cli.command {
            Command::Post {
                description,
                date,
                debits,
                credits,
            } => {
                assert_eq!(description, "Sale");
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15));
                assert_eq!(debits.len(), 2);
                assert_eq!(credits[0].account, "Sales Revenue");
            }
            other => panic!("Expected post, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ledger", "accounts", "--data-file", "books.json"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("books.json")));
        assert!(!cli.command.is_mutating());
    }

    #[test]
    fn test_depreciate_defaults() {
        let cli = Cli::try_parse_from(["ledger", "depreciate"]).unwrap();
        match cli.command {
            Command::Depreciate {
                as_of,
                life_years,
                months,
                salvage,
            } => {
                assert_eq!(as_of, None);
                assert_eq!(life_years, None);
                assert_eq!(months, 1);
                assert_eq!(salvage, None);
            }
            other => panic!("Expected depreciate, got {:?}", other),
        }
    }

    #[test]
    fn test_parsing_errors() {
        for args in [
            vec!["ledger"],
            vec!["ledger", "post", "-m", "x", "--debit", "1000=1"],
            vec!["ledger", "trial-balance", "--as-of", "31/01/2024"],
            vec!["ledger", "reverse", "not-an-id", "--reason", "typo"],
        ] {
            assert!(Cli::try_parse_from(&args).is_err(), "{:?} should fail", args);
        }
    }
}
