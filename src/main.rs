//! split-engine CLI
//!
//! Compute balances and settlement plans from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Balances and settlement plans from a JSON scenario file
//! split-engine balances --input scenario.json
//!
//! # Output as JSON, restricted to one group
//! split-engine balances --input scenario.json --group g1 --format json
//!
//! # Per-group spending summaries
//! split-engine summary --input scenario.json
//!
//! # Generate a random scenario for testing
//! split-engine generate --groups 3 --members 5 --expenses 20
//! ```

use rust_decimal::Decimal;
use split_engine::core::group::GroupId;
use split_engine::core::member::MemberName;
use split_engine::report::summary::GroupSummary;
use split_engine::settlement::planner::{SettlementPlanner, SETTLEMENT_EPSILON};
use split_engine::simulation::scenario::{generate_random_scenario, ScenarioConfig};
use split_engine::store::workspace::Workspace;
use std::fs;
use std::process;

fn print_usage() {
    eprintln!(
        r#"split-engine — group expense splitting and debt settlement planning

USAGE:
    split-engine <COMMAND> [OPTIONS]

COMMANDS:
    balances    Compute balances and settlement plans for every group
    summary     Report per-group spending summaries
    generate    Generate a random scenario (for testing)
    help        Show this message

OPTIONS (balances, summary):
    --input <FILE>      Path to JSON scenario file
    --group <ID>        Restrict output to one group
    --format <FORMAT>   Output format: text (default) or json

OPTIONS (generate):
    --groups <N>        Number of groups (default: 2)
    --members <N>       Members per group (default: 4)
    --expenses <N>      Expenses per group (default: 10)
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    split-engine balances --input scenario.json
    split-engine balances --input scenario.json --group g1 --format json
    split-engine summary --input scenario.json
    split-engine generate --groups 3 --members 5 --expenses 20 --output test.json"#
    );
}

/// JSON schema for input groups.
#[derive(serde::Deserialize)]
struct GroupInput {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    members: Vec<String>,
}

/// JSON schema for input expenses.
#[derive(serde::Deserialize)]
struct ExpenseInput {
    description: String,
    amount: String,
    paid_by: String,
    group_id: String,
    date: String,
    #[serde(default = "default_category")]
    category: String,
}

fn default_category() -> String {
    "Other".to_string()
}

#[derive(serde::Deserialize)]
struct ScenarioFile {
    groups: Vec<GroupInput>,
    expenses: Vec<ExpenseInput>,
}

/// JSON output schema for balances.
#[derive(serde::Serialize)]
struct GroupBalancesOutput {
    group: String,
    name: String,
    balances: Vec<MemberBalanceOutput>,
    settlements: Vec<SettlementOutput>,
}

#[derive(serde::Serialize)]
struct MemberBalanceOutput {
    member: String,
    balance: String,
    status: String,
}

#[derive(serde::Serialize)]
struct SettlementOutput {
    from: String,
    to: String,
    amount: String,
}

fn load_scenario(path: &str) -> Workspace {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: ScenarioFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "groups": [
    {{ "id": "g1", "name": "Roommates", "members": ["John", "Sara", "Miguel"] }}
  ],
  "expenses": [
    {{ "description": "Groceries", "amount": "89.75", "paid_by": "John",
       "group_id": "g1", "date": "2023-11-15", "category": "Food" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut workspace = Workspace::new();
    for group in file.groups {
        workspace
            .add_group(
                GroupId::new(&group.id),
                &group.name,
                group.description.as_deref(),
                group.members.iter().map(|m| MemberName::new(m.as_str())).collect(),
            )
            .unwrap_or_else(|e| {
                eprintln!("Invalid group '{}': {}", group.id, e);
                process::exit(1);
            });
    }
    for expense in file.expenses {
        let amount: Decimal = expense.amount.parse().unwrap_or_else(|e| {
            eprintln!("Invalid amount '{}': {}", expense.amount, e);
            process::exit(1);
        });
        let date = expense.date.parse().unwrap_or_else(|e| {
            eprintln!("Invalid date '{}': {}", expense.date, e);
            process::exit(1);
        });
        workspace
            .add_expense(
                &GroupId::new(&expense.group_id),
                &expense.description,
                amount,
                MemberName::new(&expense.paid_by),
                date,
                &expense.category,
            )
            .unwrap_or_else(|e| {
                eprintln!("Invalid expense '{}': {}", expense.description, e);
                process::exit(1);
            });
    }
    workspace
}

/// Parse the shared `--input` / `--group` / `--format` options.
fn parse_report_args(args: &[String]) -> (String, Option<String>, String) {
    let mut input_path = None;
    let mut group = None;
    let mut format = "text".to_string();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--group" => {
                i += 1;
                group = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--group requires a group id");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    (path, group, format)
}

/// The groups to report on, honoring `--group`.
fn selected_groups<'a>(
    workspace: &'a Workspace,
    group: &Option<String>,
) -> Vec<&'a split_engine::core::group::Group> {
    match group {
        Some(id) => {
            let id = GroupId::new(id.as_str());
            match workspace.group(&id) {
                Some(group) => vec![group],
                None => {
                    eprintln!("No group with id {}", id);
                    process::exit(1);
                }
            }
        }
        None => workspace.groups().iter().collect(),
    }
}

fn cmd_balances(args: &[String]) {
    let (path, group, format) = parse_report_args(args);
    let workspace = load_scenario(&path);
    let sheet = workspace.balances();

    let mut outputs = Vec::new();
    for group in selected_groups(&workspace, &group) {
        let balances = match sheet.group(group.id()) {
            Some(balances) => balances,
            None => continue,
        };
        let plan = SettlementPlanner::plan(balances);

        if format == "json" {
            outputs.push(GroupBalancesOutput {
                group: group.id().to_string(),
                name: group.name().to_string(),
                balances: balances
                    .iter()
                    .map(|(member, balance)| MemberBalanceOutput {
                        member: member.to_string(),
                        balance: balance.to_string(),
                        status: if balance >= SETTLEMENT_EPSILON {
                            "CREDITOR".to_string()
                        } else if balance <= -SETTLEMENT_EPSILON {
                            "DEBTOR".to_string()
                        } else {
                            "SETTLED".to_string()
                        },
                    })
                    .collect(),
                settlements: plan
                    .settlements()
                    .iter()
                    .map(|s| SettlementOutput {
                        from: s.from.to_string(),
                        to: s.to.to_string(),
                        amount: s.amount.to_string(),
                    })
                    .collect(),
            });
        } else {
            println!("=== {} ({}) ===", group.name(), group.id());
            for (member, balance) in balances.iter() {
                let marker = if balance > Decimal::ZERO { "+" } else { "" };
                println!("  {:<16} {}{}", member.to_string(), marker, balance);
            }
            println!();
            println!("{}", plan);
        }
    }

    if format == "json" {
        match serde_json::to_string_pretty(&outputs) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }
}

fn cmd_summary(args: &[String]) {
    let (path, group, format) = parse_report_args(args);
    let workspace = load_scenario(&path);

    let mut summaries = Vec::new();
    for group in selected_groups(&workspace, &group) {
        summaries.push(GroupSummary::for_group(group, workspace.expenses()));
    }

    if format == "json" {
        match serde_json::to_string_pretty(&summaries) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        for summary in &summaries {
            println!("{}", summary);
        }
    }
}

fn cmd_generate(args: &[String]) {
    let mut groups = 2usize;
    let mut members = 4usize;
    let mut expenses = 10usize;
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--groups" => {
                i += 1;
                groups = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--groups requires a number");
                    process::exit(1);
                });
            }
            "--members" => {
                i += 1;
                members = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--members requires a number");
                    process::exit(1);
                });
            }
            "--expenses" => {
                i += 1;
                expenses = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--expenses requires a number");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = ScenarioConfig {
        group_count: groups,
        members_per_group: members,
        expenses_per_group: expenses,
        ..Default::default()
    };

    let scenario = generate_random_scenario(&config);

    #[derive(serde::Serialize)]
    struct OutputGroup {
        id: String,
        name: String,
        members: Vec<String>,
    }

    #[derive(serde::Serialize)]
    struct OutputExpense {
        description: String,
        amount: String,
        paid_by: String,
        group_id: String,
        date: String,
        category: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        groups: Vec<OutputGroup>,
        expenses: Vec<OutputExpense>,
    }

    let output = OutputFile {
        groups: scenario
            .groups
            .iter()
            .map(|g| OutputGroup {
                id: g.id().to_string(),
                name: g.name().to_string(),
                members: g.members().iter().map(|m| m.to_string()).collect(),
            })
            .collect(),
        expenses: scenario
            .expenses
            .expenses()
            .iter()
            .map(|e| OutputExpense {
                description: e.description().to_string(),
                amount: e.amount().to_string(),
                paid_by: e.paid_by().to_string(),
                group_id: e.group_id().to_string(),
                date: e.date().to_string(),
                category: e.category().to_string(),
            })
            .collect(),
    };

    let json = match serde_json::to_string_pretty(&output) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error serializing scenario: {}", e);
            process::exit(1);
        }
    };

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!(
            "Generated {} expenses across {} groups → {}",
            scenario.expenses.len(),
            scenario.groups.len(),
            path
        );
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "balances" => cmd_balances(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
