use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "planner", version, about = "Resource-capacity planner")]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        value_name = "NAME",
        help = "Only list or export budgets in this category"
    )]
    pub category: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Report(ReportCommand),
    /// Recompute capacity whenever the data files change
    Watch,
}

/// Commands that read one snapshot and print a single report.
#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Required vs available monthly hours per labor type
    Capacity,
    /// Assigned vs available monthly hours per person
    Workload,
    /// Hours per month each person is occupied
    Occupation,
    /// Projected finish date of a budget
    Project {
        budget_id: String,
    },
    /// Budgets a person is assigned to
    Assignments {
        person_id: String,
    },
    /// Budgets with their status and total hours
    Budgets,
    /// Budgeted hours summed per labor type
    HoursByType,
    /// Distinct budget categories
    Categories,
    /// Write budgets to a CSV file
    Export {
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["planner", "export", "--category", "Civil", "--json"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.category.as_deref(), Some("Civil"));
        assert!(matches!(
            cli.command,
            Commands::Report(ReportCommand::Export { out: None })
        ));
    }

    #[test]
    fn test_project_requires_budget_id() {
        assert!(Cli::try_parse_from(["planner", "project"]).is_err());
    }

    #[test]
    fn test_kebab_case_subcommand() {
        let cli = Cli::try_parse_from(["planner", "hours-by-type"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Report(ReportCommand::HoursByType)
        ));
    }

    #[test]
    fn test_watch_is_its_own_command() {
        let cli = Cli::try_parse_from(["planner", "watch", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Watch));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
