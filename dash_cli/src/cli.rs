use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dash_core::{
    Command, CommandOutcome, Dashboard, DashboardModel, DashboardSettings, PanelDefinition, PanelEditorValues,
    PanelGroupItemId,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dash_cli", about = "Edit dashboard panel models from the command line", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay a command script against a dashboard model.
    Apply(ApplyArgs),

    /// Check a dashboard model for structural errors.
    Validate(ValidateArgs),

    /// Build a small dashboard through the panel editor and print it.
    Demo,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// JSON array of commands
    #[arg(long)]
    pub script: PathBuf,

    /// Starting model; an empty dashboard when omitted
    #[arg(long)]
    pub dashboard: Option<PathBuf>,

    /// Dashboard settings overriding the defaults
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Keep going after a failed command instead of stopping
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Model to check
    pub dashboard: PathBuf,
}

/// Result of one script step
#[derive(Debug, Serialize)]
struct StepReport {
    step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<CommandOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<serde_json::Value>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let output = match cli.command {
        Commands::Apply(args) => run_apply(&args)?,
        Commands::Validate(args) => run_validate(&args)?,
        Commands::Demo => run_demo()?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn load_dashboard(args: &ApplyArgs) -> Result<Dashboard> {
    let mut dashboard = match &args.dashboard {
        Some(path) => {
            let model: DashboardModel = read_json(path)?;
            Dashboard::from_model(path.display().to_string(), model)?
        }
        None => Dashboard::new("untitled"),
    };
    if let Some(path) = &args.settings {
        let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        dashboard = dashboard.with_settings(DashboardSettings::from_json(&text)?);
    }
    Ok(dashboard)
}

fn run_apply(args: &ApplyArgs) -> Result<serde_json::Value> {
    let mut dashboard = load_dashboard(args)?;
    let commands: Vec<Command> = read_json(&args.script)?;
    info!(commands = commands.len(), "replaying script");

    let mut steps = Vec::with_capacity(commands.len());
    for (step, command) in commands.into_iter().enumerate() {
        match dashboard.execute(command) {
            Ok(outcome) => steps.push(StepReport {
                step,
                outcome: Some(outcome),
                error: None,
            }),
            Err(err) if args.keep_going => steps.push(StepReport {
                step,
                outcome: None,
                error: Some(serde_json::to_value(&err)?),
            }),
            Err(err) => {
                return Err(anyhow::Error::new(err).context(format!("step {} failed", step)));
            }
        }
    }

    Ok(json!({
        "steps": steps,
        "editor": dashboard.panel_editor(),
        "model": dashboard.model(),
    }))
}

fn run_validate(args: &ValidateArgs) -> Result<serde_json::Value> {
    let model: DashboardModel = read_json(&args.dashboard)?;
    Ok(match model.validate() {
        Ok(()) => json!({ "valid": true }),
        Err(err) => json!({ "valid": false, "code": err.error_code(), "error": err.to_string() }),
    })
}

/// Two groups, a CPU panel added to an empty dashboard, then moved.
fn run_demo() -> Result<serde_json::Value> {
    let mut dashboard = Dashboard::new("demo");

    let session = dashboard.open_add_panel(None)?;
    let first = dashboard
        .panel_editor()
        .initial_values()
        .map(|values| values.group_id.clone())
        .context("editor has no initial values")?;
    let cpu = PanelDefinition::named("CPU").with_plugin("TimeSeriesChart", json!({}));
    dashboard.apply_changes(session, PanelEditorValues::new(first.clone(), cpu))?;
    dashboard.close_panel_editor(session)?;

    let network = dashboard.add_panel_group("Network")?;
    let item = dashboard
        .panel_groups()
        .get(&first)?
        .item_layouts()
        .first()
        .map(|item| item.i.clone())
        .context("demo panel was not placed")?;

    let session = dashboard.open_edit_panel(&PanelGroupItemId::new(first, item))?;
    let mut values = dashboard
        .panel_editor()
        .initial_values()
        .cloned()
        .context("editor has no initial values")?;
    values.group_id = network;
    dashboard.apply_changes(session, values)?;
    dashboard.close_panel_editor(session)?;

    dashboard.validate()?;
    Ok(serde_json::to_value(dashboard.model())?)
}

#[cfg(test)]
mod tests {
    use tempfile::{tempdir, TempDir};

    use super::*;

    fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write fixture");
        path
    }

    #[test]
    fn test_fixtures_are_removed_with_their_dir() {
        let temp = tempdir().expect("tempdir");
        let script = write_fixture(&temp, "script.json", "[]");
        let args = ApplyArgs {
            script: script.clone(),
            dashboard: None,
            settings: None,
            keep_going: false,
        };
        assert!(run_apply(&args).unwrap()["steps"].as_array().unwrap().is_empty());

        temp.close().expect("remove tempdir");
        assert!(!script.exists());
    }

    #[test]
    fn test_demo_moves_panel_into_second_group() {
        let model: DashboardModel = serde_json::from_value(run_demo().unwrap()).unwrap();
        model.validate().unwrap();
        assert_eq!(model.groups.len(), 2);

        let network = model.groups.iter_ordered().nth(1).unwrap();
        assert_eq!(network.title, "Network");
        assert_eq!(network.len(), 1);
        assert!(model.groups.iter_ordered().next().unwrap().is_empty());
    }

    #[test]
    fn test_apply_script_on_empty_dashboard() {
        let temp = tempdir().expect("tempdir");
        let script = write_fixture(
            &temp,
            "script.json",
            r#"[
                { "command": "add_panel_group", "title": "Hosts" },
                { "command": "open_add_panel" },
                { "command": "close_panel_editor" }
            ]"#,
        );
        let args = ApplyArgs {
            script,
            dashboard: None,
            settings: None,
            keep_going: false,
        };

        let output = run_apply(&args).unwrap();
        assert_eq!(output["steps"].as_array().unwrap().len(), 3);
        assert_eq!(output["editor"]["state"], "closed");
        assert!(output["model"]["panels"].as_object().unwrap().is_empty());
    }

    #[test]
    fn test_apply_stops_on_first_error() {
        let temp = tempdir().expect("tempdir");
        let script = write_fixture(
            &temp,
            "failing.json",
            r#"[
                { "command": "close_panel_editor" },
                { "command": "add_panel_group", "title": "never" }
            ]"#,
        );
        let args = ApplyArgs {
            script,
            dashboard: None,
            settings: None,
            keep_going: false,
        };
        let err = run_apply(&args).unwrap_err();
        assert!(err.to_string().contains("step 0"));
    }

    #[test]
    fn test_apply_keep_going_reports_errors() {
        let temp = tempdir().expect("tempdir");
        let script = write_fixture(
            &temp,
            "keep_going.json",
            r#"[
                { "command": "close_panel_editor" },
                { "command": "add_panel_group", "title": "after" }
            ]"#,
        );
        let args = ApplyArgs {
            script,
            dashboard: None,
            settings: None,
            keep_going: true,
        };
        let output = run_apply(&args).unwrap();
        assert_eq!(output["steps"][0]["error"]["type"], "SessionNotActive");
        assert_eq!(output["steps"][1]["outcome"]["outcome"], "group_added");
    }

    #[test]
    fn test_validate_reports_dangling_panel() {
        let temp = tempdir().expect("tempdir");
        let path = write_fixture(
            &temp,
            "dangling.json",
            r#"{
                "panels": { "CPU": { "kind": "Panel", "spec": {
                    "display": { "name": "CPU" }, "plugin": { "kind": "", "spec": {} } } } },
                "panelGroups": {},
                "panelGroupOrder": []
            }"#,
        );
        let output = run_validate(&ValidateArgs { dashboard: path }).unwrap();
        assert_eq!(output["valid"], false);
        assert_eq!(output["code"], "CORRUPT_MODEL");
    }
}
