//! `composer build` and `composer status`.

use anyhow::{Result, bail};
use console::style;

use composer_core::repository::status::BuildStateStore;
use composer_types::build::{BuildReport, BuildStatus, CrossBuildOutcome};
use composer_types::notification::{Notification, NotificationKind};

use crate::state::AppState;

/// Run a build and print its warnings and outcome.
///
/// A failed build prints its report and then exits non-zero.
pub async fn build(state: &AppState, project_id: &str, json: bool, quiet: bool) -> Result<()> {
    let orchestrator = state.orchestrator()?;
    let mut notifications = state.notifications.subscribe();

    if !json && !quiet {
        println!(
            "  {} Building '{}' via {}",
            style("⚡").bold(),
            style(project_id).cyan(),
            style(&state.config.build_service_url).dim()
        );
    }

    let report = orchestrator
        .build(project_id, &state.config.luis, &state.config.qna)
        .await;

    let mut raised = Vec::new();
    while let Ok(notification) = notifications.try_recv() {
        raised.push(notification);
    }

    if json {
        let out = serde_json::json!({
            "report": report,
            "notifications": raised,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if !quiet {
        for notification in &raised {
            print_notification(notification);
        }
        print_report(&report);
    }

    if report.status == BuildStatus::Failed {
        bail!("build of '{project_id}' failed");
    }
    Ok(())
}

/// Show the last recorded build state and publish times.
pub async fn status(state: &AppState, project_id: &str, json: bool) -> Result<()> {
    let build_state = state.workspace.get_state(project_id).await?;
    let published = state.workspace.published_files(project_id).await?;

    if json {
        let out = serde_json::json!({
            "project": project_id,
            "build": build_state,
            "published": published,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("⚡").bold(), style(project_id).cyan().bold());
    println!();

    match build_state {
        None => println!("  Build:   {}", style("never built").dim()),
        Some(build_state) => {
            println!(
                "  Build:   {} {}",
                status_style(build_state.status),
                style(format!("({})", build_state.updated_at.format("%Y-%m-%d %H:%M:%S UTC"))).dim()
            );
            if let Some(failure) = build_state.failure {
                println!("  {}: {}", style(failure.title).red(), failure.message);
            }
        }
    }

    println!("  LU:      {} published", published.lu.len());
    println!("  QnA:     {} published", published.qna.len());
    println!();
    Ok(())
}

fn status_style(status: BuildStatus) -> console::StyledObject<String> {
    let text = status.to_string();
    match status {
        BuildStatus::Published => style(text).green().bold(),
        BuildStatus::Failed => style(text).red().bold(),
        BuildStatus::Idle => style(text).dim(),
        _ => style(text).yellow(),
    }
}

fn print_notification(notification: &Notification) {
    let icon = match notification.kind {
        NotificationKind::Info => style("i").blue().bold(),
        NotificationKind::Warning => style("!").yellow().bold(),
        NotificationKind::Error => style("✗").red().bold(),
    };
    println!(
        "  {icon} {}: {}",
        style(&notification.title).bold(),
        notification.description
    );
}

fn print_report(report: &BuildReport) {
    println!();
    println!("  Status:  {}", status_style(report.status));
    if let Some(failure) = &report.failure {
        println!("  {}:", style(&failure.title).red());
        for line in failure.message.lines() {
            println!("    {line}");
        }
    }
    match &report.cross_build {
        CrossBuildOutcome::NotApplicable => {}
        CrossBuildOutcome::Completed { merged } if merged.is_empty() => {
            println!("  Skills:  {}", style("none to merge").dim());
        }
        CrossBuildOutcome::Completed { merged } => {
            println!("  Skills:  merged {}", merged.join(", "));
        }
        CrossBuildOutcome::Failed { message } => {
            println!("  Skills:  {} {message}", style("failed").red());
        }
    }
    println!();
}
