//! Internal implementation for the bootstrap workflow

use super::{
    Availability, Bootstrap, BootstrapEvent, BootstrapOutcome, BootstrapReport, Stage,
    TicketOutcome,
};
use crate::credential::Credential;
use crate::error::Result;
use crate::forge::{tracking_tickets, ForgeClient, RepositoryDescriptor};
use crate::git;
use crate::outcome::StepOutcome;
use crate::scaffold::ScaffoldReport;

/// Main execution logic for a bootstrap run
pub(crate) fn run(bootstrap: &Bootstrap<'_>, name: &str) -> Result<BootstrapReport> {
    emit(
        bootstrap,
        Stage::Start,
        "bootstrap",
        StepOutcome::ok(format!("Bootstrapping '{}'", name)),
    );

    // === PRE-FLIGHT: nothing below may run on a bad configuration ===
    let credential = resolve_credential(bootstrap)?;
    let descriptor = RepositoryDescriptor::new(
        name,
        bootstrap.settings.description.as_str(),
        bootstrap.settings.visibility,
    )?;

    let forge = bootstrap.connector.connect(&credential)?;
    let owner = resolve_owner(bootstrap, &*forge)?;

    // === GUARD: at most one run per name gets past this point ===
    if repository_exists(bootstrap, &*forge, &owner, name)? {
        emit(
            bootstrap,
            Stage::Aborted,
            "existence check",
            StepOutcome::failed(format!("Repository '{}/{}' already exists", owner, name)),
        );
        return Ok(BootstrapReport {
            owner,
            name: name.to_string(),
            outcome: BootstrapOutcome::AlreadyExists,
            scaffold: None,
            remote: None,
            tickets: Vec::new(),
        });
    }

    // === LOCAL: scaffold and first commit ===
    let scaffold = build_scaffold(bootstrap, name)?;
    commit_locally(bootstrap, &scaffold)?;

    // === REMOTE: no rollback of local work past this point ===
    let remote = match forge.create_repo(&descriptor) {
        Ok(remote) => {
            emit(
                bootstrap,
                Stage::RemoteCreated,
                "create repository",
                StepOutcome::ok(format!("Created {}/{} ({})", owner, name, remote.clone_url)),
            );
            remote
        }
        Err(e) => {
            emit(
                bootstrap,
                Stage::CreationFailed,
                "create repository",
                StepOutcome::failed(e.to_string()),
            );
            return Err(e.into());
        }
    };

    let dir = scaffold.path.as_path();
    vcs_step(
        bootstrap,
        "remote add",
        bootstrap.vcs.add_remote(dir, &remote.clone_url),
    )?;
    vcs_step(
        bootstrap,
        "push",
        bootstrap.vcs.push(dir, &bootstrap.settings.branch),
    )?;

    let tickets = file_tickets(bootstrap, &*forge, &owner, name);

    emit(
        bootstrap,
        Stage::Done,
        "bootstrap",
        StepOutcome::ok(format!(
            "{}/{} ready, {} of {} tickets filed",
            owner,
            name,
            tickets.iter().filter(|t| t.outcome.succeeded).count(),
            tickets.len()
        )),
    );

    Ok(BootstrapReport {
        owner,
        name: name.to_string(),
        outcome: BootstrapOutcome::Completed,
        scaffold: Some(scaffold),
        remote: Some(remote),
        tickets,
    })
}

/// Existence check only; performs no writes
pub(crate) fn check(bootstrap: &Bootstrap<'_>, name: &str) -> Result<Availability> {
    let credential = resolve_credential(bootstrap)?;
    crate::forge::validate_repo_name(name)?;

    let forge = bootstrap.connector.connect(&credential)?;
    let owner = resolve_owner(bootstrap, &*forge)?;
    let exists = repository_exists(bootstrap, &*forge, &owner, name)?;

    if exists {
        emit(
            bootstrap,
            Stage::ExistenceChecked,
            "existence check",
            StepOutcome::failed(format!("Repository '{}/{}' already exists", owner, name)),
        );
    }

    Ok(Availability {
        owner,
        name: name.to_string(),
        exists,
    })
}

fn emit(bootstrap: &Bootstrap<'_>, stage: Stage, step: &str, outcome: StepOutcome) {
    bootstrap.reporter.report(&BootstrapEvent {
        stage,
        step: step.to_string(),
        outcome,
    });
}

fn resolve_credential(bootstrap: &Bootstrap<'_>) -> Result<Credential> {
    match bootstrap.credentials.get() {
        Ok(credential) => {
            emit(
                bootstrap,
                Stage::CredentialResolved,
                "credential",
                StepOutcome::ok("Access token found"),
            );
            Ok(credential)
        }
        Err(e) => {
            emit(
                bootstrap,
                Stage::CredentialResolved,
                "credential",
                StepOutcome::failed(e.to_string()),
            );
            Err(e)
        }
    }
}

fn resolve_owner(bootstrap: &Bootstrap<'_>, forge: &dyn ForgeClient) -> Result<String> {
    if let Some(owner) = &bootstrap.settings.owner {
        return Ok(owner.clone());
    }
    let owner = forge.current_user()?;
    tracing::debug!("Owner discovered from token: {}", owner);
    Ok(owner)
}

fn repository_exists(
    bootstrap: &Bootstrap<'_>,
    forge: &dyn ForgeClient,
    owner: &str,
    name: &str,
) -> Result<bool> {
    match forge.repo_exists(owner, name) {
        Ok(true) => Ok(true),
        Ok(false) => {
            emit(
                bootstrap,
                Stage::ExistenceChecked,
                "existence check",
                StepOutcome::ok(format!("{}/{} is available", owner, name)),
            );
            Ok(false)
        }
        Err(e) => {
            // Unknown remote state: do not proceed
            emit(
                bootstrap,
                Stage::ExistenceChecked,
                "existence check",
                StepOutcome::failed(e.to_string()),
            );
            Err(e.into())
        }
    }
}

fn build_scaffold(bootstrap: &Bootstrap<'_>, name: &str) -> Result<ScaffoldReport> {
    match bootstrap.scaffold.materialize(name) {
        Ok(report) => {
            let summary = report
                .files
                .iter()
                .map(|(file, status)| format!("{} ({})", file, status.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            emit(
                bootstrap,
                Stage::ScaffoldBuilt,
                "scaffold",
                StepOutcome::ok(format!("{}: {}", report.path.display(), summary)),
            );
            Ok(report)
        }
        Err(e) => {
            emit(
                bootstrap,
                Stage::ScaffoldBuilt,
                "scaffold",
                StepOutcome::failed(e.to_string()),
            );
            Err(e)
        }
    }
}

fn commit_locally(bootstrap: &Bootstrap<'_>, scaffold: &ScaffoldReport) -> Result<()> {
    let dir = scaffold.path.as_path();
    local_step(bootstrap, "init", bootstrap.vcs.init(dir))?;
    local_step(bootstrap, "add", bootstrap.vcs.stage_all(dir))?;
    local_step(
        bootstrap,
        "commit",
        bootstrap.vcs.commit(dir, &bootstrap.settings.commit_message),
    )?;
    Ok(())
}

fn local_step(bootstrap: &Bootstrap<'_>, step: &'static str, outcome: StepOutcome) -> Result<()> {
    report_vcs(bootstrap, Stage::LocalCommitted, step, outcome)
}

fn vcs_step(bootstrap: &Bootstrap<'_>, step: &'static str, outcome: StepOutcome) -> Result<()> {
    report_vcs(bootstrap, Stage::PushedAndTicketed, step, outcome)
}

fn report_vcs(
    bootstrap: &Bootstrap<'_>,
    stage: Stage,
    step: &'static str,
    outcome: StepOutcome,
) -> Result<()> {
    emit(bootstrap, stage, &format!("git {}", step), outcome.clone());
    git::require(step, outcome).map(|_| ())
}

/// File every tracking ticket. One failure never stops the next attempt.
fn file_tickets(
    bootstrap: &Bootstrap<'_>,
    forge: &dyn ForgeClient,
    owner: &str,
    name: &str,
) -> Vec<TicketOutcome> {
    tracking_tickets()
        .into_iter()
        .map(|ticket| {
            let (outcome, issue) = match forge.create_issue(owner, name, &ticket) {
                Ok(issue) => {
                    let detail = match issue.number {
                        Some(number) => format!("Ticket '{}' created (#{})", ticket.title, number),
                        None => format!("Ticket '{}' created", ticket.title),
                    };
                    (StepOutcome::ok(detail), Some(issue))
                }
                Err(e) => (
                    StepOutcome::failed(format!(
                        "Failed to create ticket '{}': {}",
                        ticket.title, e
                    )),
                    None,
                ),
            };
            emit(
                bootstrap,
                Stage::PushedAndTicketed,
                "create issue",
                outcome.clone(),
            );
            TicketOutcome {
                title: ticket.title,
                outcome,
                issue,
            }
        })
        .collect()
}
