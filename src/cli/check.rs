//! Check command - runs the duplicate check against a store and prints the report

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Args;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::registration::{
    Candidate, DuplicateChecker, DuplicateReport, Identity, TeamRegistration,
    TeamRegistrationRepository,
};
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::registration::{
    create_registration_repository, StorageTeamRegistrationRepository,
};
use crate::infrastructure::storage::InMemoryStorage;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Candidate team JSON (`teamName`, `captain`, `members`)
    #[arg(short, long)]
    pub file: PathBuf,

    /// JSON array of registered teams to check against instead of the configured store
    #[arg(short, long)]
    pub teams: Option<PathBuf>,
}

/// Candidate file shape; extra submission fields such as `name` are ignored
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CandidateFile {
    team_name: String,
    captain: Identity,
    #[serde(default)]
    members: Vec<Identity>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    #[serde(flatten)]
    report: DuplicateReport,
    message: String,
}

pub async fn run(args: CheckArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let candidate = read_candidate(&args.file)?;

    let repository: Arc<dyn TeamRegistrationRepository> = match &args.teams {
        Some(path) => seeded_repository(path)?,
        None => {
            let storage_config = config.storage.storage_config()?;
            create_registration_repository(&storage_config, &config.storage.table).await?
        }
    };

    let report = check_candidate(repository, &candidate).await?;
    info!(
        team_name = %candidate.team_name,
        has_duplicates = report.has_duplicates,
        "Duplicate check finished"
    );

    let output = CheckOutput {
        message: report.describe(),
        report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

async fn check_candidate(
    repository: Arc<dyn TeamRegistrationRepository>,
    candidate: &Candidate,
) -> anyhow::Result<DuplicateReport> {
    let report = DuplicateChecker::new(repository).check(candidate).await?;
    Ok(report)
}

fn read_candidate(path: &Path) -> anyhow::Result<Candidate> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read candidate file {}", path.display()))?;
    let file: CandidateFile = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid candidate JSON in {}", path.display()))?;

    Ok(Candidate::new(file.team_name, file.captain, file.members))
}

fn seeded_repository(path: &Path) -> anyhow::Result<Arc<dyn TeamRegistrationRepository>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read teams file {}", path.display()))?;
    let teams: Vec<TeamRegistration> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid teams JSON in {}", path.display()))?;

    info!(count = teams.len(), "Checking against teams file");

    let storage = Arc::new(InMemoryStorage::with_entities(teams));
    Ok(Arc::new(StorageTeamRegistrationRepository::new(storage)))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_json(value: serde_json::Value) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    #[test]
    fn test_read_candidate_ignores_submission_fields() {
        let file = write_json(json!({
            "teamName": "Alpha",
            "idea": "ignored",
            "captain": { "srn": "S1", "name": "A", "email": "a@pes.edu", "walletAddress": "0x1" },
            "members": [{ "srn": "S2", "name": "B", "email": "b@pes.edu" }]
        }));

        let candidate = read_candidate(file.path()).unwrap();

        assert_eq!(candidate.team_name, "Alpha");
        assert_eq!(candidate.captain.email, "a@pes.edu");
        assert_eq!(candidate.members.len(), 1);
        assert_eq!(candidate.members[0].srn, "S2");
    }

    #[test]
    fn test_read_candidate_missing_file() {
        let err = read_candidate(Path::new("/nonexistent/candidate.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read candidate file"));
    }

    #[tokio::test]
    async fn test_check_against_teams_file() {
        let teams = write_json(json!([{
            "id": "00000000-0000-0000-0000-000000000001",
            "teamName": "Beta",
            "idea": "x",
            "ideaDescription": "y",
            "captain": { "srn": "S9", "name": "X", "email": "x@pes.edu" },
            "members": [{ "srn": "S2", "name": "B", "email": "b@pes.edu" }],
            "createdAt": "2024-01-01T00:00:00Z"
        }]));
        let candidate = Candidate::new(
            "Alpha",
            Identity::new("a@pes.edu", "S1"),
            vec![Identity::new("b@pes.edu", "S2")],
        );

        let repository = seeded_repository(teams.path()).unwrap();
        let report = check_candidate(repository, &candidate).await.unwrap();

        assert!(report.has_duplicates);
        assert!(!report.team_name_conflict);
        assert!(report.conflicting_emails.contains("b@pes.edu"));
        assert!(report.conflicting_srns.contains("S2"));
    }

    #[test]
    fn test_output_flattens_report() {
        let output = CheckOutput {
            report: DuplicateReport::default(),
            message: "Team not created.".to_string(),
        };
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["hasDuplicates"], false);
        assert_eq!(value["message"], "Team not created.");
    }
}
