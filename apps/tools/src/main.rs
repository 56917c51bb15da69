use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::PortalClient;
use shared::{
    domain::{AdminId, ApplicationId},
    protocol::{AdminLogin, CandidateData, CandidateLogin, CreateCandidate},
};

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "http://localhost:8000")]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in as a candidate and print the base application state.
    Whoami {
        application_id: i32,
        password: String,
    },
    /// Fetch the stored application form as JSON.
    FetchDetails {
        application_id: i32,
        password: String,
    },
    /// Submit an application form read from a JSON file.
    SubmitDetails {
        application_id: i32,
        password: String,
        details_file: String,
    },
    /// Register a candidate record (admin).
    CreateCandidate {
        admin_id: i32,
        admin_password: String,
        application_id: i32,
        personal_id_number: String,
    },
    /// List candidate previews (admin), optionally filtered by field.
    ListCandidates {
        admin_id: i32,
        admin_password: String,
        #[arg(long)]
        field: Option<String>,
        #[arg(long)]
        page: Option<u32>,
    },
}

async fn candidate_session(
    client: &PortalClient,
    application_id: i32,
    password: String,
) -> Result<()> {
    client
        .login(CandidateLogin {
            application_id: ApplicationId(application_id),
            password,
        })
        .await
        .context("candidate login failed")?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let client = PortalClient::new(&cli.server_url)?;

    match cli.command {
        Command::Whoami {
            application_id,
            password,
        } => {
            candidate_session(&client, application_id, password).await?;
            let whoami = client.whoami().await?;
            println!("{}", serde_json::to_string_pretty(&whoami)?);
        }
        Command::FetchDetails {
            application_id,
            password,
        } => {
            candidate_session(&client, application_id, password).await?;
            let details = client.get_details().await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
        }
        Command::SubmitDetails {
            application_id,
            password,
            details_file,
        } => {
            candidate_session(&client, application_id, password).await?;
            let raw = std::fs::read_to_string(&details_file)
                .with_context(|| format!("failed to read {details_file}"))?;
            let details: CandidateData =
                serde_json::from_str(&raw).context("details file is not a valid form")?;
            let echoed = client.post_details(details).await?;
            println!("submitted; portal now holds:");
            println!("{}", serde_json::to_string_pretty(&echoed)?);
        }
        Command::CreateCandidate {
            admin_id,
            admin_password,
            application_id,
            personal_id_number,
        } => {
            client
                .admin_login(AdminLogin {
                    admin_id: AdminId(admin_id),
                    password: admin_password,
                })
                .await
                .context("admin login failed")?;
            let created = client
                .create_candidate(CreateCandidate {
                    application_id: ApplicationId(application_id),
                    personal_id_number,
                })
                .await?;
            println!(
                "created application_id={} field_of_study={} password={}",
                created.application_id.0, created.field_of_study, created.password
            );
        }
        Command::ListCandidates {
            admin_id,
            admin_password,
            field,
            page,
        } => {
            client
                .admin_login(AdminLogin {
                    admin_id: AdminId(admin_id),
                    password: admin_password,
                })
                .await
                .context("admin login failed")?;
            let rows = client
                .list_candidates(field.as_deref(), page, None)
                .await?;
            for row in rows {
                println!("{}", serde_json::to_string(&row)?);
            }
        }
    }

    Ok(())
}
