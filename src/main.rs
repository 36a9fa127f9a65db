use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use afdb_console::notice::{Notice, NoticeLevel};
use afdb_console::org::{render_outline, HttpUnitRepository, OrgUnitsScreen, TreeOptions};
use afdb_console::screens::{contracts, ingestion, onboarding, query, role, taxonomy};
use afdb_console::{ApiClient, Config, SessionStore};

/// Operator console for the AFDB governance service
#[derive(Parser)]
#[command(name = "afdb-console", version, about)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./etc/afdb-console.toml")]
    config: String,

    /// Session id from a previous `role assume`, sent as X-Session-Id
    #[arg(long, global = true, env = "AFDB_SESSION")]
    session: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Organizational units
    Org {
        #[command(subcommand)]
        action: OrgAction,
    },
    /// Taxonomy paths
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },
    /// Run a SemanticQL query and print the JSON result
    Query {
        /// Query text; defaults to an example similarity search
        ql: Option<String>,
    },
    /// Role assumption
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
    /// Data contracts
    Contracts {
        #[command(subcommand)]
        action: ContractAction,
    },
    /// Upload text documents
    Ingest {
        /// Files to upload, one artifact each
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[arg(long, default_value = "confluence")]
        source_app: String,
        /// Org unit path the documents belong to, e.g. Manufacturing/QA
        #[arg(long)]
        org_hint: Option<String>,
    },
    /// First-run setup: starter contract and initial session
    Onboard {
        #[arg(long, default_value = "Acme Corp")]
        company: String,
        #[arg(long, default_value = "Manufacturing/QA")]
        root_unit: String,
        #[arg(long, default_value = "u1")]
        person: String,
    },
}

#[derive(Subcommand)]
enum OrgAction {
    /// Print the flat unit list
    List,
    /// Print the unit hierarchy
    Tree,
    /// Show one unit as the edit form would be seeded
    Show { id: i64 },
    /// Create or update a unit
    Upsert {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Comma-separated parent ids, e.g. "1,2"
        #[arg(long, default_value = "")]
        parents: String,
    },
    /// Edit an existing unit, keeping fields that are not given
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        /// Comma-separated parent ids; an empty string makes the unit a root
        #[arg(long)]
        parents: Option<String>,
    },
}

#[derive(Subcommand)]
enum TaxonomyAction {
    List,
    Add { path: String },
}

#[derive(Subcommand)]
enum RoleAction {
    /// Assume roles and print the new session id
    Assume {
        #[arg(long, default_value = "u1")]
        person: String,
        #[arg(long = "role", default_values_t = vec!["QA-Inspector".to_string()])]
        roles: Vec<String>,
        /// Org unit ids to scope the session to
        #[arg(long = "scope", default_values_t = vec![1u32])]
        scopes: Vec<u32>,
    },
}

#[derive(Subcommand)]
enum ContractAction {
    List,
    Register {
        #[arg(long)]
        producer: String,
        #[arg(long)]
        schema_hash: String,
        /// Comma-separated PII field names
        #[arg(long, default_value = "")]
        pii: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first (before logging init)
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Could not load config file: {}, using defaults", e);
        Config::default()
    });

    // Priority: RUST_LOG env var > config file > default "info"
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log.level));

    fmt::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("Using service at {}", config.api.base_url);

    let session = match cli.session {
        Some(id) => SessionStore::with_session_id(id),
        None => SessionStore::new(),
    };
    let client = ApiClient::new(&config.api, session)?;

    match cli.command {
        Commands::Org { action } => run_org(&client, &config, action).await?,
        Commands::Taxonomy { action } => {
            let paths = match action {
                TaxonomyAction::List => taxonomy::list_paths(&client).await?,
                TaxonomyAction::Add { path } => taxonomy::add_path(&client, &path).await?,
            };
            for path in paths {
                println!("{}", path);
            }
        }
        Commands::Query { ql } => {
            let ql = ql.unwrap_or_else(|| query::EXAMPLE_QUERY.to_string());
            let result = query::run_query(&client, &ql).await?;
            println!("{}", query::format_result(&result));
        }
        Commands::Role {
            action:
                RoleAction::Assume {
                    person,
                    roles,
                    scopes,
                },
        } => {
            let request = role::AssumeRoleRequest {
                person_id: person,
                roles,
                scope_ids: scopes,
            };
            let response = role::assume_role(&client, &request).await?;
            println!("{}", response.session_id);
        }
        Commands::Contracts { action } => {
            let rows = match action {
                ContractAction::List => contracts::list_contracts(&client).await?,
                ContractAction::Register {
                    producer,
                    schema_hash,
                    pii,
                } => {
                    let contract = contracts::DataContract {
                        producer,
                        schema_hash,
                        pii_fields: contracts::parse_pii_fields(&pii),
                    };
                    contracts::register_contract(&client, contract).await?
                }
            };
            for [producer, schema, pii] in contracts::table_rows(&rows) {
                println!("{}\t{}\t{}", producer, schema, pii);
            }
        }
        Commands::Ingest {
            files,
            source_app,
            org_hint,
        } => {
            let mut artifacts = Vec::with_capacity(files.len());
            for file in &files {
                artifacts.push(ingestion::read_artifact(file).await?);
            }
            let manifest = ingestion::IngestionManifest {
                source_app,
                org_unit_hint: org_hint,
            };
            let result = ingestion::upload(&client, manifest, artifacts).await?;
            println!("{}", query::format_result(&result));
        }
        Commands::Onboard {
            company,
            root_unit,
            person,
        } => {
            let request = onboarding::OnboardingRequest {
                company,
                root_unit,
                person_id: person,
                ..Default::default()
            };
            let report = onboarding::run(&client, &request).await?;
            println!("{}", report.session_id);
        }
    }

    Ok(())
}

async fn run_org(client: &ApiClient, config: &Config, action: OrgAction) -> anyhow::Result<()> {
    let repo = HttpUnitRepository::new(client.clone());
    let mut screen = OrgUnitsScreen::new(TreeOptions::from(&config.tree));

    let result = org_action(&mut screen, &repo, action).await;
    print_notices(screen.notices.drain());
    result.context("org units")
}

async fn org_action(
    screen: &mut OrgUnitsScreen,
    repo: &HttpUnitRepository,
    action: OrgAction,
) -> anyhow::Result<()> {
    match action {
        OrgAction::List => {
            screen.load(repo).await?;
            for unit in screen.units() {
                println!("{}\t{}\t{}", unit.id, unit.name, unit.parents_text());
            }
        }
        OrgAction::Tree => {
            screen.load(repo).await?;
            print!("{}", render_outline(screen.forest()));
            let unreachable = screen.index().unreachable();
            if !unreachable.is_empty() {
                println!("(unreachable from any root: {:?})", unreachable);
            }
        }
        OrgAction::Show { id } => {
            screen.load(repo).await?;
            if !screen.select_unit(id) {
                anyhow::bail!("org unit {} not found", id);
            }
            let form = &screen.form;
            println!("id:       {}", form.id);
            println!("name:     {}", form.name);
            println!("parents:  {}", form.parents_text);
            let index = screen.index();
            let children: Vec<String> = index
                .children(id)
                .iter()
                .filter_map(|c| index.get(*c))
                .map(|u| format!("{} (id:{})", u.name, u.id))
                .collect();
            println!("children: {}", children.join(", "));
        }
        OrgAction::Upsert { id, name, parents } => {
            screen.form.id = id;
            screen.form.name = name;
            screen.form.parents_text = parents;
            screen.submit(repo).await?;
            print!("{}", render_outline(screen.forest()));
        }
        OrgAction::Edit { id, name, parents } => {
            screen.load(repo).await?;
            if !screen.select_unit(id) {
                anyhow::bail!("org unit {} not found", id);
            }
            if let Some(name) = name {
                screen.form.name = name;
            }
            if let Some(parents) = parents {
                screen.form.parents_text = parents;
            }
            screen.submit(repo).await?;
            print!("{}", render_outline(screen.forest()));
        }
    }
    Ok(())
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        let tag = match notice.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{}] {}: {}", tag, notice.title, notice.message);
    }
}
