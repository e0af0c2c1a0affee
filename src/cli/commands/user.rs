use anyhow::Context;
use clap::Args;

use crate::auth::PasswordHasher;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::models::UserFields;
use crate::database::{DatabaseError, Store};

#[derive(Debug, Args)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long, help = "Role text; only \"manager\" and \"admin\" carry privileges")]
    pub role: Option<String>,
}

pub async fn handle(
    store: &Store,
    config: &AppConfig,
    args: CreateUserArgs,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    store.migrate(false).await?;

    let hasher = PasswordHasher::new(config.security.bcrypt_cost);
    let hash = hasher.hash(&args.password).await.context("failed to hash password")?;

    let fields = UserFields {
        name: Some(args.name),
        email: Some(args.email.clone()),
        password: Some(hash),
        department: args.department,
        role: args.role,
    };

    let user = match store.users().insert(&fields).await {
        Ok(user) => user,
        Err(DatabaseError::UniqueViolation(_)) => {
            anyhow::bail!("a user with email {} already exists", args.email)
        }
        Err(e) => return Err(e).context("failed to create user"),
    };

    let text = format!("Created user {} <{}> with role {}", user.id, user.email(), user.role());
    output_format.print(&text, &user)
}
