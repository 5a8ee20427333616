use clap::{Parser, Subcommand};
use serde::Serialize;
use stores::http::{HttpBackend, ProviderStatusSource, SessionSource, Timeouts};
use stores::{Absence, AppStores, Credential, Gate, RemoteError, Role, RouteGuard, StoreState};
use time::OffsetDateTime;

type NativeStores = AppStores<SessionSource, ProviderStatusSource>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; pass --session-token or set GLOW_SESSION_TOKEN")]
    MissingSessionToken,
    #[error("backend client init failed: {0}")]
    Backend(#[from] RemoteError),
    #[error("not signed in ({0})")]
    SignedOut(&'static str),
    #[error("signed-in user is not a provider")]
    NotProvider,
    #[error("--plan only applies to --role provider")]
    PlanRequiresProvider,
    #[error("access denied; the app would redirect to {0}")]
    Denied(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "glow", about = "Resolve Glowmarket session state from the command line")]
struct Cli {
    /// Backend API root (or the proxy's `/api` prefix).
    #[arg(long, env = "GLOW_BASE_URL", default_value = "http://127.0.0.1:3000/api")]
    base_url: String,

    #[arg(long, env = "GLOW_SESSION_TOKEN")]
    session_token: Option<String>,

    #[arg(long, env = "GLOW_TIMEOUT_SECS", default_value_t = stores::http::DEFAULT_REQUEST_TIMEOUT_SECS)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the session owning the token.
    Whoami,
    /// Print the plan status of the signed-in provider.
    ProviderStatus,
    /// Evaluate a route guard the way the web app would.
    Check {
        #[arg(long)]
        role: Role,
        /// Also require a plan that grants access (providers only).
        #[arg(long, default_value_t = false)]
        plan: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let credential = credential_from(cli.session_token.as_deref())?;
    let timeouts = Timeouts { request_secs: cli.timeout_secs, ..Timeouts::default() };
    let backend = HttpBackend::new(&cli.base_url, timeouts)?;
    let stores = AppStores::new(SessionSource(backend.clone()), ProviderStatusSource(backend));

    stores.bootstrap(&credential).await;

    match cli.command {
        Command::Whoami => run_whoami(&stores),
        Command::ProviderStatus => run_provider_status(&stores),
        Command::Check { role, plan } => run_check(&stores, role, plan),
    }
}

fn run_whoami(stores: &NativeStores) -> Result<(), CliError> {
    let session = stores.session.state();
    let user = session.value.as_ref().ok_or(CliError::SignedOut(absence_reason(&session)))?;
    print_json(user)
}

fn run_provider_status(stores: &NativeStores) -> Result<(), CliError> {
    let session = stores.session.state();
    if session.value.is_none() {
        return Err(CliError::SignedOut(absence_reason(&session)));
    }
    if !stores.session_has_role(Role::Provider) {
        return Err(CliError::NotProvider);
    }
    let status = stores.provider_status.state();
    let record = status.value.as_ref().ok_or(CliError::SignedOut(absence_reason(&status)))?;
    print_json(record)
}

fn run_check(stores: &NativeStores, role: Role, plan: bool) -> Result<(), CliError> {
    let gate = select_gate(stores, role, plan, OffsetDateTime::now_utc())?;
    println!("{}", describe_gate(gate));
    match gate.redirect() {
        Some(target) => Err(CliError::Denied(target)),
        None => Ok(()),
    }
}

fn select_gate(stores: &NativeStores, role: Role, plan: bool, now: OffsetDateTime) -> Result<Gate, CliError> {
    if !plan {
        return Ok(stores.route_gate(RouteGuard::new(role)));
    }
    if role != Role::Provider {
        return Err(CliError::PlanRequiresProvider);
    }
    Ok(stores.plan_gate(now))
}

fn credential_from(session_token: Option<&str>) -> Result<Credential, CliError> {
    match session_token.map(str::trim) {
        Some(token) if !token.is_empty() => Ok(Credential::session_token(token)),
        _ => Err(CliError::MissingSessionToken),
    }
}

fn absence_reason<T>(state: &StoreState<T>) -> &'static str {
    match state.absence {
        Some(Absence::SignedOut) | None => "session missing or expired",
        Some(Absence::Unreachable) => "backend unreachable",
        Some(Absence::Malformed) => "backend sent an unreadable response",
    }
}

fn describe_gate(gate: Gate) -> String {
    match gate {
        Gate::Authorized => "authorized".to_owned(),
        Gate::Unauthorized { redirect } => format!("redirect -> {redirect}"),
        Gate::Initializing => "unresolved".to_owned(),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
