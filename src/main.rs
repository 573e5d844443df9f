// CrowdSec Monitor - Main Entry Point
// Copyright (C) 2026 Christos Daggas
// SPDX-License-Identifier: MIT

//! Command-line frontend for the CrowdSec Monitor API.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crowdsec_monitor::api::HttpClientError;
use crowdsec_monitor::config::Theme;
use crowdsec_monitor::countdown::{self, remaining};
use crowdsec_monitor::format;
use crowdsec_monitor::models::{
    AlertsFilters, ConnectionMethod, DecisionType, DecisionsFilters, StatisticsDimension,
};
use crowdsec_monitor::state::LoadingState;
use crowdsec_monitor::stats::breakdown;
use crowdsec_monitor::viewmodels::{
    AlertDetailsViewModel, AlertsListViewModel, AuthKind, CreateDecisionForm,
    DecisionDetailsViewModel, OnboardingForm, RankingViewModel, ServerStatusViewModel, Session,
    SubmitError,
};

// =============================================================================
// CLI Arguments
// =============================================================================

#[derive(Parser)]
#[command(name = "crowdsec-monitor")]
#[command(version)]
#[command(about = "Monitor a CrowdSec deployment through the CrowdSec Monitor API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the server and check that it answers
    Connect(ConnectArgs),
    /// Forget the configured server and its credentials
    Logout,
    /// Show Monitor API and LAPI status
    Status,
    /// Show dashboard statistics
    Dashboard,
    /// Show the full ranking for countries, ip-owners, scenarios or targets
    Top {
        #[arg(value_parser = parse_dimension)]
        dimension: StatisticsDimension,
    },
    /// List alerts
    Alerts(AlertsArgs),
    /// Show one alert
    Alert { id: i64 },
    /// Delete an alert
    DeleteAlert { id: i64 },
    /// List decisions
    Decisions(DecisionsArgs),
    /// Show one decision
    Decision {
        id: i64,
        /// Keep counting down until the decision expires
        #[arg(long)]
        watch: bool,
    },
    /// Expire a decision now
    Expire { id: i64 },
    /// Create a decision manually
    CreateDecision(CreateDecisionArgs),
    /// Show or change preferences
    Settings(SettingsArgs),
}

#[derive(Args)]
struct ConnectArgs {
    /// IP address or domain of the server
    #[arg(long)]
    host: String,
    #[arg(long, default_value = "http", value_parser = parse_method)]
    method: ConnectionMethod,
    #[arg(long, default_value = "")]
    port: String,
    #[arg(long, default_value = "")]
    path: String,
    /// none, basic or bearer
    #[arg(long, default_value = "none", value_parser = parse_auth)]
    auth: AuthKind,
    #[arg(long, default_value = "")]
    user: String,
    #[arg(long, default_value = "")]
    password: String,
    #[arg(long, default_value = "")]
    token: String,
    /// Reject self-signed or otherwise invalid TLS certificates
    #[arg(long)]
    verify_tls: bool,
}

#[derive(Args)]
struct AlertsArgs {
    #[arg(long = "country")]
    countries: Vec<String>,
    #[arg(long = "scenario")]
    scenarios: Vec<String>,
    #[arg(long = "ip-owner")]
    ip_owners: Vec<String>,
    #[arg(long = "target")]
    targets: Vec<String>,
    /// Number of pages to load
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(Args)]
struct DecisionsArgs {
    /// Only active decisions (defaults to the saved preference)
    #[arg(long)]
    only_active: Option<bool>,
    /// Hide duplicated active decisions (defaults to the saved preference)
    #[arg(long)]
    hide_duplicated: Option<bool>,
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[derive(Args)]
struct CreateDecisionArgs {
    #[arg(long)]
    ip: String,
    #[arg(long, default_value_t = 0)]
    days: u32,
    #[arg(long, default_value_t = 4)]
    hours: u32,
    #[arg(long, default_value_t = 0)]
    minutes: u32,
    /// ban, captcha, ...
    #[arg(long = "type", default_value = "ban")]
    decision_type: String,
    #[arg(long)]
    reason: String,
}

#[derive(Args)]
struct SettingsArgs {
    /// system, light or dark
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,
    #[arg(long)]
    top_items: Option<u32>,
    #[arg(long)]
    active_only: Option<bool>,
    #[arg(long)]
    hide_duplicated: Option<bool>,
    #[arg(long)]
    disable_countdown: Option<bool>,
}

fn parse_dimension(s: &str) -> Result<StatisticsDimension, String> {
    StatisticsDimension::parse(s)
        .ok_or_else(|| format!("expected one of: countries, ip-owners, scenarios, targets (got {})", s))
}

fn parse_method(s: &str) -> Result<ConnectionMethod, String> {
    ConnectionMethod::parse(s).ok_or_else(|| format!("expected http or https (got {})", s))
}

fn parse_auth(s: &str) -> Result<AuthKind, String> {
    AuthKind::parse(s).ok_or_else(|| format!("expected none, basic or bearer (got {})", s))
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    match s.to_ascii_lowercase().as_str() {
        "system" => Ok(Theme::System),
        "light" => Ok(Theme::Light),
        "dark" => Ok(Theme::Dark),
        _ => Err(format!("expected system, light or dark (got {})", s)),
    }
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("crowdsec_monitor=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::load();

    match cli.command {
        Commands::Connect(args) => connect(&mut session, args).await,
        Commands::Logout => {
            session.logout()?;
            println!("Server configuration removed");
            Ok(())
        }
        Commands::Status => status(&mut session).await,
        Commands::Dashboard => dashboard(&mut session).await,
        Commands::Top { dimension } => top(&mut session, dimension).await,
        Commands::Alerts(args) => alerts(&mut session, args).await,
        Commands::Alert { id } => alert(&mut session, id).await,
        Commands::DeleteAlert { id } => delete_alert(&mut session, id).await,
        Commands::Decisions(args) => decisions(&mut session, args).await,
        Commands::Decision { id, watch } => decision(&mut session, id, watch).await,
        Commands::Expire { id } => expire(&mut session, id).await,
        Commands::CreateDecision(args) => create_decision(&mut session, args).await,
        Commands::Settings(args) => settings(&mut session, args),
    }
}

/// Turn a request error into the message shown to the user. A 401 also
/// drops the stored server.
fn request_failed(session: &mut Session, err: &HttpClientError) -> anyhow::Error {
    if session.handle_error(err) {
        anyhow!(
            "{} The stored server was removed, run `crowdsec-monitor connect` again.",
            err.user_message()
        )
    } else {
        anyhow!("An error occurred: {}", err.user_message())
    }
}

fn loaded<T: Clone>(session: &mut Session, state: &LoadingState<T>) -> Result<T> {
    match state {
        LoadingState::Success(data) => Ok(data.clone()),
        LoadingState::Failure(err) => Err(request_failed(session, err)),
        LoadingState::Loading => bail!("Nothing was loaded"),
    }
}

// =============================================================================
// Commands
// =============================================================================

async fn connect(session: &mut Session, args: ConnectArgs) -> Result<()> {
    let mut form = OnboardingForm::new();
    form.method = args.method;
    form.host = args.host;
    form.port = args.port;
    form.path = args.path;
    form.auth = args.auth;
    form.basic_user = args.user;
    form.basic_password = args.password;
    form.bearer_token = args.token;
    form.accept_invalid_certs = !args.verify_tls;

    session.connect(&form).await?;
    if let Some(server) = session.server() {
        println!("Connected to {}", server.base_url());
    }
    Ok(())
}

async fn status(session: &mut Session) -> Result<()> {
    let mut vm = ServerStatusViewModel::new(session.require_client()?);
    vm.fetch().await;
    let status = loaded(session, &vm.state())?;

    if let Some(server) = session.server() {
        println!("Server:            {}", server.base_url());
    }
    println!("Monitor API:       {}", status.cs_monitor_api.version);
    if let Some(version) = status.update_available() {
        println!("Update available:  {}", version);
    }
    println!(
        "LAPI:              {}",
        if status.cs_lapi.lapi_connected { "connected" } else { "disconnected" }
    );
    if let Some(sync) = status.cs_lapi.last_successful_sync {
        println!("Last sync:         {}", format::ago(&sync, &Utc::now()));
    }
    Ok(())
}

async fn dashboard(session: &mut Session) -> Result<()> {
    let mut vm = session.dashboard()?;
    vm.fetch().await;
    let statistics = loaded(session, &vm.state())?;

    println!("Alerts (last 24h):  {}", statistics.alerts_last_24_hours);
    println!("Active decisions:   {}", statistics.active_decisions);

    if !statistics.activity_history.is_empty() {
        println!("\nActivity");
        for day in &statistics.activity_history {
            println!(
                "  {}  {:>6} alerts  {:>6} decisions",
                format::short_date(day.date),
                day.amount_alerts,
                day.amount_decisions
            );
        }
    }

    for dimension in StatisticsDimension::ALL {
        println!("\n{}", dimension.title());
        for slice in breakdown(&statistics.ranking(dimension)) {
            println!("  {:<40} {:>7}  {:>4}", slice.label, slice.amount, slice.percent_label());
        }
    }
    Ok(())
}

async fn top(session: &mut Session, dimension: StatisticsDimension) -> Result<()> {
    let mut vm = RankingViewModel::new(session.require_client()?, dimension);
    vm.fetch().await;
    let ranking = loaded(session, &vm.state())?;

    println!("{}", dimension.title());
    for item in &ranking.items {
        println!("  {:<40} {:>7}", item.label, item.amount);
    }
    println!();
    for slice in &ranking.slices {
        println!("  {} {:<40} {:>4}", slice.color, slice.label, slice.percent_label());
    }
    Ok(())
}

async fn alerts(session: &mut Session, args: AlertsArgs) -> Result<()> {
    let mut vm = AlertsListViewModel::new(session.require_client()?);
    let filters = AlertsFilters {
        countries: args.countries,
        scenarios: args.scenarios,
        ip_owners: args.ip_owners,
        targets: args.targets,
    };
    if filters.is_empty() {
        vm.initial_fetch().await;
    } else {
        vm.update_draft(filters);
        vm.apply_filters().await;
    }
    for _ in 1..args.pages {
        if !vm.fetch_more().await {
            break;
        }
    }

    let list = loaded(session, &vm.state())?;
    let now = Utc::now();
    for alert in &list.items {
        println!(
            "{:>8}  {:>9}  {:<39} {:<2}  {}",
            alert.id,
            format::ago(&alert.crowdsec_created_at, &now),
            alert.source.value,
            alert.source.country().unwrap_or("-"),
            alert.scenario
        );
    }
    println!("\nShowing {} of {} alerts", list.items.len(), list.pagination.total);
    Ok(())
}

async fn alert(session: &mut Session, id: i64) -> Result<()> {
    let mut vm = AlertDetailsViewModel::new(session.require_client()?, id);
    vm.fetch().await;
    let details = loaded(session, &vm.state())?;
    let alert = &details.alert;
    let today = Utc::now().date_naive();

    println!("Alert {}", alert.id);
    println!("  {}", alert.message);
    let scenario = alert.scenario();
    println!("  Scenario:   {}", alert.scenario);
    if let Some(url) = scenario.hub_url() {
        println!("              {}", url);
    }
    println!("  Source:     {} ({})", alert.source.value, alert.source.scope);
    if let Some(range) = alert.source.range.as_deref().filter(|r| !r.is_empty()) {
        println!("  Range:      {}", range);
    }
    if let Some(country) = alert.source.country() {
        println!("  Country:    {}", country);
    }
    if let Some(owner) = alert.source.owner_label() {
        println!("  Owner:      {}", owner);
    }
    if let Some((lat, lon)) = alert.source.coordinates() {
        println!("  Location:   {:.4}, {:.4}", lat, lon);
    }
    println!("  Machine:    {}", alert.machine_id);
    println!(
        "  Started:    {} {}",
        format::relative_day(alert.start_at.date_naive(), today),
        format::time_of_day(&alert.start_at)
    );
    println!(
        "  Stopped:    {} {}",
        format::relative_day(alert.stop_at.date_naive(), today),
        format::time_of_day(&alert.stop_at)
    );
    println!("  Events:     {}", alert.events_count);

    for meta in &alert.meta {
        println!("  {}: {}", meta.key, meta.value.join(", "));
    }

    if !details.decisions.is_empty() {
        println!("\nDecisions");
        let now = Utc::now();
        for decision in &details.decisions {
            println!(
                "  {:>8}  {:<8} {:<39} {}",
                decision.id,
                decision.decision_type,
                decision.value,
                remaining(decision.expiration, now)
            );
        }
    }
    Ok(())
}

async fn delete_alert(session: &mut Session, id: i64) -> Result<()> {
    let client = session.require_client()?;
    if let Err(err) = client.alerts().delete(id).await {
        return Err(request_failed(session, &err));
    }
    println!("Alert {} deleted", id);
    Ok(())
}

async fn decisions(session: &mut Session, args: DecisionsArgs) -> Result<()> {
    let mut vm = session.decisions_list()?;
    if args.only_active.is_some() || args.hide_duplicated.is_some() {
        let defaults = vm.applied_filters();
        vm.update_draft(DecisionsFilters {
            only_active: args.only_active.or(defaults.only_active),
            hide_active_duplicated: args.hide_duplicated.or(defaults.hide_active_duplicated),
        });
        vm.apply_filters().await;
    } else {
        vm.initial_fetch().await;
    }
    for _ in 1..args.pages {
        if !vm.fetch_more().await {
            break;
        }
    }

    let list = loaded(session, &vm.state())?;
    let now = Utc::now();
    for decision in &list.items {
        println!(
            "{:>8}  {:<8} {:<39} {:>14}  {}",
            decision.id,
            decision.decision_type,
            decision.value,
            remaining(decision.expiration, now).to_string(),
            decision.scenario
        );
    }
    println!("\nShowing {} of {} decisions", list.items.len(), list.pagination.total);
    Ok(())
}

async fn decision(session: &mut Session, id: i64, watch: bool) -> Result<()> {
    let mut vm = DecisionDetailsViewModel::new(session.require_client()?, id);
    vm.fetch(true).await;
    let details = loaded(session, &vm.state())?;
    let decision = &details.decision;

    println!("Decision {}", decision.id);
    println!("  Type:       {}", decision.decision_type);
    println!("  Value:      {} ({})", decision.value, decision.scope);
    println!("  Origin:     {}", decision.origin);
    println!("  Scenario:   {}", decision.scenario);
    println!("  Alert:      {}", decision.alert_id);
    if decision.simulated {
        println!("  Simulated");
    }
    println!("  Expires:    {}", decision.expiration.to_rfc3339());

    if !watch || session.settings().disable_countdown_animation() {
        println!("  Remaining:  {}", remaining(decision.expiration, Utc::now()));
        return Ok(());
    }

    let ticker = countdown::ticker(decision.expiration);
    let mut receiver = ticker.subscribe();
    let mut stdout = std::io::stdout();
    loop {
        let current = *receiver.borrow_and_update();
        write!(stdout, "\r  Remaining:  {:<16}", current.to_string())?;
        stdout.flush()?;
        if current.is_expired() || receiver.changed().await.is_err() {
            break;
        }
    }
    writeln!(stdout)?;
    Ok(())
}

async fn expire(session: &mut Session, id: i64) -> Result<()> {
    let mut vm = DecisionDetailsViewModel::new(session.require_client()?, id);
    if vm.expire().await {
        println!("Decision {} expired", id);
        return Ok(());
    }

    let state = vm.state();
    if let Some(err) = state.error() {
        return Err(request_failed(session, err));
    }
    bail!("Could not expire decision {}", id);
}

async fn create_decision(session: &mut Session, args: CreateDecisionArgs) -> Result<()> {
    let client = session.require_client()?;
    let mut form = CreateDecisionForm::new();
    form.ip = args.ip;
    form.days = args.days;
    form.hours = args.hours;
    form.minutes = args.minutes;
    form.decision_type = DecisionType::from(args.decision_type);
    form.reason = args.reason;

    match form.submit(&client).await {
        Ok(()) => {
            println!(
                "Created {} decision for {} ({})",
                form.decision_type,
                form.ip,
                form.duration_string()
            );
            Ok(())
        }
        Err(SubmitError::Request(err)) => Err(request_failed(session, &err)),
        Err(err) => Err(err.into()),
    }
}

fn settings(session: &mut Session, args: SettingsArgs) -> Result<()> {
    let settings = session.settings_mut();
    if let Some(theme) = args.theme {
        settings.set_theme(theme);
    }
    if let Some(count) = args.top_items {
        settings.set_dashboard_top_items(count);
    }
    if let Some(enabled) = args.active_only {
        settings.set_show_active_decisions_only(enabled);
    }
    if let Some(enabled) = args.hide_duplicated {
        settings.set_hide_duplicated_decisions(enabled);
    }
    if let Some(disabled) = args.disable_countdown {
        settings.set_disable_countdown_animation(disabled);
    }

    println!("Settings ({})", settings.path().display());
    println!("{}", serde_json::to_string_pretty(settings.values())?);
    Ok(())
}
