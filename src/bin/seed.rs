//! Seed the database with demo tenants, experiments and events
//!
//! Uses the same configuration sources as the server.

use abtest_analytics::config::Config;
use abtest_analytics::core::models::{
    EventType, Experiment, ExperimentStatus, NewEvent, NewExperiment, Tenant,
};
use abtest_analytics::server::builder::load_config;
use abtest_analytics::storage::StorageLayer;
use abtest_analytics::utils::logging;
use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use clap::Parser;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::info;

/// Load demo data for local development
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file; the environment is used when it cannot be loaded
    #[arg(short, long, env = "ANALYTICS_CONFIG", default_value = "config/analytics.yaml")]
    config: PathBuf,
}

const ACME_KEY: &str = "test-api-key-12345";
const DEMO_KEY: &str = "demo-api-key-67890";

const TENANTS: &[(&str, &str)] = &[("Acme Corp", ACME_KEY), ("Demo Company", DEMO_KEY)];

struct ExperimentSeed {
    tenant_key: &'static str,
    name: &'static str,
    description: &'static str,
    status: ExperimentStatus,
    variants: &'static [&'static str],
    start: (i32, u32, u32),
    end: Option<(i32, u32, u32)>,
}

const EXPERIMENTS: &[ExperimentSeed] = &[
    ExperimentSeed {
        tenant_key: ACME_KEY,
        name: "Homepage CTA Button Test",
        description: "Testing different CTA button colors",
        status: ExperimentStatus::Active,
        variants: &["A", "B"],
        start: (2025, 1, 1),
        end: None,
    },
    ExperimentSeed {
        tenant_key: ACME_KEY,
        name: "Pricing Page Layout Test",
        description: "A/B test for pricing page design",
        status: ExperimentStatus::Active,
        variants: &["Control", "Variant"],
        start: (2025, 1, 15),
        end: None,
    },
    ExperimentSeed {
        tenant_key: ACME_KEY,
        name: "Email Subject Line Test",
        description: "Testing email subject line variations",
        status: ExperimentStatus::Completed,
        variants: &["Original", "New"],
        start: (2024, 12, 1),
        end: Some((2024, 12, 31)),
    },
    ExperimentSeed {
        tenant_key: DEMO_KEY,
        name: "Landing Page Headline Test",
        description: "Testing headline variations",
        status: ExperimentStatus::Active,
        variants: &["Headline A", "Headline B"],
        start: (2025, 1, 10),
        end: None,
    },
];

const ASSIGNMENTS: &[(&str, &[(&str, &str)])] = &[
    (
        "Homepage CTA Button Test",
        &[
            ("user_001", "A"),
            ("user_002", "B"),
            ("user_003", "A"),
            ("user_004", "B"),
            ("user_005", "B"),
        ],
    ),
    (
        "Pricing Page Layout Test",
        &[
            ("user_006", "Control"),
            ("user_007", "Variant"),
            ("user_008", "Control"),
        ],
    ),
];

/// When a seeded event happened
#[derive(Clone, Copy)]
enum When {
    MinutesAgo(i64),
    /// Fixed historical instant, seconds since the epoch
    At(i64),
}

struct EventSeed {
    tenant_key: &'static str,
    user_id: &'static str,
    event_type: EventType,
    experiment: Option<(&'static str, &'static str)>,
    properties: Option<fn() -> Value>,
    when: When,
}

const fn event(
    tenant_key: &'static str,
    user_id: &'static str,
    event_type: EventType,
    experiment: Option<(&'static str, &'static str)>,
    when: When,
) -> EventSeed {
    EventSeed {
        tenant_key,
        user_id,
        event_type,
        experiment,
        properties: None,
        when,
    }
}

const HOMEPAGE: &str = "Homepage CTA Button Test";
const PRICING: &str = "Pricing Page Layout Test";
const EMAIL: &str = "Email Subject Line Test";
const LANDING: &str = "Landing Page Headline Test";

// 2024-12-15T10:00:00Z, 11:00:00Z and 11:05:00Z
const EMAIL_VIEW_A: i64 = 1_734_256_800;
const EMAIL_VIEW_B: i64 = 1_734_260_400;
const EMAIL_CONVERSION: i64 = 1_734_260_700;

fn events() -> Vec<EventSeed> {
    use EventType::{Click, Conversion, PageView};
    use When::{At, MinutesAgo};

    vec![
        event(ACME_KEY, "user_001", PageView, Some((HOMEPAGE, "A")), MinutesAgo(5)),
        EventSeed {
            properties: Some(|| json!({"element": "cta_button"})),
            ..event(ACME_KEY, "user_001", Click, Some((HOMEPAGE, "A")), MinutesAgo(4))
        },
        EventSeed {
            properties: Some(|| json!({"value": 99.99})),
            ..event(ACME_KEY, "user_001", Conversion, Some((HOMEPAGE, "A")), MinutesAgo(3))
        },
        event(ACME_KEY, "user_002", PageView, Some((HOMEPAGE, "B")), MinutesAgo(10)),
        event(ACME_KEY, "user_003", PageView, Some((HOMEPAGE, "A")), MinutesAgo(15)),
        event(ACME_KEY, "user_003", Click, Some((HOMEPAGE, "A")), MinutesAgo(14)),
        event(ACME_KEY, "user_004", PageView, Some((HOMEPAGE, "B")), MinutesAgo(20)),
        EventSeed {
            properties: Some(|| json!({"value": 49.99})),
            ..event(ACME_KEY, "user_004", Conversion, Some((HOMEPAGE, "B")), MinutesAgo(19))
        },
        event(ACME_KEY, "user_005", PageView, Some((HOMEPAGE, "B")), MinutesAgo(25)),
        event(ACME_KEY, "user_006", PageView, Some((PRICING, "Control")), MinutesAgo(30)),
        event(ACME_KEY, "user_007", PageView, Some((PRICING, "Variant")), MinutesAgo(35)),
        event(ACME_KEY, "user_007", Conversion, Some((PRICING, "Variant")), MinutesAgo(34)),
        event(ACME_KEY, "user_010", PageView, Some((EMAIL, "Original")), At(EMAIL_VIEW_A)),
        event(ACME_KEY, "user_011", PageView, Some((EMAIL, "New")), At(EMAIL_VIEW_B)),
        event(ACME_KEY, "user_011", Conversion, Some((EMAIL, "New")), At(EMAIL_CONVERSION)),
        event(DEMO_KEY, "demo_user_001", PageView, Some((LANDING, "Headline A")), MinutesAgo(40)),
        event(DEMO_KEY, "demo_user_002", PageView, Some((LANDING, "Headline B")), MinutesAgo(45)),
        event(DEMO_KEY, "demo_user_002", Click, Some((LANDING, "Headline B")), MinutesAgo(44)),
        event(ACME_KEY, "user_020", PageView, None, MinutesAgo(50)),
        EventSeed {
            properties: Some(|| json!({"element": "navigation_menu"})),
            ..event(ACME_KEY, "user_021", Click, None, MinutesAgo(55))
        },
    ]
}

fn midnight((year, month, day): (i32, u32, u32)) -> Result<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .with_context(|| format!("invalid seed date {}-{}-{}", year, month, day))?;
    Ok(Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN)))
}

fn timestamp(when: When, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    match when {
        When::MinutesAgo(minutes) => Ok(now - Duration::minutes(minutes)),
        When::At(secs) => DateTime::from_timestamp(secs, 0)
            .with_context(|| format!("invalid seed timestamp {}", secs)),
    }
}

async fn seed(storage: &StorageLayer) -> Result<()> {
    let db = storage.db();

    let mut tenants: HashMap<&str, Tenant> = HashMap::new();
    for (name, api_key) in TENANTS {
        let tenant = db.upsert_tenant(name, api_key).await?;
        tenants.insert(*api_key, tenant);
    }
    info!("Created tenants");

    let mut experiments: HashMap<&str, Experiment> = HashMap::new();
    for seed in EXPERIMENTS {
        let tenant = &tenants[seed.tenant_key];
        let experiment = db
            .create_experiment(&NewExperiment {
                tenant_id: tenant.id,
                name: seed.name.to_string(),
                description: Some(seed.description.to_string()),
                status: seed.status,
                variants: seed.variants.iter().map(|v| v.to_string()).collect(),
                start_date: Some(midnight(seed.start)?),
                end_date: seed.end.map(midnight).transpose()?,
            })
            .await?;
        experiments.insert(seed.name, experiment);
    }
    info!("Created experiments");

    let mut assignment_count = 0;
    for (experiment_name, assignments) in ASSIGNMENTS {
        let experiment = &experiments[experiment_name];
        for (user_id, variant) in *assignments {
            db.create_assignment(experiment.tenant_id, experiment.id, user_id, variant)
                .await?;
            assignment_count += 1;
        }
    }
    info!("Created user assignments");

    let now = Utc::now();
    let seeds = events();
    for seed in &seeds {
        let (experiment_id, variant) = match seed.experiment {
            Some((name, variant)) => (Some(experiments[name].id), Some(variant.to_string())),
            None => (None, None),
        };

        db.create_event(&NewEvent {
            tenant_id: tenants[seed.tenant_key].id,
            user_id: seed.user_id.to_string(),
            event_type: seed.event_type,
            experiment_id,
            variant,
            properties: seed.properties.map_or_else(|| json!({}), |build| build()),
            timestamp: timestamp(seed.when, now)?,
        })
        .await?;
    }
    info!("Created {} events", seeds.len());

    info!("Seed summary:");
    info!("   Tenants: {}", tenants.len());
    info!("   Experiments: {}", experiments.len());
    info!("   User assignments: {}", assignment_count);
    info!("   Events: {}", seeds.len());

    info!("API keys:");
    for (name, api_key) in TENANTS {
        info!("   {}: {}", name, api_key);
    }

    info!(
        "Try: GET /analytics/summary?experimentId={}",
        experiments[HOMEPAGE].id
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init_tracing("info", false);

    info!("Seeding database with demo data");
    let config: Config = load_config(&cli.config).await?;
    let storage = StorageLayer::new(config.storage()).await?;
    if !config.storage().database.run_migrations {
        storage.migrate().await?;
    }

    seed(&storage).await?;
    info!("Seed completed successfully");
    Ok(())
}
