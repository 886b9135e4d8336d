use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Idempotent DDL run once at startup. The schema is small enough that
/// CREATE IF NOT EXISTS beats carrying a migration tool.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    info!("Database schema ready");
    Ok(())
}

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id UUID PRIMARY KEY,
        email TEXT NOT NULL UNIQUE,
        display_name TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    // Status, source, and both date fields are free-form text stored exactly
    // as the client supplied them; consumers own the parsing and tolerance.
    r#"
    CREATE TABLE IF NOT EXISTS applications (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        job_title TEXT NOT NULL,
        company TEXT NOT NULL,
        job_status TEXT,
        job_source TEXT,
        application_date TEXT,
        job_link TEXT,
        location TEXT,
        notes TEXT,
        follow_up_date TEXT,
        follow_up_completed BOOLEAN NOT NULL DEFAULT FALSE,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS applications_user_idx
        ON applications (user_id, created_at DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS notes (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        application_id UUID REFERENCES applications(id) ON DELETE SET NULL,
        title TEXT,
        body TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS notes_user_idx ON notes (user_id, created_at DESC)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS prep_sets (
        id UUID PRIMARY KEY,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        questions JSONB NOT NULL DEFAULT '[]'::jsonb,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL UNIQUE,
        website TEXT,
        industry TEXT,
        notes TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tutorials (
        id UUID PRIMARY KEY,
        title TEXT NOT NULL,
        url TEXT NOT NULL UNIQUE,
        category TEXT NOT NULL,
        summary TEXT NOT NULL,
        position INT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS attachments (
        id UUID PRIMARY KEY,
        application_id UUID NOT NULL REFERENCES applications(id) ON DELETE CASCADE,
        user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        file_name TEXT NOT NULL,
        s3_key TEXT NOT NULL,
        content_type TEXT NOT NULL,
        size_bytes BIGINT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    "#,
];

/// Inserts the curated tutorial catalog. Re-running is a no-op thanks to the
/// unique URL constraint.
pub async fn seed_tutorials(pool: &PgPool) -> Result<()> {
    let tutorials = [
        (
            "Writing a resume that survives the six-second scan",
            "https://jobtrail.app/tutorials/resume-six-second-scan",
            "resume",
            "How recruiters actually read resumes, and how to order yours accordingly.",
            1,
        ),
        (
            "Tailoring applications without rewriting everything",
            "https://jobtrail.app/tutorials/tailoring-applications",
            "resume",
            "A repeatable process for matching a posting's language in under twenty minutes.",
            2,
        ),
        (
            "The STAR method, worked through five real questions",
            "https://jobtrail.app/tutorials/star-method-worked-examples",
            "interview",
            "Situation, Task, Action, Result, with annotated answers that land.",
            3,
        ),
        (
            "Negotiating your first offer",
            "https://jobtrail.app/tutorials/negotiating-first-offer",
            "offer",
            "What is negotiable, what the counterparty expects, and scripts to start from.",
            4,
        ),
        (
            "Following up without being a pest",
            "https://jobtrail.app/tutorials/following-up",
            "networking",
            "Timing and templates for the follow-up messages this tracker reminds you about.",
            5,
        ),
    ];

    for (title, url, category, summary, position) in tutorials {
        sqlx::query(
            r#"
            INSERT INTO tutorials (id, title, url, category, summary, position)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (url) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(url)
        .bind(category)
        .bind(summary)
        .bind(position)
        .execute(pool)
        .await?;
    }

    Ok(())
}
