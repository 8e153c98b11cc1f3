use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);"
    )?;

    let version: i64 = conn
        .query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            CREATE TABLE users (
                id          TEXT PRIMARY KEY,
                email       TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password    TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE profiles (
                id          TEXT PRIMARY KEY REFERENCES users(id),
                full_name   TEXT,
                phone       TEXT,
                created_at  TEXT NOT NULL DEFAULT (datetime('now')),
                updated_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE contact_messages (
                id          TEXT PRIMARY KEY,
                name        TEXT NOT NULL,
                email       TEXT NOT NULL,
                phone       TEXT NOT NULL,
                message     TEXT NOT NULL,
                created_at  TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE donations (
                id              TEXT PRIMARY KEY,
                donor_name      TEXT NOT NULL,
                email           TEXT NOT NULL,
                phone           TEXT NOT NULL,
                amount          REAL NOT NULL,
                donation_type   TEXT NOT NULL,
                message         TEXT,
                payment_status  TEXT NOT NULL DEFAULT 'pending'
                                CHECK (payment_status IN ('pending', 'completed')),
                payment_id      TEXT,
                user_id         TEXT,
                created_at      TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE TABLE pooja_bookings (
                id                TEXT PRIMARY KEY,
                full_name         TEXT NOT NULL,
                email             TEXT NOT NULL,
                phone             TEXT NOT NULL,
                pooja_service     TEXT NOT NULL,
                booking_date      TEXT NOT NULL,
                booking_time      TEXT NOT NULL,
                occasion          TEXT,
                special_requests  TEXT,
                amount            REAL NOT NULL,
                payment_status    TEXT NOT NULL DEFAULT 'pending'
                                  CHECK (payment_status IN ('pending', 'completed')),
                payment_id        TEXT,
                user_id           TEXT,
                created_at        TEXT NOT NULL DEFAULT (datetime('now'))
            );

            CREATE INDEX idx_bookings_user
                ON pooja_bookings(user_id, created_at);

            INSERT INTO schema_version (version) VALUES (1);
            "
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
