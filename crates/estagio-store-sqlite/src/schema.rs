//! SQL schema for the submissions store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Submissions are strictly append-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS inscricoes (
    id                      TEXT PRIMARY KEY,
    created_at              TEXT NOT NULL,   -- RFC 3339 UTC, fixed width; server-assigned
    full_name               TEXT NOT NULL,
    phone                   TEXT NOT NULL,   -- digits only
    school_name             TEXT NOT NULL,
    completed_courses       TEXT NOT NULL DEFAULT '[]',  -- JSON array of labels
    other_course_name       TEXT,
    internship_availability TEXT NOT NULL,
    course_schedule         TEXT NOT NULL DEFAULT '{}'   -- JSON string or object
);

CREATE INDEX IF NOT EXISTS inscricoes_created_idx ON inscricoes(created_at);

PRAGMA user_version = 1;
";
