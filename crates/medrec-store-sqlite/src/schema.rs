//! SQL schema for the medrec SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Credential principals. Seeded at startup, never updated.
CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    email         TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    role          TEXT NOT NULL CHECK (role IN ('receptionist', 'doctor'))
);

-- AUTOINCREMENT keeps ids monotonic, so ORDER BY id is insertion order.
CREATE TABLE IF NOT EXISTS patients (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name      TEXT NOT NULL,
    last_name       TEXT NOT NULL,
    date_of_birth   TEXT NOT NULL,   -- RFC 3339 UTC
    gender          TEXT NOT NULL CHECK (gender IN ('Male', 'Female', 'Other')),
    contact         TEXT NOT NULL DEFAULT '',
    address         TEXT NOT NULL DEFAULT '',
    medical_history TEXT NOT NULL DEFAULT ''
);

PRAGMA user_version = 1;
";
