//! SQL schema for the classdesk SQLite stores.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number. Both DDL batches are
//! idempotent thanks to `CREATE TABLE IF NOT EXISTS`, so running them on
//! every process start is safe regardless of prior state.

/// DDL for the users store (users, questions, answers, battles).
pub const USERS_SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id           INTEGER PRIMARY KEY,   -- platform-assigned, not ours
    username          TEXT,
    points            INTEGER NOT NULL DEFAULT 0,
    registration_date TEXT NOT NULL,
    is_headman        INTEGER NOT NULL DEFAULT 0 CHECK (is_headman IN (0, 1))
);

CREATE TABLE IF NOT EXISTS questions (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    author_id   INTEGER,                     -- weak ref; NULL renders as Anonymous
    title       TEXT NOT NULL,
    description TEXT,
    is_closed   INTEGER NOT NULL DEFAULT 0 CHECK (is_closed IN (0, 1)),
    created_at  TEXT NOT NULL
);

-- Exactly one of contact_info / meeting_time is populated, matching
-- answer_type. Enforced by the Rust payload type on the write path.
CREATE TABLE IF NOT EXISTS answers (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    question_id  INTEGER NOT NULL REFERENCES questions(id),
    responder_id INTEGER,
    answer_type  TEXT NOT NULL,              -- 'online' | 'offline'
    contact_info TEXT,
    meeting_time TEXT,
    created_at   TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS battles (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    initiator_id INTEGER,
    receiver_id  INTEGER,
    points       INTEGER NOT NULL,
    is_accepted  INTEGER NOT NULL DEFAULT 0 CHECK (is_accepted IN (0, 1)),
    comment      TEXT,
    winner       INTEGER,
    created_at   TEXT NOT NULL,
    over_at      TEXT
);

CREATE INDEX IF NOT EXISTS answers_question_idx ON answers(question_id);
CREATE INDEX IF NOT EXISTS questions_open_idx   ON questions(is_closed);

PRAGMA user_version = 1;
";

/// DDL for the classes store (the score ledger).
///
/// `class_name` is the natural primary key; an earlier schema variant
/// carried a surrogate id column, dropped to avoid dual-identity bugs.
pub const CLASSES_SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS class_scores (
    class_name  TEXT PRIMARY KEY,
    total_score INTEGER NOT NULL DEFAULT 0
);

PRAGMA user_version = 1;
";
