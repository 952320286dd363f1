use rusqlite::{Connection, params};
use tracing::{debug, error, info};

use crate::{Result, format_timestamp, local_now};

/// Target definition of one table plus the columns that older deployments
/// may be missing. Added columns never carry a non-constant default, so
/// existing rows keep NULL instead of an invented value.
struct TableDef {
    name: &'static str,
    create: &'static str,
    added_columns: &'static [(&'static str, &'static str)],
    indexes: &'static [&'static str],
}

const TABLES: &[TableDef] = &[
    TableDef {
        name: "photos",
        create: "
            CREATE TABLE photos (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                url         TEXT NOT NULL,
                description TEXT,
                order_num   INTEGER NOT NULL DEFAULT 0,
                created_at  TEXT DEFAULT (datetime('now', 'localtime'))
            )",
        added_columns: &[
            ("description", "description TEXT"),
            ("order_num", "order_num INTEGER NOT NULL DEFAULT 0"),
            ("created_at", "created_at TEXT"),
        ],
        indexes: &[],
    },
    TableDef {
        name: "guests",
        create: "
            CREATE TABLE guests (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                name        TEXT NOT NULL,
                phone       TEXT NOT NULL,
                message     TEXT,
                attendance  TEXT NOT NULL,
                created_at  TEXT DEFAULT (datetime('now', 'localtime'))
            )",
        added_columns: &[
            ("message", "message TEXT"),
            ("created_at", "created_at TEXT"),
        ],
        indexes: &[],
    },
    TableDef {
        name: "likes",
        create: "
            CREATE TABLE likes (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                ip          TEXT,
                created_at  TEXT DEFAULT (datetime('now', 'localtime'))
            )",
        added_columns: &[("ip", "ip TEXT"), ("created_at", "created_at TEXT")],
        indexes: &["CREATE INDEX IF NOT EXISTS idx_likes_created_at ON likes(created_at)"],
    },
];

const PLACEHOLDER_PHOTOS: &[(&str, &str, i64)] = &[
    ("https://picsum.photos/800/1200", "Placeholder photo 1", 1),
    ("https://picsum.photos/800/1200", "Placeholder photo 2", 2),
];

#[derive(Debug, Default)]
pub struct SchemaReport {
    pub created: Vec<&'static str>,
    pub altered: Vec<(&'static str, &'static str)>,
    pub failed: Vec<&'static str>,
    pub seeded: usize,
}

/// Bring all tables up to the target schema. Safe to run on every start.
pub fn ensure_schema(conn: &Connection) -> SchemaReport {
    let mut report = SchemaReport::default();

    for table in TABLES {
        if let Err(e) = ensure_table(conn, table, &mut report) {
            error!("Schema setup for table '{}' failed: {}", table.name, e);
            report.failed.push(table.name);
        }
    }

    if !report.failed.contains(&"photos") {
        match seed_photos(conn) {
            Ok(n) => report.seeded = n,
            Err(e) => error!("Seeding placeholder photos failed: {}", e),
        }
    }

    info!(
        "Schema ready (created: {:?}, altered: {:?}, failed: {:?})",
        report.created, report.altered, report.failed
    );
    report
}

fn ensure_table(conn: &Connection, table: &TableDef, report: &mut SchemaReport) -> Result<()> {
    if !table_exists(conn, table.name)? {
        conn.execute_batch(table.create)?;
        report.created.push(table.name);
    } else {
        let existing = column_names(conn, table.name)?;
        for (column, definition) in table.added_columns {
            if existing.iter().any(|c| c.eq_ignore_ascii_case(column)) {
                continue;
            }
            conn.execute_batch(&format!(
                "ALTER TABLE {} ADD COLUMN {}",
                table.name, definition
            ))?;
            info!("Added column {}.{}", table.name, column);
            report.altered.push((table.name, *column));
        }
    }

    for index in table.indexes {
        conn.execute_batch(index)?;
    }

    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
        [name],
        |row| row.get::<_, bool>(0),
    )?;
    Ok(exists)
}

fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>> {
    // table names come from TABLES, never from input
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(names)
}

fn seed_photos(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM photos", [], |row| row.get(0))?;
    if count > 0 {
        debug!("Gallery has {} photos, skipping placeholders", count);
        return Ok(0);
    }

    let now = format_timestamp(local_now());
    let mut stmt = conn.prepare(
        "INSERT INTO photos (url, description, order_num, created_at) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for (url, description, order_num) in PLACEHOLDER_PHOTOS {
        stmt.execute(params![url, description, order_num, now])?;
    }

    info!("Seeded {} placeholder photos", PLACEHOLDER_PHOTOS.len());
    Ok(PLACEHOLDER_PHOTOS.len())
}
