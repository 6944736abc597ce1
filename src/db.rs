use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use crate::checkpoint::NetworkModel;

/// Best genome of one finished generation, as stored in the run database.
#[derive(Debug)]
pub struct BestRecord {
    pub generation: u32,
    pub fitness: f32,
    pub model: NetworkModel,
}

pub fn init_db(path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute(
        "CREATE TABLE IF NOT EXISTS generation_best (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            generation INTEGER NOT NULL,
            fitness REAL NOT NULL,
            genome TEXT NOT NULL,
            recorded_at TEXT NOT NULL
        )",
        [],
    )?;
    Ok(conn)
}

pub fn insert_best(conn: &Connection, record: &BestRecord) -> rusqlite::Result<()> {
    let genome = serde_json::to_string(&record.model)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    conn.execute(
        "INSERT INTO generation_best (generation, fitness, genome, recorded_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![record.generation, record.fitness, genome, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

/// Highest-fitness genome ever recorded, if any.
pub fn get_best_record(conn: &Connection) -> rusqlite::Result<Option<BestRecord>> {
    conn.query_row(
        "SELECT generation, fitness, genome FROM generation_best
         ORDER BY fitness DESC LIMIT 1",
        [],
        |row| {
            let genome: String = row.get(2)?;
            let model: NetworkModel = serde_json::from_str(&genome).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
            })?;
            Ok(BestRecord {
                generation: row.get(0)?,
                fitness: row.get(1)?,
                model,
            })
        },
    )
    .optional()
}
