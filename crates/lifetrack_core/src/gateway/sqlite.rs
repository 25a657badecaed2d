//! SQLite-backed persistence gateway.
//!
//! # Responsibility
//! - Map the whole-collection load/save contract onto the `entities` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save` replaces all rows inside one immediate transaction.
//! - `load` returns rows in insertion order (`rowid`).
//! - Invalid persisted rows surface as `InvalidData`, never as silent drops.

use super::{GatewayResult, PersistenceError, PersistenceGateway};
use crate::db::{open_db, open_db_in_memory};
use crate::model::category::CategoryName;
use crate::model::entity::{Entity, EntityKind};
use log::{debug, error};
use rusqlite::{params, Connection, Row, TransactionBehavior};
use std::path::Path;
use uuid::Uuid;

const ENTITY_SELECT_SQL: &str = "SELECT
    uuid,
    kind,
    title,
    category,
    note,
    is_favorite,
    is_completed,
    is_archived,
    created_at,
    completed_at,
    usage_count,
    rating
FROM entities
ORDER BY rowid ASC;";

/// Gateway over an owned, migrated SQLite connection.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    /// Opens a file-backed gateway, applying migrations first.
    pub fn open(path: impl AsRef<Path>) -> GatewayResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory gateway, mainly for tests.
    pub fn open_in_memory() -> GatewayResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already migrated connection.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl PersistenceGateway for SqliteGateway {
    fn load(&self) -> GatewayResult<Vec<Entity>> {
        let mut stmt = self.conn.prepare(ENTITY_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut entities = Vec::new();

        while let Some(row) = rows.next()? {
            entities.push(parse_entity_row(row)?);
        }

        debug!(
            "event=collection_load module=gateway status=ok count={}",
            entities.len()
        );
        Ok(entities)
    }

    fn save(&mut self, entities: &[Entity]) -> GatewayResult<()> {
        for entity in entities {
            entity.validate().map_err(|err| {
                PersistenceError::InvalidData(format!("refusing to save entity {}: {err}", entity.id))
            })?;
        }

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .inspect_err(|err| {
                error!("event=collection_save module=gateway status=error error={err}");
            })?;

        tx.execute("DELETE FROM entities;", [])?;
        for entity in entities {
            tx.execute(
                "INSERT INTO entities (
                    uuid,
                    kind,
                    title,
                    category,
                    note,
                    is_favorite,
                    is_completed,
                    is_archived,
                    created_at,
                    completed_at,
                    usage_count,
                    rating
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12);",
                params![
                    entity.id.to_string(),
                    kind_to_db(entity.kind),
                    entity.title.as_str(),
                    entity.category.as_ref().map(CategoryName::as_str),
                    entity.note.as_deref(),
                    bool_to_int(entity.is_favorite),
                    bool_to_int(entity.is_completed),
                    bool_to_int(entity.is_archived),
                    entity.created_at,
                    entity.completed_at,
                    i64::from(entity.usage_count),
                    entity.rating.map(i64::from),
                ],
            )?;
        }
        tx.commit()?;

        debug!(
            "event=collection_save module=gateway status=ok count={}",
            entities.len()
        );
        Ok(())
    }
}

fn parse_entity_row(row: &Row<'_>) -> GatewayResult<Entity> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        PersistenceError::InvalidData(format!("invalid uuid value `{uuid_text}` in entities.uuid"))
    })?;

    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        PersistenceError::InvalidData(format!(
            "invalid entity kind `{kind_text}` in entities.kind"
        ))
    })?;

    let category = match row.get::<_, Option<String>>("category")? {
        Some(value) => Some(CategoryName::new(value.as_str()).map_err(|_| {
            PersistenceError::InvalidData(format!(
                "invalid category value `{value}` in entities.category"
            ))
        })?),
        None => None,
    };

    let usage_count_raw: i64 = row.get("usage_count")?;
    let usage_count = u32::try_from(usage_count_raw).map_err(|_| {
        PersistenceError::InvalidData(format!(
            "invalid usage_count value `{usage_count_raw}` in entities.usage_count"
        ))
    })?;

    let rating = match row.get::<_, Option<i64>>("rating")? {
        Some(value) => Some(u8::try_from(value).map_err(|_| {
            PersistenceError::InvalidData(format!(
                "invalid rating value `{value}` in entities.rating"
            ))
        })?),
        None => None,
    };

    let entity = Entity {
        id,
        kind,
        title: row.get("title")?,
        category,
        note: row.get("note")?,
        is_favorite: int_to_bool(row.get("is_favorite")?, "is_favorite")?,
        is_completed: int_to_bool(row.get("is_completed")?, "is_completed")?,
        is_archived: int_to_bool(row.get("is_archived")?, "is_archived")?,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
        usage_count,
        rating,
    };
    entity
        .validate()
        .map_err(|err| PersistenceError::InvalidData(err.to_string()))?;
    Ok(entity)
}

fn kind_to_db(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Event => "event",
        EntityKind::Plant => "plant",
        EntityKind::BeautyProduct => "beauty_product",
        EntityKind::Perfume => "perfume",
        EntityKind::HomeTask => "home_task",
        EntityKind::Place => "place",
        EntityKind::Subject => "subject",
    }
}

fn parse_kind(value: &str) -> Option<EntityKind> {
    match value {
        "event" => Some(EntityKind::Event),
        "plant" => Some(EntityKind::Plant),
        "beauty_product" => Some(EntityKind::BeautyProduct),
        "perfume" => Some(EntityKind::Perfume),
        "home_task" => Some(EntityKind::HomeTask),
        "place" => Some(EntityKind::Place),
        "subject" => Some(EntityKind::Subject),
        _ => None,
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> GatewayResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(PersistenceError::InvalidData(format!(
            "invalid {column} value `{other}` in entities.{column}"
        ))),
    }
}
