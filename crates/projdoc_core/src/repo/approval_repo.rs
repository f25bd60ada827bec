//! Approval route persistence in the documents store.
//!
//! Routes own their stages: saving a route rewrites its stage rows in one
//! transaction, and stages are read back in `stage_order`.

use crate::db::Store;
use crate::model::approval::{ApprovalRoute, ApprovalStage, RouteId};
use crate::model::vocab::{RouteStatus, StageStatus};
use crate::repo::{ensure_store_ready, vocab_column, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("approval_routes", &["id", "name", "status"]),
    (
        "approval_stages",
        &[
            "id",
            "route_id",
            "approver",
            "position",
            "stage_order",
            "status",
            "comment",
        ],
    ),
];

pub trait ApprovalRouteRepository {
    fn get_all_routes(&self) -> RepoResult<Vec<ApprovalRoute>>;
    fn get_route(&self, id: RouteId) -> RepoResult<Option<ApprovalRoute>>;
    fn save_route(&self, route: &ApprovalRoute) -> RepoResult<ApprovalRoute>;
}

pub struct SqliteApprovalRouteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteApprovalRouteRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_ready(conn, Store::Documents, REQUIRED_SCHEMA)?;
        Ok(Self { conn })
    }
}

impl ApprovalRouteRepository for SqliteApprovalRouteRepository<'_> {
    fn get_all_routes(&self) -> RepoResult<Vec<ApprovalRoute>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, status FROM approval_routes ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut routes = Vec::new();
        while let Some(row) = rows.next()? {
            let mut route = parse_route_row(row)?;
            route.stages = load_stages(self.conn, row.get("id")?)?;
            routes.push(route);
        }
        Ok(routes)
    }

    fn get_route(&self, id: RouteId) -> RepoResult<Option<ApprovalRoute>> {
        let route = self
            .conn
            .query_row(
                "SELECT id, name, status FROM approval_routes WHERE id = ?1;",
                [id],
                |row| Ok(parse_route_row(row)),
            )
            .optional()?
            .transpose()?;

        match route {
            Some(mut route) => {
                route.stages = load_stages(self.conn, id)?;
                Ok(Some(route))
            }
            None => Ok(None),
        }
    }

    fn save_route(&self, route: &ApprovalRoute) -> RepoResult<ApprovalRoute> {
        route.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let id = match route.id {
            Some(id) => {
                let changed = tx.execute(
                    "UPDATE approval_routes SET name = ?1, status = ?2 WHERE id = ?3;",
                    params![route.name.as_str(), route.status.code(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound {
                        entity: "approval route",
                        id,
                    });
                }
                id
            }
            None => {
                tx.execute(
                    "INSERT INTO approval_routes (name, status) VALUES (?1, ?2);",
                    params![route.name.as_str(), route.status.code()],
                )?;
                tx.last_insert_rowid()
            }
        };

        let mut saved = route.clone();
        saved.id = Some(id);
        tx.execute("DELETE FROM approval_stages WHERE route_id = ?1;", [id])?;
        for stage in saved.stages.iter_mut() {
            tx.execute(
                "INSERT INTO approval_stages (
                    route_id,
                    approver,
                    position,
                    stage_order,
                    status,
                    comment
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
                params![
                    id,
                    stage.approver.as_str(),
                    stage.position.as_str(),
                    stage.order,
                    stage.status.code(),
                    stage.comment.as_str(),
                ],
            )?;
            stage.id = Some(tx.last_insert_rowid());
        }
        tx.commit()?;

        saved.stages.sort_by_key(|stage| stage.order);
        Ok(saved)
    }
}

fn parse_route_row(row: &Row<'_>) -> RepoResult<ApprovalRoute> {
    Ok(ApprovalRoute {
        id: Some(row.get("id")?),
        name: row.get("name")?,
        status: vocab_column(row, "status", RouteStatus::parse_stored)?,
        stages: Vec::new(),
    })
}

fn load_stages(conn: &Connection, route_id: RouteId) -> RepoResult<Vec<ApprovalStage>> {
    let mut stmt = conn.prepare(
        "SELECT id, approver, position, stage_order, status, comment
         FROM approval_stages
         WHERE route_id = ?1
         ORDER BY stage_order ASC, id ASC;",
    )?;
    let mut rows = stmt.query([route_id])?;
    let mut stages = Vec::new();
    while let Some(row) = rows.next()? {
        stages.push(ApprovalStage {
            id: Some(row.get("id")?),
            approver: row.get("approver")?,
            position: row.get("position")?,
            order: row.get("stage_order")?,
            status: vocab_column(row, "status", StageStatus::parse_stored)?,
            comment: row.get::<_, Option<String>>("comment")?.unwrap_or_default(),
        });
    }
    Ok(stages)
}
