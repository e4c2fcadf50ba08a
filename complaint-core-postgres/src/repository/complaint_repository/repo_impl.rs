use std::future::Future;
use std::time::Duration;

use chrono::Utc;
use complaint_core_db::models::{
    AttachmentModel, CommentModel, ComplaintModel, HistoryEntryModel, RatingModel,
};
use complaint_core_db::repository::{StoreError, StoreResult};
use sqlx::postgres::PgRow;
use sqlx::{PgConnection, PgPool, Row};
use uuid::Uuid;

use crate::utils::{get_heapless_string, map_sqlx_err, TryFromRow};

/// Default per-operation deadline.
const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(30);

/// Postgres-backed complaint store.
///
/// Comments, history entries and attachments live in their own append-only
/// tables; every mutation inserts its audit row inside the same transaction
/// as the mutation, so a status update can never commit without its history
/// entry, and concurrent appenders never overwrite each other's rows.
pub struct PostgresComplaintStore {
    pub(super) pool: PgPool,
    pub(super) op_timeout: Duration,
}

impl PostgresComplaintStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            op_timeout: DEFAULT_OP_TIMEOUT,
        }
    }

    pub fn with_timeout(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    /// Runs one store operation under the configured deadline. An elapsed
    /// deadline surfaces as a retryable `Unavailable`, never as a hang.
    pub(super) async fn guard<T>(
        &self,
        fut: impl Future<Output = StoreResult<T>>,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Unavailable(format!(
                "store operation exceeded {:?}",
                self.op_timeout
            ))),
        }
    }
}

impl TryFromRow<PgRow> for ComplaintModel {
    /// Maps the flat `complaint` row; child collections are filled in by
    /// `load_aggregate`.
    fn try_from_row(row: &PgRow) -> Result<Self, StoreError> {
        let internal = |e: sqlx::Error| StoreError::Internal(e.to_string());
        Ok(ComplaintModel {
            id: row.try_get("id").map_err(internal)?,
            submitter_id: row.try_get("submitter_id").map_err(internal)?,
            submitter_name: get_heapless_string(row, "submitter_name")?,
            submitter_email: get_heapless_string(row, "submitter_email")?,
            title: get_heapless_string(row, "title")?,
            description: row.try_get("description").map_err(internal)?,
            category: row.try_get("category").map_err(internal)?,
            priority: row.try_get("priority").map_err(internal)?,
            status: row.try_get("status").map_err(internal)?,
            is_anonymous: row.try_get("is_anonymous").map_err(internal)?,
            assigned_to: row.try_get("assigned_to").map_err(internal)?,
            due_date: row.try_get("due_date").map_err(internal)?,
            attachments: Vec::new(),
            comments: Vec::new(),
            rating: None,
            history: Vec::new(),
            created_at: row.try_get("created_at").map_err(internal)?,
            updated_at: row.try_get("updated_at").map_err(internal)?,
        })
    }
}

impl TryFromRow<PgRow> for AttachmentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, StoreError> {
        let internal = |e: sqlx::Error| StoreError::Internal(e.to_string());
        Ok(AttachmentModel {
            filename: get_heapless_string(row, "filename")?,
            url: row.try_get("url").map_err(internal)?,
            storage_ref: get_heapless_string(row, "storage_ref")?,
        })
    }
}

impl TryFromRow<PgRow> for CommentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, StoreError> {
        let internal = |e: sqlx::Error| StoreError::Internal(e.to_string());
        Ok(CommentModel {
            id: row.try_get("id").map_err(internal)?,
            complaint_id: row.try_get("complaint_id").map_err(internal)?,
            author_id: row.try_get("author_id").map_err(internal)?,
            message: row.try_get("message").map_err(internal)?,
            created_at: row.try_get("created_at").map_err(internal)?,
        })
    }
}

impl TryFromRow<PgRow> for HistoryEntryModel {
    fn try_from_row(row: &PgRow) -> Result<Self, StoreError> {
        let internal = |e: sqlx::Error| StoreError::Internal(e.to_string());
        Ok(HistoryEntryModel {
            id: row.try_get("id").map_err(internal)?,
            complaint_id: row.try_get("complaint_id").map_err(internal)?,
            seq: row.try_get("seq").map_err(internal)?,
            action: get_heapless_string(row, "action")?,
            actor_id: row.try_get("actor_id").map_err(internal)?,
            remark: row.try_get("remark").map_err(internal)?,
            recorded_at: row.try_get("recorded_at").map_err(internal)?,
            antecedent_hash: row.try_get("antecedent_hash").map_err(internal)?,
            hash: row.try_get("hash").map_err(internal)?,
        })
    }
}

impl TryFromRow<PgRow> for RatingModel {
    fn try_from_row(row: &PgRow) -> Result<Self, StoreError> {
        let internal = |e: sqlx::Error| StoreError::Internal(e.to_string());
        Ok(RatingModel {
            complaint_id: row.try_get("complaint_id").map_err(internal)?,
            score: row.try_get("score").map_err(internal)?,
            feedback: row.try_get("feedback").map_err(internal)?,
            rated_at: row.try_get("rated_at").map_err(internal)?,
        })
    }
}

/// Loads the full aggregate: complaint row plus attachments, comments,
/// rating and history in their stable orders.
pub(super) async fn load_aggregate(
    conn: &mut PgConnection,
    id: Uuid,
) -> StoreResult<Option<ComplaintModel>> {
    let row = sqlx::query("SELECT * FROM complaint WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_err)?;
    let Some(row) = row else {
        return Ok(None);
    };
    let mut complaint = ComplaintModel::try_from_row(&row)?;

    let rows = sqlx::query(
        "SELECT * FROM complaint_attachment WHERE complaint_id = $1 ORDER BY position",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_err)?;
    for row in &rows {
        complaint.attachments.push(AttachmentModel::try_from_row(row)?);
    }

    let rows = sqlx::query(
        "SELECT * FROM complaint_comment WHERE complaint_id = $1 ORDER BY created_at, id",
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_err)?;
    for row in &rows {
        complaint.comments.push(CommentModel::try_from_row(row)?);
    }

    let rows = sqlx::query("SELECT * FROM complaint_history WHERE complaint_id = $1 ORDER BY seq")
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(map_sqlx_err)?;
    for row in &rows {
        complaint.history.push(HistoryEntryModel::try_from_row(row)?);
    }

    let row = sqlx::query("SELECT * FROM complaint_rating WHERE complaint_id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_sqlx_err)?;
    if let Some(row) = &row {
        complaint.rating = Some(RatingModel::try_from_row(row)?);
    }

    Ok(Some(complaint))
}

pub(super) async fn insert_history(
    conn: &mut PgConnection,
    entry: &HistoryEntryModel,
) -> StoreResult<()> {
    sqlx::query(
        r#"
        INSERT INTO complaint_history
            (id, complaint_id, seq, action, actor_id, remark, recorded_at, antecedent_hash, hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
    )
    .bind(entry.id)
    .bind(entry.complaint_id)
    .bind(entry.seq)
    .bind(entry.action.as_str())
    .bind(entry.actor_id)
    .bind(entry.remark.as_str())
    .bind(entry.recorded_at)
    .bind(entry.antecedent_hash)
    .bind(entry.hash)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx_err)?;
    Ok(())
}

/// Bumps `updated_at` on the aggregate root. Returns NotFound when the
/// complaint does not exist, so mutations fail before inserting child rows.
pub(super) async fn touch_complaint(conn: &mut PgConnection, id: Uuid) -> StoreResult<()> {
    let result = sqlx::query("UPDATE complaint SET updated_at = $2 WHERE id = $1")
        .bind(id)
        .bind(Utc::now())
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_err)?;
    if result.rows_affected() == 0 {
        return Err(StoreError::NotFound(id));
    }
    Ok(())
}
