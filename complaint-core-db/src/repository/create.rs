use async_trait::async_trait;

use crate::models::complaint::ComplaintModel;
use crate::repository::error::StoreResult;

/// Repository trait for persisting a freshly filed complaint.
///
/// The aggregate arrives fully formed: due date computed, initial "Created"
/// history entry sealed. The store persists the complaint together with its
/// attachments and initial history entry in a single transaction.
#[async_trait]
pub trait CreateComplaint: Send + Sync {
    /// Persist a new complaint aggregate.
    ///
    /// # Returns
    /// * `Ok(ComplaintModel)` - the stored aggregate with store-maintained
    ///   timestamps populated
    /// * `Err` - if the transaction could not be executed
    async fn create(&self, complaint: ComplaintModel) -> StoreResult<ComplaintModel>;
}
