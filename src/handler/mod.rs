pub mod user_handler;
pub mod gift_handler;
pub mod announcement_handler;
pub mod exchange_date_handler;

use crate::util::error::HandlerError;
use bson::oid::ObjectId;

/// A path id that is not a valid ObjectId cannot match any record.
pub(crate) fn parse_object_id(id: &str, not_found: &str) -> Result<ObjectId, HandlerError> {
    ObjectId::parse_str(id).map_err(|_| HandlerError::not_found(not_found))
}
