//! Record identifiers.

use chrono::Utc;
use uuid::Uuid;

/// Generate a practically-unique record id: current Unix time in
/// milliseconds followed by a short random hex suffix. No collision
/// check is performed against existing records.
pub fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}{}", millis, &suffix[..7])
}
