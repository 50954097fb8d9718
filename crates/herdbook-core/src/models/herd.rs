use serde::{Deserialize, Serialize};

/// A herd: the grouping unit for animals and the scope of every engine
/// operation. The owning property is the authorization boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Herd {
    pub id: String,
    pub name: String,
    pub property_id: String,
}
