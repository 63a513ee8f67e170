/// A cafe record as the rest of the application sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cafe {
    pub id: i32,
    pub author_id: Option<i32>,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
    pub created_at: String,
}

/// Fields supplied by the add-cafe flow. The author is attached by the
/// service from the acting admin's identity.
#[derive(Debug, Clone)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}
