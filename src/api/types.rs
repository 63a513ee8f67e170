use serde::Serialize;

use crate::models::cafe::Cafe;
use crate::models::user::{Role, UserAccount};

/// Flash-message category, carried alongside data or errors so the
/// presentation layer can render the right kind of banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeCategory {
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub category: NoticeCategory,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            category: NoticeCategory::Danger,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            notice: None,
        }
    }

    pub fn with_notice(data: T, notice: Notice) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            notice: Some(notice),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            notice: None,
        }
    }

    pub fn rejection(message: impl Into<String>, notice: Notice) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            notice: Some(notice),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CafeDto {
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

impl From<Cafe> for CafeDto {
    fn from(cafe: Cafe) -> Self {
        Self {
            id: cafe.id,
            author_id: cafe.author_id,
            name: cafe.name,
            map_url: cafe.map_url,
            img_url: cafe.img_url,
            location: cafe.location,
            seats: cafe.seats,
            has_toilet: cafe.has_toilet,
            has_wifi: cafe.has_wifi,
            has_sockets: cafe.has_sockets,
            can_take_calls: cafe.can_take_calls,
            coffee_price: cafe.coffee_price,
            created_at: cafe.created_at,
        }
    }
}

/// User info without the password hash.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
}

impl From<UserAccount> for UserDto {
    fn from(user: UserAccount) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub cafes: u64,
    pub users: u64,
}
