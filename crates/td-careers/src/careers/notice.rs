use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeVariant {
    Destructive,
}

/// Transient toast shown to the applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: NoticeVariant,
}

impl Notice {
    pub const fn destructive(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            variant: NoticeVariant::Destructive,
        }
    }
}
