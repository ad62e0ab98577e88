use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One editable "additional link" row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRow {
    /// Row identity for list editing; never submitted.
    pub id: Uuid,
    pub url: String,
}

/// Growable list of supplementary portfolio links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplementaryLinks {
    rows: Vec<LinkRow>,
}

impl SupplementaryLinks {
    pub fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut links = Self::default();
        for url in urls {
            let id = links.add();
            links.update(id, url);
        }
        links
    }

    /// Append an empty row and return its id.
    pub fn add(&mut self) -> Uuid {
        let id = Uuid::new_v4();
        self.rows.push(LinkRow {
            id,
            url: String::new(),
        });
        id
    }

    /// Returns `false` when no row has this id.
    pub fn update(&mut self, id: Uuid, url: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.url = url.into();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != id);
        self.rows.len() != before
    }

    pub fn rows(&self) -> &[LinkRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-blank URLs in entry order.
    pub fn filled(&self) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(|row| row.url.as_str())
            .filter(|url| !url.trim().is_empty())
    }
}

/// Primary URL first (when present), then every non-blank supplementary link.
pub fn merge_portfolio_urls(primary: Option<&str>, links: &SupplementaryLinks) -> Vec<String> {
    primary
        .into_iter()
        .chain(links.filled())
        .filter(|url| !url.trim().is_empty())
        .map(str::to_string)
        .collect()
}
