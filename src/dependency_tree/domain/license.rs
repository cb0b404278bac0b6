use serde::Serialize;

/// License declared by a component
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct License {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    more_info_url: Option<String>,
}

impl License {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            more_info_url: None,
        }
    }

    pub fn with_more_info_url(mut self, url: impl Into<String>) -> Self {
        self.more_info_url = Some(url.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn more_info_url(&self) -> Option<&str> {
        self.more_info_url.as_deref()
    }
}
