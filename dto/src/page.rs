use crate::error::ValidationError;
use crate::validation::validate_not_empty;
use chrono::NaiveDateTime;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Content page of the website, addressed by its slug.
#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct Page {
    id: String,
    title: String,
    slug: String,
    content: String,
    created_by: String,
    is_published: bool,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

impl Page {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        title: String,
        slug: String,
        content: String,
        created_by: String,
        is_published: bool,
        created_at: NaiveDateTime,
        updated_at: NaiveDateTime,
    ) -> Self {
        Self {
            id,
            title,
            slug,
            content,
            created_by,
            is_published,
            created_at,
            updated_at,
        }
    }

    pub fn from_request(id: String, request: PageCreate, created_by: String, now: NaiveDateTime) -> Self {
        Self::new(
            id,
            request.title,
            request.slug,
            request.content,
            created_by,
            request.is_published,
            now,
            now,
        )
    }

    pub fn updated_with(self, update: PageUpdate, now: NaiveDateTime) -> Self {
        Self {
            title: update.title.unwrap_or(self.title),
            slug: update.slug.unwrap_or(self.slug),
            content: update.content.unwrap_or(self.content),
            is_published: update.is_published.unwrap_or(self.is_published),
            updated_at: now,
            ..self
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone)]
pub struct PageCreate {
    title: String,
    slug: String,
    content: String,
    #[serde(default)]
    is_published: bool,
}

impl PageCreate {
    pub fn new(title: String, slug: String, content: String, is_published: bool) -> Self {
        Self {
            title,
            slug,
            content,
            is_published,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_not_empty("title", &self.title)?;
        validate_not_empty("slug", &self.slug)
    }
}

#[derive(Debug, Serialize, Deserialize, Getters, PartialEq, Eq, Clone, Default)]
pub struct PageUpdate {
    title: Option<String>,
    slug: Option<String>,
    content: Option<String>,
    is_published: Option<bool>,
}

impl PageUpdate {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_not_empty("title", title)?;
        }
        match &self.slug {
            Some(slug) => validate_not_empty("slug", slug),
            None => Ok(()),
        }
    }
}

#[cfg(any(test, feature = "test"))]
pub mod tests {
    use super::*;

    impl PageCreate {
        pub fn new_test(slug: &str, is_published: bool) -> Self {
            PageCreate::new(
                format!("Title of {slug}"),
                slug.to_owned(),
                "<p>Welcome</p>".to_owned(),
                is_published,
            )
        }
    }

}
