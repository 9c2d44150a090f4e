//! CMS content-change events and the cached paths they invalidate.

use serde_json::Value;

use crate::error::DomainError;

/// Content type id the CMS uses for blog posts.
pub const BLOG_POST_CONTENT_TYPE: &str = "blogPost";

/// Locale the CMS nests localized fields under.
pub const DEFAULT_LOCALE: &str = "en-US";

/// A content-change notification from the headless CMS.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookEvent {
    pub content_type_id: String,
    pub slug: Option<String>,
    pub raw_payload: Value,
}

impl WebhookEvent {
    pub fn new(content_type_id: impl Into<String>, slug: Option<String>) -> Self {
        Self {
            content_type_id: content_type_id.into(),
            slug,
            raw_payload: Value::Null,
        }
    }

    /// Parse an event from the webhook body.
    ///
    /// Reads `sys.contentType.sys.id` and `fields.slug`, where the slug is
    /// either localized (`{"en-US": "..."}`) or a bare string. A missing
    /// content type yields an empty id.
    pub fn from_payload(payload: Value) -> Result<Self, DomainError> {
        if !payload.is_object() {
            return Err(DomainError::MalformedPayload(
                "webhook body must be a JSON object".to_string(),
            ));
        }

        let content_type_id = payload
            .pointer("/sys/contentType/sys/id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let slug = match payload.pointer("/fields/slug") {
            Some(Value::String(slug)) => Some(slug.clone()),
            Some(Value::Object(localized)) => localized
                .get(DEFAULT_LOCALE)
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        };

        Ok(Self {
            content_type_id,
            slug,
            raw_payload: payload,
        })
    }

    pub fn is_blog_post(&self) -> bool {
        self.content_type_id == BLOG_POST_CONTENT_TYPE
    }

    /// The slug, if present and non-empty.
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|slug| !slug.is_empty())
    }
}

/// Ordered, duplicate-free set of paths to invalidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevalidationTarget {
    paths: Vec<String>,
}

impl RevalidationTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path, keeping first-insertion order. Returns false if already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RevalidationTarget {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut target = Self::new();
        for path in iter {
            target.insert(path);
        }
        target
    }
}

/// Map a content-change event to the cached paths it invalidates.
///
/// Blog posts refresh the blog index, the post page (when the slug is known)
/// and the sitemap. Anything else refreshes the home page and the blog index.
pub fn compute_targets(event: &WebhookEvent) -> RevalidationTarget {
    let mut target = RevalidationTarget::new();

    if event.is_blog_post() {
        target.insert("/blog");
        if let Some(slug) = event.slug() {
            target.insert(format!("/blog/{}", slug));
        }
        target.insert("/sitemap.xml");
    } else {
        target.insert("/");
        target.insert("/blog");
    }

    target
}
