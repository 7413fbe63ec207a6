use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field_update::FieldUpdate;
use super::slug;
use crate::error::DomainError;

/// Largest accepted `content` body, in bytes.
pub const MAX_CONTENT_BYTES: usize = 1024 * 1024;

/// Post entity - the aggregate root of the blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub intro: Option<Intro>,
    pub summary_points: Vec<String>,
    pub sections: Vec<ContentSection>,
    pub impact_points: Vec<String>,
    pub insight_points: Vec<String>,
    pub resources: Vec<Resource>,
    pub tags: Vec<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opening question and hook of a decomposed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intro {
    pub question: String,
    pub hook: String,
}

/// One ordered body section. Owned by its post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub points: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// External reference attached to a post. Owned by its post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub title: String,
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Create payload. `slug` is derived from `title` when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewPost {
    pub slug: Option<String>,
    pub title: String,
    pub content: String,
    pub description: Option<String>,
    pub intro: Option<Intro>,
    pub summary_points: Vec<String>,
    pub sections: Vec<ContentSection>,
    pub impact_points: Vec<String>,
    pub insight_points: Vec<String>,
    pub resources: Vec<Resource>,
    pub tags: Vec<String>,
    pub is_published: bool,
}

/// Partial update payload. Absent keys are left untouched; `slug` is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PostPatch {
    pub title: FieldUpdate<String>,
    pub content: FieldUpdate<String>,
    pub description: FieldUpdate<String>,
    pub intro: FieldUpdate<Intro>,
    pub summary_points: FieldUpdate<Vec<String>>,
    pub sections: FieldUpdate<Vec<ContentSection>>,
    pub impact_points: FieldUpdate<Vec<String>>,
    pub insight_points: FieldUpdate<Vec<String>>,
    pub resources: FieldUpdate<Vec<Resource>>,
    pub tags: FieldUpdate<Vec<String>>,
    pub is_published: FieldUpdate<bool>,
}

impl Post {
    /// Materialize a new post from a validated create payload.
    pub fn new(slug: String, input: NewPost) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            slug,
            title: input.title.trim().to_string(),
            content: input.content,
            description: input.description,
            intro: input.intro,
            summary_points: input.summary_points,
            sections: input.sections,
            impact_points: input.impact_points,
            insight_points: input.insight_points,
            resources: input.resources,
            tags: input.tags,
            is_published: input.is_published,
            published_at: input.is_published.then_some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a validated patch into this post.
    ///
    /// `published_at` is stamped only on the first transition to published.
    pub fn apply_patch(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let FieldUpdate::Set(title) = patch.title {
            self.title = title.trim().to_string();
        }
        if let FieldUpdate::Set(content) = patch.content {
            self.content = content;
        }
        patch.description.apply_nullable(&mut self.description);
        patch.intro.apply_nullable(&mut self.intro);
        patch.summary_points.apply_or_default(&mut self.summary_points);
        patch.sections.apply_or_default(&mut self.sections);
        patch.impact_points.apply_or_default(&mut self.impact_points);
        patch.insight_points.apply_or_default(&mut self.insight_points);
        patch.resources.apply_or_default(&mut self.resources);
        patch.tags.apply_or_default(&mut self.tags);

        if let FieldUpdate::Set(published) = patch.is_published {
            self.is_published = published;
            if published && self.published_at.is_none() {
                self.published_at = Some(now);
            }
        }

        self.updated_at = now;
    }
}

impl NewPost {
    /// The client-supplied slug, ignoring an empty string.
    pub fn requested_slug(&self) -> Option<&str> {
        self.slug.as_deref().filter(|s| !s.is_empty())
    }

    /// Slug to store: the requested one, or one derived from the title.
    pub fn resolve_slug(&self) -> Result<String, DomainError> {
        if let Some(requested) = self.requested_slug() {
            return Ok(requested.to_string());
        }

        let derived = slug::normalize(&self.title);
        if derived.is_empty() {
            return Err(DomainError::validation(
                "title must contain at least one letter or digit",
            ));
        }
        Ok(derived)
    }

    /// Whether any part of the decomposed (intro/summary/sections/...) schema is used.
    pub fn is_structured(&self) -> bool {
        self.intro.is_some()
            || !self.summary_points.is_empty()
            || !self.sections.is_empty()
            || !self.impact_points.is_empty()
            || !self.insight_points.is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title is required"));
        }

        if let Some(requested) = self.requested_slug() {
            if !slug::is_canonical(requested) {
                return Err(DomainError::validation(
                    "slug can only contain lowercase letters, numbers, and single hyphens",
                ));
            }
        }

        validate_content_size(&self.content)?;

        if self.is_structured() {
            match &self.intro {
                Some(intro) => validate_intro(intro)?,
                None => {
                    return Err(DomainError::validation(
                        "intro question and hook are required",
                    ));
                }
            }
            require_points(&self.summary_points, "at least one summary point is required")?;
            if self.sections.is_empty() {
                return Err(DomainError::validation(
                    "at least one content section is required",
                ));
            }
            require_points(&self.impact_points, "at least one impact point is required")?;
            require_points(&self.insight_points, "at least one insight point is required")?;
        } else if self.content.trim().is_empty() {
            return Err(DomainError::validation("content is required"));
        }

        validate_sections(&self.sections)?;
        validate_resources(&self.resources)
    }
}

impl PostPatch {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_unset()
            && self.content.is_unset()
            && self.description.is_unset()
            && self.intro.is_unset()
            && self.summary_points.is_unset()
            && self.sections.is_unset()
            && self.impact_points.is_unset()
            && self.insight_points.is_unset()
            && self.resources.is_unset()
            && self.tags.is_unset()
            && self.is_published.is_unset()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.title {
            FieldUpdate::Clear => return Err(DomainError::validation("title cannot be null")),
            FieldUpdate::Set(title) if title.trim().is_empty() => {
                return Err(DomainError::validation("title cannot be empty"));
            }
            _ => {}
        }

        match &self.content {
            FieldUpdate::Clear => return Err(DomainError::validation("content cannot be null")),
            FieldUpdate::Set(content) => validate_content_size(content)?,
            FieldUpdate::Unset => {}
        }

        if self.is_published.is_clear() {
            return Err(DomainError::validation("is_published cannot be null"));
        }

        if let Some(intro) = self.intro.as_set() {
            validate_intro(intro)?;
        }
        if let Some(sections) = self.sections.as_set() {
            validate_sections(sections)?;
        }
        if let Some(resources) = self.resources.as_set() {
            validate_resources(resources)?;
        }

        Ok(())
    }
}

fn validate_content_size(content: &str) -> Result<(), DomainError> {
    if content.len() > MAX_CONTENT_BYTES {
        return Err(DomainError::validation(
            "post content exceeds maximum size limit",
        ));
    }
    Ok(())
}

fn validate_intro(intro: &Intro) -> Result<(), DomainError> {
    if intro.question.trim().is_empty() || intro.hook.trim().is_empty() {
        return Err(DomainError::validation(
            "intro question and hook are required",
        ));
    }
    Ok(())
}

fn require_points(points: &[String], message: &str) -> Result<(), DomainError> {
    if points.iter().all(|p| p.trim().is_empty()) {
        return Err(DomainError::validation(message));
    }
    Ok(())
}

fn validate_sections(sections: &[ContentSection]) -> Result<(), DomainError> {
    if sections.iter().any(|s| s.title.trim().is_empty()) {
        return Err(DomainError::validation("content section title is required"));
    }
    Ok(())
}

fn validate_resources(resources: &[Resource]) -> Result<(), DomainError> {
    if resources
        .iter()
        .any(|r| r.title.trim().is_empty() || r.url.trim().is_empty())
    {
        return Err(DomainError::validation("resource title and url are required"));
    }
    Ok(())
}
