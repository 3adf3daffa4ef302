/// Profile document types and the shallow draft patch
use crate::profile::media::MediaRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Document-wide invariant: at most this many featured projects
pub const MAX_FEATURED_PROJECTS: usize = 3;

/// Animation preset used when the user has not picked one
pub const DEFAULT_ANIMATION: &str = "dino";

/// The full published/draft profile document.
///
/// Serialized as camelCase JSON; this serialized form is what gets
/// uploaded to content-addressed storage and compared for the
/// unpublished-changes indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDocument {
    pub name: String,
    pub bio: String,
    pub github: String,
    pub animation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme: Option<MediaRef>,
    /// Display label for the readme file; cleared together with `readme`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub readme_name: Option<String>,
    pub projects: Vec<Project>,
    pub activity: Activity,
}

impl Default for ProfileDocument {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            github: String::new(),
            animation: DEFAULT_ANIMATION.to_string(),
            image: None,
            readme: None,
            readme_name: None,
            projects: Vec::new(),
            activity: Activity::default(),
        }
    }
}

impl ProfileDocument {
    /// Number of projects currently marked featured
    pub fn featured_count(&self) -> usize {
        self.projects.iter().filter(|p| p.is_featured).count()
    }

    /// True if any media field still holds a not-yet-uploaded payload
    pub fn has_pending_media(&self) -> bool {
        let pending = |m: &Option<MediaRef>| m.as_ref().map(MediaRef::is_pending).unwrap_or(false);
        pending(&self.image)
            || pending(&self.readme)
            || self.projects.iter().any(|p| pending(&p.media))
            || self
                .activity
                .certificates
                .iter()
                .any(|c| pending(&c.media))
    }

    /// Serialized form used for structural comparison (order-sensitive)
    pub fn serialized(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// A portfolio project entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub is_featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            id: item_id("proj"),
            name: String::new(),
            description: String::new(),
            tags: Vec::new(),
            is_featured: false,
            project_url: None,
            media: None,
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Activity block: blog posts, certificates, social links, contact email
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Activity {
    pub blog_posts: Vec<BlogPost>,
    pub certificates: Vec<Certificate>,
    pub social_links: Vec<SocialLink>,
    pub contact_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<NaiveDate>,
}

impl Default for BlogPost {
    fn default() -> Self {
        Self {
            id: item_id("blog"),
            title: String::new(),
            url: None,
            summary: None,
            published_at: None,
        }
    }
}

impl BlogPost {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Certificate {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaRef>,
}

impl Default for Certificate {
    fn default() -> Self {
        Self {
            id: item_id("cert"),
            title: String::new(),
            issuer: None,
            url: None,
            issued_at: None,
            media: None,
        }
    }
}

impl Certificate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for SocialLink {
    fn default() -> Self {
        Self {
            id: item_id("social"),
            platform: String::new(),
            url: String::new(),
            label: None,
        }
    }
}

/// Generate a prefixed unique id for a list item
fn item_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

/// Shallow top-level partial update of a [`ProfileDocument`].
///
/// Nested blocks (`activity`, `projects`) are replaced whole when present;
/// callers must pass the complete block to avoid losing sibling fields.
/// Double-`Option` fields distinguish "leave unchanged" (outer `None`)
/// from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub github: Option<String>,
    pub animation: Option<String>,
    pub image: Option<Option<MediaRef>>,
    pub readme: Option<Option<MediaRef>>,
    pub readme_name: Option<Option<String>>,
    pub projects: Option<Vec<Project>>,
    pub activity: Option<Activity>,
}

impl DraftPatch {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn bio(mut self, value: impl Into<String>) -> Self {
        self.bio = Some(value.into());
        self
    }

    pub fn github(mut self, value: impl Into<String>) -> Self {
        self.github = Some(value.into());
        self
    }

    pub fn animation(mut self, value: impl Into<String>) -> Self {
        self.animation = Some(value.into());
        self
    }

    pub fn image(mut self, value: Option<MediaRef>) -> Self {
        self.image = Some(value);
        self
    }

    pub fn readme(mut self, value: Option<MediaRef>) -> Self {
        self.readme = Some(value);
        self
    }

    pub fn readme_name(mut self, value: Option<String>) -> Self {
        self.readme_name = Some(value);
        self
    }

    pub fn projects(mut self, value: Vec<Project>) -> Self {
        self.projects = Some(value);
        self
    }

    pub fn activity(mut self, value: Activity) -> Self {
        self.activity = Some(value);
        self
    }

    /// Apply the patch to a document in place (shallow top-level merge)
    pub fn apply_to(self, document: &mut ProfileDocument) {
        if let Some(name) = self.name {
            document.name = name;
        }
        if let Some(bio) = self.bio {
            document.bio = bio;
        }
        if let Some(github) = self.github {
            document.github = github;
        }
        if let Some(animation) = self.animation {
            document.animation = animation;
        }
        if let Some(image) = self.image {
            document.image = image;
        }
        if let Some(readme) = self.readme {
            document.readme = readme;
        }
        if let Some(readme_name) = self.readme_name {
            document.readme_name = readme_name;
        }
        if let Some(projects) = self.projects {
            document.projects = projects;
        }
        if let Some(activity) = self.activity {
            document.activity = activity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_empty() {
        let doc = ProfileDocument::default();
        assert_eq!(doc.name, "");
        assert_eq!(doc.animation, DEFAULT_ANIMATION);
        assert!(doc.projects.is_empty());
        assert!(doc.activity.blog_posts.is_empty());
        assert!(!doc.has_pending_media());
    }

    #[test]
    fn test_camel_case_wire_format() {
        let mut doc = ProfileDocument::default();
        doc.readme_name = Some("README.md".to_string());
        doc.projects.push(Project {
            is_featured: true,
            project_url: Some("https://example.com".to_string()),
            ..Project::new("demo")
        });
        doc.activity.blog_posts.push(BlogPost::new("post"));
        doc.activity.contact_email = "a@b.c".to_string();

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["readmeName"], "README.md");
        assert_eq!(json["projects"][0]["isFeatured"], true);
        assert_eq!(json["projects"][0]["projectUrl"], "https://example.com");
        assert_eq!(json["activity"]["contactEmail"], "a@b.c");
        assert!(json["activity"]["blogPosts"].is_array());
    }

    #[test]
    fn test_patch_is_shallow() {
        let mut doc = ProfileDocument::default();
        doc.bio = "old bio".to_string();
        doc.activity.contact_email = "keep@me.com".to_string();

        DraftPatch::default().name("Alice").apply_to(&mut doc);
        assert_eq!(doc.name, "Alice");
        assert_eq!(doc.bio, "old bio");
        assert_eq!(doc.activity.contact_email, "keep@me.com");

        // Replacing activity replaces the whole block
        DraftPatch::default()
            .activity(Activity::default())
            .apply_to(&mut doc);
        assert_eq!(doc.activity.contact_email, "");
    }

    #[test]
    fn test_patch_can_clear_media() {
        let mut doc = ProfileDocument::default();
        doc.image = Some(MediaRef::published("ipfs://bafyimg"));

        DraftPatch::default().image(None).apply_to(&mut doc);
        assert!(doc.image.is_none());

        // Outer None leaves the field untouched
        doc.image = Some(MediaRef::published("ipfs://bafyimg"));
        DraftPatch::default().name("x").apply_to(&mut doc);
        assert!(doc.image.is_some());
    }

    #[test]
    fn test_featured_count_and_pending_media() {
        let mut doc = ProfileDocument::default();
        for i in 0..4 {
            doc.projects.push(Project {
                is_featured: i < 3,
                ..Project::new(format!("p{}", i))
            });
        }
        assert_eq!(doc.featured_count(), 3);

        doc.projects[0].media = Some(MediaRef::pending_bytes(b"img", "image/png", None));
        assert!(doc.has_pending_media());
    }

    #[test]
    fn test_item_ids_are_unique_and_prefixed() {
        let a = Project::new("a");
        let b = Project::new("b");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("proj_"));
        assert!(BlogPost::new("x").id.starts_with("blog_"));
        assert!(Certificate::new("x").id.starts_with("cert_"));
    }
}
