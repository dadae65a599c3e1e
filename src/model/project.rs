use crate::transport::FileUpload;
use serde::{Deserialize, Serialize};

/// Largest accepted image upload.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    /// URL of the uploaded image.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub live_url: String,
    #[serde(default)]
    pub github_url: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Where the project image comes from on create/update.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageSource {
    #[default]
    None,
    /// Keep the image already stored on the server.
    Existing(String),
    Upload(FileUpload),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectFields {
    pub title: String,
    pub description: String,
    pub live_url: String,
    pub github_url: String,
    pub tech_stack: Vec<String>,
    pub featured: bool,
    pub image: ImageSource,
}

impl ProjectFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn tech(mut self, tech: impl Into<String>) -> Self {
        let tech = tech.into();
        let tech = tech.trim();
        if !tech.is_empty() && !self.tech_stack.iter().any(|t| t == tech) {
            self.tech_stack.push(tech.to_string());
        }
        self
    }

    pub fn image(mut self, image: ImageSource) -> Self {
        self.image = image;
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn links(mut self, live_url: impl Into<String>, github_url: impl Into<String>) -> Self {
        self.live_url = live_url.into();
        self.github_url = github_url.into();
        self
    }
}

impl From<&Project> for ProjectFields {
    /// Edit form for an existing project; the stored image is kept.
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            live_url: project.live_url.clone(),
            github_url: project.github_url.clone(),
            tech_stack: project.tech_stack.clone(),
            featured: project.featured,
            image: if project.image.is_empty() {
                ImageSource::None
            } else {
                ImageSource::Existing(project.image.clone())
            },
        }
    }
}
