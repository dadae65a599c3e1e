//! RemoteEntity implementation for the Project resource.
//!
//! Projects are sent as multipart forms: `techStack` is repeated once per technology,
//! `featured` travels as `"true"`/`"false"` and a newly chosen image is attached as the
//! `image` file part.

use crate::framework::{EntityFields, NoAction, RemoteEntity, ValidationError};
use crate::model::{ImageSource, Project, ProjectFields, MAX_IMAGE_BYTES};
use crate::transport::{MultipartBody, RequestBody};

impl EntityFields for ProjectFields {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::new("title", "Please fill in all required fields"));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::new(
                "description",
                "Please fill in all required fields",
            ));
        }
        match &self.image {
            ImageSource::None => {
                return Err(ValidationError::new("image", "Please upload a project image"));
            }
            ImageSource::Existing(url) if url.trim().is_empty() => {
                return Err(ValidationError::new("image", "Please upload a project image"));
            }
            ImageSource::Existing(_) => {}
            ImageSource::Upload(file) => {
                if !file.content_type.starts_with("image/") {
                    return Err(ValidationError::new("image", "Please select an image file"));
                }
                if file.bytes.len() > MAX_IMAGE_BYTES {
                    return Err(ValidationError::new("image", "Image must be less than 5MB"));
                }
            }
        }
        if self.tech_stack.is_empty() {
            return Err(ValidationError::new(
                "techStack",
                "Please add at least one technology",
            ));
        }
        Ok(())
    }

    fn to_body(&self) -> RequestBody {
        let mut form = MultipartBody::default()
            .text("title", &self.title)
            .text("description", &self.description)
            .text("liveUrl", &self.live_url)
            .text("githubUrl", &self.github_url)
            .text("featured", self.featured.to_string());
        for tech in &self.tech_stack {
            form = form.text("techStack", tech);
        }
        if let ImageSource::Upload(file) = &self.image {
            form = form.file("image", file.clone());
        }
        RequestBody::Multipart(form)
    }
}

impl RemoteEntity for Project {
    type Id = String;
    type Fields = ProjectFields;
    type Action = NoAction;
    const RESOURCE: &'static str = "projects";
    const LABEL: &'static str = "Project";

    fn id(&self) -> &String {
        &self.id
    }

    /// A new upload keeps the old image URL until the server reports the new one.
    fn merge(&self, fields: &ProjectFields) -> Self {
        let image = match &fields.image {
            ImageSource::Existing(url) => url.clone(),
            ImageSource::None | ImageSource::Upload(_) => self.image.clone(),
        };
        Self {
            id: self.id.clone(),
            title: fields.title.clone(),
            description: fields.description.clone(),
            image,
            live_url: fields.live_url.clone(),
            github_url: fields.github_url.clone(),
            tech_stack: fields.tech_stack.clone(),
            featured: fields.featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::FileUpload;

    fn png(size: usize) -> FileUpload {
        FileUpload {
            file_name: "shot.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0; size],
        }
    }

    fn valid() -> ProjectFields {
        ProjectFields::new("Portfolio", "My site")
            .tech("Rust")
            .image(ImageSource::Upload(png(16)))
    }

    #[test]
    fn valid_fields_pass() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn missing_title_is_rejected_first() {
        let fields = ProjectFields {
            title: "  ".into(),
            ..valid()
        };
        let err = fields.validate().unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "Please fill in all required fields");
    }

    #[test]
    fn image_rules() {
        let err = valid().image(ImageSource::None).validate().unwrap_err();
        assert_eq!(err.message, "Please upload a project image");

        let pdf = FileUpload {
            content_type: "application/pdf".into(),
            ..png(10)
        };
        let err = valid().image(ImageSource::Upload(pdf)).validate().unwrap_err();
        assert_eq!(err.message, "Please select an image file");

        let err = valid()
            .image(ImageSource::Upload(png(MAX_IMAGE_BYTES + 1)))
            .validate()
            .unwrap_err();
        assert_eq!(err.message, "Image must be less than 5MB");

        let kept = valid().image(ImageSource::Existing("/uploads/a.png".into()));
        assert!(kept.validate().is_ok());
    }

    #[test]
    fn empty_tech_stack_is_rejected() {
        let fields = ProjectFields {
            tech_stack: vec![],
            ..valid()
        };
        assert_eq!(fields.validate().unwrap_err().field, "techStack");
    }

    #[test]
    fn body_is_multipart_with_repeated_tech() {
        let fields = valid().tech("Tokio").featured(true);
        let RequestBody::Multipart(form) = fields.to_body() else {
            panic!("expected multipart body");
        };
        let tech: Vec<_> = form
            .fields
            .iter()
            .filter(|(k, _)| k == "techStack")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(tech, vec!["Rust", "Tokio"]);
        assert!(form.fields.contains(&("featured".into(), "true".into())));
        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].0, "image");
    }

    #[test]
    fn merge_keeps_image_for_new_upload() {
        let project = Project {
            id: "p1".into(),
            title: "Old".into(),
            description: "d".into(),
            image: "/uploads/old.png".into(),
            live_url: String::new(),
            github_url: String::new(),
            tech_stack: vec!["Rust".into()],
            featured: false,
        };
        let merged = project.merge(&valid());
        assert_eq!(merged.id, "p1");
        assert_eq!(merged.title, "Portfolio");
        assert_eq!(merged.image, "/uploads/old.png");
    }
}
