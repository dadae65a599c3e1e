use crate::category_actor::CategoryError;
use crate::clients::{
    AdminClient, CategoryClient, ContactClient, ExperienceClient, ProjectClient, SkillClient,
};
use crate::config::{AdminConfig, ConfigError};
use crate::framework::{CollectionContext, CollectionError, Feedback, RemoteEntity};
use crate::model::{Category, ContactMessage, Experience, Project, Skill};
use crate::transport::rest::ApiClient;
use crate::transport::{RestTransport, Transport};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// One transport per resource.
pub struct Transports {
    pub projects: Arc<dyn Transport<Project>>,
    pub skills: Arc<dyn Transport<Skill>>,
    pub categories: Arc<dyn Transport<Category>>,
    pub experience: Arc<dyn Transport<Experience>>,
    pub contact: Arc<dyn Transport<ContactMessage>>,
}

impl Transports {
    /// REST transports sharing one HTTP client and session.
    pub fn rest(api: &ApiClient) -> Self {
        Self {
            projects: Arc::new(RestTransport::<Project>::new(api.clone())),
            skills: Arc::new(RestTransport::<Skill>::new(api.clone())),
            categories: Arc::new(RestTransport::<Category>::new(api.clone())),
            experience: Arc::new(RestTransport::<Experience>::new(api.clone())),
            contact: Arc::new(RestTransport::<ContactMessage>::new(api.clone())),
        }
    }
}

/// Outcome of [`AdminDashboard::load_all`]: item count or error per resource.
#[derive(Debug)]
pub struct LoadReport {
    pub results: Vec<(&'static str, Result<usize, CollectionError>)>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.results.iter().all(|(_, r)| r.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &CollectionError)> {
        self.results
            .iter()
            .filter_map(|(resource, r)| r.as_ref().err().map(|e| (*resource, e)))
    }
}

/// The runtime orchestrator for the admin dashboard.
///
/// Owns one collection actor per resource. Actors share nothing but the feedback
/// channel, so a failing `projects` endpoint never blocks `skills`.
///
/// # Example
///
/// ```ignore
/// let (feedback, mut notifications) = feedback_channel();
/// let dashboard = AdminDashboard::new(&api, &config, feedback)?;
///
/// dashboard.load_all().await;
/// dashboard.projects.create_project(fields).await?;
///
/// dashboard.shutdown().await?;
/// ```
pub struct AdminDashboard {
    pub projects: ProjectClient,
    pub skills: SkillClient,
    pub categories: CategoryClient,
    pub experience: ExperienceClient,
    pub contact: ContactClient,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl AdminDashboard {
    /// Starts every collection against the REST API.
    pub fn new(
        api: &ApiClient,
        config: &AdminConfig,
        feedback: Feedback,
    ) -> Result<Self, ConfigError> {
        Self::with_transports(config, Transports::rest(api), feedback)
    }

    /// Starts every collection against the given transports.
    ///
    /// The config is validated first; nothing is spawned when it is rejected.
    pub fn with_transports(
        config: &AdminConfig,
        transports: Transports,
        feedback: Feedback,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        // 1. Create actors (no dependencies yet)
        let (project_actor, projects) = crate::project_actor::new(config);
        let (skill_actor, skills) = crate::skill_actor::new(config);
        let (category_actor, categories) = crate::category_actor::new(config);
        let (experience_actor, experience) = crate::experience_actor::new(config);
        let (contact_actor, contact) = crate::contact_actor::new(config);

        // 2. Start actors with their context injected
        let handles = vec![
            tokio::spawn(project_actor.run(CollectionContext::new(
                transports.projects,
                feedback.clone(),
            ))),
            tokio::spawn(skill_actor.run(CollectionContext::new(
                transports.skills,
                feedback.clone(),
            ))),
            tokio::spawn(category_actor.run(CollectionContext::new(
                transports.categories,
                feedback.clone(),
            ))),
            tokio::spawn(experience_actor.run(CollectionContext::new(
                transports.experience,
                feedback.clone(),
            ))),
            tokio::spawn(contact_actor.run(CollectionContext::new(transports.contact, feedback))),
        ];

        info!("Dashboard started");
        Ok(Self {
            projects,
            skills,
            categories,
            experience,
            contact,
            handles,
        })
    }

    /// Loads every collection concurrently.
    pub async fn load_all(&self) -> LoadReport {
        let (projects, skills, categories, experience, contact) = tokio::join!(
            self.projects.inner().load(),
            self.skills.inner().load(),
            self.categories.inner().load(),
            self.experience.inner().load(),
            self.contact.inner().load(),
        );
        let report = LoadReport {
            results: vec![
                (Project::RESOURCE, projects.map(|items| items.len())),
                (Skill::RESOURCE, skills.map(|items| items.len())),
                (Category::RESOURCE, categories.map(|items| items.len())),
                (Experience::RESOURCE, experience.map(|items| items.len())),
                (ContactMessage::RESOURCE, contact.map(|items| items.len())),
            ],
        };
        for (resource, e) in report.failures() {
            warn!(resource, error = %e, "Initial load failed");
        }
        report
    }

    /// Deletes a category, then reloads skills since the server removes the skills
    /// filed under it.
    pub async fn delete_category(&self, id: String) -> Result<(), CategoryError> {
        self.categories.delete(id).await?;
        self.skills
            .inner()
            .load()
            .await
            .map_err(|e| CategoryError::SkillsStale(e.to_string()))?;
        Ok(())
    }

    /// Gracefully shuts down every collection.
    ///
    /// Teardown is explicit, so cloned clients held elsewhere cannot keep an actor
    /// alive. Results still in flight are discarded.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down dashboard...");

        // Step 1: stop each actor; an already-closed one is fine
        let _ = tokio::join!(
            self.projects.inner().teardown(),
            self.skills.inner().teardown(),
            self.categories.inner().teardown(),
            self.experience.inner().teardown(),
            self.contact.inner().teardown(),
        );

        // Step 2: wait for all actor tasks to complete
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Dashboard shutdown complete.");
        Ok(())
    }
}
