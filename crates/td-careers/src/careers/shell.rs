//! Page state binding the form to the remote directory and profile.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::careers::form::{FreelancerForm, FullTimeForm, PositionOptions, StaticOptions};
use crate::careers::pipeline::{
    SubmissionError, SubmissionPipeline, SubmissionReceipt, SubmissionState, WebhookSink,
};
use crate::careers::remote::cache::{DEFAULT_RETRIES, DEFAULT_RETRY_DELAY};
use crate::careers::remote::{
    CompanyProfile, CompanyProfileSource, NocoDbClient, Position, PositionDirectory, SocialLink,
    TtlCache, POSITIONS_TTL, PROFILE_TTL,
};
use crate::config::NocoDbConfig;

pub const PLACEHOLDER_TITLE: &str = "Select a Position";
pub const PLACEHOLDER_BODY: &str =
    "Choose a position from the dropdown to view the job description and requirements.";

/// Where the page reads its data from. Kept so the page can be rebuilt.
#[derive(Debug, Clone)]
pub struct LandingSources {
    pub client: NocoDbClient,
    pub jobs_table_id: String,
    pub company_table_id: String,
    pub retry_delay: Duration,
}

impl LandingSources {
    pub fn from_config(config: &NocoDbConfig) -> Self {
        Self {
            client: NocoDbClient::from_config(config),
            jobs_table_id: config.jobs_table_id.clone(),
            company_table_id: config.company_table_id.clone(),
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    fn directory(&self) -> PositionDirectory {
        let cache = TtlCache::new("positions", POSITIONS_TTL)
            .with_retries(DEFAULT_RETRIES, self.retry_delay);
        PositionDirectory::with_cache(self.client.clone(), self.jobs_table_id.clone(), cache)
    }

    fn profile(&self) -> CompanyProfileSource {
        let cache = TtlCache::new("company-profile", PROFILE_TTL)
            .with_retries(DEFAULT_RETRIES, self.retry_delay);
        CompanyProfileSource::with_cache(self.client.clone(), self.company_table_id.clone(), cache)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageView {
    Form,
    Confirmation,
}

/// Right-hand description panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DescriptionView {
    Placeholder {
        title: &'static str,
        body: &'static str,
    },
    Position {
        title: String,
        description: String,
    },
}

impl DescriptionView {
    pub fn placeholder() -> Self {
        DescriptionView::Placeholder {
            title: PLACEHOLDER_TITLE,
            body: PLACEHOLDER_BODY,
        }
    }

    /// Exact title match against the fetched positions.
    pub fn for_title(title: &str, positions: &[Position]) -> Self {
        if title.is_empty() {
            return Self::placeholder();
        }
        positions
            .iter()
            .find(|position| position.title == title)
            .map(|position| DescriptionView::Position {
                title: position.title.clone(),
                description: position.description.clone(),
            })
            .unwrap_or_else(Self::placeholder)
    }
}

/// Company side panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyPanel {
    pub name: String,
    pub introduction: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub website: String,
    pub website_label: String,
    pub social_links: Vec<SocialLink>,
}

impl From<&CompanyProfile> for CompanyPanel {
    fn from(profile: &CompanyProfile) -> Self {
        Self {
            name: profile.name.clone(),
            introduction: profile.introduction.clone(),
            phone: profile.phone.clone(),
            email: profile.email.clone(),
            address: profile.address.clone(),
            website: profile.website.clone(),
            website_label: profile.website_label().to_string(),
            social_links: profile.social_links(),
        }
    }
}

/// Everything the page renders, in one serializable snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct LandingView {
    pub view: PageView,
    pub positions: PositionOptions,
    /// `None` hides the panel.
    pub company: Option<CompanyPanel>,
    pub description: DescriptionView,
    pub options: StaticOptions,
    pub progress: f32,
    pub message_counter: String,
    pub submission: SubmissionState,
}

/// The landing page: full-time form, remote data and submit cycle.
pub struct LandingPage<W> {
    sources: LandingSources,
    sink: Arc<W>,
    directory: PositionDirectory,
    profile: CompanyProfileSource,
    pipeline: SubmissionPipeline<W>,
    form: FullTimeForm,
    // Never mounted; kept with the page so both variants share one session.
    freelancer: FreelancerForm,
    view: PageView,
    receipt: Option<SubmissionReceipt>,
}

impl<W> LandingPage<W>
where
    W: WebhookSink,
{
    pub fn new(sources: LandingSources, sink: Arc<W>) -> Self {
        Self {
            directory: sources.directory(),
            profile: sources.profile(),
            pipeline: SubmissionPipeline::new(Arc::clone(&sink)),
            sources,
            sink,
            form: FullTimeForm::new(),
            freelancer: FreelancerForm::new(),
            view: PageView::Form,
            receipt: None,
        }
    }

    pub fn form(&self) -> &FullTimeForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FullTimeForm {
        &mut self.form
    }

    pub fn freelancer_form(&self) -> &FreelancerForm {
        &self.freelancer
    }

    pub fn view(&self) -> PageView {
        self.view
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.pipeline.state()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// Remote titles, or the fallback list while the directory is unavailable.
    pub async fn position_options(&self) -> PositionOptions {
        match self.directory.positions().await {
            Ok(positions) => PositionOptions::from_directory(&positions),
            Err(error) => {
                warn!(error = %error, "position directory unavailable, using fallback list");
                PositionOptions::fallback()
            }
        }
    }

    /// `None` while the profile is missing or unreadable.
    pub async fn company_panel(&self) -> Option<CompanyPanel> {
        match self.profile.profile().await {
            Ok(profile) => profile.as_deref().map(CompanyPanel::from),
            Err(error) => {
                warn!(error = %error, "company profile unavailable, hiding panel");
                None
            }
        }
    }

    pub async fn description(&self) -> DescriptionView {
        self.description_for(&self.form.position).await
    }

    /// Description panel for any title, as the viewer shows it.
    pub async fn description_for(&self, title: &str) -> DescriptionView {
        match self.directory.positions().await {
            Ok(positions) => DescriptionView::for_title(title, &positions),
            Err(error) => {
                warn!(error = %error, "position directory unavailable, showing placeholder");
                DescriptionView::placeholder()
            }
        }
    }

    pub async fn render(&self) -> LandingView {
        LandingView {
            view: self.view,
            positions: self.position_options().await,
            company: self.company_panel().await,
            description: self.description().await,
            options: StaticOptions::get(),
            progress: self.form.progress(),
            message_counter: self.form.message_counter(),
            submission: self.pipeline.state(),
        }
    }

    /// Validate and deliver the full-time form. Success swaps the page to the
    /// confirmation view; any failure leaves the form untouched. Refused on
    /// the confirmation view until `submit_another`.
    pub async fn submit(&mut self) -> Result<&SubmissionReceipt, SubmissionError> {
        if self.view == PageView::Confirmation {
            return Err(SubmissionError::AlreadySubmitted);
        }
        let positions = self.position_options().await;
        let receipt = self.pipeline.submit_full_time(&self.form, &positions).await?;
        self.view = PageView::Confirmation;
        Ok(self.receipt.insert(receipt))
    }

    /// Deliver a form owned by the caller, such as one built from an HTTP
    /// request, through its own submit cycle. The page state is not touched.
    pub async fn deliver_application(
        &self,
        form: &FullTimeForm,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let positions = self.position_options().await;
        SubmissionPipeline::new(Arc::clone(&self.sink))
            .submit_full_time(form, &positions)
            .await
    }

    /// Start over from a fresh page: empty form, new caches, idle pipeline.
    pub fn submit_another(&mut self) {
        *self = Self::new(self.sources.clone(), Arc::clone(&self.sink));
    }
}
