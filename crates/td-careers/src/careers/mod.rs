//! Recruitment landing page: remote directory and profile, the applicant
//! form, the submission pipeline and the page shell tying them together.

pub mod form;
pub mod notice;
pub mod pipeline;
pub mod remote;
pub mod router;
pub mod shell;

#[cfg(test)]
mod tests;

pub use form::{
    FileRejected, FormField, FreelancerForm, FullTimeForm, PositionOptions, ResumeFile,
    SelectionSource, ValidationErrors,
};
pub use notice::{Notice, NoticeVariant};
pub use pipeline::{
    DeliveryError, HttpWebhook, SubmissionError, SubmissionPipeline, SubmissionReceipt,
    SubmissionState, WebhookSink,
};
pub use remote::{CompanyProfile, FetchError, NocoDbClient, Position};
pub use router::{careers_router, ApplicationRequest, ResumeUpload};
pub use shell::{DescriptionView, LandingPage, LandingSources, LandingView, PageView};
