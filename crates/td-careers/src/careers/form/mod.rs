//! Applicant form state, option lists and validation rules.

pub mod currency;
pub mod freelancer;
pub mod fulltime;
pub mod links;
pub mod options;
pub mod resume;
pub mod validation;

pub use currency::{format_vnd, group_digits, AmountOverflow, CurrencyInput, Grouping};
pub use freelancer::FreelancerForm;
pub use fulltime::FullTimeForm;
pub use links::{merge_portfolio_urls, LinkRow, SupplementaryLinks};
pub use options::{OptionsSource, PositionOptions, StaticOptions, FALLBACK_POSITIONS};
pub use resume::{FileRejected, ResumeFile, SelectionSource, FILE_TOO_LARGE, MAX_RESUME_BYTES};
pub use validation::{FieldError, FormField, ValidationErrors};
