use super::currency::CurrencyInput;
use super::links::SupplementaryLinks;
use super::options::{
    PositionOptions, EMPLOYMENT_TYPES, EXPERIENCE_LEVELS, REFERRAL_SOURCES, SALARY_TYPES,
};
use super::resume::{FileRejected, ResumeFile, SelectionSource};
use super::validation::{self, FormField, ValidationErrors};

const FIELDS: [FormField; 12] = [
    FormField::FullName,
    FormField::Email,
    FormField::Phone,
    FormField::LinkedinUrl,
    FormField::Position,
    FormField::EmploymentType,
    FormField::Experience,
    FormField::HowDidYouHear,
    FormField::AvailableStartDate,
    FormField::ExpectedSalary,
    FormField::SalaryType,
    FormField::AdditionalMessage,
];

/// Full-time / part-time application, the variant the page mounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullTimeForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    /// Optional profile URL; also the first entry of `portfolioUrls`.
    pub linkedin_url: String,
    pub position: String,
    pub employment_type: String,
    pub experience: String,
    pub how_did_you_hear: Option<String>,
    /// `YYYY-MM-DD`
    pub available_start_date: Option<String>,
    pub expected_salary: CurrencyInput,
    pub salary_type: Option<String>,
    pub additional_message: Option<String>,
    pub links: SupplementaryLinks,
    resume: Option<ResumeFile>,
}

impl FullTimeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resume(&self) -> Option<&ResumeFile> {
        self.resume.as_ref()
    }

    /// Run the selection checks and store the file. A rejected file leaves
    /// the current resume in place.
    pub fn attach_resume(
        &mut self,
        file_name: impl Into<String>,
        content: Vec<u8>,
        source: SelectionSource,
    ) -> Result<(), FileRejected> {
        let resume = ResumeFile::select(file_name, content, source)?;
        self.resume = Some(resume);
        Ok(())
    }

    pub fn set_resume(&mut self, resume: ResumeFile) {
        self.resume = Some(resume);
    }

    pub fn remove_resume(&mut self) -> Option<ResumeFile> {
        self.resume.take()
    }

    pub fn validate(&self, positions: &PositionOptions) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in FIELDS {
            errors.check(field, self.check(field, positions));
        }
        for (index, _) in self.links.rows().iter().enumerate() {
            let field = FormField::PortfolioLink(index);
            errors.check(field, self.check(field, positions));
        }
        errors.into_result()
    }

    /// Message for one control, or `None` when it passes. Fields that belong
    /// to the freelancer variant always pass.
    pub fn validate_field(
        &self,
        field: FormField,
        positions: &PositionOptions,
    ) -> Option<&'static str> {
        self.check(field, positions)
    }

    fn check(&self, field: FormField, positions: &PositionOptions) -> Option<&'static str> {
        match field {
            FormField::FullName => validation::full_name(&self.full_name),
            FormField::Email => validation::email(&self.email),
            FormField::Phone => validation::phone(&self.phone),
            FormField::LinkedinUrl => {
                validation::optional_url(&self.linkedin_url, "Please provide a valid URL")
            }
            FormField::Position => validation::one_of(
                &self.position,
                positions.titles.as_slice(),
                "Please select a position",
            ),
            FormField::EmploymentType => validation::one_of(
                &self.employment_type,
                &EMPLOYMENT_TYPES,
                "Please select employment type",
            ),
            FormField::Experience => validation::one_of(
                &self.experience,
                &EXPERIENCE_LEVELS,
                "Please select your experience level",
            ),
            FormField::HowDidYouHear => validation::optional_one_of(
                self.how_did_you_hear.as_deref(),
                &REFERRAL_SOURCES,
                "Please select how you heard about us",
            ),
            FormField::AvailableStartDate => {
                validation::optional_date(self.available_start_date.as_deref())
            }
            FormField::ExpectedSalary => self
                .expected_salary
                .amount()
                .err()
                .map(|_| "Please enter a valid amount"),
            FormField::SalaryType => validation::optional_one_of(
                self.salary_type.as_deref(),
                &SALARY_TYPES,
                "Please select a salary type",
            ),
            FormField::AdditionalMessage => {
                validation::message(self.additional_message.as_deref())
            }
            FormField::PortfolioLink(index) => self
                .links
                .rows()
                .get(index)
                .and_then(|row| validation::supplementary_link(&row.url)),
            FormField::PortfolioUrl | FormField::HourlyRate | FormField::HoursPerWeek => None,
        }
    }

    /// Percentage of the six required fields that hold a value.
    pub fn progress(&self) -> f32 {
        validation::progress(&[
            !self.full_name.is_empty(),
            !self.email.is_empty(),
            !self.phone.is_empty(),
            !self.position.is_empty(),
            !self.employment_type.is_empty(),
            !self.experience.is_empty(),
        ])
    }

    pub fn message_counter(&self) -> String {
        validation::message_counter(self.additional_message.as_deref())
    }
}
