use super::currency::CurrencyInput;
use super::links::SupplementaryLinks;
use super::options::{PositionOptions, HOURS_PER_WEEK};
use super::validation::{self, FormField, ValidationErrors};

const FIELDS: [FormField; 8] = [
    FormField::FullName,
    FormField::Email,
    FormField::Phone,
    FormField::PortfolioUrl,
    FormField::Position,
    FormField::HourlyRate,
    FormField::HoursPerWeek,
    FormField::AdditionalMessage,
];

/// Freelancer application. Complete and validated, but the landing page
/// never mounts it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreelancerForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub portfolio_url: String,
    /// Position or skill.
    pub position: String,
    pub hourly_rate: CurrencyInput,
    pub hours_per_week: String,
    pub additional_message: Option<String>,
    pub links: SupplementaryLinks,
}

impl FreelancerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self, positions: &PositionOptions) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for field in FIELDS {
            errors.check(field, self.check(field, positions));
        }
        for index in 0..self.links.len() {
            let field = FormField::PortfolioLink(index);
            errors.check(field, self.check(field, positions));
        }
        errors.into_result()
    }

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
            FormField::PortfolioUrl => {
                validation::url(&self.portfolio_url, "Please provide your portfolio link")
            }
            FormField::Position => validation::one_of(
                &self.position,
                positions.titles.as_slice(),
                "Please select a position",
            ),
            FormField::HourlyRate => match self.hourly_rate.amount() {
                Ok(Some(_)) => None,
                Ok(None) => Some("Please enter your hourly rate"),
                Err(_) => Some("Please enter a valid amount"),
            },
            FormField::HoursPerWeek => validation::one_of(
                &self.hours_per_week,
                &HOURS_PER_WEEK,
                "Please select available hours per week",
            ),
            FormField::AdditionalMessage => {
                validation::message(self.additional_message.as_deref())
            }
            FormField::PortfolioLink(index) => self
                .links
                .rows()
                .get(index)
                .and_then(|row| validation::supplementary_link(&row.url)),
            _ => None,
        }
    }

    /// Percentage of the seven required fields that hold a value.
    pub fn progress(&self) -> f32 {
        validation::progress(&[
            !self.full_name.is_empty(),
            !self.email.is_empty(),
            !self.phone.is_empty(),
            !self.portfolio_url.is_empty(),
            !self.position.is_empty(),
            !self.hourly_rate.is_empty(),
            !self.hours_per_week.is_empty(),
        ])
    }

    pub fn message_counter(&self) -> String {
        validation::message_counter(self.additional_message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> FreelancerForm {
        FreelancerForm {
            full_name: "Trần Thị Bình".to_string(),
            email: "binh@example.com".to_string(),
            phone: "0912345678".to_string(),
            portfolio_url: "https://binh.artstation.com".to_string(),
            position: "Graphic Designer".to_string(),
            hourly_rate: CurrencyInput::from_typed("250000"),
            hours_per_week: "10-20 hours".to_string(),
            ..FreelancerForm::default()
        }
    }

    #[test]
    fn filled_form_passes() {
        assert_eq!(filled().validate(&PositionOptions::fallback()), Ok(()));
    }

    #[test]
    fn portfolio_url_is_required() {
        let mut form = filled();
        form.portfolio_url.clear();
        let errors = form
            .validate(&PositionOptions::fallback())
            .expect_err("missing portfolio");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(FormField::PortfolioUrl),
            Some("Please provide your portfolio link")
        );
    }

    #[test]
    fn hourly_rate_and_hours_are_required() {
        let mut form = filled();
        form.hourly_rate = CurrencyInput::from_typed("không");
        form.hours_per_week.clear();
        let errors = form
            .validate(&PositionOptions::fallback())
            .expect_err("missing rate");
        assert_eq!(
            errors.get(FormField::HourlyRate),
            Some("Please enter your hourly rate")
        );
        assert_eq!(
            errors.get(FormField::HoursPerWeek),
            Some("Please select available hours per week")
        );
    }

    #[test]
    fn progress_tracks_seven_required_fields() {
        assert_eq!(FreelancerForm::new().progress(), 0.0);
        assert_eq!(filled().progress(), 100.0);
        let mut form = filled();
        form.hourly_rate = CurrencyInput::default();
        let expected = 6.0 / 7.0 * 100.0;
        assert!((form.progress() - expected).abs() < 0.01);
    }
}
