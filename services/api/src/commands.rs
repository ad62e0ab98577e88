use crate::infra::{cli_landing_page, format_local};
use clap::Args;
use std::path::PathBuf;
use td_careers::careers::form::{CurrencyInput, OptionsSource, SupplementaryLinks};
use td_careers::careers::{DescriptionView, ResumeFile, SubmissionError};
use td_careers::error::AppError;

#[derive(Args, Debug, Default)]
pub(crate) struct PositionsArgs {
    /// Print the description of this position title instead of the list
    #[arg(long)]
    pub(crate) describe: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ApplyArgs {
    #[arg(long, default_value = "")]
    pub(crate) full_name: String,
    #[arg(long, default_value = "")]
    pub(crate) email: String,
    #[arg(long, default_value = "")]
    pub(crate) phone: String,
    /// LinkedIn or other profile URL
    #[arg(long, default_value = "")]
    pub(crate) linkedin_url: String,
    #[arg(long, default_value = "")]
    pub(crate) position: String,
    #[arg(long, default_value = "Full-time")]
    pub(crate) employment_type: String,
    #[arg(long, default_value = "")]
    pub(crate) experience: String,
    #[arg(long)]
    pub(crate) how_did_you_hear: Option<String>,
    /// Earliest start date (YYYY-MM-DD)
    #[arg(long)]
    pub(crate) available_start_date: Option<String>,
    /// Expected salary in VND; separators are ignored
    #[arg(long)]
    pub(crate) expected_salary: Option<String>,
    #[arg(long)]
    pub(crate) salary_type: Option<String>,
    #[arg(long)]
    pub(crate) message: Option<String>,
    /// Additional portfolio link; repeat for more
    #[arg(long = "link")]
    pub(crate) links: Vec<String>,
    /// Resume to attach (PDF, DOC or DOCX, up to 10MB)
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
}

pub(crate) async fn run_positions(args: PositionsArgs) -> Result<(), AppError> {
    let page = cli_landing_page()?;

    if let Some(title) = args.describe {
        match page.description_for(&title).await {
            DescriptionView::Position { title, description } => {
                println!("{title}\n");
                println!("{description}");
            }
            DescriptionView::Placeholder { title, body } => {
                println!("{title}");
                println!("{body}");
            }
        }
        return Ok(());
    }

    let options = page.position_options().await;
    match options.source {
        OptionsSource::Directory => println!("Open positions"),
        OptionsSource::Fallback => {
            println!("Open positions (directory unavailable, default list)")
        }
    }
    for title in &options.titles {
        println!("- {title}");
    }
    Ok(())
}

pub(crate) async fn run_company() -> Result<(), AppError> {
    let page = cli_landing_page()?;

    let Some(panel) = page.company_panel().await else {
        println!("Company profile unavailable");
        return Ok(());
    };

    println!("{}", panel.name);
    if !panel.introduction.is_empty() {
        println!("{}\n", panel.introduction);
    }
    for (label, value) in [
        ("Phone", &panel.phone),
        ("Email", &panel.email),
        ("Address", &panel.address),
        ("Website", &panel.website_label),
    ] {
        if !value.is_empty() {
            println!("{label}: {value}");
        }
    }
    for link in &panel.social_links {
        println!("{}: {}", link.label, link.href);
    }
    Ok(())
}

pub(crate) async fn run_apply(args: ApplyArgs) -> Result<(), AppError> {
    let ApplyArgs {
        full_name,
        email,
        phone,
        linkedin_url,
        position,
        employment_type,
        experience,
        how_did_you_hear,
        available_start_date,
        expected_salary,
        salary_type,
        message,
        links,
        resume,
    } = args;

    let mut page = cli_landing_page()?;

    if let Some(path) = resume {
        match ResumeFile::from_path(&path).await {
            Ok(file) => page.form_mut().set_resume(file),
            Err(rejected) => {
                let notice = rejected.notice();
                println!("{}: {}", notice.title, notice.description);
                return Err(rejected.into());
            }
        }
    }

    let form = page.form_mut();
    form.full_name = full_name;
    form.email = email;
    form.phone = phone;
    form.linkedin_url = linkedin_url;
    form.position = position;
    form.employment_type = employment_type;
    form.experience = experience;
    form.how_did_you_hear = how_did_you_hear;
    form.available_start_date = available_start_date;
    form.expected_salary =
        CurrencyInput::from_typed(expected_salary.as_deref().unwrap_or_default());
    form.salary_type = salary_type;
    form.additional_message = message;
    form.links = SupplementaryLinks::from_urls(links);

    match page.submit().await {
        Ok(receipt) => {
            println!(
                "Application submitted at {}",
                format_local(&receipt.submitted_at)
            );
            println!("\n{}", receipt.summary);
            Ok(())
        }
        Err(SubmissionError::Validation(errors)) => {
            println!("Please fix the following fields:");
            for error in errors.iter() {
                println!("  - {}: {}", error.field, error.message);
            }
            Err(SubmissionError::Validation(errors).into())
        }
        Err(other) => {
            if let Some(notice) = other.notice() {
                println!("{}: {}", notice.title, notice.description);
            }
            Err(other.into())
        }
    }
}
