use std::fmt;

use chrono::{DateTime, TimeZone};

use crate::careers::form::{format_vnd, group_digits, FreelancerForm, FullTimeForm, Grouping};

const RATE_UNSPECIFIED: &str = "Chưa xác định";

/// Markdown digest of a full-time application, posted alongside the raw
/// fields for chat notifications.
pub fn fulltime_summary<Tz>(
    form: &FullTimeForm,
    portfolio_urls: &[String],
    submitted_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let salary = form.expected_salary.amount().ok().flatten().map(|amount| {
        let grouped = group_digits(amount, Grouping::English);
        match present(form.salary_type.as_deref()) {
            Some(salary_type) => format!("{grouped} VND ({salary_type})"),
            None => format!("{grouped} VND"),
        }
    });

    let lines = [
        Some("## 📋 NEW APPLICATION".to_string()),
        Some("### 👤 Personal Information".to_string()),
        Some(format!("**Full Name:** {}", form.full_name)),
        Some(format!("**Email:** {}", form.email)),
        Some(format!("**Phone:** {}", form.phone)),
        Some(format!("**LinkedIn:** {}", portfolio_urls.join(" | "))),
        Some("### 💼 Job Information".to_string()),
        Some(format!("**Position:** {}", form.position)),
        Some(format!("**Employment Type:** {}", form.employment_type)),
        Some(format!("**Experience:** {}", form.experience)),
        Some("### 📝 Additional Information".to_string()),
        present(form.how_did_you_hear.as_deref())
            .map(|source| format!("**How did you hear about TD CONSULTING:** {source}")),
        present(form.available_start_date.as_deref())
            .map(|date| format!("**Available Start Date:** {date}")),
        salary.map(|salary| format!("**Expected Salary:** {salary}")),
        present(form.additional_message.as_deref())
            .map(|message| format!("**Message:** {message}")),
        form.resume()
            .map(|resume| format!("**Resume attached:** 📎 {}", resume.file_name())),
        Some("---".to_string()),
        Some(format!(
            "⏰ *Submitted at: {}*",
            submitted_at.format("%-m/%-d/%Y, %-I:%M:%S %p")
        )),
    ];

    join_lines(lines)
}

/// Vietnamese digest for the freelancer variant.
pub fn freelancer_summary<Tz>(
    form: &FreelancerForm,
    portfolio_urls: &[String],
    submitted_at: &DateTime<Tz>,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let rate = match form.hourly_rate.amount() {
        Ok(Some(amount)) => format_vnd(amount),
        _ => RATE_UNSPECIFIED.to_string(),
    };

    let lines = [
        Some("## 📋 ĐƠN ỨNG TUYỂN MỚI (FREELANCER)".to_string()),
        Some("### 👤 Thông tin cá nhân".to_string()),
        Some(format!("**Họ và tên:** {}", form.full_name)),
        Some(format!("**Email:** {}", form.email)),
        Some(format!("**Số điện thoại:** {}", form.phone)),
        Some(format!("**Portfolio:** {}", portfolio_urls.join(" | "))),
        Some("### 💼 Thông tin công việc".to_string()),
        Some(format!("**Vị trí ứng tuyển:** {}", form.position)),
        Some(format!("**Mức phí theo giờ:** {rate}")),
        Some(format!("**Số giờ làm việc/tuần:** {}", form.hours_per_week)),
        present(form.additional_message.as_deref())
            .map(|message| format!("\n### 📝 Lời nhắn\n{message}")),
        Some("---".to_string()),
        Some(format!(
            "⏰ *Gửi lúc: {}*",
            submitted_at.format("%H:%M:%S %-d/%-m/%Y")
        )),
    ];

    join_lines(lines)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Absent and empty lines are dropped.
fn join_lines<const N: usize>(lines: [Option<String>; N]) -> String {
    lines
        .into_iter()
        .flatten()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
