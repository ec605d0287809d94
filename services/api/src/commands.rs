use crate::infra::{parse_date, parse_income};
use chrono::{Local, NaiveDate};
use clap::Args;
use customer_score::customers::{score_breakdown, validate_fields, FieldSet, ScoreBreakdown};
use customer_score::error::AppError;
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Annual income, e.g. 85000.50
    #[arg(long, value_parser = parse_income)]
    pub(crate) income: Decimal,
    /// Birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) birth_date: NaiveDate,
    /// Reference date for the age calculation (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ValidateArgs {
    #[arg(long)]
    pub(crate) tax_id: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) postal_code: Option<String>,
    #[arg(long)]
    pub(crate) area_code: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
}

impl ValidateArgs {
    fn field_set(&self) -> FieldSet<'_> {
        FieldSet {
            state: self.state.as_deref(),
            postal_code: self.postal_code.as_deref(),
            area_code: self.area_code.as_deref(),
            phone: self.phone.as_deref(),
            tax_id: self.tax_id.as_deref(),
            email: self.email.as_deref(),
        }
    }
}

pub(crate) fn run_score(args: ScoreArgs) {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let breakdown = score_breakdown(args.income, args.birth_date, today);
    println!("{}", render_breakdown(&breakdown, today));
}

fn render_breakdown(breakdown: &ScoreBreakdown, today: NaiveDate) -> String {
    format!(
        "Score as of {today}: {}\n- income bracket {:?}: +{}\n- age {} ({:?}): +{}",
        breakdown.total,
        breakdown.income_bracket,
        breakdown.income_points,
        breakdown.age,
        breakdown.age_bracket,
        breakdown.age_points,
    )
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    validate_fields(&args.field_set())?;
    println!("valid");
    Ok(())
}
