//! Credit score derived from annual income and age.
//!
//! The score is the sum of two bracket lookups and always falls in `150..=500`. Nothing is
//! cached: callers recompute it whenever it is requested, passing the reference date in.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const INCOME_LOWER_BOUND: Decimal = Decimal::from_parts(60_000, 0, 0, false, 0);
const INCOME_UPPER_BOUND: Decimal = Decimal::from_parts(120_000, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeBracket {
    /// Below 60,000.
    Low,
    /// 60,000 through 120,000 inclusive.
    Middle,
    /// Above 120,000.
    High,
}

impl IncomeBracket {
    pub fn for_income(annual_income: Decimal) -> Self {
        if annual_income < INCOME_LOWER_BOUND {
            Self::Low
        } else if annual_income <= INCOME_UPPER_BOUND {
            Self::Middle
        } else {
            Self::High
        }
    }

    pub const fn points(self) -> u16 {
        match self {
            Self::Low => 100,
            Self::Middle => 200,
            Self::High => 300,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBracket {
    /// Under 25.
    Young,
    /// 25 through 40 inclusive.
    Adult,
    /// Over 40.
    Senior,
}

impl AgeBracket {
    pub fn for_age(age: i32) -> Self {
        match age {
            i32::MIN..=24 => Self::Young,
            25..=40 => Self::Adult,
            _ => Self::Senior,
        }
    }

    pub const fn points(self) -> u16 {
        match self {
            Self::Young => 50,
            Self::Adult => 150,
            Self::Senior => 200,
        }
    }
}

/// Age in whole years, decremented when the birth day-of-year is still ahead of `today`'s.
///
/// Comparing ordinals rather than (month, day) is off by one around leap years: someone born
/// on 1 March of a leap year (ordinal 61) is not counted a year older on 1 March of a common
/// year (ordinal 60). Existing scores depend on this rule, so it is kept as is.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let age = today.year() - birth_date.year();
    if birth_date.ordinal() > today.ordinal() {
        age - 1
    } else {
        age
    }
}

/// Audit trail for a computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub income_bracket: IncomeBracket,
    pub income_points: u16,
    pub age: i32,
    pub age_bracket: AgeBracket,
    pub age_points: u16,
    pub total: u16,
}

pub fn score_breakdown(
    annual_income: Decimal,
    birth_date: NaiveDate,
    today: NaiveDate,
) -> ScoreBreakdown {
    let income_bracket = IncomeBracket::for_income(annual_income);
    let age = age_on(birth_date, today);
    let age_bracket = AgeBracket::for_age(age);

    ScoreBreakdown {
        income_bracket,
        income_points: income_bracket.points(),
        age,
        age_bracket,
        age_points: age_bracket.points(),
        total: income_bracket.points() + age_bracket.points(),
    }
}

pub fn calculate_score(annual_income: Decimal, birth_date: NaiveDate, today: NaiveDate) -> u16 {
    score_breakdown(annual_income, birth_date, today).total
}
