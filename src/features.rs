use chrono::NaiveDate;

use crate::error::{CoachError, Result};
use crate::models::{CompanyType, FeatureVector, Gender, RawUserInput, WfhSetup};

/// How one model column is derived from the raw input. The indicator
/// variants use drop-first encoding: the reference value (Female, Product,
/// No) contributes no column of its own and shows up as all-zeros.
#[derive(Debug, Clone, Copy)]
pub enum Derivation {
    Designation,
    ResourceAllocation,
    MentalFatigue,
    DaysSinceJoining,
    GenderIsMale,
    CompanyIsService,
    WfhIsAvailable,
}

/// Declared feature schema, in the order the model was trained on. Column
/// names are the training-time names and must match the artifact exactly;
/// divergence is caught at startup, not papered over at request time.
pub const SCHEMA: &[(&str, Derivation)] = &[
    ("Designation", Derivation::Designation),
    ("Resource Allocation", Derivation::ResourceAllocation),
    ("Mental Fatigue Score", Derivation::MentalFatigue),
    ("Days_Since_Joining", Derivation::DaysSinceJoining),
    ("Gender_Male", Derivation::GenderIsMale),
    ("Company Type_Service", Derivation::CompanyIsService),
    ("WFH Setup Available_Yes", Derivation::WfhIsAvailable),
];

pub fn schema_columns() -> Vec<&'static str> {
    SCHEMA.iter().map(|(name, _)| *name).collect()
}

/// Tenure in whole days as of `eval_date`. A join date after the evaluation
/// date is bad data and is rejected rather than clamped.
pub fn days_since_joining(join_date: NaiveDate, eval_date: NaiveDate) -> Result<i64> {
    let days = (eval_date - join_date).num_days();
    if days < 0 {
        return Err(CoachError::InputValidation(format!(
            "join date {} is after the evaluation date {}",
            join_date, eval_date
        )));
    }
    Ok(days)
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

/// Builds the model-ready vector for one employee. Pure: the evaluation
/// date is a parameter, never an ambient clock read.
pub fn align(raw: &RawUserInput, eval_date: NaiveDate) -> Result<FeatureVector> {
    let days = days_since_joining(raw.join_date, eval_date)? as f64;

    let values = SCHEMA
        .iter()
        .map(|(_, derivation)| match derivation {
            Derivation::Designation => raw.designation as f64,
            Derivation::ResourceAllocation => raw.resource_allocation,
            Derivation::MentalFatigue => raw.mental_fatigue_score,
            Derivation::DaysSinceJoining => days,
            Derivation::GenderIsMale => indicator(raw.gender == Gender::Male),
            Derivation::CompanyIsService => indicator(raw.company_type == CompanyType::Service),
            Derivation::WfhIsAvailable => indicator(raw.wfh_setup == WfhSetup::Yes),
        })
        .collect();

    Ok(FeatureVector {
        columns: schema_columns(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_input() -> RawUserInput {
        RawUserInput {
            join_date: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            gender: Gender::Female,
            company_type: CompanyType::Service,
            wfh_setup: WfhSetup::No,
            designation: 2,
            resource_allocation: 3.0,
            mental_fatigue_score: 5.0,
        }
    }

    fn eval_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
    }

    #[test]
    fn output_matches_declared_schema_in_order() {
        let vector = align(&sample_input(), eval_date()).unwrap();
        assert_eq!(vector.columns, schema_columns());
        assert_eq!(vector.values.len(), SCHEMA.len());
    }

    #[test]
    fn numeric_fields_pass_through() {
        let vector = align(&sample_input(), eval_date()).unwrap();
        assert_eq!(vector.get("Designation"), Some(2.0));
        assert_eq!(vector.get("Resource Allocation"), Some(3.0));
        assert_eq!(vector.get("Mental Fatigue Score"), Some(5.0));
    }

    #[test]
    fn tenure_is_a_day_count() {
        let vector = align(&sample_input(), eval_date()).unwrap();
        assert_eq!(vector.get("Days_Since_Joining"), Some(59.0));
    }

    #[test]
    fn reference_values_encode_as_zero() {
        // Female / Service / No: only the Service indicator is non-reference.
        let vector = align(&sample_input(), eval_date()).unwrap();
        assert_eq!(vector.get("Gender_Male"), Some(0.0));
        assert_eq!(vector.get("Company Type_Service"), Some(1.0));
        assert_eq!(vector.get("WFH Setup Available_Yes"), Some(0.0));
    }

    #[test]
    fn non_reference_values_encode_as_one() {
        let mut input = sample_input();
        input.gender = Gender::Male;
        input.company_type = CompanyType::Product;
        input.wfh_setup = WfhSetup::Yes;

        let vector = align(&input, eval_date()).unwrap();
        assert_eq!(vector.get("Gender_Male"), Some(1.0));
        assert_eq!(vector.get("Company Type_Service"), Some(0.0));
        assert_eq!(vector.get("WFH Setup Available_Yes"), Some(1.0));
    }

    #[test]
    fn future_join_date_is_rejected() {
        let mut input = sample_input();
        input.join_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();

        let result = align(&input, eval_date());
        assert!(matches!(result, Err(CoachError::InputValidation(_))));
    }

    #[test]
    fn joining_on_the_evaluation_date_is_zero_days() {
        let mut input = sample_input();
        input.join_date = eval_date();

        let vector = align(&input, eval_date()).unwrap();
        assert_eq!(vector.get("Days_Since_Joining"), Some(0.0));
    }
}
