use std::fmt;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{CoachError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum CompanyType {
    Service,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
pub enum WfhSetup {
    Yes,
    No,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl fmt::Display for CompanyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompanyType::Service => write!(f, "Service"),
            CompanyType::Product => write!(f, "Product"),
        }
    }
}

impl fmt::Display for WfhSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WfhSetup::Yes => write!(f, "Yes"),
            WfhSetup::No => write!(f, "No"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RawUserInput {
    pub join_date: NaiveDate,
    pub gender: Gender,
    pub company_type: CompanyType,
    pub wfh_setup: WfhSetup,
    pub designation: u8,
    pub resource_allocation: f64,
    pub mental_fatigue_score: f64,
}

impl RawUserInput {
    pub fn validate(&self) -> Result<()> {
        if self.designation > 5 {
            return Err(CoachError::InputValidation(format!(
                "designation level {} is outside 0-5",
                self.designation
            )));
        }
        if !(1.0..=10.0).contains(&self.resource_allocation) {
            return Err(CoachError::InputValidation(format!(
                "resource allocation {} is outside 1-10",
                self.resource_allocation
            )));
        }
        if !(0.0..=10.0).contains(&self.mental_fatigue_score) {
            return Err(CoachError::InputValidation(format!(
                "mental fatigue score {} is outside 0.0-10.0",
                self.mental_fatigue_score
            )));
        }
        Ok(())
    }
}

/// Model-ready vector whose columns match the artifact's training columns,
/// in training order.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    pub columns: Vec<&'static str>,
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn get(&self, column: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|name| *name == column)
            .map(|index| self.values[index])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskCategory {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskCategory::Low => write!(f, "Low"),
            RiskCategory::Moderate => write!(f, "Moderate"),
            RiskCategory::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PredictionResult {
    pub burn_rate: f64,
    pub risk_category: RiskCategory,
    pub emoji: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Everything the advice retriever is allowed to read for one coaching turn.
#[derive(Debug, Clone, Copy)]
pub struct CoachingContext<'a> {
    pub input: &'a RawUserInput,
    pub prediction: &'a PredictionResult,
    pub days_since_joining: i64,
    pub follow_up_question: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct EmployeeScore {
    pub name: String,
    pub burn_rate: f64,
    pub risk_category: RiskCategory,
    pub emoji: &'static str,
}
