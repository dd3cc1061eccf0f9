//! Quote context model.
//!
//! The [`QuoteContext`] is the attribute set the quoting workflow supplies
//! for one application. Every rating attribute is optional: a dimension
//! whose attribute is absent is simply skipped during evaluation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{BinaryChoice, DimensionKey};

/// The caller-supplied risk attributes and base premium for one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteContext {
    /// The upstream base premium the adjustment is applied to.
    pub base_premium: Decimal,
    /// Project duration in months.
    #[serde(default)]
    pub project_duration_months: Option<Decimal>,
    /// Maintenance period in months.
    #[serde(default)]
    pub maintenance_period_months: Option<Decimal>,
    /// Principal contractor's experience in years.
    #[serde(default)]
    pub contractor_experience_years: Option<Decimal>,
    /// Number of claims in the last five years.
    #[serde(default)]
    pub claims_count: Option<Decimal>,
    /// Largest single claim amount in the last five years.
    #[serde(default)]
    pub largest_claim_amount: Option<Decimal>,
    /// Number of contractors on the project.
    #[serde(default)]
    pub contractor_count: Option<Decimal>,
    /// Number of subcontractors on the project.
    #[serde(default)]
    pub subcontractor_count: Option<Decimal>,
    /// Total sum insured.
    #[serde(default)]
    pub sum_insured: Option<Decimal>,
    /// Total project value.
    #[serde(default)]
    pub project_value: Option<Decimal>,
    /// Contract works section value.
    #[serde(default)]
    pub contract_works_value: Option<Decimal>,
    /// Plant and equipment section value.
    #[serde(default)]
    pub plant_value: Option<Decimal>,
    /// Temporary works section value.
    #[serde(default)]
    pub temporary_works_value: Option<Decimal>,
    /// Other materials section value.
    #[serde(default)]
    pub other_materials_value: Option<Decimal>,
    /// Principal's existing property section value.
    #[serde(default)]
    pub principal_property_value: Option<Decimal>,
    /// Requested policy limit.
    #[serde(default)]
    pub policy_limit: Option<Decimal>,
    /// Requested deductible.
    #[serde(default)]
    pub deductible: Option<Decimal>,
    /// Soil type at the project site.
    #[serde(default)]
    pub soil_type: Option<String>,
    /// Site security arrangement.
    #[serde(default)]
    pub security_arrangement: Option<String>,
    /// Location hazard classification.
    #[serde(default)]
    pub location_hazard: Option<String>,
    /// Whether cross liability cover is elected.
    #[serde(default)]
    pub cross_liability: Option<BinaryChoice>,
    /// Additional clauses selected on the quote, priced individually.
    #[serde(default)]
    pub selected_clauses: Vec<String>,
}

impl QuoteContext {
    /// Creates a context with the given base premium and no rating
    /// attributes set.
    pub fn new(base_premium: Decimal) -> Self {
        Self {
            base_premium,
            project_duration_months: None,
            maintenance_period_months: None,
            contractor_experience_years: None,
            claims_count: None,
            largest_claim_amount: None,
            contractor_count: None,
            subcontractor_count: None,
            sum_insured: None,
            project_value: None,
            contract_works_value: None,
            plant_value: None,
            temporary_works_value: None,
            other_materials_value: None,
            principal_property_value: None,
            policy_limit: None,
            deductible: None,
            soil_type: None,
            security_arrangement: None,
            location_hazard: None,
            cross_liability: None,
            selected_clauses: vec![],
        }
    }

    /// Returns the numeric attribute a range dimension is resolved against.
    pub fn range_value(&self, key: DimensionKey) -> Option<Decimal> {
        match key {
            DimensionKey::ProjectDuration => self.project_duration_months,
            DimensionKey::MaintenancePeriod => self.maintenance_period_months,
            DimensionKey::ContractorExperience => self.contractor_experience_years,
            DimensionKey::ClaimsFrequency => self.claims_count,
            DimensionKey::ClaimAmount => self.largest_claim_amount,
            DimensionKey::ContractorCount => self.contractor_count,
            DimensionKey::SubcontractorCount => self.subcontractor_count,
            DimensionKey::SumInsured => self.sum_insured,
            DimensionKey::ProjectValue => self.project_value,
            DimensionKey::ContractWorks => self.contract_works_value,
            DimensionKey::Plant => self.plant_value,
            DimensionKey::TemporaryWorks => self.temporary_works_value,
            DimensionKey::OtherMaterials => self.other_materials_value,
            DimensionKey::PrincipalProperty => self.principal_property_value,
            DimensionKey::PolicyLimit => self.policy_limit,
            DimensionKey::Deductible => self.deductible,
            _ => None,
        }
    }

    /// Returns the label a categorical dimension is resolved against.
    ///
    /// Clause pricing is not resolved through this accessor: the selected
    /// clauses are a list and each entry is resolved individually.
    pub fn label(&self, key: DimensionKey) -> Option<&str> {
        match key {
            DimensionKey::SoilType => self.soil_type.as_deref(),
            DimensionKey::SecurityArrangement => self.security_arrangement.as_deref(),
            DimensionKey::LocationHazard => self.location_hazard.as_deref(),
            _ => None,
        }
    }
}
