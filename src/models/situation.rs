//! Household situation model and related types.
//!
//! A [`HouseholdSituation`] is the single input to a calculation. It is built
//! fresh for every request and never mutated while a calculation runs.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of salary payments per year (12 regular plus 13th and 14th).
pub const PAYMENTS_PER_YEAR: u32 = 14;

/// Dwelling size assumed when a request does not state one.
pub const DEFAULT_DWELLING_SIZE: Decimal = dec!(60);

/// Highest child age accepted at the API boundary.
pub const MAX_CHILD_AGE: u32 = 30;

/// Largest income, housing cost or dwelling size accepted at the API boundary.
///
/// Amounts up to this keep every intermediate value of a calculation well
/// inside the range of [`Decimal`].
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1000000000);

/// Austrian federal state the household lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Wien.
    Vienna,
    /// Steiermark.
    Styria,
    /// Oberösterreich.
    UpperAustria,
    /// Niederösterreich.
    LowerAustria,
    /// Salzburg.
    Salzburg,
    /// Tirol.
    Tyrol,
    /// Vorarlberg.
    Vorarlberg,
    /// Kärnten.
    Carinthia,
    /// Burgenland.
    Burgenland,
}

impl Region {
    /// All federal states in a stable order.
    pub const ALL: [Region; 9] = [
        Region::Vienna,
        Region::Styria,
        Region::UpperAustria,
        Region::LowerAustria,
        Region::Salzburg,
        Region::Tyrol,
        Region::Vorarlberg,
        Region::Carinthia,
        Region::Burgenland,
    ];

    /// The German name of the federal state.
    pub fn state_name(self) -> &'static str {
        match self {
            Region::Vienna => "Wien",
            Region::Styria => "Steiermark",
            Region::UpperAustria => "Oberösterreich",
            Region::LowerAustria => "Niederösterreich",
            Region::Salzburg => "Salzburg",
            Region::Tyrol => "Tirol",
            Region::Vorarlberg => "Vorarlberg",
            Region::Carinthia => "Kärnten",
            Region::Burgenland => "Burgenland",
        }
    }

    /// The authority a housing subsidy application is filed with.
    pub fn housing_office(self) -> &'static str {
        match self {
            Region::Vienna => "MA 50 (Wien)",
            Region::Styria => "Land Steiermark",
            Region::UpperAustria => "Land Oberösterreich",
            Region::LowerAustria => "Land Niederösterreich",
            Region::Salzburg => "Land Salzburg",
            Region::Tyrol => "Land Tirol",
            Region::Vorarlberg => "Land Vorarlberg",
            Region::Carinthia => "Land Kärnten",
            Region::Burgenland => "Land Burgenland",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.state_name())
    }
}

/// Marital status of the primary earner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    /// Living alone, no single parent credit.
    Single,
    /// Raising children alone (Alleinerzieher).
    SingleParent,
    /// Married or registered partnership, partner lives in the household.
    Married,
}

/// Whether an income figure is stated per month or per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomePeriod {
    /// One of the 14 monthly payments.
    #[default]
    Monthly,
    /// The annual total across all 14 payments.
    Yearly,
}

impl IncomePeriod {
    /// Converts an amount stated in this period to a monthly payment.
    ///
    /// ```
    /// use household_income::models::IncomePeriod;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(IncomePeriod::Yearly.to_monthly(dec!(42000)), dec!(3000));
    /// assert_eq!(IncomePeriod::Monthly.to_monthly(dec!(3000)), dec!(3000));
    /// ```
    pub fn to_monthly(self, amount: Decimal) -> Decimal {
        match self {
            IncomePeriod::Monthly => amount,
            IncomePeriod::Yearly => amount / Decimal::from(PAYMENTS_PER_YEAR),
        }
    }
}

/// A child living in the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Child {
    /// Age in completed years.
    pub age: u32,
    /// Whether the child attends a childcare facility.
    #[serde(default)]
    pub in_childcare: bool,
    /// Full-day (true) or half-day (false) care.
    #[serde(default)]
    pub full_day: bool,
}

impl Child {
    /// A child of the given age not enrolled in childcare.
    pub fn new(age: u32) -> Self {
        Self {
            age,
            in_childcare: false,
            full_day: false,
        }
    }

    /// A child of the given age enrolled in childcare.
    pub fn in_care(age: u32, full_day: bool) -> Self {
        Self {
            age,
            in_childcare: true,
            full_day,
        }
    }
}

fn default_dwelling_size() -> Decimal {
    DEFAULT_DWELLING_SIZE
}

/// Everything the engine needs to know about a household.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSituation {
    /// Monthly gross salary of the primary earner.
    pub monthly_gross_income: Decimal,
    /// Monthly gross salary of the partner, only considered when married.
    #[serde(default)]
    pub partner_monthly_gross_income: Option<Decimal>,
    /// Marital status of the primary earner.
    pub marital_status: MaritalStatus,
    /// Children in the household, in entry order.
    #[serde(default)]
    pub children: Vec<Child>,
    /// Monthly rent or housing cost.
    #[serde(default)]
    pub housing_cost: Decimal,
    /// Dwelling size in square metres.
    #[serde(default = "default_dwelling_size")]
    pub dwelling_size: Decimal,
    /// Federal state of residence.
    pub region: Region,
    /// Re-entering the workforce after a break (Wiedereinsteiger).
    #[serde(default)]
    pub reentering_workforce: bool,
}

impl HouseholdSituation {
    /// A single adult without children, rent or partner.
    pub fn single(monthly_gross_income: Decimal, region: Region) -> Self {
        Self {
            monthly_gross_income,
            partner_monthly_gross_income: None,
            marital_status: MaritalStatus::Single,
            children: Vec::new(),
            housing_cost: Decimal::ZERO,
            dwelling_size: DEFAULT_DWELLING_SIZE,
            region,
            reentering_workforce: false,
        }
    }

    /// Returns true if a partner lives in the household.
    pub fn is_married(&self) -> bool {
        self.marital_status == MaritalStatus::Married
    }

    /// Number of adults in the household.
    pub fn num_adults(&self) -> u32 {
        if self.is_married() { 2 } else { 1 }
    }

    /// Number of children in the household.
    pub fn num_children(&self) -> u32 {
        self.children.len() as u32
    }

    /// Adults plus children.
    pub fn household_size(&self) -> u32 {
        self.num_adults() + self.num_children()
    }

    /// Ages of all children in entry order.
    pub fn child_ages(&self) -> Vec<u32> {
        self.children.iter().map(|c| c.age).collect()
    }

    /// The partner's monthly gross income if it enters the calculation.
    ///
    /// Partner income only counts for married households and only when it
    /// is positive.
    pub fn partner_income(&self) -> Option<Decimal> {
        match self.partner_monthly_gross_income {
            Some(income) if self.is_married() && income > Decimal::ZERO => Some(income),
            _ => None,
        }
    }

    /// A copy of this situation with a different primary gross income.
    pub fn with_monthly_gross(&self, monthly_gross_income: Decimal) -> Self {
        Self {
            monthly_gross_income,
            ..self.clone()
        }
    }

    /// Checks the values an external caller supplied.
    ///
    /// The engine itself tolerates any amount between zero and
    /// [`MAX_INPUT_AMOUNT`]; this is used at the API boundary to reject
    /// obviously malformed requests.
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("monthly_gross_income", Some(self.monthly_gross_income)),
            ("partner_monthly_gross_income", self.partner_monthly_gross_income),
            ("housing_cost", Some(self.housing_cost)),
            ("dwelling_size", Some(self.dwelling_size)),
        ];
        for (field, value) in amounts {
            let Some(value) = value else { continue };
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidSituation {
                    field: field.to_string(),
                    message: "must not be negative".to_string(),
                });
            }
            if value > MAX_INPUT_AMOUNT {
                return Err(EngineError::InvalidSituation {
                    field: field.to_string(),
                    message: format!("must not exceed {}", MAX_INPUT_AMOUNT),
                });
            }
        }

        if let Some(child) = self.children.iter().find(|c| c.age > MAX_CHILD_AGE) {
            return Err(EngineError::InvalidSituation {
                field: "children".to_string(),
                message: format!("child age {} exceeds {}", child.age, MAX_CHILD_AGE),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn married_with_children() -> HouseholdSituation {
        HouseholdSituation {
            monthly_gross_income: dec!(3000),
            partner_monthly_gross_income: Some(dec!(1200)),
            marital_status: MaritalStatus::Married,
            children: vec![Child::new(4), Child::in_care(2, true)],
            housing_cost: dec!(900),
            dwelling_size: dec!(75),
            region: Region::Vienna,
            reentering_workforce: false,
        }
    }

    #[test]
    fn test_deserialize_minimal_situation_applies_defaults() {
        let json = r#"{
            "monthly_gross_income": "2000",
            "marital_status": "single",
            "region": "upper_austria"
        }"#;

        let situation: HouseholdSituation = serde_json::from_str(json).unwrap();
        assert_eq!(situation.monthly_gross_income, dec!(2000));
        assert_eq!(situation.region, Region::UpperAustria);
        assert!(situation.children.is_empty());
        assert_eq!(situation.housing_cost, Decimal::ZERO);
        assert_eq!(situation.dwelling_size, dec!(60));
        assert!(!situation.reentering_workforce);
        assert_eq!(situation.partner_monthly_gross_income, None);
    }

    #[test]
    fn test_deserialize_children_with_childcare_flags() {
        let json = r#"{
            "monthly_gross_income": 2500,
            "marital_status": "single_parent",
            "region": "styria",
            "children": [{"age": 3, "in_childcare": true, "full_day": true}, {"age": 8}]
        }"#;

        let situation: HouseholdSituation = serde_json::from_str(json).unwrap();
        assert_eq!(situation.marital_status, MaritalStatus::SingleParent);
        assert_eq!(situation.children[0], Child::in_care(3, true));
        assert_eq!(situation.children[1], Child::new(8));
    }

    #[test]
    fn test_household_size_counts_partner_and_children() {
        let situation = married_with_children();
        assert_eq!(situation.num_adults(), 2);
        assert_eq!(situation.num_children(), 2);
        assert_eq!(situation.household_size(), 4);
        assert_eq!(situation.child_ages(), vec![4, 2]);
    }

    #[test]
    fn test_partner_income_ignored_unless_married() {
        let mut situation = married_with_children();
        assert_eq!(situation.partner_income(), Some(dec!(1200)));

        situation.marital_status = MaritalStatus::SingleParent;
        assert_eq!(situation.partner_income(), None);
    }

    #[test]
    fn test_zero_partner_income_is_not_considered() {
        let mut situation = married_with_children();
        situation.partner_monthly_gross_income = Some(Decimal::ZERO);
        assert_eq!(situation.partner_income(), None);
    }

    #[test]
    fn test_with_monthly_gross_keeps_everything_else() {
        let situation = married_with_children();
        let changed = situation.with_monthly_gross(dec!(100));
        assert_eq!(changed.monthly_gross_income, dec!(100));
        assert_eq!(changed.children, situation.children);
        assert_eq!(changed.housing_cost, situation.housing_cost);
    }

    #[test]
    fn test_validate_rejects_negative_rent() {
        let mut situation = married_with_children();
        situation.housing_cost = dec!(-1);

        match situation.validate() {
            Err(EngineError::InvalidSituation { field, .. }) => assert_eq!(field, "housing_cost"),
            other => panic!("Expected InvalidSituation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_amounts_above_bound() {
        let mut situation = married_with_children();
        situation.partner_monthly_gross_income = Some(dec!(7000000000000000000000000000));

        match situation.validate() {
            Err(EngineError::InvalidSituation { field, message }) => {
                assert_eq!(field, "partner_monthly_gross_income");
                assert!(message.contains("must not exceed"));
            }
            other => panic!("Expected InvalidSituation, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_amounts_at_bound() {
        let mut situation = married_with_children();
        situation.monthly_gross_income = MAX_INPUT_AMOUNT;
        situation.housing_cost = MAX_INPUT_AMOUNT;
        assert!(situation.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_implausible_child_age() {
        let mut situation = married_with_children();
        situation.children.push(Child::new(45));
        assert!(situation.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_well_formed_situation() {
        assert!(married_with_children().validate().is_ok());
    }

    #[test]
    fn test_region_serialization() {
        assert_eq!(serde_json::to_string(&Region::Styria).unwrap(), "\"styria\"");
        assert_eq!(
            serde_json::to_string(&Region::LowerAustria).unwrap(),
            "\"lower_austria\""
        );
        assert_eq!(Region::Carinthia.to_string(), "Kärnten");
        assert_eq!(Region::ALL.len(), 9);
    }

    #[test]
    fn test_housing_office_names() {
        assert_eq!(Region::Vienna.housing_office(), "MA 50 (Wien)");
        assert_eq!(Region::Tyrol.housing_office(), "Land Tirol");
        assert_eq!(Region::Burgenland.housing_office(), "Land Burgenland");
    }
}
