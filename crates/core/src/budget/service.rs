//! Budget service for validation, filtering, and roll-ups.

use planner_shared::types::BudgetId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use super::types::{Budget, Person};

/// Which budgets a listing shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every budget.
    #[default]
    All,
    /// Budgets whose category equals the given label.
    Category(String),
}

impl CategoryFilter {
    /// Whether `budget` passes the filter.
    #[must_use]
    pub fn matches(&self, budget: &Budget) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => budget.category == *category,
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(category: Option<String>) -> Self {
        category.map_or(Self::All, Self::Category)
    }
}

/// Hours summed for one labor type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborTotal {
    /// Labor type key.
    pub labor_type: String,
    /// Summed hours.
    pub hours: Decimal,
}

/// A budget a person is assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonAssignment {
    /// Budget ID.
    pub budget_id: BudgetId,
    /// Budget name.
    pub name: String,
    /// Hours of every breakdown entry matching the person's labor type.
    pub hours: Decimal,
}

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Validate a budget record.
    ///
    /// # Errors
    ///
    /// Returns the first rule the budget breaks, checked in order: name,
    /// total hours, each breakdown entry, then date ordering.
    pub fn validate_budget(budget: &Budget) -> Result<(), BudgetError> {
        if budget.name.trim().is_empty() {
            return Err(BudgetError::MissingName);
        }

        if budget.total_hours <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveTotalHours);
        }

        if let Some(index) = budget
            .labor_breakdown
            .iter()
            .position(|item| item.labor_type.trim().is_empty() || item.hours.is_zero())
        {
            return Err(BudgetError::IncompleteLaborItem { index });
        }

        if let (Some(start), Some(end)) = (budget.start_date, budget.end_date) {
            if start > end {
                return Err(BudgetError::InvalidDateRange { start, end });
            }
        }

        Ok(())
    }

    /// Validate a personnel record.
    ///
    /// # Errors
    ///
    /// Returns the first missing or non-positive field.
    pub fn validate_person(person: &Person) -> Result<(), BudgetError> {
        if person.name.trim().is_empty() {
            return Err(BudgetError::MissingPersonName);
        }

        if person.labor_type.trim().is_empty() {
            return Err(BudgetError::MissingLaborType);
        }

        if person.hours_per_day <= Decimal::ZERO || person.days_per_week <= Decimal::ZERO {
            return Err(BudgetError::NonPositiveAvailability);
        }

        Ok(())
    }

    /// Distinct non-empty categories in first-seen order.
    #[must_use]
    pub fn categories(budgets: &[Budget]) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for budget in budgets {
            if !budget.category.is_empty() && !categories.contains(&budget.category) {
                categories.push(budget.category.clone());
            }
        }
        categories
    }

    /// Budgets passing `filter`, in input order.
    #[must_use]
    pub fn filter_by_category<'a>(budgets: &'a [Budget], filter: &CategoryFilter) -> Vec<&'a Budget> {
        budgets.iter().filter(|b| filter.matches(b)).collect()
    }

    /// Breakdown hours summed per labor type across every budget, whatever
    /// its status. Entries without a type are ignored.
    #[must_use]
    pub fn total_hours_by_type(budgets: &[Budget]) -> Vec<LaborTotal> {
        let mut totals: Vec<LaborTotal> = Vec::new();
        for item in budgets.iter().flat_map(|b| &b.labor_breakdown) {
            if item.labor_type.is_empty() {
                continue;
            }
            match totals.iter_mut().find(|t| t.labor_type == item.labor_type) {
                Some(total) => total.hours += item.hours,
                None => totals.push(LaborTotal {
                    labor_type: item.labor_type.clone(),
                    hours: item.hours,
                }),
            }
        }
        totals
    }

    /// Budgets `person` is assigned to, in input order.
    #[must_use]
    pub fn assignments_for_person(person: &Person, budgets: &[Budget]) -> Vec<PersonAssignment> {
        budgets
            .iter()
            .filter(|b| b.is_assigned(person.id))
            .map(|b| PersonAssignment {
                budget_id: b.id,
                name: b.name.clone(),
                hours: b
                    .labor_breakdown
                    .iter()
                    .filter(|item| item.labor_type == person.labor_type)
                    .map(|item| item.hours)
                    .sum(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::types::BudgetStatus;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn valid_budget() -> Budget {
        Budget::new("Bridge inspection")
            .with_status(BudgetStatus::Accepted)
            .with_labor("Eng", dec!(80))
            .with_dates(date(2024, 1, 1), date(2024, 3, 31))
    }

    #[test]
    fn test_validate_budget_ok() {
        assert_eq!(BudgetService::validate_budget(&valid_budget()), Ok(()));
    }

    #[test]
    fn test_validate_budget_without_dates_ok() {
        let mut budget = valid_budget();
        budget.end_date = None;
        assert_eq!(BudgetService::validate_budget(&budget), Ok(()));
    }

    #[test]
    fn test_validate_budget_rules() {
        let mut budget = valid_budget();
        budget.name = "  ".into();
        assert_eq!(
            BudgetService::validate_budget(&budget),
            Err(BudgetError::MissingName)
        );

        let mut budget = valid_budget();
        budget.total_hours = Decimal::ZERO;
        assert_eq!(
            BudgetService::validate_budget(&budget),
            Err(BudgetError::NonPositiveTotalHours)
        );

        let budget = valid_budget().with_labor("", dec!(5));
        assert_eq!(
            BudgetService::validate_budget(&budget),
            Err(BudgetError::IncompleteLaborItem { index: 1 })
        );

        let budget = valid_budget().with_dates(date(2024, 5, 2), date(2024, 5, 1));
        assert_eq!(
            BudgetService::validate_budget(&budget),
            Err(BudgetError::InvalidDateRange {
                start: date(2024, 5, 2),
                end: date(2024, 5, 1),
            })
        );
    }

    #[test]
    fn test_validate_person() {
        let person = Person::new("Ana", "Eng", dec!(8), dec!(5));
        assert_eq!(BudgetService::validate_person(&person), Ok(()));

        let idle = Person::new("Ana", "Eng", dec!(8), Decimal::ZERO);
        assert_eq!(
            BudgetService::validate_person(&idle),
            Err(BudgetError::NonPositiveAvailability)
        );

        let untyped = Person::new("Ana", "", dec!(8), dec!(5));
        assert_eq!(
            BudgetService::validate_person(&untyped),
            Err(BudgetError::MissingLaborType)
        );
    }

    #[test]
    fn test_categories_and_filter() {
        let budgets = vec![
            Budget::new("A").with_category("Civil"),
            Budget::new("B"),
            Budget::new("C").with_category("Electrical"),
            Budget::new("D").with_category("Civil"),
        ];

        assert_eq!(
            BudgetService::categories(&budgets),
            vec!["Civil".to_string(), "Electrical".to_string()]
        );

        let civil = BudgetService::filter_by_category(
            &budgets,
            &CategoryFilter::Category("Civil".into()),
        );
        let names: Vec<&str> = civil.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D"]);

        assert_eq!(
            BudgetService::filter_by_category(&budgets, &CategoryFilter::All).len(),
            4
        );
    }

    #[test]
    fn test_total_hours_by_type_ignores_status() {
        let budgets = vec![
            Budget::new("A")
                .with_status(BudgetStatus::Pending)
                .with_labor("Eng", dec!(10))
                .with_labor("QA", dec!(4)),
            Budget::new("B")
                .with_status(BudgetStatus::Accepted)
                .with_labor("Eng", dec!(5.5))
                .with_labor("", dec!(100)),
        ];

        assert_eq!(
            BudgetService::total_hours_by_type(&budgets),
            vec![
                LaborTotal {
                    labor_type: "Eng".into(),
                    hours: dec!(15.5)
                },
                LaborTotal {
                    labor_type: "QA".into(),
                    hours: dec!(4)
                },
            ]
        );
    }

    #[test]
    fn test_assignments_sum_every_matching_entry() {
        let person = Person::new("Ana", "Eng", dec!(8), dec!(5));
        let budgets = vec![
            Budget::new("A")
                .with_labor("Eng", dec!(10))
                .with_labor("Eng", dec!(6))
                .assign(person.id),
            Budget::new("B").with_labor("Eng", dec!(50)),
            Budget::new("C").with_labor("QA", dec!(3)).assign(person.id),
        ];

        let assignments = BudgetService::assignments_for_person(&person, &budgets);

        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].name, "A");
        assert_eq!(assignments[0].hours, dec!(16));
        assert_eq!(assignments[1].name, "C");
        assert_eq!(assignments[1].hours, Decimal::ZERO);
    }
}
