use super::domain::{ParameterValue, Rule};

/// Default auto-loan parameter rules, in the order underwriting evaluates them.
#[derive(Debug, Clone)]
pub struct AutoLoanRuleBlueprint {
    rules: Vec<Rule>,
}

impl AutoLoanRuleBlueprint {
    pub fn standard() -> Self {
        use ParameterValue::{Decimal, Flag, Integer, Percent, Text};

        let rules = vec![
            Rule::new("credit-score-floor", "Minimum credit score")
                .with_parameter("min_score", Integer(620))
                .with_parameter("bureau", Text("tri-merge".to_string())),
            Rule::new("ltv-cap", "Loan-to-value cap")
                .with_parameter("max_ltv", Percent(1.25))
                .with_parameter("include_fees", Flag(true)),
            Rule::new("dti-cap", "Debt-to-income cap")
                .with_parameter("max_dti", Percent(0.45))
                .with_parameter("max_pti", Percent(0.15)),
            Rule::new("term-limits", "Loan term limits")
                .with_parameter("min_months", Integer(24))
                .with_parameter("max_months", Integer(84)),
            Rule::new("apr-bands", "APR pricing bands")
                .with_parameter("prime_apr", Percent(0.0649))
                .with_parameter("near_prime_apr", Percent(0.0999))
                .with_parameter("subprime_apr", Percent(0.1649)),
            Rule::new("down-payment", "Minimum down payment")
                .with_parameter("min_percent", Percent(0.10))
                .with_parameter("min_amount", Decimal(1000.0)),
            Rule::new("vehicle-age", "Vehicle age limit")
                .with_parameter("max_age_years", Integer(10))
                .with_parameter("max_mileage", Integer(125_000)),
        ];

        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}
