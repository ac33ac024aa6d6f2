use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benefit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fact: Option<&'static str>,
}

impl Tip {
    fn new(title: &'static str, description: &'static str) -> Self {
        Self {
            title,
            description,
            benefit: None,
            subtype: None,
            detail: None,
            example: None,
            fact: None,
        }
    }

    fn benefit(mut self, benefit: &'static str) -> Self {
        self.benefit = Some(benefit);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTip {
    pub category: &'static str,
    pub advice: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialTips {
    pub saving_techniques: Vec<Tip>,
    pub debt_payoff: Vec<Tip>,
    pub financial_freedom: Vec<Tip>,
    pub additional_tips: Vec<CategoryTip>,
}

/// The static catalogue of financial best practices.
pub fn financial_tips() -> FinancialTips {
    FinancialTips {
        saving_techniques: vec![
            Tip::new(
                "Automatic Saving Rule",
                "Schedule an automatic transfer to your savings account on the same day you get paid. \"What you don't see, you don't spend\".",
            )
            .benefit("You save without willpower, building the habit without noticing."),
            Tip::new(
                "365 Day Method",
                "Save $1 on day 1, $2 on day 2 and so on. By the end of the year you will have $66,795.",
            )
            .benefit("Start small and grow gradually, keeping saving manageable."),
            Tip::new(
                "52 Week Challenge",
                "Save $100 in week 1, $200 in week 2 and so on. Or the other way round: start with $5,200 in week 1 and go down.",
            )
            .benefit("Flexible enough to adapt to your weekly cash flow."),
        ],
        debt_payoff: vec![
            Tip::new(
                "Snowball Method",
                "List your debts from smallest to largest balance. Pay the minimum on all of them and put every extra on the smallest. Once it is paid off, roll that payment into the next one.",
            )
            .benefit("Quick wins keep you motivated and preserve the psychological momentum."),
            Tip::new(
                "Avalanche Method",
                "Pay off the debts with the highest interest rate first, regardless of the balance.",
            )
            .benefit("Mathematically the most efficient: you pay the least total interest."),
            Tip::new(
                "Debt Consolidation",
                "Merge several debts into a single loan with a lower interest rate.",
            )
            .benefit("Simplifies payments and lowers the total financing cost."),
        ],
        financial_freedom: vec![
            Tip {
                subtype: Some("Coast FIRE"),
                detail: Some(
                    "Save enough for your investments to grow until retirement without further contributions, so you can work on something you love without financial pressure.",
                ),
                ..Tip::new(
                    "FIRE (Financial Independence, Retire Early)",
                    "Save aggressively (50-70% of income) to reach financial independence before the traditional retirement age.",
                )
            },
            Tip {
                example: Some("If you spend $300,000 a year, you need $7,500,000 invested."),
                ..Tip::new(
                    "The 4% Rule",
                    "You need capital worth 25 times your annual expenses. You can withdraw 4% a year, adjusted for inflation, without running out.",
                )
            },
            Tip {
                fact: Some(
                    "At 65, whoever started at 25 would have ~$10M against ~$5M for whoever started at 35 (assuming 8% a year).",
                ),
                ..Tip::new(
                    "Compound Interest",
                    "Time is your best ally. Investing $5,000 a month from age 25 instead of 35 can mean DOUBLE the capital at retirement.",
                )
            },
        ],
        additional_tips: vec![
            CategoryTip {
                category: "Mindset",
                advice: "Focus on the \"30,000 dollar questions\", not the 3 dollar ones. Care about your savings rate, investment returns and career growth, not the daily coffee.",
            },
            CategoryTip {
                category: "Income",
                advice: "Look for leverage: build assets that earn without your time (online courses, apps, digital content).",
            },
            CategoryTip {
                category: "Emergency Fund",
                advice: "Build a fund of 6-24 months of expenses in liquid assets before investing aggressively. It keeps you from selling in a bear market.",
            },
        ],
    }
}
