use serde::{Deserialize, Serialize};

/// Reference total the placeholder breakdown was computed from.
pub const REFERENCE_TOTAL_TAX: f64 = 52_000.0;

/// One line item inside a spending category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingItem {
    pub id: String,
    pub description: String,
    /// Dollars spent on this item per dollar of tax paid.
    pub amount_per_dollar: f64,
    pub category: String,
}

/// Share of a tax payment that goes to one spending category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSpending {
    pub id: String,
    pub category: String,
    pub percentage: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<SpendingItem>,
}

/// Provider of the category breakdown shown on the dashboard.
pub trait SpendingSource: Send + Sync {
    /// Categories sorted by percentage, largest first.
    fn breakdown(&self) -> Vec<TaxSpending>;
}

/// Placeholder breakdown; real tax data is not sourced.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSpending;

type ItemRow = (&'static str, &'static str, f64);
type CategoryRow = (&'static str, &'static str, f64, &'static [ItemRow]);

const BREAKDOWN: &[CategoryRow] = &[
    (
        "health",
        "Health",
        12906.86,
        &[
            ("medicaid", "Medicaid", 5336.01),
            ("medicare", "Medicare", 4854.13),
            ("nih", "National Institutes of Health", 436.73),
            ("cdc", "Centers for Disease Control & Prevention (CDC)", 137.72),
            ("substance_mental_health", "Substance use & mental health programs", 86.89),
        ],
    ),
    (
        "war_weapons",
        "War and Weapons",
        10852.53,
        &[
            ("pentagon", "Pentagon", 8574.28),
            ("pentagon_contractors", "Pentagon - Contractors", 4187.01),
            ("pentagon_personnel", "Pentagon - Military Personnel", 1786.15),
            ("pentagon_top5_contractors", "Pentagon - Top 5 Contractors", 1137.58),
            ("nuclear_weapons", "Nuclear Weapons", 339.51),
            ("foreign_military_aid", "Aid to foreign militaries", 258.74),
            ("israel_wars", "Israel wars (Pentagon & aid)", 214.14),
            ("f35", "F-35 Jet Fighter", 127.86),
            ("pentagon_spacex", "Pentagon - SpaceX Contracts", 17.04),
            ("pentagon_dei", "Pentagon - Diversity, Equity, Inclusion (DEI)", 1.08),
        ],
    ),
    (
        "interest_debt",
        "Interest on Debt",
        10105.93,
        &[],
    ),
    (
        "veterans",
        "Veterans",
        3253.81,
        &[
            ("va", "Veterans' Affairs (VA)", 3251.63),
            ("pact_act", "Veterans Toxic Exposure Fund (PACT Act)", 189.31),
        ],
    ),
    (
        "unemployment_labor",
        "Unemployment and Labor",
        3089.14,
        &[
            ("tanf", "Temporary Assistance for Needy Families", 530.51),
            ("child_tax_credit", "Child Tax Credit", 270.23),
            ("refugee_assistance", "Refugee Assistance", 76.71),
            ("liheap", "Low Income Home Energy Assistance Program", 49.13),
            ("nlrb", "National Labor Relations Board (NLRB)", 3.00),
        ],
    ),
    (
        "education",
        "Education",
        2382.28,
        &[
            ("dept_education", "Department of Education", 2305.39),
            ("college_aid", "Dept. of Education - College Aid", 1220.53),
            ("k12_schools", "Dept. of Education - K-12 Schools", 896.15),
            ("cpb", "Corporation for Public Broadcasting", 5.50),
            ("imls", "Museum and Library Services", 4.20),
        ],
    ),
    (
        "food_agriculture",
        "Food and Agriculture",
        2101.90,
        &[
            ("snap", "Food stamps (SNAP)", 1305.30),
            ("school_lunch", "School Lunch & child nutrition", 353.78),
            ("fsa", "Farm Services Agency", 85.90),
            ("wic", "Women, Infants, & Children (WIC)", 48.76),
        ],
    ),
    (
        "government",
        "Government",
        1906.73,
        &[
            ("fdic", "Federal Deposit Insurance Corporation", 454.03),
            ("irs", "Internal Revenue Service", 231.86),
            ("federal_courts", "Federal Court System", 90.92),
            ("public_defenders", "Federal Court System - Public Defenders", 12.91),
            ("usps", "Postal Service", 11.53),
            ("cfpb", "Consumer Financial Protection Bureau (CFPB)", 8.58),
            ("mbda", "Minority Business Development Agency", 1.21),
            ("usich", "Interagency Council on Homelessness", 0.04),
        ],
    ),
    (
        "housing_community",
        "Housing and Community",
        1792.12,
        &[
            ("fema", "Federal Emergency Management Agency", 635.39),
            ("fema_drf", "FEMA - Disaster Relief Fund", 553.28),
            ("hud", "Dept. of Housing and Urban Development", 525.67),
            ("head_start", "Head Start", 112.87),
            ("public_housing", "Public Housing", 71.97),
        ],
    ),
    (
        "energy_environment",
        "Energy and Environment",
        1103.55,
        &[
            ("epa", "Environmental Protection Agency", 373.06),
            ("forest_service", "Forest Service", 115.03),
            ("noaa", "Nat'l Oceanic & Atmospheric Administration (NOAA)", 73.37),
            ("renewable_energy", "Energy efficiency and renewable energy", 73.36),
            ("nps", "National Park Service", 41.60),
        ],
    ),
    (
        "international_affairs",
        "International Affairs",
        681.73,
        &[
            ("diplomacy", "Diplomacy", 151.70),
            ("usaid", "U.S. Agency for International Development (USAID)", 115.34),
            ("usaid_climate", "USAID - Climate Aid", 8.77),
        ],
    ),
    (
        "law_enforcement",
        "Law Enforcement",
        668.42,
        &[
            ("deportations_border", "Deportations & border patrol", 287.64),
            ("federal_prisons", "Federal Prisons", 83.29),
        ],
    ),
    (
        "transportation",
        "Transportation",
        578.94,
        &[
            ("highways", "Highways", 111.66),
            ("public_transit", "Public transit", 87.29),
            ("tsa", "Transportation Security Administration (TSA)", 68.68),
            ("faa", "Federal Aviation Administration", 68.38),
            ("amtrak", "Amtrak & Rail Service", 40.28),
        ],
    ),
    (
        "science",
        "Science",
        411.82,
        &[
            ("nasa", "National Aeronautics & Space Administration (NASA)", 225.57),
            ("nsf", "National Science Foundation", 96.62),
            ("nasa_spacex", "NASA - SpaceX Contracts", 14.95),
        ],
    ),
];

impl SpendingSource for StaticSpending {
    fn breakdown(&self) -> Vec<TaxSpending> {
        let mut categories: Vec<TaxSpending> = BREAKDOWN
            .iter()
            .map(|(id, category, amount, items)| TaxSpending {
                id: id.to_string(),
                category: category.to_string(),
                percentage: amount / REFERENCE_TOTAL_TAX * 100.0,
                sub_items: items
                    .iter()
                    .map(|(item_id, description, item_amount)| SpendingItem {
                        id: item_id.to_string(),
                        description: description.to_string(),
                        amount_per_dollar: item_amount / REFERENCE_TOTAL_TAX,
                        category: category.to_string(),
                    })
                    .collect(),
            })
            .collect();

        categories.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        categories
    }
}

/// Every spending line item, flattened across categories.
pub fn all_items(source: &dyn SpendingSource) -> Vec<SpendingItem> {
    source
        .breakdown()
        .into_iter()
        .flat_map(|c| c.sub_items)
        .collect()
}
