use serde::Serialize;

/// Life-stage bucket used to select benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeCategory {
    EarlyCareer,
    Building,
    Accumulation,
    PeakEarning,
    PreRetirement,
}

pub fn age_category(age: u32) -> AgeCategory {
    match age {
        0..=24 => AgeCategory::EarlyCareer,
        25..=34 => AgeCategory::Building,
        35..=44 => AgeCategory::Accumulation,
        45..=54 => AgeCategory::PeakEarning,
        _ => AgeCategory::PreRetirement,
    }
}

/// Age-banded targets each score component is measured against.
#[derive(Debug, Clone, Copy)]
pub struct Benchmarks {
    /// Target savings rate as a fraction of income.
    pub savings_target: f64,
    /// Months of expenses the emergency fund should cover.
    pub emergency_months: f64,
    /// Investments as a multiple of annual income.
    pub investment_multiple: f64,
    /// Net worth as a multiple of annual income.
    pub net_worth_multiple: f64,
    /// Acceptable debt payments as a fraction of monthly income.
    pub debt_tolerance: f64,
}

pub fn benchmarks_for(category: AgeCategory) -> Benchmarks {
    match category {
        AgeCategory::EarlyCareer => Benchmarks {
            savings_target: 0.15,
            emergency_months: 3.0,
            investment_multiple: 0.3,
            net_worth_multiple: 0.5,
            debt_tolerance: 0.35,
        },
        AgeCategory::Building => Benchmarks {
            savings_target: 0.20,
            emergency_months: 6.0,
            investment_multiple: 1.0,
            net_worth_multiple: 1.5,
            debt_tolerance: 0.40,
        },
        AgeCategory::Accumulation => Benchmarks {
            savings_target: 0.25,
            emergency_months: 8.0,
            investment_multiple: 2.5,
            net_worth_multiple: 3.0,
            debt_tolerance: 0.35,
        },
        AgeCategory::PeakEarning => Benchmarks {
            savings_target: 0.30,
            emergency_months: 10.0,
            investment_multiple: 5.0,
            net_worth_multiple: 5.0,
            debt_tolerance: 0.25,
        },
        AgeCategory::PreRetirement => Benchmarks {
            savings_target: 0.35,
            emergency_months: 12.0,
            investment_multiple: 8.0,
            net_worth_multiple: 8.0,
            debt_tolerance: 0.15,
        },
    }
}

/// Age-appropriate portfolio split, in percent.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IdealAllocation {
    pub equity: f64,
    pub debt: f64,
    pub alternative: f64,
}

/// Equity% = 100 - age, bounded; the remainder splits into debt and
/// alternatives with their own bounds.
pub fn ideal_allocation(age: u32) -> IdealAllocation {
    let equity = (100.0 - age as f64).clamp(20.0, 80.0);
    let debt = (age as f64 - 20.0).clamp(15.0, 60.0);
    let alternative = (100.0 - equity - debt).clamp(5.0, 20.0);
    IdealAllocation {
        equity,
        debt,
        alternative,
    }
}
