use models::num::finite_or_zero;

/// Monthly payment on the standard reducing-balance formula:
/// `P * i * (1 + i)^n / ((1 + i)^n - 1)` with `i = rate / 12 / 100`.
///
/// A zero (or non-finite) principal, rate, or tenure short-circuits to 0,
/// so an unfilled loan row contributes nothing. The same guard catches a
/// non-finite result.
pub fn monthly_emi(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    if !is_set(principal) || !is_set(annual_rate_percent) || tenure_months == 0 {
        return 0.0;
    }
    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    finite_or_zero(principal * monthly_rate * growth / (growth - 1.0))
}

/// Interest paid over one year of the loan: twelve payments minus the
/// straight-line principal repaid in that year. Guarded like [`monthly_emi`].
pub fn yearly_interest_expense(principal: f64, annual_rate_percent: f64, tenure_months: u32) -> f64 {
    let emi = monthly_emi(principal, annual_rate_percent, tenure_months);
    if emi == 0.0 {
        return 0.0;
    }
    let yearly_payment = emi * 12.0;
    let principal_per_year = principal / tenure_months as f64 * 12.0;
    finite_or_zero(yearly_payment - principal_per_year)
}

fn is_set(v: f64) -> bool {
    v != 0.0 && v.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 12.0, 12)]
    #[case(120_000.0, 0.0, 12)]
    #[case(120_000.0, 12.0, 0)]
    #[case(0.0, 0.0, 0)]
    #[case(f64::NAN, 12.0, 12)]
    fn test_emi_zero_guard(#[case] principal: f64, #[case] rate: f64, #[case] tenure: u32) {
        assert_eq!(monthly_emi(principal, rate, tenure), 0.0);
        assert_eq!(yearly_interest_expense(principal, rate, tenure), 0.0);
    }

    #[test]
    fn test_emi_known_value() {
        // 1.2L over a year at 12%: the classic reducing-balance figure.
        let emi = monthly_emi(120_000.0, 12.0, 12);
        assert!((emi - 10_661.85).abs() < 0.05, "emi was {emi}");
    }

    #[test]
    fn test_emi_positive_and_finite() {
        for &(p, r, t) in &[
            (1.0, 0.01, 1),
            (50_000.0, 7.25, 36),
            (2_000_000.0, 8.5, 240),
            (1e12, 24.0, 600),
        ] {
            let emi = monthly_emi(p, r, t);
            assert!(emi > 0.0 && emi.is_finite(), "emi({p}, {r}, {t}) = {emi}");
        }
    }

    #[test]
    fn test_yearly_interest_expense_long_tenure() {
        // 20L at 8.5% over 20 years: first-year interest is well below the
        // total yearly payment but far above zero.
        let emi = monthly_emi(2_000_000.0, 8.5, 240);
        let interest = yearly_interest_expense(2_000_000.0, 8.5, 240);
        assert!((interest - (emi * 12.0 - 100_000.0)).abs() < 0.01);
        assert!(interest > 0.0);
    }

    #[test]
    fn test_yearly_interest_expense_short_tenure_stays_positive() {
        // Even under a year, twelve EMI payments outweigh twelve months of
        // straight-line principal.
        let interest = yearly_interest_expense(60_000.0, 10.0, 6);
        assert!(interest > 0.0);
        assert!(interest.is_finite());
    }
}
